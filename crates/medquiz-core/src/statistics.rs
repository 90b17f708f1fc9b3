//! Cross-session quiz statistics.
//!
//! The running summary lives in the key/value store under
//! [`KEY_QUIZ_STATS`] as a JSON blob. [`StatisticsService`] reads it lazily,
//! caches it, and replaces it wholesale on every completed quiz.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::session::{QuizItem, QuizSession};
use crate::store::KEY_QUIZ_STATS;
use crate::traits::KeyValueStore;

/// Running totals over every completed quiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizStatistics {
    pub total_quizzes: u32,
    pub total_questions: u32,
    pub total_correct: u32,
    /// Percentage of all questions answered correctly.
    pub average_score: f64,
    /// Best single-quiz percentage.
    pub best_score: f64,
    pub last_quiz_date: Option<DateTime<Utc>>,
}

impl QuizStatistics {
    /// Summary after adding one quiz result.
    pub fn with_quiz(&self, score: u32, total: u32, now: DateTime<Utc>) -> Result<Self, QuizError> {
        if total == 0 || score > total {
            return Err(QuizError::InvalidScore { score, total });
        }
        // Totals saturate; a stored summary may hold anything that parses.
        let total_questions = self.total_questions.saturating_add(total);
        let total_correct = self.total_correct.saturating_add(score).min(total_questions);
        let quiz_score = percent(score, total);
        Ok(Self {
            total_quizzes: self.total_quizzes.saturating_add(1),
            total_questions,
            total_correct,
            average_score: percent(total_correct, total_questions),
            best_score: self.best_score.max(quiz_score),
            last_quiz_date: Some(now),
        })
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Store-backed statistics with an in-memory cache.
pub struct StatisticsService {
    store: Arc<dyn KeyValueStore>,
    cache: Option<QuizStatistics>,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, cache: None }
    }

    /// Current summary. A missing or unreadable value yields the empty summary.
    pub async fn load(&mut self) -> Result<QuizStatistics> {
        if let Some(stats) = &self.cache {
            return Ok(stats.clone());
        }
        let stats = match self.store.get(KEY_QUIZ_STATS).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring malformed quiz statistics: {e}");
                QuizStatistics::default()
            }),
            None => QuizStatistics::default(),
        };
        self.cache = Some(stats.clone());
        Ok(stats)
    }

    /// Add one quiz result, persist, and return the new summary.
    pub async fn record_quiz(&mut self, score: u32, total: u32) -> Result<QuizStatistics> {
        let current = self.load().await?;
        let updated = current.with_quiz(score, total, Utc::now())?;
        let json = serde_json::to_string(&updated).context("failed to serialize statistics")?;
        self.store.set(KEY_QUIZ_STATS, &json).await?;
        tracing::debug!(
            "recorded quiz {score}/{total}, {} quizzes total",
            updated.total_quizzes
        );
        self.cache = Some(updated.clone());
        Ok(updated)
    }

    /// Record a session if it finished. Abandoned sessions record nothing.
    pub async fn record_session<Q: QuizItem>(
        &mut self,
        session: &QuizSession<Q>,
    ) -> Result<Option<QuizStatistics>> {
        if !session.is_finished() {
            return Ok(None);
        }
        self.record_quiz(session.score(), session.total())
            .await
            .map(Some)
    }

    /// Clear every total.
    pub async fn reset(&mut self) -> Result<()> {
        self.store.remove(KEY_QUIZ_STATS).await?;
        self.cache = Some(QuizStatistics::default());
        Ok(())
    }
}
