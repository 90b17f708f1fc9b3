//! Quiz session state machine.
//!
//! A session is built from a finalized question list and only changes through
//! [`QuizSession::select_answer`] and [`QuizSession::advance`]. Both consume
//! the session and return the next state. Calls that do not apply to the
//! current state (answering twice, anything after the session finished) are
//! ignored rather than reported.
//!
//! Two question payloads share the machine: [`EntityQuestion`] (synthesized
//! from a drug) and [`ScenarioQuestion`] (pre-authored).

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::generator::{generate, GeneratedQuestion};
use crate::model::{Drug, ScenarioQuestion};

/// Scenario quizzes use this many questions unless told otherwise.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// A question the session can ask and score.
pub trait QuizItem {
    fn prompt(&self) -> &str;

    fn choices(&self) -> &[String];

    fn correct_answer(&self) -> &str;

    fn rationale(&self) -> Option<&str> {
        None
    }

    fn clinical_pearl(&self) -> Option<&str> {
        None
    }
}

/// A generated question paired with the drug it was generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityQuestion {
    pub question: GeneratedQuestion,
    pub drug: Drug,
}

impl QuizItem for EntityQuestion {
    fn prompt(&self) -> &str {
        &self.question.prompt
    }

    fn choices(&self) -> &[String] {
        &self.question.choices
    }

    fn correct_answer(&self) -> &str {
        &self.question.correct_answer
    }
}

impl QuizItem for ScenarioQuestion {
    fn prompt(&self) -> &str {
        &self.question
    }

    fn choices(&self) -> &[String] {
        &self.choices
    }

    fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    fn rationale(&self) -> Option<&str> {
        Some(self.rationale.as_str()).filter(|s| !s.is_empty())
    }

    fn clinical_pearl(&self) -> Option<&str> {
        Some(self.clinical_pearl.as_str()).filter(|s| !s.is_empty())
    }
}

/// Quiz start parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOptions {
    /// Shuffle the input; when false the input order is kept.
    pub shuffle: bool,
    /// Requested number of questions, clamped to what is available.
    pub count: Option<usize>,
}

impl QuizOptions {
    fn check(&self) -> Result<(), QuizError> {
        match self.count {
            Some(0) => Err(QuizError::ZeroCount),
            _ => Ok(()),
        }
    }
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            shuffle: true,
            count: None,
        }
    }
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected: String,
    pub is_correct: bool,
}

/// A running quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession<Q> {
    id: Uuid,
    started_at: DateTime<Utc>,
    questions: Vec<Q>,
    index: usize,
    score: u32,
    finished: bool,
    answers: Vec<Option<AnswerRecord>>,
}

impl<Q: QuizItem> QuizSession<Q> {
    /// Start a session over an already finalized question list.
    pub fn new(questions: Vec<Q>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoContent);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            questions,
            index: 0,
            score: 0,
            finished: false,
            answers,
        })
    }

    /// Record the answer to the current question.
    ///
    /// Only the first answer per question counts. Ignored once finished.
    pub fn select_answer(mut self, choice: &str) -> Self {
        if self.finished || self.index >= self.questions.len() {
            return self;
        }
        if self.answers[self.index].is_some() {
            tracing::debug!("question {} already answered, ignoring", self.index);
            return self;
        }
        let is_correct = choice == self.questions[self.index].correct_answer();
        if is_correct {
            self.score += 1;
        }
        self.answers[self.index] = Some(AnswerRecord {
            question_index: self.index,
            selected: choice.to_string(),
            is_correct,
        });
        self
    }

    /// Move to the next question, or finish after the last one.
    ///
    /// Does not check that the current question was answered.
    pub fn advance(mut self) -> Self {
        if self.finished {
            return self;
        }
        if self.index + 1 >= self.questions.len() {
            self.finished = true;
        } else {
            self.index += 1;
        }
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The question at the current index.
    pub fn current(&self) -> &Q {
        &self.questions[self.index]
    }

    pub fn questions(&self) -> &[Q] {
        &self.questions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_answered(&self) -> bool {
        self.answers[self.index].is_some()
    }

    /// Answers given so far, in question order.
    pub fn answers(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers.iter().flatten()
    }

    /// Result payload for the review screen.
    pub fn outcome(&self) -> QuizOutcome<Q>
    where
        Q: Clone,
    {
        let answers = self
            .answers()
            .map(|record| {
                let item = &self.questions[record.question_index];
                ReviewEntry {
                    item: item.clone(),
                    selected: record.selected.clone(),
                    correct_answer: item.correct_answer().to_string(),
                    is_correct: record.is_correct,
                    rationale: item.rationale().map(str::to_string),
                    clinical_pearl: item.clinical_pearl().map(str::to_string),
                }
            })
            .collect();
        QuizOutcome {
            session_id: self.id,
            score: self.score,
            total: self.total(),
            finished: self.finished,
            answers,
        }
    }
}

impl QuizSession<EntityQuestion> {
    /// Entity-driven quiz: one generated question per target drug.
    ///
    /// Distractors are drawn from `pool`, normally the whole resolved tier.
    /// Without a requested count every target is used.
    pub fn entity_quiz<R: Rng + ?Sized>(
        targets: &[Drug],
        pool: &[Drug],
        options: &QuizOptions,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        options.check()?;
        let mut order: Vec<&Drug> = targets.iter().collect();
        if options.shuffle {
            order.shuffle(rng);
        }
        let count = options.count.unwrap_or(order.len()).min(order.len());
        order.truncate(count);

        let questions = order
            .into_iter()
            .map(|drug| EntityQuestion {
                question: generate(drug, pool, rng),
                drug: drug.clone(),
            })
            .collect();
        Self::new(questions)
    }
}

impl QuizSession<ScenarioQuestion> {
    /// Scenario quiz drawn verbatim from pre-authored questions.
    ///
    /// Non multiple-choice questions and questions whose correct answer is
    /// not among their choices are skipped. Defaults to
    /// [`DEFAULT_QUESTION_COUNT`] questions.
    pub fn scenario_quiz<R: Rng + ?Sized>(
        questions: Vec<ScenarioQuestion>,
        options: &QuizOptions,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        options.check()?;
        let mut eligible: Vec<ScenarioQuestion> = questions
            .into_iter()
            .filter(|q| {
                let answerable = q.choices.contains(&q.correct_answer);
                if !answerable {
                    tracing::warn!("skipping scenario '{}': correct answer not in choices", q.id);
                }
                q.is_multiple_choice() && answerable
            })
            .collect();
        if options.shuffle {
            eligible.shuffle(rng);
        }
        eligible.truncate(options.count.unwrap_or(DEFAULT_QUESTION_COUNT));
        Self::new(eligible)
    }
}

/// Final result of a session, consumed by the review surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome<Q> {
    pub session_id: Uuid,
    pub score: u32,
    pub total: u32,
    pub finished: bool,
    /// Answered questions in order.
    pub answers: Vec<ReviewEntry<Q>>,
}

impl<Q> QuizOutcome<Q> {
    /// Score as a percentage of the total.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEntry<Q> {
    pub item: Q,
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
    /// Scenario questions only.
    pub rationale: Option<String>,
    /// Scenario questions only.
    pub clinical_pearl: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{full_drug, scenario};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rn_scenarios() -> Vec<ScenarioQuestion> {
        vec![
            scenario("s1", &["RN"], &["a", "b", "c"], "a"),
            scenario("s2", &["RN"], &["a", "b", "c"], "b"),
            scenario("s3", &["RN"], &["a", "b", "c"], "c"),
        ]
    }

    fn wrong_choice<Q: QuizItem>(q: &Q) -> String {
        q.choices()
            .iter()
            .find(|c| c.as_str() != q.correct_answer())
            .cloned()
            .unwrap()
    }

    #[test]
    fn scenario_quiz_end_to_end() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = QuizOptions {
            shuffle: true,
            count: Some(10),
        };
        let mut session = QuizSession::scenario_quiz(rn_scenarios(), &options, &mut rng).unwrap();
        assert_eq!(session.total(), 3);

        for i in 0..3 {
            let choice = if i == 1 {
                wrong_choice(session.current())
            } else {
                session.current().correct_answer().to_string()
            };
            session = session.select_answer(&choice).advance();
        }

        assert!(session.is_finished());
        assert_eq!(session.score(), 2);
        let outcome = session.outcome();
        assert_eq!((outcome.score, outcome.total, outcome.finished), (2, 3, true));
        assert_eq!(outcome.answers.len(), 3);
        assert!(!outcome.answers[1].is_correct);
        assert!(outcome.answers[0].rationale.as_deref().unwrap().starts_with("Because"));
        assert!(outcome.answers[2].clinical_pearl.is_some());
    }

    #[test]
    fn scenario_default_count_is_ten() {
        let questions: Vec<_> = (0..15)
            .map(|i| scenario(&format!("q{i}"), &["EMT"], &["x", "y"], "x"))
            .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let session =
            QuizSession::scenario_quiz(questions, &QuizOptions::default(), &mut rng).unwrap();
        assert_eq!(session.total(), DEFAULT_QUESTION_COUNT as u32);
    }

    #[test]
    fn scenario_quiz_skips_ineligible() {
        let mut essay = scenario("essay", &["RN"], &["a"], "a");
        essay.question_type = "short-answer".into();
        let broken = scenario("broken", &["RN"], &["a", "b"], "z");
        let questions = vec![essay, broken, scenario("ok", &["RN"], &["a"], "a")];
        let mut rng = StdRng::seed_from_u64(1);
        let session =
            QuizSession::scenario_quiz(questions, &QuizOptions::default(), &mut rng).unwrap();
        assert_eq!(session.total(), 1);
        assert_eq!(session.current().id, "ok");
    }

    #[test]
    fn correct_answer_scores_once() {
        let session = QuizSession::new(rn_scenarios()).unwrap();
        let session = session.select_answer("a");
        assert_eq!(session.score(), 1);
        let session = session.select_answer("a").select_answer("b");
        assert_eq!(session.score(), 1);
        assert_eq!(session.answers().count(), 1);
        assert_eq!(session.answers().next().unwrap().selected, "a");
    }

    #[test]
    fn wrong_answer_leaves_score() {
        let session = QuizSession::new(rn_scenarios()).unwrap().select_answer("c");
        assert_eq!(session.score(), 0);
        assert!(session.is_answered());
        assert!(!session.answers().next().unwrap().is_correct);
    }

    #[test]
    fn advance_finishes_exactly_once() {
        let mut session = QuizSession::new(rn_scenarios()).unwrap();
        let mut transitions = 0;
        for _ in 0..session.total() {
            let was_finished = session.is_finished();
            session = session.advance();
            if !was_finished && session.is_finished() {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(session.index(), 2);

        let session = session.advance().advance();
        assert!(session.is_finished());
        assert_eq!(session.index(), 2);
    }

    #[test]
    fn transitions_after_finish_are_ignored() {
        let session = QuizSession::new(vec![scenario("only", &["EMT"], &["a", "b"], "a")])
            .unwrap()
            .advance();
        assert!(session.is_finished());
        let session = session.select_answer("a");
        assert_eq!(session.score(), 0);
        assert_eq!(session.answers().count(), 0);
    }

    #[test]
    fn advance_does_not_require_answer() {
        let session = QuizSession::new(rn_scenarios()).unwrap().advance();
        assert_eq!(session.index(), 1);
        assert_eq!(session.answers().count(), 0);
    }

    #[test]
    fn empty_pool_is_no_content() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = QuizSession::scenario_quiz(vec![], &QuizOptions::default(), &mut rng).unwrap_err();
        assert_eq!(err, QuizError::NoContent);
        let err = QuizSession::entity_quiz(&[], &[], &QuizOptions::default(), &mut rng).unwrap_err();
        assert_eq!(err, QuizError::NoContent);
    }

    #[test]
    fn zero_count_is_rejected() {
        let pool = vec![full_drug("aspirin"), full_drug("glucose")];
        let mut rng = StdRng::seed_from_u64(1);
        let options = QuizOptions {
            shuffle: true,
            count: Some(0),
        };
        let err = QuizSession::entity_quiz(&pool, &pool, &options, &mut rng).unwrap_err();
        assert_eq!(err, QuizError::ZeroCount);
        let err = QuizSession::scenario_quiz(rn_scenarios(), &options, &mut rng).unwrap_err();
        assert_eq!(err, QuizError::ZeroCount);
    }

    #[test]
    fn entity_quiz_one_question_per_target() {
        let pool: Vec<_> = ["aspirin", "glucose", "naloxone", "oxygen"]
            .iter()
            .map(|n| full_drug(n))
            .collect();
        let mut rng = StdRng::seed_from_u64(2);
        let options = QuizOptions {
            shuffle: false,
            count: None,
        };
        let session = QuizSession::entity_quiz(&pool, &pool, &options, &mut rng).unwrap();
        assert_eq!(session.total(), 4);
        let names: Vec<_> = session
            .questions()
            .iter()
            .map(|q| q.drug.name.generic.as_str())
            .collect();
        assert_eq!(names, ["aspirin", "glucose", "naloxone", "oxygen"]);
        for q in session.questions() {
            assert!(q.prompt().contains(&q.drug.name.generic));
            assert_eq!(q.choices().len(), 3);
        }
    }

    #[test]
    fn entity_quiz_count_is_clamped() {
        let pool: Vec<_> = ["aspirin", "glucose"].iter().map(|n| full_drug(n)).collect();
        let mut rng = StdRng::seed_from_u64(2);
        let options = QuizOptions {
            shuffle: true,
            count: Some(10),
        };
        let session = QuizSession::entity_quiz(&pool, &pool, &options, &mut rng).unwrap();
        assert_eq!(session.total(), 2);

        let options = QuizOptions {
            shuffle: true,
            count: Some(1),
        };
        let session = QuizSession::entity_quiz(&pool, &pool, &options, &mut rng).unwrap();
        assert_eq!(session.total(), 1);
    }

    #[test]
    fn entity_quiz_scores_generated_answers() {
        let pool: Vec<_> = ["aspirin", "glucose", "naloxone"]
            .iter()
            .map(|n| full_drug(n))
            .collect();
        let mut rng = StdRng::seed_from_u64(8);
        let mut session =
            QuizSession::entity_quiz(&pool, &pool, &QuizOptions::default(), &mut rng).unwrap();
        while !session.is_finished() {
            let answer = session.current().correct_answer().to_string();
            session = session.select_answer(&answer).advance();
        }
        assert_eq!(session.score(), 3);
        let outcome = session.outcome();
        assert!((outcome.percent() - 100.0).abs() < f64::EPSILON);
        assert!(outcome.answers.iter().all(|a| a.rationale.is_none()));
    }
}
