//! Quiz engine error types.
//!
//! Only conditions the caller must act on are errors. Fetch failures, bad
//! persisted values and short distractor pools all degrade to defaults
//! instead and never show up here.

use thiserror::Error;

/// Errors surfaced by the quiz engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// No drugs or scenario questions are available to build a quiz from.
    #[error("no content available")]
    NoContent,

    /// A quiz was requested with zero questions.
    #[error("question count must be at least 1")]
    ZeroCount,

    /// A quiz result with no questions, or more correct answers than questions.
    #[error("invalid quiz result: {score}/{total}")]
    InvalidScore { score: u32, total: u32 },
}
