//! medquiz-core: scope resolution, question generation, quiz sessions and statistics.
//!
//! This crate holds the content model for credential-scoped medication
//! knowledge and the engine that turns it into quizzes. Network access and
//! persistence stay behind the traits in [`traits`].

pub mod error;
pub mod generator;
pub mod mock;
pub mod model;
pub mod preferences;
pub mod resolver;
pub mod session;
pub mod statistics;
pub mod store;
pub mod traits;
pub mod validate;

#[cfg(test)]
mod testutil;

pub use error::QuizError;
pub use model::{Drug, Partition, ScenarioQuestion, Tier};
pub use resolver::ScopeResolver;
pub use session::{EntityQuestion, QuizItem, QuizOptions, QuizSession};
