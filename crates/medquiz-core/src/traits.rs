//! Core trait definitions for content sources and persisted storage.
//!
//! These async traits are implemented by the `medquiz-content` crate
//! (content sources) and by [`crate::store`] (key/value stores).

use async_trait::async_trait;

use crate::model::{Drug, Partition, ScenarioQuestion};

// ---------------------------------------------------------------------------
// Content source trait
// ---------------------------------------------------------------------------

/// A backend that serves the per-partition content documents.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch the medication document for one partition.
    async fn fetch_drugs(&self, partition: Partition) -> anyhow::Result<Vec<Drug>>;

    /// Fetch the scenario question document for one partition.
    async fn fetch_scenarios(&self, partition: Partition)
        -> anyhow::Result<Vec<ScenarioQuestion>>;
}

// ---------------------------------------------------------------------------
// Key/value store trait
// ---------------------------------------------------------------------------

/// String-keyed persisted store with last-write-wins semantics.
///
/// Values are opaque strings; callers serialize structured values themselves.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
