//! Mock content source for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::model::{Drug, Partition, ScenarioQuestion};
use crate::traits::ContentSource;

/// An in-memory content source for exercising the resolver without a network.
///
/// Partitions without content return empty documents. Partitions marked as
/// failing return an error for both documents.
#[derive(Default)]
pub struct MockContentSource {
    drugs: HashMap<Partition, Vec<Drug>>,
    scenarios: HashMap<Partition, Vec<ScenarioQuestion>>,
    failing: HashSet<Partition>,
    delay: Option<Duration>,
    call_count: AtomicU32,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drugs(mut self, partition: Partition, drugs: Vec<Drug>) -> Self {
        self.drugs.insert(partition, drugs);
        self
    }

    pub fn with_scenarios(mut self, partition: Partition, questions: Vec<ScenarioQuestion>) -> Self {
        self.scenarios.insert(partition, questions);
        self
    }

    /// Make every fetch for `partition` fail.
    pub fn with_failure(mut self, partition: Partition) -> Self {
        self.failing.insert(partition);
        self
    }

    /// Sleep before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of document fetches served so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    async fn begin(&self, partition: Partition) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&partition) {
            anyhow::bail!("mock failure for partition {partition}");
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_drugs(&self, partition: Partition) -> anyhow::Result<Vec<Drug>> {
        self.begin(partition).await?;
        Ok(self.drugs.get(&partition).cloned().unwrap_or_default())
    }

    async fn fetch_scenarios(&self, partition: Partition) -> anyhow::Result<Vec<ScenarioQuestion>> {
        self.begin(partition).await?;
        Ok(self.scenarios.get(&partition).cloned().unwrap_or_default())
    }
}
