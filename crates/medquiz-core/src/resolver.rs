//! Scope resolution: merge the partitions a tier inherits into one drug list.
//!
//! Every partition is fetched once per resolver lifetime. The first caller
//! triggers the fetch, concurrent callers await the same in-flight
//! initialization, and later callers read the cached snapshot. A partition
//! that fails to load contributes nothing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::OnceCell;

use crate::model::{Drug, Partition, ScenarioQuestion, Tier};
use crate::traits::ContentSource;

/// Documents loaded for one partition.
#[derive(Debug, Clone, Default)]
pub struct PartitionContent {
    pub drugs: Vec<Drug>,
    pub scenarios: Vec<ScenarioQuestion>,
}

/// Immutable view of every partition, taken on first access.
#[derive(Debug, Default)]
pub struct ContentSnapshot {
    partitions: HashMap<Partition, PartitionContent>,
}

impl ContentSnapshot {
    pub fn new(partitions: HashMap<Partition, PartitionContent>) -> Self {
        Self { partitions }
    }

    pub fn partition(&self, partition: Partition) -> Option<&PartitionContent> {
        self.partitions.get(&partition)
    }

    /// Drugs visible to `tier`, deduplicated first-occurrence-wins.
    pub fn drugs_for(&self, tier: Tier) -> Vec<Drug> {
        merge_drugs(
            tier.partitions()
                .iter()
                .filter_map(|p| self.partitions.get(p))
                .map(|c| c.drugs.as_slice()),
        )
    }

    /// Multiple-choice scenario questions tagged for `tier`.
    pub fn scenarios_for(&self, tier: Tier) -> Vec<ScenarioQuestion> {
        let mut seen = HashSet::new();
        tier.partitions()
            .iter()
            .filter_map(|p| self.partitions.get(p))
            .flat_map(|c| c.scenarios.iter())
            .filter(|q| seen.insert(q.id.clone()))
            .filter(|q| q.is_multiple_choice() && q.is_tagged_for(tier))
            .cloned()
            .collect()
    }
}

/// Concatenate partitions in order and drop later entries whose normalized
/// generic name was already seen.
///
/// A higher-tier partition therefore never replaces a lower-tier drug with
/// the same generic name.
pub fn merge_drugs<'a>(partitions: impl IntoIterator<Item = &'a [Drug]>) -> Vec<Drug> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for drugs in partitions {
        for drug in drugs {
            if seen.insert(drug.key()) {
                merged.push(drug.clone());
            } else {
                tracing::debug!("dropping duplicate drug '{}'", drug.name.generic);
            }
        }
    }
    merged
}

/// Resolves tier-scoped content from a cached snapshot of all partitions.
pub struct ScopeResolver {
    source: Arc<dyn ContentSource>,
    snapshot: OnceCell<Arc<ContentSnapshot>>,
}

impl ScopeResolver {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            snapshot: OnceCell::new(),
        }
    }

    /// The content snapshot, fetching every partition on first use.
    pub async fn snapshot(&self) -> Arc<ContentSnapshot> {
        self.snapshot
            .get_or_init(|| fetch_snapshot(self.source.as_ref()))
            .await
            .clone()
    }

    /// Resolve drugs for a tier given by name. Unknown tiers resolve to nothing.
    pub async fn resolve(&self, tier: &str) -> Vec<Drug> {
        match tier.parse::<Tier>() {
            Ok(tier) => self.resolve_tier(tier).await,
            Err(e) => {
                tracing::warn!("{e}; resolving to no content");
                Vec::new()
            }
        }
    }

    pub async fn resolve_tier(&self, tier: Tier) -> Vec<Drug> {
        self.snapshot().await.drugs_for(tier)
    }

    /// Scenario questions eligible for a scenario quiz at `tier`.
    pub async fn scenarios(&self, tier: Tier) -> Vec<ScenarioQuestion> {
        self.snapshot().await.scenarios_for(tier)
    }
}

async fn fetch_snapshot(source: &dyn ContentSource) -> Arc<ContentSnapshot> {
    tracing::debug!("fetching all partitions from {} source", source.name());

    let fetches = Partition::ALL.iter().map(|&partition| async move {
        let (drugs, scenarios) = futures::join!(
            source.fetch_drugs(partition),
            source.fetch_scenarios(partition)
        );
        let drugs = drugs.unwrap_or_else(|e| {
            tracing::warn!("failed to load medications for {partition}: {e:#}");
            Vec::new()
        });
        let scenarios = scenarios.unwrap_or_else(|e| {
            tracing::warn!("failed to load scenarios for {partition}: {e:#}");
            Vec::new()
        });
        (partition, PartitionContent { drugs, scenarios })
    });

    let partitions = join_all(fetches).await.into_iter().collect();
    Arc::new(ContentSnapshot::new(partitions))
}
