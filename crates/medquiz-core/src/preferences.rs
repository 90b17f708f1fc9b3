//! Persisted user preferences: active tier and disclaimer acknowledgement.

use std::sync::Arc;

use anyhow::Result;

use crate::model::Tier;
use crate::store::{KEY_ACTIVE_TIER, KEY_DISCLAIMER_ACCEPTED};
use crate::traits::KeyValueStore;

/// Store-backed preference service.
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
    default_tier: Tier,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>, default_tier: Tier) -> Self {
        Self {
            store,
            default_tier,
        }
    }

    /// The selected tier, or the default if none is stored or it is unreadable.
    pub async fn active_tier(&self) -> Result<Tier> {
        let Some(raw) = self.store.get(KEY_ACTIVE_TIER).await? else {
            return Ok(self.default_tier);
        };
        Ok(raw.parse().unwrap_or_else(|e| {
            tracing::warn!("ignoring stored tier: {e}");
            self.default_tier
        }))
    }

    pub async fn set_active_tier(&self, tier: Tier) -> Result<()> {
        self.store.set(KEY_ACTIVE_TIER, &tier.to_string()).await
    }

    pub async fn disclaimer_accepted(&self) -> Result<bool> {
        Ok(self.store.get(KEY_DISCLAIMER_ACCEPTED).await?.as_deref() == Some("true"))
    }

    pub async fn accept_disclaimer(&self) -> Result<()> {
        self.store.set(KEY_DISCLAIMER_ACCEPTED, "true").await
    }
}
