//! Subcommand implementations and the state they share.

pub mod init;
pub mod list;
pub mod quiz;
pub mod scenario;
pub mod stats;
pub mod tier;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use medquiz_content::config::load_config_from;
use medquiz_content::{create_source, MedquizConfig};
use medquiz_core::model::Tier;
use medquiz_core::preferences::Preferences;
use medquiz_core::statistics::StatisticsService;
use medquiz_core::store::JsonFileStore;
use medquiz_core::traits::{ContentSource, KeyValueStore};
use medquiz_core::ScopeResolver;

const DISCLAIMER: &str = "medquiz is an educational reference only. It does not replace \
local protocols, medical direction or the product labeling.";

/// Loaded configuration plus the persisted store it points at.
pub struct AppContext {
    pub config: MedquizConfig,
    store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        tracing::debug!(content = ?config.content, data_dir = %config.data_dir.display(), "loaded config");
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::in_dir(&config.data_dir));
        Ok(Self { config, store })
    }

    pub fn source(&self) -> Result<Arc<dyn ContentSource>> {
        create_source(&self.config)
    }

    pub fn resolver(&self) -> Result<ScopeResolver> {
        Ok(ScopeResolver::new(self.source()?))
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::new(self.store.clone(), self.config.default_tier)
    }

    pub fn statistics(&self) -> StatisticsService {
        StatisticsService::new(self.store.clone())
    }

    /// The tier given on the command line, else the stored one.
    pub async fn tier(&self, explicit: Option<Tier>) -> Result<Tier> {
        match explicit {
            Some(tier) => Ok(tier),
            None => self.preferences().active_tier().await,
        }
    }

    /// Print the disclaimer the first time a quiz starts.
    pub async fn show_disclaimer_once(&self) -> Result<()> {
        let prefs = self.preferences();
        if !prefs.disclaimer_accepted().await? {
            println!("{DISCLAIMER}\n");
            prefs.accept_disclaimer().await?;
        }
        Ok(())
    }
}
