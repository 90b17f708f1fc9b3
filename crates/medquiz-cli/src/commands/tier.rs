//! The `medquiz tier` command.

use std::path::Path;

use anyhow::Result;
use medquiz_core::model::Tier;

use super::AppContext;

pub async fn execute(config_path: Option<&Path>, name: Option<Tier>) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let prefs = ctx.preferences();

    match name {
        Some(tier) => {
            prefs.set_active_tier(tier).await?;
            println!("Active tier set to {tier}");
        }
        None => {
            let tier = prefs.active_tier().await?;
            let inherited: Vec<_> = tier.partitions().iter().map(|p| p.as_str()).collect();
            println!("Active tier: {tier}");
            println!("Content partitions: {}", inherited.join(", "));
        }
    }

    Ok(())
}
