//! The `medquiz list` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};
use medquiz_core::model::Tier;

use super::AppContext;

pub async fn execute(config_path: Option<&Path>, tier: Option<Tier>) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let tier = ctx.tier(tier).await?;
    let drugs = ctx.resolver()?.resolve_tier(tier).await;

    if drugs.is_empty() {
        println!("No medications available for {tier}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Generic", "Brand", "Class", "Routes"]);
    for drug in &drugs {
        table.add_row(vec![
            Cell::new(&drug.name.generic),
            Cell::new(drug.name.brand.join(", ")),
            Cell::new(&drug.class),
            Cell::new(drug.routes.join(", ")),
        ]);
    }

    println!("{table}");
    println!("{} medication(s) for {tier}", drugs.len());

    Ok(())
}
