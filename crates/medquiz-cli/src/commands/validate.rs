//! The `medquiz validate` command.

use std::path::Path;

use anyhow::Result;
use medquiz_core::model::Partition;
use medquiz_core::validate::{validate_drugs, validate_scenarios, ValidationWarning};

use super::AppContext;

pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let source = ctx.source()?;

    let mut total_warnings = 0;
    let mut failures = 0;

    for partition in Partition::ALL {
        let (drugs, scenarios) = tokio::join!(
            source.fetch_drugs(partition),
            source.fetch_scenarios(partition)
        );

        match drugs {
            Ok(drugs) => {
                println!("Partition {partition}: {} medication(s)", drugs.len());
                total_warnings += report(&validate_drugs(&drugs));
            }
            Err(e) => {
                println!("Partition {partition}: medications FAILED: {e:#}");
                failures += 1;
            }
        }
        match scenarios {
            Ok(questions) => {
                println!("Partition {partition}: {} scenario(s)", questions.len());
                total_warnings += report(&validate_scenarios(&questions));
            }
            Err(e) => {
                println!("Partition {partition}: scenarios FAILED: {e:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} document(s) could not be loaded");
    }
    if total_warnings == 0 {
        println!("All content valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn report(warnings: &[ValidationWarning]) -> usize {
    for w in warnings {
        let prefix = w
            .record_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    warnings.len()
}
