//! The `medquiz stats` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::AppContext;

pub async fn execute(config_path: Option<&Path>, reset: bool) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let mut stats = ctx.statistics();

    if reset {
        stats.reset().await?;
        println!("Statistics reset.");
        return Ok(());
    }

    let summary = stats.load().await?;
    let last = summary
        .last_quiz_date
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec![
        Cell::new("Quizzes taken"),
        Cell::new(summary.total_quizzes),
    ]);
    table.add_row(vec![
        Cell::new("Questions answered"),
        Cell::new(summary.total_questions),
    ]);
    table.add_row(vec![
        Cell::new("Correct answers"),
        Cell::new(summary.total_correct),
    ]);
    table.add_row(vec![
        Cell::new("Average score"),
        Cell::new(format!("{:.1}%", summary.average_score)),
    ]);
    table.add_row(vec![
        Cell::new("Best score"),
        Cell::new(format!("{:.1}%", summary.best_score)),
    ]);
    table.add_row(vec![Cell::new("Last quiz"), Cell::new(last)]);

    println!("{table}");

    Ok(())
}
