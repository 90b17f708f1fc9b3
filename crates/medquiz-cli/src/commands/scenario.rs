//! The `medquiz scenario` command.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use medquiz_core::model::Tier;
use medquiz_core::{QuizOptions, QuizSession};

use super::quiz::{finish, run_session};
use super::AppContext;

pub async fn execute(
    config_path: Option<&Path>,
    tier: Option<Tier>,
    count: Option<usize>,
    shuffle: bool,
) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let tier = ctx.tier(tier).await?;
    let questions = ctx.resolver()?.scenarios(tier).await;

    let options = QuizOptions {
        shuffle,
        count: Some(count.unwrap_or(ctx.config.default_question_count)),
    };
    let session = QuizSession::scenario_quiz(questions, &options, &mut rand::thread_rng())
        .with_context(|| format!("cannot start a {tier} scenario quiz"))?;

    ctx.show_disclaimer_once().await?;
    println!("{tier} scenario quiz: {} question(s)", session.total());

    let session = run_session(session, &mut io::stdin().lock(), &mut io::stdout().lock())?;
    finish(&ctx, &session).await
}
