//! medquiz CLI: credential-scoped medication quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use medquiz_core::model::Tier;
use tracing_subscriber::filter::LevelFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "medquiz",
    version,
    about = "Medication reference quizzes for EMT, AEMT, Paramedic and RN"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and sample content
    Init,

    /// Show or set the active credential tier
    Tier {
        /// EMT, AEMT, Paramedic or RN
        name: Option<Tier>,
    },

    /// List medications visible to a tier
    List {
        /// Tier to list (default: active tier)
        #[arg(long)]
        tier: Option<Tier>,
    },

    /// Quiz on generated medication questions
    Quiz {
        /// Tier to quiz on (default: active tier)
        #[arg(long)]
        tier: Option<Tier>,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Keep content order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Quiz on pre-authored clinical scenarios
    Scenario {
        /// Tier to quiz on (default: active tier)
        #[arg(long)]
        tier: Option<Tier>,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Keep content order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Show quiz statistics
    Stats {
        /// Clear all statistics
        #[arg(long)]
        reset: bool,
    },

    /// Check content documents for problems
    Validate,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Tier { name } => commands::tier::execute(config, name).await,
        Commands::List { tier } => commands::list::execute(config, tier).await,
        Commands::Quiz {
            tier,
            count,
            no_shuffle,
        } => commands::quiz::execute(config, tier, count, !no_shuffle).await,
        Commands::Scenario {
            tier,
            count,
            no_shuffle,
        } => commands::scenario::execute(config, tier, count, !no_shuffle).await,
        Commands::Stats { reset } => commands::stats::execute(config, reset).await,
        Commands::Validate => commands::validate::execute(config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
