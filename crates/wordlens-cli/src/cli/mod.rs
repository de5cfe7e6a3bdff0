//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wordlens_core::TransformKind;
use wordlens_core::config;

mod commands;
mod input;

use input::InputArgs;

#[derive(Parser)]
#[command(name = "wordlens")]
#[command(version)]
#[command(about = "Text statistics and case transforms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show word count, character count and reading time
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply one or more transforms in order and print the result
    Transform {
        /// Transforms to apply: upper, lower, capitalize, reverse
        #[arg(value_name = "KIND", required = true)]
        kinds: Vec<TransformKind>,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Copy the text to the clipboard
    ///
    /// On Linux the system clipboard is served until another application
    /// takes it over, so the command may keep running after copying.
    Copy {
        /// Transform to apply before copying (repeatable)
        #[arg(long = "transform", value_name = "KIND")]
        transforms: Vec<TransformKind>,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Edit text interactively, one command per line
    Session,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

/// Logs to stderr, filtered by `WORDLENS_LOG` (default: warn).
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("WORDLENS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Stats { input, json } => {
            commands::stats::run(&input.read()?, &load_config()?, json)
        }
        Commands::Transform { kinds, input } => {
            commands::transform::run(&input.read()?, &kinds, &load_config()?);
            Ok(())
        }
        Commands::Copy { transforms, input } => {
            commands::copy::run(input.read()?, &transforms, &load_config()?)
        }
        Commands::Session => commands::session::run(&load_config()?).await,

        // Config subcommands must work even when the config file is broken.
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}

fn load_config() -> Result<config::Config> {
    let config = config::Config::load().context("load config")?;
    tracing::debug!(
        path = %config::paths::config_path().display(),
        words_per_minute = config.words_per_minute,
        "config loaded"
    );
    Ok(config)
}
