use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use portfolio::commands::{migrate::MigrateCommand, serve::serve};
use portfolio_config::Config;
use portfolio_utils::portfolio_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Cli::parse().run().await
}

/// Backend of the portfolio website: stores contact form messages and lists
/// them for the site owner.
#[derive(Debug, Parser)]
#[command(version = portfolio_version())]
struct Cli {
    /// Additional config files, loaded after the built-in defaults. Replaces
    /// the list in `PORTFOLIO_CONFIG` when given.
    #[arg(short, long = "config", global = true, value_name = "PATH")]
    config_paths: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the http api
    #[command(aliases(["run", "start", "s"]))]
    Serve,
    /// Inspect and apply database migrations
    #[command(aliases(["mig", "m"]))]
    Migrate {
        #[command(subcommand)]
        command: MigrateCommand,
    },
    /// Load the config and report whether it is valid
    CheckConfig {
        /// Also print the loaded config (secrets are redacted)
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print a shell completion script to stdout
    Completion {
        #[clap(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    async fn run(self) -> anyhow::Result<()> {
        let command = match self.command {
            Command::Completion { shell } => {
                let name = env!("CARGO_BIN_NAME");
                clap_complete::generate(shell, &mut Cli::command(), name, &mut std::io::stdout());
                return Ok(());
            }
            command => command,
        };

        init_tracing();
        let config = load_config(&self.config_paths)?;

        match command {
            Command::Serve => serve(config).await,
            Command::Migrate { command } => command.invoke(config).await,
            Command::CheckConfig { verbose } => {
                if verbose {
                    println!("{config:#?}");
                }
                println!("Config is valid");
                Ok(())
            }
            Command::Completion { .. } => Ok(()),
        }
    }
}

fn load_config(paths: &[PathBuf]) -> anyhow::Result<Config> {
    if paths.is_empty() {
        portfolio_config::load()
    } else {
        portfolio_config::load_with(paths, |key| std::env::var(key).ok())
    }
    .context("Failed to load config")
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
