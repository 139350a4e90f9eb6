//! CLI frontend for the SIFRP check resolver.

mod commands;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use sifrp_mechanics::Settings;
use tracing_subscriber::EnvFilter;

use commands::roll::RollArgs;

#[derive(Parser)]
#[command(
    name = "sifrp",
    about = "Dice pool checks for A Song of Ice and Fire Roleplaying",
    version,
    propagate_version = true
)]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, env = "SIFRP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a test, initiative or attack and optionally roll it
    Roll(RollArgs),

    /// Show a sheet's derived values and active penalties
    Show {
        /// Sheet file (JSON)
        sheet: PathBuf,
    },

    /// List abilities and their specialities
    Abilities,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings, String> {
    match path {
        Some(path) => Settings::load(path).map_err(|e| e.to_string()),
        None => Ok(Settings::default()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    init_tracing(&settings);

    let result = match cli.command {
        Commands::Roll(args) => commands::roll::run(&settings, &args).await,
        Commands::Show { sheet } => commands::show::run(&settings, &sheet),
        Commands::Abilities => commands::abilities::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
