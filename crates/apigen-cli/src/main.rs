use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use apigen_cli::config::{ProjectConfig, CONFIG_FILE, DEFAULT_TARGET};
use apigen_cli::generate_target;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(about = "Generate TypeScript interfaces from native type manifests", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Configuration file
    #[arg(short, long, env = "APIGEN_CONFIG", default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the files of a target
    Generate {
        /// Target name
        #[arg(default_value = DEFAULT_TARGET)]
        target: String,
    },

    /// List configured targets
    Targets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the flags
    let level = if cli.debug {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug)
        .init();

    let config = ProjectConfig::from_file(&cli.config)?;

    match cli.command {
        Commands::Generate { target } => {
            let target = config.resolve(&target)?;
            let context = generate_target(&target)?;
            info!(
                "Wrote {} file(s) for target '{}'",
                context.file_count(),
                target.name
            );
            Ok(())
        }
        Commands::Targets => {
            for name in config.target_names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}
