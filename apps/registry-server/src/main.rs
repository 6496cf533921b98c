use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use church_registry::bootstrap::{logging, server};
use church_registry::config::AppConfig;

/// Church administration registry server.
#[derive(Parser)]
#[command(name = "registry-server")]
#[command(about = "Church administration registry server")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !Path::new(path).is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    // Layered config: defaults -> YAML (if provided) -> env (APP__*) -> CLI.
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.override_port(port);
    }

    logging::init_logging(&config.logging, cli.verbose);
    tracing::info!("registry server starting");

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => server::run(config).await,
        Commands::Check => {
            tracing::info!("configuration validated");
            println!("Configuration OK");
            Ok(())
        }
    }
}
