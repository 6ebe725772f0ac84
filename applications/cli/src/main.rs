/// Cadence - playback queue from the command line
use cadence_cli::{
    commands::{self, Command},
    config::CliConfig,
};
use cadence_queue::QueueManager;
use cadence_storage::JsonFileStore;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence playback queue", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing (stderr, so stdout stays the command output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(path = %config.storage.state_path.display(), "Opening queue state");
    let store = JsonFileStore::open(&config.storage.state_path)?;
    let mut manager = QueueManager::with_config(store, config.queue_config());

    for line in commands::run(&mut manager, &cli.command) {
        println!("{}", line);
    }

    Ok(())
}
