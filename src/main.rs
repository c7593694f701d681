use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use voyage::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "voyage", about = "Swipe through destinations, crew and technology")]
struct Args {
    /// JSON file that remembers the last screen and selections
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Keep navigation state in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to voyage.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("voyage.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        Default::default()
    });
    let cli = CliOverrides {
        state_file: args.state_file,
        ephemeral: args.ephemeral,
    };
    let resolved = config::resolve(&file_config, &cli)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    log::info!(
        "Voyage starting up (distance {} units, hold {}ms, storage {:?})",
        resolved.gesture.distance,
        resolved.gesture.hold_ms,
        resolved.storage
    );

    voyage::tui::run(resolved).await
}
