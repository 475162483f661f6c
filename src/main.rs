use clap::Parser;
use roster::core::config;
use roster::core::filters::Mode;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "roster", about = "Terminal student directory browser")]
struct Args {
    /// Base URL of the student API
    #[arg(short, long)]
    base_url: Option<String>,

    /// Pagination strategy to start in
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to roster.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("roster.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        config::RosterConfig::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref(), args.mode);

    log::info!(
        "Roster starting up in {} mode against {}",
        resolved.mode.label(),
        resolved.base_url
    );

    roster::tui::run(resolved)
}
