use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use parley::core::config;
use parley::core::state::Theme;
use parley::tui;

#[derive(Parser)]
#[command(name = "parley", about = "Terminal chat client for a local AI assistant")]
struct Args {
    /// Chat endpoint URL (overrides config file and PARLEY_ENDPOINT_URL)
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Session identifier sent with every request
    #[arg(long)]
    session_id: Option<String>,

    /// Color theme
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parley.log in current directory.
    // Logging to the terminal would corrupt the TUI.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    // A malformed config file is a startup error; surface it before the
    // terminal goes into raw mode.
    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("parley: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.endpoint_url.as_deref(),
        args.session_id.as_deref(),
        args.theme,
    );

    log::info!(
        "Parley starting up (endpoint: {}, session: {}, theme: {})",
        resolved.endpoint_url,
        resolved.session_id,
        resolved.theme.label()
    );

    tui::run(resolved)
}
