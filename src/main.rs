use clap::Parser;
use pybuddy::core::config::{self, CliOverrides};
use pybuddy::core::credential::CredentialStore;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "pybuddy", about = "Terminal tutor that teaches a topic and hands out practice assignments")]
struct Args {
    /// Model to ask (overrides config file and PYBUDDY_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Topic to teach (overrides config file and PYBUDDY_TOPIC)
    #[arg(short, long)]
    topic: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to pybuddy.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("pybuddy.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("PyBuddy starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::BuddyConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            model: args.model,
            topic: args.topic,
        },
    );

    let store = CredentialStore::default_location().unwrap_or_else(|| {
        log::warn!("No home directory; storing the API key in the working directory");
        CredentialStore::new("api_key")
    });

    pybuddy::tui::run(resolved, store)
}
