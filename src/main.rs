use clap::Parser;
use std::path::PathBuf;
use wisdom_kiosk::config::Config;
use wisdom_kiosk::logging::init_tracing;
use wisdom_kiosk::ui::runtime;

/// Touchscreen wisdom kiosk: tap for a number, browse events, sign up.
#[derive(Debug, Parser)]
#[command(name = "wisdom-kiosk", version, about)]
struct Cli {
    /// Path to the config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the remote content endpoint URL.
    #[arg(long)]
    content_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.content_url {
        config.remote.content_url = url;
    }
    config.validate()?;

    runtime::run(config)
}
