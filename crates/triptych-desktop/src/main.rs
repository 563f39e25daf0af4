//! Triptych - play three adaptive streams side by side
//!
//! Drag a pane sideways to resize it, tap a pane to maximize it.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use triptych_core::SessionConfig;
use triptych_desktop::{check_gstreamer_installation, run, WindowConfig};
use url::Url;

/// Triptych - three-pane stream player
#[derive(Parser)]
#[command(name = "triptych")]
#[command(version)]
#[command(about = "Play three adaptive streams side by side", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Stream URIs, one per pane (defaults to the built-in demo streams)
    #[arg(num_args = 3, value_name = "URI")]
    sources: Vec<Url>,

    /// Stop each pane at end of stream instead of looping
    #[arg(long)]
    no_loop: bool,

    /// Prepare players without starting playback
    #[arg(long)]
    paused: bool,

    /// Window title
    #[arg(long, default_value = "Triptych")]
    title: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    triptych_core::init();

    let mut config = SessionConfig::default();
    if let Ok(sources) = <[Url; 3]>::try_from(cli.sources) {
        config = config.with_sources(sources.map(String::from));
    }
    config.looping = !cli.no_loop;
    config.auto_play = !cli.paused;
    config.validate().context("Invalid session configuration")?;

    let info = check_gstreamer_installation()?;
    info!(version = %info.version, "GStreamer available");
    if !info.is_complete() {
        warn!(missing = ?info.missing_elements, "Some GStreamer elements are missing");
    }

    let window = WindowConfig {
        title: cli.title,
        ..WindowConfig::default()
    };
    run(config, window)
}
