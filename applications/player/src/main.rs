/// Matinee - single-screen terminal video player backed by mpv
use anyhow::Context;
use clap::{Parser, Subcommand};
use matinee::{app::App, config::PlayerConfig};
use matinee_library::{LocalVideoSource, VideoSource};
use matinee_playback::MAX_SCAN_RESULTS;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "matinee")]
#[command(about = "Terminal video player backed by mpv", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Library directory to scan (overrides the config file)
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// Disable desktop notifications
    #[arg(long)]
    no_notify: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate the library and print it without starting the player
    Scan,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The terminal belongs to the UI, so logs go to a file instead.
    init_tracing()?;

    let cli = Cli::parse();

    let mut config = PlayerConfig::load(cli.config.as_deref())?;
    if let Some(library) = cli.library {
        config.library.root = library;
    }
    if cli.no_notify {
        config.ui.notifications = false;
    }
    config.validate()?;

    match cli.command {
        Some(Commands::Scan) => scan_library(&config).await,
        None => run_player(config).await,
    }
}

async fn run_player(config: PlayerConfig) -> anyhow::Result<()> {
    let app = App::new(&config)
        .await
        .context("failed to start the playback engine")?;
    app.run().await?;
    Ok(())
}

async fn scan_library(config: &PlayerConfig) -> anyhow::Result<()> {
    let root = &config.library.root;
    let source = LocalVideoSource::new(root);
    source
        .request_access()
        .await
        .with_context(|| format!("cannot read library at {}", root.display()))?;

    let videos = source.scan(MAX_SCAN_RESULTS).await?;
    if videos.is_empty() {
        println!("No videos found under {}", root.display());
        return Ok(());
    }
    for video in &videos {
        println!("{}\t{}", video.filename, video.uri);
    }
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("matinee.log")
        .context("failed to open matinee.log")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "matinee=info,matinee_playback=info,matinee_library=info,matinee_engine_mpv=info"
                .into()
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
