//! CLI entry point for markdir

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "markdir")]
#[command(version = build_version())]
#[command(about = "Serve a directory of Markdown documents as HTML", long_about = None)]
struct Cli {
    /// Content root to serve (defaults to the configured root, then ".")
    root: Option<String>,

    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Configuration file (defaults to ./markdir.yml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page template file instead of the embedded one
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Package version with the platform it was built for
fn build_version() -> String {
    format!(
        "{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "markdir=debug,tower_http=debug,info"
    } else {
        "markdir=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let mut config = markdir::config::ServerConfig::discover(cli.config.as_deref(), &cwd)?;

    if let Some(root) = cli.root {
        config.root = root;
    }
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(template) = cli.template {
        config.template = Some(template);
    }

    let markdir = markdir::Markdir::new(config)?;
    markdir.serve().await
}
