//! CLI entry point for trend-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "trend-rs")]
#[command(version)]
#[command(about = "Server-rendered front end for a news site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Render the site into static files
    #[command(alias = "g")]
    Generate {
        /// Output directory (defaults to the configured public directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Delete the generated files
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Pick up TREND_API_BASE_URL and friends from .env
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    let filter = if cli.debug {
        "trend_rs=debug,info"
    } else {
        "trend_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let site = trend_rs::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            trend_rs::server::start(&site, &ip, port).await?;
        }

        Commands::Generate { out } => {
            let site = trend_rs::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            match out {
                Some(out) => {
                    let out = if out.is_absolute() {
                        out
                    } else {
                        base_dir.join(out)
                    };
                    trend_rs::commands::generate::run(&site, &out).await?;
                }
                None => site.generate().await?,
            }
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let site = trend_rs::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("trend-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
