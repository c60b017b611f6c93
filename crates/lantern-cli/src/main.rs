//! Lantern CLI - run the landing page motion layer without a browser

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, simulate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lantern")]
#[command(about = "Headless driver for the Lantern motion layer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a stage over a synthetic page and run it on virtual time
    Simulate {
        /// Path to a motion config (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Virtual time to simulate
        #[arg(long, default_value = "12000")]
        duration_ms: u64,

        /// Frame length
        #[arg(long, default_value = "16")]
        frame_ms: u64,

        /// Viewport width in pixels
        #[arg(long, default_value = "1440")]
        width: f32,

        /// Viewport height in pixels
        #[arg(long, default_value = "900")]
        height: f32,

        /// Scroll offset reached by the end of the run
        #[arg(long, default_value = "0")]
        scroll_to: f32,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Print the effective config as TOML
    Config {
        /// Path to a motion config (TOML)
        #[arg(long)]
        config: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so json output stays parseable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            duration_ms,
            frame_ms,
            width,
            height,
            scroll_to,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config,
            duration_ms,
            frame_ms,
            width,
            height,
            scroll_to,
            format,
        }),
        Commands::Config { config } => config::run(config.as_deref()),
    }
}
