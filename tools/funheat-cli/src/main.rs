//! Funheat CLI: command-line interface for motion script heatmaps.
//!
//! Usage:
//!   funheat generate <SCRIPT> --duration <SECS>   Render a heatmap PNG
//!   funheat speed <SCRIPT> --duration <SECS>      Print the interactive speed
//!   funheat inspect <SCRIPT>                      Show script information

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use funheat_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "funheat",
    about = "Motion script heatmaps and interactive speed",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a heatmap PNG for a script
    Generate {
        /// Path to the motion script
        script: PathBuf,

        /// Length of the media in seconds
        #[arg(short, long)]
        duration: f64,

        /// Output PNG path (defaults to <script>.heatmap.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Output height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Number of time segments
        #[arg(long)]
        segments: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the interactive (median) speed of a script
    Speed {
        /// Path to the motion script
        script: PathBuf,

        /// Length of the media in seconds
        #[arg(short, long)]
        duration: f64,
    },

    /// Show script information
    Inspect {
        /// Path to the motion script
        script: PathBuf,

        /// Length of the media in seconds, to count out-of-range actions
        #[arg(short, long)]
        duration: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    funheat_common::logging::init_logging(&config.logging);
    tracing::debug!(heatmap = ?config.heatmap, "Loaded configuration");

    match cli.command {
        Commands::Generate {
            script,
            duration,
            output,
            width,
            height,
            segments,
            json,
        } => {
            let mut heatmap = config.heatmap;
            if let Some(width) = width {
                heatmap.width = width;
            }
            if let Some(height) = height {
                heatmap.height = height;
            }
            if let Some(segments) = segments {
                heatmap.num_segments = segments;
            }
            commands::generate::run(script, duration, output, heatmap, json)
        }
        Commands::Speed { script, duration } => commands::speed::run(script, duration),
        Commands::Inspect { script, duration } => commands::inspect::run(script, duration),
    }
}
