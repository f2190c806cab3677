//! timeline-strip: inspect timeline formatting and windowing from the shell
//!
//! Reads a timeline input document (JSON) and prints the formatted days,
//! packed rows, or the window a viewport would render.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timeline_strip::{
    cli::{self, ConfigView},
    utils::parse_iso_date,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "timeline-strip")]
#[command(version)]
#[command(about = "Timeline data formatting and viewport windowing", long_about = None)]
#[command(after_help = "INPUT FORMAT:
    {\"start_date\": \"2024-01-01\", \"end_date\": \"2024-03-31\", \"max_capacity\": 8,
     \"elements\": [...], \"elements_done\": [...], \"capacities\": [...], \"stages\": [...]}

EXAMPLES:
    # Per-day summaries, only days with content
    timeline-strip days plan.json --non-empty

    # Stage rows plus spanning elements
    timeline-strip rows plan.json --timeline

    # What a 1280px viewport scrolled to 2400px renders
    timeline-strip window plan.json --offset 2400 --viewport 1280

    # Effective configuration with the compact preset
    timeline-strip --preset compact config")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "TIMELINE_STRIP_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration preset (default, compact, comfortable)
    #[arg(long, global = true)]
    preset: Option<String>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'o', long, global = true)]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print formatted days as JSON
    Days {
        /// Timeline input document (`-` for stdin)
        input: PathBuf,

        /// Only print days with elements, capacity or stages
        #[arg(long)]
        non_empty: bool,
    },

    /// Print packed stage rows as JSON
    Rows {
        /// Timeline input document (`-` for stdin)
        input: PathBuf,

        /// Include spanning elements, not just stages
        #[arg(long)]
        timeline: bool,
    },

    /// Print the visible window for a scroll position
    Window {
        /// Timeline input document (`-` for stdin)
        input: PathBuf,

        /// Horizontal scroll offset in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        viewport: f64,
    },

    /// Print the detail payload of one day
    Detail {
        /// Timeline input document (`-` for stdin)
        input: PathBuf,

        /// Day to open (YYYY-MM-DD)
        date: String,
    },

    /// Show the effective configuration
    Config {
        /// Print the JSON schema instead
        #[arg(long, conflicts_with = "example")]
        schema: bool,

        /// Print a commented example file instead
        #[arg(long)]
        example: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let (config, source) = cli::resolve_config(cli.config.as_deref(), cli.preset.as_deref())?;

    // Dispatch to command handlers
    match cli.command {
        Commands::Days { input, non_empty } => cli::run_days(cli::DaysConfig {
            input,
            output_file: cli.output_file,
            non_empty,
        }),
        Commands::Rows { input, timeline } => cli::run_rows(cli::RowsConfig {
            input,
            output_file: cli.output_file,
            timeline,
        }),
        Commands::Window {
            input,
            offset,
            viewport,
        } => cli::run_window(
            cli::WindowConfig {
                input,
                output_file: cli.output_file,
                offset,
                viewport,
            },
            config,
        ),
        Commands::Detail { input, date } => {
            let date = parse_iso_date(&date)
                .with_context(|| format!("Invalid date '{date}' (expected YYYY-MM-DD)"))?;
            cli::run_detail(
                cli::DetailConfig {
                    input,
                    output_file: cli.output_file,
                    date,
                },
                config,
            )
        }
        Commands::Config { schema, example } => {
            let view = if schema {
                ConfigView::Schema
            } else if example {
                ConfigView::Example
            } else {
                ConfigView::Effective
            };
            cli::run_config(&config, source, view, cli.output_file)
        }
    }
}
