//! CLI module for the advisor
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the advisory HTTP server
//! - `recommend` - Run one crop recommendation offline
//! - `dataset inspect` - Summarize the crop dataset by location
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! advisor serve
//!
//! # Crops for black soil in the Kharif season
//! advisor recommend --soil black --season kharif --location Telangana
//!
//! # Generate shell completions
//! advisor completions bash > ~/.bash_completion.d/advisor
//! ```

pub mod completions;
pub mod config;
pub mod dataset;
pub mod output;
pub mod recommend;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use dataset::handle_dataset_inspect;
pub use recommend::handle_recommend;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Farm Advisor - crop recommendations for farmers
#[derive(Parser, Debug)]
#[command(
    name = "advisor",
    version,
    about = "Crop recommendation and farmer advisory service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the advisory server
    Serve(ServeArgs),
    /// Recommend crops for a soil, season and location
    Recommend(RecommendArgs),
    /// Crop dataset utilities
    #[command(subcommand)]
    Dataset(DatasetCommands),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "advisor.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "ADVISOR_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "ADVISOR_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ADVISOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override crop dataset path
    #[arg(short, long, env = "ADVISOR_DATASET")]
    pub dataset: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Soil type (e.g. Black, Red, Alluvial)
    #[arg(long)]
    pub soil: String,

    /// Growing season (Kharif, Rabi, Zaid)
    #[arg(long)]
    pub season: String,

    /// State or region
    #[arg(long)]
    pub location: String,

    /// Crop dataset path (defaults to the configured one)
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, default_value = "advisor.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum DatasetCommands {
    /// List locations with their soils and record counts
    Inspect(DatasetInspectArgs),
}

#[derive(Args, Debug)]
pub struct DatasetInspectArgs {
    /// Crop dataset path (defaults to the configured one)
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, default_value = "advisor.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "advisor.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
