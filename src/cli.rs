use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "safescore")]
#[command(about = "Tourist safety scoring and risk categorization", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an entity batch and report the risk distribution
    Score {
        /// Path to a JSON entity batch
        path: PathBuf,

        /// Output format (defaults to the configured default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show only the N riskiest entities
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Show only entities at or above this risk level
        #[arg(long = "min-category", value_enum)]
        min_category: Option<CategoryFilter>,

        /// Evaluation instant as RFC 3339 (defaults to now)
        #[arg(long = "at")]
        at: Option<String>,

        /// Increase verbosity (-v shows per-entity deduction breakdown)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Score a batch and fail if any entity falls below the floor
    Validate {
        /// Path to a JSON entity batch
        path: PathBuf,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum acceptable score (overrides configuration)
        #[arg(long = "min-score")]
        min_score: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Evaluation instant as RFC 3339 (defaults to now)
        #[arg(long = "at")]
        at: Option<String>,

        /// Increase verbosity (-v shows per-entity deduction breakdown)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum CategoryFilter {
    Safe,
    Moderate,
    AtRisk,
    Critical,
}

impl From<CategoryFilter> for crate::scoring::SafetyCategory {
    fn from(f: CategoryFilter) -> Self {
        match f {
            CategoryFilter::Safe => crate::scoring::SafetyCategory::Safe,
            CategoryFilter::Moderate => crate::scoring::SafetyCategory::Moderate,
            CategoryFilter::AtRisk => crate::scoring::SafetyCategory::AtRisk,
            CategoryFilter::Critical => crate::scoring::SafetyCategory::Critical,
        }
    }
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

/// Resolve the output format from the flag or the configured default.
pub fn resolve_format(flag: Option<OutputFormat>, configured: Option<&str>) -> OutputFormat {
    flag.unwrap_or(match configured {
        Some("json") => OutputFormat::Json,
        Some("markdown") => OutputFormat::Markdown,
        _ => OutputFormat::Terminal,
    })
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
