// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{Entity, EntityKind, EntityStatus, ScoreInputs, VerificationStatus};

pub use crate::scoring::{
    CategoryDistribution, SafetyCategory, ScoreBreakdown, ScoreCalculator, ScoreReport,
    ScoredEntity, BASELINE_SCORE,
};

pub use crate::config::{
    CategoryThresholds, RecencyThresholds, SafescoreConfig, ScoringPenalties,
};

pub use crate::errors::ScoreError;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
