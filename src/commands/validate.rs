use crate::cli;
use crate::commands::score::resolve_instant;
use crate::io::{self, output::create_writer};
use crate::scoring::{ScoreCalculator, ScoredEntity};
use anyhow::Result;
use std::path::PathBuf;

pub struct ValidateConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub min_score: Option<u32>,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub at: Option<String>,
    pub verbosity: u8,
}

pub fn validate_batch(options: ValidateConfig) -> Result<()> {
    let app_config = match &options.config {
        Some(path) => crate::config::load_config_from(path)?,
        None => crate::config::get_config().clone(),
    };

    let min_score = options
        .min_score
        .unwrap_or_else(|| app_config.validate.unwrap_or_default().min_score);

    let now = resolve_instant(options.at.as_deref())?;
    let entities = io::read_entities(&options.path)?;
    let calculator = ScoreCalculator::from_config(&app_config);
    let report = calculator.build_report(&entities, now);

    let format = cli::resolve_format(options.format, app_config.default_format());
    let mut writer = create_writer(format.into(), options.output.as_deref(), options.verbosity)?;
    writer.write_report(&report)?;

    let offenders: Vec<&ScoredEntity> = report
        .entries
        .iter()
        .filter(|entry| entry.score < min_score)
        .collect();

    if offenders.is_empty() {
        log::info!(
            "All {} entities at or above the minimum score of {}",
            report.distribution.total_entities,
            min_score
        );
        return Ok(());
    }

    for entry in &offenders {
        log::warn!(
            "{} ({}) scored {}, below the floor of {}",
            entry.id,
            entry.name,
            entry.score,
            min_score
        );
    }
    anyhow::bail!(
        "{} of {} entities scored below the minimum of {}",
        offenders.len(),
        report.distribution.total_entities,
        min_score
    )
}
