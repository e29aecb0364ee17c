use crate::cli;
use crate::io::{self, output::create_writer};
use crate::scoring::{SafetyCategory, ScoreCalculator, ScoreReport};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub struct ScoreConfig {
    pub path: PathBuf,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub min_category: Option<SafetyCategory>,
    pub at: Option<String>,
    pub verbosity: u8,
}

pub fn handle_score(config: ScoreConfig) -> Result<()> {
    let now = resolve_instant(config.at.as_deref())?;
    let entities = io::read_entities(&config.path)?;
    log::info!(
        "Scoring {} entities from {}",
        entities.len(),
        config.path.display()
    );

    let app_config = crate::config::get_config();
    let calculator = ScoreCalculator::from_config(app_config);
    let mut report = calculator.build_report(&entities, now);
    apply_display_filters(&mut report, config.min_category, config.top);

    let format = cli::resolve_format(config.format, app_config.default_format());
    let mut writer = create_writer(format.into(), config.output.as_deref(), config.verbosity)?;
    writer.write_report(&report)
}

/// Parse the evaluation instant from --at, defaulting to the wall clock.
pub(crate) fn resolve_instant(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| anyhow::anyhow!("Invalid --at timestamp '{}': {}", raw, e)),
        None => Ok(Utc::now()),
    }
}

/// Narrow the displayed entries. The distribution and average keep the
/// whole batch so filtering never changes the summary numbers.
fn apply_display_filters(
    report: &mut ScoreReport,
    min_category: Option<SafetyCategory>,
    top: Option<usize>,
) {
    if let Some(min) = min_category {
        report.entries.retain(|entry| entry.category >= min);
    }
    if let Some(n) = top {
        report.entries = report.entries.take(n);
    }
}
