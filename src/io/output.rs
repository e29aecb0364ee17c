use crate::scoring::{SafetyCategory, ScoreReport, ScoredEntity};
use colored::*;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ScoreReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_entities(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Safety Score Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            self.writer,
            "Evaluated at: {}",
            report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        let dist = &report.distribution;

        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Entities scored | {} |", dist.total_entities)?;
        writeln!(
            self.writer,
            "| Average score | {:.1} |",
            report.average_score
        )?;
        writeln!(self.writer, "| Safe | {} |", dist.safe_count)?;
        writeln!(self.writer, "| Moderate | {} |", dist.moderate_count)?;
        writeln!(self.writer, "| At risk | {} |", dist.at_risk_count)?;
        writeln!(self.writer, "| Critical | {} |", dist.critical_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_entities(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Entities")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| ID | Name | Kind | Score | Category |")?;
        writeln!(self.writer, "|----|------|------|-------|----------|")?;
        for entry in &report.entries {
            writeln!(
                self.writer,
                "| {} | {} | {:?} | {} | {} |",
                entry.id,
                entry.name,
                entry.kind,
                entry.score,
                entry.category.as_str()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    verbosity: u8,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, verbosity: u8) -> Self {
        Self { writer, verbosity }
    }

    fn category_label(category: SafetyCategory) -> ColoredString {
        match category {
            SafetyCategory::Safe => "SAFE".green(),
            SafetyCategory::Moderate => "MODERATE".yellow(),
            SafetyCategory::AtRisk => "AT RISK".truecolor(255, 140, 0),
            SafetyCategory::Critical => "CRITICAL".red().bold(),
        }
    }

    fn write_entry(&mut self, entry: &ScoredEntity) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "  [{:>3}] {} {} ({:?})",
            entry.score,
            Self::category_label(entry.category),
            entry.id,
            entry.kind,
        )?;
        if self.verbosity >= 1 {
            let b = &entry.breakdown;
            writeln!(
                self.writer,
                "        alerts -{}, status -{}, verification -{}, recency -{} (raw {})",
                b.alert_deduction,
                b.status_deduction,
                b.verification_deduction,
                b.recency_deduction,
                b.raw_score,
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        let dist = &report.distribution;
        writeln!(
            self.writer,
            "Scored {} entities (average {:.1})",
            dist.total_entities, report.average_score
        )?;
        writeln!(
            self.writer,
            "  safe: {}  moderate: {}  at risk: {}  critical: {}",
            dist.safe_count, dist.moderate_count, dist.at_risk_count, dist.critical_count
        )?;
        writeln!(self.writer)?;
        for entry in report.entries.iter() {
            self.write_entry(entry)?;
        }
        Ok(())
    }
}

/// Build a writer for the requested format, targeting a file when a
/// destination is given and stdout otherwise.
pub fn create_writer(
    format: OutputFormat,
    destination: Option<&Path>,
    verbosity: u8,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match destination {
        Some(path) => Box::new(fs::File::create(path).map_err(|e| {
            anyhow::anyhow!("Failed to create {}: {}", path.display(), e)
        })?),
        None => Box::new(std::io::stdout()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink, verbosity)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringPenalties;
    use crate::core::{Entity, EntityKind, EntityStatus, ScoreInputs, VerificationStatus};
    use crate::scoring::ScoreCalculator;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_report() -> ScoreReport {
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let entities = vec![
            Entity {
                id: "T-1".to_string(),
                name: "Asha".to_string(),
                kind: EntityKind::Tourist,
                inputs: ScoreInputs {
                    status: EntityStatus::Active,
                    verification_status: VerificationStatus::Verified,
                    active_alert_count: 0,
                    last_check_in: now,
                },
            },
            Entity {
                id: "Z-9".to_string(),
                name: "Old fort".to_string(),
                kind: EntityKind::Zone,
                inputs: ScoreInputs {
                    status: EntityStatus::Emergency,
                    verification_status: VerificationStatus::Verified,
                    active_alert_count: 1,
                    last_check_in: now,
                },
            },
        ];
        ScoreCalculator::default().build_report(&entities, now)
    }

    #[test]
    fn json_writer_round_trips_the_report() {
        let report = sample_report();
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();

        let parsed: ScoreReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.entries, report.entries);
        assert_eq!(parsed.distribution, report.distribution);
    }

    #[test]
    fn markdown_writer_emits_summary_and_entity_tables() {
        let report = sample_report();
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_report(&report)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# Safety Score Report"));
        assert!(text.contains("| Entities scored | 2 |"));
        assert!(text.contains("| Z-9 | Old fort | Zone | 30 | critical |"));
        assert!(text.contains("| T-1 | Asha | Tourist | 100 | safe |"));
    }

    #[test]
    fn terminal_writer_shows_breakdown_when_verbose() {
        colored::control::set_override(false);
        let report = sample_report();

        let mut quiet = Vec::new();
        TerminalWriter::new(&mut quiet, 0)
            .write_report(&report)
            .unwrap();
        let quiet_text = String::from_utf8(quiet).unwrap();
        assert!(quiet_text.contains("Scored 2 entities"));
        assert!(!quiet_text.contains("alerts -"));

        let mut verbose = Vec::new();
        TerminalWriter::new(&mut verbose, 1)
            .write_report(&report)
            .unwrap();
        let verbose_text = String::from_utf8(verbose).unwrap();
        assert!(verbose_text.contains("alerts -20, status -50, verification -0, recency -0 (raw 30)"));
        colored::control::unset_override();
    }

    #[test]
    fn breakdown_line_reflects_custom_penalties() {
        colored::control::set_override(false);
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let calc = ScoreCalculator {
            penalties: ScoringPenalties {
                emergency: 40,
                ..ScoringPenalties::default()
            },
            ..ScoreCalculator::default()
        };
        let report = calc.build_report(
            &[Entity {
                id: "Z-1".to_string(),
                name: "Pier".to_string(),
                kind: EntityKind::Zone,
                inputs: ScoreInputs {
                    status: EntityStatus::Emergency,
                    verification_status: VerificationStatus::Verified,
                    active_alert_count: 0,
                    last_check_in: now,
                },
            }],
            now,
        );

        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer, 1)
            .write_report(&report)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("status -40"));
        colored::control::unset_override();
    }
}
