use crate::config::{CategoryThresholds, RecencyThresholds, SafescoreConfig, ScoringPenalties};
use crate::core::{Entity, EntityKind, EntityStatus, ScoreInputs, VerificationStatus};
use chrono::{DateTime, Duration, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

/// Every entity starts from a full score before deductions.
pub const BASELINE_SCORE: u32 = 100;

/// Derived risk label, ordered by increasing risk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyCategory {
    Safe,
    Moderate,
    AtRisk,
    Critical,
}

impl SafetyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyCategory::Safe => "safe",
            SafetyCategory::Moderate => "moderate",
            SafetyCategory::AtRisk => "at_risk",
            SafetyCategory::Critical => "critical",
        }
    }
}

/// Per-factor deduction record, kept alongside the final score so
/// verbose output can show where the points went.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub alert_deduction: u64,
    pub status_deduction: u64,
    pub verification_deduction: u64,
    pub recency_deduction: u64,
    /// Baseline minus all deductions, before clamping
    pub raw_score: i64,
    pub final_score: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub score: u32,
    pub category: SafetyCategory,
    pub breakdown: ScoreBreakdown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub safe_count: usize,
    pub moderate_count: usize,
    pub at_risk_count: usize,
    pub critical_count: usize,
    pub total_entities: usize,
}

impl CategoryDistribution {
    pub fn tally(&mut self, category: SafetyCategory) {
        match category {
            SafetyCategory::Safe => self.safe_count += 1,
            SafetyCategory::Moderate => self.moderate_count += 1,
            SafetyCategory::AtRisk => self.at_risk_count += 1,
            SafetyCategory::Critical => self.critical_count += 1,
        }
        self.total_entities += 1;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub generated_at: DateTime<Utc>,
    pub evaluated_at: DateTime<Utc>,
    pub average_score: f64,
    pub distribution: CategoryDistribution,
    pub entries: Vector<ScoredEntity>,
}

/// Maps the four status signals to a bounded safety score.
///
/// Stateless and pure: the evaluation instant is an argument, deductions
/// accumulate in signed arithmetic, and the clamp to [0, 100] is applied
/// once, last. Safe to call from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct ScoreCalculator {
    pub penalties: ScoringPenalties,
    pub recency: RecencyThresholds,
    pub categories: CategoryThresholds,
}

impl ScoreCalculator {
    pub fn from_config(config: &SafescoreConfig) -> Self {
        Self {
            penalties: config.penalties.unwrap_or_default(),
            recency: config.recency.unwrap_or_default(),
            categories: config.categories.unwrap_or_default(),
        }
    }

    /// Compute the safety score for one set of inputs.
    pub fn score(&self, inputs: &ScoreInputs, now: DateTime<Utc>) -> u32 {
        self.breakdown(inputs, now).final_score
    }

    /// Compute the score together with its per-factor deductions.
    pub fn breakdown(&self, inputs: &ScoreInputs, now: DateTime<Utc>) -> ScoreBreakdown {
        let alert_deduction =
            u64::from(self.penalties.alert) * u64::from(inputs.active_alert_count);

        let status_deduction = u64::from(match inputs.status {
            EntityStatus::Emergency => self.penalties.emergency,
            EntityStatus::Inactive => self.penalties.inactive,
            EntityStatus::Active | EntityStatus::CheckedOut => 0,
        });

        let verification_deduction =
            if inputs.verification_status == VerificationStatus::Verified {
                0
            } else {
                u64::from(self.penalties.unverified)
            };

        let recency_deduction = u64::from(self.recency_penalty(inputs, now));

        let total = alert_deduction
            + status_deduction
            + verification_deduction
            + recency_deduction;
        let raw_score = i64::from(BASELINE_SCORE) - total as i64;
        let final_score = raw_score.clamp(0, i64::from(BASELINE_SCORE)) as u32;

        ScoreBreakdown {
            alert_deduction,
            status_deduction,
            verification_deduction,
            recency_deduction,
            raw_score,
            final_score,
        }
    }

    // Thresholds compare full-resolution durations: 24h01m is past the
    // 24h tier, while exactly 24h stays in the lower one.
    fn recency_penalty(&self, inputs: &ScoreInputs, now: DateTime<Utc>) -> u32 {
        let elapsed = inputs.elapsed_since_check_in(now);
        if elapsed > Duration::hours(self.recency.stale_hours) {
            self.penalties.stale
        } else if elapsed > Duration::hours(self.recency.late_hours) {
            self.penalties.late
        } else if elapsed > Duration::hours(self.recency.overdue_hours) {
            self.penalties.overdue
        } else {
            0
        }
    }

    /// Map a score to its category label.
    pub fn categorize(&self, score: u32) -> SafetyCategory {
        if score >= self.categories.safe {
            SafetyCategory::Safe
        } else if score >= self.categories.moderate {
            SafetyCategory::Moderate
        } else if score >= self.categories.at_risk {
            SafetyCategory::AtRisk
        } else {
            SafetyCategory::Critical
        }
    }

    pub fn score_entity(&self, entity: &Entity, now: DateTime<Utc>) -> ScoredEntity {
        let breakdown = self.breakdown(&entity.inputs, now);
        ScoredEntity {
            id: entity.id.clone(),
            name: entity.name.clone(),
            kind: entity.kind,
            score: breakdown.final_score,
            category: self.categorize(breakdown.final_score),
            breakdown,
        }
    }

    /// Score a batch and aggregate the category distribution.
    ///
    /// Entries are sorted ascending by score so the riskiest entities
    /// come first in every output format.
    pub fn build_report(&self, entities: &[Entity], now: DateTime<Utc>) -> ScoreReport {
        let mut scored: Vec<ScoredEntity> = entities
            .iter()
            .map(|entity| self.score_entity(entity, now))
            .collect();
        scored.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.id.cmp(&b.id)));

        let mut distribution = CategoryDistribution::default();
        for entry in &scored {
            distribution.tally(entry.category);
        }

        let average_score = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|e| f64::from(e.score)).sum::<f64>() / scored.len() as f64
        };

        ScoreReport {
            generated_at: Utc::now(),
            evaluated_at: now,
            average_score,
            distribution,
            entries: scored.into_iter().collect(),
        }
    }
}
