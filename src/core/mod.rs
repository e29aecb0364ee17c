use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of a scoreable entity. Mutually exclusive,
/// assigned by the upstream system that owns the entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Active,
    Inactive,
    Emergency,
    CheckedOut,
}

/// Tri-state indicator of whether an identity/document check completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

/// The two record families the safety system scores.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Tourist,
    Zone,
}

/// The four status signals the score is derived from.
///
/// Reconstructed per call by whatever layer owns the entity; the
/// calculator never stores or mutates these.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub status: EntityStatus,
    pub verification_status: VerificationStatus,
    pub active_alert_count: u32,
    pub last_check_in: DateTime<Utc>,
}

impl ScoreInputs {
    /// Time elapsed since the last check-in, floored at zero.
    /// Kept as a full-resolution duration so threshold comparisons see
    /// partial hours. Future-dated check-ins count as "just checked in".
    pub fn elapsed_since_check_in(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.last_check_in)
            .max(Duration::zero())
    }
}

/// A batch record as read from an entity file: identity plus the
/// score inputs, flattened so input files stay one level deep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    #[serde(flatten)]
    pub inputs: ScoreInputs,
}
