use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Point deductions applied by the score calculator.
///
/// The defaults mirror the deduction table the dashboard used across all of
/// its scoring call sites; they are deliberately configurable because the
/// table is a heuristic, not a calibrated risk model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPenalties {
    /// Points deducted per unresolved alert
    #[serde(default = "default_alert_penalty")]
    pub alert: u32,

    /// Deduction when the entity is in emergency status
    #[serde(default = "default_emergency_penalty")]
    pub emergency: u32,

    /// Deduction when the entity is inactive
    #[serde(default = "default_inactive_penalty")]
    pub inactive: u32,

    /// Deduction when identity verification has not completed
    #[serde(default = "default_unverified_penalty")]
    pub unverified: u32,

    /// Deduction past the stale check-in threshold
    #[serde(default = "default_stale_penalty")]
    pub stale: u32,

    /// Deduction past the late check-in threshold
    #[serde(default = "default_late_penalty")]
    pub late: u32,

    /// Deduction past the overdue check-in threshold
    #[serde(default = "default_overdue_penalty")]
    pub overdue: u32,
}

impl Default for ScoringPenalties {
    fn default() -> Self {
        Self {
            alert: default_alert_penalty(),
            emergency: default_emergency_penalty(),
            inactive: default_inactive_penalty(),
            unverified: default_unverified_penalty(),
            stale: default_stale_penalty(),
            late: default_late_penalty(),
            overdue: default_overdue_penalty(),
        }
    }
}

impl ScoringPenalties {
    fn validate_penalty(value: u32, name: &str) -> Result<(), String> {
        if value <= 100 {
            Ok(())
        } else {
            Err(format!("{} penalty must not exceed 100 points", name))
        }
    }

    /// Validate that every deduction stays within the score range.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            (self.alert, "alert"),
            (self.emergency, "emergency"),
            (self.inactive, "inactive"),
            (self.unverified, "unverified"),
            (self.stale, "stale"),
            (self.late, "late"),
            (self.overdue, "overdue"),
        ];
        for (value, name) in checks {
            Self::validate_penalty(value, name)?;
        }
        Ok(())
    }
}

fn default_alert_penalty() -> u32 {
    20
}
fn default_emergency_penalty() -> u32 {
    50
}
fn default_inactive_penalty() -> u32 {
    20
}
fn default_unverified_penalty() -> u32 {
    30
}
fn default_stale_penalty() -> u32 {
    30
}
fn default_late_penalty() -> u32 {
    15
}
fn default_overdue_penalty() -> u32 {
    5
}

/// Hour thresholds for the check-in recency tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyThresholds {
    /// Hours after which a check-in counts as stale
    #[serde(default = "default_stale_hours")]
    pub stale_hours: i64,

    /// Hours after which a check-in counts as late
    #[serde(default = "default_late_hours")]
    pub late_hours: i64,

    /// Hours after which a check-in counts as overdue
    #[serde(default = "default_overdue_hours")]
    pub overdue_hours: i64,
}

impl Default for RecencyThresholds {
    fn default() -> Self {
        Self {
            stale_hours: default_stale_hours(),
            late_hours: default_late_hours(),
            overdue_hours: default_overdue_hours(),
        }
    }
}

impl RecencyThresholds {
    /// The tiers must be strictly descending so each elapsed duration
    /// lands in exactly one bracket.
    pub fn validate(&self) -> Result<(), String> {
        if self.overdue_hours <= 0 {
            return Err("overdue_hours must be positive".to_string());
        }
        if self.stale_hours > self.late_hours && self.late_hours > self.overdue_hours {
            Ok(())
        } else {
            Err(format!(
                "recency thresholds must be strictly descending (stale > late > overdue), got {} / {} / {}",
                self.stale_hours, self.late_hours, self.overdue_hours
            ))
        }
    }
}

fn default_stale_hours() -> i64 {
    24
}
fn default_late_hours() -> i64 {
    12
}
fn default_overdue_hours() -> i64 {
    6
}

/// Score floors for the derived category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    /// Minimum score for the Safe label
    #[serde(default = "default_safe_floor")]
    pub safe: u32,

    /// Minimum score for the Moderate label
    #[serde(default = "default_moderate_floor")]
    pub moderate: u32,

    /// Minimum score for the AtRisk label; anything below is Critical
    #[serde(default = "default_at_risk_floor")]
    pub at_risk: u32,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            safe: default_safe_floor(),
            moderate: default_moderate_floor(),
            at_risk: default_at_risk_floor(),
        }
    }
}

impl CategoryThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.safe > 100 {
            return Err("safe floor must not exceed 100".to_string());
        }
        if self.safe > self.moderate && self.moderate > self.at_risk && self.at_risk > 0 {
            Ok(())
        } else {
            Err(format!(
                "category floors must be strictly descending (safe > moderate > at_risk > 0), got {} / {} / {}",
                self.safe, self.moderate, self.at_risk
            ))
        }
    }
}

fn default_safe_floor() -> u32 {
    80
}
fn default_moderate_floor() -> u32 {
    60
}
fn default_at_risk_floor() -> u32 {
    40
}

/// Settings for the `validate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Entities scoring below this floor fail validation
    #[serde(default = "default_min_score")]
    pub min_score: u32,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
        }
    }
}

fn default_min_score() -> u32 {
    40
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
}

/// Root configuration structure for safescore
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SafescoreConfig {
    /// Point deduction table
    #[serde(default)]
    pub penalties: Option<ScoringPenalties>,

    /// Check-in recency tier thresholds
    #[serde(default)]
    pub recency: Option<RecencyThresholds>,

    /// Category label floors
    #[serde(default)]
    pub categories: Option<CategoryThresholds>,

    /// Validation command settings
    #[serde(default)]
    pub validate: Option<ValidateConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl SafescoreConfig {
    /// Default output format name, if one was configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
    }
}

/// Cache the configuration
static CONFIG: OnceLock<SafescoreConfig> = OnceLock::new();

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a config from TOML, replacing invalid sections with defaults.
#[cfg(test)]
pub(crate) fn parse_and_validate_config(contents: &str) -> Result<SafescoreConfig, String> {
    parse_and_validate_config_impl(contents)
}

fn parse_and_validate_config_impl(contents: &str) -> Result<SafescoreConfig, String> {
    let mut config = toml::from_str::<SafescoreConfig>(contents)
        .map_err(|e| format!("Failed to parse .safescore.toml: {}", e))?;

    if let Some(ref penalties) = config.penalties {
        if let Err(e) = penalties.validate() {
            eprintln!("Warning: Invalid penalties: {}. Using defaults.", e);
            config.penalties = Some(ScoringPenalties::default());
        }
    }

    if let Some(ref recency) = config.recency {
        if let Err(e) = recency.validate() {
            eprintln!("Warning: Invalid recency thresholds: {}. Using defaults.", e);
            config.recency = Some(RecencyThresholds::default());
        }
    }

    if let Some(ref categories) = config.categories {
        if let Err(e) = categories.validate() {
            eprintln!("Warning: Invalid category floors: {}. Using defaults.", e);
            config.categories = Some(CategoryThresholds::default());
        }
    }

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<SafescoreConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config_impl(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

#[cfg(test)]
pub(crate) fn directory_ancestors(
    start: PathBuf,
    max_depth: usize,
) -> impl Iterator<Item = PathBuf> {
    directory_ancestors_impl(start, max_depth)
}

fn directory_ancestors_impl(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration from the nearest .safescore.toml, if any.
pub fn load_config() -> SafescoreConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return SafescoreConfig::default();
        }
    };

    directory_ancestors_impl(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".safescore.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SafescoreConfig::default()
        })
}

/// Get the cached configuration
pub fn get_config() -> &'static SafescoreConfig {
    CONFIG.get_or_init(load_config)
}

/// Load a config from an explicit path, failing loudly instead of
/// falling back (used by `validate --config`).
pub fn load_config_from(path: &Path) -> anyhow::Result<SafescoreConfig> {
    let contents = read_config_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    parse_and_validate_config_impl(&contents).map_err(|e| anyhow::anyhow!(e))
}
