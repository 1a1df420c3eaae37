//! Scoring constants loaded from `blackbox.toml`
//!
//! Every field has a default, so an empty or missing file yields the
//! production schedule.
//!
//! # Configuration Format
//!
//! ```toml
//! # blackbox.toml
//!
//! [[recency]]
//! max_age_hours = 1
//! bonus = 28
//!
//! [[recency]]
//! max_age_hours = 8
//! bonus = 31
//!
//! [watercooler]
//! tag = "watercooler"
//! factor = 0.8
//!
//! [comment]
//! descendants_divisor = 2
//! code_marker = "```"
//! code_block_bonus = 2
//! min_length = 200
//! length_bonus = 1
//!
//! [functions]
//! article_hotness = "blackbox-production-articleHotness"
//! spam_score = "blackbox-production-spamScore"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// File looked up by [`load_scoring_config`]
pub const CONFIG_FILE_NAME: &str = "blackbox.toml";

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// One step of the recency schedule: articles younger than
/// `max_age_hours` earn `bonus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyTier {
    pub max_age_hours: i64,
    pub bonus: i64,
}

impl RecencyTier {
    pub const fn new(max_age_hours: i64, bonus: i64) -> Self {
        Self {
            max_age_hours,
            bonus,
        }
    }
}

/// Production recency schedule (sums to 1194 for a brand-new article)
pub const DEFAULT_RECENCY_TIERS: &[RecencyTier] = &[
    RecencyTier::new(1, 28),
    RecencyTier::new(8, 31),
    RecencyTier::new(12, 80),
    RecencyTier::new(26, 395),
    RecencyTier::new(48, 330),
    RecencyTier::new(96, 330),
];

/// Dampening applied to low-priority articles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatercoolerConfig {
    #[serde(default = "default_watercooler_tag")]
    pub tag: String,

    /// Fraction of reaction points kept (0.0 - 1.0, exclusive)
    #[serde(default = "default_watercooler_factor")]
    pub factor: f64,
}

impl Default for WatercoolerConfig {
    fn default() -> Self {
        Self {
            tag: default_watercooler_tag(),
            factor: default_watercooler_factor(),
        }
    }
}

fn default_watercooler_tag() -> String {
    "watercooler".to_string()
}
fn default_watercooler_factor() -> f64 {
    0.8
}

/// Comment quality bonuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentConfig {
    /// Replies needed per bonus point
    #[serde(default = "default_descendants_divisor")]
    pub descendants_divisor: u32,

    #[serde(default = "default_code_marker")]
    pub code_marker: String,

    #[serde(default = "default_code_block_bonus")]
    pub code_block_bonus: i64,

    /// Bodies longer than this many characters earn `length_bonus`
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default = "default_length_bonus")]
    pub length_bonus: i64,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            descendants_divisor: default_descendants_divisor(),
            code_marker: default_code_marker(),
            code_block_bonus: default_code_block_bonus(),
            min_length: default_min_length(),
            length_bonus: default_length_bonus(),
        }
    }
}

fn default_descendants_divisor() -> u32 {
    2
}
fn default_code_marker() -> String {
    "```".to_string()
}
fn default_code_block_bonus() -> i64 {
    2
}
fn default_min_length() -> usize {
    200
}
fn default_length_bonus() -> i64 {
    1
}

/// Keys passed to the external function invoker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionKeys {
    #[serde(default = "default_hotness_key")]
    pub article_hotness: String,

    #[serde(default = "default_spam_key")]
    pub spam_score: String,
}

impl Default for FunctionKeys {
    fn default() -> Self {
        Self {
            article_hotness: default_hotness_key(),
            spam_score: default_spam_key(),
        }
    }
}

fn default_hotness_key() -> String {
    "blackbox-production-articleHotness".to_string()
}
fn default_spam_key() -> String {
    "blackbox-production-spamScore".to_string()
}

/// All scoring constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_recency")]
    pub recency: Vec<RecencyTier>,

    #[serde(default)]
    pub watercooler: WatercoolerConfig,

    #[serde(default)]
    pub comment: CommentConfig,

    #[serde(default)]
    pub functions: FunctionKeys,
}

fn default_recency() -> Vec<RecencyTier> {
    DEFAULT_RECENCY_TIERS.to_vec()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recency: default_recency(),
            watercooler: WatercoolerConfig::default(),
            comment: CommentConfig::default(),
            functions: FunctionKeys::default(),
        }
    }
}

impl ScoringConfig {
    /// Check the invariants the scorer relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.watercooler.factor;
        if !(0.0..1.0).contains(&factor) {
            return Err(ConfigError::Invalid(format!(
                "watercooler.factor must be in [0, 1), got {factor}"
            )));
        }

        if self.comment.descendants_divisor == 0 {
            return Err(ConfigError::Invalid(
                "comment.descendants_divisor must be at least 1".to_string(),
            ));
        }

        let mut previous = 0;
        for tier in &self.recency {
            if tier.max_age_hours <= previous {
                return Err(ConfigError::Invalid(format!(
                    "recency tiers must have increasing positive max_age_hours (got {} after {})",
                    tier.max_age_hours, previous
                )));
            }
            previous = tier.max_age_hours;
        }

        if self.functions.article_hotness.trim().is_empty()
            || self.functions.spam_score.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "function keys must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Bonus earned by an article of the given age in hours
    pub fn recency_bonus_for_age(&self, age_hours: f64) -> i64 {
        self.recency
            .iter()
            .filter(|tier| age_hours < tier.max_age_hours as f64)
            .fold(0i64, |total, tier| total.saturating_add(tier.bonus))
    }

    /// Example config written by `blackbox init`
    pub fn example_toml() -> &'static str {
        r#"# BlackBox scoring configuration
# Every value below is the built-in default; delete what you don't change.

# Articles younger than max_age_hours earn bonus. Tiers stack.
[[recency]]
max_age_hours = 1
bonus = 28

[[recency]]
max_age_hours = 8
bonus = 31

[[recency]]
max_age_hours = 12
bonus = 80

[[recency]]
max_age_hours = 26
bonus = 395

[[recency]]
max_age_hours = 48
bonus = 330

[[recency]]
max_age_hours = 96
bonus = 330

[watercooler]
tag = "watercooler"
# Fraction of reaction points kept for tagged articles
factor = 0.8

[comment]
descendants_divisor = 2
code_marker = "```"
code_block_bonus = 2
min_length = 200
length_bonus = 1

[functions]
article_hotness = "blackbox-production-articleHotness"
spam_score = "blackbox-production-spamScore"
"#
    }
}

/// Load `blackbox.toml` from a directory.
///
/// Returns default configuration if the file is missing, unreadable or
/// invalid; problems are logged rather than returned.
pub fn load_scoring_config(dir: &Path) -> ScoringConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("No {} found in {}, using defaults", CONFIG_FILE_NAME, dir.display());
        return ScoringConfig::default();
    }

    match load_scoring_config_from(&path) {
        Ok(config) => {
            debug!("Loaded scoring config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            ScoringConfig::default()
        }
    }
}

/// Load and validate a specific config file
pub fn load_scoring_config_from(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: ScoringConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}
