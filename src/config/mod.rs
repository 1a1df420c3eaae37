//! Configuration module for BlackBox
//!
//! This module handles:
//! - Scoring constants (blackbox.toml)
//! - The recency bonus schedule
//! - External function keys
//! - Whether external scoring is enabled

mod external;
mod scoring_config;

pub use external::{ExternalScoring, EXTERNAL_KEY_ENV, PLACEHOLDER_KEY};
pub use scoring_config::{
    load_scoring_config, load_scoring_config_from, CommentConfig, ConfigError, FunctionKeys,
    RecencyTier, ScoringConfig, WatercoolerConfig, CONFIG_FILE_NAME, DEFAULT_RECENCY_TIERS,
};
