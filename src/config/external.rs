//! External scoring availability
//!
//! The external function service is only called when a real credential is
//! configured. Deployments without one ship a placeholder value instead, so
//! both "unset" and "placeholder" mean disabled.

use tracing::debug;

/// Environment variable holding the function-service credential
pub const EXTERNAL_KEY_ENV: &str = "AWS_SDK_KEY";

/// Sentinel credential meaning "not really configured"
pub const PLACEHOLDER_KEY: &str = "foobarbaz";

/// Resolved once at startup and handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExternalScoring {
    Enabled,
    #[default]
    Disabled,
}

impl ExternalScoring {
    /// Classify a raw credential value
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(PLACEHOLDER_KEY) => ExternalScoring::Disabled,
            Some(_) => ExternalScoring::Enabled,
        }
    }

    /// Read `AWS_SDK_KEY` from the process environment
    pub fn from_env() -> Self {
        let value = std::env::var(EXTERNAL_KEY_ENV).ok();
        let resolved = Self::from_value(value.as_deref());
        debug!("{} resolved external scoring to {:?}", EXTERNAL_KEY_ENV, resolved);
        resolved
    }

    pub fn is_enabled(self) -> bool {
        self == ExternalScoring::Enabled
    }
}

impl From<bool> for ExternalScoring {
    fn from(enabled: bool) -> Self {
        if enabled {
            ExternalScoring::Enabled
        } else {
            ExternalScoring::Disabled
        }
    }
}
