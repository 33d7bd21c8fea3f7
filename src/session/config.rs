//! Session configuration.
//!
//! Only presentation concerns are configurable here. The game rules are
//! fixed constants in `core::config`.

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`SessionConfig::ai_delay_ms`].
pub const ENV_AI_DELAY_MS: &str = "DICE_DUEL_AI_DELAY_MS";

/// Environment variable overriding [`SessionConfig::seed`].
pub const ENV_SEED: &str = "DICE_DUEL_SEED";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {source}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        source: ParseIntError,
    },
}

/// Session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause before the AI's turn resolves, in milliseconds (default: 1000).
    pub ai_delay_ms: u64,

    /// Seed for the dice. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Commit the player's score automatically after the third roll
    /// (default: true).
    pub auto_keep_on_last_roll: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ai_delay_ms: 1000,
            seed: None,
            auto_keep_on_last_roll: true,
        }
    }
}

impl SessionConfig {
    /// Default config with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup (normally the environment).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_AI_DELAY_MS) {
            self.ai_delay_ms = parse_env(ENV_AI_DELAY_MS, value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = Some(parse_env(ENV_SEED, value)?);
        }
        Ok(self)
    }

    /// Create a new config with a custom AI delay.
    pub fn with_ai_delay_ms(mut self, ms: u64) -> Self {
        self.ai_delay_ms = ms;
        self
    }

    /// Create a new config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with auto-keep switched on or off.
    pub fn with_auto_keep(mut self, enabled: bool) -> Self {
        self.auto_keep_on_last_roll = enabled;
        self
    }

    /// The AI delay as a `Duration`.
    #[must_use]
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

fn parse_env<T: std::str::FromStr<Err = ParseIntError>>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidEnv { name, value, source })
}
