use std::env;
use std::time::Duration;

use serde::{Serialize, Deserialize};

use shared::constants::{
    CASE_REVEAL_DURATION, DEFAULT_UPGRADE_MULTIPLIER, STRIP_REPEAT_COUNT,
    UPGRADE_REVEAL_DURATION,
};
use shared::error::GameError;

/// House tuning for both mechanics.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Bonus factor applied on top of the raw price ratio.
    pub multiplier: f64,
    pub case_reveal: Duration,
    pub upgrade_reveal: Duration,
    /// How many times the pool is repeated in the case-opening strip.
    pub repeat_count: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_UPGRADE_MULTIPLIER,
            case_reveal: CASE_REVEAL_DURATION,
            upgrade_reveal: UPGRADE_REVEAL_DURATION,
            repeat_count: STRIP_REPEAT_COUNT,
        }
    }
}

impl EngineConfig {
    /// Loads overrides from the environment (and a `.env` file if present),
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Result<Self, GameError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Some(multiplier) = parse_var("UPGRADE_MULTIPLIER") {
            config.multiplier = multiplier;
        }
        if let Some(secs) = parse_var::<u64>("CASE_REVEAL_SECS") {
            config.case_reveal = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>("UPGRADE_REVEAL_SECS") {
            config.upgrade_reveal = Duration::from_secs(secs);
        }
        if let Some(count) = parse_var("STRIP_REPEAT_COUNT") {
            config.repeat_count = count;
        }

        config.validated()
    }

    /// Rejects non-positive tuning values before any mechanic runs with them.
    pub fn validated(self) -> Result<Self, GameError> {
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(GameError::InvalidMultiplier(self.multiplier));
        }
        if self.case_reveal.is_zero() || self.upgrade_reveal.is_zero() {
            return Err(GameError::InvalidDuration);
        }
        if self.repeat_count == 0 {
            return Err(GameError::InvalidRepeatCount(self.repeat_count));
        }
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring unparsable {}: {:?}", name, raw);
            None
        }
    }
}
