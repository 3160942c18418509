//! Engine configuration.

use serde::Deserialize;

/// How a game is found from an owner key and game id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Scan the owner's game list for the id.
    OwnerScoped,
    /// Look the id up globally, then check it belongs to the owner.
    #[default]
    GlobalChecked,
}

/// Store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed for the opponent's RNG; entropy when unset
    pub opponent_seed: Option<u64>,

    pub lookup: LookupPolicy,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EngineConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.opponent_seed = Some(seed);
        self
    }

    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }
}
