//! Gate configuration.
//!
//! A [`GateConfig`] is fixed when the gate is built and never changes
//! afterwards. It can be written by hand or loaded from JSON:
//!
//! ```rust
//! use swapgate::config::{GateConfig, IntegrationMode};
//!
//! let config = GateConfig::from_json_str(r#"{
//!     "payment_token": "MTK",
//!     "gate_account": "gate",
//!     "admin": "deployer",
//!     "price": 10,
//!     "duration_secs": 2592000,
//!     "venue": "router"
//! }"#).unwrap();
//!
//! assert_eq!(config.integration, IntegrationMode::Delegated);
//! assert!(config.validate().is_success());
//! ```

mod validation;

pub use validation::ConfigViolation;

use crate::core::{AccountId, Amount};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Which side drives the swap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMode {
    /// Traders call the gate, which forwards admitted swaps to its venue.
    #[default]
    Delegated,
    /// Traders call a router, which asks the gate before each swap.
    Plugin,
}

/// Immutable gate configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Asset the subscription fee is paid in.
    pub payment_token: AccountId,
    /// Ledger account holding the gate's custody balance.
    pub gate_account: AccountId,
    /// Only identity allowed to withdraw.
    pub admin: AccountId,
    /// Exact fee pulled per subscription.
    pub price: Amount,
    /// Subscription length in seconds.
    pub duration_secs: u64,
    /// Venue identity, required in delegated mode.
    #[serde(default)]
    pub venue: Option<AccountId>,
    #[serde(default)]
    pub integration: IntegrationMode,
    /// Newest events kept in the journal; `None` keeps everything.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: Option<usize>,
}

/// Journal entries retained when a config does not say otherwise.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 10_000;

fn default_journal_capacity() -> Option<usize> {
    Some(DEFAULT_JOURNAL_CAPACITY)
}

/// Errors loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GateConfig {
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Legal but degenerate settings worth a warning.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.price == 0 {
            warnings.push("price is zero: subscriptions are free".to_string());
        }
        if self.duration_secs == 0 {
            warnings.push("duration is zero: subscriptions expire immediately".to_string());
        }
        if self.integration == IntegrationMode::Plugin && self.venue.is_some() {
            warnings.push("venue is ignored in plugin mode".to_string());
        }
        if self.journal_capacity.is_none() {
            warnings.push("event journal is unbounded".to_string());
        }
        warnings
    }
}
