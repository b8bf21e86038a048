//! Configuration checks that report every violation at once.
//!
//! Each rule yields a `Validation`; the results are accumulated with
//! `Validation::all_vec` so a bad config lists all of its problems in one
//! pass instead of failing on the first.

use super::{GateConfig, IntegrationMode};
use crate::core::{duration_from_secs, AccountId};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Field '{field}' must not be blank")]
    BlankIdentity { field: &'static str },

    #[error("Admin '{admin}' must differ from the gate custody account")]
    AdminIsGate { admin: AccountId },

    #[error("Duration of {duration_secs}s is not representable")]
    DurationOutOfRange { duration_secs: u64 },

    #[error("Delegated mode requires a venue")]
    MissingVenue,

    #[error("Journal capacity must be at least one entry")]
    EmptyJournal,
}

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn require_identity(field: &'static str, id: &AccountId) -> Check {
    if id.is_blank() {
        Validation::fail(ConfigViolation::BlankIdentity { field })
    } else {
        Validation::success(())
    }
}

fn require_distinct_admin(config: &GateConfig) -> Check {
    if config.admin == config.gate_account {
        Validation::fail(ConfigViolation::AdminIsGate {
            admin: config.admin.clone(),
        })
    } else {
        Validation::success(())
    }
}

fn require_representable_duration(config: &GateConfig) -> Check {
    match duration_from_secs(config.duration_secs) {
        Some(_) => Validation::success(()),
        None => Validation::fail(ConfigViolation::DurationOutOfRange {
            duration_secs: config.duration_secs,
        }),
    }
}

fn require_venue_when_delegated(config: &GateConfig) -> Check {
    match (&config.integration, &config.venue) {
        (IntegrationMode::Delegated, None) => Validation::fail(ConfigViolation::MissingVenue),
        (IntegrationMode::Delegated, Some(venue)) => require_identity("venue", venue),
        (IntegrationMode::Plugin, _) => Validation::success(()),
    }
}

fn require_journal_room(config: &GateConfig) -> Check {
    match config.journal_capacity {
        Some(0) => Validation::fail(ConfigViolation::EmptyJournal),
        _ => Validation::success(()),
    }
}

impl GateConfig {
    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Check {
        let checks = vec![
            require_identity("payment_token", &self.payment_token),
            require_identity("gate_account", &self.gate_account),
            require_identity("admin", &self.admin),
            require_distinct_admin(self),
            require_representable_duration(self),
            require_venue_when_delegated(self),
            require_journal_room(self),
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}
