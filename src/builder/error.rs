//! Build errors for the gate builder.

use crate::config::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when building a gate.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Payment token not specified. Call .payment_token(id) before .build()")]
    MissingPaymentToken,

    #[error("Gate custody account not specified. Call .gate_account(id)")]
    MissingGateAccount,

    #[error("Admin not specified. Call .admin(id)")]
    MissingAdmin,

    #[error("Price not specified. Call .price(amount)")]
    MissingPrice,

    #[error("Duration not specified. Call .duration_secs(secs)")]
    MissingDuration,

    #[error("Ledger not specified. Call .ledger(ledger)")]
    MissingLedger,

    #[error("Delegated mode needs a venue. Call .venue(id, venue) or .plugin_mode()")]
    MissingVenue,

    #[error("Invalid configuration: {}", describe(.0))]
    InvalidConfig(Vec<ConfigViolation>),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
