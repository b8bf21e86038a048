//! Pure core of the gate.
//!
//! This module holds the side-effect free pieces:
//! - Account identities and amounts
//! - Expiry arithmetic and the admission predicate
//! - `SubscriptionStatus` and the `State` trait
//! - Guard predicates
//! - The event journal
//!
//! Nothing here touches a ledger, a venue or a clock.

mod account;
mod expiry;
mod guard;
mod history;
mod state;

pub use account::{AccountId, Amount};
pub use expiry::{duration_from_secs, Expiry};
pub use guard::Guard;
pub use history::{EventLog, GateEvent, RecordedEvent};
pub use state::{State, SubscriptionStatus};
