//! Swapgate: subscription-gated admission control for a swap venue
//!
//! Callers buy a time-window subscription for a fixed price in a payment
//! asset. While it is unexpired they may route swaps through the gate to a
//! venue; once it lapses the gate fails closed. Collected fees sit in the
//! gate's custody account until the admin sweeps them.
//!
//! The crate follows a "pure core, imperative shell" layout:
//!
//! - [`core`]: expiry arithmetic, subscription status, guards, event journal
//! - [`gate`]: the [`SubscriptionGate`] state machine and its locking
//! - [`ledger`] and [`venue`]: the collaborators the gate calls out to
//! - [`config`] and [`builder`]: validated, immutable construction
//! - [`checkpoint`]: snapshot and restore
//! - [`effects`]: gate operations as composable async effects
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use swapgate::clock::{Clock, ManualClock};
//! use swapgate::core::AccountId;
//! use swapgate::ledger::{InMemoryLedger, Ledger};
//! use swapgate::venue::{RecordingVenue, SwapRequest};
//! use swapgate::{GateError, SubscriptionGate};
//! use chrono::TimeDelta;
//!
//! let clock = Arc::new(ManualClock::starting_now());
//! let ledger = Arc::new(InMemoryLedger::new());
//! let venue = Arc::new(RecordingVenue::new(clock.clone()));
//!
//! let gate = SubscriptionGate::builder()
//!     .payment_token("MTK")
//!     .gate_account("gate")
//!     .admin("deployer")
//!     .price(10)
//!     .duration_secs(30 * 24 * 60 * 60)
//!     .ledger(ledger.clone())
//!     .venue("router", venue.clone())
//!     .clock(clock.clone())
//!     .build()
//!     .unwrap();
//!
//! let alice = AccountId::from("alice");
//! ledger.mint(&alice, 1000).unwrap();
//! ledger.approve(&alice, &AccountId::from("gate"), 10);
//!
//! gate.subscribe(&alice).unwrap();
//! assert_eq!(ledger.balance_of(&alice), 990);
//!
//! let request = SwapRequest::exact_input("MTK", "USD", "alice", 5, clock.now() + TimeDelta::minutes(10));
//! assert!(gate.execute_gated_swap(&alice, &request).is_ok());
//!
//! let bob = AccountId::from("bob");
//! assert!(matches!(
//!     gate.execute_gated_swap(&bob, &request),
//!     Err(GateError::SubscriptionRequired { .. })
//! ));
//!
//! assert_eq!(gate.withdraw(&AccountId::from("deployer")).unwrap(), 10);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod clock;
pub mod config;
pub mod core;
pub mod effects;
pub mod gate;
pub mod ledger;
pub mod telemetry;
pub mod venue;

// Re-export commonly used types
pub use crate::core::{AccountId, Amount, Expiry, SubscriptionStatus};
pub use gate::{GateError, SubscriptionGate};
