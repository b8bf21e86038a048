//! Subscription status and the `State` trait it implements.
//!
//! A subscriber is always in exactly one of two states. The status is never
//! stored: it is derived from the subscriber's [`Expiry`] and the current
//! time, so a subscription decays to `Inactive` without any write.

use super::expiry::Expiry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for states tracked by the gate.
///
/// All methods are pure. States are plain values that describe where an
/// identity sits in its lifecycle.
///
/// # Example
///
/// ```rust
/// use swapgate::core::{State, SubscriptionStatus};
///
/// assert_eq!(SubscriptionStatus::Active.name(), "Active");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;
}

/// Admission status of a single subscriber.
///
/// ```text
/// Inactive --subscribe--> Active --expiry passes--> Inactive --subscribe--> ...
/// ```
///
/// Neither status is terminal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    /// Never subscribed, or the last subscription has expired.
    #[default]
    Inactive,
    /// Holds an unexpired subscription.
    Active,
}

impl SubscriptionStatus {
    /// Derive the status of a subscriber from its expiry.
    pub fn at(expiry: &Expiry, now: DateTime<Utc>) -> Self {
        if expiry.is_active_at(now) {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl State for SubscriptionStatus {
    fn name(&self) -> &str {
        match self {
            Self::Inactive => "Inactive",
            Self::Active => "Active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn status_names_are_stable() {
        assert_eq!(SubscriptionStatus::Inactive.name(), "Inactive");
        assert_eq!(SubscriptionStatus::Active.name(), "Active");
    }

    #[test]
    fn status_follows_expiry() {
        let now = Utc::now();
        let expiry = Expiry::at(now + TimeDelta::seconds(10));

        assert_eq!(SubscriptionStatus::at(&expiry, now), SubscriptionStatus::Active);
        assert_eq!(
            SubscriptionStatus::at(&expiry, now + TimeDelta::seconds(10)),
            SubscriptionStatus::Inactive
        );
        assert_eq!(
            SubscriptionStatus::at(&Expiry::NEVER, now),
            SubscriptionStatus::Inactive
        );
    }

    #[test]
    fn default_status_is_inactive() {
        assert_eq!(SubscriptionStatus::default(), SubscriptionStatus::Inactive);
    }

    #[test]
    fn status_serializes_correctly() {
        let json = serde_json::to_string(&SubscriptionStatus::Active).unwrap();
        let back: SubscriptionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SubscriptionStatus::Active);
    }
}
