//! Subscription expiry arithmetic.
//!
//! An [`Expiry`] is the moment a subscription stops granting admission. The
//! "never subscribed" case is an explicit variant rather than a missing map
//! entry, so the admission predicate is total.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Moment after which a subscriber is no longer admitted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Expiry(Option<DateTime<Utc>>);

impl Expiry {
    /// Expiry of an identity that has never subscribed.
    pub const NEVER: Expiry = Expiry(None);

    pub fn at(moment: DateTime<Utc>) -> Self {
        Self(Some(moment))
    }

    /// Expiry of a subscription bought at `now` for `duration_secs` seconds.
    ///
    /// Returns `None` when the result is not representable. Prior expiry
    /// values play no part: renewals never stack unused time.
    pub fn starting_at(now: DateTime<Utc>, duration_secs: u64) -> Option<Self> {
        let delta = duration_from_secs(duration_secs)?;
        now.checked_add_signed(delta).map(Self::at)
    }

    pub fn moment(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_never(&self) -> bool {
        self.0.is_none()
    }

    /// Admission predicate: `now < expiry`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.0, Some(expiry) if now < expiry)
    }

    /// Time left before expiry, zero once expired or never subscribed.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> TimeDelta {
        match self.0 {
            Some(expiry) if now < expiry => expiry - now,
            _ => TimeDelta::zero(),
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(moment) => write!(f, "{}", moment.to_rfc3339()),
            None => f.write_str("never"),
        }
    }
}

/// Convert whole seconds into a `TimeDelta`, if representable.
pub fn duration_from_secs(secs: u64) -> Option<TimeDelta> {
    i64::try_from(secs).ok().and_then(TimeDelta::try_seconds)
}
