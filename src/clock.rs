//! Sources of "now" for expiry decisions.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Used to drive expiry deterministically in tests and simulations.
///
/// ```rust
/// use swapgate::clock::{Clock, ManualClock};
/// use chrono::TimeDelta;
///
/// let clock = ManualClock::starting_now();
/// let before = clock.now();
/// clock.advance(TimeDelta::days(30));
/// assert_eq!(clock.now() - before, TimeDelta::days(30));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    pub fn set(&self, moment: DateTime<Utc>) {
        *self.now.lock() = moment;
    }

    /// Move the clock by `by`, saturating at the representable bounds.
    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock();
        *now = now.checked_add_signed(by).unwrap_or(if by < TimeDelta::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
    }

    pub fn advance_secs(&self, secs: u64) {
        let delta = i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        self.advance(delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_holds_still() {
        let clock = ManualClock::starting_now();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn manual_clock_advances() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        clock.advance_secs(90);

        assert_eq!(clock.now() - start, TimeDelta::seconds(90));
    }

    #[test]
    fn manual_clock_saturates() {
        let clock = ManualClock::starting_now();
        clock.advance_secs(u64::MAX);
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
