use super::{SwapReceipt, SwapRequest, SwapVenue, VenueError};
use crate::clock::Clock;
use crate::core::AccountId;
use parking_lot::Mutex;
use std::sync::Arc;

/// In-process venue that fills every swap one-for-one and remembers what it
/// was asked to do.
///
/// Deadlines and output minimums are honoured so callers can exercise
/// venue-side failures.
pub struct RecordingVenue {
    clock: Arc<dyn Clock>,
    received: Mutex<Vec<(AccountId, SwapRequest)>>,
}

impl RecordingVenue {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Every `(trader, request)` pair received, in order.
    pub fn received(&self) -> Vec<(AccountId, SwapRequest)> {
        self.received.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().len()
    }
}

impl SwapVenue for RecordingVenue {
    fn swap(&self, trader: &AccountId, request: &SwapRequest) -> Result<SwapReceipt, VenueError> {
        self.received.lock().push((trader.clone(), request.clone()));

        let now = self.clock.now();
        if now > request.deadline {
            return Err(VenueError::DeadlineExpired {
                deadline: request.deadline,
            });
        }

        let amount_out = request.amount_in;
        if amount_out < request.amount_out_minimum {
            return Err(VenueError::InsufficientOutput {
                amount_out,
                minimum: request.amount_out_minimum,
            });
        }

        Ok(SwapReceipt {
            recipient: request.recipient.clone(),
            token_out: request.token_out.clone(),
            amount_in: request.amount_in,
            amount_out,
            executed_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeDelta;

    fn venue() -> (Arc<ManualClock>, RecordingVenue) {
        let clock = Arc::new(ManualClock::starting_now());
        let venue = RecordingVenue::new(clock.clone());
        (clock, venue)
    }

    #[test]
    fn fills_one_for_one() {
        let (clock, venue) = venue();
        let request = SwapRequest::exact_input(
            "tkn-a",
            "tkn-b",
            "alice",
            42,
            clock.now() + TimeDelta::minutes(10),
        );

        let receipt = venue.swap(&AccountId::from("alice"), &request).unwrap();

        assert_eq!(receipt.amount_out, 42);
        assert_eq!(receipt.recipient, AccountId::from("alice"));
        assert_eq!(venue.call_count(), 1);
    }

    #[test]
    fn rejects_past_deadline() {
        let (clock, venue) = venue();
        let request = SwapRequest::exact_input("a", "b", "alice", 1, clock.now());
        clock.advance_secs(1);

        let err = venue.swap(&AccountId::from("alice"), &request).unwrap_err();

        assert!(matches!(err, VenueError::DeadlineExpired { .. }));
    }

    #[test]
    fn enforces_minimum_output() {
        let (clock, venue) = venue();
        let request = SwapRequest::exact_input("a", "b", "alice", 5, clock.now())
            .with_minimum_out(6);

        let err = venue.swap(&AccountId::from("alice"), &request).unwrap_err();

        assert_eq!(
            err,
            VenueError::InsufficientOutput {
                amount_out: 5,
                minimum: 6
            }
        );
    }

    #[test]
    fn records_routing_unchanged() {
        let (clock, venue) = venue();
        let request = SwapRequest::exact_input("a", "b", "alice", 5, clock.now())
            .with_route("pool", "a-b-500");

        venue.swap(&AccountId::from("alice"), &request).unwrap();

        let received = venue.received();
        assert_eq!(received[0].1, request);
    }
}
