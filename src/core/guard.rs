//! Guard predicates over states.
//!
//! The gate's admission check is a guard: a pure boolean function of a
//! subscriber's status, evaluated before any gated call is allowed through.

use super::state::{State, SubscriptionStatus};
use std::fmt;
use std::sync::Arc;

/// Pure predicate deciding whether an operation may proceed from a state.
///
/// # Example
///
/// ```rust
/// use swapgate::core::{Guard, SubscriptionStatus};
///
/// let admission = Guard::admission();
///
/// assert!(admission.check(&SubscriptionStatus::Active));
/// assert!(!admission.check(&SubscriptionStatus::Inactive));
/// ```
pub struct Guard<S: State> {
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl Guard<SubscriptionStatus> {
    /// The admission guard: only active subscribers pass.
    pub fn admission() -> Self {
        Guard::new(SubscriptionStatus::is_active)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_only_passes_active() {
        let guard = Guard::admission();

        assert!(guard.check(&SubscriptionStatus::Active));
        assert!(!guard.check(&SubscriptionStatus::Inactive));
    }

    #[test]
    fn custom_guard_can_invert() {
        let guard = Guard::new(|s: &SubscriptionStatus| !s.is_active());

        assert!(guard.check(&SubscriptionStatus::Inactive));
        assert!(!guard.check(&SubscriptionStatus::Active));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::admission();
        let cloned = guard.clone();

        assert_eq!(
            guard.check(&SubscriptionStatus::Active),
            cloned.check(&SubscriptionStatus::Active)
        );
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::admission();
        let status = SubscriptionStatus::Active;

        assert_eq!(guard.check(&status), guard.check(&status));
    }
}
