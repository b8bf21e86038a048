//! Gate operations as composable effects.
//!
//! This module is the imperative shell for callers that build async
//! workflows with Stillwater. Each function returns `impl Effect` over a
//! [`GateEnv`]; nothing happens until the effect is run against an
//! environment.
//!
//! ```rust
//! use std::sync::Arc;
//! use swapgate::core::AccountId;
//! use swapgate::effects::{self, GateEnv};
//! use swapgate::ledger::InMemoryLedger;
//! use swapgate::SubscriptionGate;
//!
//! let gate = SubscriptionGate::builder()
//!     .payment_token("MTK")
//!     .gate_account("gate")
//!     .admin("deployer")
//!     .price(0)
//!     .duration_secs(60)
//!     .plugin_mode()
//!     .ledger(Arc::new(InMemoryLedger::new()))
//!     .build()
//!     .unwrap();
//!
//! let env = GateEnv::new(Arc::new(gate));
//! let workflow = effects::ensure_subscribed(AccountId::from("alice"));
//! // run with: workflow.run(&env).await
//! # drop((env, workflow));
//! ```

use crate::core::{AccountId, Amount, Expiry};
use crate::gate::{GateError, SubscriptionGate};
use crate::venue::{SwapReceipt, SwapRequest};
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// Environment the gate effects run against.
#[derive(Clone)]
pub struct GateEnv {
    gate: Arc<SubscriptionGate>,
}

impl GateEnv {
    pub fn new(gate: Arc<SubscriptionGate>) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &SubscriptionGate {
        &self.gate
    }
}

pub fn is_active(
    account: AccountId,
) -> impl Effect<Output = bool, Error = GateError, Env = GateEnv> {
    from_fn(move |env: &GateEnv| Ok::<_, GateError>(env.gate.is_active(&account)))
}

pub fn subscribe(
    caller: AccountId,
) -> impl Effect<Output = Expiry, Error = GateError, Env = GateEnv> {
    from_fn(move |env: &GateEnv| env.gate.subscribe(&caller))
}

pub fn gated_swap(
    caller: AccountId,
    request: SwapRequest,
) -> impl Effect<Output = SwapReceipt, Error = GateError, Env = GateEnv> {
    from_fn(move |env: &GateEnv| env.gate.execute_gated_swap(&caller, &request))
}

pub fn withdraw(caller: AccountId) -> impl Effect<Output = Amount, Error = GateError, Env = GateEnv> {
    from_fn(move |env: &GateEnv| env.gate.withdraw(&caller))
}

/// Subscribe only if `caller` is not already active, returning the expiry
/// in force afterwards.
pub fn ensure_subscribed(
    caller: AccountId,
) -> impl Effect<Output = Expiry, Error = GateError, Env = GateEnv> {
    from_fn(move |env: &GateEnv| {
        if env.gate.is_active(&caller) {
            Ok(env.gate.subscription_expiry(&caller))
        } else {
            env.gate.subscribe(&caller)
        }
    })
}

/// Make sure `caller` holds a subscription, then run the gated swap.
pub fn subscribe_and_swap(
    caller: AccountId,
    request: SwapRequest,
) -> impl Effect<Output = SwapReceipt, Error = GateError, Env = GateEnv> {
    let swapper = caller.clone();
    ensure_subscribed(caller).and_then(move |_| gated_swap(swapper, request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::ledger::{InMemoryLedger, Ledger};
    use crate::venue::RecordingVenue;
    use chrono::TimeDelta;

    fn env() -> (Arc<ManualClock>, Arc<InMemoryLedger>, GateEnv) {
        let clock = Arc::new(ManualClock::starting_now());
        let ledger = Arc::new(InMemoryLedger::new());
        let venue = Arc::new(RecordingVenue::new(clock.clone()));
        let gate = SubscriptionGate::builder()
            .payment_token("MTK")
            .gate_account("gate")
            .admin("deployer")
            .price(10)
            .duration_secs(3600)
            .ledger(ledger.clone())
            .venue("router", venue)
            .clock(clock.clone())
            .build()
            .unwrap();

        let alice = AccountId::from("alice");
        ledger.mint(&alice, 100).unwrap();
        ledger.approve(&alice, &AccountId::from("gate"), 100);

        (clock, ledger, GateEnv::new(Arc::new(gate)))
    }

    fn request(clock: &ManualClock) -> SwapRequest {
        SwapRequest::exact_input("MTK", "USD", "alice", 5, clock.now() + TimeDelta::minutes(5))
    }

    #[tokio::test]
    async fn subscribe_effect_activates() {
        let (_clock, ledger, env) = env();
        let alice = AccountId::from("alice");

        subscribe(alice.clone()).run(&env).await.unwrap();

        assert!(is_active(alice.clone()).run(&env).await.unwrap());
        assert_eq!(ledger.balance_of(&alice), 90);
    }

    #[tokio::test]
    async fn gated_swap_effect_denies_inactive() {
        let (clock, _ledger, env) = env();

        let result = gated_swap(AccountId::from("bob"), request(&clock))
            .run(&env)
            .await;

        assert!(matches!(result, Err(GateError::SubscriptionRequired { .. })));
    }

    #[tokio::test]
    async fn subscribe_and_swap_charges_once() {
        let (clock, ledger, env) = env();
        let alice = AccountId::from("alice");

        subscribe_and_swap(alice.clone(), request(&clock))
            .run(&env)
            .await
            .unwrap();
        subscribe_and_swap(alice.clone(), request(&clock))
            .run(&env)
            .await
            .unwrap();

        assert_eq!(ledger.balance_of(&alice), 90);
        assert_eq!(env.gate().events().total_collected(), 10);
    }

    #[tokio::test]
    async fn withdraw_effect_requires_admin() {
        let (_clock, _ledger, env) = env();
        subscribe(AccountId::from("alice")).run(&env).await.unwrap();

        let denied = withdraw(AccountId::from("alice")).run(&env).await;
        let swept = withdraw(AccountId::from("deployer")).run(&env).await;

        assert!(matches!(denied, Err(GateError::Unauthorized { .. })));
        assert_eq!(swept.unwrap(), 10);
    }
}
