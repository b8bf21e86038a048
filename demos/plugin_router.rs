//! Plugin Router
//!
//! This example shows the other integration direction: a router owns the
//! venue and consults the gate as an admission hook before each swap.
//!
//! Run with: cargo run --example plugin_router

use chrono::TimeDelta;
use std::sync::Arc;
use swapgate::clock::{Clock, ManualClock};
use swapgate::core::AccountId;
use swapgate::ledger::InMemoryLedger;
use swapgate::telemetry;
use swapgate::venue::{PluggedRouter, RecordingVenue, SwapRequest};
use swapgate::SubscriptionGate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("info")?;

    println!("=== Plugin Router Example ===\n");

    let clock = Arc::new(ManualClock::starting_now());
    let ledger = Arc::new(InMemoryLedger::new());
    let venue = Arc::new(RecordingVenue::new(clock.clone()));

    let gate = Arc::new(
        SubscriptionGate::builder()
            .payment_token("MTK")
            .gate_account("gate")
            .admin("deployer")
            .price(5)
            .duration_secs(3600)
            .plugin_mode()
            .ledger(ledger.clone())
            .clock(clock.clone())
            .build()?,
    );

    let router = PluggedRouter::new(venue.clone());
    let trader = AccountId::from("carol");
    let request = SwapRequest::exact_input("MTK", "USD", "carol", 7, clock.now() + TimeDelta::minutes(5));

    println!("Without a plugin the router forwards everything");
    router.swap_exact_input_single(&trader, &request)?;
    println!("  venue calls: {}\n", venue.call_count());

    router.set_plugin(gate.clone());
    println!("With the gate installed (plugin: {})", router.has_plugin());
    match router.swap_exact_input_single(&trader, &request) {
        Ok(_) => println!("  unexpectedly admitted"),
        Err(e) => println!("  refused: {}", e),
    }

    ledger.mint(&trader, 5)?;
    ledger.approve(&trader, &AccountId::from("gate"), 5);
    gate.subscribe(&trader)?;
    let receipt = router.swap_exact_input_single(&trader, &request)?;
    println!("  after subscribing: received {}", receipt.amount_out);
    println!("  venue calls: {}", venue.call_count());

    Ok(())
}
