//! Gated Swap
//!
//! This example walks one subscriber through the delegated integration:
//! the gate holds the venue and forwards swaps for active subscribers.
//!
//! Key concepts:
//! - Building a gate from a JSON configuration
//! - Paying for a time-window subscription
//! - Admission failing closed once the window lapses
//! - Sweeping collected fees to the admin
//!
//! Run with: cargo run --example gated_swap
//! Set SWAPGATE_LOG=debug to see the gate's own tracing output.

use chrono::TimeDelta;
use std::sync::Arc;
use swapgate::builder::GateBuilder;
use swapgate::clock::{Clock, ManualClock};
use swapgate::config::GateConfig;
use swapgate::core::AccountId;
use swapgate::ledger::{InMemoryLedger, Ledger};
use swapgate::telemetry;
use swapgate::venue::{RecordingVenue, SwapRequest};

const CONFIG: &str = r#"{
    "payment_token": "MTK",
    "gate_account": "gate",
    "admin": "deployer",
    "price": 10,
    "duration_secs": 2592000,
    "venue": "router"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("info")?;

    println!("=== Gated Swap Example ===\n");

    let clock = Arc::new(ManualClock::starting_now());
    let ledger = Arc::new(InMemoryLedger::new());
    let venue = Arc::new(RecordingVenue::new(clock.clone()));

    let config = GateConfig::from_json_str(CONFIG)?;
    let gate = GateBuilder::from_config(config)
        .ledger(ledger.clone())
        .attach_venue(venue.clone())
        .clock(clock.clone())
        .build()?;

    let alice = AccountId::from("alice");
    ledger.mint(&alice, 1000)?;
    ledger.approve(&alice, &AccountId::from("gate"), 10);

    println!("1. Alice subscribes");
    let expiry = gate.subscribe(&alice)?;
    println!("   Expires: {}", expiry);
    println!("   Alice balance: {}", ledger.balance_of(&alice));
    println!("   Custody: {}\n", gate.custody_balance());

    println!("2. Alice swaps through the gate");
    let request = SwapRequest::exact_input("MTK", "USD", "alice", 25, clock.now() + TimeDelta::minutes(5));
    let receipt = gate.execute_gated_swap(&alice, &request)?;
    println!("   Received {} {}\n", receipt.amount_out, receipt.token_out);

    println!("3. Bob tries without a subscription");
    let bob = AccountId::from("bob");
    match gate.execute_gated_swap(&bob, &request) {
        Ok(_) => println!("   Unexpectedly admitted"),
        Err(e) => println!("   Refused: {}\n", e),
    }

    println!("4. Thirty days pass");
    clock.advance(TimeDelta::days(30));
    println!("   Alice active: {}", gate.is_active(&alice));
    let request = SwapRequest::exact_input("MTK", "USD", "alice", 25, clock.now() + TimeDelta::minutes(5));
    if let Err(e) = gate.execute_gated_swap(&alice, &request) {
        println!("   Refused: {}\n", e);
    }

    println!("5. Admin sweeps custody");
    let swept = gate.withdraw(&AccountId::from("deployer"))?;
    println!("   Withdrawn: {}", swept);
    println!("   Venue calls: {}", venue.call_count());

    println!("\n=== Event Journal ===");
    for entry in gate.events().entries() {
        println!("  {} {:?}", entry.timestamp, entry.event);
    }

    Ok(())
}
