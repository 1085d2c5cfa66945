//! Order Processing
//!
//! This example walks orders through the lifecycle engine, one event at a time.
//!
//! Key concepts:
//! - The engine keeps no machine between calls; each event replays the stored state
//! - Accepted events are committed through a change notifier
//! - Rejected events leave the stored record untouched
//! - An auditing notifier keeps a trail of every commit attempt
//!
//! Run with: cargo run --example order_processing

use order_lifecycle::engine::{AuditingNotifier, EngineError, PersistingNotifier};
use order_lifecycle::{EngineBuilder, MemoryGateway, OrderEvent, OrderState, OrderTable};
use std::sync::Arc;

fn main() {
    println!("=== Order Processing Example ===\n");

    let gateway = Arc::new(MemoryGateway::<OrderState>::new());
    let engine = EngineBuilder::new(OrderTable)
        .gateway(Arc::clone(&gateway))
        .notifier(AuditingNotifier::new(PersistingNotifier::new(Arc::clone(
            &gateway,
        ))))
        .build()
        .unwrap();

    // Step 1: the happy path
    println!("Step 1: Happy path");
    let id = gateway.create_order().unwrap();
    println!("  Created order {} in {:?}", id, engine.current_state(&id).unwrap());

    let state = engine.process_payment(&id).unwrap();
    println!("  Payment processed -> {:?}", state);
    let state = engine.start_preparation(&id).unwrap();
    println!("  Preparation started -> {:?}", state);
    let state = engine.mark_ready_for_delivery(&id).unwrap();
    println!("  Ready for delivery -> {:?}", state);
    let state = engine.start_delivery(&id).unwrap();
    println!("  Delivery started -> {:?}", state);
    let state = engine.complete_delivery(&id).unwrap();
    println!("  Delivered -> {:?}", state);

    // Step 2: an event the current state does not accept
    println!("\nStep 2: Rejected event");
    let paid = gateway.create_order().unwrap();
    engine.process_payment(&paid).unwrap();
    let before = gateway.record(&paid).unwrap().unwrap();

    match engine.complete_delivery(&paid) {
        Err(error @ EngineError::InvalidTransition { .. }) => {
            println!("  Rejected: {}", error);
            println!("  Kind: {:?}", error.kind());
        }
        other => println!("  Unexpected outcome: {:?}", other),
    }
    let after = gateway.record(&paid).unwrap().unwrap();
    println!("  Record untouched: {}", before == after);

    // Step 3: cancellation and the terminal state
    println!("\nStep 3: Cancellation");
    let state = engine.cancel_order(&paid).unwrap();
    println!("  Cancelled -> {:?}", state);
    let accepted = engine.trigger_event(OrderEvent::Pay, &paid);
    println!("  Pay after cancel accepted: {}", accepted);

    // Step 4: the audit trail
    println!("\nStep 4: Audit trail");
    for entry in engine.notifier().entries() {
        println!(
            "  {} {} -> {} (committed: {})",
            entry.order_id,
            entry.from,
            entry.state,
            entry.committed()
        );
    }

    println!("\nKey Takeaways:");
    println!("- The stored state is the only source of truth between events");
    println!("- Each event rebuilds the machine by replaying the shortest path");
    println!("- Rejected events report the event and state, and write nothing");
    println!("- Notifiers decide how an accepted transition is committed");
}
