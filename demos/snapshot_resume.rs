//! Snapshot and Resume
//!
//! This example captures an in-memory store, restores it into a fresh
//! process-like setup, and keeps processing the same orders.
//!
//! Key concepts:
//! - Snapshots copy every record, timestamps included
//! - Serialization formats (JSON for readability, binary for compactness)
//! - A new engine resumes from stored states alone, with no machine to carry over
//!
//! Run with: cargo run --example snapshot_resume

use order_lifecycle::engine::EngineConfig;
use order_lifecycle::persistence::StoreSnapshot;
use order_lifecycle::{MemoryGateway, OrderEngine, OrderState, OrderTable, Orchestrator};
use std::sync::Arc;

fn engine_over(gateway: &Arc<MemoryGateway<OrderState>>) -> OrderEngine<MemoryGateway<OrderState>> {
    Orchestrator::persisting(OrderTable, Arc::clone(gateway), EngineConfig::default()).unwrap()
}

fn main() {
    println!("=== Snapshot and Resume Example ===\n");

    // Phase 1: process some orders part of the way
    println!("Phase 1: Initial processing");
    let gateway = Arc::new(MemoryGateway::new());
    let engine = engine_over(&gateway);

    let fresh = gateway.create_order().unwrap();
    let preparing = gateway.create_order().unwrap();
    let shipping = gateway.create_order().unwrap();

    engine.process_payment(&preparing).unwrap();
    engine.start_preparation(&preparing).unwrap();

    engine.process_payment(&shipping).unwrap();
    engine.start_preparation(&shipping).unwrap();
    engine.mark_ready_for_delivery(&shipping).unwrap();
    engine.start_delivery(&shipping).unwrap();

    for id in [&fresh, &preparing, &shipping] {
        println!("  {} -> {:?}", id, engine.current_state(id).unwrap());
    }

    // Phase 2: take a snapshot and serialize it both ways
    println!("\nPhase 2: Snapshot");
    let snapshot = gateway.snapshot().unwrap();
    let json = snapshot.to_json().unwrap();
    let binary = snapshot.to_binary().unwrap();
    println!("  Snapshot {} with {} records", snapshot.id, snapshot.records.len());
    println!("  JSON size: {} bytes", json.len());
    println!("  Binary size: {} bytes", binary.len());

    // Simulate a restart
    drop(engine);
    drop(gateway);
    println!("\n  [Process stopped]");

    // Phase 3: restore into a fresh store and engine
    println!("\nPhase 3: Restore");
    let restored = StoreSnapshot::<OrderState>::from_binary(&binary).unwrap();
    let gateway = Arc::new(MemoryGateway::new());
    gateway.restore(restored).unwrap();
    let engine = engine_over(&gateway);
    println!("  Restored {} records", gateway.len());

    // Phase 4: keep going from the restored states
    println!("\nPhase 4: Resume");
    let state = engine.cancel_order(&fresh).unwrap();
    println!("  {} cancelled -> {:?}", fresh, state);

    let state = engine.mark_ready_for_delivery(&preparing).unwrap();
    println!("  {} ready -> {:?}", preparing, state);

    let state = engine.complete_delivery(&shipping).unwrap();
    println!("  {} delivered -> {:?}", shipping, state);

    let from_json = StoreSnapshot::<OrderState>::from_json(&json).unwrap();
    println!(
        "\n  JSON copy still holds the pre-restart states: {}",
        from_json
            .records
            .iter()
            .all(|(id, record)| *id != shipping || record.state == OrderState::InDelivery)
    );

    println!("\nKey Takeaways:");
    println!("- A snapshot is enough to rebuild the whole store");
    println!("- The engine needs nothing but stored states to resume");
    println!("- JSON snapshots are readable, binary snapshots are smaller");
    println!("- Records restored from a snapshot keep their timestamps");
}
