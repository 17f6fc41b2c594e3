//! # Example: toaster_network
//!
//! A small kitchen: two smart toasters and one classic toaster on one network,
//! with every event forwarded to `tracing` through [`LogWriter`].
//!
//! Demonstrates how to:
//! - Build a [`ToasterNetwork`] with subscribers.
//! - Register devices (smart toasters start automatically).
//! - Enqueue jobs, hit both recoverable failures, and keep the worker alive.
//! - Remove a device and shut everything down cleanly.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► ToasterNetwork::builder(cfg).with_subscribers([LogWriter]).build()
//!   ├─► registry.add_device(kitchen), add_device(office), add_device(vintage)
//!   ├─► kitchen: 3 jobs, the last one fails with NoBread → refill → retry
//!   ├─► office: LAZY mood, one long job
//!   ├─► vintage: make_toast() inline
//!   ├─► registry.remove_device("office")
//!   └─► net.shutdown()
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=toastnet=debug cargo run --example toaster_network
//! ```

use std::{sync::Arc, time::Duration};

use toastnet::{
    Communicable, DeviceConfig, LogWriter, Mood, NetworkConfig, Operable, Recipe, Subscribe,
    ToasterNetwork,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toastnet=info")),
        )
        .init();

    // 1) Short steps keep the demo snappy; the kitchen starts with two slices.
    let cfg = NetworkConfig {
        bus_capacity: 256,
        device: DeviceConfig {
            step_duration: Duration::from_millis(100),
            poll_interval: Duration::from_millis(250),
            initial_bread: 2,
            seed: Some(2024),
            ..DeviceConfig::default()
        },
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let net = ToasterNetwork::builder(cfg).with_subscribers(subs).build();
    let mut events = net.subscribe();

    // 2) Devices
    let kitchen = net.smart_toaster("kitchen");
    let office = net.smart_toaster("office");
    let vintage = net.classic_toaster("vintage");
    for dev in [&kitchen, &office] {
        dev.power_on();
    }
    vintage.power_on();

    let registry = net.registry();
    registry.add_device(Arc::clone(&kitchen)).await?;
    registry.add_device(Arc::clone(&office)).await?;
    registry.add_device(Arc::clone(&vintage)).await?;

    // 3) Kitchen: the third job runs out of bread.
    kitchen.enqueue(Recipe::new("Sourdough", 6, 3));
    kitchen.enqueue(Recipe::new("Bagel", 4, 2));
    kitchen.enqueue(Recipe::new("Brioche", 12, 2));
    kitchen.send_message("breakfast is up");

    // 4) Office: slow mood, one long job.
    office.set_mood(Mood::Lazy);
    office.enqueue(Recipe::new("Rye", 5, 4));
    office.receive_message("two slices please");

    // 5) Vintage toasts inline on this task.
    vintage.make_toast(&Recipe::new("White", 3, 2)).await?;

    // 6) Wait for the kitchen's failure, then fix it.
    loop {
        let ev = events.recv().await?;
        if ev.is_failure() && ev.device.as_deref() == Some("kitchen") {
            break;
        }
    }
    kitchen.refill_bread(3);
    kitchen.enqueue(Recipe::new("Brioche", 12, 2));
    tokio::time::sleep(Duration::from_secs(1)).await;

    // 7) Snapshot every device.
    for line in registry.statuses().await {
        println!("{line}");
    }

    // 8) Remove one device, then tear everything down.
    registry.remove_device("office").await?;
    println!("remaining: {:?}", registry.list().await);

    net.shutdown().await;
    Ok(())
}
