//! Demo command
//!
//! Writes one item to each store, lists the keys, clears both stores and,
//! after a delay, pops a key from the session store.

use crate::commands::open_provider;
use crate::Settings;
use clap::Args;
use std::time::Duration;
use storable_core::Storable;

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Delay before the deferred pop, in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub delay_ms: u64,
}

pub fn execute(args: DemoArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let provider = open_provider(settings)?;
    let session = provider.session();
    let local = provider.local();

    session.set("somekey2", "somevalue");
    local.set("somekey1", "somevalue");
    println!("session keys: {}", serde_json::to_string(&session.keys())?);
    println!("local keys: {}", serde_json::to_string(&local.keys())?);

    session.clear();
    local.clear();

    std::thread::sleep(Duration::from_millis(args.delay_ms));
    let popped = session.pop("somekey");
    println!("session pop somekey: {}", popped);

    Ok(())
}
