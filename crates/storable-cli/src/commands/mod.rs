pub mod demo;
pub mod item;

use crate::Settings;
use std::sync::Arc;
use storable_core::StorageProvider;
use storable_store::FileStorage;

/// Build both stores, binding the durable one to the configured file
pub fn open_provider(settings: &Settings) -> Result<StorageProvider, Box<dyn std::error::Error>> {
    let local_host = FileStorage::open(&settings.store_path, settings.config.local_quota)?;
    Ok(StorageProvider::from_config(
        &settings.config,
        Arc::new(local_host),
    ))
}
