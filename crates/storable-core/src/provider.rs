//! Explicit construction of the two named stores
//!
//! The application builds one `StorageProvider` at start-up, handing it the
//! two host primitives, and passes the wrappers to whatever needs them.

use crate::config::StorageConfig;
use crate::host::{HostStorage, MemoryStorage};
use crate::service::StorageService;
use std::sync::Arc;

/// Session-scoped store: entries last for the current session
pub type SessionStorage = StorageService;

/// Durable store: entries outlive the session
pub type LocalStorage = StorageService;

/// Holds the session and durable wrappers for the lifetime of the application
#[derive(Debug, Clone)]
pub struct StorageProvider {
    session: SessionStorage,
    local: LocalStorage,
}

impl StorageProvider {
    pub fn new(session_host: Arc<dyn HostStorage>, local_host: Arc<dyn HostStorage>) -> Self {
        Self {
            session: StorageService::session(session_host),
            local: StorageService::local(local_host),
        }
    }

    /// Build the session store in memory from `config` and bind the durable
    /// store to `local_host`
    pub fn from_config(config: &StorageConfig, local_host: Arc<dyn HostStorage>) -> Self {
        let session_host = Arc::new(MemoryStorage::with_quota(config.session_quota));
        Self::new(session_host, local_host)
    }

    /// Both stores in memory, e.g. for tests
    pub fn in_memory(config: &StorageConfig) -> Self {
        let local_host = Arc::new(MemoryStorage::with_quota(config.local_quota));
        Self::from_config(config, local_host)
    }

    pub fn session(&self) -> &SessionStorage {
        &self.session
    }

    pub fn local(&self) -> &LocalStorage {
        &self.local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storable::Storable;
    use storable_core_types::StorageScope;

    #[test]
    fn test_stores_are_independent() {
        let provider = StorageProvider::in_memory(&StorageConfig::default());

        assert!(provider.session().set("k", "session"));
        assert!(provider.local().set("k", "local"));

        assert_eq!(provider.session().scope(), StorageScope::Session);
        assert_eq!(provider.local().scope(), StorageScope::Local);
        assert_eq!(
            provider.session().get::<String>("k").unwrap().as_deref(),
            Some("session")
        );
        assert_eq!(
            provider.local().get::<String>("k").unwrap().as_deref(),
            Some("local")
        );
    }

    #[test]
    fn test_session_quota_from_config() {
        let config = StorageConfig {
            session_quota: Some(4),
            local_quota: None,
        };
        let provider = StorageProvider::in_memory(&config);

        assert!(!provider.session().set("key", "too long"));
        assert!(provider.local().set("key", "too long"));
    }
}
