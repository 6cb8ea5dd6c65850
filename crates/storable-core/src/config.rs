//! Start-up configuration for the two stores

use crate::host::DEFAULT_QUOTA;

/// Capacity settings for the session and durable stores
///
/// A quota is measured in UTF-16 code units over all keys and values;
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    pub session_quota: Option<usize>,
    pub local_quota: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_quota: Some(DEFAULT_QUOTA),
            local_quota: Some(DEFAULT_QUOTA),
        }
    }
}

impl StorageConfig {
    /// Same quota for both stores
    pub fn with_quota(quota: Option<usize>) -> Self {
        Self {
            session_quota: quota,
            local_quota: quota,
        }
    }
}
