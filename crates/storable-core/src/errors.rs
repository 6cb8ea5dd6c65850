use storable_core_types::StorageScope;
use thiserror::Error;

/// Result type alias using StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that is recorded by the logging
/// macros and can be matched on by callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Read path
    Decode,

    // Write path
    Encode,
    QuotaExceeded,
    StorageDisabled,
    StorageUnavailable,

    // Durable backend
    Io,
    CorruptSnapshot,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Decode => "ERR_DECODE",
            ErrorKind::Encode => "ERR_ENCODE",
            ErrorKind::QuotaExceeded => "ERR_QUOTA_EXCEEDED",
            ErrorKind::StorageDisabled => "ERR_STORAGE_DISABLED",
            ErrorKind::StorageUnavailable => "ERR_STORAGE_UNAVAILABLE",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::CorruptSnapshot => "ERR_CORRUPT_SNAPSHOT",
        }
    }
}

/// Structured error record
///
/// Carries the classification of a failure together with the context needed
/// to diagnose it. Produced from a [`StorageError`] when a failure is logged.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    kind: ErrorKind,
    op: Option<String>,
    key: Option<String>,
    scope: Option<StorageScope>,
    message: String,
}

impl ErrorReport {
    /// Create a new report with the specified kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            scope: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the storage key involved
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add the scope of the store involved
    pub fn with_scope(mut self, scope: StorageScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn scope(&self) -> Option<StorageScope> {
        self.scope
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(scope) = self.scope {
            write!(f, " (scope: {})", scope)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

// ========== End Error Facility ==========

/// Failures reported by a host storage primitive
///
/// Only writes can fail at the host level; reads, removal and clearing are
/// infallible by contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The write would push the store past its capacity
    #[error("Storage quota exceeded: {required} units required, quota is {quota}")]
    QuotaExceeded { required: usize, quota: usize },

    /// Storage is switched off in this environment
    #[error("Storage is disabled")]
    Disabled,

    /// The backend could not persist the write
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Error taxonomy for storage operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The text stored under a key is not well-formed JSON, or does not fit
    /// the requested type
    #[error("Cannot parse the value stored with key '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// The value could not be serialized
    #[error("Cannot encode the value for key '{key}': {reason}")]
    Encode { key: String, reason: String },

    /// The host primitive refused the write
    #[error("Storage rejected the write for key '{key}': {source}")]
    WriteRejected {
        key: String,
        #[source]
        source: HostError,
    },

    /// Filesystem failure in a durable backend
    #[error("I/O failure during {op}: {reason}")]
    Io { op: String, reason: String },

    /// A durable snapshot exists but cannot be loaded
    #[error("Corrupt storage snapshot at {path}: {reason}")]
    CorruptSnapshot { path: String, reason: String },
}

impl StorageError {
    /// Create an I/O error for the named operation
    pub fn io(op: impl Into<String>, err: std::io::Error) -> Self {
        StorageError::Io {
            op: op.into(),
            reason: err.to_string(),
        }
    }

    /// The storage key involved in this failure, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            StorageError::Decode { key, .. }
            | StorageError::Encode { key, .. }
            | StorageError::WriteRejected { key, .. } => Some(key),
            StorageError::Io { .. } | StorageError::CorruptSnapshot { .. } => None,
        }
    }
}

impl From<HostError> for ErrorKind {
    fn from(err: HostError) -> Self {
        match err {
            HostError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            HostError::Disabled => ErrorKind::StorageDisabled,
            HostError::Unavailable { .. } => ErrorKind::StorageUnavailable,
        }
    }
}

impl From<StorageError> for ErrorReport {
    fn from(err: StorageError) -> Self {
        let message = err.to_string();
        match err {
            StorageError::Decode { key, .. } => ErrorReport::new(ErrorKind::Decode)
                .with_key(key)
                .with_op("decode")
                .with_message(message),

            StorageError::Encode { key, .. } => ErrorReport::new(ErrorKind::Encode)
                .with_key(key)
                .with_op("encode")
                .with_message(message),

            StorageError::WriteRejected { key, source } => ErrorReport::new(source.into())
                .with_key(key)
                .with_op("set_item")
                .with_message(message),

            StorageError::Io { op, .. } => ErrorReport::new(ErrorKind::Io)
                .with_op(op)
                .with_message(message),

            StorageError::CorruptSnapshot { .. } => {
                ErrorReport::new(ErrorKind::CorruptSnapshot)
                    .with_op("load_snapshot")
                    .with_message(message)
            }
        }
    }
}
