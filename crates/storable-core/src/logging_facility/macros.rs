//! Operation logging macros for storage wrappers
//!
//! Every event names the store it touched: the scope is a required argument,
//! and durations are measured from the `Instant` the operation started at.
//! Callers must depend on `storable-core-types` for the event names.

/// Log the start of a storage operation
///
/// # Example
///
/// ```
/// # use storable_core::{log_op_start, StorageScope};
/// log_op_start!("clear", StorageScope::Local);
/// log_op_start!("set", StorageScope::Session, key = "draft");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, $scope:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = storable_core_types::schema::EVENT_START,
            scope = $crate::StorageScope::as_str(&$scope),
        );
    };
    ($op:expr, $scope:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = storable_core_types::schema::EVENT_START,
            scope = $crate::StorageScope::as_str(&$scope),
            $($field)*
        );
    };
}

/// Log the successful end of a storage operation
///
/// # Example
///
/// ```
/// # use storable_core::{log_op_end, StorageScope};
/// let started = std::time::Instant::now();
/// log_op_end!("pop", StorageScope::Session, started = started, key = "draft", removed = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $scope:expr, started = $started:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = storable_core_types::schema::EVENT_END,
            scope = $crate::StorageScope::as_str(&$scope),
            duration_ms = $crate::logging_facility::elapsed_ms(&$started),
        );
    };
    ($op:expr, $scope:expr, started = $started:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = storable_core_types::schema::EVENT_END,
            scope = $crate::StorageScope::as_str(&$scope),
            duration_ms = $crate::logging_facility::elapsed_ms(&$started),
            $($field)*
        );
    };
}

/// Log a failed storage operation
///
/// The error becomes an `ErrorReport` stamped with the store's scope; the
/// event carries the report's kind, code, scope and key.
///
/// # Example
///
/// ```
/// # use storable_core::{log_op_error, StorageScope};
/// # use storable_core::errors::{HostError, StorageError};
/// let started = std::time::Instant::now();
/// let err = StorageError::WriteRejected {
///     key: "draft".to_string(),
///     source: HostError::Disabled,
/// };
/// log_op_error!("set", StorageScope::Local, started = started, err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $scope:expr, started = $started:expr, $err:expr) => {{
        let report = $crate::errors::ErrorReport::from($err).with_scope($scope);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = storable_core_types::schema::EVENT_END_ERROR,
            scope = report.scope().map(|scope| scope.as_str()),
            key = report.key(),
            duration_ms = $crate::logging_facility::elapsed_ms(&$started),
            err.kind = ?report.kind(),
            err.code = report.code(),
        );
    }};
    ($op:expr, $scope:expr, started = $started:expr, $err:expr, $($field:tt)*) => {{
        let report = $crate::errors::ErrorReport::from($err).with_scope($scope);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = storable_core_types::schema::EVENT_END_ERROR,
            scope = report.scope().map(|scope| scope.as_str()),
            key = report.key(),
            duration_ms = $crate::logging_facility::elapsed_ms(&$started),
            err.kind = ?report.kind(),
            err.code = report.code(),
            $($field)*
        );
    }};
}
