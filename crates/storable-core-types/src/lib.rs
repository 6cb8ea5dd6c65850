//! Core types shared across the storable crates
//!
//! This crate provides foundational types used by the storage wrapper,
//! the error facility and the logging facility:
//!
//! - **Storage types**: `Nullable<T>` and the `StorageScope` of a store
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod types;

pub use types::{Nullable, StorageScope};
