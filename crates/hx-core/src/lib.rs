//! Core types, configuration, and errors for the hx host extension runtime.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - Error types for configuration loading and validation
//! - Configuration structures with serde defaults
//! - Domain types ([`FileRecord`], [`ResponseEnvelope`], [`InstanceId`],
//!   [`StorageState`], [`PublicDirectory`])
//! - The `FxHashMap` alias used for name-keyed lookups

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{Config, FormatterConfig, ScanConfig, StorageConfig};
pub use error::ConfigError;
pub use hash::{FxHashMap, fx_hash_map};
pub use types::{
    FileRecord, InstanceId, ParseStorageStateError, PublicDirectory, ResponseEnvelope,
    StorageState, UNREADABLE,
};
