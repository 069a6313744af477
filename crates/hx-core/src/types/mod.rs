//! Domain types for the hx host extension runtime.
//!
//! # Module Organization
//!
//! - `record` - Per-file metadata records and the unreadable sentinel
//! - `envelope` - The JSON response envelope returned by the lister
//! - `instance` - Caller-supplied instance identifiers
//! - `storage` - Platform storage states and logical directories
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use hx_core::{FileRecord, InstanceId, ResponseEnvelope, StorageState};
//! ```

mod envelope;
mod instance;
mod record;
mod storage;

pub use envelope::ResponseEnvelope;
pub use instance::InstanceId;
pub use record::{FileRecord, UNREADABLE};
pub use storage::{ParseStorageStateError, PublicDirectory, StorageState};
