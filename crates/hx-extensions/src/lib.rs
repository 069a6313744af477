//! Native extensions reachable from a hybrid web runtime.
//!
//! Script code talks to an extension by name through an
//! [`ExtensionEndpoint`], using one of two calling conventions:
//!
//! - **request**: the reply string is returned inline
//! - **send**: the reply is posted later to a [`MessageSink`], tagged with
//!   the caller's [`InstanceId`](hx_core::InstanceId)
//!
//! Three extensions ship with the crate:
//!
//! | Name                | Type                  | Input                  | Reply                      |
//! |---------------------|-----------------------|------------------------|----------------------------|
//! | `audioFileLister`   | [`AudioFileLister`]   | `list-files`           | JSON response envelope     |
//! | `dateTimeFormatter` | [`DateTimeFormatter`] | epoch milliseconds     | `yyyy-MM-dd HH:mm:ss`      |
//! | `echo`              | [`Echo`]              | anything               | the message, prefixed      |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hx_core::{Config, InstanceId};
//! use hx_extensions::{ChannelSink, ExtensionRegistry};
//!
//! let (sink, mut posted) = ChannelSink::channel();
//! let registry = ExtensionRegistry::with_defaults(&Config::default(), Arc::new(sink))?;
//!
//! let formatter = registry.endpoint("dateTimeFormatter")?;
//! assert_eq!(formatter.request(InstanceId::new(1), "0"), "1970-01-01 00:00:00");
//!
//! registry.endpoint("echo")?.send(InstanceId::new(2), "ping");
//! assert_eq!(posted.try_recv().unwrap().message, "2: from java: ping");
//! # Ok::<(), hx_extensions::ExtensionError>(())
//! ```
//!
//! Host facilities (mount state, directory layout) reach extensions through
//! the traits in [`host`], so the same extensions run under a mobile shell,
//! the `hx-host` CLI, or a test harness.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod audio;
mod datetime;
mod echo;
mod error;
mod extension;
pub mod host;
mod registry;
mod sink;

pub use audio::{AudioFileLister, ListerCommand};
pub use datetime::{DateTimeFormatter, FormatError, PATTERN};
pub use echo::Echo;
pub use error::ExtensionError;
pub use extension::{Extension, ExtensionEndpoint};
pub use host::{
    DirectoryResolver, FixedStorage, FsStorageProbe, StorageProbe, StorageRootResolver,
    probe_from_config,
};
pub use registry::ExtensionRegistry;
pub use sink::{ChannelSink, MessageSink, PostedMessage, RecordingSink};
