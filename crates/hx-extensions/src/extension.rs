//! The extension interface and the endpoint callers talk to.
//!
//! An [`Extension`] maps one incoming message to one reply string. The
//! [`ExtensionEndpoint`] wraps it with the two calling conventions a host
//! offers scripts:
//!
//! ```text
//! send(instance, msg)    ──► on_message      ──► MessageSink::post(instance, reply)
//! request(instance, msg) ──► on_sync_message ──► reply returned inline
//! ```
//!
//! `on_message` defaults to `on_sync_message`, so both conventions share
//! the same dispatch unless an extension deliberately overrides one.

use std::fmt;
use std::sync::Arc;

use hx_core::InstanceId;
use tracing::debug;

use crate::sink::MessageSink;

/// A native-side handler for string messages.
///
/// Implementations hold no per-call state and must be callable from many
/// threads at once.
///
/// # Examples
///
/// ```
/// use hx_core::InstanceId;
/// use hx_extensions::Extension;
///
/// struct Upper;
///
/// impl Extension for Upper {
///     fn name(&self) -> &str {
///         "upper"
///     }
///
///     fn on_sync_message(&self, _instance: InstanceId, message: &str) -> String {
///         message.to_uppercase()
///     }
/// }
///
/// let ext = Upper;
/// assert_eq!(ext.on_message(InstanceId::new(1), "hi"), "HI");
/// ```
pub trait Extension: Send + Sync {
    /// Name the host registers this extension under.
    fn name(&self) -> &str;

    /// Computes the reply for a request/response call.
    fn on_sync_message(&self, instance: InstanceId, message: &str) -> String;

    /// Computes the reply for a fire-and-forget call.
    fn on_message(&self, instance: InstanceId, message: &str) -> String {
        self.on_sync_message(instance, message)
    }
}

/// The boundary object handed to the host for one extension.
///
/// Cheap to clone; clones share the extension and the sink.
#[derive(Clone)]
pub struct ExtensionEndpoint {
    extension: Arc<dyn Extension>,
    sink: Arc<dyn MessageSink>,
}

impl ExtensionEndpoint {
    /// Pairs an extension with the sink that receives its `send` replies.
    #[must_use]
    pub fn new(extension: Arc<dyn Extension>, sink: Arc<dyn MessageSink>) -> Self {
        Self { extension, sink }
    }

    /// Name of the wrapped extension.
    #[must_use]
    pub fn name(&self) -> &str {
        self.extension.name()
    }

    /// Fire-and-forget: the reply is posted to the sink under `instance`.
    pub fn send(&self, instance: InstanceId, message: &str) {
        debug!(extension = self.name(), instance = %instance, "send");
        let reply = self.extension.on_message(instance, message);
        self.sink.post(instance, reply);
    }

    /// Request/response: the reply is returned inline.
    #[must_use]
    pub fn request(&self, instance: InstanceId, message: &str) -> String {
        debug!(extension = self.name(), instance = %instance, "request");
        self.extension.on_sync_message(instance, message)
    }
}

impl fmt::Debug for ExtensionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionEndpoint")
            .field("extension", &self.extension.name())
            .finish_non_exhaustive()
    }
}
