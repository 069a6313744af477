//! Out-of-band delivery for fire-and-forget messages.
//!
//! [`ExtensionEndpoint::send`](crate::ExtensionEndpoint::send) hands its
//! reply to a [`MessageSink`] keyed by the caller's instance id. Hosts pick
//! the sink that suits their event loop:
//!
//! - [`ChannelSink`] - tokio unbounded channel, for async hosts
//! - [`RecordingSink`] - mutex-guarded buffer, for hosts that poll
//! - any `Fn(InstanceId, String)` closure

use hx_core::InstanceId;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

/// A reply delivered through a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// Instance the reply belongs to.
    pub instance: InstanceId,
    /// Reply text.
    pub message: String,
}

/// Destination for fire-and-forget replies.
///
/// `post` must not block; delivery failures are the sink's concern and are
/// never reported back to the extension.
pub trait MessageSink: Send + Sync {
    /// Delivers `message` to the caller identified by `instance`.
    fn post(&self, instance: InstanceId, message: String);
}

impl<F> MessageSink for F
where
    F: Fn(InstanceId, String) + Send + Sync,
{
    fn post(&self, instance: InstanceId, message: String) {
        self(instance, message);
    }
}

/// Sink backed by a tokio unbounded channel.
///
/// Sending never blocks, so it is safe to post from both async tasks and
/// blocking threads.
///
/// # Examples
///
/// ```
/// use hx_core::InstanceId;
/// use hx_extensions::{ChannelSink, MessageSink};
///
/// let (sink, mut rx) = ChannelSink::channel();
/// sink.post(InstanceId::new(1), "hello".to_owned());
///
/// let posted = rx.try_recv().unwrap();
/// assert_eq!(posted.message, "hello");
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<PostedMessage>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its messages arrive on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PostedMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MessageSink for ChannelSink {
    fn post(&self, instance: InstanceId, message: String) {
        if self.tx.send(PostedMessage { instance, message }).is_err() {
            debug!(instance = %instance, "Receiver dropped, discarding reply");
        }
    }
}

/// Sink that buffers replies until the host drains them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    posted: Mutex<Vec<PostedMessage>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything posted so far, oldest first.
    pub fn take(&self) -> Vec<PostedMessage> {
        std::mem::take(&mut *self.posted.lock())
    }

    /// Number of buffered replies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posted.lock().len()
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posted.lock().is_empty()
    }
}

impl MessageSink for RecordingSink {
    fn post(&self, instance: InstanceId, message: String) {
        self.posted.lock().push(PostedMessage { instance, message });
    }
}
