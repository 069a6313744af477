//! The echo extension, used to exercise both calling conventions.

use hx_core::InstanceId;

use crate::extension::Extension;

/// Replies with the incoming message behind a convention-specific prefix.
///
/// # Examples
///
/// ```
/// use hx_core::InstanceId;
/// use hx_extensions::{Echo, Extension};
///
/// assert_eq!(Echo.on_sync_message(InstanceId::new(7), "hi"), "From java sync: hi");
/// assert_eq!(Echo.on_message(InstanceId::new(7), "hi"), "7: from java: hi");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Echo {
    /// Registered extension name.
    pub const NAME: &'static str = "echo";
}

impl Extension for Echo {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_sync_message(&self, _instance: InstanceId, message: &str) -> String {
        format!("From java sync: {message}")
    }

    fn on_message(&self, instance: InstanceId, message: &str) -> String {
        format!("{instance}: from java: {message}")
    }
}
