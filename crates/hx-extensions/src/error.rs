//! Error types for the hx-extensions crate.
//!
//! These cover wiring problems: looking up or registering extensions and
//! building them from configuration. Dispatch itself never fails; every
//! message produces a string reply.

use hx_core::ConfigError;

/// Errors raised while assembling or addressing extensions.
///
/// # Examples
///
/// ```
/// use hx_extensions::ExtensionError;
///
/// let err = ExtensionError::UnknownExtension("camera".to_owned());
/// assert_eq!(err.to_string(), "no extension registered as 'camera'");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    /// No extension is registered under the requested name.
    #[error("no extension registered as '{0}'")]
    UnknownExtension(String),

    /// An extension with the same name is already registered.
    #[error("an extension named '{0}' is already registered")]
    Duplicate(String),

    /// Configuration rejected while building an extension.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
