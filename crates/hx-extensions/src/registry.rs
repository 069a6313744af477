//! Name-addressed collection of extensions sharing one sink.

use std::fmt;
use std::sync::Arc;

use hx_core::{Config, FxHashMap, fx_hash_map};
use tracing::debug;

use crate::audio::AudioFileLister;
use crate::datetime::DateTimeFormatter;
use crate::echo::Echo;
use crate::error::ExtensionError;
use crate::extension::{Extension, ExtensionEndpoint};
use crate::host::{StorageRootResolver, probe_from_config};
use crate::sink::MessageSink;

/// Extensions keyed by their registered name.
///
/// Build it once, then share it (typically behind an `Arc`); lookups take
/// `&self`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use hx_core::{Config, InstanceId};
/// use hx_extensions::{ExtensionRegistry, RecordingSink};
///
/// let sink = Arc::new(RecordingSink::new());
/// let registry = ExtensionRegistry::with_defaults(&Config::default(), sink.clone())?;
///
/// let echo = registry.endpoint("echo")?;
/// echo.send(InstanceId::new(7), "hi");
/// assert_eq!(sink.take()[0].message, "7: from java: hi");
/// # Ok::<(), hx_extensions::ExtensionError>(())
/// ```
pub struct ExtensionRegistry {
    extensions: FxHashMap<String, Arc<dyn Extension>>,
    sink: Arc<dyn MessageSink>,
}

impl ExtensionRegistry {
    /// Creates an empty registry whose endpoints post to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self {
            extensions: fx_hash_map(),
            sink,
        }
    }

    /// Creates a registry holding the echo, date/time formatter and audio
    /// lister extensions, configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Config`] if the configuration is invalid.
    pub fn with_defaults(
        config: &Config,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self, ExtensionError> {
        config.validate()?;

        let mut registry = Self::new(sink);
        registry.register(Arc::new(Echo))?;
        registry.register(Arc::new(DateTimeFormatter::from_config(&config.formatter)?))?;
        registry.register(Arc::new(AudioFileLister::new(
            probe_from_config(&config.storage),
            Box::new(StorageRootResolver::from_config(&config.storage)),
            config.scan.clone(),
        )))?;
        Ok(registry)
    }

    /// Adds `extension` under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Duplicate`] if the name is taken.
    pub fn register(&mut self, extension: Arc<dyn Extension>) -> Result<(), ExtensionError> {
        let name = extension.name().to_owned();
        if self.extensions.contains_key(&name) {
            return Err(ExtensionError::Duplicate(name));
        }
        debug!(extension = %name, "Registered extension");
        self.extensions.insert(name, extension);
        Ok(())
    }

    /// Returns the endpoint for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::UnknownExtension`] if nothing is registered
    /// under `name`.
    pub fn endpoint(&self, name: &str) -> Result<ExtensionEndpoint, ExtensionError> {
        self.extensions
            .get(name)
            .map(|ext| ExtensionEndpoint::new(Arc::clone(ext), Arc::clone(&self.sink)))
            .ok_or_else(|| ExtensionError::UnknownExtension(name.to_owned()))
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &self.names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use hx_core::InstanceId;

    fn registry() -> ExtensionRegistry {
        let sink = Arc::new(RecordingSink::new());
        ExtensionRegistry::with_defaults(&Config::default(), sink).unwrap()
    }

    #[test]
    fn test_defaults_registered() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.names(),
            ["audioFileLister", "dateTimeFormatter", "echo"]
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = registry();
        let err = registry.register(Arc::new(Echo)).unwrap_err();
        assert!(matches!(err, ExtensionError::Duplicate(name) if name == "echo"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_unknown_name() {
        let err = registry().endpoint("camera").unwrap_err();
        assert!(matches!(err, ExtensionError::UnknownExtension(name) if name == "camera"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(registry().endpoint("Echo").is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.formatter.utc_offset_secs = 100_000;
        let result = ExtensionRegistry::with_defaults(&config, Arc::new(RecordingSink::new()));
        assert!(matches!(result, Err(ExtensionError::Config(_))));
    }

    #[test]
    fn test_endpoint_dispatches() {
        let registry = registry();
        let formatter = registry.endpoint("dateTimeFormatter").unwrap();
        assert_eq!(formatter.name(), "dateTimeFormatter");
        assert_eq!(formatter.request(InstanceId::new(1), "0"), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_empty_registry() {
        let registry = ExtensionRegistry::new(Arc::new(RecordingSink::new()));
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }
}
