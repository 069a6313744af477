//! The date/time formatting extension.
//!
//! Turns an epoch timestamp in milliseconds into `yyyy-MM-dd HH:mm:ss`
//! text at a fixed offset.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use hx_core::{ConfigError, FormatterConfig, InstanceId};
use tracing::debug;

use crate::error::ExtensionError;
use crate::extension::Extension;

/// `strftime` pattern used for every rendered timestamp.
pub const PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Reasons a message cannot be formatted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The message is not a base-10 signed 64-bit integer.
    #[error("For input string: \"{input}\"")]
    InvalidNumber {
        /// The rejected message.
        input: String,
    },

    /// The timestamp parses but falls outside the representable calendar.
    #[error("timestamp {millis} is out of range")]
    OutOfRange {
        /// The rejected timestamp.
        millis: i64,
    },
}

/// Formats epoch-millisecond timestamps.
///
/// # Examples
///
/// ```
/// use hx_extensions::DateTimeFormatter;
///
/// let formatter = DateTimeFormatter::utc();
/// assert_eq!(formatter.format("86400000").unwrap(), "1970-01-02 00:00:00");
/// assert!(formatter.format("soon").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeFormatter {
    offset: FixedOffset,
}

impl Default for DateTimeFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl DateTimeFormatter {
    /// Registered extension name.
    pub const NAME: &'static str = "dateTimeFormatter";

    /// Formatter rendering in UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Formatter rendering at `secs` east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Config`] if the offset is a day or more.
    pub fn with_offset_secs(secs: i32) -> Result<Self, ExtensionError> {
        let offset = FixedOffset::east_opt(secs).ok_or_else(|| {
            ConfigError::invalid_option(
                "formatter.utc_offset_secs",
                format!("{secs} is not a valid UTC offset"),
            )
        })?;
        Ok(Self { offset })
    }

    /// Builds a formatter from configuration.
    ///
    /// # Errors
    ///
    /// See [`DateTimeFormatter::with_offset_secs`].
    pub fn from_config(config: &FormatterConfig) -> Result<Self, ExtensionError> {
        Self::with_offset_secs(config.utc_offset_secs)
    }

    /// Offset timestamps are rendered at.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Parses `message` as epoch milliseconds and renders it.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidNumber`] if `message` is not a base-10
    /// `i64`, or [`FormatError::OutOfRange`] if the instant can't be
    /// represented.
    pub fn format(&self, message: &str) -> Result<String, FormatError> {
        let millis: i64 = message.parse().map_err(|_| FormatError::InvalidNumber {
            input: message.to_owned(),
        })?;
        let instant =
            DateTime::from_timestamp_millis(millis).ok_or(FormatError::OutOfRange { millis })?;
        Ok(instant.with_timezone(&self.offset).format(PATTERN).to_string())
    }
}

impl Extension for DateTimeFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_sync_message(&self, instance: InstanceId, message: &str) -> String {
        self.format(message).unwrap_or_else(|err| {
            debug!(instance = %instance, error = %err, "Timestamp not formattable");
            err.to_string()
        })
    }
}
