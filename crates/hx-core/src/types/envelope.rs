//! The response envelope returned by listing extensions.
//!
//! On the wire an envelope is a JSON object with a `success` flag and
//! exactly one of `files` or `error`:
//!
//! ```text
//! {"success":true,"files":[{"uri":"file:///m/a.mp3","title":"A","artist":"B"}]}
//! {"success":false,"error":"invalid command specified"}
//! ```
//!
//! The Rust side models this as a two-variant enum so a value carrying
//! both fields (or neither) cannot be constructed.

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::record::FileRecord;

/// Result of a listing command.
///
/// # Examples
///
/// ```
/// use hx_core::ResponseEnvelope;
///
/// let envelope = ResponseEnvelope::invalid_command();
/// assert!(!envelope.is_success());
/// assert_eq!(
///     envelope.to_json(),
///     r#"{"success":false,"error":"invalid command specified"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEnvelope {
    /// The command ran and produced a (possibly empty) file list.
    Success {
        /// Records for every matching file.
        files: Vec<FileRecord>,
    },

    /// The command could not run.
    Failure {
        /// Human-readable reason.
        error: String,
    },
}

impl ResponseEnvelope {
    /// Error text used when the storage medium cannot be read.
    pub const NOT_READABLE: &'static str = "audio directory not readable";

    /// Error text used for any command outside the dispatcher's vocabulary.
    pub const INVALID_COMMAND: &'static str = "invalid command specified";

    /// Creates a success envelope.
    #[inline]
    #[must_use]
    pub const fn success(files: Vec<FileRecord>) -> Self {
        Self::Success { files }
    }

    /// Creates a failure envelope with the given message.
    #[inline]
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// The envelope returned when the audio directory cannot be read.
    #[must_use]
    pub fn not_readable() -> Self {
        Self::failure(Self::NOT_READABLE)
    }

    /// The envelope returned for an unrecognized command.
    #[must_use]
    pub fn invalid_command() -> Self {
        Self::failure(Self::INVALID_COMMAND)
    }

    /// Returns `true` for [`Success`](Self::Success).
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the file list of a success envelope.
    #[must_use]
    pub fn files(&self) -> Option<&[FileRecord]> {
        match self {
            Self::Success { files } => Some(files),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the error text of a failure envelope.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Serializes the envelope to compact JSON.
    ///
    /// Serialization of these types cannot fail in practice; should it ever,
    /// a failure envelope describing the problem is returned instead so the
    /// caller always receives well-formed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"failed to serialize response"}"#.to_owned()
        })
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResponseEnvelope", 2)?;
        match self {
            Self::Success { files } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("files", files)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// Flat wire shape used only while deserializing.
#[derive(Deserialize)]
struct WireEnvelope {
    success: bool,
    #[serde(default)]
    files: Option<Vec<FileRecord>>,
    #[serde(default)]
    error: Option<String>,
}

impl<'de> Deserialize<'de> for ResponseEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireEnvelope::deserialize(deserializer)?;
        match (wire.success, wire.files, wire.error) {
            (true, Some(files), None) => Ok(Self::Success { files }),
            (false, None, Some(error)) => Ok(Self::Failure { error }),
            (true, _, _) => Err(D::Error::custom(
                "success envelope must carry `files` and no `error`",
            )),
            (false, _, _) => Err(D::Error::custom(
                "failure envelope must carry `error` and no `files`",
            )),
        }
    }
}
