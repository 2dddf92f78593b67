//! Error types for buildinfo
//!
//! All modules use `BuildInfoResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for buildinfo operations
pub type BuildInfoResult<T> = Result<T, BuildInfoError>;

/// All errors that can occur while producing or reading build info
#[derive(Error, Debug)]
pub enum BuildInfoError {
    // Parse errors
    #[error("failed to parse source identifier {input}: {reason}")]
    ParseIdentifier { input: String, reason: String },

    #[error("failed to parse {reference}: {reason}")]
    ParseReference { reference: String, reason: String },

    // Decode errors
    #[error("failed to decode {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base64 in {context}: {source}")]
    Base64 {
        context: String,
        #[source]
        source: base64::DecodeError,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl BuildInfoError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a JSON decode error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a base64 decode error with context
    pub fn base64(context: impl Into<String>, source: base64::DecodeError) -> Self {
        Self::Base64 {
            context: context.into(),
            source,
        }
    }

    /// Create an identifier parse error
    pub fn identifier(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseIdentifier {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a reference parse error
    pub fn reference(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Malformed identifier or reference string
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Self::ParseIdentifier { .. } | Self::ParseReference { .. }
        )
    }

    /// Malformed JSON or base64 at some decode boundary
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Json { .. } | Self::Base64 { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ParseIdentifier { .. } => {
                Some("Identifiers look like docker-image://<ref>, git://<remote>#<ref> or https://<url>")
            }
            Self::Base64 { .. } => Some("Embedded records use standard base64 with padding"),
            Self::ConfigInvalid { .. } => Some("Run: buildinfo config init --force"),
            _ => None,
        }
    }
}
