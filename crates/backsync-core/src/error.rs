//! Error types for backsync-core

use thiserror::Error;

/// Result type alias using backsync-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by backup sources, fixtures and test utilities
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed version identifier text
    #[error("Invalid version identifier '{text}': {reason}")]
    Format { text: String, reason: String },

    /// Archive is missing its metadata entry or the entry cannot be parsed
    #[error("Corrupt archive: {message}")]
    CorruptArchive { message: String },

    /// Operation attempted while the backup source is disabled
    #[error("Backup source '{source_name}' is disabled")]
    DisabledSource { source_name: String },

    /// Save requested for a slug the source already holds
    #[error("Backup source '{source_name}' already holds a snapshot with slug '{slug}'")]
    DuplicateSlug { source_name: String, slug: String },

    /// Snapshot and source disagree about who owns what
    #[error("Inconsistent state for snapshot '{slug}' on source '{source_name}': {message}")]
    InconsistentState {
        source_name: String,
        slug: String,
        message: String,
    },

    /// Utility used before it was configured, or configuration could not be loaded
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),
}

impl Error {
    /// Create a version format error
    pub fn format(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Create a corrupt archive error
    pub fn corrupt_archive(message: impl Into<String>) -> Self {
        Self::CorruptArchive {
            message: message.into(),
        }
    }

    /// Create a disabled source error
    pub fn disabled_source(source_name: impl Into<String>) -> Self {
        Self::DisabledSource {
            source_name: source_name.into(),
        }
    }

    /// Create a duplicate slug error
    pub fn duplicate_slug(source_name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::DuplicateSlug {
            source_name: source_name.into(),
            slug: slug.into(),
        }
    }

    /// Create an inconsistent state error
    pub fn inconsistent_state(
        source_name: impl Into<String>,
        slug: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InconsistentState {
            source_name: source_name.into(),
            slug: slug.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = Error::duplicate_slug("google", "abc123");
        assert_eq!(
            err.to_string(),
            "Backup source 'google' already holds a snapshot with slug 'abc123'"
        );

        let err = Error::inconsistent_state("ha", "abc123", "no record for this source");
        assert!(err.to_string().contains("abc123"));
        assert!(err.to_string().contains("no record for this source"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
