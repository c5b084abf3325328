//! Error types for ecowatch.

use std::path::PathBuf;

/// Result type alias for ecowatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for ecowatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Data directory could not be determined.
    #[error("could not determine data directory for this platform; set paths.base_dir")]
    DataDirNotFound,

    /// Explicitly requested configuration file does not exist.
    #[error("config file does not exist: {path}")]
    ConfigNotFound {
        /// Path to the missing config file.
        path: PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value violates an invariant.
    #[error("invalid value for '{field}': {message}")]
    ConfigValidation {
        /// Dotted name of the offending field.
        field: String,
        /// Description of the validation failure.
        message: String,
    },

    /// Configuration file already exists.
    #[error("config file already exists: {path}")]
    ConfigExists {
        /// Path to the existing config file.
        path: PathBuf,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration as TOML.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to serialize configuration as JSON.
    #[error("failed to serialize config as JSON")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A layout path exists but is not a directory.
    #[error("path exists but is not a directory: {path}")]
    DirectoryObstructed {
        /// Obstructed path.
        path: PathBuf,
    },

    /// A layout directory exists but this process cannot write to it.
    #[error("directory is not writable: {path}")]
    DirectoryNotWritable {
        /// Directory that rejected a test write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a layout directory.
    #[error("failed to create directory '{path}'")]
    DirectoryCreate {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to open the log file.
    #[error("failed to open log file '{path}'")]
    LogFileOpen {
        /// Path to the log file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to install the global tracing subscriber.
    #[error("failed to initialize logging: {reason}")]
    LoggingInit {
        /// Description of the failure.
        reason: String,
    },
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required file or directory is missing, obstructed or inaccessible.
    Filesystem,
    /// A configuration value is malformed or violates an invariant.
    Validation,
    /// Anything else.
    Other,
}

impl Error {
    /// Build a validation error for a dotted field name.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Classify this error.
    ///
    /// Parse errors count as validation failures: serde rejects an
    /// unknown enumerated value while deserializing, before
    /// `validate_config` ever sees the record.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_)
            | Self::ConfigDirNotFound
            | Self::DataDirNotFound
            | Self::ConfigNotFound { .. }
            | Self::ConfigRead { .. }
            | Self::ConfigExists { .. }
            | Self::ConfigWrite { .. }
            | Self::DirectoryObstructed { .. }
            | Self::DirectoryNotWritable { .. }
            | Self::DirectoryCreate { .. }
            | Self::LogFileOpen { .. } => ErrorKind::Filesystem,
            Self::ConfigParse { .. } | Self::ConfigValidation { .. } => ErrorKind::Validation,
            Self::ConfigSerialize { .. } | Self::JsonSerialize { .. } | Self::LoggingInit { .. } => {
                ErrorKind::Other
            }
        }
    }
}
