//! Error types for geolens.

/// Result type alias for geolens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for geolens.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// No valid image files found.
    #[error("no valid image files found in the provided paths")]
    NoValidImageFiles,

    /// Failed to read an image file.
    #[error("failed to read image file '{path}'")]
    ImageRead {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Image payload exceeds the accepted size.
    #[error("image is too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge {
        /// Payload size in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        max: usize,
    },

    /// Image payload could not be decoded.
    #[error("could not load image: {reason}")]
    ImageDecode {
        /// Description of the decode failure.
        reason: String,
    },

    /// Failed to read a detection file.
    #[error("failed to read detection file '{path}'")]
    DetectionRead {
        /// Path to the detection file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Detection file has an unsupported extension.
    #[error("unsupported detection file format: {path} (expected .json or .csv)")]
    UnsupportedDetectionFormat {
        /// Path to the detection file.
        path: std::path::PathBuf,
    },

    /// A detection record violates the detection invariants.
    #[error("invalid detection in '{path}': {message}")]
    InvalidDetection {
        /// Path to the detection file.
        path: std::path::PathBuf,
        /// Description of the violation.
        message: String,
    },

    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Failed to write a report file.
    #[error("failed to write report '{path}'")]
    ReportWrite {
        /// Path to the report file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to serialize a report.
    #[error("failed to serialize report")]
    ReportSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to start the async runtime.
    #[error("failed to start async runtime")]
    RuntimeStart {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A background task panicked or was cancelled.
    #[error("background task failed: {reason}")]
    TaskFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Invalid command line usage not caught by clap.
    #[error("{message}")]
    Usage {
        /// Description of the usage error.
        message: String,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
