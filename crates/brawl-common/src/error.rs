//! Error types for Brawl.
//!
//! The combat core itself is total and never returns these; they cover the
//! surfaces around it (configuration files, labels typed by users).

use thiserror::Error;

/// Top-level error type for Brawl operations.
#[derive(Debug, Error)]
pub enum BrawlError {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Difficulty label could not be parsed
    #[error("Difficulty error: {0}")]
    Difficulty(#[from] ParseDifficultyError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot schema version mismatch
    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Actual version found
        actual: String,
    },
}

/// Configuration loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that was read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file
    #[error("Failed to parse {path}: {reason}")]
    Parse {
        /// Path that was parsed
        path: String,
        /// Parser message
        reason: String,
    },

    /// Failed to serialize the config
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// Failed to write the config file
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that was written
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Unknown difficulty label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown difficulty '{label}', expected EASY, NORMAL or HARD")]
pub struct ParseDifficultyError {
    /// The label that was rejected
    pub label: String,
}

/// Result type alias for Brawl operations.
pub type BrawlResult<T> = Result<T, BrawlError>;
