//! Error types for the velocity limits engine
//!
//! Every variant here is fatal to a run. Business-rule outcomes (duplicate
//! requests, limit breaches) are not errors: they surface as a rejected
//! [`Decision`](super::Decision).
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Input Errors**: Malformed JSON, unparseable amount or timestamp
//! - **Output Errors**: The decision sink rejected a write
//! - **Configuration Errors**: Invalid thresholds, missing input path
//! - **Pipeline Errors**: Runtime construction or task failures

use thiserror::Error;

/// Main error type for the velocity limits engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VelocityError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or opening files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// An input line could not be decoded into a load request
    #[error("Malformed request at line {line}: {message}")]
    MalformedRequest {
        /// 1-based line number in the input
        line: u64,
        /// Description of the decoding error
        message: String,
    },

    /// The `load_amount` field is not a non-negative decimal
    #[error("Invalid load amount '{amount}' at line {line}")]
    InvalidAmount {
        /// 1-based line number in the input
        line: u64,
        /// The raw amount string
        amount: String,
    },

    /// The `time` field is not an RFC 3339 timestamp
    #[error("Invalid timestamp '{time}' at line {line}")]
    InvalidTimestamp {
        /// 1-based line number in the input
        line: u64,
        /// The raw time string
        time: String,
    },

    /// The decision sink could not accept a record
    #[error("Failed to write decision: {message}")]
    Write {
        /// Description of the write failure
        message: String,
    },

    /// Configuration file or values are invalid
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem
        message: String,
    },

    /// No input path was given on the command line or in the config file
    #[error("No input file given (pass INPUT or set files.input_file in the config)")]
    MissingInput,

    /// A pipeline stage or the runtime failed
    #[error("Pipeline failure: {message}")]
    Pipeline {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for VelocityError {
    fn from(error: std::io::Error) -> Self {
        VelocityError::Io {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for VelocityError {
    fn from(error: toml::de::Error) -> Self {
        VelocityError::InvalidConfig {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl VelocityError {
    /// Create an error for a file that could not be opened
    ///
    /// `NotFound` maps to [`VelocityError::FileNotFound`], everything else to
    /// [`VelocityError::Io`] with the path in the message.
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            VelocityError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            VelocityError::Io {
                message: format!("Failed to open '{}': {}", path.display(), error),
            }
        }
    }

    /// Create a MalformedRequest error
    pub fn malformed_request(line: u64, message: impl ToString) -> Self {
        VelocityError::MalformedRequest {
            line,
            message: message.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(line: u64, amount: &str) -> Self {
        VelocityError::InvalidAmount {
            line,
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidTimestamp error
    pub fn invalid_timestamp(line: u64, time: &str) -> Self {
        VelocityError::InvalidTimestamp {
            line,
            time: time.to_string(),
        }
    }

    /// Create a Write error
    pub fn write_failed(message: impl ToString) -> Self {
        VelocityError::Write {
            message: message.to_string(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl ToString) -> Self {
        VelocityError::InvalidConfig {
            message: message.to_string(),
        }
    }

    /// Create a Pipeline error
    pub fn pipeline(message: impl ToString) -> Self {
        VelocityError::Pipeline {
            message: message.to_string(),
        }
    }
}
