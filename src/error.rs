use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for placement
#[derive(Debug, Error)]
pub enum PlacementError {
    /// A row was rendered for a core outside the table window
    #[error("INTERNAL ERROR - core ({core}) should belong to [{min},{max}]")]
    CoreOutOfWindow { core: usize, min: usize, max: usize },

    /// A cpu list string could not be parsed
    #[error("Invalid cpu list: {value}")]
    InvalidCpuList { value: String },

    /// Invalid argument provided
    #[error("Invalid argument: {argument}")]
    InvalidArgument { argument: String },

    /// Topology description is inconsistent
    #[error("Topology error: {message}")]
    Topology { message: String },

    /// Configuration file is invalid
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    /// Snapshot file could not be loaded
    #[error("Invalid snapshot {path}: {reason}")]
    Snapshot { path: PathBuf, reason: String },

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PlacementError {
    /// Create a window violation error
    pub fn core_out_of_window(core: usize, min: usize, max: usize) -> Self {
        PlacementError::CoreOutOfWindow { core, min, max }
    }

    /// Create a cpu list error
    pub fn invalid_cpu_list(value: impl Into<String>) -> Self {
        PlacementError::InvalidCpuList {
            value: value.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>) -> Self {
        PlacementError::InvalidArgument {
            argument: argument.into(),
        }
    }

    /// Create a topology error
    pub fn topology(message: impl Into<String>) -> Self {
        PlacementError::Topology {
            message: message.into(),
        }
    }

    /// Create a config invalid error
    pub fn config_invalid(path: PathBuf, reason: impl Into<String>) -> Self {
        PlacementError::ConfigInvalid {
            path,
            reason: reason.into(),
        }
    }

    /// Create a snapshot error
    pub fn snapshot(path: PathBuf, reason: impl Into<String>) -> Self {
        PlacementError::Snapshot {
            path,
            reason: reason.into(),
        }
    }
}

/// Result type alias for placement operations
pub type Result<T> = std::result::Result<T, PlacementError>;
