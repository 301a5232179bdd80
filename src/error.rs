//! Application error types using thiserror
//!
//! The update engine itself is infallible. Errors only come from the edges:
//! - ConfigError: Issues loading the bot configuration
//! - InputError: Issues reading update lists or pull request bodies
//! - CollaboratorError: Failures reported by manifest scanners or resolvers

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input file related errors
    #[error(transparent)]
    Input(#[from] InputError),

    /// Collaborator related errors
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Unsupported config format
    #[error("unsupported config format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Branch prefix that cannot form a git ref
    #[error("invalid branch prefix '{value}': {message}")]
    InvalidBranchPrefix { value: String, message: String },
}

/// Errors related to input files
#[derive(Error, Debug)]
pub enum InputError {
    /// Failed to read input file
    #[error("failed to read input file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors reported by external collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// A manifest scanner failed
    #[error("failed to scan {root}: {message}")]
    ScanFailed { root: PathBuf, message: String },

    /// A version resolver failed
    #[error("failed to resolve latest version of '{package}': {message}")]
    ResolveFailed { package: String, message: String },
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnsupportedFormat error
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        ConfigError::UnsupportedFormat { path: path.into() }
    }

    /// Creates a new InvalidBranchPrefix error
    pub fn invalid_branch_prefix(value: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidBranchPrefix {
            value: value.into(),
            message: message.into(),
        }
    }
}

impl InputError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InputError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InputError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl CollaboratorError {
    /// Creates a new ScanFailed error
    pub fn scan_failed(root: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CollaboratorError::ScanFailed {
            root: root.into(),
            message: message.into(),
        }
    }

    /// Creates a new ResolveFailed error
    pub fn resolve_failed(package: impl Into<String>, message: impl Into<String>) -> Self {
        CollaboratorError::ResolveFailed {
            package: package.into(),
            message: message.into(),
        }
    }
}
