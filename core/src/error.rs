//! Error types for frame-runner.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for frame-runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors that can occur while locating, loading, or invoking a computation module.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The dynamic linker could not open the shared library.
    #[error("Library loading failed: {}: {reason}", .path.display())]
    LibraryLoad { path: PathBuf, reason: String },

    /// The entry point is not exported by the loaded library.
    #[error("Symbol resolution failed: `{symbol}` in {}: {reason}", .library.display())]
    SymbolResolution {
        symbol: String,
        library: PathBuf,
        reason: String,
    },

    /// The entry point reported a failure.
    #[error("Native call failed: {0}")]
    NativeCall(String),

    /// The model path cannot cross the native boundary.
    #[error("Invalid model path: {0}")]
    InvalidPath(String),

    /// Malformed frame model file.
    #[error("Frame format error at line {line}: {message}")]
    FrameFormat { line: usize, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

impl RunnerError {
    /// Create a library load error.
    pub fn library_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::LibraryLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a symbol resolution error.
    pub fn symbol_resolution(
        symbol: impl Into<String>,
        library: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::SymbolResolution {
            symbol: symbol.into(),
            library: library.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a native call error.
    pub fn native_call(msg: impl Into<String>) -> Self {
        Self::NativeCall(msg.into())
    }

    /// Create an invalid path error.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create a frame format error.
    pub fn frame_format(line: usize, msg: impl Into<String>) -> Self {
        Self::FrameFormat {
            line,
            message: msg.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
