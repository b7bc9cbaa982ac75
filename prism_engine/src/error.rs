//! Error types for the Prism engine
//!
//! This module defines the error types used throughout the engine,
//! covering asset loading, shader compilation and linking, uniform
//! resolution and device/backend failures.

use std::fmt;

use crate::shader::ShaderStage;

/// Result type for Prism engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Shader asset could not be opened or read
    AssetRead {
        /// Path that was requested
        path: String,
        /// Reason reported by the filesystem
        reason: String,
    },

    /// Device rejected a shader stage at compile time
    StageCompile {
        /// Stage that failed
        stage: ShaderStage,
        /// Device info log
        log: String,
    },

    /// Device failed to link a program (info log attached)
    ProgramLink(String),

    /// Uniform name does not resolve in the linked program
    UniformResolution(String),

    /// Backend-specific error (OpenGL, windowing, etc.)
    BackendError(String),

    /// Invalid resource (buffer, vertex array, shader, etc.)
    InvalidResource(String),

    /// Initialization failed (window, context, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AssetRead { path, reason } => {
                write!(f, "Failed to read shader asset '{}': {}", path, reason)
            }
            Error::StageCompile { stage, log } => {
                write!(f, "Failed to compile {} shader: {}", stage.name(), log)
            }
            Error::ProgramLink(log) => write!(f, "Failed to link shader program: {}", log),
            Error::UniformResolution(name) => write!(f, "Uniform '{}' not found in program", name),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR HELPER MACROS =====

/// Log an ERROR message and build a `BackendError` from the same text
///
/// # Example
///
/// ```no_run
/// use prism_engine::engine_err;
///
/// let err = engine_err!("prism::gl", "Failed to create buffer: {}", "out of handles");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with a `BackendError`
///
/// # Example
///
/// ```no_run
/// use prism_engine::engine_bail;
///
/// fn create() -> prism_engine::prism::Result<()> {
///     engine_bail!("prism::gl", "Device refused vertex array creation");
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
