use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Spindle operations.
#[derive(Debug, Error, Diagnostic)]
pub enum SpindleError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Spindle.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Spindle.toml for syntax errors"))]
    Manifest { message: String },

    /// A declared dependency could not be pinned (bad coordinate, unknown
    /// property, missing catalog entry, conflicting versions).
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Resource staging or mod metadata rendering failed.
    #[error("Resource error: {message}")]
    Resource { message: String },

    /// Network request or download failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The Fabric Meta service returned something unusable.
    #[error("Platform metadata error: {message}")]
    #[diagnostic(help("Published game and loader versions are listed at https://meta.fabricmc.net/v2"))]
    Platform { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type SpindleResult<T> = miette::Result<T>;
