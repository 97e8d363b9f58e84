//! Error types for the server binary.
//!
//! [`AppError`] is the top-level error type that wraps every failure
//! mode between process start and server shutdown.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: snowtooth_core::ConfigError,
    },

    /// The initial dataset could not be loaded or validated.
    #[error("dataset error: {source}")]
    Dataset {
        /// The underlying resort error.
        #[from]
        source: snowtooth_core::ResortError,
    },

    /// The API server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: snowtooth_api::ServerError,
    },
}
