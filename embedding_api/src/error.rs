//! Engine error types

use thiserror::Error;

/// Errors reported by an engine or the bootstrap that builds one
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The bootstrap could not build an engine
    #[error("Failed to create engine: {0}")]
    CreationFailed(String),

    /// The program bundle could not be located or loaded
    #[error("Bundle not found: {0}")]
    BundleNotFound(String),

    /// The entry point function does not exist in the bundle
    #[error("Entry point not found: {0}")]
    EntrypointNotFound(String),

    /// The entry point started but failed
    #[error("Entry point failed: {0}")]
    ExecutionFailed(String),

    /// The host-control surface refused the attachment
    #[error("Host control rejected: {0}")]
    HostControlRejected(String),

    /// The engine has been shut down and can no longer be used
    #[error("Engine has been shut down")]
    ShutDown,
}
