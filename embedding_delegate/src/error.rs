//! Delegate error types

use embedding_api::{EngineError, Entrypoint};
use lifecycle::LifecycleError;
use thiserror::Error;

/// Errors returned by delegate operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DelegateError {
    #[error("Invalid lifecycle transition: {0}")]
    InvalidTransition(#[from] LifecycleError),

    #[error("No engine available: {0}")]
    EngineUnavailable(EngineError),

    #[error("Entry point {entrypoint} failed: {source}")]
    EntrypointFailed {
        entrypoint: Entrypoint,
        source: EngineError,
    },

    /// Phase says attached but no engine is held
    #[error("Delegate holds no engine")]
    NotAttached,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle::{DelegatePhase, LifecycleOp};

    #[test]
    fn test_invalid_transition_message() {
        let err: DelegateError = LifecycleError::InvalidTransition {
            op: LifecycleOp::Resume,
            phase: DelegatePhase::Detached,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid lifecycle transition: Cannot resume while detached"
        );
    }

    #[test]
    fn test_entrypoint_failure_names_entrypoint() {
        let err = DelegateError::EntrypointFailed {
            entrypoint: Entrypoint::new("bundle", "main"),
            source: EngineError::EntrypointNotFound("main".to_string()),
        };
        assert!(err.to_string().contains("bundle:main"));
    }
}
