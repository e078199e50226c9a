//! Error types for murmuration_core.
//!
//! The engine has no recoverable runtime error taxonomy: misconfiguration is
//! fatal at construction time, and runtime arithmetic is guarded rather than
//! reported. Everything that can fail does so either when the swarm is built
//! or when a worker thread dies mid-round.

use thiserror::Error;

/// Main error type for swarm operations.
#[derive(Error, Debug)]
pub enum SwarmError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] anyhow::Error),

    /// Worker thread could not be spawned or joined
    #[error("Worker thread error: {0}")]
    Worker(String),

    /// A worker channel closed while a round was in flight
    #[error("Worker channel disconnected mid-round")]
    Disconnected,
}

/// Result type alias for swarm operations.
pub type Result<T> = std::result::Result<T, SwarmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SwarmError::Worker("spawn failed".to_string());
        assert_eq!(err.to_string(), "Worker thread error: spawn failed");
    }

    #[test]
    fn test_config_error_from_anyhow() {
        let err: SwarmError = anyhow::anyhow!("workers must be positive").into();
        assert!(err.to_string().contains("workers must be positive"));
    }
}
