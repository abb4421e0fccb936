use alcove_engine_core::{EngineError, LaunchError};

/// Errors surfaced by the embedding host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("host is not initialized; call init first")]
    NotInitialized,

    #[error("host is already initialized")]
    AlreadyInitialized,

    #[error("failed to build launch arguments: {0}")]
    Launch(#[from] LaunchError),

    #[error("engine failed to start: {0}")]
    Startup(#[from] EngineError),
}
