use std::ffi::NulError;

/// Errors building or delivering launch arguments.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("argument contains interior NUL: {0}")]
    Nul(#[from] NulError),

    #[error("cannot determine the current executable's directory")]
    ModuleDirUnavailable,
}

/// Errors reported by a hosted engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine startup failed: {0}")]
    Startup(String),

    #[error("launch arguments rejected: {0}")]
    Launch(#[from] LaunchError),
}
