//! Process bootstrap and lifecycle control for a hosted rendering engine.
//!
//! The engine itself is an external multi-process renderer reached through
//! the `alcove-engine-core` contracts; this crate prepares its launch and
//! keeps it alive.  Three concerns live here:
//!
//! 1. [`Launcher`] resolves the on-disk location of the helper subprocess
//!    executable and builds the command-line argument vector forwarded to
//!    the engine's startup routine.
//! 2. [`EngineHost`] owns the launcher and the engine handle, performs the
//!    one-shot startup, and adapts the engine's cooperative UI message loop
//!    (blocking run, stop request, non-blocking pump).
//! 3. [`LaunchOptions`] is the embedder-facing configuration surface.
//!
//! All operations belong on one designated UI thread.  Failures inside the
//! hosted engine (for example a missing helper binary at spawn time) show up
//! as runtime failures of the engine itself, not as structured errors here;
//! the host only validates what it can see at launch-preparation time.

pub mod config;
pub mod error;
pub mod host;
pub mod launch;

pub use config::{DebugOptions, LaunchOptions};
pub use error::HostError;
pub use host::{EngineHost, HostState};
pub use launch::Launcher;
