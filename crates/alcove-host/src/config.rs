//! Embedder-facing launch configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Hints controlling subprocess-path resolution and engine launch flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchOptions {
    /// Engine profile directory.  `None` leaves the engine's default.
    pub home_dir: Option<PathBuf>,
    /// Directory containing the helper executable.  `None` falls back to
    /// the directory of the running executable.
    pub subprocess_dir: Option<PathBuf>,
    /// Developer switches, all off by default.
    pub debug: DebugOptions,
}

/// Opt-in switches for debugging the engine's subprocess zoo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugOptions {
    /// Run everything in one process instead of forking subprocesses.
    pub single_process: bool,
    /// Command prefix for renderer subprocesses, e.g.
    /// `xterm -e gdb --args`, so they can be caught in a debugger.
    /// Implies disabling the seccomp sandbox.
    pub renderer_cmd_prefix: Option<String>,
}

impl LaunchOptions {
    /// Options with both directory hints set.
    pub fn with_dirs(
        home_dir: impl Into<PathBuf>,
        subprocess_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            home_dir: Some(home_dir.into()),
            subprocess_dir: Some(subprocess_dir.into()),
            debug: DebugOptions::default(),
        }
    }

    /// Read hints from `ALCOVE_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            home_dir: env_path("ALCOVE_HOME_DIR"),
            subprocess_dir: env_path("ALCOVE_SUBPROCESS_DIR"),
            debug: DebugOptions {
                single_process: std::env::var_os("ALCOVE_SINGLE_PROCESS").is_some(),
                renderer_cmd_prefix: std::env::var("ALCOVE_RENDERER_CMD_PREFIX").ok(),
            },
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_everything_unset() {
        let options = LaunchOptions::default();
        assert!(options.home_dir.is_none());
        assert!(options.subprocess_dir.is_none());
        assert!(!options.debug.single_process);
        assert!(options.debug.renderer_cmd_prefix.is_none());
    }

    #[test]
    fn deserializes_from_embedder_settings() {
        let options: LaunchOptions = serde_json::from_str(
            r#"{
                "home_dir": "/var/lib/app",
                "subprocess_dir": "/opt/app/helpers",
                "debug": { "single_process": true, "renderer_cmd_prefix": null }
            }"#,
        )
        .unwrap();
        assert_eq!(options.home_dir.as_deref(), Some("/var/lib/app".as_ref()));
        assert_eq!(
            options.subprocess_dir.as_deref(),
            Some("/opt/app/helpers".as_ref())
        );
        assert!(options.debug.single_process);
    }
}
