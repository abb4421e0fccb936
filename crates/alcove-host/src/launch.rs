//! Subprocess path resolution and launch-argument construction.
//!
//! The hosted engine re-spawns its own binary for renderer and utility
//! subprocesses unless told otherwise.  An embedding library cannot allow
//! that — the embedder's executable is not the engine — so the launcher
//! points the engine at a dedicated helper binary and builds the argument
//! vector carrying that path.

use std::path::{Path, PathBuf};

use alcove_engine_core::{ArgumentSink, ArgvBlock, LaunchDelegate, LaunchError};

use crate::config::{DebugOptions, LaunchOptions};

/// Program-name token handed to the engine as `argv[0]`.
pub const PROGRAM_NAME: &str = "alcove";

/// Disables the engine's internal process-isolation sandbox.
pub const SWITCH_NO_SANDBOX: &str = "--no-sandbox";

/// Absolute path of the binary the engine spawns for subprocesses.
pub const SWITCH_SUBPROCESS_PATH: &str = "--browser-subprocess-path";

/// Runs the engine without forking subprocesses.
pub const SWITCH_SINGLE_PROCESS: &str = "--single-process";

/// Lets a debugger attach to renderer subprocesses.
pub const SWITCH_DISABLE_SECCOMP: &str = "--disable-seccomp-sandbox";

/// Command prefix prepended to renderer subprocess invocations.
pub const SWITCH_RENDERER_CMD_PREFIX: &str = "--renderer-cmd-prefix";

/// Helper executable appended to the resolved subprocess directory.
#[cfg(all(windows, debug_assertions))]
pub const HELPER_EXECUTABLE: &str = "alcove-helper_d.exe";
#[cfg(all(windows, not(debug_assertions)))]
pub const HELPER_EXECUTABLE: &str = "alcove-helper.exe";
#[cfg(not(windows))]
pub const HELPER_EXECUTABLE: &str = "alcove-helper";

/// Directory of the currently running executable.
pub fn default_module_dir() -> Option<PathBuf> {
    std::env::current_exe().ok()?.parent().map(Path::to_path_buf)
}

// ── Launcher ─────────────────────────────────────────────────────

/// Resolves the helper subprocess path and owns the launch arguments.
///
/// The built [`ArgvBlock`] is retained for the launcher's whole lifetime:
/// it is constructed once, handed to the engine at startup, and stays
/// readable until the launcher is torn down (its backing strings outlive
/// even that, see `ArgvBlock`).
pub struct Launcher {
    home_dir: Option<PathBuf>,
    subprocess_path: PathBuf,
    debug: DebugOptions,
    args: ArgvBlock,
}

impl Launcher {
    /// Resolve paths and build the argument block from `options`, using the
    /// running executable's directory as the subprocess-dir fallback.
    pub fn new(options: &LaunchOptions) -> Result<Self, LaunchError> {
        Self::with_module_dir(options, default_module_dir())
    }

    /// Like [`new`](Self::new) with an explicit module-directory fallback.
    ///
    /// Resolution is pure path composition; nothing checks that the helper
    /// exists on disk.  A missing binary surfaces later, when the engine
    /// tries to spawn it.
    pub fn with_module_dir(
        options: &LaunchOptions,
        module_dir: Option<PathBuf>,
    ) -> Result<Self, LaunchError> {
        let dir = match &options.subprocess_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => module_dir.ok_or(LaunchError::ModuleDirUnavailable)?,
        };

        let mut launcher = Self {
            // An empty hint means "use the engine default", same as None.
            home_dir: options
                .home_dir
                .clone()
                .filter(|p| !p.as_os_str().is_empty()),
            subprocess_path: dir.join(HELPER_EXECUTABLE),
            debug: options.debug.clone(),
            args: ArgvBlock::new(),
        };

        let mut args = ArgvBlock::new();
        launcher.apply(&mut args)?;
        launcher.args = args;
        Ok(launcher)
    }

    /// Resolved absolute path of the helper subprocess executable.
    pub fn subprocess_path(&self) -> &Path {
        &self.subprocess_path
    }

    /// Engine profile directory hint, if the embedder supplied one.
    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    /// The retained argument block passed to the engine's startup routine.
    pub fn args(&self) -> &ArgvBlock {
        &self.args
    }

    /// Write the launch flags into `sink`.
    ///
    /// Content is identical no matter which delivery mechanism the engine
    /// uses — the returned argv or a command-line singleton.
    pub fn apply(&self, sink: &mut dyn ArgumentSink) -> Result<(), LaunchError> {
        sink.set_program(PROGRAM_NAME)?;
        // The engine's sandbox cannot be pointed at a custom subprocess
        // binary; it would respawn the embedder's own executable instead.
        sink.append_switch(SWITCH_NO_SANDBOX)?;
        sink.append_switch_with_value(
            SWITCH_SUBPROCESS_PATH,
            &self.subprocess_path.to_string_lossy(),
        )?;

        if self.debug.single_process {
            sink.append_switch(SWITCH_SINGLE_PROCESS)?;
        }
        if let Some(prefix) = &self.debug.renderer_cmd_prefix {
            sink.append_switch(SWITCH_DISABLE_SECCOMP)?;
            sink.append_switch_with_value(SWITCH_RENDERER_CMD_PREFIX, prefix)?;
        }
        Ok(())
    }
}

impl LaunchDelegate for Launcher {
    fn pre_parse(&self, sink: &mut dyn ArgumentSink) -> Result<(), LaunchError> {
        self.apply(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher_for(dir: &str) -> Launcher {
        Launcher::with_module_dir(&LaunchOptions::with_dirs("", dir), None).unwrap()
    }

    #[test]
    fn explicit_subprocess_dir_is_used_verbatim() {
        let launcher = launcher_for("/opt/app/helpers");
        assert_eq!(
            launcher.subprocess_path(),
            PathBuf::from("/opt/app/helpers").join(HELPER_EXECUTABLE)
        );
    }

    #[test]
    fn empty_subprocess_dir_falls_back_to_module_dir() {
        let options = LaunchOptions::default();
        let launcher =
            Launcher::with_module_dir(&options, Some(PathBuf::from("/usr/lib/app"))).unwrap();
        assert_eq!(
            launcher.subprocess_path(),
            PathBuf::from("/usr/lib/app").join(HELPER_EXECUTABLE)
        );
    }

    #[test]
    fn missing_module_dir_is_an_error() {
        let result = Launcher::with_module_dir(&LaunchOptions::default(), None);
        assert!(matches!(result, Err(LaunchError::ModuleDirUnavailable)));
    }

    #[test]
    fn argv_carries_exactly_the_baseline_flags() {
        let launcher = launcher_for("/opt/app/helpers");
        let tokens: Vec<_> = launcher.args().tokens().collect();

        assert_eq!(tokens[0], PROGRAM_NAME);
        assert_eq!(
            tokens.iter().filter(|t| **t == SWITCH_NO_SANDBOX).count(),
            1
        );
        let expected = format!(
            "{SWITCH_SUBPROCESS_PATH}={}",
            PathBuf::from("/opt/app/helpers")
                .join(HELPER_EXECUTABLE)
                .to_string_lossy()
        );
        assert_eq!(
            tokens
                .iter()
                .filter(|t| t.starts_with("--browser-subprocess-path="))
                .count(),
            1
        );
        assert!(tokens.contains(&expected.as_str()), "missing {expected} in {tokens:?}");
        assert_eq!(launcher.args().argc(), 3);
    }

    #[test]
    fn subprocess_path_flag_matches_resolved_path() {
        let launcher = launcher_for("/srv/engine");
        let flag = launcher
            .args()
            .tokens()
            .find_map(|t| t.strip_prefix("--browser-subprocess-path=").map(str::to_owned))
            .expect("subprocess-path flag present");
        assert_eq!(PathBuf::from(flag), launcher.subprocess_path());
    }

    #[test]
    fn debug_switches_appear_only_when_enabled() {
        let mut options = LaunchOptions::with_dirs("", "/opt/app/helpers");
        options.debug.single_process = true;
        options.debug.renderer_cmd_prefix = Some("xterm -e gdb --args".into());

        let launcher = Launcher::with_module_dir(&options, None).unwrap();
        let tokens: Vec<_> = launcher.args().tokens().collect();

        assert!(tokens.contains(&SWITCH_SINGLE_PROCESS));
        assert!(tokens.contains(&SWITCH_DISABLE_SECCOMP));
        assert!(tokens.contains(&"--renderer-cmd-prefix=xterm -e gdb --args"));
        assert_eq!(launcher.args().argc(), 6);
    }

    #[test]
    fn pre_parse_delivers_the_same_content_as_argv() {
        let launcher = launcher_for("/opt/app/helpers");
        let mut sink = ArgvBlock::new();
        launcher.pre_parse(&mut sink).unwrap();

        let direct: Vec<_> = launcher.args().tokens().collect();
        let hooked: Vec<_> = sink.tokens().collect();
        assert_eq!(direct, hooked);
    }
}
