//! Engine lifecycle controller.

use alcove_engine_core::{Engine, ViewHostFactory};

use crate::config::LaunchOptions;
use crate::error::HostError;
use crate::launch::Launcher;

/// Lifecycle state of an [`EngineHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// [`init`](EngineHost::init) has not run yet.
    Uninitialized,
    /// Engine started; no blocking loop active.
    Idle,
    /// A [`run_until_stopped`](EngineHost::run_until_stopped) call is on
    /// the stack.
    Running,
}

/// Bootstraps a hosted engine and operates its event loop.
///
/// The hosted engine is process-global, so embedders must create at most
/// one host per process and call every method from the designated UI
/// thread.  The host adds no locking of its own; scheduling is
/// single-threaded cooperative.
///
/// Lifecycle: construct → [`init`](Self::init) once → any number of
/// [`update`](Self::update) pumps and
/// [`run_until_stopped`](Self::run_until_stopped) /
/// [`stop_running`](Self::stop_running) cycles → drop.
pub struct EngineHost {
    state: HostState,
    // Teardown order is load-bearing: the factory can call back into engine
    // objects that still read the retained launch arguments, so it goes
    // first, then the launcher, and the engine handle last.
    factory: Option<Box<dyn ViewHostFactory>>,
    launcher: Option<Launcher>,
    engine: Box<dyn Engine>,
}

impl EngineHost {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            state: HostState::Uninitialized,
            factory: None,
            launcher: None,
            engine,
        }
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    /// Start the hosted engine.
    ///
    /// Builds the launch configuration and invokes the engine's startup
    /// entry point exactly once, passing the argument block and the
    /// launcher as pre-parse delegate.  Errors with
    /// [`HostError::AlreadyInitialized`] on a second call.
    pub fn init(&mut self, options: &LaunchOptions) -> Result<(), HostError> {
        if self.state != HostState::Uninitialized {
            return Err(HostError::AlreadyInitialized);
        }

        let launcher = Launcher::new(options)?;
        tracing::info!(
            "starting engine with helper {}",
            launcher.subprocess_path().display()
        );

        let factory = self.engine.startup(launcher.args(), &launcher)?;

        self.factory = Some(factory);
        self.launcher = Some(launcher);
        self.state = HostState::Idle;
        Ok(())
    }

    /// Block on the calling thread, dispatching engine events until
    /// [`stop_running`](Self::stop_running) is observed from within one of
    /// them.  The loop is reusable; sequential cycles all terminate.
    pub fn run_until_stopped(&mut self) -> Result<(), HostError> {
        if self.state == HostState::Uninitialized {
            return Err(HostError::NotInitialized);
        }

        self.state = HostState::Running;
        self.engine.ui_loop().run();
        self.state = HostState::Idle;
        Ok(())
    }

    /// Request the active blocking loop to exit at its next opportunity.
    ///
    /// Idempotent: with no loop running this does nothing (the engine loop
    /// ignores quits in the idle state), and it is never an error.
    pub fn stop_running(&mut self) {
        if self.state == HostState::Uninitialized {
            tracing::trace!("stop requested before init; ignoring");
            return;
        }
        self.engine.ui_loop().quit();
    }

    /// Dispatch all currently pending engine events and return immediately.
    ///
    /// For embedders that drive their own outer loop instead of delegating
    /// to [`run_until_stopped`](Self::run_until_stopped).
    pub fn update(&mut self) -> Result<(), HostError> {
        if self.state == HostState::Uninitialized {
            return Err(HostError::NotInitialized);
        }
        self.engine.ui_loop().pump();
        Ok(())
    }
}

impl Drop for EngineHost {
    fn drop(&mut self) {
        // Factory first, then the launcher with its retained argv; the
        // engine handle follows in field order.
        self.factory.take();
        self.launcher.take();
    }
}
