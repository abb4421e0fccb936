//! Hosted-engine contracts for Alcove.
//!
//! Defines the traits a concrete engine binding implements so that the
//! embedding host in `alcove-host` can bootstrap it and drive its event
//! loop without knowing anything about the engine's internals.  The hosted
//! engine is a multi-process renderer: it forks helper subprocesses, parses
//! a command line at startup, and owns a single cooperative UI message loop.
//!
//! # Architecture
//!
//! The startup handshake has three parts:
//! 1. [`Engine::startup`] is called exactly once per process with a
//!    null-terminated [`ArgvBlock`] and a [`LaunchDelegate`].
//! 2. Before parsing its command line, the engine invokes
//!    [`LaunchDelegate::pre_parse`] with whatever [`ArgumentSink`] it uses
//!    internally (a process-wide command-line singleton on some platforms).
//!    The delegate writes the same flags into it that the argv block
//!    already carries; only the delivery mechanism differs.
//! 3. `startup` hands back a [`ViewHostFactory`], an opaque capability the
//!    embedder must release before the launch configuration is torn down.

pub mod args;
pub mod error;

pub use args::ArgvBlock;
pub use error::{EngineError, LaunchError};

// ── Launch-argument delivery ─────────────────────────────────────

/// Sink for launch arguments.
///
/// Two implementations satisfy the same contract: the [`ArgvBlock`] that is
/// passed to [`Engine::startup`] directly, and the engine's own process-wide
/// command line fed through [`LaunchDelegate::pre_parse`].
pub trait ArgumentSink {
    /// Set the leading program-name token.
    fn set_program(&mut self, name: &str) -> Result<(), LaunchError>;

    /// Append a bare switch, e.g. `--no-sandbox`.
    fn append_switch(&mut self, switch: &str) -> Result<(), LaunchError>;

    /// Append a `switch=value` pair.
    fn append_switch_with_value(
        &mut self,
        switch: &str,
        value: &str,
    ) -> Result<(), LaunchError>;
}

/// Hook the engine invokes before its own command-line parsing.
///
/// Engines whose command line lives in a process-wide singleton call this
/// with that singleton as the sink instead of reading the argv block.
pub trait LaunchDelegate {
    fn pre_parse(&self, sink: &mut dyn ArgumentSink) -> Result<(), LaunchError>;
}

// ── Event loop ───────────────────────────────────────────────────

/// The engine's current UI message loop.
///
/// A thin contract over exactly three operations.  All of them must be
/// invoked from the designated UI thread; the loop itself provides whatever
/// thread-safety it has, this crate adds none.
pub trait MessageLoop {
    /// Block, dispatching events in arrival order until [`quit`] is
    /// observed from within one of them.
    ///
    /// [`quit`]: MessageLoop::quit
    fn run(&mut self);

    /// Request the active blocking run to exit at its next opportunity.
    ///
    /// Has no effect while the loop is not running; a quit requested in the
    /// idle state must not terminate a later [`run`](MessageLoop::run).
    fn quit(&mut self);

    /// Dispatch all currently pending events and return.  Never blocks.
    fn pump(&mut self);
}

// ── Engine entry point ───────────────────────────────────────────

/// Opaque view-host factory returned by [`Engine::startup`].
///
/// The embedder holds it for the engine's lifetime and must drop it before
/// the launch configuration: during shutdown the factory can still call
/// back into engine objects that read the retained launch arguments.
pub trait ViewHostFactory {}

/// The hosted engine's process entry point and loop accessor.
pub trait Engine {
    /// One-shot process startup.  Must be called exactly once; `args` and
    /// the delegate's sink carry identical launch flags (see
    /// [`LaunchDelegate`]).
    ///
    /// The engine may stash the raw `args` pointers and read them at any
    /// later time, which is why [`ArgvBlock`] leaks its backing strings.
    fn startup(
        &mut self,
        args: &ArgvBlock,
        delegate: &dyn LaunchDelegate,
    ) -> Result<Box<dyn ViewHostFactory>, EngineError>;

    /// The globally-reachable current UI message loop.
    fn ui_loop(&mut self) -> &mut dyn MessageLoop;
}
