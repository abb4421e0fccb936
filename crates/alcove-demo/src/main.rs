//! Alcove demo — boots a scripted stand-in engine and drives its loop.
//!
//! Shows the full embedding lifecycle: `init` with options from the
//! environment, a blocking `run_until_stopped` ended by a dispatched
//! shutdown event, a non-blocking `update` pump, and ordered teardown.

mod engine;

use alcove_host::{EngineHost, HostError, LaunchOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();

    if let Err(e) = run() {
        tracing::error!("demo failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), HostError> {
    let mut host = EngineHost::new(Box::new(engine::DemoEngine::scripted(3)));
    host.init(&LaunchOptions::from_env())?;

    // Blocking loop, stopped from within a dispatched event.
    host.run_until_stopped()?;

    // Embedder-driven pumping: returns immediately, even with nothing
    // pending.
    host.update()?;

    tracing::info!("engine loop stopped; shutting down");
    Ok(())
}
