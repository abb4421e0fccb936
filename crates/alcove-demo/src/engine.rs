//! Scripted stand-in engine for the demo.
//!
//! Delivers a fixed queue of tick events; the last one requests the loop to
//! stop, the way a real engine event handler would.  Useful for exercising
//! the embedding contract end to end without a real renderer.

use std::collections::VecDeque;

use alcove_engine_core::{
    ArgvBlock, Engine, EngineError, LaunchDelegate, MessageLoop, ViewHostFactory,
};

enum DemoEvent {
    Tick(u32),
    Shutdown,
}

struct DemoLoop {
    pending: VecDeque<DemoEvent>,
    quit: bool,
}

impl DemoLoop {
    fn dispatch(&mut self, event: DemoEvent) {
        match event {
            DemoEvent::Tick(n) => tracing::info!("tick {n}"),
            DemoEvent::Shutdown => {
                tracing::info!("shutdown event received; stopping loop");
                self.quit = true;
            }
        }
    }
}

impl MessageLoop for DemoLoop {
    fn run(&mut self) {
        // Quits requested while idle are ignored by contract.
        self.quit = false;
        while !self.quit {
            match self.pending.pop_front() {
                Some(event) => self.dispatch(event),
                // A real loop would park here for more events; the demo
                // script is finite, so an empty queue ends the run.
                None => break,
            }
        }
    }

    fn quit(&mut self) {
        self.quit = true;
    }

    fn pump(&mut self) {
        let pending = self.pending.len();
        tracing::debug!("pumping {pending} pending events");
        for _ in 0..pending {
            if let Some(event) = self.pending.pop_front() {
                self.dispatch(event);
            }
        }
    }
}

struct DemoViewHostFactory;

impl ViewHostFactory for DemoViewHostFactory {}

impl Drop for DemoViewHostFactory {
    fn drop(&mut self) {
        tracing::info!("view-host factory released");
    }
}

/// In-process engine that replays a scripted event queue.
pub struct DemoEngine {
    ui_loop: DemoLoop,
    started: bool,
}

impl DemoEngine {
    /// Engine preloaded with `ticks` tick events and a final shutdown
    /// request.
    pub fn scripted(ticks: u32) -> Self {
        let mut pending: VecDeque<_> = (1..=ticks).map(DemoEvent::Tick).collect();
        pending.push_back(DemoEvent::Shutdown);
        Self {
            ui_loop: DemoLoop { pending, quit: false },
            started: false,
        }
    }
}

impl Engine for DemoEngine {
    fn startup(
        &mut self,
        args: &ArgvBlock,
        delegate: &dyn LaunchDelegate,
    ) -> Result<Box<dyn ViewHostFactory>, EngineError> {
        if self.started {
            return Err(EngineError::Startup("startup called twice".into()));
        }
        self.started = true;
        tracing::info!("demo engine starting with argv {args:?}");

        // The demo's "command-line singleton" is just another argv block.
        let mut command_line = ArgvBlock::new();
        delegate.pre_parse(&mut command_line)?;
        tracing::debug!("pre-parsed command line: {command_line:?}");

        Ok(Box::new(DemoViewHostFactory))
    }

    fn ui_loop(&mut self) -> &mut dyn MessageLoop {
        &mut self.ui_loop
    }
}
