//! Platform layer
//!
//! The fixed-tick loop driver and the input boundary. Backends supply an
//! `InputSource` and a `RenderAdapter`; the driver does the rest:
//! drain keys, map them to intents, step the simulation, render.

pub mod terminal;

use std::thread;
use std::time::{Duration, Instant};

use crate::input::{Intent, KeyCode, map_keys};
use crate::renderer::RenderAdapter;
use crate::settings::Settings;
use crate::sim::{Outcome, Simulation};

/// Keys accepted per tick; anything beyond waits for the next one
pub const MAX_KEYS_PER_TICK: usize = 64;

/// Non-blocking key source
pub trait InputSource {
    /// Next pending key, or `None` when nothing is waiting
    fn poll_key(&mut self) -> anyhow::Result<Option<KeyCode>>;
}

/// How a driver run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u64,
    pub outcome: Outcome,
    /// Stopped by a quit key rather than a tick budget
    pub quit: bool,
}

/// Fixed-interval game loop
#[derive(Debug, Clone, Copy)]
pub struct LoopDriver {
    interval: Duration,
    dt: f32,
}

impl LoopDriver {
    pub fn new(settings: &Settings) -> Self {
        let dt = settings.tick_dt();
        Self {
            interval: Duration::from_secs_f32(dt),
            dt,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.interval
    }

    /// Run at the real tick rate until a quit key arrives
    pub fn run(
        &self,
        sim: &mut Simulation,
        input: &mut impl InputSource,
        renderer: &mut impl RenderAdapter,
    ) -> anyhow::Result<RunSummary> {
        log::info!("Loop started at {:?} per tick", self.interval);
        renderer.render(&sim.snapshot())?;

        let mut ticks = 0;
        let mut next = Instant::now() + self.interval;
        loop {
            if !self.tick_once(sim, input, renderer)? {
                log::info!("Quit after {} ticks", ticks);
                return Ok(summary(sim, ticks, true));
            }
            ticks += 1;

            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
                next += self.interval;
            } else {
                // Fell behind; drop the backlog instead of bursting
                next = now + self.interval;
            }
        }
    }

    /// Run exactly `max_ticks` ticks without sleeping, or fewer on quit
    pub fn run_for(
        &self,
        sim: &mut Simulation,
        input: &mut impl InputSource,
        renderer: &mut impl RenderAdapter,
        max_ticks: u64,
    ) -> anyhow::Result<RunSummary> {
        for ticks in 0..max_ticks {
            if !self.tick_once(sim, input, renderer)? {
                return Ok(summary(sim, ticks, true));
            }
        }
        Ok(summary(sim, max_ticks, false))
    }

    /// One drain-map-step-render pass. Returns false on quit.
    fn tick_once(
        &self,
        sim: &mut Simulation,
        input: &mut impl InputSource,
        renderer: &mut impl RenderAdapter,
    ) -> anyhow::Result<bool> {
        let mut keys = Vec::new();
        while keys.len() < MAX_KEYS_PER_TICK {
            match input.poll_key()? {
                Some(key) => keys.push(key),
                None => break,
            }
        }

        let intents = map_keys(keys);
        if intents.contains(&Intent::Quit) {
            return Ok(false);
        }

        sim.step(self.dt, &intents);
        renderer.render(&sim.snapshot())?;
        Ok(true)
    }
}

fn summary(sim: &Simulation, ticks: u64, quit: bool) -> RunSummary {
    RunSummary {
        ticks,
        score: sim.score(),
        outcome: sim.outcome(),
        quit,
    }
}
