//! Frame driver
//!
//! Owns everything one running game needs and exposes `advance()`: one call
//! per host loop iteration. Button events may arrive at any time between
//! calls and are latched until the next tick.

use rand::SeedableRng;

use crate::models::ModelRepository;
use crate::platform::{Button, Clock, FrameLimiter, InputLatch, SystemClock};
use crate::renderer::{RenderStats, Renderer, Surface};
use crate::settings::Settings;
use crate::sim::{self, World, Xorshift32};

/// Outcome of one `advance()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Quit was requested; the host should stop calling `advance`
    Quit,
    /// Too early for the next tick; nothing changed
    Waiting,
    /// One tick simulated and the frame drawn
    Ticked(RenderStats),
}

pub struct Game {
    world: World,
    models: ModelRepository,
    renderer: Renderer,
    input: InputLatch,
    limiter: FrameLimiter,
    clock: Box<dyn Clock>,
    rng: Xorshift32,
    settings: Settings,
}

impl Game {
    /// New game on the wall clock
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, Box::new(SystemClock::new()))
    }

    pub fn with_clock(settings: Settings, clock: Box<dyn Clock>) -> Self {
        let mut rng = Xorshift32::seed_from_u64(settings.seed);
        let world = World::new(&settings, &mut rng);
        let mut models = ModelRepository::new();
        models.prescale();

        log::info!(
            "Game started: {}x{} viewport, seed {:#x}, {} ms per tick",
            settings.width,
            settings.height,
            settings.seed,
            settings.frame_interval_ms
        );

        Self {
            world,
            models,
            renderer: Renderer::from_settings(&settings),
            input: InputLatch::new(),
            limiter: FrameLimiter::new(settings.frame_interval_ms),
            clock,
            rng,
            settings,
        }
    }

    pub fn press(&mut self, button: Button) {
        self.input.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.input.release(button);
    }

    /// Consume latched input, advance one tick and draw the frame, unless
    /// quitting or the frame interval has not yet elapsed.
    pub fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStatus {
        if self.input.quit() {
            return FrameStatus::Quit;
        }

        let now = self.clock.now_ms();
        if !self.limiter.ready(now) {
            return FrameStatus::Waiting;
        }

        let input = self.input.take();
        sim::tick(&mut self.world, &input, &mut self.rng, now);

        surface.clear();
        let stats = self.renderer.render(&self.world, &self.models, surface);
        FrameStatus::Ticked(stats)
    }

    /// Milliseconds until `advance` will tick again
    pub fn remaining_ms(&self) -> u64 {
        self.limiter.remaining_ms(self.clock.now_ms())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_debug_overlay(&mut self, enabled: bool) {
        self.renderer.set_debug_overlay(enabled);
    }
}
