//! Frame composition
//!
//! Draws one complete frame from the world: flash on hit frames, otherwise
//! horizon, objects, sparks, crosshair, HUD and the optional debug overlay.
//! Draw order is registry order; nothing is depth sorted.

use glam::IVec3;

use super::projection::{ProjectedVertex, Viewport, is_visible, project_model, project_point};
use super::raster::{draw_line, draw_model};
use super::surface::Surface;
use crate::consts::UNIT;
use crate::models::{ModelId, ModelRepository};
use crate::settings::Settings;
use crate::sim::{Color, World};

/// Colour filling the screen on the frame the player is hit
pub const FLASH_COLOR: Color = Color::RED;
pub const HORIZON_COLOR: Color = Color::DARK_GREEN;
pub const SPARK_COLOR: Color = Color::YELLOW;
pub const HUD_COLOR: Color = Color::WHITE;
pub const OVERLAY_COLOR: Color = Color::MAGENTA;

/// Crosshair arm length in pixels
const CROSSHAIR_ARM: i32 = 3;
/// Tally mark geometry
const TALLY_MARGIN: i32 = 2;
const TALLY_SPACING: i32 = 3;
const TALLY_HEIGHT: i32 = 5;

/// What ended up on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub objects: usize,
    pub sparks: usize,
    pub flashed: bool,
}

pub struct Renderer {
    viewport: Viewport,
    debug_overlay: bool,
    /// Per-object projected vertices, reused between draws
    scratch: Vec<ProjectedVertex>,
}

impl Renderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            debug_overlay: false,
            scratch: Vec::with_capacity(16),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut renderer = Self::new(Viewport::new(settings.width as i32, settings.height as i32));
        renderer.debug_overlay = settings.debug_overlay;
        renderer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_debug_overlay(&mut self, enabled: bool) {
        self.debug_overlay = enabled;
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Draw the frame. The surface is expected to be cleared by the caller.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        world: &World,
        models: &ModelRepository,
        surface: &mut S,
    ) -> RenderStats {
        let mut stats = RenderStats::default();

        if world.player_hit {
            self.flash(surface);
            stats.flashed = true;
            return stats;
        }

        self.horizon(surface);

        // === Objects ===
        for obj in world.objects.iter() {
            if obj.alive <= 0 || !is_visible(&world.camera, obj.pos) {
                continue;
            }
            let model = models.get(obj.model);
            project_model(
                &world.camera,
                &self.viewport,
                model,
                obj.pos,
                obj.orientation,
                obj.scale,
                &mut self.scratch,
            );
            surface.set_color(obj.color);
            draw_model(surface, &self.viewport, model, &self.scratch);
            stats.objects += 1;
        }

        // === Sparks ===
        surface.set_color(SPARK_COLOR);
        for spark in world.sparks.iter() {
            let v = project_point(&world.camera, &self.viewport, spark.pos);
            if v.on_screen {
                let (x, y) = v.pixel();
                surface.plot(x, y);
                stats.sparks += 1;
            }
        }

        // === HUD ===
        surface.set_color(HUD_COLOR);
        self.crosshair(surface);
        self.tallies(surface, world.kills, world.deaths);

        if self.debug_overlay {
            self.overlay(world, models, surface);
        }

        stats
    }

    fn flash<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_color(FLASH_COLOR);
        for y in 0..self.viewport.height {
            draw_line(surface, 0, y, self.viewport.width - 1, y);
        }
    }

    fn horizon<S: Surface + ?Sized>(&self, surface: &mut S) {
        let y = self.viewport.mid_y();
        surface.set_color(HORIZON_COLOR);
        draw_line(surface, 0, y, self.viewport.width - 1, y);
    }

    fn crosshair<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (cx, cy) = (self.viewport.mid_x(), self.viewport.mid_y());
        draw_line(surface, cx - CROSSHAIR_ARM, cy, cx + CROSSHAIR_ARM, cy);
        draw_line(surface, cx, cy - CROSSHAIR_ARM, cx, cy + CROSSHAIR_ARM);
    }

    /// One vertical stroke per kill from the left edge, per death from the
    /// right edge. Each side is capped to half the screen.
    fn tallies<S: Surface + ?Sized>(&self, surface: &mut S, kills: u32, deaths: u32) {
        let fit = ((self.viewport.width / 2 - TALLY_MARGIN) / TALLY_SPACING).max(0) as u32;
        let top = TALLY_MARGIN;
        let bottom = TALLY_MARGIN + TALLY_HEIGHT - 1;

        for i in 0..kills.min(fit) as i32 {
            let x = TALLY_MARGIN + i * TALLY_SPACING;
            draw_line(surface, x, top, x, bottom);
        }
        for i in 0..deaths.min(fit) as i32 {
            let x = self.viewport.width - 1 - TALLY_MARGIN - i * TALLY_SPACING;
            draw_line(surface, x, top, x, bottom);
        }
    }

    /// Tank destination marker plus registry occupancy bars
    fn overlay<S: Surface + ?Sized>(
        &mut self,
        world: &World,
        models: &ModelRepository,
        surface: &mut S,
    ) {
        surface.set_color(OVERLAY_COLOR);

        if let Some(dest) = world.brain.mode().destination() {
            if is_visible(&world.camera, dest) {
                for id in [ModelId::VerticalLine, ModelId::HorizontalLine] {
                    let model = models.get(id);
                    project_model(
                        &world.camera,
                        &self.viewport,
                        model,
                        IVec3::new(dest.x, 0, dest.z),
                        0,
                        UNIT,
                        &mut self.scratch,
                    );
                    draw_model(surface, &self.viewport, model, &self.scratch);
                }
            }
        }

        let span = self.viewport.width - 2 * TALLY_MARGIN;
        let bars = [
            (world.objects.len(), world.objects.capacity()),
            (world.sparks.len(), world.sparks.capacity()),
        ];
        for (row, (len, capacity)) in bars.into_iter().enumerate() {
            if len == 0 || capacity == 0 {
                continue;
            }
            let y = self.viewport.height - 1 - TALLY_MARGIN - 2 * row as i32;
            let length = (len as i32 * span / capacity as i32).max(1);
            draw_line(surface, TALLY_MARGIN, y, TALLY_MARGIN + length - 1, y);
        }
    }
}
