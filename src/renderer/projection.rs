//! World to screen transform
//!
//! Pipeline per vertex: model rotation by the object's orientation, translate
//! relative to the camera, rotate into camera space, perspective divide.
//! Camera space looks down -z with +x to the right and +y up. Screen
//! coordinates carry 8 fractional bits until rasterization.

use glam::IVec3;

use crate::consts::{UNIT, VISIBLE_HALF_ANGLE};
use crate::models::Model;
use crate::sim::Camera;
use crate::{angle_delta, normalize_angle, trig};

/// Projected coordinates are clamped to this many sub-pixel units
const SCREEN_LIMIT: i64 = 1 << 30;

/// Pixel dimensions of the drawing area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn mid_x(&self) -> i32 {
        self.width / 2
    }

    #[inline]
    pub fn mid_y(&self) -> i32 {
        self.height / 2
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

/// Screen position of one vertex for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectedVertex {
    /// Sub-pixel x (8 fractional bits)
    pub x: i32,
    /// Sub-pixel y (8 fractional bits), growing downward
    pub y: i32,
    /// Strictly in front of the eye; `x`/`y` are meaningless otherwise
    pub in_front: bool,
    /// In front and inside the viewport
    pub on_screen: bool,
}

impl ProjectedVertex {
    /// Whole-pixel position
    #[inline]
    pub fn pixel(&self) -> (i32, i32) {
        (self.x >> 8, self.y >> 8)
    }
}

/// World point expressed in camera space
#[inline]
pub fn to_camera(camera: &Camera, point: IVec3) -> IVec3 {
    trig::rotate_y(point - camera.pos, normalize_angle(128 - camera.orientation))
}

/// Perspective divide of a camera-space point
pub fn perspective(camera: &Camera, viewport: &Viewport, p: IVec3) -> ProjectedVertex {
    if p.z >= 0 {
        return ProjectedVertex::default();
    }

    let depth = -(p.z as i64);
    let eye = camera.eye_distance as i64;
    let sx = viewport.mid_x() as i64 * 256 + eye * p.x as i64 * 256 / depth;
    let sy = viewport.mid_y() as i64 * 256 - eye * p.y as i64 * 256 / depth;

    let mut v = ProjectedVertex {
        x: sx.clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i32,
        y: sy.clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i32,
        in_front: true,
        on_screen: false,
    };
    let (px, py) = v.pixel();
    v.on_screen = viewport.contains(px, py);
    v
}

/// Project a single world point (used for sparks)
#[inline]
pub fn project_point(camera: &Camera, viewport: &Viewport, point: IVec3) -> ProjectedVertex {
    perspective(camera, viewport, to_camera(camera, point))
}

/// Project every vertex of `model` placed at `pos`, turned to `orientation`
/// and scaled by `scale` (`UNIT` = 1:1), into `out`.
///
/// `out` is a scratch buffer reused across objects; the model itself is never
/// written to.
pub fn project_model(
    camera: &Camera,
    viewport: &Viewport,
    model: &Model,
    pos: IVec3,
    orientation: i32,
    scale: i32,
    out: &mut Vec<ProjectedVertex>,
) {
    out.clear();
    out.extend(model.vertices.iter().map(|&v| {
        let local = if scale == UNIT { v } else { v * scale / UNIT };
        let world = pos + trig::rotate_y(local, orientation);
        project_point(camera, viewport, world)
    }));
}

/// Horizontal frustum test: is `pos` within the view cone either side of
/// straight ahead?
pub fn is_visible(camera: &Camera, pos: IVec3) -> bool {
    let toward = trig::bearing(camera.pos, pos);
    angle_delta(camera.orientation, toward).abs() <= VISIBLE_HALF_ANGLE
}
