//! Tanx - an integer-only 3D wireframe tank battle
//!
//! Core modules:
//! - `trig`: Fixed-point sine/cosine/arctan2 lookup tables
//! - `models`: Wireframe model catalogue
//! - `sim`: Deterministic simulation (registries, collision, particles, tank AI)
//! - `renderer`: Software projection and line rasterization
//! - `platform`: Clock and input latching
//! - `game`: Frame driver tying it all together

pub mod game;
pub mod models;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod trig;

pub use game::{FrameStatus, Game};
pub use settings::{Settings, SettingsError};

use glam::IVec3;

/// Game configuration constants
///
/// Distances are fixed-point (`UNIT` = one world unit), angles are in
/// orientation units (`ANGLE_STEPS` per full turn).
pub mod consts {
    /// One world unit in fixed-point
    pub const UNIT: i32 = 256;
    /// Orientation units per full turn
    pub const ANGLE_STEPS: i32 = 128;
    /// A quarter turn
    pub const QUARTER_TURN: i32 = ANGLE_STEPS / 4;

    /// Registry capacities
    pub const MAX_OBJECTS: usize = 100;
    pub const MAX_SPARKS: usize = 100;

    /// Camera eye height above the ground plane
    pub const CAMERA_HEIGHT: i32 = 3 * UNIT;
    /// Default projection focal length (pixels)
    pub const EYE_DISTANCE: i32 = 400;

    /// Half the side of the square play field
    pub const FIELD_HALF_SIZE: i32 = 400 * UNIT;
    /// Obstacles keep this far from the player's start
    pub const SPAWN_CLEARANCE: i32 = 40 * UNIT;

    /// Square hit-box half-widths
    pub const PROJECTILE_HIT_DISTANCE: i32 = 8 * UNIT;
    pub const MOVEMENT_HIT_DISTANCE: i32 = 15 * UNIT;

    /// Player movement
    pub const PLAYER_STEP: i32 = 1;
    pub const PLAYER_TURN: i32 = 2;
    /// Upward kick when the player is hit (per tick)
    pub const KNOCKBACK_LIFT: i32 = 3 * UNIT;

    /// Shells
    pub const SHELL_SPEED: i32 = 4;
    pub const SHELL_LIFETIME: i32 = 100;
    pub const SHELL_HEIGHT: i32 = 2 * UNIT;

    /// Shared vertical acceleration for sparks, debris and the airborne camera
    pub const GRAVITY: i32 = 20;
    /// Sparks die above this height
    pub const SPARK_CEILING: i32 = 40 * UNIT;
    /// Spark lifetime range in ticks (inclusive)
    pub const SPARK_LIFE_MIN: i32 = 50;
    pub const SPARK_LIFE_MAX: i32 = 80;
    /// Debris lifetime range in ticks (inclusive)
    pub const DEBRIS_LIFE_MIN: i32 = 150;
    pub const DEBRIS_LIFE_MAX: i32 = 180;

    /// Explosion sizes
    pub const TANK_EXPLOSION_SPARKS: usize = 40;
    pub const TANK_EXPLOSION_CHUNKS: usize = 8;
    pub const SHELL_EXPLOSION_SPARKS: usize = 15;

    /// Horizontal visibility half-width (orientation units)
    pub const VISIBLE_HALF_ANGLE: i32 = 18;
}

/// Normalize an orientation to [0, 128)
#[inline]
pub fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(consts::ANGLE_STEPS)
}

/// Signed shortest turn from `from` to `to`, in (-64, 64]
#[inline]
pub fn angle_delta(from: i32, to: i32) -> i32 {
    let delta = normalize_angle(to - from);
    if delta > consts::ANGLE_STEPS / 2 {
        delta - consts::ANGLE_STEPS
    } else {
        delta
    }
}

/// Manhattan distance over the horizontal plane
#[inline]
pub fn manhattan_xz(a: IVec3, b: IVec3) -> i32 {
    (a.x - b.x).abs() + (a.z - b.z).abs()
}
