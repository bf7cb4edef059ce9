//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer arithmetic only
//! - Seeded RNG only
//! - Stable iteration order (dense registry order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod registry;
pub mod rng;
pub mod state;
pub mod tank;
pub mod tick;

pub use collision::{Mover, ProjectileHit, movement_blocked, projectile_hit};
pub use particles::{ExplosionReport, explosion};
pub use registry::{ObjectId, ObjectRegistry, SparkRegistry};
pub use rng::Xorshift32;
pub use state::{Camera, Color, GameObject, Parent, Spark, World};
pub use tank::{TankBrain, TankMode, TankPhase};
pub use tick::{TickInput, tick};
