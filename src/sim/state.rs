//! World state and core simulation types
//!
//! Everything the simulation mutates lives in `World`, passed explicitly to
//! every operation.

use glam::IVec3;
use rand::Rng;

use super::registry::{ObjectId, ObjectRegistry, SparkRegistry};
use super::tank::{self, TankBrain};
use crate::consts::*;
use crate::models::ModelId;
use crate::settings::Settings;
use crate::trig;

/// Packed 0xRRGGBB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const GREEN: Color = Color(0x33FF33);
    pub const DARK_GREEN: Color = Color(0x117711);
    pub const RED: Color = Color(0xFF3333);
    pub const YELLOW: Color = Color(0xFFFF55);
    pub const ORANGE: Color = Color(0xFF9922);
    pub const CYAN: Color = Color(0x33FFFF);
    pub const MAGENTA: Color = Color(0xFF33FF);

    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

/// Who fired a shell, so it never collides with its creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parent {
    #[default]
    None,
    Player,
    Object(ObjectId),
}

/// A dynamic entity: obstacle, tank, shell or debris chunk
#[derive(Debug, Clone)]
pub struct GameObject {
    /// Assigned by the registry on insertion
    pub id: Option<ObjectId>,
    pub pos: IVec3,
    /// Orientation units, always in [0, 128)
    pub orientation: i32,
    /// Model scale, `UNIT` = 1:1
    pub scale: i32,
    /// <= 0 means remove at end of tick; doubles as remaining lifetime
    pub alive: i32,
    pub vel: IVec3,
    pub parent: Parent,
    pub color: Color,
    pub model: ModelId,
}

impl GameObject {
    pub fn new(model: ModelId, pos: IVec3) -> Self {
        Self {
            id: None,
            pos,
            orientation: 0,
            scale: UNIT,
            alive: 1,
            vel: IVec3::ZERO,
            parent: Parent::None,
            color: Color::GREEN,
            model,
        }
    }

    pub fn tank(pos: IVec3, orientation: i32) -> Self {
        Self {
            orientation: crate::normalize_angle(orientation),
            color: Color::CYAN,
            ..Self::new(ModelId::Tank, pos)
        }
    }

    /// A shell leaving `pos` along `orientation`'s heading
    pub fn shell(pos: IVec3, orientation: i32, parent: Parent) -> Self {
        let orientation = crate::normalize_angle(orientation);
        Self {
            orientation,
            alive: SHELL_LIFETIME,
            vel: trig::heading(orientation, SHELL_SPEED),
            parent,
            color: Color::YELLOW,
            ..Self::new(ModelId::Shell, pos)
        }
    }

    #[inline]
    pub fn is_tank(&self) -> bool {
        self.model == ModelId::Tank
    }

    #[inline]
    pub fn is_shell(&self) -> bool {
        self.model == ModelId::Shell
    }
}

/// A single point particle
#[derive(Debug, Clone)]
pub struct Spark {
    pub pos: IVec3,
    pub vel: IVec3,
    /// Remaining life in ticks
    pub life: i32,
}

impl Spark {
    pub fn new(pos: IVec3, vel: IVec3, life: i32) -> Self {
        Self { pos, vel, life }
    }
}

/// The player's viewpoint
#[derive(Debug, Clone)]
pub struct Camera {
    pub pos: IVec3,
    /// Only non-zero while airborne after being hit
    pub vel: IVec3,
    pub orientation: i32,
    /// Projection focal length in pixels
    pub eye_distance: i32,
    /// Resting eye height
    pub ground_height: i32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: IVec3::new(0, CAMERA_HEIGHT, 0),
            vel: IVec3::ZERO,
            orientation: 0,
            eye_distance: EYE_DISTANCE,
            ground_height: CAMERA_HEIGHT,
        }
    }
}

impl Camera {
    /// Fixed-point step of `distance` units along the view direction
    #[inline]
    pub fn heading(&self, distance: i32) -> IVec3 {
        trig::heading(self.orientation, distance)
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.vel != IVec3::ZERO || self.pos.y > self.ground_height
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Default)]
pub struct World {
    pub objects: ObjectRegistry,
    pub sparks: SparkRegistry,
    pub camera: Camera,
    pub brain: TankBrain,
    /// Set for the single frame in which the player was hit
    pub player_hit: bool,
    pub kills: u32,
    pub deaths: u32,
    pub ticks: u64,
}

impl World {
    /// Empty field with the camera at the origin
    pub fn empty() -> Self {
        Self::default()
    }

    /// Populate a field with obstacles and one enemy tank
    pub fn new<R: Rng>(settings: &Settings, rng: &mut R) -> Self {
        let mut world = Self::empty();
        world.camera.eye_distance = settings.eye_distance;

        let mut placed = 0;
        while placed < settings.obstacle_count && !world.objects.is_full() {
            let pos = IVec3::new(
                rng.random_range(-FIELD_HALF_SIZE..=FIELD_HALF_SIZE),
                0,
                rng.random_range(-FIELD_HALF_SIZE..=FIELD_HALF_SIZE),
            );
            if crate::manhattan_xz(pos, world.camera.pos) < SPAWN_CLEARANCE {
                continue;
            }
            let model = ModelId::OBSTACLES[rng.random_range(0..ModelId::OBSTACLES.len())];
            world.spawn_obstacle(model, pos);
            placed += 1;
        }

        tank::respawn(&mut world, rng);
        log::info!(
            "World ready: {} obstacles, {} objects total",
            placed,
            world.objects.len()
        );
        world
    }

    pub fn spawn_obstacle(&mut self, model: ModelId, pos: IVec3) -> Option<ObjectId> {
        self.objects
            .add(GameObject::new(model, pos))
            .map(|(id, _)| id)
    }

    /// Add a tank and hand it to the brain, which restarts from idle
    pub fn spawn_tank(&mut self, pos: IVec3, orientation: i32) -> Option<ObjectId> {
        let (id, _) = self.objects.add(GameObject::tank(pos, orientation))?;
        self.brain = TankBrain::controlling(id);
        log::debug!("Tank spawned at ({}, {})", pos.x / UNIT, pos.z / UNIT);
        Some(id)
    }

    /// Fire a shell; silently dropped when the registry is full
    pub fn spawn_shell(&mut self, pos: IVec3, orientation: i32, parent: Parent) -> Option<ObjectId> {
        self.objects
            .add(GameObject::shell(pos, orientation, parent))
            .map(|(id, _)| id)
    }

    pub fn tank_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_tank()).count()
    }

    /// Remove every object and spark whose life ran out
    pub fn cull(&mut self) {
        self.objects.cull();
        self.sparks.cull();
    }
}
