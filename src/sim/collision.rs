//! Proximity queries over the object registry
//!
//! Square hit-boxes on the ground plane: two points collide when both their
//! x and z separations are strictly below the threshold. Every query is a
//! linear scan; the registry never holds more than a hundred objects.

use glam::IVec3;

use super::state::{Parent, World};
use crate::consts::{MOVEMENT_HIT_DISTANCE, PROJECTILE_HIT_DISTANCE};

/// Result of checking a projectile against the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    /// Nothing in reach
    Miss,
    /// Dense index of the object that was hit
    Object(usize),
    Player,
}

/// Who is asking to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mover {
    Player,
    /// Dense index of a moving object (the tank)
    Object(usize),
}

/// Independent-axis square overlap test
#[inline]
pub fn within(a: IVec3, b: IVec3, distance: i32) -> bool {
    (a.x - b.x).abs() < distance && (a.z - b.z).abs() < distance
}

/// What the projectile at `index` is touching, if anything.
///
/// Debris chunks, objects already dead this tick and the projectile's own
/// parent are ignored.
pub fn projectile_hit(world: &World, index: usize) -> ProjectileHit {
    let shell = &world.objects[index];

    for (i, obj) in world.objects.iter().enumerate() {
        if i == index || obj.alive <= 0 || obj.model.is_chunk() {
            continue;
        }
        if let Parent::Object(parent) = shell.parent {
            if obj.id == Some(parent) {
                continue;
            }
        }
        if within(shell.pos, obj.pos, PROJECTILE_HIT_DISTANCE) {
            return ProjectileHit::Object(i);
        }
    }

    if shell.parent != Parent::Player
        && within(shell.pos, world.camera.pos, PROJECTILE_HIT_DISTANCE)
    {
        return ProjectileHit::Player;
    }

    ProjectileHit::Miss
}

/// Whether moving `mover` to `pos` would run into something.
///
/// Debris never blocks. Shells fired by the mover itself are ignored; a
/// moving object additionally ignores every shell (those hit it instead) and
/// is blocked by the player.
pub fn movement_blocked(world: &World, pos: IVec3, mover: Mover) -> bool {
    let own_parent = match mover {
        Mover::Player => Parent::Player,
        Mover::Object(i) => world.objects[i]
            .id
            .map(Parent::Object)
            .unwrap_or(Parent::None),
    };

    for (i, obj) in world.objects.iter().enumerate() {
        if obj.alive <= 0 || obj.model.is_chunk() || mover == Mover::Object(i) {
            continue;
        }
        if obj.is_shell() && (matches!(mover, Mover::Object(_)) || obj.parent == own_parent) {
            continue;
        }
        if within(pos, obj.pos, MOVEMENT_HIT_DISTANCE) {
            return true;
        }
    }

    match mover {
        Mover::Object(_) => within(pos, world.camera.pos, MOVEMENT_HIT_DISTANCE),
        Mover::Player => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::UNIT;
    use crate::models::ModelId;
    use crate::sim::state::{Camera, GameObject};
    use proptest::prelude::*;

    fn world_with_cube_at(pos: IVec3) -> World {
        let mut world = World::empty();
        world.spawn_obstacle(ModelId::Cube, pos);
        world
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let d = PROJECTILE_HIT_DISTANCE;
        assert!(!within(IVec3::ZERO, IVec3::new(d, 0, d), d));
        assert!(within(IVec3::ZERO, IVec3::new(d - UNIT, 0, d - UNIT), d));
        // One axis inside is not enough
        assert!(!within(IVec3::ZERO, IVec3::new(0, 0, d), d));
        // Height is ignored
        assert!(within(IVec3::ZERO, IVec3::new(0, 50 * UNIT, 0), d));
    }

    #[test]
    fn test_projectile_hits_obstacle_at_threshold_boundary() {
        let cube = IVec3::new(100 * UNIT, 0, 100 * UNIT);
        let d = PROJECTILE_HIT_DISTANCE;

        let mut world = world_with_cube_at(cube);
        world.spawn_shell(cube + IVec3::new(d, 0, d), 0, Parent::Player);
        assert_eq!(projectile_hit(&world, 1), ProjectileHit::Miss);

        let mut world = world_with_cube_at(cube);
        world.spawn_shell(cube + IVec3::new(d - UNIT, 0, d - UNIT), 0, Parent::Player);
        assert_eq!(projectile_hit(&world, 1), ProjectileHit::Object(0));
    }

    #[test]
    fn test_projectile_skips_parent_and_chunks() {
        let mut world = World::empty();
        let tank = world
            .spawn_tank(IVec3::new(50 * UNIT, 0, 0), 0)
            .unwrap();
        world
            .objects
            .add(GameObject::new(ModelId::ChunkB, IVec3::new(50 * UNIT, 0, 0)));
        world.spawn_shell(IVec3::new(50 * UNIT, 0, 0), 0, Parent::Object(tank));
        assert_eq!(projectile_hit(&world, 2), ProjectileHit::Miss);
    }

    #[test]
    fn test_projectile_hits_player_unless_own() {
        let near = Camera::default().pos + IVec3::new(UNIT, 0, 0);

        let mut stray = World::empty();
        stray.spawn_shell(near, 0, Parent::None);
        assert_eq!(projectile_hit(&stray, 0), ProjectileHit::Player);

        let mut own = World::empty();
        own.spawn_shell(near, 0, Parent::Player);
        assert_eq!(projectile_hit(&own, 0), ProjectileHit::Miss);
    }

    #[test]
    fn test_movement_blocked_by_obstacle() {
        let world = world_with_cube_at(IVec3::new(0, 0, -20 * UNIT));
        assert!(!movement_blocked(&world, IVec3::new(0, 0, -5 * UNIT), Mover::Player));
        assert!(movement_blocked(&world, IVec3::new(0, 0, -6 * UNIT), Mover::Player));
    }

    #[test]
    fn test_tank_ignores_shells_and_itself_but_not_player() {
        let mut world = World::empty();
        world.spawn_tank(IVec3::new(0, 0, -40 * UNIT), 0);
        world.spawn_shell(IVec3::new(-40 * UNIT, 0, 0), 0, Parent::None);

        assert!(!movement_blocked(&world, IVec3::new(-40 * UNIT, 0, -2 * UNIT), Mover::Object(0)));
        assert!(movement_blocked(&world, IVec3::new(0, 0, -14 * UNIT), Mover::Object(0)));
        // The player is blocked by the stray shell
        assert!(movement_blocked(&world, IVec3::new(-40 * UNIT, 0, 0), Mover::Player));
    }

    proptest! {
        #[test]
        fn prop_within_symmetric_and_height_blind(
            ax in -1000i32..1000, az in -1000i32..1000,
            bx in -1000i32..1000, bz in -1000i32..1000,
            ay in -50i32..50, by in -50i32..50,
        ) {
            let a = IVec3::new(ax * UNIT / 8, ay * UNIT, az * UNIT / 8);
            let b = IVec3::new(bx * UNIT / 8, by * UNIT, bz * UNIT / 8);
            let d = MOVEMENT_HIT_DISTANCE;
            prop_assert_eq!(within(a, b, d), within(b, a, d));
            prop_assert_eq!(within(a, b, d), within(a, IVec3::new(b.x, a.y, b.z), d));
        }

        #[test]
        fn prop_obstacle_blocks_only_inside_box(dx in -30i32..=30, dz in -30i32..=30) {
            let world = world_with_cube_at(IVec3::ZERO);
            let pos = IVec3::new(dx * UNIT, 0, dz * UNIT);
            let inside = dx.abs() < 15 && dz.abs() < 15;
            prop_assert_eq!(movement_blocked(&world, pos, Mover::Player), inside);
        }
    }
}
