//! Simulation tick
//!
//! Advances the world by exactly one step: player, tank brain, projectiles
//! and debris, sparks, then culling and the tank respawn check.

use glam::IVec3;
use rand::Rng;

use super::collision::{Mover, ProjectileHit, movement_blocked, projectile_hit};
use super::particles::{explosion, update_debris, update_sparks};
use super::state::{Parent, World};
use super::tank;
use crate::consts::*;
use crate::normalize_angle;

/// Latched player commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
}

/// Advance the world by one tick
pub fn tick<R: Rng>(world: &mut World, input: &TickInput, rng: &mut R, now_ms: u64) {
    world.ticks += 1;
    world.player_hit = false;

    update_player(world, input);
    tank::think(world, now_ms);

    // Objects spawned during this pass (debris, shells) start moving next tick
    let count = world.objects.len();
    for i in 0..count {
        let obj = &world.objects[i];
        if obj.alive <= 0 {
            continue;
        }
        if obj.is_shell() {
            update_shell(world, rng, i);
        } else if obj.model.is_chunk() {
            update_debris(&mut world.objects[i]);
        }
    }

    update_sparks(world);
    world.cull();
    tank::ensure_tank(world, rng);
}

fn update_player(world: &mut World, input: &TickInput) {
    let camera = &mut world.camera;
    if input.turn_left {
        camera.orientation = normalize_angle(camera.orientation + PLAYER_TURN);
    }
    if input.turn_right {
        camera.orientation = normalize_angle(camera.orientation - PLAYER_TURN);
    }

    if camera.is_airborne() {
        camera.pos += camera.vel;
        camera.vel.y -= GRAVITY;
        if camera.pos.y <= camera.ground_height {
            camera.pos.y = camera.ground_height;
            camera.vel = IVec3::ZERO;
        }
    } else if input.forward != input.backward {
        let step = camera.heading(PLAYER_STEP);
        let next = if input.forward {
            camera.pos + step
        } else {
            camera.pos - step
        };
        if !movement_blocked(world, next, Mover::Player) {
            world.camera.pos = next;
        }
    }

    if input.fire {
        let muzzle = IVec3::new(world.camera.pos.x, SHELL_HEIGHT, world.camera.pos.z);
        let orientation = world.camera.orientation;
        if world
            .spawn_shell(muzzle, orientation, Parent::Player)
            .is_none()
        {
            log::trace!("Player shot dropped, registry full");
        }
    }
}

fn update_shell<R: Rng>(world: &mut World, rng: &mut R, index: usize) {
    let shell = &mut world.objects[index];
    shell.pos += shell.vel;
    shell.alive -= 1;
    let shell_pos = shell.pos;
    let shell_vel = shell.vel;

    match projectile_hit(world, index) {
        ProjectileHit::Miss => {}
        ProjectileHit::Object(target) => {
            world.objects[index].alive = 0;
            let victim = &mut world.objects[target];
            if victim.is_tank() {
                victim.alive = 0;
                let origin = IVec3::new(victim.pos.x, SHELL_HEIGHT, victim.pos.z);
                world.kills += 1;
                log::info!("Enemy tank destroyed (kills: {})", world.kills);
                explosion(
                    world,
                    rng,
                    origin,
                    TANK_EXPLOSION_SPARKS,
                    TANK_EXPLOSION_CHUNKS,
                );
            } else {
                // Shells meeting in flight destroy each other
                if victim.is_shell() {
                    victim.alive = 0;
                }
                explosion(world, rng, shell_pos, SHELL_EXPLOSION_SPARKS, 0);
            }
        }
        ProjectileHit::Player => {
            world.objects[index].alive = 0;
            world.player_hit = true;
            world.deaths += 1;
            world.camera.vel = IVec3::new(shell_vel.x / 2, KNOCKBACK_LIFT, shell_vel.z / 2);
            log::info!("Player hit (deaths: {})", world.deaths);
        }
    }
}
