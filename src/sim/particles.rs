//! Sparks and debris
//!
//! Sparks live in their own store; debris chunks are ordinary objects using
//! one of the chunk models. Both integrate position += velocity once per tick
//! but apply `GRAVITY` with opposite signs: sparks drift up until they reach
//! the ceiling, debris falls until it sinks below the ground.

use glam::IVec3;
use rand::Rng;

use super::state::{Color, GameObject, Spark, World};
use crate::consts::*;
use crate::models::ModelId;

/// How many of each were actually spawned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplosionReport {
    pub sparks: usize,
    pub chunks: usize,
}

/// Burst of `spark_count` sparks and `chunk_count` debris chunks at `origin`.
///
/// Anything that does not fit in its store is silently dropped.
pub fn explosion<R: Rng>(
    world: &mut World,
    rng: &mut R,
    origin: IVec3,
    spark_count: usize,
    chunk_count: usize,
) -> ExplosionReport {
    let mut report = ExplosionReport::default();

    for _ in 0..spark_count {
        let vel = IVec3::new(
            rng.random_range(-UNIT..=UNIT),
            rng.random_range(-UNIT..=UNIT),
            rng.random_range(-UNIT..=UNIT),
        );
        let life = rng.random_range(SPARK_LIFE_MIN..=SPARK_LIFE_MAX);
        if world.sparks.add(Spark::new(origin, vel, life)) {
            report.sparks += 1;
        }
    }

    for _ in 0..chunk_count {
        let model = ModelId::CHUNKS[rng.random_range(0..ModelId::CHUNKS.len())];
        let chunk = GameObject {
            orientation: rng.random_range(0..ANGLE_STEPS),
            alive: rng.random_range(DEBRIS_LIFE_MIN..=DEBRIS_LIFE_MAX),
            vel: IVec3::new(
                rng.random_range(-UNIT..=UNIT),
                rng.random_range(UNIT..=3 * UNIT),
                rng.random_range(-UNIT..=UNIT),
            ),
            color: Color::ORANGE,
            ..GameObject::new(model, origin)
        };
        if world.objects.add(chunk).is_some() {
            report.chunks += 1;
        }
    }

    if report.sparks < spark_count || report.chunks < chunk_count {
        log::trace!(
            "Explosion truncated: {}/{} sparks, {}/{} chunks",
            report.sparks,
            spark_count,
            report.chunks,
            chunk_count
        );
    }
    report
}

/// Advance every spark by one tick
pub fn update_sparks(world: &mut World) {
    for spark in world.sparks.iter_mut() {
        spark.pos += spark.vel;
        spark.vel.y += GRAVITY;
        spark.life -= 1;
        if spark.pos.y > SPARK_CEILING {
            spark.life = 0;
        }
    }
}

/// Advance a debris chunk by one tick
pub fn update_debris(chunk: &mut GameObject) {
    chunk.pos += chunk.vel;
    chunk.vel.y -= GRAVITY;
    chunk.alive -= 1;
    if chunk.pos.y < 0 {
        chunk.alive = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::Xorshift32;

    #[test]
    fn test_explosion_counts() {
        let mut world = World::empty();
        let mut rng = Xorshift32::new(99);
        let report = explosion(&mut world, &mut rng, IVec3::new(0, UNIT, 0), 4, 2);

        assert_eq!(report, ExplosionReport { sparks: 4, chunks: 2 });
        assert_eq!(world.sparks.len(), 4);
        assert_eq!(world.objects.len(), 2);
        for obj in world.objects.iter() {
            assert!(obj.model.is_chunk());
            assert!((DEBRIS_LIFE_MIN..=DEBRIS_LIFE_MAX).contains(&obj.alive));
        }
        for spark in world.sparks.iter() {
            assert!((SPARK_LIFE_MIN..=SPARK_LIFE_MAX).contains(&spark.life));
        }
    }

    #[test]
    fn test_explosion_respects_capacity() {
        let mut world = World::empty();
        let mut rng = Xorshift32::new(5);
        let report = explosion(&mut world, &mut rng, IVec3::ZERO, MAX_SPARKS + 10, 0);
        assert_eq!(report.sparks, MAX_SPARKS);
        assert_eq!(world.sparks.len(), MAX_SPARKS);
    }

    #[test]
    fn test_debris_expires_within_lifetime() {
        let mut world = World::empty();
        let mut rng = Xorshift32::new(31337);
        explosion(&mut world, &mut rng, IVec3::new(0, 2 * UNIT, 0), 0, 6);

        for _ in 0..DEBRIS_LIFE_MAX {
            for chunk in world.objects.iter_mut() {
                if chunk.alive > 0 {
                    update_debris(chunk);
                }
            }
        }
        assert!(world.objects.iter().all(|o| o.alive <= 0));
    }

    #[test]
    fn test_debris_falls_and_sparks_rise() {
        let mut chunk = GameObject::new(ModelId::ChunkA, IVec3::new(0, 10 * UNIT, 0));
        chunk.alive = 100;
        update_debris(&mut chunk);
        assert_eq!(chunk.vel.y, -GRAVITY);

        let mut world = World::empty();
        world.sparks.add(Spark::new(IVec3::ZERO, IVec3::ZERO, 10));
        update_sparks(&mut world);
        assert_eq!(world.sparks.iter().next().map(|s| s.vel.y), Some(GRAVITY));
    }

    #[test]
    fn test_spark_dies_above_ceiling() {
        let mut world = World::empty();
        world.sparks.add(Spark::new(
            IVec3::new(0, SPARK_CEILING, 0),
            IVec3::new(0, UNIT, 0),
            50,
        ));
        update_sparks(&mut world);
        world.cull();
        assert!(world.sparks.is_empty());
    }
}
