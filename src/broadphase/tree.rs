use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{is_candidate, CollisionBroadphase, DynamicTree};
use crate::collision::{Pair, PairKey, AABB};
use crate::common::PhysicsConfig;
use crate::debug::DebugSurface;
use crate::error::CollisionError;
use crate::math::{Ray, Vec2};
use crate::objects::{Body, BodyId, CollisionType};
use crate::world::FrameStats;

/// Broadphase backed by a [`DynamicTree`], with a ray-cast sweep that stops
/// fast bodies from tunneling through thin obstacles.
#[derive(Debug)]
pub struct DynamicTreeBroadphase {
    tree: DynamicTree,
    collision_hash: FxHashSet<PairKey>,
}

impl DynamicTreeBroadphase {
    pub fn new(world_bounds: AABB) -> Self {
        Self {
            tree: DynamicTree::new(world_bounds),
            collision_hash: FxHashSet::default(),
        }
    }

    pub fn tree(&self) -> &DynamicTree {
        &self.tree
    }
}

impl Default for DynamicTreeBroadphase {
    fn default() -> Self {
        Self::new(AABB::everything())
    }
}

/// Distance a body may cover in `dt` at its current velocity and acceleration.
fn travel_distance(body: &Body, dt: f64) -> f64 {
    body.velocity.magnitude() * dt + 0.5 * body.acceleration.magnitude() * dt * dt
}

fn is_fast(body: &Body, travel: f64, config: &PhysicsConfig) -> bool {
    let bounds = body.bounds();
    let min_dimension = bounds.width().min(bounds.height());
    config.disable_minimum_speed_for_fast_body || travel > min_dimension / 2.0
}

impl CollisionBroadphase for DynamicTreeBroadphase {
    fn track(&mut self, body: &Body, config: &PhysicsConfig) -> Result<(), CollisionError> {
        self.tree.track_body(body, config.bounds_padding)
    }

    fn untrack(&mut self, id: BodyId) -> Result<bool, CollisionError> {
        self.tree.untrack_body(id)
    }

    fn update(&mut self, bodies: &[Body], config: &PhysicsConfig) -> Result<usize, CollisionError> {
        self.tree.set_world_bounds(config.world_bounds);
        let mut updated = 0;
        for body in bodies {
            if !self.tree.contains(body.id()) {
                continue;
            }
            if body.is_killed() {
                debug!("body {} was killed, removing it from the dynamic tree", body.id());
                self.tree.untrack_body(body.id())?;
                continue;
            }
            if self.tree.update_body(body, config)? {
                updated += 1;
            }
        }
        Ok(updated)
    }

    fn broadphase(
        &mut self,
        bodies: &mut [Body],
        dt: f64,
        config: &PhysicsConfig,
        stats: &mut FrameStats,
    ) -> Result<Vec<Pair>, CollisionError> {
        let Self { tree, collision_hash } = self;
        collision_hash.clear();

        let index: FxHashMap<BodyId, usize> = bodies.iter().enumerate().map(|(i, b)| (b.id(), i)).collect();
        let mut pairs = Vec::new();

        for (i, body) in bodies.iter().enumerate() {
            if !is_candidate(body) {
                continue;
            }
            tree.query(body, |other_id| {
                let Some(&j) = index.get(&other_id) else {
                    return;
                };
                let other = &bodies[j];
                if Pair::can_collide(body, other) && collision_hash.insert(PairKey::new(body.id(), other_id)) {
                    pairs.push(Pair::new(body, i, other, j));
                }
            });
        }
        stats.pairs = pairs.len();

        if !config.check_for_fast_bodies {
            trace!("tree broadphase produced {} pairs", pairs.len());
            return Ok(pairs);
        }

        let epsilon = config.surface_epsilon;
        for i in 0..bodies.len() {
            let body = &bodies[i];
            if body.is_killed() || body.collision_type != CollisionType::Active {
                continue;
            }
            let travel = travel_distance(body, dt);
            if body.velocity == Vec2::ZERO || !is_fast(body, travel, config) {
                continue;
            }
            stats.fast_bodies += 1;

            // Integration already happened, so sweep from where the leading
            // point was at the start of the frame.
            let update_vec = body.position - body.old_position;
            let furthest = body.shape.support_point(body.velocity);
            let origin = furthest - update_vec;
            let mut ray = Ray::new(origin, body.velocity);
            ray.origin = ray.origin - ray.dir * (2.0 * epsilon);

            let mut nearest: Option<(usize, Vec2)> = None;
            tree.ray_cast_query(&ray, travel + 2.0 * epsilon, |other_id| {
                let Some(&j) = index.get(&other_id) else {
                    return false;
                };
                let other = &bodies[j];
                if !Pair::can_collide(body, other) {
                    return false;
                }
                if let Some(hit) = other.shape.ray_cast(&ray, travel + 10.0 * epsilon) {
                    let translate = hit - origin;
                    let closer = nearest.map_or(true, |(_, best)| translate.magnitude() < best.magnitude());
                    if closer {
                        nearest = Some((j, translate));
                    }
                }
                false
            });

            let Some((j, translate)) = nearest else {
                continue;
            };
            if !translate.is_valid() {
                continue;
            }

            if collision_hash.insert(PairKey::new(body.id(), bodies[j].id())) {
                pairs.push(Pair::new(body, i, &bodies[j], j));
            }

            let shift = body.position - furthest;
            let other_id = bodies[j].id();
            let fast = &mut bodies[i];
            fast.position = origin + shift + translate + ray.dir * (2.0 * epsilon);
            fast.recalc();
            stats.fast_body_collisions += 1;
            debug!("fast body {} swept into body {other_id}, moved to {:?}", fast.id(), fast.position);
        }

        trace!("tree broadphase produced {} pairs", pairs.len());
        Ok(pairs)
    }

    fn debug_draw(&self, surface: &mut dyn DebugSurface) {
        self.tree.debug_draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon};
    const EPSILON: f64 = 1e-9;

    fn circle_at(x: f64, radius: f64) -> Body {
        Body::new(Circle::new(radius).unwrap().into()).with_position(Vec2::new(x, 0.0))
    }

    fn wall_at(x: f64, width: f64) -> Body {
        Body::new(Polygon::rectangle(width, 10.0).unwrap().into())
            .with_position(Vec2::new(x, 0.0))
            .with_collision_type(CollisionType::Fixed)
    }

    fn tracked(bodies: &[Body], config: &PhysicsConfig) -> DynamicTreeBroadphase {
        let mut broadphase = DynamicTreeBroadphase::default();
        for body in bodies {
            broadphase.track(body, config).unwrap();
        }
        broadphase
    }

    #[test]
    fn test_pairs_are_deduplicated() {
        let config = PhysicsConfig {
            check_for_fast_bodies: false,
            ..PhysicsConfig::default()
        };
        let mut bodies = vec![circle_at(0.0, 1.0), circle_at(1.5, 1.0)];
        let mut broadphase = tracked(&bodies, &config);
        let mut stats = FrameStats::default();
        let pairs = broadphase.broadphase(&mut bodies, 0.016, &config, &mut stats).unwrap();

        // Both bodies find each other, only one pair survives.
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].key, PairKey::new(bodies[1].id(), bodies[0].id()));
        assert_eq!(stats.pairs, 1);
    }

    #[test]
    fn test_no_pairs_between_fixed_bodies() {
        let config = PhysicsConfig::default();
        let mut bodies = vec![wall_at(0.0, 4.0), wall_at(2.0, 4.0)];
        let mut broadphase = tracked(&bodies, &config);
        let pairs = broadphase
            .broadphase(&mut bodies, 0.016, &config, &mut FrameStats::default())
            .unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_killed_bodies_are_skipped() {
        let config = PhysicsConfig::default();
        let mut bodies = vec![circle_at(0.0, 1.0), circle_at(1.0, 1.0)];
        let mut broadphase = tracked(&bodies, &config);
        bodies[1].kill();
        let pairs = broadphase
            .broadphase(&mut bodies, 0.016, &config, &mut FrameStats::default())
            .unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_update_drops_killed_bodies_from_tree() {
        let config = PhysicsConfig::default();
        let mut bodies = vec![circle_at(0.0, 1.0), circle_at(1.0, 1.0)];
        let mut broadphase = tracked(&bodies, &config);
        bodies[1].kill();

        assert_eq!(broadphase.update(&bodies, &config).unwrap(), 0);
        assert!(!broadphase.tree().contains(bodies[1].id()));
        assert_eq!(broadphase.tree().len(), 1);
        broadphase.tree().validate().unwrap();

        // Later frames leave the tree alone.
        assert_eq!(broadphase.update(&bodies, &config).unwrap(), 0);
        assert_eq!(broadphase.tree().len(), 1);
    }

    #[test]
    fn test_update_counts_reinsertions() {
        let config = PhysicsConfig::default();
        let mut bodies = vec![circle_at(0.0, 1.0), circle_at(100.0, 1.0)];
        let mut broadphase = tracked(&bodies, &config);

        assert_eq!(broadphase.update(&bodies, &config).unwrap(), 0);
        bodies[0].position = Vec2::new(50.0, 0.0);
        bodies[0].recalc();
        assert_eq!(broadphase.update(&bodies, &config).unwrap(), 1);
        broadphase.tree().validate().unwrap();
    }

    #[test]
    fn test_fast_body_is_swept_back_to_the_wall() {
        let config = PhysicsConfig::default();
        // A thin wall that the circle skips over entirely in one frame.
        let mut bodies = vec![
            circle_at(0.0, 5.0).with_velocity(Vec2::new(300.0, 0.0)),
            wall_at(20.0, 4.0),
        ];
        let mut broadphase = tracked(&bodies, &config);

        let dt = 0.1;
        bodies[0].capture_old_transform();
        bodies[0].position = Vec2::new(30.0, 0.0);
        bodies[0].recalc();
        broadphase.update(&bodies, &config).unwrap();

        let mut stats = FrameStats::default();
        let pairs = broadphase.broadphase(&mut bodies, dt, &config, &mut stats).unwrap();

        assert_eq!(stats.fast_bodies, 1);
        assert_eq!(stats.fast_body_collisions, 1);
        assert_eq!(pairs.len(), 1);
        // Leading point lands 2 * surface_epsilon past the wall's face at x = 18.
        assert!((bodies[0].position.x - 13.2).abs() < EPSILON, "x={}", bodies[0].position.x);
        assert!((bodies[0].bounds().right - 18.2).abs() < EPSILON);
    }

    #[test]
    fn test_slow_body_is_not_swept() {
        let config = PhysicsConfig::default();
        let mut bodies = vec![circle_at(0.0, 5.0).with_velocity(Vec2::new(10.0, 0.0)), wall_at(20.0, 4.0)];
        let mut broadphase = tracked(&bodies, &config);
        bodies[0].capture_old_transform();
        bodies[0].position = Vec2::new(1.0, 0.0);
        bodies[0].recalc();

        let mut stats = FrameStats::default();
        broadphase.broadphase(&mut bodies, 0.1, &config, &mut stats).unwrap();
        assert_eq!(stats.fast_bodies, 0);
        assert_eq!(bodies[0].position, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_fast_body_sweep_can_be_disabled() {
        let config = PhysicsConfig {
            check_for_fast_bodies: false,
            ..PhysicsConfig::default()
        };
        let mut bodies = vec![circle_at(0.0, 5.0).with_velocity(Vec2::new(300.0, 0.0)), wall_at(20.0, 4.0)];
        let mut broadphase = tracked(&bodies, &config);
        bodies[0].capture_old_transform();
        bodies[0].position = Vec2::new(30.0, 0.0);
        bodies[0].recalc();

        let mut stats = FrameStats::default();
        broadphase.broadphase(&mut bodies, 0.1, &config, &mut stats).unwrap();
        assert_eq!(stats.fast_bodies, 0);
        assert_eq!(bodies[0].position, Vec2::new(30.0, 0.0));
    }
}
