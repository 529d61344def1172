//! Collision resolution passes over a frame's pairs.

pub mod arcade;
pub mod impulse;

use log::trace;
use rustc_hash::FxHashSet;

use crate::collision::{CollisionEvent, ContactTracker, Pair, PairKey, Side};
use crate::common::{PhysicsConfig, ResolutionStrategy};
use crate::integration::integrate;
use crate::math::Vec2;
use crate::objects::{get_mutable_body_pair, Body};

/// Runs `config.collision_passes` narrowphase + resolve + apply passes over
/// `pairs`. Pairs that may no longer collide are dropped. Returns the number
/// of distinct pairs that touched in any pass.
pub fn solve(
    bodies: &mut [Body],
    pairs: &mut Vec<Pair>,
    dt: f64,
    config: &PhysicsConfig,
    events: &mut Vec<CollisionEvent>,
    tracker: &mut ContactTracker,
) -> usize {
    let passes = config.collision_passes.max(1);
    let pass_dt = dt / passes as f64;
    let mut touching: FxHashSet<PairKey> = FxHashSet::default();
    let mut touched = vec![false; bodies.len()];

    for pass in 0..passes {
        narrowphase(bodies, pairs);

        touched.iter_mut().for_each(|t| *t = false);
        let mut contacts = 0;
        for pair in pairs.iter() {
            let Some(contact) = pair.contact else {
                continue;
            };
            let Some((a, b)) = get_mutable_body_pair(bodies, pair.index_a, pair.index_b) else {
                continue;
            };

            let side = Side::from_direction(contact.mtv);
            pre_collision(events, a, b, side, &contact.mtv);
            match config.resolution_strategy {
                ResolutionStrategy::Box => arcade::resolve(a, b, &contact, side),
                ResolutionStrategy::RigidBody => impulse::resolve(a, b, &contact, config),
            }

            touched[pair.index_a] = true;
            touched[pair.index_b] = true;
            touching.insert(pair.key);
            tracker.report(pair.key);
            contacts += 1;
        }
        trace!("collision pass {pass}: {contacts} contacts");

        for (body, _) in bodies.iter_mut().zip(&touched).filter(|(_, t)| **t) {
            body.apply_mtv();
            integrate(body, config.gravity, pass_dt * config.collision_shift);
            body.recalc();
        }
    }

    touching.len()
}

/// Drops pairs that can no longer collide and refreshes every contact.
pub fn narrowphase(bodies: &[Body], pairs: &mut Vec<Pair>) {
    pairs.retain(|pair| Pair::can_collide(&bodies[pair.index_a], &bodies[pair.index_b]));
    for pair in pairs.iter_mut() {
        pair.collide(&bodies[pair.index_a], &bodies[pair.index_b]);
    }
}

fn pre_collision(events: &mut Vec<CollisionEvent>, a: &Body, b: &Body, side: Side, mtv: &Vec2) {
    events.push(CollisionEvent::PreCollision {
        target: a.id(),
        other: b.id(),
        side,
        intersection: *mtv,
    });
    events.push(CollisionEvent::PreCollision {
        target: b.id(),
        other: a.id(),
        side: side.opposite(),
        intersection: -*mtv,
    });
}
