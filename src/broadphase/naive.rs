use log::trace;
use rustc_hash::FxHashSet;

use super::{is_candidate, CollisionBroadphase};
use crate::collision::{Pair, PairKey};
use crate::common::PhysicsConfig;
use crate::error::CollisionError;
use crate::objects::{Body, BodyId};
use crate::world::FrameStats;

/// Tests the bounds of every pair of bodies. Keeps no index, so tracking is
/// free and there is no fast-body sweep.
#[derive(Debug, Default)]
pub struct NaiveBroadphase {
    collision_hash: FxHashSet<PairKey>,
}

impl NaiveBroadphase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollisionBroadphase for NaiveBroadphase {
    fn track(&mut self, _body: &Body, _config: &PhysicsConfig) -> Result<(), CollisionError> {
        Ok(())
    }

    fn untrack(&mut self, _id: BodyId) -> Result<bool, CollisionError> {
        Ok(true)
    }

    fn update(&mut self, _bodies: &[Body], _config: &PhysicsConfig) -> Result<usize, CollisionError> {
        Ok(0)
    }

    fn broadphase(
        &mut self,
        bodies: &mut [Body],
        _dt: f64,
        _config: &PhysicsConfig,
        stats: &mut FrameStats,
    ) -> Result<Vec<Pair>, CollisionError> {
        self.collision_hash.clear();
        let mut pairs = Vec::new();

        for i in 0..bodies.len() {
            let a = &bodies[i];
            if !is_candidate(a) {
                continue;
            }
            for (j, b) in bodies.iter().enumerate().skip(i + 1) {
                if !Pair::can_collide(a, b) || !a.bounds().overlaps(&b.bounds()) {
                    continue;
                }
                if self.collision_hash.insert(PairKey::new(a.id(), b.id())) {
                    pairs.push(Pair::new(a, i, b, j));
                }
            }
        }

        stats.pairs = pairs.len();
        trace!("naive broadphase produced {} pairs", pairs.len());
        Ok(pairs)
    }
}
