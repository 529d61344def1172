//! Candidate pair generation.

pub mod dynamic_tree;
pub mod naive;
pub mod tree;

pub use dynamic_tree::{DynamicTree, NodeId, TreeNode};
pub use naive::NaiveBroadphase;
pub use tree::DynamicTreeBroadphase;

use crate::collision::Pair;
use crate::common::{BroadphaseStrategy, PhysicsConfig};
use crate::debug::DebugSurface;
use crate::error::CollisionError;
use crate::objects::{Body, BodyId, CollisionType};
use crate::world::FrameStats;

/// A strategy for finding the pairs of bodies that might be touching.
pub trait CollisionBroadphase {
    /// Starts tracking a body.
    fn track(&mut self, body: &Body, config: &PhysicsConfig) -> Result<(), CollisionError>;

    /// Stops tracking a body. Returns false if it was not tracked.
    fn untrack(&mut self, id: BodyId) -> Result<bool, CollisionError>;

    /// Refreshes tracked bodies after they moved. Returns the number of
    /// index updates performed.
    fn update(&mut self, bodies: &[Body], config: &PhysicsConfig) -> Result<usize, CollisionError>;

    /// Builds this frame's deduplicated pairs. May move fast bodies back to
    /// the point where they would have hit something.
    fn broadphase(
        &mut self,
        bodies: &mut [Body],
        dt: f64,
        config: &PhysicsConfig,
        stats: &mut FrameStats,
    ) -> Result<Vec<Pair>, CollisionError>;

    fn debug_draw(&self, _surface: &mut dyn DebugSurface) {}
}

/// Builds the broadphase selected by `config`.
pub fn create_broadphase(config: &PhysicsConfig) -> Box<dyn CollisionBroadphase> {
    match config.broadphase_strategy {
        BroadphaseStrategy::Naive => Box::new(NaiveBroadphase::new()),
        BroadphaseStrategy::DynamicTree => Box::new(DynamicTreeBroadphase::new(config.world_bounds)),
    }
}

/// Bodies that take part in the broadphase at all.
pub(crate) fn is_candidate(body: &Body) -> bool {
    !body.is_killed() && body.collision_type != CollisionType::PreventCollision
}
