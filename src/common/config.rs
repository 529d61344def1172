//! Physics configuration, passed by reference into every pipeline stage.

use crate::collision::AABB;
use crate::error::CollisionError;
use crate::math::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How overlapping pairs are pushed apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResolutionStrategy {
    /// Arcade response: positions are corrected directly, velocities are
    /// zeroed or reflected on the impacted axis. No rotation.
    #[default]
    Box,
    /// Impulse response with restitution, friction and angular velocity.
    RigidBody,
}

/// How candidate pairs are found each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BroadphaseStrategy {
    /// Test every pair of bounds.
    Naive,
    /// Query a dynamic AABB tree, with swept handling of fast bodies.
    #[default]
    DynamicTree,
}

/// Debug layers drawn by `PhysicsWorld::debug_draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebugFlags {
    /// Dynamic tree node bounds.
    pub broadphase_debug: bool,
    pub show_contacts: bool,
    pub show_collision_normals: bool,
    pub show_motion_vectors: bool,
    pub show_bounds: bool,
    /// Shape outlines.
    pub show_area: bool,
    /// Polygon side normals, drawn with the outline.
    pub show_normals: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicsConfig {
    /// Acceleration applied to `Active` bodies.
    pub gravity: Vec2,
    /// When false, bodies still integrate but nothing collides.
    pub enabled: bool,
    pub resolution_strategy: ResolutionStrategy,
    pub broadphase_strategy: BroadphaseStrategy,
    /// Narrowphase/resolve passes per frame.
    pub collision_passes: usize,
    /// Mass given to new bodies.
    pub default_mass: f64,
    pub allow_rigid_body_rotation: bool,
    /// Margin added around tight bounds when a body is (re)inserted in the tree.
    pub bounds_padding: f64,
    /// Scales the velocity look-ahead added to fat bounds.
    pub dynamic_tree_velocity_multiplier: f64,
    /// Fraction of the pass time integrated after each resolution pass.
    pub collision_shift: f64,
    /// Tolerance used when backing fast-body rays up and teleporting.
    pub surface_epsilon: f64,
    pub check_for_fast_bodies: bool,
    /// Treat every active body as fast regardless of speed.
    pub disable_minimum_speed_for_fast_body: bool,
    /// Bodies leaving these bounds are removed from the tree.
    pub world_bounds: AABB,
    pub debug: DebugFlags,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            enabled: true,
            resolution_strategy: ResolutionStrategy::Box,
            broadphase_strategy: BroadphaseStrategy::DynamicTree,
            collision_passes: 5,
            default_mass: 10.0,
            allow_rigid_body_rotation: true,
            bounds_padding: 5.0,
            dynamic_tree_velocity_multiplier: 2.0,
            collision_shift: 0.001,
            surface_epsilon: 0.1,
            check_for_fast_bodies: true,
            disable_minimum_speed_for_fast_body: false,
            world_bounds: AABB::everything(),
            debug: DebugFlags::default(),
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), CollisionError> {
        let invalid = |reason| Err(CollisionError::InvalidConfig { reason });

        if self.collision_passes == 0 {
            return invalid("collision_passes must be at least 1");
        }
        if !(self.default_mass > 0.0 && self.default_mass.is_finite()) {
            return invalid("default_mass must be positive and finite");
        }
        if !self.gravity.is_valid() {
            return invalid("gravity must be finite");
        }
        if !(self.bounds_padding >= 0.0) {
            return invalid("bounds_padding must be non-negative");
        }
        if !(self.dynamic_tree_velocity_multiplier >= 0.0) {
            return invalid("dynamic_tree_velocity_multiplier must be non-negative");
        }
        if !(self.collision_shift >= 0.0) {
            return invalid("collision_shift must be non-negative");
        }
        if !(self.surface_epsilon >= 0.0) {
            return invalid("surface_epsilon must be non-negative");
        }
        Ok(())
    }
}
