//! 2D collision detection and resolution.
//!
//! Bodies carry a [`Shape`] and kinematic state. Each [`PhysicsWorld::step`]
//! integrates motion, finds candidate pairs through a dynamic AABB tree (with
//! a ray-cast sweep for fast bodies), tests them exactly with SAT and
//! closest-point routines, and separates them with either an arcade or an
//! impulse-based solver.

pub mod broadphase;
pub mod collision;
pub mod common;
pub mod debug;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export key types for easier use
pub use broadphase::{CollisionBroadphase, DynamicTree, DynamicTreeBroadphase, NaiveBroadphase};
pub use collision::{collide, CollisionContact, CollisionEvent, Pair, PairKey, Side, AABB};
pub use common::{BroadphaseStrategy, DebugFlags, Material, PhysicsConfig, ResolutionStrategy};
pub use error::CollisionError;
pub use math::{LineSegment, Projection, Ray, Transform, Vec2};
pub use objects::{Body, BodyId, CollisionType};
pub use shapes::{Circle, Edge, Polygon, Shape, ShapeKind};
pub use world::{FrameStats, PhysicsWorld};
