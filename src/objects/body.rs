use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::collision::AABB;
use crate::common::Material;
use crate::math::{Transform, Vec2};
use crate::shapes::Shape;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mass given to bodies that are not assigned one.
pub const DEFAULT_MASS: f64 = 10.0;

/// Stable, process-unique body identity used for pair keys and tree lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub u64);

impl BodyId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        BodyId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a body takes part in collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CollisionType {
    /// Never paired, never tested.
    PreventCollision,
    /// Reports collisions but is never moved by them, and never moves others.
    Passive,
    /// Moved by collisions.
    #[default]
    Active,
    /// Like `Active`, but bounces off in the arcade solver.
    Elastic,
    /// Immovable: infinite mass, never paired with another fixed body.
    Fixed,
}

/// A simulated body: one shape plus kinematic state.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    pub shape: Shape,
    pub material: Material,
    pub collision_type: CollisionType,

    pub position: Vec2,
    pub old_position: Vec2,
    pub velocity: Vec2,
    pub old_velocity: Vec2,
    pub acceleration: Vec2,
    pub rotation: f64, // Radians
    pub angular_velocity: f64,
    pub torque: f64,

    pub mass: f64,
    /// Moment of inertia.
    pub moi: f64,

    /// Translation accumulated during a solver pass, applied by `apply_mtv`.
    pub total_mtv: Vec2,
    killed: bool,
}

impl Body {
    /// Creates an active body at the origin with [`DEFAULT_MASS`].
    pub fn new(shape: Shape) -> Self {
        let moi = shape.moment_of_inertia(DEFAULT_MASS);
        let mut body = Self {
            id: BodyId::next(),
            shape,
            material: Material::default(),
            collision_type: CollisionType::default(),
            position: Vec2::ZERO,
            old_position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            old_velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            torque: 0.0,
            mass: DEFAULT_MASS,
            moi,
            total_mtv: Vec2::ZERO,
            killed: false,
        };
        body.recalc();
        body
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self.old_position = position;
        self.recalc();
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self.recalc();
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self.old_velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.set_mass(mass);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_collision_type(mut self, collision_type: CollisionType) -> Self {
        self.collision_type = collision_type;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Sets the mass and recomputes the moment of inertia from the shape.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.moi = self.shape.moment_of_inertia(mass);
    }

    pub fn is_fixed(&self) -> bool {
        self.collision_type == CollisionType::Fixed
    }

    /// Zero for fixed bodies and non-positive masses.
    pub fn inv_mass(&self) -> f64 {
        if self.is_fixed() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Zero for fixed bodies and bodies that cannot rotate.
    pub fn inv_moi(&self) -> f64 {
        if self.is_fixed() || self.moi <= 0.0 {
            0.0
        } else {
            1.0 / self.moi
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// Rebuilds the shape's world-space cache from the current transform.
    pub fn recalc(&mut self) {
        let transform = self.transform();
        self.shape.recalc(transform);
    }

    pub fn bounds(&self) -> AABB {
        self.shape.bounds()
    }

    pub fn center(&self) -> Vec2 {
        self.shape.center()
    }

    /// Remembers the pre-integration position and velocity.
    pub fn capture_old_transform(&mut self) {
        self.old_position = self.position;
        self.old_velocity = self.velocity;
    }

    pub fn add_mtv(&mut self, mtv: Vec2) {
        self.total_mtv += mtv;
    }

    /// Moves the body by the accumulated MTV and clears it.
    pub fn apply_mtv(&mut self) {
        if self.total_mtv == Vec2::ZERO {
            return;
        }
        self.position += self.total_mtv;
        self.total_mtv = Vec2::ZERO;
        self.recalc();
    }

    /// Marks the owner as gone; killed bodies are skipped by every stage.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon};
    const EPSILON: f64 = 1e-10;

    fn circle_body(radius: f64) -> Body {
        Body::new(Circle::new(radius).unwrap().into())
    }

    #[test]
    fn test_body_ids_are_unique() {
        let a = circle_body(1.0);
        let b = circle_body(1.0);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_body_defaults() {
        let body = circle_body(2.0);
        assert_eq!(body.mass, DEFAULT_MASS);
        assert!((body.moi - 20.0).abs() < EPSILON);
        assert_eq!(body.collision_type, CollisionType::Active);
        assert!(!body.is_killed());
    }

    #[test]
    fn test_body_with_position_recalcs_shape() {
        let body = circle_body(5.0).with_position(Vec2::new(20.0, 0.0));
        assert_eq!(body.bounds(), AABB::new(15.0, -5.0, 25.0, 5.0));
        assert_eq!(body.center(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_body_fixed_has_no_inverse_mass() {
        let body = Body::new(Polygon::rectangle(10.0, 10.0).unwrap().into())
            .with_collision_type(CollisionType::Fixed);
        assert_eq!(body.inv_mass(), 0.0);
        assert_eq!(body.inv_moi(), 0.0);

        let active = circle_body(1.0).with_mass(4.0);
        assert!((active.inv_mass() - 0.25).abs() < EPSILON);
        assert!((active.moi - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_body_mtv_accumulates_until_applied() {
        let mut body = circle_body(1.0);
        body.add_mtv(Vec2::new(1.0, 0.0));
        body.add_mtv(Vec2::new(0.5, -1.0));
        assert_eq!(body.position, Vec2::ZERO);

        body.apply_mtv();
        assert_eq!(body.position, Vec2::new(1.5, -1.0));
        assert_eq!(body.total_mtv, Vec2::ZERO);
        assert_eq!(body.center(), Vec2::new(1.5, -1.0));
    }

    #[test]
    fn test_body_capture_old_transform() {
        let mut body = circle_body(1.0).with_velocity(Vec2::new(2.0, 0.0));
        body.position = Vec2::new(3.0, 4.0);
        body.capture_old_transform();
        body.position = Vec2::new(5.0, 4.0);
        assert_eq!(body.old_position, Vec2::new(3.0, 4.0));
        assert_eq!(body.old_velocity, Vec2::new(2.0, 0.0));
    }
}
