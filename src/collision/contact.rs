use crate::math::vec2::Vec2;

/// Result of an exact intersection test between two shapes A and B.
///
/// `mtv` and `normal` point from A toward B: moving A by `-mtv` (or B by
/// `+mtv`) separates the shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionContact {
    /// Minimum translation vector, direction times penetration depth.
    pub mtv: Vec2,
    /// World-space contact point estimate.
    pub point: Vec2,
    /// Unit contact normal.
    pub normal: Vec2,
}

impl CollisionContact {
    pub fn new(mtv: Vec2, point: Vec2, normal: Vec2) -> Self {
        Self { mtv, point, normal }
    }

    /// Penetration depth along the normal.
    pub fn depth(&self) -> f64 {
        self.mtv.magnitude()
    }

    /// The same contact seen from the other shape.
    pub fn flipped(self) -> Self {
        Self {
            mtv: -self.mtv,
            point: self.point,
            normal: -self.normal,
        }
    }
}
