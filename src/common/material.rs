//! Surface properties that drive the rigid-body response.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the physical properties of a body affecting collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coefficient of friction. Range [0, infinity).
    pub friction: f64,
}

impl Material {
    /// Creates a new material, clamping both coefficients into range.
    pub fn new(restitution: f64, friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
        }
    }

    /// Coefficients used when two materials meet: the smaller of each.
    pub fn mix(&self, other: &Material) -> Material {
        Material {
            restitution: self.restitution.min(other.restitution),
            friction: self.friction.min(other.friction),
        }
    }
}

impl Default for Material {
    /// Slightly bouncy, high friction.
    fn default() -> Self {
        Material {
            restitution: 0.2,
            friction: 0.99,
        }
    }
}
