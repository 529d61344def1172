use super::vec2::Vec2;

/// Body placement used to take shapes from local to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // Angle in radians
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    /// No translation, no rotation.
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Applies the transform (rotation then translation) to a local point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        let (sin_a, cos_a) = self.rotation.sin_cos();
        Vec2::new(
            point.x * cos_a - point.y * sin_a,
            point.x * sin_a + point.y * cos_a,
        ) + self.position
    }

    /// Applies the transform to `offset + p` for every local point, reusing `out`.
    pub fn apply_all(self, offset: Vec2, points: &[Vec2], out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(points.iter().map(|p| self.apply(offset + *p)));
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
