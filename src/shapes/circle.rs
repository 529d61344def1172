use crate::collision::AABB;
use crate::error::CollisionError;
use crate::math::{Projection, Ray, Transform, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    /// Centre relative to the owning body's position.
    pub offset: Vec2,
    center: Vec2,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self, CollisionError> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(CollisionError::InvalidShape {
                reason: "circle radius must be finite and non-negative",
            });
        }
        Ok(Self {
            radius,
            offset: Vec2::ZERO,
            center: Vec2::ZERO,
        })
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self.center = offset;
        self
    }

    /// World-space centre as of the last `recalc`.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn recalc(&mut self, transform: Transform) {
        self.center = transform.apply(self.offset);
    }

    pub fn bounds(&self) -> AABB {
        let c = self.center;
        let r = self.radius;
        AABB::new(c.x - r, c.y - r, c.x + r, c.y + r)
    }

    pub fn support_point(&self, direction: Vec2) -> Vec2 {
        self.center + direction.normalize() * self.radius
    }

    /// `axis` must be unit length.
    pub fn project(&self, axis: Vec2) -> Projection {
        let d = self.center.dot(axis);
        Projection::new(d - self.radius, d + self.radius)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Nearest point where the ray enters the circle, if within `max`.
    pub fn ray_cast(&self, ray: &Ray, max: f64) -> Option<Vec2> {
        let oc = ray.origin - self.center;
        let b = ray.dir.dot(oc);
        let c = oc.magnitude_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        let toi = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return None;
        };

        (toi <= max).then(|| ray.point_at(toi))
    }

    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        0.5 * mass * self.radius * self.radius
    }
}
