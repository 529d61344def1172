use crate::collision::AABB;
use crate::error::CollisionError;
use crate::math::{LineSegment, Projection, Ray, Transform, Vec2};

/// A line segment collider. Edges never contain points and
/// never collide with other edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Local-space end points relative to the owning body.
    pub begin: Vec2,
    pub end: Vec2,
    world: LineSegment,
}

impl Edge {
    pub fn new(begin: Vec2, end: Vec2) -> Result<Self, CollisionError> {
        if begin.distance_squared(end) == 0.0 {
            return Err(CollisionError::InvalidShape {
                reason: "edge end points must differ",
            });
        }
        Ok(Self {
            begin,
            end,
            world: LineSegment::new(begin, end),
        })
    }

    /// World-space segment as of the last `recalc`.
    pub fn segment(&self) -> LineSegment {
        self.world
    }

    pub fn recalc(&mut self, transform: Transform) {
        self.world = LineSegment::new(transform.apply(self.begin), transform.apply(self.end));
    }

    pub fn center(&self) -> Vec2 {
        self.world.midpoint()
    }

    pub fn bounds(&self) -> AABB {
        let LineSegment { begin, end } = self.world;
        AABB::new(begin.x, begin.y, end.x, end.y)
    }

    pub fn support_point(&self, direction: Vec2) -> Vec2 {
        if direction.dot(self.world.begin) > direction.dot(self.world.end) {
            self.world.begin
        } else {
            self.world.end
        }
    }

    pub fn project(&self, axis: Vec2) -> Projection {
        Projection::of_points(&[self.world.begin, self.world.end], axis)
    }

    pub fn contains(&self, _point: Vec2) -> bool {
        false
    }

    pub fn ray_cast(&self, ray: &Ray, max: f64) -> Option<Vec2> {
        let t = ray.intersect(&self.world)?;
        (t <= max).then(|| ray.point_at(t))
    }

    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        let length = self.begin.distance(self.end);
        mass * length * length / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    fn floor() -> Edge {
        let mut e = Edge::new(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)).unwrap();
        e.recalc(Transform::new(Vec2::new(0.0, 50.0), 0.0));
        e
    }

    #[test]
    fn test_edge_new_rejects_zero_length() {
        assert!(Edge::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_edge_world_geometry() {
        let e = floor();
        assert_eq!(e.bounds(), AABB::new(-10.0, 50.0, 10.0, 50.0));
        assert_eq!(e.center(), Vec2::new(0.0, 50.0));
        assert_eq!(e.support_point(Vec2::new(1.0, 0.0)), Vec2::new(10.0, 50.0));
        assert_eq!(e.support_point(Vec2::new(-1.0, 0.0)), Vec2::new(-10.0, 50.0));
        assert!(!e.contains(Vec2::new(0.0, 50.0)));
    }

    #[test]
    fn test_edge_ray_cast() {
        let e = floor();
        let ray = Ray::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0));
        let hit = e.ray_cast(&ray, 100.0).expect("ray should hit the floor");
        assert!((hit.y - 50.0).abs() < EPSILON);
        assert!(e.ray_cast(&ray, 40.0).is_none());
    }

    #[test]
    fn test_edge_moment_of_inertia() {
        let e = floor();
        assert!((e.moment_of_inertia(3.0) - 100.0).abs() < EPSILON);
    }
}
