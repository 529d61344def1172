use super::line_segment::LineSegment;
use super::vec2::Vec2;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub dir: Vec2,
}

impl Ray {
    /// Builds a ray; `dir` is normalized.
    pub fn new(origin: Vec2, dir: Vec2) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    pub fn point_at(&self, t: f64) -> Vec2 {
        self.origin + self.dir * t
    }

    /// Time of impact against `line`, `None` when parallel, behind the origin
    /// or outside the segment.
    pub fn intersect(&self, line: &LineSegment) -> Option<f64> {
        let numerator = line.begin - self.origin;
        let slope = line.slope();
        let divisor = self.dir.cross(slope);
        if divisor == 0.0 {
            return None;
        }

        let t = numerator.cross(slope) / divisor;
        if t < 0.0 {
            return None;
        }

        let u = numerator.cross(self.dir) / divisor / line.length();
        if (0.0..=1.0).contains(&u) {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((ray.dir.magnitude() - 1.0).abs() < EPSILON);
        let p = ray.point_at(5.0);
        assert!((p.x - 3.0).abs() < EPSILON);
        assert!((p.y - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_ray_hits_segment() {
        let ray = Ray::new(Vec2::new(4.8, 0.0), Vec2::new(1.0, 0.0));
        let wall = LineSegment::new(Vec2::new(15.0, 5.0), Vec2::new(15.0, -5.0));
        let t = ray.intersect(&wall).expect("ray should hit the wall");
        assert!((t - 10.2).abs() < EPSILON);
    }

    #[test]
    fn test_ray_misses_segment() {
        let ray = Ray::new(Vec2::ZERO, Vec2::new(1.0, 0.0));
        // Beside the ray
        let above = LineSegment::new(Vec2::new(5.0, 1.0), Vec2::new(5.0, 3.0));
        assert_eq!(ray.intersect(&above), None);
        // Behind the origin
        let behind = LineSegment::new(Vec2::new(-5.0, -1.0), Vec2::new(-5.0, 1.0));
        assert_eq!(ray.intersect(&behind), None);
        // Parallel
        let parallel = LineSegment::new(Vec2::new(1.0, 1.0), Vec2::new(5.0, 1.0));
        assert_eq!(ray.intersect(&parallel), None);
    }
}
