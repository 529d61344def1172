/// A shape's extent along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

impl Projection {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Projects a set of points onto `axis`.
    pub fn of_points(points: &[super::Vec2], axis: super::Vec2) -> Self {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for p in points {
            let d = p.dot(axis);
            min = min.min(d);
            max = max.max(d);
        }
        Self { min, max }
    }

    /// Strict overlap; touching intervals do not overlap.
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.max > other.min && other.max > self.min
    }

    /// Length of the overlap, 0 when the intervals are apart.
    pub fn overlap(&self, other: &Projection) -> f64 {
        if !self.overlaps(other) {
            return 0.0;
        }
        if self.max > other.max {
            other.max - self.min
        } else {
            self.max - other.min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_projection_overlap() {
        let a = Projection::new(0.0, 5.0);
        let b = Projection::new(3.0, 10.0);
        assert!(a.overlaps(&b));
        assert!((a.overlap(&b) - 2.0).abs() < EPSILON);
        assert!((b.overlap(&a) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_projection_disjoint_and_touching() {
        let a = Projection::new(0.0, 5.0);
        assert_eq!(a.overlap(&Projection::new(6.0, 7.0)), 0.0);
        assert!(!a.overlaps(&Projection::new(5.0, 7.0)));
    }

    #[test]
    fn test_projection_of_points() {
        let points = [Vec2::new(1.0, 0.0), Vec2::new(-2.0, 5.0), Vec2::new(4.0, 1.0)];
        let p = Projection::of_points(&points, Vec2::new(1.0, 0.0));
        assert_eq!(p, Projection::new(-2.0, 4.0));
    }
}
