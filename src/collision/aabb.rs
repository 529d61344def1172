// Defines an Axis-Aligned Bounding Box

use crate::math::{Ray, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned box in a y-down world: `top` is the smaller y.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl AABB {
    /// Creates a new AABB, swapping edges so that `left <= right` and `top <= bottom`.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        AABB {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// A box covering the whole representable plane.
    pub fn everything() -> Self {
        AABB::new(-f64::MAX, -f64::MAX, f64::MAX, f64::MAX)
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = AABB::new(first.x, first.y, first.x, first.y);
        for point in points.iter().skip(1) {
            bounds.left = bounds.left.min(point.x);
            bounds.top = bounds.top.min(point.y);
            bounds.right = bounds.right.max(point.x);
            bounds.bottom = bounds.bottom.max(point.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Surface-area heuristic cost of the box.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// Smallest box containing both.
    pub fn combine(&self, other: &AABB) -> AABB {
        AABB {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Grows every edge outward by `amount`.
    pub fn pad(&self, amount: f64) -> AABB {
        AABB {
            left: self.left - amount,
            top: self.top - amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.left <= point.x && self.top <= point.y && self.bottom >= point.y && self.right >= point.x
    }

    /// `other` lies entirely inside this box.
    pub fn contains(&self, other: &AABB) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && other.bottom <= self.bottom
            && other.right <= self.right
    }

    /// Inclusive overlap test; boxes sharing an edge overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Smallest axis-aligned vector separating the boxes, `None` unless they
    /// strictly overlap.
    pub fn intersect(&self, other: &AABB) -> Option<Vec2> {
        let total = self.combine(other);
        if total.width() >= other.width() + self.width()
            || total.height() >= other.height() + self.height()
        {
            return None;
        }

        let overlap_x = if self.right >= other.left && self.right <= other.right {
            other.left - self.right
        } else {
            other.right - self.left
        };

        let overlap_y = if self.top <= other.bottom && self.top >= other.top {
            other.bottom - self.top
        } else {
            other.top - self.bottom
        };

        if overlap_x.abs() < overlap_y.abs() {
            Some(Vec2::new(overlap_x, 0.0))
        } else {
            Some(Vec2::new(0.0, overlap_y))
        }
    }

    /// Slab test: distance along the ray at which it enters the box, `None`
    /// if it misses or enters at or beyond `far`.
    pub fn ray_cast_time(&self, ray: &Ray, far: f64) -> Option<f64> {
        let inv_x = if ray.dir.x == 0.0 { f64::MAX } else { 1.0 / ray.dir.x };
        let inv_y = if ray.dir.y == 0.0 { f64::MAX } else { 1.0 / ray.dir.y };

        let tx1 = (self.left - ray.origin.x) * inv_x;
        let tx2 = (self.right - ray.origin.x) * inv_x;
        let mut tmin = tx1.min(tx2);
        let mut tmax = tx1.max(tx2);

        let ty1 = (self.top - ray.origin.y) * inv_y;
        let ty2 = (self.bottom - ray.origin.y) * inv_y;
        tmin = tmin.max(ty1.min(ty2));
        tmax = tmax.min(ty1.max(ty2));

        if tmax >= tmin.max(0.0) && tmin < far {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }

    pub fn ray_cast(&self, ray: &Ray, far: f64) -> bool {
        self.ray_cast_time(ray, far).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_aabb_new_normalizes() {
        let b = AABB::new(10.0, 5.0, 0.0, -5.0);
        assert_eq!(b, AABB::new(0.0, -5.0, 10.0, 5.0));
        assert!((b.width() - 10.0).abs() < EPSILON);
        assert!((b.height() - 10.0).abs() < EPSILON);
        assert!((b.perimeter() - 40.0).abs() < EPSILON);
        assert_eq!(b.center(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_aabb_from_points() {
        assert_eq!(AABB::from_points(&[]), None);
        let b = AABB::from_points(&[Vec2::new(1.0, 4.0), Vec2::new(-2.0, 0.0), Vec2::new(3.0, 2.0)]);
        assert_eq!(b, Some(AABB::new(-2.0, 0.0, 3.0, 4.0)));
    }

    #[test]
    fn test_aabb_combine_and_contains() {
        let a = AABB::new(0.0, 0.0, 1.0, 1.0);
        let b = AABB::new(2.0, -1.0, 3.0, 0.5);
        let c = a.combine(&b);
        assert_eq!(c, AABB::new(0.0, -1.0, 3.0, 1.0));
        assert!(c.contains(&a));
        assert!(c.contains(&b));
        assert!(!a.contains(&c));
        assert!(c.contains_point(Vec2::new(3.0, 1.0)));
        assert!(!c.contains_point(Vec2::new(3.1, 0.0)));
    }

    #[test]
    fn test_aabb_overlaps_inclusive() {
        let a = AABB::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.overlaps(&AABB::new(1.0, 0.0, 2.0, 1.0)));
        assert!(a.overlaps(&AABB::new(0.5, 0.5, 2.0, 2.0)));
        assert!(!a.overlaps(&AABB::new(1.5, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn test_aabb_intersect_min_axis() {
        let a = AABB::new(0.0, 0.0, 10.0, 10.0);
        let b = AABB::new(8.0, 1.0, 18.0, 11.0);
        let mtv = a.intersect(&b).expect("boxes overlap");
        assert!((mtv.x - -2.0).abs() < EPSILON);
        assert!(mtv.y.abs() < EPSILON);

        let below = AABB::new(1.0, 9.0, 9.0, 19.0);
        let mtv = a.intersect(&below).expect("boxes overlap");
        assert!(mtv.x.abs() < EPSILON);
        assert!((mtv.y - -1.0).abs() < EPSILON);

        assert_eq!(a.intersect(&AABB::new(10.0, 0.0, 20.0, 10.0)), None);
    }

    #[test]
    fn test_aabb_ray_cast() {
        let b = AABB::new(10.0, -5.0, 20.0, 5.0);
        let ray = Ray::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(b.ray_cast(&ray, 100.0));
        assert!((b.ray_cast_time(&ray, 100.0).unwrap_or(-1.0) - 10.0).abs() < EPSILON);
        // Too short
        assert!(!b.ray_cast(&ray, 9.0));
        // Pointing away
        assert!(!b.ray_cast(&Ray::new(Vec2::new(0.0, 0.0), Vec2::new(-1.0, 0.0)), 100.0));
        // Parallel and outside the slab
        assert!(!b.ray_cast(&Ray::new(Vec2::new(0.0, 10.0), Vec2::new(1.0, 0.0)), 100.0));
        // Origin inside
        assert!(b.ray_cast(&Ray::new(Vec2::new(15.0, 0.0), Vec2::new(0.0, 1.0)), 1.0));
    }
}
