use crate::math::vec2::Vec2;

/// A directed segment from `begin` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub begin: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(begin: Vec2, end: Vec2) -> Self {
        Self { begin, end }
    }

    /// Calculates the length of the line segment.
    pub fn length(&self) -> f64 {
        self.begin.distance(self.end)
    }

    /// Returns the direction vector of the line segment (from begin to end).
    pub fn direction(&self) -> Vec2 {
        self.end - self.begin
    }

    /// Unit direction from begin to end.
    pub fn slope(&self) -> Vec2 {
        self.direction().normalize()
    }

    /// Unit normal, the counter-clockwise perpendicular of the direction.
    pub fn normal(&self) -> Vec2 {
        self.direction().normal()
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.begin + self.end) * 0.5
    }

    /// Perpendicular distance from `point` to the infinite line through the segment.
    pub fn distance_to_point(&self, point: Vec2) -> f64 {
        let length = self.length();
        if length == 0.0 {
            return self.begin.distance(point);
        }
        (self.direction().cross(point - self.begin) / length).abs()
    }
}
