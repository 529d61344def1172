//! Debug-draw hooks.
//!
//! Implement [`DebugSurface`] for a graphics backend, or record into a
//! [`DebugDrawData`], then hand it to `PhysicsWorld::debug_draw`. Which layers
//! are drawn is controlled by `PhysicsConfig::debug`.

use crate::collision::{Pair, AABB};
use crate::common::config::DebugFlags;
use crate::math::Vec2;
use crate::objects::Body;
use crate::shapes::Shape;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color for debug primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebugColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl DebugColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const RED: Self = Self::new(255, 50, 50, 255);
    pub const GREEN: Self = Self::new(50, 255, 50, 255);
    pub const BLUE: Self = Self::new(50, 50, 255, 255);
    pub const YELLOW: Self = Self::new(255, 255, 50, 255);
    pub const CYAN: Self = Self::new(50, 255, 255, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const GRAY: Self = Self::new(128, 128, 128, 255);
}

/// Length in world units of drawn contact normals.
pub const NORMAL_LENGTH: f64 = 30.0;

/// A backend able to draw 2D debug primitives.
pub trait DebugSurface {
    fn line(&mut self, start: Vec2, end: Vec2, color: DebugColor);

    fn point(&mut self, position: Vec2, size: f64, color: DebugColor);

    fn circle(&mut self, center: Vec2, radius: f64, color: DebugColor);

    /// Outline of a box as four lines.
    fn aabb(&mut self, bounds: &AABB, color: DebugColor) {
        let top_left = Vec2::new(bounds.left, bounds.top);
        let top_right = Vec2::new(bounds.right, bounds.top);
        let bottom_right = Vec2::new(bounds.right, bounds.bottom);
        let bottom_left = Vec2::new(bounds.left, bounds.bottom);
        self.line(top_left, top_right, color);
        self.line(top_right, bottom_right, color);
        self.line(bottom_right, bottom_left, color);
        self.line(bottom_left, top_left, color);
    }

    /// A line from `origin` along `direction` scaled by `length`.
    fn vector(&mut self, origin: Vec2, direction: Vec2, length: f64, color: DebugColor) {
        self.line(origin, origin + direction * length, color);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    pub start: Vec2,
    pub end: Vec2,
    pub color: DebugColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugPoint {
    pub position: Vec2,
    pub size: f64,
    pub color: DebugColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugCircle {
    pub center: Vec2,
    pub radius: f64,
    pub color: DebugColor,
}

/// A surface that records primitives for a renderer to consume later.
#[derive(Clone, Debug, Default)]
pub struct DebugDrawData {
    pub lines: Vec<DebugLine>,
    pub points: Vec<DebugPoint>,
    pub circles: Vec<DebugCircle>,
}

impl DebugDrawData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.points.clear();
        self.circles.clear();
    }

    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.points.len() + self.circles.len()
    }
}

impl DebugSurface for DebugDrawData {
    fn line(&mut self, start: Vec2, end: Vec2, color: DebugColor) {
        self.lines.push(DebugLine { start, end, color });
    }

    fn point(&mut self, position: Vec2, size: f64, color: DebugColor) {
        self.points.push(DebugPoint { position, size, color });
    }

    fn circle(&mut self, center: Vec2, radius: f64, color: DebugColor) {
        self.circles.push(DebugCircle { center, radius, color });
    }
}

/// Outline of a shape's world geometry; polygons optionally with side normals.
pub fn draw_shape(shape: &Shape, show_normals: bool, surface: &mut dyn DebugSurface, color: DebugColor) {
    match shape {
        Shape::Circle(c) => surface.circle(c.center(), c.radius, color),
        Shape::Edge(e) => {
            let segment = e.segment();
            surface.line(segment.begin, segment.end, color);
        }
        Shape::Polygon(p) => {
            for (side, axis) in p.sides().iter().zip(p.axes()) {
                surface.line(side.begin, side.end, color);
                if show_normals {
                    surface.vector(side.midpoint(), *axis, 5.0, DebugColor::GRAY);
                }
            }
        }
    }
}

/// Per-body layers: bounds, shape outline and motion vector.
pub fn draw_body(body: &Body, flags: &DebugFlags, surface: &mut dyn DebugSurface) {
    if flags.show_bounds {
        surface.aabb(&body.bounds(), DebugColor::YELLOW);
    }
    if flags.show_area {
        draw_shape(&body.shape, flags.show_normals, surface, DebugColor::GREEN);
    }
    if flags.show_motion_vectors {
        surface.vector(body.position, body.velocity, 1.0, DebugColor::YELLOW);
    }
}

/// Contact point and normal of a resolved pair.
pub fn draw_pair(pair: &Pair, flags: &DebugFlags, surface: &mut dyn DebugSurface) {
    let Some(contact) = pair.contact else {
        return;
    };
    if flags.show_contacts {
        surface.point(contact.point, 3.0, DebugColor::RED);
    }
    if flags.show_collision_normals {
        surface.vector(contact.point, contact.normal, NORMAL_LENGTH, DebugColor::CYAN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon};

    #[test]
    fn test_aabb_draws_four_lines() {
        let mut data = DebugDrawData::new();
        data.aabb(&AABB::new(0.0, 0.0, 2.0, 1.0), DebugColor::WHITE);
        assert_eq!(data.lines.len(), 4);
        assert_eq!(data.lines[0].start, Vec2::new(0.0, 0.0));
        assert_eq!(data.lines[0].end, Vec2::new(2.0, 0.0));
        data.clear();
        assert_eq!(data.primitive_count(), 0);
    }

    #[test]
    fn test_draw_shape_variants() {
        let mut data = DebugDrawData::new();
        draw_shape(&Circle::new(2.0).unwrap().into(), false, &mut data, DebugColor::GREEN);
        assert_eq!(data.circles.len(), 1);

        draw_shape(&Polygon::rectangle(1.0, 1.0).unwrap().into(), true, &mut data, DebugColor::GREEN);
        // Four sides plus four normals
        assert_eq!(data.lines.len(), 8);
    }

    #[test]
    fn test_draw_body_respects_flags() {
        let body = Body::new(Circle::new(1.0).unwrap().into()).with_velocity(Vec2::new(3.0, 0.0));
        let mut data = DebugDrawData::new();

        draw_body(&body, &DebugFlags::default(), &mut data);
        assert_eq!(data.primitive_count(), 0);

        let flags = DebugFlags {
            show_bounds: true,
            show_motion_vectors: true,
            ..DebugFlags::default()
        };
        draw_body(&body, &flags, &mut data);
        assert_eq!(data.lines.len(), 5);
        assert_eq!(data.lines[4].end, Vec2::new(3.0, 0.0));
    }
}
