pub mod circle;
pub mod edge;
pub mod polygon;

pub use circle::Circle;
pub use edge::Edge;
pub use polygon::Polygon;

use crate::collision::AABB;
use crate::math::{Projection, Ray, Transform, Vec2};

/// Discriminant of [`Shape`], the index into the narrowphase dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Edge,
    Polygon,
}

/// The collision geometry attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Edge(Edge),
    Polygon(Polygon),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Edge(_) => ShapeKind::Edge,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// World-space bounds.
    pub fn bounds(&self) -> AABB {
        match self {
            Shape::Circle(c) => c.bounds(),
            Shape::Edge(e) => e.bounds(),
            Shape::Polygon(p) => p.bounds(),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => c.center(),
            Shape::Edge(e) => e.center(),
            Shape::Polygon(p) => p.center(),
        }
    }

    /// Furthest world-space point along `direction`.
    pub fn support_point(&self, direction: Vec2) -> Vec2 {
        match self {
            Shape::Circle(c) => c.support_point(direction),
            Shape::Edge(e) => e.support_point(direction),
            Shape::Polygon(p) => p.support_point(direction),
        }
    }

    pub fn project(&self, axis: Vec2) -> Projection {
        match self {
            Shape::Circle(c) => c.project(axis),
            Shape::Edge(e) => e.project(axis),
            Shape::Polygon(p) => p.project(axis),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Shape::Circle(c) => c.contains(point),
            Shape::Edge(e) => e.contains(point),
            Shape::Polygon(p) => p.contains(point),
        }
    }

    /// Nearest hit within `max` along the ray.
    pub fn ray_cast(&self, ray: &Ray, max: f64) -> Option<Vec2> {
        match self {
            Shape::Circle(c) => c.ray_cast(ray, max),
            Shape::Edge(e) => e.ray_cast(ray, max),
            Shape::Polygon(p) => p.ray_cast(ray, max),
        }
    }

    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        match self {
            Shape::Circle(c) => c.moment_of_inertia(mass),
            Shape::Edge(e) => e.moment_of_inertia(mass),
            Shape::Polygon(p) => p.moment_of_inertia(mass),
        }
    }

    /// Rebuilds the world-space cache for a body at `transform`.
    pub fn recalc(&mut self, transform: Transform) {
        match self {
            Shape::Circle(c) => c.recalc(transform),
            Shape::Edge(e) => e.recalc(transform),
            Shape::Polygon(p) => p.recalc(transform),
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Edge> for Shape {
    fn from(e: Edge) -> Self {
        Shape::Edge(e)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_shape_kind() {
        let c: Shape = Circle::new(1.0).unwrap().into();
        let e: Shape = Edge::new(Vec2::ZERO, Vec2::new(1.0, 0.0)).unwrap().into();
        let p: Shape = Polygon::rectangle(1.0, 1.0).unwrap().into();
        assert_eq!(c.kind(), ShapeKind::Circle);
        assert_eq!(e.kind(), ShapeKind::Edge);
        assert_eq!(p.kind(), ShapeKind::Polygon);
    }

    #[test]
    fn test_shape_recalc_moves_every_variant() {
        let xf = Transform::new(Vec2::new(3.0, 4.0), 0.0);
        let mut shapes: Vec<Shape> = vec![
            Circle::new(1.0).unwrap().into(),
            Edge::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)).unwrap().into(),
            Polygon::rectangle(2.0, 2.0).unwrap().into(),
        ];
        for shape in shapes.iter_mut() {
            shape.recalc(xf);
            let c = shape.center();
            assert!((c.x - 3.0).abs() < EPSILON);
            assert!((c.y - 4.0).abs() < EPSILON);
            assert!(shape.bounds().contains_point(Vec2::new(3.0, 4.0)));
        }
    }
}
