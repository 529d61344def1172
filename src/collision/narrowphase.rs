//! Exact shape-pair intersection tests.
//!
//! [`collide`] dispatches on the `(kind, kind)` pair of its arguments. Every
//! routine reports a [`CollisionContact`] whose MTV and normal point from the
//! first shape toward the second; reversed orders run the canonical routine
//! and flip the result.

use crate::collision::contact::CollisionContact;
use crate::math::{LineSegment, Projection, Vec2};
use crate::shapes::{Circle, Edge, Polygon, Shape};

/// Depth of the polygon synthesized from an edge for polygon/edge tests.
pub const EDGE_THICKNESS: f64 = 10.0;

/// Tests two shapes for intersection.
pub fn collide(a: &Shape, b: &Shape) -> Option<CollisionContact> {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(a, b),
        (Shape::Circle(a), Shape::Edge(b)) => circle_edge(a, b),
        (Shape::Circle(a), Shape::Polygon(b)) => circle_polygon(a, b),
        (Shape::Edge(a), Shape::Circle(b)) => circle_edge(b, a).map(CollisionContact::flipped),
        // Segments have no thickness.
        (Shape::Edge(_), Shape::Edge(_)) => None,
        (Shape::Edge(a), Shape::Polygon(b)) => polygon_edge(b, a).map(CollisionContact::flipped),
        (Shape::Polygon(a), Shape::Circle(b)) => circle_polygon(b, a).map(CollisionContact::flipped),
        (Shape::Polygon(a), Shape::Edge(b)) => polygon_edge(a, b),
        (Shape::Polygon(a), Shape::Polygon(b)) => polygon_polygon(a, b),
    }
}

/// Contact iff the centre distance is at most the sum of the radii.
pub fn circle_circle(a: &Circle, b: &Circle) -> Option<CollisionContact> {
    let between = b.center() - a.center();
    let distance = between.magnitude();
    let radii_sum = a.radius + b.radius;
    if distance > radii_sum {
        return None;
    }

    // Concentric circles fall back to (0, 1).
    let normal = between.normalize();
    let mtv = normal * (radii_sum - distance);
    Some(CollisionContact::new(mtv, a.support_point(normal), normal))
}

/// Closest-point test against the three Voronoi regions of the segment.
pub fn circle_edge(circle: &Circle, edge: &Edge) -> Option<CollisionContact> {
    let cc = circle.center();
    let radius = circle.radius;
    let LineSegment { begin, end } = edge.segment();
    let e = end - begin;

    let u = e.dot(end - cc);
    let v = e.dot(cc - begin);

    let vertex_contact = |vertex: Vec2| {
        let d = cc - vertex;
        let dd = d.magnitude_squared();
        if dd > radius * radius {
            return None;
        }
        let normal = (-d).normalize();
        Some(CollisionContact::new(normal * (radius - dd.sqrt()), vertex, normal))
    };

    // Before begin
    if v <= 0.0 {
        return vertex_contact(begin);
    }
    // Past end
    if u <= 0.0 {
        return vertex_contact(end);
    }

    let den = e.dot(e);
    let point = (begin * u + end * v) / den;
    let dd = (cc - point).magnitude_squared();
    if dd > radius * radius {
        return None;
    }

    let mut n = e.perpendicular();
    if n.dot(cc - begin) < 0.0 {
        n = -n;
    }
    let n = n.normalize();
    let depth = radius - dd.sqrt();
    Some(CollisionContact::new(-n * depth, point, -n))
}

pub fn circle_polygon(circle: &Circle, polygon: &Polygon) -> Option<CollisionContact> {
    let cc = circle.center();
    let mut axes = polygon.axes().to_vec();
    axes.push((polygon.closest_vertex(cc) - cc).normalize());
    convex_sat(circle, polygon, &axes)
}

pub fn polygon_polygon(a: &Polygon, b: &Polygon) -> Option<CollisionContact> {
    let axes: Vec<Vec2> = a.axes().iter().chain(b.axes()).copied().collect();
    convex_sat(a, b, &axes)
}

/// The edge is extruded away from the polygon into a thin box and tested with SAT.
pub fn polygon_edge(polygon: &Polygon, edge: &Edge) -> Option<CollisionContact> {
    let segment = edge.segment();
    let mut n = segment.normal();
    if n.dot(polygon.center() - segment.begin) < 0.0 {
        n = -n;
    }
    let depth = n * EDGE_THICKNESS;
    let thin = Polygon::new(vec![
        segment.begin,
        segment.end,
        segment.end - depth,
        segment.begin - depth,
    ])
    .ok()?;
    polygon_polygon(polygon, &thin)
}

/// The queries SAT needs from a convex shape.
trait Convex {
    fn project(&self, axis: Vec2) -> Projection;
    fn center(&self) -> Vec2;
    fn support_point(&self, direction: Vec2) -> Vec2;
    fn contains(&self, point: Vec2) -> bool;
}

impl Convex for Circle {
    fn project(&self, axis: Vec2) -> Projection {
        Circle::project(self, axis)
    }
    fn center(&self) -> Vec2 {
        Circle::center(self)
    }
    fn support_point(&self, direction: Vec2) -> Vec2 {
        Circle::support_point(self, direction)
    }
    fn contains(&self, point: Vec2) -> bool {
        Circle::contains(self, point)
    }
}

impl Convex for Polygon {
    fn project(&self, axis: Vec2) -> Projection {
        Polygon::project(self, axis)
    }
    fn center(&self) -> Vec2 {
        Polygon::center(self)
    }
    fn support_point(&self, direction: Vec2) -> Vec2 {
        Polygon::support_point(self, direction)
    }
    fn contains(&self, point: Vec2) -> bool {
        Polygon::contains(self, point)
    }
}

/// Separating axis test over `axes`. The axis of least positive overlap,
/// oriented from A's centre toward B's, becomes the contact normal.
fn convex_sat<A: Convex, B: Convex>(a: &A, b: &B, axes: &[Vec2]) -> Option<CollisionContact> {
    let mut min_overlap = f64::MAX;
    let mut min_axis = None;
    for &axis in axes {
        let overlap = a.project(axis).overlap(&b.project(axis));
        if overlap <= 0.0 {
            return None;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = Some(axis);
        }
    }

    let mut normal = min_axis?;
    if normal.dot(b.center() - a.center()) < 0.0 {
        normal = -normal;
    }

    Some(CollisionContact::new(
        normal * min_overlap,
        contact_point(a, b, normal),
        normal,
    ))
}

/// Average of each support point that lies inside the other shape, else B's.
fn contact_point<A: Convex, B: Convex>(a: &A, b: &B, normal: Vec2) -> Vec2 {
    let on_a = a.support_point(normal);
    let on_b = b.support_point(-normal);
    match (b.contains(on_a), a.contains(on_b)) {
        (true, true) => (on_a + on_b) * 0.5,
        (true, false) => on_a,
        (false, _) => on_b,
    }
}
