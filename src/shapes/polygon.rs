use crate::collision::AABB;
use crate::error::CollisionError;
use crate::math::{LineSegment, Projection, Ray, Transform, Vec2};

/// A convex polygon defined by its vertices in local space.
///
/// World-space points, SAT axes and sides are cached and rebuilt by
/// [`Polygon::recalc`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Local offset applied to every vertex before the body transform.
    pub offset: Vec2,
    vertices: Vec<Vec2>,
    points: Vec<Vec2>,
    axes: Vec<Vec2>,
    sides: Vec<LineSegment>,
}

impl Polygon {
    /// Creates a polygon from a consistently wound list of vertices.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, CollisionError> {
        if vertices.len() < 3 {
            return Err(CollisionError::InvalidShape {
                reason: "polygon must have at least 3 vertices",
            });
        }
        if vertices.iter().any(|v| !v.is_valid()) {
            return Err(CollisionError::InvalidShape {
                reason: "polygon vertices must be finite",
            });
        }
        let mut polygon = Polygon {
            offset: Vec2::ZERO,
            vertices,
            points: Vec::new(),
            axes: Vec::new(),
            sides: Vec::new(),
        };
        polygon.recalc(Transform::identity());
        Ok(polygon)
    }

    /// Axis-aligned box of the given size centred on the body position.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, CollisionError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(CollisionError::InvalidShape {
                reason: "rectangle dimensions must be positive",
            });
        }
        let (hw, hh) = (width / 2.0, height / 2.0);
        Polygon::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self.recalc(Transform::identity());
        self
    }

    /// Local-space vertices.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// World-space vertices as of the last `recalc`.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// One unit normal per side, the candidate separating axes.
    pub fn axes(&self) -> &[Vec2] {
        &self.axes
    }

    pub fn sides(&self) -> &[LineSegment] {
        &self.sides
    }

    pub fn recalc(&mut self, transform: Transform) {
        transform.apply_all(self.offset, &self.vertices, &mut self.points);

        let n = self.points.len();
        self.axes.clear();
        self.sides.clear();
        for i in 0..n {
            let current = self.points[i];
            let next = self.points[(i + 1) % n];
            self.axes.push((current - next).normal());
            self.sides.push(LineSegment::new(current, next));
        }
    }

    /// Calculates the area of the polygon using the Shoelace formula.
    pub fn calculate_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            area += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        (area / 2.0).abs()
    }

    /// Area centroid of the world-space points.
    pub fn center(&self) -> Vec2 {
        centroid(&self.points)
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_points(&self.points).unwrap_or_else(|| {
            let c = self.center();
            AABB::new(c.x, c.y, c.x, c.y)
        })
    }

    pub fn support_point(&self, direction: Vec2) -> Vec2 {
        let mut best = self.points[0];
        let mut best_dot = best.dot(direction);
        for p in self.points.iter().skip(1) {
            let d = p.dot(direction);
            if d > best_dot {
                best = *p;
                best_dot = d;
            }
        }
        best
    }

    pub fn project(&self, axis: Vec2) -> Projection {
        Projection::of_points(&self.points, axis)
    }

    /// World-space vertex closest to `point`.
    pub fn closest_vertex(&self, point: Vec2) -> Vec2 {
        let mut closest = self.points[0];
        let mut min_dist = closest.distance_squared(point);
        for p in self.points.iter().skip(1) {
            let d = p.distance_squared(point);
            if d < min_dist {
                closest = *p;
                min_dist = d;
            }
        }
        closest
    }

    /// Even-odd test: a ray cast toward +x crosses an odd number of sides.
    /// Sides are half-open in y so a vertex on the ray counts once.
    pub fn contains(&self, point: Vec2) -> bool {
        let crossings = self
            .sides
            .iter()
            .filter(|side| {
                let (a, b) = (side.begin, side.end);
                if (a.y > point.y) == (b.y > point.y) {
                    return false;
                }
                let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                x > point.x
            })
            .count();
        crossings % 2 == 1
    }

    pub fn ray_cast(&self, ray: &Ray, max: f64) -> Option<Vec2> {
        let toi = self
            .sides
            .iter()
            .filter_map(|side| ray.intersect(side))
            .filter(|t| *t <= max)
            .fold(f64::INFINITY, f64::min);
        toi.is_finite().then(|| ray.point_at(toi))
    }

    /// Inertia about the body origin for a uniform polygon of `mass`.
    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        let n = self.vertices.len();
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..n {
            let p0 = self.offset + self.vertices[i];
            let p1 = self.offset + self.vertices[(i + 1) % n];
            let cross = p1.cross(p0);
            numerator += cross * (p0.dot(p0) + p0.dot(p1) + p1.dot(p1));
            denominator += cross;
        }
        if denominator.abs() < 1e-10 {
            return 0.0;
        }
        mass / 6.0 * (numerator / denominator)
    }
}

/// Area centroid of a consistently wound point loop, falling back to the
/// vertex average for degenerate (collinear) input.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    let n = points.len();
    if n < 3 {
        return Vec2::average(points).unwrap_or(Vec2::ZERO);
    }

    let mut centroid = Vec2::ZERO;
    let mut signed_area_sum = 0.0;
    let origin = points[0];

    for i in 1..(n - 1) {
        let v2 = points[i];
        let v3 = points[i + 1];

        let triangle_signed_area = (v2 - origin).cross(v3 - origin) / 2.0;
        signed_area_sum += triangle_signed_area;
        centroid += (origin + v2 + v3) / 3.0 * triangle_signed_area;
    }

    if signed_area_sum.abs() < 1e-10 {
        Vec2::average(points).unwrap_or(Vec2::ZERO)
    } else {
        centroid / signed_area_sum
    }
}
