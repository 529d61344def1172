pub mod line_segment;
pub mod projection;
pub mod ray;
pub mod transform;
pub mod vec2;

pub use line_segment::LineSegment;
pub use projection::Projection;
pub use ray::Ray;
pub use transform::Transform;
pub use vec2::Vec2;
