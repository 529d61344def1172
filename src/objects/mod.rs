pub mod body;

pub use body::{Body, BodyId, CollisionType, DEFAULT_MASS};

/// Mutable references to two distinct bodies of a slice, `None` if the
/// indices coincide or fall outside the slice.
pub(crate) fn get_mutable_body_pair(
    bodies: &mut [Body],
    idx_a: usize,
    idx_b: usize,
) -> Option<(&mut Body, &mut Body)> {
    if idx_a == idx_b || idx_a >= bodies.len() || idx_b >= bodies.len() {
        return None;
    }

    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        Some((&mut slice_a[idx_a], &mut slice_b[0]))
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        Some((&mut slice_a[0], &mut slice_b[idx_b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::shapes::Circle;

    #[test]
    fn test_get_mutable_body_pair() {
        let mut bodies: Vec<Body> = (0..3)
            .map(|_| Body::new(Circle::new(1.0).unwrap().into()))
            .collect();

        let (a, b) = get_mutable_body_pair(&mut bodies, 2, 0).expect("distinct indices");
        a.position = Vec2::new(2.0, 0.0);
        b.position = Vec2::new(0.0, 0.0);
        assert_eq!(bodies[2].position, Vec2::new(2.0, 0.0));

        assert!(get_mutable_body_pair(&mut bodies, 1, 1).is_none());
        assert!(get_mutable_body_pair(&mut bodies, 1, 3).is_none());
    }
}
