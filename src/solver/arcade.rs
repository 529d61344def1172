//! Arcade response: positions are corrected directly and velocities are
//! zeroed or reflected on the impacted axis. Bodies never rotate.

use crate::collision::{CollisionContact, Side};
use crate::math::Vec2;
use crate::objects::{Body, CollisionType};

/// Separates `a` and `b` along the contact's MTV. `side` is the side of `a`
/// that was hit.
pub fn resolve(a: &mut Body, b: &mut Body, contact: &CollisionContact, side: Side) {
    let mtv = contact.mtv;
    apply(a, b, -mtv, side);
    apply(b, a, mtv, side.opposite());
}

fn apply(body: &mut Body, other: &Body, mtv: Vec2, side: Side) {
    let movable = matches!(body.collision_type, CollisionType::Active | CollisionType::Elastic);
    if !movable || other.collision_type == CollisionType::Passive {
        return;
    }

    let mut mtv = mtv;
    if body.collision_type == CollisionType::Active && other.collision_type == CollisionType::Active {
        mtv = mtv * 0.5;
    }
    body.position += mtv;
    body.recalc();

    if body.collision_type == CollisionType::Elastic {
        match side {
            Side::Left => body.velocity.x = body.velocity.x.abs(),
            Side::Right => body.velocity.x = -body.velocity.x.abs(),
            Side::Top => body.velocity.y = body.velocity.y.abs(),
            Side::Bottom => body.velocity.y = -body.velocity.y.abs(),
            Side::None => {}
        }
        return;
    }

    if mtv.x != 0.0 {
        body.velocity.x = reconcile(body.velocity.x, other.velocity.x);
    }
    if mtv.y != 0.0 {
        body.velocity.y = reconcile(body.velocity.y, other.velocity.y);
    }
}

/// Both moving the same way: keep the slower one. Opposed: stop.
fn reconcile(own: f64, other: f64) -> f64 {
    if own <= 0.0 && other <= 0.0 {
        own.max(other)
    } else if own >= 0.0 && other >= 0.0 {
        own.min(other)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon};
    const EPSILON: f64 = 1e-10;

    fn circle(x: f64) -> Body {
        Body::new(Circle::new(5.0).unwrap().into()).with_position(Vec2::new(x, 0.0))
    }

    fn wall(x: f64) -> Body {
        Body::new(Polygon::rectangle(10.0, 10.0).unwrap().into())
            .with_position(Vec2::new(x, 0.0))
            .with_collision_type(CollisionType::Fixed)
    }

    fn contact(mtv: Vec2) -> CollisionContact {
        CollisionContact::new(mtv, Vec2::ZERO, mtv.normalize())
    }

    #[test]
    fn test_active_against_fixed_moves_and_stops() {
        let mut a = circle(10.2).with_velocity(Vec2::new(100.0, 0.0));
        let mut b = wall(20.0);
        let c = contact(Vec2::new(0.2, 0.0));
        resolve(&mut a, &mut b, &c, Side::from_direction(c.mtv));

        assert!((a.position.x - 10.0).abs() < EPSILON);
        assert_eq!(a.velocity.x, 0.0);
        assert_eq!(b.position, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_two_active_bodies_split_the_mtv() {
        let mut a = circle(0.0).with_velocity(Vec2::new(5.0, 0.0));
        let mut b = circle(9.0).with_velocity(Vec2::new(-5.0, 0.0));
        let c = contact(Vec2::new(1.0, 0.0));
        resolve(&mut a, &mut b, &c, Side::Right);

        assert!((a.position.x - -0.5).abs() < EPSILON);
        assert!((b.position.x - 9.5).abs() < EPSILON);
        // Head-on: both stop on the impacted axis.
        assert_eq!(a.velocity.x, 0.0);
        assert_eq!(b.velocity.x, 0.0);
    }

    #[test]
    fn test_same_direction_keeps_slower_velocity() {
        let mut a = circle(0.0).with_velocity(Vec2::new(8.0, 3.0));
        let mut b = circle(9.0).with_velocity(Vec2::new(2.0, 0.0));
        let c = contact(Vec2::new(1.0, 0.0));
        resolve(&mut a, &mut b, &c, Side::Right);

        assert_eq!(a.velocity, Vec2::new(2.0, 3.0));
        assert_eq!(b.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_elastic_reflects_velocity() {
        let mut a = circle(10.2)
            .with_velocity(Vec2::new(100.0, 7.0))
            .with_collision_type(CollisionType::Elastic);
        let mut b = wall(20.0);
        let c = contact(Vec2::new(0.2, 0.0));
        resolve(&mut a, &mut b, &c, Side::Right);

        assert_eq!(a.velocity, Vec2::new(-100.0, 7.0));
        assert!((a.position.x - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_elastic_touching_contact_keeps_velocity() {
        let mut a = circle(0.0)
            .with_velocity(Vec2::new(-4.0, 6.0))
            .with_collision_type(CollisionType::Elastic);
        let mut b = circle(0.0).with_position(Vec2::new(0.0, 10.0));
        let c = contact(Vec2::ZERO);
        resolve(&mut a, &mut b, &c, Side::from_direction(c.mtv));

        assert_eq!(a.velocity, Vec2::new(-4.0, 6.0));
        assert_eq!(a.position, Vec2::ZERO);
    }

    #[test]
    fn test_passive_bodies_neither_move_nor_push() {
        let mut a = circle(0.0)
            .with_velocity(Vec2::new(5.0, 0.0))
            .with_collision_type(CollisionType::Passive);
        let mut b = circle(9.0).with_velocity(Vec2::new(-5.0, 0.0));
        let c = contact(Vec2::new(1.0, 0.0));
        resolve(&mut a, &mut b, &c, Side::Right);

        assert_eq!(a.position, Vec2::ZERO);
        assert_eq!(b.position, Vec2::new(9.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(-5.0, 0.0));
    }
}
