use crate::math::Vec2;
use crate::objects::{Body, CollisionType};

/// Advances a body's kinematic state by `dt` with explicit Euler plus the
/// second-order position term. Gravity only pulls on `Active` bodies; fixed
/// bodies still move by their own velocity.
pub fn integrate(body: &mut Body, gravity: Vec2, dt: f64) {
    if body.is_killed() {
        return;
    }

    // --- Linear Motion --- //
    let mut total_acceleration = body.acceleration;
    if body.collision_type == CollisionType::Active {
        total_acceleration += gravity;
    }
    body.velocity += total_acceleration * dt;
    body.position += body.velocity * dt + total_acceleration * (0.5 * dt * dt);

    // --- Angular Motion --- //
    if body.moi > 0.0 {
        body.angular_velocity += body.torque / body.moi * dt;
    }
    body.rotation = wrap_angle(body.rotation + body.angular_velocity * dt);
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Circle;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn circle_body() -> Body {
        Body::new(Circle::new(1.0).unwrap().into())
    }

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut body = circle_body().with_velocity(Vec2::new(10.0, -5.0));
        integrate(&mut body, Vec2::ZERO, 0.1);

        assert!((body.position.x - 1.0).abs() < EPSILON);
        assert!((body.position.y - -0.5).abs() < EPSILON);
        assert_eq!(body.velocity, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_integrate_constant_acceleration() {
        let mut body = circle_body();
        body.acceleration = Vec2::new(5.0, 0.0);
        let dt = 0.1;
        integrate(&mut body, Vec2::ZERO, dt);

        // v = a*dt
        assert!((body.velocity.x - 0.5).abs() < EPSILON);
        // p = v*dt + a*dt²/2 with the already updated velocity
        assert!((body.position.x - (0.05 + 0.025)).abs() < EPSILON);
    }

    #[test]
    fn test_gravity_only_pulls_active_bodies() {
        let gravity = Vec2::new(0.0, 100.0);
        let mut active = circle_body();
        integrate(&mut active, gravity, 0.1);
        assert!((active.velocity.y - 10.0).abs() < EPSILON);

        let mut fixed = circle_body()
            .with_collision_type(CollisionType::Fixed)
            .with_velocity(Vec2::new(1.0, 0.0));
        integrate(&mut fixed, gravity, 0.1);
        assert_eq!(fixed.velocity, Vec2::new(1.0, 0.0));
        assert!((fixed.position.x - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_angular_motion_constant_torque() {
        let mut body = circle_body().with_mass(1.0);
        body.torque = 5.0;
        let expected_alpha = 5.0 / body.moi;
        let dt = 0.1;
        integrate(&mut body, Vec2::ZERO, dt);

        assert!((body.angular_velocity - expected_alpha * dt).abs() < EPSILON);
        assert!((body.rotation - expected_alpha * dt * dt).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_skips_killed_bodies() {
        let mut body = circle_body().with_velocity(Vec2::new(1.0, 1.0));
        body.kill();
        let initial = body.clone();
        integrate(&mut body, Vec2::new(0.0, 10.0), 0.1);
        assert_eq!(body, initial);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0) - 0.0).abs() < EPSILON);
        assert!((wrap_angle(PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(-PI) - -PI).abs() < EPSILON);
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!((wrap_angle(3.0 * PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(-3.0 * PI) - -PI).abs() < EPSILON);
        assert!((wrap_angle(2.0 * PI) - 0.0).abs() < EPSILON);
    }
}
