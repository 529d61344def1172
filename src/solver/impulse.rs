//! Impulse response with restitution, Coulomb friction and angular velocity.

use crate::collision::CollisionContact;
use crate::common::PhysicsConfig;
use crate::math::Vec2;
use crate::objects::{Body, CollisionType};

/// Applies the contact impulse to both bodies and accumulates their share of
/// the MTV. Positions are not touched until `Body::apply_mtv`.
pub fn resolve(a: &mut Body, b: &mut Body, contact: &CollisionContact, config: &PhysicsConfig) {
    if a.collision_type == CollisionType::Passive || b.collision_type == CollisionType::Passive {
        return;
    }

    let mtv = contact.mtv;
    if a.is_fixed() {
        b.add_mtv(mtv);
    } else if b.is_fixed() {
        a.add_mtv(-mtv);
    } else {
        a.add_mtv(mtv * -0.5);
        b.add_mtv(mtv * 0.5);
    }

    let normal = contact.normal;
    let material = a.material.mix(&b.material);
    let (inv_mass_a, inv_mass_b) = (a.inv_mass(), b.inv_mass());
    let (inv_moi_a, inv_moi_b) = (a.inv_moi(), b.inv_moi());

    // Lever arms from each shape's centre to the contact point.
    let ra = contact.point - a.center();
    let rb = contact.point - b.center();

    let rv = relative_velocity(a, b, ra, rb);
    let rv_normal = rv.dot(normal);
    if rv_normal > 0.0 {
        return;
    }

    let ra_n = ra.cross(normal);
    let rb_n = rb.cross(normal);
    let denominator = inv_mass_a + inv_mass_b + inv_moi_a * ra_n * ra_n + inv_moi_b * rb_n * rb_n;
    if denominator <= 0.0 {
        return;
    }
    let j = -(1.0 + material.restitution) * rv_normal / denominator;
    apply_impulse(a, b, ra, rb, normal * j, config);

    // Friction along the contact tangent, bounded by the Coulomb cone.
    let tangent = normal.perpendicular().normalize();
    let rv = relative_velocity(a, b, ra, rb);
    let ra_t = ra.cross(tangent);
    let rb_t = rb.cross(tangent);
    let denominator = inv_mass_a + inv_mass_b + inv_moi_a * ra_t * ra_t + inv_moi_b * rb_t * rb_t;
    if denominator <= 0.0 {
        return;
    }
    let max_friction = material.friction * j;
    let jt = (-rv.dot(tangent) / denominator).clamp(-max_friction, max_friction);
    apply_impulse(a, b, ra, rb, tangent * jt, config);
}

/// Velocity of B's contact point relative to A's.
fn relative_velocity(a: &Body, b: &Body, ra: Vec2, rb: Vec2) -> Vec2 {
    let va = a.velocity + ra.cross_scalar(-a.angular_velocity);
    let vb = b.velocity + rb.cross_scalar(-b.angular_velocity);
    vb - va
}

fn apply_impulse(a: &mut Body, b: &mut Body, ra: Vec2, rb: Vec2, impulse: Vec2, config: &PhysicsConfig) {
    a.velocity -= impulse * a.inv_mass();
    b.velocity += impulse * b.inv_mass();
    if config.allow_rigid_body_rotation {
        a.angular_velocity -= ra.cross(impulse) * a.inv_moi();
        b.angular_velocity += rb.cross(impulse) * b.inv_moi();
    }
}
