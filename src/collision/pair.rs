use crate::collision::{collide, CollisionContact};
use crate::objects::{Body, BodyId, CollisionType};

/// Unordered identity of a pair: the same two bodies always produce the
/// same key, whichever order they are given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(BodyId, BodyId);

impl PairKey {
    pub fn new(a: BodyId, b: BodyId) -> Self {
        if a <= b {
            PairKey(a, b)
        } else {
            PairKey(b, a)
        }
    }

    pub fn ids(&self) -> (BodyId, BodyId) {
        (self.0, self.1)
    }

    pub fn involves(&self, id: BodyId) -> bool {
        self.0 == id || self.1 == id
    }
}

/// A candidate collision found by the broadphase. `index_a`/`index_b`
/// address the world's body list for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub key: PairKey,
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub index_a: usize,
    pub index_b: usize,
    /// Filled by the narrowphase, `None` when the shapes do not touch.
    pub contact: Option<CollisionContact>,
}

impl Pair {
    pub fn new(a: &Body, index_a: usize, b: &Body, index_b: usize) -> Self {
        Self {
            key: PairKey::new(a.id(), b.id()),
            body_a: a.id(),
            body_b: b.id(),
            index_a,
            index_b,
            contact: None,
        }
    }

    /// Whether the two bodies may be tested at all. Symmetric.
    pub fn can_collide(a: &Body, b: &Body) -> bool {
        if a.id() == b.id() || a.is_killed() || b.is_killed() {
            return false;
        }
        if a.collision_type == CollisionType::PreventCollision || b.collision_type == CollisionType::PreventCollision {
            return false;
        }
        !(a.is_fixed() && b.is_fixed())
    }

    /// Runs the narrowphase on the pair's shapes and stores the result.
    pub fn collide(&mut self, a: &Body, b: &Body) -> Option<CollisionContact> {
        self.contact = collide(&a.shape, &b.shape);
        self.contact
    }
}
