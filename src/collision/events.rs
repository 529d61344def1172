//! Collision notifications buffered during a frame.

use rustc_hash::FxHashSet;

use crate::collision::{PairKey, Side};
use crate::math::Vec2;
use crate::objects::BodyId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// Raised by the solver for each participant right before resolution.
    /// `intersection` is the MTV seen from `target`.
    PreCollision {
        target: BodyId,
        other: BodyId,
        side: Side,
        intersection: Vec2,
    },
    /// The pair touched this frame but not the previous one.
    CollisionStart {
        target: BodyId,
        other: BodyId,
        pair: PairKey,
    },
    /// The pair touched the previous frame but not this one.
    CollisionEnd { target: BodyId, other: BodyId },
}

impl CollisionEvent {
    pub fn target(&self) -> BodyId {
        match *self {
            CollisionEvent::PreCollision { target, .. }
            | CollisionEvent::CollisionStart { target, .. }
            | CollisionEvent::CollisionEnd { target, .. } => target,
        }
    }
}

/// Diffs the set of touching pairs between consecutive frames.
#[derive(Debug, Default, Clone)]
pub struct ContactTracker {
    previous: FxHashSet<PairKey>,
    current: FxHashSet<PairKey>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();
    }

    /// Records a touching pair; repeated reports within a frame are merged.
    pub fn report(&mut self, key: PairKey) {
        self.current.insert(key);
    }

    /// Drops a body from both frames so it raises no end event after removal.
    pub fn forget(&mut self, id: BodyId) {
        self.previous.retain(|key| !key.involves(id));
        self.current.retain(|key| !key.involves(id));
    }

    pub fn is_touching(&self, key: &PairKey) -> bool {
        self.current.contains(key)
    }

    /// Appends start and end events, two per pair, in a stable order.
    pub fn end_frame(&mut self, events: &mut Vec<CollisionEvent>) {
        let mut started: Vec<PairKey> = self.current.difference(&self.previous).copied().collect();
        let mut ended: Vec<PairKey> = self.previous.difference(&self.current).copied().collect();
        started.sort_unstable();
        ended.sort_unstable();

        for pair in started {
            let (a, b) = pair.ids();
            events.push(CollisionEvent::CollisionStart { target: a, other: b, pair });
            events.push(CollisionEvent::CollisionStart { target: b, other: a, pair });
        }
        for pair in ended {
            let (a, b) = pair.ids();
            events.push(CollisionEvent::CollisionEnd { target: a, other: b });
            events.push(CollisionEvent::CollisionEnd { target: b, other: a });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_then_persist_then_end() {
        let key = PairKey::new(BodyId(1), BodyId(2));
        let mut tracker = ContactTracker::new();
        let mut events = Vec::new();

        tracker.begin_frame();
        tracker.report(key);
        tracker.report(key);
        tracker.end_frame(&mut events);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], CollisionEvent::CollisionStart { target: BodyId(1), other: BodyId(2), .. }));
        assert!(matches!(events[1], CollisionEvent::CollisionStart { target: BodyId(2), other: BodyId(1), .. }));

        events.clear();
        tracker.begin_frame();
        tracker.report(key);
        tracker.end_frame(&mut events);
        assert!(events.is_empty());

        tracker.begin_frame();
        tracker.end_frame(&mut events);
        assert_eq!(
            events,
            vec![
                CollisionEvent::CollisionEnd { target: BodyId(1), other: BodyId(2) },
                CollisionEvent::CollisionEnd { target: BodyId(2), other: BodyId(1) },
            ]
        );
    }

    #[test]
    fn test_forget_suppresses_end() {
        let key = PairKey::new(BodyId(1), BodyId(2));
        let mut tracker = ContactTracker::new();
        let mut events = Vec::new();
        tracker.begin_frame();
        tracker.report(key);
        tracker.end_frame(&mut events);
        events.clear();

        tracker.forget(BodyId(2));
        tracker.begin_frame();
        tracker.end_frame(&mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_event_target() {
        let event = CollisionEvent::PreCollision {
            target: BodyId(5),
            other: BodyId(6),
            side: Side::Left,
            intersection: Vec2::new(-1.0, 0.0),
        };
        assert_eq!(event.target(), BodyId(5));
    }
}
