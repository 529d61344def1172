use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side of a body an impact arrived on, in a y-down world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The side whose outward direction best matches `direction`.
    pub fn from_direction(direction: Vec2) -> Side {
        if !direction.is_valid() || direction == Vec2::ZERO {
            return Side::None;
        }
        let candidates = [
            (Side::Left, Vec2::LEFT),
            (Side::Right, Vec2::RIGHT),
            (Side::Top, Vec2::UP),
            (Side::Bottom, Vec2::DOWN),
        ];
        let mut best = Side::None;
        let mut best_dot = f64::MIN;
        for (side, axis) in candidates {
            let d = direction.dot(axis);
            if d > best_dot {
                best = side;
                best_dot = d;
            }
        }
        best
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::None => Side::None,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
