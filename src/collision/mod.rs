pub mod aabb;
pub mod contact;
pub mod events;
pub mod narrowphase;
pub mod pair;
pub mod side;

pub use aabb::AABB;
pub use contact::CollisionContact;
pub use events::{CollisionEvent, ContactTracker};
pub use narrowphase::collide;
pub use pair::{Pair, PairKey};
pub use side::Side;
