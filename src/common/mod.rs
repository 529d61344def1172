pub mod config;
pub mod material;

pub use config::{BroadphaseStrategy, DebugFlags, PhysicsConfig, ResolutionStrategy};
pub use material::Material;
