//! Error type shared by the collision pipeline.

use thiserror::Error;

/// Errors surfaced by shape construction, configuration and the dynamic tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    /// A shape was built from geometry it cannot represent.
    #[error("invalid shape: {reason}")]
    InvalidShape { reason: &'static str },

    /// A `PhysicsConfig` value is outside its usable range.
    #[error("invalid physics config: {reason}")]
    InvalidConfig { reason: &'static str },

    /// The dynamic tree lost a link that its structure requires.
    #[error("dynamic tree corrupted at node {node}: {reason}")]
    TreeCorrupted { node: usize, reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CollisionError::TreeCorrupted { node: 3, reason: "missing child" };
        assert_eq!(err.to_string(), "dynamic tree corrupted at node 3: missing child");

        let err = CollisionError::InvalidShape { reason: "radius must be non-negative" };
        assert_eq!(err.to_string(), "invalid shape: radius must be non-negative");
    }
}
