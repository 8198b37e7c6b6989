//! Stable scene-node identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable identifier for a node in a loaded scene.
///
/// Ids are assigned sequentially by the `Scene` that owns the node and are
/// only meaningful for the lifetime of that scene; loading a new model
/// produces a fresh id space.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a NodeId from a raw value (for deserialization/testing)
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        let id = NodeId::from_raw(42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_ordering() {
        let a = NodeId::from_raw(1);
        let b = NodeId::from_raw(2);
        assert!(a < b);
        assert_ne!(a, b);
    }
}
