//! Object identifiers.
//!
//! Actors and items share one id space so a view ray can hit either and the
//! scene graph can parent one to the other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a pawn or an item in the world.
///
/// Hosts see this value in raycast hits, scene-graph calls and inventory
/// slots. Both kinds of object draw from one [`IdAllocator`], so an id
/// found by a view ray resolves to at most one of them: the crew roster for
/// pawns, the [`ObjectRegistry`](crate::registry::ObjectRegistry) for items.
/// Ids are handed out in spawn order and never recycled.
///
/// # Example
///
/// ```
/// use crewpawn_core::object::{IdAllocator, ObjectId};
///
/// let mut ids = IdAllocator::new();
/// let pawn = ids.allocate();
/// let wrench = ids.allocate();
///
/// assert_ne!(pawn, wrench);
/// assert!(pawn < wrench);
/// assert_eq!(wrench, ObjectId::new(1));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Wraps a host-side handle, e.g. one echoed back from the physics layer.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The handle as the host stores it.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// Shared monotonic id allocator.
///
/// The roster and the registry draw from the same allocator so actor and item
/// ids never collide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id.
    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next);
        self.next += 1;
        id
    }

    /// Returns the id the next call to [`allocate`](Self::allocate) will hand out.
    #[must_use]
    pub fn peek(&self) -> ObjectId {
        ObjectId::new(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        let mut ids = vec![ObjectId::new(3), ObjectId::new(1), ObjectId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![ObjectId::new(1), ObjectId::new(2), ObjectId::new(3)]);
    }

    #[test]
    fn formatting() {
        let id = ObjectId::new(42);
        assert_eq!(format!("{id:?}"), "ObjectId(42)");
        assert_eq!(format!("{id}"), "42");
    }

    #[test]
    fn conversions() {
        let id: ObjectId = 9u64.into();
        let raw: u64 = id.into();
        assert_eq!(raw, 9);
    }

    #[test]
    fn serialization_roundtrip() {
        let id = ObjectId::new(12345);
        let json = serde_json::to_string(&id).unwrap();
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.peek(), ObjectId::new(0));
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(a < b);
        assert_eq!(ids.peek(), ObjectId::new(2));
    }
}
