//! Registry of spawned world objects.
//!
//! The registry owns every item in the world, whether it lies on the floor or
//! sits in an inventory. Inventories and view rays refer to items by
//! [`ObjectId`] only.
//!
//! It also records which actor holds each item, so an item in one actor's
//! inventory cannot be taken by another.
//!
//! # Determinism
//!
//! Storage is a `BTreeMap` and ids are handed out monotonically, so
//! iteration order is spawn order on every platform.
//!
//! # Example
//!
//! ```
//! use crewpawn_core::item::{Pickup, Prop, Tool, UsageKind};
//! use crewpawn_core::registry::ObjectRegistry;
//!
//! let mut registry = ObjectRegistry::new();
//! let wall = registry.spawn(Prop::new("wall"));
//! let torch = registry.spawn(Pickup::new(Tool::new("torch", UsageKind::Effect, UsageKind::None)));
//!
//! assert!(registry.interactable(wall).is_none());
//! assert!(registry.interactable(torch).is_some());
//! assert_eq!(registry.ids_sorted().collect::<Vec<_>>(), vec![wall, torch]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::item::{Interactable, Usable, WorldObject};
use crate::object::{IdAllocator, ObjectId};

/// Owner of all world objects.
#[derive(Default)]
pub struct ObjectRegistry {
    ids: IdAllocator,
    objects: BTreeMap<ObjectId, Box<dyn WorldObject>>,
    holders: BTreeMap<ObjectId, ObjectId>,
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("next_id", &self.ids.peek())
            .field(
                "objects",
                &self
                    .objects
                    .iter()
                    .map(|(id, object)| (*id, object.name()))
                    .collect::<Vec<_>>(),
            )
            .field("holders", &self.holders)
            .finish()
    }
}

impl ObjectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves an id without storing an object.
    ///
    /// Used for actors, which live in the crew roster but share the id space.
    pub fn allocate_id(&mut self) -> ObjectId {
        self.ids.allocate()
    }

    /// Stores `object` and returns its id.
    pub fn spawn<O>(&mut self, object: O) -> ObjectId
    where
        O: WorldObject + 'static,
    {
        self.spawn_boxed(Box::new(object))
    }

    /// Stores an already boxed object and returns its id.
    pub fn spawn_boxed(&mut self, object: Box<dyn WorldObject>) -> ObjectId {
        let id = self.ids.allocate();
        debug!(object = %id, name = object.name(), "spawn object");
        self.objects.insert(id, object);
        id
    }

    /// Removes and returns an object.
    pub fn despawn(&mut self, id: ObjectId) -> Option<Box<dyn WorldObject>> {
        let removed = self.objects.remove(&id);
        self.holders.remove(&id);
        if removed.is_some() {
            debug!(object = %id, "despawn object");
        }
        removed
    }

    /// Looks up an object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&dyn WorldObject> {
        self.objects.get(&id).map(|object| &**object)
    }

    /// Looks up an object's usable capability.
    #[must_use]
    pub fn usable(&self, id: ObjectId) -> Option<&dyn Usable> {
        self.get(id).and_then(WorldObject::as_usable)
    }

    /// Looks up an object's interactable capability.
    #[must_use]
    pub fn interactable(&self, id: ObjectId) -> Option<&dyn Interactable> {
        self.get(id).and_then(WorldObject::as_interactable)
    }

    /// The actor holding `item`, if any.
    #[must_use]
    pub fn holder(&self, item: ObjectId) -> Option<ObjectId> {
        self.holders.get(&item).copied()
    }

    /// Records `holder` as holding `item`, or releases it with `None`.
    ///
    /// Ignored for ids that are not stored.
    pub fn set_holder(&mut self, item: ObjectId, holder: Option<ObjectId>) {
        if !self.objects.contains_key(&item) {
            return;
        }
        match holder {
            Some(actor) => {
                self.holders.insert(item, actor);
            }
            None => {
                self.holders.remove(&item);
            }
        }
    }

    /// Releases every item held by `holder`.
    pub fn release_all(&mut self, holder: ObjectId) {
        self.holders.retain(|_, actor| *actor != holder);
    }

    /// Whether `id` is stored.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Stored ids in ascending order.
    pub fn ids_sorted(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
