//! Fixed-capacity inventory with cyclic selection.
//!
//! The inventory stores item *ids*, never the items themselves; items stay
//! owned by the [`ObjectRegistry`](crate::registry::ObjectRegistry). The
//! current selection is tracked by identity, so adding or removing other
//! items never makes it point at the wrong entry.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::InventoryError;
use crate::object::ObjectId;

/// Default number of items an inventory can hold.
pub const INVENTORY_SIZE: usize = 5;

/// Index arithmetic that treats a sequence of length `len` as circular.
///
/// `len` must be non-zero.
fn wrap_index(index: isize, len: usize) -> usize {
    #[allow(clippy::cast_possible_wrap)]
    let len = len as isize;
    #[allow(clippy::cast_sign_loss)]
    let wrapped = ((index % len) + len) % len;
    wrapped as usize
}

/// Ordered collection of usable items held by one actor.
///
/// # Invariants
///
/// - `len() <= capacity()`
/// - an id appears at most once
/// - the selection, if set, is a member
///
/// # Example
///
/// ```
/// use crewpawn_core::inventory::Inventory;
/// use crewpawn_core::object::ObjectId;
///
/// let mut inventory = Inventory::new(ObjectId::new(0));
/// let (a, b) = (ObjectId::new(1), ObjectId::new(2));
/// inventory.add_item(a).unwrap();
/// inventory.add_item(b).unwrap();
///
/// assert_eq!(inventory.next_item(), Some(a));
/// assert_eq!(inventory.next_item(), Some(b));
/// assert_eq!(inventory.next_item(), Some(a));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    owner: ObjectId,
    capacity: usize,
    items: Vec<ObjectId>,
    current: Option<ObjectId>,
}

impl Inventory {
    /// Creates an empty inventory with the default capacity.
    #[must_use]
    pub fn new(owner: ObjectId) -> Self {
        Self::with_capacity(owner, INVENTORY_SIZE)
    }

    /// Creates an empty inventory holding at most `capacity` items.
    #[must_use]
    pub fn with_capacity(owner: ObjectId, capacity: usize) -> Self {
        Self {
            owner,
            capacity,
            items: Vec::with_capacity(capacity),
            current: None,
        }
    }

    /// Appends an item.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::Full`] when the inventory is at capacity
    /// - [`InventoryError::AlreadyHeld`] when the item is already a member
    pub fn add_item(&mut self, item: ObjectId) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.capacity,
            });
        }
        if self.contains(item) {
            return Err(InventoryError::AlreadyHeld(item));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes an item, clearing the selection if it was selected.
    ///
    /// Removing a non-member is a caller bug: it trips a debug assertion and
    /// is reported as [`InventoryError::NotPresent`] in release builds.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::Empty`] when there is nothing to remove
    /// - [`InventoryError::NotPresent`] when the item is not a member
    pub fn remove_item(&mut self, item: ObjectId) -> Result<(), InventoryError> {
        if self.is_empty() {
            return Err(InventoryError::Empty);
        }

        let index = self.position(item);
        if index.is_none() {
            error!(owner = %self.owner, item = %item, "removing item not held by this inventory");
        }
        debug_assert!(
            index.is_some(),
            "item {item} not in inventory of {}",
            self.owner
        );
        let Some(index) = index else {
            return Err(InventoryError::NotPresent(item));
        };

        if self.current == Some(item) {
            self.current = None;
        }
        self.items.remove(index);
        Ok(())
    }

    /// The selected item, if any.
    #[must_use]
    pub fn current_item(&self) -> Option<ObjectId> {
        self.current
    }

    /// Selects and returns the item after the current one.
    ///
    /// With no selection the first item is selected. Wraps from last to
    /// first. Returns `None` when empty.
    pub fn next_item(&mut self) -> Option<ObjectId> {
        self.step(1)
    }

    /// Selects and returns the item before the current one.
    ///
    /// With no selection the last item is selected. Wraps from first to
    /// last. Returns `None` when empty.
    pub fn prev_item(&mut self) -> Option<ObjectId> {
        self.step(-1)
    }

    fn step(&mut self, offset: isize) -> Option<ObjectId> {
        if self.items.is_empty() {
            return None;
        }

        let index = match self.current.and_then(|id| self.position(id)) {
            #[allow(clippy::cast_possible_wrap)]
            Some(i) => wrap_index(i as isize + offset, self.items.len()),
            None if offset >= 0 => 0,
            None => self.items.len() - 1,
        };
        self.current = Some(self.items[index]);
        self.current
    }

    /// Selects a specific member.
    ///
    /// Returns `false` (and leaves the selection alone) for non-members.
    pub fn select(&mut self, item: ObjectId) -> bool {
        if self.contains(item) {
            self.current = Some(item);
            true
        } else {
            false
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    /// Whether `item` is held.
    #[must_use]
    pub fn contains(&self, item: ObjectId) -> bool {
        self.items.contains(&item)
    }

    fn position(&self, item: ObjectId) -> Option<usize> {
        self.items.iter().position(|&id| id == item)
    }

    /// Held items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ObjectId] {
        &self.items
    }

    /// Number of held items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether no more items fit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Maximum number of items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The actor this inventory belongs to.
    #[must_use]
    pub fn owner(&self) -> ObjectId {
        self.owner
    }
}
