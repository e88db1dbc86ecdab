//! Item capabilities.
//!
//! World objects expose what they can do through [`WorldObject`]:
//!
//! - [`Usable`]: primary/secondary actions while held
//! - [`Interactable`]: a reaction to an actor looking at it and interacting
//!
//! A pick-up is an [`Interactable`] whose handler adds itself to the
//! interactor's inventory. The actor never inserts the item itself; the
//! target decides whether and how it joins the inventory.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;
use crate::object::ObjectId;

/// Outcome of using an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageKind {
    /// Nothing happened.
    None,
    /// The item produced its effect.
    Effect,
}

/// Outcome of interacting with an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    /// Nothing happened.
    None,
    /// The object moved into the interactor's inventory.
    PickUp,
    /// The object was activated in place (switch, door, console).
    Activate,
}

impl InteractionKind {
    /// Whether the interaction counts as a success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::PickUp => write!(f, "PickUp"),
            Self::Activate => write!(f, "Activate"),
        }
    }
}

/// Something that can be used while held.
pub trait Usable {
    /// Performs the primary action.
    fn use_primary(&self) -> UsageKind;

    /// Performs the secondary action.
    fn use_secondary(&self) -> UsageKind;
}

/// Context handed to [`Interactable::interact`].
#[derive(Debug)]
pub struct Interaction<'a> {
    /// The actor interacting.
    pub interactor: ObjectId,
    /// The object being interacted with.
    pub target: ObjectId,
    /// The interactor's inventory.
    pub inventory: &'a mut Inventory,
}

/// Something an actor can interact with.
pub trait Interactable {
    /// Reacts to `interaction.interactor`.
    ///
    /// May add `interaction.target` to `interaction.inventory`.
    fn interact(&self, interaction: &mut Interaction<'_>) -> InteractionKind;
}

/// Capability lookup for objects stored in the registry.
pub trait WorldObject {
    /// Display name, for logs.
    fn name(&self) -> &str;

    /// The usable capability, if any.
    fn as_usable(&self) -> Option<&dyn Usable> {
        None
    }

    /// The interactable capability, if any.
    fn as_interactable(&self) -> Option<&dyn Interactable> {
        None
    }
}

// =============================================================================
// Stock objects
// =============================================================================

/// A usable item with fixed outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    name: String,
    primary: UsageKind,
    secondary: UsageKind,
}

impl Tool {
    /// Creates a tool whose actions report `primary` and `secondary`.
    #[must_use]
    pub fn new(name: impl Into<String>, primary: UsageKind, secondary: UsageKind) -> Self {
        Self {
            name: name.into(),
            primary,
            secondary,
        }
    }
}

impl Usable for Tool {
    fn use_primary(&self) -> UsageKind {
        self.primary
    }

    fn use_secondary(&self) -> UsageKind {
        self.secondary
    }
}

impl WorldObject for Tool {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_usable(&self) -> Option<&dyn Usable> {
        Some(self)
    }
}

/// Wraps a usable item so interacting with it picks it up.
///
/// # Example
///
/// ```
/// use crewpawn_core::inventory::Inventory;
/// use crewpawn_core::item::{Interaction, InteractionKind, Interactable, Pickup, Tool, UsageKind};
/// use crewpawn_core::object::ObjectId;
///
/// let wrench = Pickup::new(Tool::new("wrench", UsageKind::Effect, UsageKind::None));
/// let mut inventory = Inventory::new(ObjectId::new(0));
/// let mut interaction = Interaction {
///     interactor: ObjectId::new(0),
///     target: ObjectId::new(1),
///     inventory: &mut inventory,
/// };
///
/// assert_eq!(wrench.interact(&mut interaction), InteractionKind::PickUp);
/// assert!(inventory.contains(ObjectId::new(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup<U> {
    item: U,
}

impl<U> Pickup<U> {
    /// Makes `item` pickable.
    #[must_use]
    pub fn new(item: U) -> Self {
        Self { item }
    }

    /// The wrapped item.
    #[must_use]
    pub fn item(&self) -> &U {
        &self.item
    }
}

impl<U: Usable> Usable for Pickup<U> {
    fn use_primary(&self) -> UsageKind {
        self.item.use_primary()
    }

    fn use_secondary(&self) -> UsageKind {
        self.item.use_secondary()
    }
}

impl<U> Interactable for Pickup<U> {
    fn interact(&self, interaction: &mut Interaction<'_>) -> InteractionKind {
        match interaction.inventory.add_item(interaction.target) {
            Ok(()) => InteractionKind::PickUp,
            Err(_) => InteractionKind::None,
        }
    }
}

impl<U: WorldObject + Usable> WorldObject for Pickup<U> {
    fn name(&self) -> &str {
        self.item.name()
    }

    fn as_usable(&self) -> Option<&dyn Usable> {
        Some(self)
    }

    fn as_interactable(&self) -> Option<&dyn Interactable> {
        Some(self)
    }
}

/// Scenery: blocks view rays, offers no capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prop {
    name: String,
}

impl Prop {
    /// Creates a prop.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl WorldObject for Prop {
    fn name(&self) -> &str {
        &self.name
    }
}
