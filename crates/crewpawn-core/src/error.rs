//! Error types.
//!
//! Every failure a caller can recover from is a variant here. Ordinary
//! control flow (empty inventory rotation, nothing held) is expressed with
//! `Option` instead.

use thiserror::Error;

use crate::input::InputSourceId;
use crate::object::ObjectId;

/// Failures from [`Inventory`](crate::inventory::Inventory) mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The inventory already holds `capacity` items.
    #[error("inventory full ({capacity} items)")]
    Full {
        /// Capacity of the inventory that rejected the item.
        capacity: usize,
    },
    /// Removal was requested from an empty inventory.
    #[error("inventory is empty")]
    Empty,
    /// The item is not held by this inventory.
    #[error("item {0} is not in this inventory")]
    NotPresent(ObjectId),
    /// The item is already held by this inventory.
    #[error("item {0} is already in this inventory")]
    AlreadyHeld(ObjectId),
    /// No actor with this id is in the roster.
    #[error("unknown actor {0}")]
    UnknownActor(ObjectId),
}

/// Failures from [`InputBinding::attach`](crate::input::InputBinding::attach).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// Another input source already controls the actor.
    #[error("actor already bound to input source {current}")]
    Conflict {
        /// The source currently holding the binding.
        current: InputSourceId,
    },
    /// The actor is not present in the crew roster.
    #[error("no actor with id {0}")]
    UnknownActor(ObjectId),
}

/// Failures from loading or validating a [`PawnConfig`](crate::config::PawnConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid pawn config: {0}")]
    Parse(String),
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A field that must be non-negative was negative.
    #[error("{field} must be >= 0 (got {value})")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// Speed tiers are out of order.
    #[error("speed tiers must satisfy crouch <= default <= run (got {crouch}, {default}, {run})")]
    SpeedOrder {
        /// Crouch speed.
        crouch: f32,
        /// Default speed.
        default: f32,
        /// Run speed.
        run: f32,
    },
    /// Interaction distance must be strictly positive.
    #[error("interaction_distance must be > 0 (got {0})")]
    InteractionDistance(f32),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
