//! # Crewpawn Core
//!
//! Locomotion, input binding and inventory simulation for first-person crew
//! pawns.
//!
//! This crate is the engine-agnostic half of a character controller: it turns
//! normalized input into velocity and view state, and turns interaction and
//! usage requests into inventory mutations. Everything the host engine owns
//! (collision, scene graph, input dispatch) is reached through the narrow
//! traits in [`world`] and [`input`].
//!
//! ## Architecture
//!
//! - **Locomotion**: staged input, integrated once per tick ([`locomotion`])
//! - **Inventory**: fixed-capacity ring of held items ([`inventory`])
//! - **Items**: `Usable` / `Interactable` capabilities ([`item`])
//! - **Input**: channel bindings with explicit teardown ([`input`])
//! - **Actor**: the pawn composing all of the above ([`actor`])
//! - **Crew**: roster, object registry and input routing ([`crew`])
//!
//! Input handlers only stage state. Only [`actor::Actor::tick`] advances the
//! simulation.
//!
//! ## Usage
//!
//! ```
//! use crewpawn_core::crew::Crew;
//! use crewpawn_core::config::PawnConfig;
//! use crewpawn_core::world::FlatGround;
//! use glam::Vec2;
//!
//! let mut crew = Crew::new();
//! let pawn = crew.spawn_actor(PawnConfig::default()).unwrap();
//! crew.actor_mut(pawn).unwrap().locomotion_mut().set_move_input(Vec2::Y);
//!
//! let ground = FlatGround::new(0.0);
//! for _ in 0..60 {
//!     crew.tick(1.0 / 60.0, &ground);
//! }
//! assert!(crew.actor(pawn).unwrap().locomotion().position().z > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actor;
pub mod config;
pub mod crew;
pub mod error;
pub mod input;
pub mod inventory;
pub mod item;
pub mod locomotion;
pub mod object;
pub mod registry;
pub mod world;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use actor::{ActionOutcome, Actor};
pub use config::PawnConfig;
pub use crew::Crew;
pub use error::{BindingError, ConfigError, InventoryError};
pub use input::{Channel, ChannelSet, InputBinding, InputEvent, InputHub, InputValue};
pub use inventory::Inventory;
pub use item::{Interactable, InteractionKind, Usable, UsageKind, WorldObject};
pub use locomotion::LocomotionState;
pub use object::ObjectId;
pub use registry::ObjectRegistry;
pub use world::{FlatGround, PhysicsQuery, SceneGraph, SweepResult};
