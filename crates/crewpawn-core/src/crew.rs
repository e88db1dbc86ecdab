//! Crew roster and per-tick orchestration.
//!
//! A [`Crew`] owns:
//!
//! - the actors, keyed by [`ObjectId`]
//! - the [`ObjectRegistry`] holding every item in the world
//! - the [`InputHub`] routing input sources to actors
//!
//! # Tick
//!
//! [`Crew::tick`] integrates every actor in parallel. Each actor is borrowed
//! exclusively and the physics query is shared read-only, so the result is
//! identical to integrating the actors one after another in id order.
//!
//! # Example
//!
//! ```
//! use crewpawn_core::crew::Crew;
//! use crewpawn_core::config::PawnConfig;
//! use crewpawn_core::input::{Channel, ChannelSet, InputEvent, InputSourceId};
//! use crewpawn_core::world::{FlatGround, HeadlessScene};
//! use glam::Vec2;
//!
//! let mut crew = Crew::new();
//! let pawn = crew.spawn_actor(PawnConfig::default()).unwrap();
//! let pad = InputSourceId::new(0);
//! crew.attach(pawn, pad, ChannelSet::ALL, false).unwrap();
//!
//! let ground = FlatGround::new(0.0);
//! let mut scene = HeadlessScene::new();
//! crew.publish(pad, &InputEvent::vector(Channel::Move, Vec2::Y), &ground, &mut scene);
//! crew.tick(1.0 / 60.0, &ground);
//!
//! assert!(crew.actor(pawn).unwrap().locomotion().velocity().z > 0.0);
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::actor::{ActionOutcome, Actor, ActorContext};
use crate::config::PawnConfig;
use crate::error::{BindingError, ConfigError, InventoryError};
use crate::input::{ChannelSet, InputEvent, InputHub, InputSourceId};
use crate::item::WorldObject;
use crate::object::ObjectId;
use crate::registry::ObjectRegistry;
use crate::world::{PhysicsQuery, SceneGraph};

/// Roster of actors plus the world they act on.
#[derive(Debug, Default)]
pub struct Crew {
    actors: BTreeMap<ObjectId, Actor>,
    registry: ObjectRegistry,
    hub: InputHub,
    ticks: u64,
}

impl Crew {
    /// Creates an empty crew.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Spawning
    // ========================================================================

    /// Adds an actor with `config` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns the validation error when `config` is rejected.
    pub fn spawn_actor(&mut self, config: PawnConfig) -> Result<ObjectId, ConfigError> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejected pawn config");
            return Err(err);
        }
        let id = self.registry.allocate_id();
        self.actors.insert(id, Actor::new(id, config));
        debug!(actor = %id, "spawn actor");
        Ok(id)
    }

    /// Removes an actor, releasing its input binding.
    ///
    /// Items in its inventory stay in the registry and become free to pick up.
    pub fn despawn_actor(&mut self, id: ObjectId) -> Option<Actor> {
        let mut actor = self.actors.remove(&id)?;
        actor.teardown(&mut self.hub);
        self.registry.release_all(id);
        debug!(actor = %id, "despawn actor");
        Some(actor)
    }

    /// Drops `item` from actor `id`'s inventory back into the world.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::UnknownActor`] when `id` is not in the roster
    /// - the inventory's error when the item cannot be removed
    pub fn drop_item(
        &mut self,
        id: ObjectId,
        item: ObjectId,
        scene: &mut dyn SceneGraph,
    ) -> Result<(), InventoryError> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(InventoryError::UnknownActor(id))?;
        actor.remove_item(item, &mut self.registry, scene)
    }

    /// Stores a world object and returns its id.
    pub fn spawn_item<O>(&mut self, object: O) -> ObjectId
    where
        O: WorldObject + 'static,
    {
        self.registry.spawn(object)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Binds `source` to actor `id`.
    ///
    /// # Errors
    ///
    /// - [`BindingError::UnknownActor`] when `id` is not in the roster
    /// - [`BindingError::Conflict`] when the actor is bound and not forced
    pub fn attach(
        &mut self,
        id: ObjectId,
        source: InputSourceId,
        channels: ChannelSet,
        force_override: bool,
    ) -> Result<(), BindingError> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(BindingError::UnknownActor(id))?;
        actor.attach(source, channels, force_override, &mut self.hub)
    }

    /// Releases actor `id`'s input binding.
    pub fn detach(&mut self, id: ObjectId) -> Option<InputSourceId> {
        self.actors.get_mut(&id)?.detach(&mut self.hub)
    }

    /// Delivers `event` from `source` to every actor bound to it, in id order.
    ///
    /// Returns each receiving actor with what it did.
    pub fn publish(
        &mut self,
        source: InputSourceId,
        event: &InputEvent,
        physics: &dyn PhysicsQuery,
        scene: &mut dyn SceneGraph,
    ) -> Vec<(ObjectId, ActionOutcome)> {
        let mut outcomes = Vec::new();
        for id in self.hub.subscribers(source, event.channel) {
            let Some(actor) = self.actors.get_mut(&id) else {
                continue;
            };
            if !actor.binding().routes(source, event.channel) {
                continue;
            }
            let mut ctx = ActorContext {
                physics,
                registry: &mut self.registry,
                scene: &mut *scene,
            };
            outcomes.push((id, actor.handle_input(event, &mut ctx)));
        }
        outcomes
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Integrates every actor by `dt` seconds.
    pub fn tick<P>(&mut self, dt: f32, physics: &P)
    where
        P: PhysicsQuery + Sync + ?Sized,
    {
        self.actors
            .par_iter_mut()
            .for_each(|(_, actor)| actor.tick(dt, physics));
        self.ticks += 1;
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Looks up an actor.
    #[must_use]
    pub fn actor(&self, id: ObjectId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Looks up an actor mutably.
    pub fn actor_mut(&mut self, id: ObjectId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Actors in id order.
    pub fn actors_sorted(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.values()
    }

    /// Number of actors.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// The object registry.
    #[must_use]
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// The object registry, mutably.
    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    /// The input hub.
    #[must_use]
    pub fn hub(&self) -> &InputHub {
        &self.hub
    }
}
