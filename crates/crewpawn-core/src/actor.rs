//! The crew-member pawn.
//!
//! An [`Actor`] composes:
//!
//! - a [`LocomotionState`] driven by staged input and integrated in [`Actor::tick`]
//! - an [`Inventory`] of held item ids
//! - an [`InputBinding`] to at most one input source
//!
//! World effects (interact, use, switch) run synchronously when requested.
//! They borrow the host collaborators through [`ActorContext`] for the
//! duration of the call only.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::config::PawnConfig;
use crate::error::{BindingError, InventoryError};
use crate::input::{Channel, ChannelSet, EventSource, InputBinding, InputEvent, InputPhase, InputSourceId};
use crate::inventory::Inventory;
use crate::item::{Interaction, InteractionKind, UsageKind};
use crate::locomotion::LocomotionState;
use crate::object::ObjectId;
use crate::registry::ObjectRegistry;
use crate::world::{PhysicsQuery, SceneGraph};

/// Host collaborators needed to act on an input event.
pub struct ActorContext<'a> {
    /// Raycasts for the view query.
    pub physics: &'a dyn PhysicsQuery,
    /// Objects that can be interacted with or used, and who holds them.
    pub registry: &'a mut ObjectRegistry,
    /// Scene graph for showing and parenting held items.
    pub scene: &'a mut dyn SceneGraph,
}

/// What handling one input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Locomotion input was staged for the next tick.
    Staged,
    /// The event carried nothing this actor acts on.
    Ignored,
    /// An interaction was attempted.
    Interacted(InteractionKind),
    /// The held item was used. `None` when nothing usable is held.
    Used(Option<UsageKind>),
    /// The selection moved. Carries the item now held.
    Switched(Option<ObjectId>),
}

/// A first-person crew member.
///
/// # Example
///
/// ```
/// use crewpawn_core::actor::Actor;
/// use crewpawn_core::config::PawnConfig;
/// use crewpawn_core::object::ObjectId;
/// use crewpawn_core::world::{FlatGround, HeadlessScene};
///
/// let mut actor = Actor::new(ObjectId::new(0), PawnConfig::default());
/// let mut scene = HeadlessScene::new();
/// let item = ObjectId::new(1);
///
/// actor.inventory_mut().add_item(item).unwrap();
/// assert_eq!(actor.switch_item(1.0, &mut scene), Some(item));
/// assert_eq!(scene.node(item).unwrap().parent, Some(ObjectId::new(0)));
///
/// actor.tick(1.0 / 60.0, &FlatGround::new(0.0));
/// assert!(actor.locomotion().is_grounded());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    id: ObjectId,
    locomotion: LocomotionState,
    inventory: Inventory,
    binding: InputBinding,
    held: Option<ObjectId>,
}

impl Actor {
    /// Creates an actor at the origin with an empty inventory.
    #[must_use]
    pub fn new(id: ObjectId, config: PawnConfig) -> Self {
        Self {
            id,
            locomotion: LocomotionState::new(config),
            inventory: Inventory::new(id),
            binding: InputBinding::new(),
            held: None,
        }
    }

    /// Advances locomotion by `dt` seconds.
    pub fn tick<P>(&mut self, dt: f32, physics: &P)
    where
        P: PhysicsQuery + ?Sized,
    {
        self.locomotion.tick(dt, self.id, physics);
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Binds `source` to this actor.
    ///
    /// # Errors
    ///
    /// [`BindingError::Conflict`] when another source holds the actor and
    /// `force_override` is false.
    pub fn attach<E>(
        &mut self,
        source: InputSourceId,
        channels: ChannelSet,
        force_override: bool,
        events: &mut E,
    ) -> Result<(), BindingError>
    where
        E: EventSource + ?Sized,
    {
        self.binding
            .attach(self.id, source, channels, force_override, events)
    }

    /// Releases input only. Returns the source that was bound.
    pub fn detach<E>(&mut self, events: &mut E) -> Option<InputSourceId>
    where
        E: EventSource + ?Sized,
    {
        self.binding.detach(self.id, events)
    }

    /// Releases input and stops any pending or cooling-down jump.
    ///
    /// Returns the source that was bound.
    pub fn teardown<E>(&mut self, events: &mut E) -> Option<InputSourceId>
    where
        E: EventSource + ?Sized,
    {
        self.locomotion.clear_pending_jump();
        self.locomotion.cancel_jump_cooldown();
        self.binding.detach(self.id, events)
    }

    /// Applies one input event.
    ///
    /// Locomotion channels only stage state. Action channels run at once
    /// against `ctx`. Events whose payload does not fit the channel are
    /// ignored.
    pub fn handle_input(&mut self, event: &InputEvent, ctx: &mut ActorContext<'_>) -> ActionOutcome {
        let performed = event.phase == InputPhase::Performed;
        match event.channel {
            Channel::Move => {
                let input = if performed {
                    event.value.as_vector()
                } else {
                    Some(Vec2::ZERO)
                };
                match input {
                    Some(input) => {
                        self.locomotion.set_move_input(input);
                        ActionOutcome::Staged
                    }
                    None => ActionOutcome::Ignored,
                }
            }
            Channel::Look => match event.value.as_vector() {
                Some(delta) if performed => {
                    self.locomotion.set_look_input(delta);
                    ActionOutcome::Staged
                }
                _ => ActionOutcome::Ignored,
            },
            Channel::Crouch => {
                self.locomotion.set_crouch(performed && event.value.as_button());
                ActionOutcome::Staged
            }
            Channel::Sprint => {
                self.locomotion.set_sprint(performed && event.value.as_button());
                ActionOutcome::Staged
            }
            Channel::Jump if performed && event.value.as_button() => {
                self.locomotion.request_jump();
                ActionOutcome::Staged
            }
            Channel::Interact if performed && event.value.as_button() => {
                let outcome = match self.object_in_view(ctx.physics) {
                    Some(target) => self.interact_with(target, &mut *ctx.registry, &mut *ctx.scene),
                    None => InteractionKind::None,
                };
                ActionOutcome::Interacted(outcome)
            }
            Channel::Primary if performed && event.value.as_button() => {
                ActionOutcome::Used(self.use_primary(&*ctx.registry))
            }
            Channel::Secondary if performed && event.value.as_button() => {
                ActionOutcome::Used(self.use_secondary(&*ctx.registry))
            }
            Channel::SwitchItem if performed => match event.value.as_axis() {
                Some(direction) => ActionOutcome::Switched(self.switch_item(direction, &mut *ctx.scene)),
                None => ActionOutcome::Ignored,
            },
            Channel::Jump
            | Channel::Interact
            | Channel::Primary
            | Channel::Secondary
            | Channel::SwitchItem => ActionOutcome::Ignored,
        }
    }

    // ========================================================================
    // World effects
    // ========================================================================

    /// Start of the view ray: the body position raised to eye height.
    #[must_use]
    pub fn view_origin(&self) -> Vec3 {
        self.locomotion.position() + Vec3::Y * self.locomotion.config().eye_height
    }

    /// The first object along the view ray within interaction distance.
    pub fn object_in_view<P>(&self, physics: &P) -> Option<ObjectId>
    where
        P: PhysicsQuery + ?Sized,
    {
        physics.raycast(
            self.view_origin(),
            self.locomotion.view_direction(),
            self.locomotion.config().interaction_distance,
        )
    }

    /// Interacts with whatever is in view.
    ///
    /// Returns true iff the target is interactable and reported an outcome
    /// other than [`InteractionKind::None`].
    pub fn interact<P, S>(&mut self, physics: &P, registry: &mut ObjectRegistry, scene: &mut S) -> bool
    where
        P: PhysicsQuery + ?Sized,
        S: SceneGraph + ?Sized,
    {
        self.object_in_view(physics)
            .is_some_and(|target| self.interact_with(target, registry, scene).is_success())
    }

    /// Interacts with `target` directly, skipping the view query.
    ///
    /// Items held by another actor report [`InteractionKind::None`]. A
    /// successful pick-up records this actor as the holder and hides the item
    /// until it is switched in.
    pub fn interact_with<S>(
        &mut self,
        target: ObjectId,
        registry: &mut ObjectRegistry,
        scene: &mut S,
    ) -> InteractionKind
    where
        S: SceneGraph + ?Sized,
    {
        if let Some(holder) = registry.holder(target) {
            debug!(actor = %self.id, target = %target, holder = %holder, "target is held");
            return InteractionKind::None;
        }
        let Some(interactable) = registry.interactable(target) else {
            debug!(actor = %self.id, target = %target, "target is not interactable");
            return InteractionKind::None;
        };
        let mut interaction = Interaction {
            interactor: self.id,
            target,
            inventory: &mut self.inventory,
        };
        let outcome = interactable.interact(&mut interaction);
        debug!(actor = %self.id, target = %target, %outcome, "interact");

        if self.inventory.contains(target) {
            registry.set_holder(target, Some(self.id));
            if outcome == InteractionKind::PickUp {
                // Stowed until selected
                scene.set_active(target, false);
            }
        }
        outcome
    }

    /// Primary use of the selected item. `None` when nothing usable is selected.
    #[must_use]
    pub fn use_primary(&self, registry: &ObjectRegistry) -> Option<UsageKind> {
        let item = self.inventory.current_item()?;
        registry.usable(item).map(|usable| usable.use_primary())
    }

    /// Secondary use of the selected item. `None` when nothing usable is selected.
    #[must_use]
    pub fn use_secondary(&self, registry: &ObjectRegistry) -> Option<UsageKind> {
        let item = self.inventory.current_item()?;
        registry.usable(item).map(|usable| usable.use_secondary())
    }

    /// Rotates the selection and moves the held item in the scene.
    ///
    /// Positive `direction` selects the next item, negative the previous.
    /// Zero (or NaN) changes nothing. The previously held item is hidden and
    /// unparented; the new one is parented to this actor at the configured
    /// offset and shown.
    ///
    /// Returns the item held afterwards.
    pub fn switch_item<S>(&mut self, direction: f32, scene: &mut S) -> Option<ObjectId>
    where
        S: SceneGraph + ?Sized,
    {
        self.forget_stale_hold();
        let selected = match direction.partial_cmp(&0.0) {
            Some(Ordering::Greater) => self.inventory.next_item(),
            Some(Ordering::Less) => self.inventory.prev_item(),
            Some(Ordering::Equal) | None => return self.held,
        };
        if selected == self.held {
            return selected;
        }

        if let Some(previous) = self.held.take() {
            scene.set_active(previous, false);
            scene.set_parent(previous, None);
        }
        if let Some(item) = selected {
            scene.set_parent(item, Some(self.id));
            scene.set_local_transform(
                item,
                self.locomotion.config().held_item_offset,
                Quat::IDENTITY,
            );
            scene.set_active(item, true);
            self.held = Some(item);
        }
        debug!(actor = %self.id, held = ?self.held, "switch item");
        selected
    }

    /// Takes `item` out of the inventory and drops it back into the world,
    /// releasing it for other actors.
    ///
    /// # Errors
    ///
    /// Propagates [`Inventory::remove_item`] failures; the registry and scene
    /// are left untouched in that case.
    pub fn remove_item<S>(
        &mut self,
        item: ObjectId,
        registry: &mut ObjectRegistry,
        scene: &mut S,
    ) -> Result<(), InventoryError>
    where
        S: SceneGraph + ?Sized,
    {
        self.inventory.remove_item(item)?;
        if self.held == Some(item) {
            self.held = None;
        }
        if registry.holder(item) == Some(self.id) {
            registry.set_holder(item, None);
        }
        scene.set_parent(item, None);
        scene.set_active(item, true);
        debug!(actor = %self.id, item = %item, "drop item");
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// This actor's id.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Locomotion state.
    #[must_use]
    pub fn locomotion(&self) -> &LocomotionState {
        &self.locomotion
    }

    /// Mutable locomotion state, for staging input directly.
    pub fn locomotion_mut(&mut self) -> &mut LocomotionState {
        &mut self.locomotion
    }

    /// Held items.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable inventory.
    ///
    /// Removing items here skips the registry and scene bookkeeping of
    /// [`remove_item`](Self::remove_item); the held item is re-derived from
    /// the inventory on the next switch.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Input binding.
    #[must_use]
    pub fn binding(&self) -> &InputBinding {
        &self.binding
    }

    /// The item currently parented to this actor.
    #[must_use]
    pub fn held_item(&self) -> Option<ObjectId> {
        self.held.filter(|item| self.inventory.contains(*item))
    }

    /// Drops a hold on an item that left the inventory out of band.
    fn forget_stale_hold(&mut self) {
        if self.held.is_some_and(|item| !self.inventory.contains(item)) {
            self.held = None;
        }
    }

    /// Tuning parameters.
    #[must_use]
    pub fn config(&self) -> &PawnConfig {
        self.locomotion.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputHub, InputValue};
    use crate::item::{Pickup, Prop, Tool};
    use crate::world::{FlatGround, HeadlessScene};

    const ACTOR: ObjectId = ObjectId::new(100);

    fn actor() -> Actor {
        Actor::new(ACTOR, PawnConfig::default())
    }

    fn wrench() -> Pickup<Tool> {
        Pickup::new(Tool::new("wrench", UsageKind::Effect, UsageKind::None))
    }

    /// A sphere directly in front of the default view, within reach.
    fn in_view(id: ObjectId) -> FlatGround {
        FlatGround::new(0.0).with_target(id, Vec3::new(0.0, 1.6, 1.0), 0.25)
    }

    mod view_tests {
        use super::*;

        #[test]
        fn hits_target_in_reach() {
            let target = ObjectId::new(1);
            assert_eq!(actor().object_in_view(&in_view(target)), Some(target));
        }

        #[test]
        fn misses_target_out_of_reach() {
            let target = ObjectId::new(1);
            let far = FlatGround::new(0.0).with_target(target, Vec3::new(0.0, 1.6, 3.0), 0.25);
            assert_eq!(actor().object_in_view(&far), None);
        }

        #[test]
        fn follows_yaw() {
            let target = ObjectId::new(1);
            let mut actor = actor();
            actor.locomotion_mut().set_look_input(Vec2::new(180.0, 0.0));
            actor.tick(0.0, &FlatGround::new(0.0));
            assert_eq!(actor.object_in_view(&in_view(target)), None);
        }

        #[test]
        fn origin_is_eye_height() {
            assert!((actor().view_origin().y - 1.6).abs() < 1e-6);
        }
    }

    mod interact_tests {
        use super::*;

        #[test]
        fn picks_up_item_in_view() {
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            let item = registry.spawn(wrench());
            let mut actor = actor();

            assert!(actor.interact(&in_view(item), &mut registry, &mut scene));
            assert_eq!(actor.inventory().items(), &[item]);
            assert_eq!(registry.holder(item), Some(ACTOR));
        }

        #[test]
        fn pickup_stows_item() {
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            let item = registry.spawn(wrench());
            let mut actor = actor();

            actor.interact(&in_view(item), &mut registry, &mut scene);
            assert!(!scene.node(item).unwrap().active);
        }

        #[test]
        fn prop_fails_without_touching_inventory() {
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            let wall = registry.spawn(Prop::new("wall"));
            let mut actor = actor();

            assert!(!actor.interact(&in_view(wall), &mut registry, &mut scene));
            assert!(actor.inventory().is_empty());
            assert_eq!(registry.holder(wall), None);
            assert_eq!(scene, HeadlessScene::new());
        }

        #[test]
        fn nothing_in_view_fails() {
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            let mut actor = actor();
            assert!(!actor.interact(&FlatGround::new(0.0), &mut registry, &mut scene));
        }

        #[test]
        fn full_inventory_reports_none() {
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            let mut actor = actor();
            for _ in 0..actor.inventory().capacity() {
                let id = registry.spawn(wrench());
                assert_eq!(
                    actor.interact_with(id, &mut registry, &mut scene),
                    InteractionKind::PickUp
                );
            }
            let extra = registry.spawn(wrench());
            assert_eq!(
                actor.interact_with(extra, &mut registry, &mut scene),
                InteractionKind::None
            );
            assert!(!actor.inventory().contains(extra));
            assert_eq!(registry.holder(extra), None);
            assert!(scene.node(extra).is_none());
        }

        #[test]
        fn item_held_by_another_actor_is_refused() {
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            let item = registry.spawn(wrench());
            let mut first = actor();
            let mut second = Actor::new(ObjectId::new(101), PawnConfig::default());

            assert_eq!(
                first.interact_with(item, &mut registry, &mut scene),
                InteractionKind::PickUp
            );
            first.switch_item(1.0, &mut scene);

            assert_eq!(
                second.interact_with(item, &mut registry, &mut scene),
                InteractionKind::None
            );
            assert!(!second.inventory().contains(item));
            assert_eq!(registry.holder(item), Some(ACTOR));
            let node = scene.node(item).unwrap();
            assert_eq!(node.parent, Some(ACTOR));
            assert!(node.active);
        }

        #[test]
        fn dropped_item_can_be_taken() {
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            let item = registry.spawn(wrench());
            let mut first = actor();
            let mut second = Actor::new(ObjectId::new(101), PawnConfig::default());

            first.interact_with(item, &mut registry, &mut scene);
            first.remove_item(item, &mut registry, &mut scene).unwrap();
            assert_eq!(registry.holder(item), None);

            assert_eq!(
                second.interact_with(item, &mut registry, &mut scene),
                InteractionKind::PickUp
            );
            assert_eq!(registry.holder(item), Some(ObjectId::new(101)));
        }
    }

    mod use_tests {
        use super::*;

        #[test]
        fn nothing_held_fails() {
            let registry = ObjectRegistry::new();
            assert_eq!(actor().use_primary(&registry), None);
            assert_eq!(actor().use_secondary(&registry), None);
        }

        #[test]
        fn delegates_to_selected_item() {
            let mut registry = ObjectRegistry::new();
            let item = registry.spawn(wrench());
            let mut scene = HeadlessScene::new();
            let mut actor = actor();
            actor.inventory_mut().add_item(item).unwrap();
            actor.switch_item(1.0, &mut scene);

            assert_eq!(actor.use_primary(&registry), Some(UsageKind::Effect));
            assert_eq!(actor.use_secondary(&registry), Some(UsageKind::None));
        }
    }

    mod switch_tests {
        use super::*;

        fn stocked(count: u64) -> (Actor, Vec<ObjectId>) {
            let mut actor = actor();
            let ids: Vec<_> = (1..=count).map(ObjectId::new).collect();
            for id in &ids {
                actor.inventory_mut().add_item(*id).unwrap();
            }
            (actor, ids)
        }

        #[test]
        fn zero_direction_is_noop() {
            let (mut actor, ids) = stocked(2);
            let mut scene = HeadlessScene::new();
            actor.switch_item(1.0, &mut scene);
            let before = scene.clone();

            assert_eq!(actor.switch_item(0.0, &mut scene), Some(ids[0]));
            assert_eq!(actor.switch_item(f32::NAN, &mut scene), Some(ids[0]));
            assert_eq!(scene, before);
            assert_eq!(actor.held_item(), Some(ids[0]));
        }

        #[test]
        fn parents_new_and_releases_old() {
            let (mut actor, ids) = stocked(2);
            let mut scene = HeadlessScene::new();

            actor.switch_item(1.0, &mut scene);
            actor.switch_item(1.0, &mut scene);

            let old = scene.node(ids[0]).unwrap();
            assert_eq!(old.parent, None);
            assert!(!old.active);

            let new = scene.node(ids[1]).unwrap();
            assert_eq!(new.parent, Some(ACTOR));
            assert!(new.active);
            assert_eq!(new.local_position, actor.config().held_item_offset);
            assert_eq!(scene.children(ACTOR), vec![ids[1]]);
        }

        #[test]
        fn negative_from_none_selects_last() {
            let (mut actor, ids) = stocked(3);
            let mut scene = HeadlessScene::new();
            assert_eq!(actor.switch_item(-1.0, &mut scene), Some(ids[2]));
        }

        #[test]
        fn single_item_stays_held() {
            let (mut actor, ids) = stocked(1);
            let mut scene = HeadlessScene::new();
            actor.switch_item(1.0, &mut scene);
            actor.switch_item(1.0, &mut scene);
            let node = scene.node(ids[0]).unwrap();
            assert_eq!(node.parent, Some(ACTOR));
            assert!(node.active);
        }

        #[test]
        fn empty_inventory_holds_nothing() {
            let mut actor = actor();
            let mut scene = HeadlessScene::new();
            assert_eq!(actor.switch_item(1.0, &mut scene), None);
            assert_eq!(scene, HeadlessScene::new());
        }

        #[test]
        fn removing_held_item_drops_it() {
            let (mut actor, ids) = stocked(2);
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            actor.switch_item(1.0, &mut scene);

            actor.remove_item(ids[0], &mut registry, &mut scene).unwrap();
            assert_eq!(actor.held_item(), None);
            assert_eq!(actor.inventory().current_item(), None);
            let node = scene.node(ids[0]).unwrap();
            assert_eq!(node.parent, None);
            assert!(node.active);
        }

        #[test]
        fn remove_from_empty_errors() {
            let mut actor = actor();
            let mut registry = ObjectRegistry::new();
            let mut scene = HeadlessScene::new();
            assert_eq!(
                actor.remove_item(ObjectId::new(1), &mut registry, &mut scene),
                Err(InventoryError::Empty)
            );
            assert_eq!(scene, HeadlessScene::new());
        }

        #[test]
        fn removal_through_inventory_forgets_hold() {
            let (mut actor, ids) = stocked(2);
            let mut scene = HeadlessScene::new();
            actor.switch_item(1.0, &mut scene);

            actor.inventory_mut().remove_item(ids[0]).unwrap();
            assert_eq!(actor.held_item(), None);

            assert_eq!(actor.switch_item(1.0, &mut scene), Some(ids[1]));
            assert_eq!(actor.held_item(), Some(ids[1]));
            let node = scene.node(ids[1]).unwrap();
            assert_eq!(node.parent, Some(ACTOR));
            assert!(node.active);
        }
    }

    mod input_tests {
        use super::*;

        struct Fixture {
            ground: FlatGround,
            registry: ObjectRegistry,
            scene: HeadlessScene,
        }

        impl Fixture {
            fn new() -> Self {
                Self {
                    ground: FlatGround::new(0.0),
                    registry: ObjectRegistry::new(),
                    scene: HeadlessScene::new(),
                }
            }

            fn send(&mut self, actor: &mut Actor, event: InputEvent) -> ActionOutcome {
                let mut ctx = ActorContext {
                    physics: &self.ground,
                    registry: &mut self.registry,
                    scene: &mut self.scene,
                };
                actor.handle_input(&event, &mut ctx)
            }
        }

        #[test]
        fn move_stages_and_cancel_resets() {
            let mut fx = Fixture::new();
            let mut actor = actor();
            let outcome = fx.send(&mut actor, InputEvent::vector(Channel::Move, Vec2::new(0.0, 2.0)));
            assert_eq!(outcome, ActionOutcome::Staged);
            assert_eq!(actor.locomotion().move_input(), Vec2::Y);

            fx.send(&mut actor, InputEvent::canceled(Channel::Move));
            assert_eq!(actor.locomotion().move_input(), Vec2::ZERO);
        }

        #[test]
        fn mistyped_payload_is_ignored() {
            let mut fx = Fixture::new();
            let mut actor = actor();
            let outcome = fx.send(&mut actor, InputEvent::axis(Channel::Move, 1.0));
            assert_eq!(outcome, ActionOutcome::Ignored);
            assert_eq!(actor.locomotion().move_input(), Vec2::ZERO);
        }

        #[test]
        fn crouch_and_sprint_follow_phase() {
            let mut fx = Fixture::new();
            let mut actor = actor();
            fx.send(&mut actor, InputEvent::press(Channel::Sprint));
            assert!(actor.locomotion().is_sprinting());
            fx.send(&mut actor, InputEvent::press(Channel::Crouch));
            assert!(actor.locomotion().is_crouching());
            assert!(!actor.locomotion().is_sprinting());
            fx.send(&mut actor, InputEvent::canceled(Channel::Crouch));
            assert!(!actor.locomotion().is_crouching());
        }

        #[test]
        fn jump_release_is_ignored() {
            let mut fx = Fixture::new();
            let mut actor = actor();
            let outcome = fx.send(&mut actor, InputEvent::canceled(Channel::Jump));
            assert_eq!(outcome, ActionOutcome::Ignored);
            assert!(!actor.locomotion().is_jump_pending());

            fx.send(&mut actor, InputEvent::press(Channel::Jump));
            assert!(actor.locomotion().is_jump_pending());
        }

        #[test]
        fn interact_pickup_stows_item() {
            let mut fx = Fixture::new();
            let item = fx.registry.spawn(wrench());
            fx.ground = in_view(item);
            let mut actor = actor();

            let outcome = fx.send(&mut actor, InputEvent::press(Channel::Interact));
            assert_eq!(outcome, ActionOutcome::Interacted(InteractionKind::PickUp));
            assert!(!fx.scene.node(item).unwrap().active);

            let outcome = fx.send(&mut actor, InputEvent::axis(Channel::SwitchItem, 1.0));
            assert_eq!(outcome, ActionOutcome::Switched(Some(item)));
            assert!(fx.scene.node(item).unwrap().active);

            let outcome = fx.send(&mut actor, InputEvent::press(Channel::Primary));
            assert_eq!(outcome, ActionOutcome::Used(Some(UsageKind::Effect)));
        }

        #[test]
        fn use_with_nothing_held() {
            let mut fx = Fixture::new();
            let mut actor = actor();
            let outcome = fx.send(&mut actor, InputEvent::press(Channel::Secondary));
            assert_eq!(outcome, ActionOutcome::Used(None));
        }

        #[test]
        fn switch_accepts_button_payload() {
            let mut fx = Fixture::new();
            let mut actor = actor();
            actor.inventory_mut().add_item(ObjectId::new(7)).unwrap();
            let outcome = fx.send(
                &mut actor,
                InputEvent::performed(Channel::SwitchItem, InputValue::Button(true)),
            );
            assert_eq!(outcome, ActionOutcome::Switched(Some(ObjectId::new(7))));
        }
    }

    mod teardown_tests {
        use super::*;

        #[test]
        fn detaches_and_cancels_jump() {
            let mut hub = InputHub::new();
            let mut actor = actor();
            let pad = InputSourceId::new(1);
            actor.attach(pad, ChannelSet::ALL, false, &mut hub).unwrap();

            // Land, jump, and queue another press while cooling down
            let ground = FlatGround::new(0.0);
            actor.tick(1.0 / 60.0, &ground);
            actor.locomotion_mut().request_jump();
            actor.tick(1.0 / 60.0, &ground);
            assert!(actor.locomotion().cooldown().is_running());

            assert_eq!(actor.teardown(&mut hub), Some(pad));
            assert_eq!(hub.subscription_count(), 0);
            assert!(!actor.locomotion().cooldown().is_running());
            assert!(actor.locomotion().is_jump_ready());
            assert!(!actor.locomotion().is_jump_pending());
        }

        #[test]
        fn attach_conflict_surfaces() {
            let mut hub = InputHub::new();
            let mut actor = actor();
            actor
                .attach(InputSourceId::new(1), ChannelSet::ALL, false, &mut hub)
                .unwrap();
            let err = actor
                .attach(InputSourceId::new(2), ChannelSet::ALL, false, &mut hub)
                .unwrap_err();
            assert_eq!(
                err,
                BindingError::Conflict {
                    current: InputSourceId::new(1)
                }
            );
        }
    }
}
