//! Input channels and bindings.
//!
//! An input source (one player's device map) publishes events on named
//! [`Channel`]s. An actor receives them only while an [`InputBinding`] ties
//! the source to it:
//!
//! - [`InputBinding::attach`] subscribes the actor to a [`ChannelSet`] on an
//!   [`EventSource`]; it refuses while another source holds the actor unless
//!   forced
//! - [`InputBinding::detach`] unsubscribes every channel it subscribed
//!
//! The binding keeps its own registration table, so teardown never depends
//! on the event source remembering what was subscribed.
//!
//! # Example
//!
//! ```
//! use crewpawn_core::input::{Channel, ChannelSet, InputBinding, InputHub, InputSourceId};
//! use crewpawn_core::object::ObjectId;
//!
//! let mut hub = InputHub::new();
//! let mut binding = InputBinding::new();
//! let pawn = ObjectId::new(0);
//! let pad = InputSourceId::new(1);
//!
//! binding.attach(pawn, pad, ChannelSet::ALL, false, &mut hub).unwrap();
//! assert_eq!(hub.subscribers(pad, Channel::Jump), vec![pawn]);
//!
//! binding.detach(pawn, &mut hub);
//! assert!(hub.subscribers(pad, Channel::Jump).is_empty());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::BindingError;
use crate::object::ObjectId;

/// Threshold above which an analog value counts as a pressed button.
pub const PRESS_POINT: f32 = 0.5;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of an input source (one player's device map).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InputSourceId(u32);

impl InputSourceId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InputSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Channels
// =============================================================================

/// A named input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// 2D movement direction.
    Move,
    /// 2D look delta in degrees.
    Look,
    /// Jump button.
    Jump,
    /// Crouch button (held).
    Crouch,
    /// Sprint button (held).
    Sprint,
    /// Interact with the object in view.
    Interact,
    /// Primary use of the held item.
    Primary,
    /// Secondary use of the held item.
    Secondary,
    /// Scroll through held items; sign picks the direction.
    SwitchItem,
}

impl Channel {
    /// Every channel, in declaration order.
    pub const ALL: [Channel; 9] = [
        Channel::Move,
        Channel::Look,
        Channel::Jump,
        Channel::Crouch,
        Channel::Sprint,
        Channel::Interact,
        Channel::Primary,
        Channel::Secondary,
        Channel::SwitchItem,
    ];

    /// Action-map name of the channel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Move => "Move",
            Self::Look => "Look",
            Self::Jump => "Jump",
            Self::Crouch => "Crouch",
            Self::Sprint => "Sprint",
            Self::Interact => "Interact",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::SwitchItem => "SwitchItem",
        }
    }

    /// Looks a channel up by action-map name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// The single-channel set.
    #[must_use]
    pub const fn flag(self) -> ChannelSet {
        match self {
            Self::Move => ChannelSet::MOVE,
            Self::Look => ChannelSet::LOOK,
            Self::Jump => ChannelSet::JUMP,
            Self::Crouch => ChannelSet::CROUCH,
            Self::Sprint => ChannelSet::SPRINT,
            Self::Interact => ChannelSet::INTERACT,
            Self::Primary => ChannelSet::PRIMARY,
            Self::Secondary => ChannelSet::SECONDARY,
            Self::SwitchItem => ChannelSet::SWITCH_ITEM,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of input channels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ChannelSet: u16 {
        /// [`Channel::Move`]
        const MOVE = 1 << 0;
        /// [`Channel::Look`]
        const LOOK = 1 << 1;
        /// [`Channel::Jump`]
        const JUMP = 1 << 2;
        /// [`Channel::Crouch`]
        const CROUCH = 1 << 3;
        /// [`Channel::Sprint`]
        const SPRINT = 1 << 4;
        /// [`Channel::Interact`]
        const INTERACT = 1 << 5;
        /// [`Channel::Primary`]
        const PRIMARY = 1 << 6;
        /// [`Channel::Secondary`]
        const SECONDARY = 1 << 7;
        /// [`Channel::SwitchItem`]
        const SWITCH_ITEM = 1 << 8;

        /// Channels that drive locomotion.
        const LOCOMOTION = Self::MOVE.bits()
            | Self::LOOK.bits()
            | Self::JUMP.bits()
            | Self::CROUCH.bits()
            | Self::SPRINT.bits();
        /// Channels that trigger world actions.
        const ACTIONS = Self::INTERACT.bits()
            | Self::PRIMARY.bits()
            | Self::SECONDARY.bits()
            | Self::SWITCH_ITEM.bits();
        /// Every channel.
        const ALL = Self::LOCOMOTION.bits() | Self::ACTIONS.bits();
    }
}

impl ChannelSet {
    /// Whether `channel` is in the set.
    #[must_use]
    pub const fn has(self, channel: Channel) -> bool {
        self.contains(channel.flag())
    }

    /// Channels in the set, in declaration order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |c| self.has(*c))
    }
}

// =============================================================================
// Events
// =============================================================================

/// Whether an action fired or was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputPhase {
    /// The action fired (press, or a new value).
    Performed,
    /// The action was released; the value is idle.
    Canceled,
}

/// Payload of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputValue {
    /// A digital button.
    Button(bool),
    /// A 1D axis.
    Axis(f32),
    /// A 2D vector.
    Vector(Vec2),
}

impl InputValue {
    /// Reads the value as a button, treating analog input past
    /// [`PRESS_POINT`] as pressed.
    #[must_use]
    pub fn as_button(self) -> bool {
        match self {
            Self::Button(pressed) => pressed,
            Self::Axis(value) => value.abs() >= PRESS_POINT,
            Self::Vector(value) => value.length() >= PRESS_POINT,
        }
    }

    /// Reads the value as an axis. Buttons read as 0 or 1.
    #[must_use]
    pub fn as_axis(self) -> Option<f32> {
        match self {
            Self::Button(pressed) => Some(if pressed { 1.0 } else { 0.0 }),
            Self::Axis(value) => Some(value),
            Self::Vector(_) => None,
        }
    }

    /// Reads the value as a 2D vector.
    #[must_use]
    pub fn as_vector(self) -> Option<Vec2> {
        match self {
            Self::Vector(value) => Some(value),
            Self::Button(_) | Self::Axis(_) => None,
        }
    }
}

/// An event on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Channel the event arrived on.
    pub channel: Channel,
    /// Fired or released.
    pub phase: InputPhase,
    /// Payload.
    pub value: InputValue,
}

impl InputEvent {
    /// A performed event.
    #[must_use]
    pub const fn performed(channel: Channel, value: InputValue) -> Self {
        Self {
            channel,
            phase: InputPhase::Performed,
            value,
        }
    }

    /// A canceled event with an idle button payload.
    #[must_use]
    pub const fn canceled(channel: Channel) -> Self {
        Self {
            channel,
            phase: InputPhase::Canceled,
            value: InputValue::Button(false),
        }
    }

    /// A button press.
    #[must_use]
    pub const fn press(channel: Channel) -> Self {
        Self::performed(channel, InputValue::Button(true))
    }

    /// A 2D vector event.
    #[must_use]
    pub const fn vector(channel: Channel, value: Vec2) -> Self {
        Self::performed(channel, InputValue::Vector(value))
    }

    /// A 1D axis event.
    #[must_use]
    pub const fn axis(channel: Channel, value: f32) -> Self {
        Self::performed(channel, InputValue::Axis(value))
    }
}

// =============================================================================
// Event source
// =============================================================================

/// Subscription side of an input dispatcher.
pub trait EventSource {
    /// Routes `source`'s events on `channel` to `subscriber`.
    fn subscribe(&mut self, source: InputSourceId, channel: Channel, subscriber: ObjectId);

    /// Stops routing `source`'s events on `channel` to `subscriber`.
    fn unsubscribe(&mut self, source: InputSourceId, channel: Channel, subscriber: ObjectId);
}

/// Deterministic in-memory [`EventSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputHub {
    routes: BTreeMap<(InputSourceId, Channel), BTreeSet<ObjectId>>,
}

impl InputHub {
    /// Creates a hub with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribers of `source` on `channel`, in id order.
    #[must_use]
    pub fn subscribers(&self, source: InputSourceId, channel: Channel) -> Vec<ObjectId> {
        self.routes
            .get(&(source, channel))
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of (source, channel, subscriber) routes.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.routes.values().map(BTreeSet::len).sum()
    }
}

impl EventSource for InputHub {
    fn subscribe(&mut self, source: InputSourceId, channel: Channel, subscriber: ObjectId) {
        self.routes
            .entry((source, channel))
            .or_default()
            .insert(subscriber);
    }

    fn unsubscribe(&mut self, source: InputSourceId, channel: Channel, subscriber: ObjectId) {
        if let Some(set) = self.routes.get_mut(&(source, channel)) {
            set.remove(&subscriber);
            if set.is_empty() {
                self.routes.remove(&(source, channel));
            }
        }
    }
}

// =============================================================================
// Binding
// =============================================================================

/// The input source currently controlling one actor.
///
/// # Invariants
///
/// - at most one source is bound
/// - the registration table lists exactly the channels subscribed on the
///   event source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBinding {
    source: Option<InputSourceId>,
    registered: BTreeMap<Channel, InputSourceId>,
}

impl InputBinding {
    /// Creates an unbound binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `source` to `owner` on `channels`.
    ///
    /// With `force_override`, an existing binding is detached first.
    ///
    /// # Errors
    ///
    /// [`BindingError::Conflict`] when already bound and not forced.
    pub fn attach<E>(
        &mut self,
        owner: ObjectId,
        source: InputSourceId,
        channels: ChannelSet,
        force_override: bool,
        events: &mut E,
    ) -> Result<(), BindingError>
    where
        E: EventSource + ?Sized,
    {
        if let Some(current) = self.source {
            if !force_override {
                warn!(actor = %owner, current = %current, requested = %source, "input binding conflict");
                return Err(BindingError::Conflict { current });
            }
            self.detach(owner, events);
        }

        for channel in channels.channels() {
            events.subscribe(source, channel, owner);
            self.registered.insert(channel, source);
        }
        self.source = Some(source);
        debug!(actor = %owner, source = %source, channels = ?channels, "input attached");
        Ok(())
    }

    /// Unsubscribes every registered channel.
    ///
    /// Returns the source that was bound, or `None` if nothing was.
    pub fn detach<E>(&mut self, owner: ObjectId, events: &mut E) -> Option<InputSourceId>
    where
        E: EventSource + ?Sized,
    {
        let source = self.source.take()?;
        for (channel, registered) in std::mem::take(&mut self.registered) {
            events.unsubscribe(registered, channel, owner);
        }
        debug!(actor = %owner, source = %source, "input detached");
        Some(source)
    }

    /// The bound source.
    #[must_use]
    pub fn source(&self) -> Option<InputSourceId> {
        self.source
    }

    /// Whether any source is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Channels currently registered.
    #[must_use]
    pub fn channels(&self) -> ChannelSet {
        self.registered
            .keys()
            .fold(ChannelSet::empty(), |set, c| set | c.flag())
    }

    /// Whether an event from `source` on `channel` should reach the owner.
    #[must_use]
    pub fn routes(&self, source: InputSourceId, channel: Channel) -> bool {
        self.registered.get(&channel) == Some(&source)
    }
}
