//! Scripted collaborators and factory functions for crew tests.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Quat, Vec3};

use crate::config::PawnConfig;
use crate::crew::Crew;
use crate::input::{ChannelSet, InputSourceId};
use crate::item::{
    Interactable, Interaction, InteractionKind, Pickup, Tool, Usable, UsageKind, WorldObject,
};
use crate::object::ObjectId;
use crate::world::{FlatGround, SceneGraph};

/// Fixed step used by the scenarios.
pub const DT: f32 = 1.0 / 60.0;

/// Input source driving the primary pawn.
pub const PAD: InputSourceId = InputSourceId::new(1);

/// Installs a fmt subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// =============================================================================
// Scenario Setup
// =============================================================================

/// A crew with one default pawn bound to [`PAD`] on every channel.
pub fn crew_with_pawn() -> (Crew, ObjectId) {
    let mut crew = Crew::new();
    let pawn = crew
        .spawn_actor(PawnConfig::default())
        .expect("default config is valid");
    crew.attach(pawn, PAD, ChannelSet::ALL, false)
        .expect("fresh pawn is unbound");
    (crew, pawn)
}

/// A pickable tool with fixed outcomes.
pub fn torch() -> Pickup<Tool> {
    Pickup::new(Tool::new("torch", UsageKind::Effect, UsageKind::None))
}

/// Floor at y = 0 with `target` straight ahead of a pawn standing at the
/// origin and looking down +Z.
pub fn target_ahead(target: ObjectId) -> FlatGround {
    let eye = PawnConfig::default().eye_height;
    FlatGround::new(0.0).with_target(target, Vec3::new(0.0, eye, 1.0), 0.25)
}

/// Ticks the crew `ticks` times at [`DT`].
pub fn run(crew: &mut Crew, ground: &FlatGround, ticks: usize) {
    for _ in 0..ticks {
        crew.tick(DT, ground);
    }
}

// =============================================================================
// Scripted Objects
// =============================================================================

/// A pickable item that counts how often it is used.
pub struct CountingTool {
    uses: Rc<Cell<u32>>,
}

impl CountingTool {
    /// Creates the tool and a handle to its use counter.
    pub fn new() -> (Self, Rc<Cell<u32>>) {
        let uses = Rc::new(Cell::new(0));
        (
            Self {
                uses: Rc::clone(&uses),
            },
            uses,
        )
    }
}

impl Usable for CountingTool {
    fn use_primary(&self) -> UsageKind {
        self.uses.set(self.uses.get() + 1);
        UsageKind::Effect
    }

    fn use_secondary(&self) -> UsageKind {
        UsageKind::None
    }
}

impl WorldObject for CountingTool {
    fn name(&self) -> &str {
        "counter"
    }

    fn as_usable(&self) -> Option<&dyn Usable> {
        Some(self)
    }
}

/// A wall console: activates in place, never joins an inventory.
pub struct Console {
    presses: Rc<Cell<u32>>,
}

impl Console {
    /// Creates the console and a handle to its press counter.
    pub fn new() -> (Self, Rc<Cell<u32>>) {
        let presses = Rc::new(Cell::new(0));
        (
            Self {
                presses: Rc::clone(&presses),
            },
            presses,
        )
    }
}

impl Interactable for Console {
    fn interact(&self, _interaction: &mut Interaction<'_>) -> InteractionKind {
        self.presses.set(self.presses.get() + 1);
        InteractionKind::Activate
    }
}

impl WorldObject for Console {
    fn name(&self) -> &str {
        "console"
    }

    fn as_interactable(&self) -> Option<&dyn Interactable> {
        Some(self)
    }
}

// =============================================================================
// Scripted Scene
// =============================================================================

/// One scene-graph call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCall {
    /// `set_parent`
    Parent(ObjectId, Option<ObjectId>),
    /// `set_local_transform`
    Transform(ObjectId, Vec3, Quat),
    /// `set_active`
    Active(ObjectId, bool),
}

/// A scene graph that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingScene {
    /// Calls received so far.
    pub calls: Vec<SceneCall>,
}

impl SceneGraph for RecordingScene {
    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>) {
        self.calls.push(SceneCall::Parent(object, parent));
    }

    fn set_local_transform(&mut self, object: ObjectId, position: Vec3, rotation: Quat) {
        self.calls.push(SceneCall::Transform(object, position, rotation));
    }

    fn set_active(&mut self, object: ObjectId, active: bool) {
        self.calls.push(SceneCall::Active(object, active));
    }
}
