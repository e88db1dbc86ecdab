//! Host-engine collaborators.
//!
//! The core never owns collision or scene state. It reaches the host through
//! two traits:
//!
//! - [`PhysicsQuery`]: swept character movement and view raycasts
//! - [`SceneGraph`]: parenting, local transforms and visibility of objects
//!
//! [`FlatGround`] and [`HeadlessScene`] are small self-contained
//! implementations for running the core without an engine (tests, benches,
//! server-side replays).

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

// =============================================================================
// Physics
// =============================================================================

/// Outcome of a swept move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Displacement actually travelled after collision response.
    pub displacement: Vec3,
    /// Whether the collision volume ended the move resting on a surface.
    pub grounded: bool,
}

/// Collision queries the locomotion integrator and view ray depend on.
///
/// Implementations take `&self` so one query object can serve many actors
/// integrating in parallel.
pub trait PhysicsQuery {
    /// Moves `actor`'s collision volume from `from` by `displacement`,
    /// resolving collisions.
    fn sweep_move(&self, actor: ObjectId, from: Vec3, displacement: Vec3) -> SweepResult;

    /// Returns the first blocking object along the ray, if any lies within
    /// `max_distance`. `direction` is unit length.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ObjectId>;
}

/// A spherical raycast target used by [`FlatGround`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayTarget {
    /// Object reported on hit.
    pub id: ObjectId,
    /// Sphere centre.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

/// An infinite horizontal floor plus optional spherical ray targets.
///
/// # Example
///
/// ```
/// use crewpawn_core::object::ObjectId;
/// use crewpawn_core::world::{FlatGround, PhysicsQuery};
/// use glam::Vec3;
///
/// let ground = FlatGround::new(0.0);
/// let result = ground.sweep_move(ObjectId::new(0), Vec3::new(0.0, 0.1, 0.0), Vec3::new(1.0, -1.0, 0.0));
///
/// assert!(result.grounded);
/// assert_eq!(result.displacement, Vec3::new(1.0, -0.1, 0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatGround {
    height: f32,
    targets: Vec<RayTarget>,
}

impl FlatGround {
    /// Creates a floor at `height` with no ray targets.
    #[must_use]
    pub fn new(height: f32) -> Self {
        Self {
            height,
            targets: Vec::new(),
        }
    }

    /// Adds a spherical ray target.
    #[must_use]
    pub fn with_target(mut self, id: ObjectId, center: Vec3, radius: f32) -> Self {
        self.targets.push(RayTarget { id, center, radius });
        self
    }

    /// Removes every target with the given id.
    pub fn remove_target(&mut self, id: ObjectId) {
        self.targets.retain(|t| t.id != id);
    }

    /// Floor height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Distance along the ray to the nearest intersection with `target`.
    fn ray_sphere(origin: Vec3, direction: Vec3, target: &RayTarget) -> Option<f32> {
        let to_center = target.center - origin;
        let along = to_center.dot(direction);
        let perp_sq = to_center.length_squared() - along * along;
        let radius_sq = target.radius * target.radius;
        if perp_sq > radius_sq {
            return None;
        }
        let half_chord = (radius_sq - perp_sq).sqrt();
        let near = along - half_chord;
        let far = along + half_chord;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere
            Some(0.0)
        } else {
            None
        }
    }
}

impl PhysicsQuery for FlatGround {
    fn sweep_move(&self, _actor: ObjectId, from: Vec3, displacement: Vec3) -> SweepResult {
        let mut target = from + displacement;
        let grounded = target.y <= self.height;
        if grounded {
            target.y = self.height;
        }
        SweepResult {
            displacement: target - from,
            grounded,
        }
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ObjectId> {
        let mut best: Option<(f32, ObjectId)> = None;
        for target in &self.targets {
            if let Some(distance) = Self::ray_sphere(origin, direction, target) {
                if distance > max_distance {
                    continue;
                }
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, target.id));
                }
            }
        }
        best.map(|(_, id)| id)
    }
}

// =============================================================================
// Scene graph
// =============================================================================

/// Scene-graph operations used when an actor changes its held item.
pub trait SceneGraph {
    /// Reparents `object` under `parent`, or detaches it into the world.
    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>);

    /// Sets `object`'s transform relative to its parent.
    fn set_local_transform(&mut self, object: ObjectId, position: Vec3, rotation: Quat);

    /// Shows or hides `object`.
    fn set_active(&mut self, object: ObjectId, active: bool);
}

/// Scene state of a single object in a [`HeadlessScene`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Current parent, `None` when free in the world.
    pub parent: Option<ObjectId>,
    /// Whether the object is visible.
    pub active: bool,
    /// Position relative to the parent.
    pub local_position: Vec3,
    /// Rotation relative to the parent.
    pub local_rotation: Quat,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            parent: None,
            active: true,
            local_position: Vec3::ZERO,
            local_rotation: Quat::IDENTITY,
        }
    }
}

/// In-memory scene graph that only records state.
///
/// Objects are created on first touch with [`SceneNode::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadlessScene {
    nodes: BTreeMap<ObjectId, SceneNode>,
}

impl HeadlessScene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded state of `object`.
    #[must_use]
    pub fn node(&self, object: ObjectId) -> Option<&SceneNode> {
        self.nodes.get(&object)
    }

    /// Returns the children of `parent` in id order.
    #[must_use]
    pub fn children(&self, parent: ObjectId) -> Vec<ObjectId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect()
    }

    fn node_mut(&mut self, object: ObjectId) -> &mut SceneNode {
        self.nodes.entry(object).or_default()
    }
}

impl SceneGraph for HeadlessScene {
    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>) {
        self.node_mut(object).parent = parent;
    }

    fn set_local_transform(&mut self, object: ObjectId, position: Vec3, rotation: Quat) {
        let node = self.node_mut(object);
        node.local_position = position;
        node.local_rotation = rotation;
    }

    fn set_active(&mut self, object: ObjectId, active: bool) {
        self.node_mut(object).active = active;
    }
}
