//! Locomotion state and per-tick integration.
//!
//! [`LocomotionState`] separates *staging* from *integration*:
//!
//! - Mutators (`set_move_input`, `set_look_input`, `set_crouch`, `set_sprint`,
//!   `request_jump`) only record intent. They are safe to call at any time,
//!   any number of times between ticks.
//! - [`LocomotionState::tick`] is the only method that touches velocity,
//!   position or the grounded flag.
//!
//! # Tick Order
//!
//! 1. Advance the jump cooldown
//! 2. Look: rebuild body yaw and view pitch from accumulated look input
//! 3. Jump: hold grounded pawns on the ground snap velocity, launch a pending
//!    jump
//! 4. Move: accelerate, apply gravity, clamp horizontal speed, sweep through
//!    the [`PhysicsQuery`], refresh grounded, decelerate
//!
//! # Conventions
//!
//! +Y is up, +Z is forward at zero yaw and +X is right. Look angles are in
//! degrees: positive yaw turns right, positive pitch looks up.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::PawnConfig;
use crate::object::ObjectId;
use crate::world::PhysicsQuery;

/// Pitch limit in degrees (straight up / straight down).
pub const MAX_PITCH: f32 = 90.0;

/// A cancellable countdown.
///
/// Replaces a suspended timer task: the owner advances it every tick, so it
/// can never fire after its owner is gone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// Starts (or restarts) the countdown.
    ///
    /// A non-positive duration leaves the countdown stopped and never fires.
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Advances the countdown by `dt`.
    ///
    /// Returns `true` on the call that finishes it.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }

    /// Stops the countdown without firing.
    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    /// Returns `true` while the countdown is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Seconds left.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Movement, look, stance and jump state of one pawn.
///
/// # Invariants
///
/// - `sprinting` implies `!crouching`
/// - `jump_pending` is only set while `jump_ready`
/// - `grounded` is written only by [`tick`](Self::tick), from the physics query
/// - pitch stays within `[-MAX_PITCH, MAX_PITCH]`
/// - the staged move input has magnitude 0 or 1
///
/// # Example
///
/// ```
/// use crewpawn_core::config::PawnConfig;
/// use crewpawn_core::locomotion::LocomotionState;
/// use crewpawn_core::object::ObjectId;
/// use crewpawn_core::world::FlatGround;
/// use glam::Vec2;
///
/// let mut state = LocomotionState::new(PawnConfig::default());
/// state.set_move_input(Vec2::new(3.0, 4.0));
/// assert!((state.move_input().length() - 1.0).abs() < 1e-6);
///
/// state.tick(1.0 / 60.0, ObjectId::new(0), &FlatGround::new(0.0));
/// assert!(state.is_grounded());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionState {
    config: PawnConfig,

    // Staged input
    move_input: Vec2,
    look: Vec2,
    crouching: bool,
    sprinting: bool,
    jump_pending: bool,
    jump_ready: bool,

    // Integrated state
    position: Vec3,
    velocity: Vec3,
    grounded: bool,
    move_speed: f32,
    body_rotation: Quat,
    view_pitch: Quat,
    cooldown: Cooldown,
    jumps: u64,
}

impl LocomotionState {
    /// Creates a resting state at the origin.
    #[must_use]
    pub fn new(config: PawnConfig) -> Self {
        Self {
            config,
            move_input: Vec2::ZERO,
            look: Vec2::ZERO,
            crouching: false,
            sprinting: false,
            jump_pending: false,
            jump_ready: true,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            grounded: false,
            move_speed: 0.0,
            body_rotation: Quat::IDENTITY,
            view_pitch: Quat::IDENTITY,
            cooldown: Cooldown::default(),
            jumps: 0,
        }
    }

    // ========================================================================
    // Staging
    // ========================================================================

    /// Stages the movement direction relative to the body's facing.
    ///
    /// The input is normalized; a zero (or non-finite) vector stages zero.
    pub fn set_move_input(&mut self, input: Vec2) {
        self.move_input = input.normalize_or_zero();
    }

    /// Accumulates a look delta in degrees.
    ///
    /// Yaw (`x`) accumulates without wrapping. Pitch (`y`) is clamped to
    /// `[-MAX_PITCH, MAX_PITCH]`. Non-finite deltas are ignored.
    pub fn set_look_input(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.look.x += delta.x;
        self.look.y = (self.look.y + delta.y).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Sets the crouch state. Crouching ends a sprint.
    pub fn set_crouch(&mut self, crouch: bool) {
        self.crouching = crouch;
        if crouch {
            self.sprinting = false;
        }
    }

    /// Sets the sprint state. Has no effect on the flag while crouching.
    pub fn set_sprint(&mut self, sprint: bool) {
        self.sprinting = sprint && !self.crouching;
    }

    /// Queues a jump for the next grounded tick.
    ///
    /// Ignored while the jump cooldown is running.
    pub fn request_jump(&mut self) {
        if self.jump_ready {
            self.jump_pending = true;
        }
    }

    /// Drops a queued jump without launching it.
    pub fn clear_pending_jump(&mut self) {
        self.jump_pending = false;
    }

    /// Stops the jump cooldown and makes jumping available again.
    pub fn cancel_jump_cooldown(&mut self) {
        self.cooldown.cancel();
        self.jump_ready = true;
    }

    /// Clears staged movement input and all velocity.
    pub fn reset_motion(&mut self) {
        self.move_input = Vec2::ZERO;
        self.velocity = Vec3::ZERO;
        self.sprinting = false;
        self.crouching = false;
        self.jump_pending = false;
    }

    /// Places the pawn at `position` without sweeping.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
    }

    // ========================================================================
    // Integration
    // ========================================================================

    /// Advances the simulation by `dt` seconds.
    ///
    /// `actor` identifies the collision volume for the physics query.
    /// Negative or non-finite `dt` is treated as zero.
    pub fn tick<P>(&mut self, dt: f32, actor: ObjectId, physics: &P)
    where
        P: PhysicsQuery + ?Sized,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.cooldown.advance(dt) {
            self.jump_ready = true;
        }

        self.update_look();
        self.update_jump(actor);
        self.update_move(dt, actor, physics);

        trace!(
            actor = %actor,
            grounded = self.grounded,
            speed = self.move_speed,
            vx = self.velocity.x,
            vy = self.velocity.y,
            vz = self.velocity.z,
            "locomotion tick"
        );
    }

    fn update_look(&mut self) {
        self.body_rotation = Quat::from_rotation_y(self.look.x.to_radians());
        self.view_pitch = Quat::from_rotation_x(-self.look.y.to_radians());
    }

    fn update_jump(&mut self, actor: ObjectId) {
        if !self.grounded {
            return;
        }

        // Gravity keeps accumulating while grounded; hold it at a small
        // bias so stepping off a ledge does not start at terminal speed.
        self.velocity.y = self.config.ground_snap_velocity;

        if self.jump_pending {
            self.jump_pending = false;
            // A zero cooldown never runs, so readiness must not be dropped
            if self.config.jump_cooldown > 0.0 {
                self.jump_ready = false;
                self.cooldown.start(self.config.jump_cooldown);
            }
            self.velocity.y = self.config.jump_force;
            self.jumps += 1;
            debug!(actor = %actor, force = self.config.jump_force, "jump");
        }
    }

    fn update_move<P>(&mut self, dt: f32, actor: ObjectId, physics: &P)
    where
        P: PhysicsQuery + ?Sized,
    {
        let config = &self.config;

        self.move_speed = if self.crouching {
            config.crouch_speed
        } else if self.sprinting {
            config.run_speed
        } else {
            config.default_speed
        };

        let modifier = if self.grounded {
            config.ground_move_modifier
        } else {
            config.air_move_modifier * 0.5
        };
        let direction = self.right() * self.move_input.x + self.forward() * self.move_input.y;
        self.velocity += direction * config.acceleration * dt * self.move_speed * modifier;

        self.velocity += config.gravity * dt;

        // Clamp horizontal speed only
        let vertical = self.velocity.y;
        let horizontal = Vec3::new(self.velocity.x, 0.0, self.velocity.z);
        self.velocity = horizontal.clamp_length_max(self.move_speed) + Vec3::Y * vertical;

        let sweep = physics.sweep_move(actor, self.position, self.velocity * dt);
        self.position += sweep.displacement;
        self.grounded = sweep.grounded;

        let decel_modifier = if self.grounded {
            config.ground_move_modifier
        } else {
            config.air_move_modifier
        };
        let decay = (config.acceleration * decel_modifier * dt).min(1.0);
        self.velocity -= self.velocity * decay;
        self.velocity.y = vertical;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Tuning this state integrates with.
    #[must_use]
    pub fn config(&self) -> &PawnConfig {
        &self.config
    }

    /// Staged (normalized) movement input.
    #[must_use]
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    /// Accumulated yaw in degrees (unwrapped).
    #[must_use]
    pub fn yaw_degrees(&self) -> f32 {
        self.look.x
    }

    /// Accumulated pitch in degrees, within `[-MAX_PITCH, MAX_PITCH]`.
    #[must_use]
    pub fn pitch_degrees(&self) -> f32 {
        self.look.y
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Target horizontal speed chosen on the last tick.
    #[must_use]
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Body rotation (yaw only) as of the last tick.
    #[must_use]
    pub fn body_rotation(&self) -> Quat {
        self.body_rotation
    }

    /// View rotation (yaw then pitch) as of the last tick.
    #[must_use]
    pub fn view_rotation(&self) -> Quat {
        self.body_rotation * self.view_pitch
    }

    /// Body forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.body_rotation * Vec3::Z
    }

    /// Body right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.body_rotation * Vec3::X
    }

    /// Direction the view is facing.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        self.view_rotation() * Vec3::Z
    }

    /// Whether the last sweep ended on a surface.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Whether the pawn is crouching.
    #[must_use]
    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// Whether the pawn is sprinting.
    #[must_use]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Whether a jump is queued for the next grounded tick.
    #[must_use]
    pub fn is_jump_pending(&self) -> bool {
        self.jump_pending
    }

    /// Whether a jump may be requested.
    #[must_use]
    pub fn is_jump_ready(&self) -> bool {
        self.jump_ready
    }

    /// The jump cooldown.
    #[must_use]
    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    /// Number of jumps launched since creation.
    #[must_use]
    pub fn jumps(&self) -> u64 {
        self.jumps
    }
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self::new(PawnConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
