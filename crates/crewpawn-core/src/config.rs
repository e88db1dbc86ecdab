//! Pawn tuning configuration.
//!
//! All locomotion and interaction parameters live in [`PawnConfig`]. Values
//! use metres and seconds; angles are degrees.
//!
//! Configs are usually authored as JSON. Missing fields fall back to the
//! defaults, so a document only needs to name what it overrides:
//!
//! ```
//! use crewpawn_core::config::PawnConfig;
//!
//! let config = PawnConfig::from_json_str(r#"{ "run_speed": 9.0 }"#).unwrap();
//! assert_eq!(config.run_speed, 9.0);
//! assert_eq!(config.default_speed, 4.0);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Downward velocity applied while grounded so walking off a ledge starts
/// from a small fall speed instead of the accumulated gravity.
pub const GROUND_SNAP_VELOCITY: f32 = -2.0;

/// Default delay before another jump may be requested (seconds).
pub const DEFAULT_JUMP_COOLDOWN: f32 = 0.25;

/// Tuning for a single pawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnConfig {
    // ========================================================================
    // Speeds
    // ========================================================================
    /// Target speed while crouching (m/s).
    pub crouch_speed: f32,

    /// Target speed while walking (m/s).
    pub default_speed: f32,

    /// Target speed while sprinting (m/s).
    pub run_speed: f32,

    /// How quickly the pawn reaches its target speed and sheds it again.
    pub acceleration: f32,

    // ========================================================================
    // Jumping
    // ========================================================================
    /// Vertical velocity applied on jump (m/s).
    pub jump_force: f32,

    /// Seconds after a jump before the next one may be requested.
    pub jump_cooldown: f32,

    /// Vertical velocity held while grounded (m/s, negative is down).
    pub ground_snap_velocity: f32,

    // ========================================================================
    // Control authority
    // ========================================================================
    /// Movement modifier while grounded.
    pub ground_move_modifier: f32,

    /// Movement modifier while airborne. Halved again for acceleration.
    pub air_move_modifier: f32,

    /// Gravity acceleration (m/s^2).
    pub gravity: Vec3,

    // ========================================================================
    // Interaction
    // ========================================================================
    /// Maximum reach of the view ray (m).
    pub interaction_distance: f32,

    /// Height of the view point above the pawn's origin (m).
    pub eye_height: f32,

    /// Local offset of a held item relative to the view.
    pub held_item_offset: Vec3,
}

impl Default for PawnConfig {
    fn default() -> Self {
        Self {
            crouch_speed: 2.0,
            default_speed: 4.0,
            run_speed: 7.5,
            acceleration: 20.0,

            jump_force: 5.5,
            jump_cooldown: DEFAULT_JUMP_COOLDOWN,
            ground_snap_velocity: GROUND_SNAP_VELOCITY,

            ground_move_modifier: 1.0,
            air_move_modifier: 0.1,
            gravity: Vec3::new(0.0, -9.81, 0.0),

            interaction_distance: 1.5,
            eye_height: 1.6,
            held_item_offset: Vec3::new(0.35, -0.3, 0.6),
        }
    }
}

impl PawnConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every field is usable by the integrator.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFinite`] for NaN or infinite values
    /// - [`ConfigError::Negative`] for negative speeds, acceleration, jump
    ///   force, modifiers or cooldown
    /// - [`ConfigError::SpeedOrder`] unless crouch <= default <= run
    /// - [`ConfigError::InteractionDistance`] unless the reach is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("crouch_speed", self.crouch_speed),
            ("default_speed", self.default_speed),
            ("run_speed", self.run_speed),
            ("acceleration", self.acceleration),
            ("jump_force", self.jump_force),
            ("jump_cooldown", self.jump_cooldown),
            ("ground_move_modifier", self.ground_move_modifier),
            ("air_move_modifier", self.air_move_modifier),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let unsigned = [
            ("ground_snap_velocity", self.ground_snap_velocity),
            ("interaction_distance", self.interaction_distance),
            ("eye_height", self.eye_height),
        ];
        for (field, value) in unsigned {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NotFinite { field: "gravity" });
        }
        if !self.held_item_offset.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "held_item_offset",
            });
        }

        if self.crouch_speed > self.default_speed || self.default_speed > self.run_speed {
            return Err(ConfigError::SpeedOrder {
                crouch: self.crouch_speed,
                default: self.default_speed,
                run: self.run_speed,
            });
        }

        if self.interaction_distance <= 0.0 {
            return Err(ConfigError::InteractionDistance(self.interaction_distance));
        }

        Ok(())
    }
}
