//! Game balance and world dimensions
//!
//! Defaults match the shipped game feel. A host can override
//! any subset of fields from JSON; missing fields fall back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Errors raised while loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// World dimensions, physics constants and generator odds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Visible window width
    pub window_width: f32,
    /// Visible window height
    pub window_height: f32,
    /// Sidewalk segment size
    pub segment_size: Vec2,
    /// Gem size (width is used for eviction)
    pub collectible_size: Vec2,
    /// Skater size
    pub player_size: Vec2,

    // === Scrolling ===
    /// Scroll speed at session start (units per 60 Hz frame)
    pub starting_scroll_speed: f32,
    /// Added to the scroll speed after every frame
    pub scroll_speed_increment: f32,

    // === Generator ===
    /// Draws below this value (out of 99) trigger a gap or tier change
    pub event_chance: u32,
    /// Gap length per unit of scroll speed
    pub gap_per_speed: f32,
    /// Collectible offset into the gap per unit of scroll speed
    pub collectible_offset_per_speed: f32,
    /// Collectibles spawn between player height and this much above it
    pub collectible_height_range: u32,
    /// Counter reset after a gap or tier change: base + floor(speed / divisor)
    pub safe_distance_base: u32,
    pub safe_distance_speed_divisor: f32,

    // === Player ===
    /// Gravity (units/sec², negative is down)
    pub gravity: f32,
    /// Jump impulse applied on tap
    pub jump_impulse: f32,
    /// Skater mass, converts impulse to velocity
    pub player_mass: f32,
    /// Rotation beyond this (degrees, either way) ends the run
    pub max_rotation_degrees: f32,

    // === Score ===
    /// Pickup bonus per unit of scroll speed
    pub pickup_bonus_per_speed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: 568.0,
            window_height: 320.0,
            segment_size: Vec2::new(64.0, 64.0),
            collectible_size: Vec2::new(24.0, 24.0),
            player_size: Vec2::new(46.0, 70.0),

            starting_scroll_speed: 5.0,
            scroll_speed_increment: 0.005,

            event_chance: 5,
            gap_per_speed: 20.0,
            collectible_offset_per_speed: 10.0,
            collectible_height_range: 150,
            safe_distance_base: 20,
            safe_distance_speed_divisor: 5.0,

            gravity: -900.0,
            jump_impulse: 420.0,
            player_mass: 0.8,
            max_rotation_degrees: 85.0,

            pickup_bonus_per_speed: 10,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall the generator or break the physics
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if !(self.window_width > 0.0) {
            return invalid("window_width", "must be positive");
        }
        if !(self.window_height > 0.0) {
            return invalid("window_height", "must be positive");
        }
        if !(self.segment_size.x > 0.0 && self.segment_size.y > 0.0) {
            return invalid("segment_size", "must be positive");
        }
        if !(self.collectible_size.x > 0.0) {
            return invalid("collectible_size", "width must be positive");
        }
        if !(self.player_size.x > 0.0 && self.player_size.y > 0.0) {
            return invalid("player_size", "must be positive");
        }
        if !(self.starting_scroll_speed >= 0.0) {
            return invalid("starting_scroll_speed", "must not be negative");
        }
        if !(self.scroll_speed_increment >= 0.0) {
            return invalid("scroll_speed_increment", "must not be negative");
        }
        if !(self.gap_per_speed >= 0.0) {
            return invalid("gap_per_speed", "must not be negative");
        }
        if !(self.collectible_offset_per_speed >= 0.0) {
            return invalid("collectible_offset_per_speed", "must not be negative");
        }
        if self.player_size.y + self.collectible_height_range as f32 > self.window_height {
            return invalid("collectible_height_range", "gems would spawn above the window");
        }
        if !(self.safe_distance_speed_divisor > 0.0) {
            return invalid("safe_distance_speed_divisor", "must be positive");
        }
        if !(self.player_mass > 0.0) {
            return invalid("player_mass", "must be positive");
        }
        if self.event_chance > crate::consts::RANDOM_DRAW_BOUND {
            return invalid("event_chance", "must not exceed 99");
        }
        Ok(())
    }

    /// Counter value after a gap or tier change at the given scroll speed
    pub fn safe_distance_reset(&self, scroll_speed: f32) -> u32 {
        let bonus = (scroll_speed / self.safe_distance_speed_divisor).floor().max(0.0);
        self.safe_distance_base + bonus as u32
    }

    /// Tip-over threshold in radians
    pub fn max_rotation(&self) -> f32 {
        crate::deg_to_rad(self.max_rotation_degrees)
    }

    /// Skater spawn point: left quarter of the window, standing on a low segment
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(
            self.window_width / 4.0,
            self.player_size.y / 2.0 + self.segment_size.y,
        )
    }
}
