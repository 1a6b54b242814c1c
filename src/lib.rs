//! Sidewalk Run - an endless-runner skateboarding game core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (track generation, scrolling, player, score, session)
//! - `tuning`: Data-driven game balance
//! - `host`: Render/audio sink traits and event dispatch

pub mod host;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Target frame interval used for frame-drop compensation (60 Hz)
    pub const TARGET_FRAME_INTERVAL: f64 = 1.0 / 60.0;
    /// Minimum time between time-based score awards (seconds)
    pub const SCORE_INTERVAL: f64 = 1.0;

    /// Visual seam between consecutive sidewalk segments
    pub const SEGMENT_SEAM: f32 = 1.0;
    /// Raised sidewalk tier height
    pub const HIGH_TIER_OFFSET: f32 = 100.0;

    /// Generator counters restart from this value at session start
    pub const SAFE_DISTANCE_START: u32 = 20;
    /// Random draws are uniform in `[0, RANDOM_DRAW_BOUND)`
    pub const RANDOM_DRAW_BOUND: u32 = 99;

    /// Contact velocity window (units/sec) for the landing spark effect
    pub const SPARK_VELOCITY_WINDOW: f32 = 100.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Format a score for the HUD ("00123")
#[inline]
pub fn format_score(score: u64) -> String {
    format!("{:05}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score_pads_to_five_digits() {
        assert_eq!(format_score(0), "00000");
        assert_eq!(format_score(123), "00123");
        assert_eq!(format_score(123456), "123456");
    }

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((deg_to_rad(85.0) - 1.483_529_9).abs() < 1e-5);
    }
}
