//! Demo autopilot
//!
//! Looks a short distance ahead of the skater and asks for a jump when the
//! sidewalk ends or rises. Used by the headless binary.

use super::state::{GameState, SessionPhase};
use crate::consts::SEGMENT_SEAM;
use crate::tuning::Tuning;

/// Seconds of travel to look ahead of the skater's front edge
const LOOKAHEAD_SECS: f32 = 0.3;
/// Spacing between probe points
const PROBE_STEP: f32 = 4.0;

/// Whether the skater should jump this frame
pub fn wants_jump(state: &GameState, tuning: &Tuning) -> bool {
    if state.phase != SessionPhase::Running || !state.player.grounded {
        return false;
    }

    let player = &state.player;
    let front = player.pos.x + player.size.x / 2.0;
    // scroll_speed is per 60 Hz frame
    let lookahead = state.scroll_speed * 60.0 * LOOKAHEAD_SECS;
    let footing = player.ground_level_y - player.size.y / 2.0 + 2.0;

    let probes = (lookahead / PROBE_STEP).ceil().max(1.0) as usize;
    (0..=probes).any(|i| {
        let x = front + i as f32 * PROBE_STEP;
        let under = state
            .segments
            .iter()
            .filter(|s| (x - s.pos.x).abs() <= s.size.x / 2.0 + SEGMENT_SEAM)
            .map(|s| s.top())
            .reduce(f32::max);
        match under {
            None => x < tuning.window_width,
            Some(top) => top > footing,
        }
    })
}
