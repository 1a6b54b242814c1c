//! Scroll engine: move the world left, evict what left the window, refill

use super::rng::RandomSource;
use super::state::{GameEvent, GameState};
use super::track;
use crate::tuning::Tuning;

/// Scroll every segment and collectible left by `delta`
///
/// Entities whose centre passes `-width` are evicted. The track is refilled
/// afterwards so it reaches the right edge of the window again.
pub fn advance(state: &mut GameState, delta: f32, tuning: &Tuning, rng: &mut impl RandomSource) {
    if delta != 0.0 {
        state.events.push(GameEvent::Scrolled { delta });
    }

    let segment_limit = -tuning.segment_size.x;
    let mut rightmost: Option<f32> = None;
    let events = &mut state.events;
    state.segments.retain_mut(|segment| {
        segment.pos.x -= delta;
        if segment.pos.x < segment_limit {
            events.push(GameEvent::SegmentRemoved { id: segment.id });
            return false;
        }
        rightmost = Some(rightmost.map_or(segment.pos.x, |x: f32| x.max(segment.pos.x)));
        true
    });

    let collectible_limit = -tuning.collectible_size.x;
    state.collectibles.retain_mut(|collectible| {
        collectible.pos.x -= delta;
        if collectible.pos.x < collectible_limit {
            events.push(GameEvent::CollectibleRemoved {
                id: collectible.id,
                picked_up: false,
            });
            return false;
        }
        true
    });

    let rightmost = rightmost.unwrap_or_else(|| track::empty_track_origin(tuning));
    track::fill_track(state, rightmost, tuning, rng);

    debug_assert!(
        track::track_is_continuous(&state.segments, tuning),
        "track no longer covers the window"
    );
}
