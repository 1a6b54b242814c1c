//! Procedural sidewalk generation
//!
//! Segments are laid left to right, each one `segment_width + seam` after the
//! previous. Two countdowns gate the randomized events: a jump gap (which also
//! places a gem above it) and a tier change. At most one event fires per
//! segment, and the gap roll always comes first.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Collectible, GameEvent, GameState, GenerationCursor, LevelTier, TrackSegment};
use crate::consts::*;
use crate::tuning::Tuning;

/// Layout of a segment the generator decided to place
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSpec {
    pub pos: Vec2,
    pub size: Vec2,
    pub tier: LevelTier,
    pub follows_gap: bool,
}

/// Output of a single generation step
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub segment: SegmentSpec,
    /// Gem placed over the gap, if a gap was opened
    pub collectible: Option<Vec2>,
}

/// Decide the next segment to the right of `rightmost_x`
pub fn generate_next(
    cursor: &mut GenerationCursor,
    rightmost_x: f32,
    scroll_speed: f32,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Generated {
    let mut x = rightmost_x + tuning.segment_size.x + SEGMENT_SEAM;
    let mut collectible = None;
    let mut follows_gap = false;

    if cursor.safe_distance_to_next_gap == 0 {
        if rng.below(RANDOM_DRAW_BOUND) < tuning.event_chance {
            let gem_y =
                tuning.player_size.y + rng.below(tuning.collectible_height_range.max(1)) as f32;
            let gem_x = x + (tuning.collectible_offset_per_speed * scroll_speed).max(0.0);
            collectible = Some(Vec2::new(gem_x, gem_y));

            x += (tuning.gap_per_speed * scroll_speed).max(0.0);
            follows_gap = true;
            cursor.safe_distance_to_next_gap = tuning.safe_distance_reset(scroll_speed);
            log::debug!("Gap opened at x={:.1}, gem at {:?}", x, collectible);
        } else if cursor.safe_distance_to_next_height_change == 0 {
            if rng.below(RANDOM_DRAW_BOUND) < tuning.event_chance {
                cursor.tier = cursor.tier.toggled();
                let reset = tuning.safe_distance_reset(scroll_speed);
                cursor.safe_distance_to_next_gap = reset;
                cursor.safe_distance_to_next_height_change = reset;
                log::debug!("Tier changed to {:?} at x={:.1}", cursor.tier, x);
            }
        } else {
            cursor.safe_distance_to_next_height_change -= 1;
        }
    } else {
        cursor.safe_distance_to_next_gap -= 1;
    }

    let y = tuning.segment_size.y / 2.0 + cursor.tier.offset();
    Generated {
        segment: SegmentSpec {
            pos: Vec2::new(x, y),
            size: tuning.segment_size,
            tier: cursor.tier,
            follows_gap,
        },
        collectible,
    }
}

/// X the generator continues from when no segment survives
pub fn empty_track_origin(tuning: &Tuning) -> f32 {
    -(tuning.segment_size.x + SEGMENT_SEAM)
}

/// Rightmost segment centre, or the empty-track origin
pub fn rightmost_x(segments: &[TrackSegment], tuning: &Tuning) -> f32 {
    segments
        .iter()
        .map(|s| s.pos.x)
        .reduce(f32::max)
        .unwrap_or_else(|| empty_track_origin(tuning))
}

/// Extend the track until it reaches the right edge of the window
///
/// Returns the number of segments added. No-op when the rightmost segment is
/// already at or beyond the window edge.
pub fn fill_track(
    state: &mut GameState,
    mut rightmost: f32,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> usize {
    let mut added = 0;

    while rightmost < tuning.window_width {
        let generated = generate_next(
            &mut state.cursor,
            rightmost,
            state.scroll_speed,
            tuning,
            rng,
        );

        if let Some(pos) = generated.collectible {
            let id = state.next_entity_id();
            state.collectibles.push(Collectible { id, pos });
            state.events.push(GameEvent::CollectibleAdded { id, pos });
        }

        let spec = generated.segment;
        let id = state.next_entity_id();
        state.events.push(GameEvent::SegmentAdded {
            id,
            pos: spec.pos,
            size: spec.size,
        });
        rightmost = spec.pos.x;
        state.segments.push(TrackSegment {
            id,
            pos: spec.pos,
            size: spec.size,
            tier: spec.tier,
            follows_gap: spec.follows_gap,
        });
        added += 1;
    }

    added
}

/// Check that surviving segments cover the window
///
/// Consecutive segments must sit exactly one pitch apart unless the right one
/// follows a jump gap, and the rightmost must reach the window edge.
pub fn track_is_continuous(segments: &[TrackSegment], tuning: &Tuning) -> bool {
    const TOLERANCE: f32 = 0.05;

    let mut xs: Vec<(f32, bool)> = segments.iter().map(|s| (s.pos.x, s.follows_gap)).collect();
    xs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let Some(&(last_x, _)) = xs.last() else {
        return false;
    };
    if last_x < tuning.window_width {
        return false;
    }

    let pitch = tuning.segment_size.x + SEGMENT_SEAM;
    xs.windows(2).all(|pair| {
        let (left, _) = pair[0];
        let (right, follows_gap) = pair[1];
        let spacing = right - left;
        if follows_gap {
            spacing >= pitch - TOLERANCE
        } else {
            (spacing - pitch).abs() <= TOLERANCE
        }
    })
}
