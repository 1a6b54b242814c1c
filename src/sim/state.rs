//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]; entities are plain
//! records with a stable `id` that hosts key their render nodes by.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for a tap (before the first run or after game over)
    #[default]
    NotRunning,
    /// Active gameplay
    Running,
    /// Run suspended, resumes on tap
    Paused,
}

/// Sidewalk height tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelTier {
    #[default]
    Low,
    High,
}

impl LevelTier {
    /// Vertical offset of segments on this tier
    pub fn offset(self) -> f32 {
        match self {
            LevelTier::Low => 0.0,
            LevelTier::High => HIGH_TIER_OFFSET,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LevelTier::Low => LevelTier::High,
            LevelTier::High => LevelTier::Low,
        }
    }
}

/// A sidewalk segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSegment {
    pub id: u32,
    /// Centre of the segment
    pub pos: Vec2,
    pub size: Vec2,
    pub tier: LevelTier,
    /// Placed right after a jump gap
    #[serde(default)]
    pub follows_gap: bool,
}

impl TrackSegment {
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// A gem floating above a jump gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
}

/// The skater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the skater
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in radians (counter-clockwise positive)
    pub rotation: f32,
    pub angular_vel: f32,
    /// Set by segment contacts, cleared by jumping
    pub grounded: bool,
    /// Y of the skater's centre at the last segment contact
    pub ground_level_y: f32,
    pub size: Vec2,
}

impl Player {
    pub fn spawn(tuning: &Tuning) -> Self {
        let pos = tuning.spawn_position();
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            grounded: true,
            ground_level_y: pos.y,
            size: tuning.player_size,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// Counters throttling how often gaps and tier changes can occur
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCursor {
    pub safe_distance_to_next_gap: u32,
    pub safe_distance_to_next_height_change: u32,
    pub tier: LevelTier,
}

impl Default for GenerationCursor {
    fn default() -> Self {
        Self {
            safe_distance_to_next_gap: SAFE_DISTANCE_START,
            safe_distance_to_next_height_change: SAFE_DISTANCE_START,
            tier: LevelTier::Low,
        }
    }
}

/// Current and best score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub current: u64,
    /// Best score this process has seen (never persisted)
    pub best: u64,
    /// Host time of the last time-based award
    pub last_score_tick_time: f64,
}

/// Audio cue requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    Pickup,
}

/// Outbound notifications for the render/HUD/audio host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SegmentAdded { id: u32, pos: Vec2, size: Vec2 },
    SegmentRemoved { id: u32 },
    CollectibleAdded { id: u32, pos: Vec2 },
    CollectibleRemoved { id: u32, picked_up: bool },
    /// Every segment and collectible moved left by `delta`
    Scrolled { delta: f32 },
    ScoreChanged { score: u64, best: u64 },
    OverlayShown { message: String, score: Option<u64> },
    OverlayHidden,
    Cue(Cue),
    /// Landing spark effect at the contact point
    Sparks { point: Vec2 },
    GameOver { score: u64, best: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: SessionPhase,
    pub player: Player,
    /// Active segments (insertion order is left-to-right)
    pub segments: Vec<TrackSegment>,
    pub collectibles: Vec<Collectible>,
    pub cursor: GenerationCursor,
    pub score: ScoreState,
    /// Units per 60 Hz frame
    pub scroll_speed: f32,
    /// Host time of the previous frame
    pub last_update_time: Option<f64>,
    /// Pending notifications, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: SessionPhase::NotRunning,
            player: Player::spawn(tuning),
            segments: Vec::new(),
            collectibles: Vec::new(),
            cursor: GenerationCursor::default(),
            score: ScoreState::default(),
            scroll_speed: tuning.starting_scroll_speed,
            last_update_time: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Notify the host of the current HUD values
    pub fn emit_score(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            score: self.score.current,
            best: self.score.best,
        });
    }

    /// Remove a collectible by id, returning whether it was present
    pub fn remove_collectible(&mut self, id: u32, picked_up: bool) -> bool {
        let Some(index) = self.collectibles.iter().position(|c| c.id == id) else {
            return false;
        };
        self.collectibles.remove(index);
        self.events.push(GameEvent::CollectibleRemoved { id, picked_up });
        true
    }

    /// Drop every segment and collectible, notifying the host
    pub fn clear_track(&mut self) {
        for segment in self.segments.drain(..) {
            self.events.push(GameEvent::SegmentRemoved { id: segment.id });
        }
        for collectible in self.collectibles.drain(..) {
            self.events.push(GameEvent::CollectibleRemoved {
                id: collectible.id,
                picked_up: false,
            });
        }
    }
}
