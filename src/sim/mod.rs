//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (injected through `RandomSource`)
//! - Host input is buffered and applied at frame boundaries
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod kinematics;
pub mod player;
pub mod rng;
pub mod score;
pub mod scroll;
pub mod session;
pub mod state;
pub mod track;

pub use collision::{
    BodyRef, ContactEvent, KinematicOracle, NullOracle, PhysicsOracle, StepContext, boxes_overlap,
};
pub use kinematics::{Body, Forces};
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use session::{Session, TickInput};
pub use state::{
    Collectible, Cue, GameEvent, GameState, GenerationCursor, LevelTier, Player, ScoreState,
    SessionPhase, TrackSegment,
};
pub use track::{Generated, SegmentSpec, fill_track, generate_next, track_is_continuous};
