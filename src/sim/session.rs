//! Session controller: phase transitions and the per-frame driver
//!
//! Host input (taps, pause toggles, contacts) is buffered and applied at the
//! start of the next frame, so nothing mutates the state mid-tick.

use glam::Vec2;

use super::collision::{ContactEvent, KinematicOracle, PhysicsOracle, StepContext};
use super::player;
use super::rng::{PcgSource, RandomSource};
use super::scroll;
use super::state::{GameEvent, GameState, GenerationCursor, SessionPhase};
use crate::consts::TARGET_FRAME_INTERVAL;
use crate::tuning::Tuning;

const START_MESSAGE: &str = "Tap to play!";
const GAME_OVER_MESSAGE: &str = "Game over!";

/// Input buffered between frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap / trigger: jump while running, start when stopped, resume when paused
    pub tap: bool,
    /// Pause toggle
    pub pause: bool,
}

/// One player's game, from the title overlay through any number of runs
pub struct Session<R = PcgSource, O = KinematicOracle> {
    tuning: Tuning,
    state: GameState,
    rng: R,
    oracle: O,
    input: TickInput,
    contacts: Vec<ContactEvent>,
}

impl Session {
    /// Default tuning, seeded PCG and the built-in kinematic physics
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self::with_parts(tuning, PcgSource::new(seed), KinematicOracle::new())
    }
}

impl<R: RandomSource, O: PhysicsOracle> Session<R, O> {
    pub fn with_parts(tuning: Tuning, rng: R, oracle: O) -> Self {
        let mut state = GameState::new(&tuning);
        state.events.push(GameEvent::OverlayShown {
            message: START_MESSAGE.to_string(),
            score: None,
        });
        state.emit_score();
        Self {
            tuning,
            state,
            rng,
            oracle,
            input: TickInput::default(),
            contacts: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that drive their own physics
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Take the notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn on_tap(&mut self) {
        self.input.tap = true;
    }

    pub fn on_pause_toggle(&mut self) {
        self.input.pause = true;
    }

    /// Queue a contact from the host's physics engine
    pub fn on_contact(&mut self, contact: ContactEvent) {
        self.contacts.push(contact);
    }

    /// Begin a new run, discarding whatever the previous one left behind
    pub fn start(&mut self) {
        let state = &mut self.state;
        state.player.reset(&self.tuning);
        state.scroll_speed = self.tuning.starting_scroll_speed;
        state.last_update_time = None;
        state.cursor = GenerationCursor::default();
        state.score.reset_current();
        state.clear_track();
        state.phase = SessionPhase::Running;
        state.events.push(GameEvent::OverlayHidden);
        state.emit_score();

        self.oracle.reset();
        self.contacts.clear();
        log::info!("Run started (best {})", self.state.score.best);
    }

    /// Running -> Paused. Returns false in any other phase.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != SessionPhase::Running {
            return false;
        }
        self.state.phase = SessionPhase::Paused;
        log::info!("Paused");
        true
    }

    /// Paused -> Running. The first resumed frame scrolls by zero.
    pub fn resume(&mut self) -> bool {
        if self.state.phase != SessionPhase::Paused {
            return false;
        }
        self.state.phase = SessionPhase::Running;
        self.state.last_update_time = None;
        log::info!("Resumed");
        true
    }

    /// Advance the game to host time `now` (monotonic seconds)
    pub fn on_frame(&mut self, now: f64) {
        let impulse = self.apply_input();
        if self.state.phase != SessionPhase::Running {
            return;
        }

        let elapsed = self
            .state
            .last_update_time
            .map_or(0.0, |last| (now - last).max(0.0));
        let adjustment = (elapsed / TARGET_FRAME_INTERVAL) as f32;
        let delta = self.state.scroll_speed * adjustment;

        scroll::advance(&mut self.state, delta, &self.tuning, &mut self.rng);

        self.step_player(impulse, elapsed as f32);
        if self.state.player.is_terminal(&self.tuning) {
            self.game_over();
            return;
        }

        if self.state.score.tick(now, self.state.scroll_speed) {
            self.state.emit_score();
        }

        self.state.last_update_time = Some(now);
        let speed = self.state.scroll_speed + self.tuning.scroll_speed_increment;
        self.state.scroll_speed = speed.max(0.0);
    }

    fn apply_input(&mut self) -> Vec2 {
        let input = std::mem::take(&mut self.input);
        let mut impulse = Vec2::ZERO;

        if input.pause && !self.pause() {
            self.resume();
        }

        if input.tap {
            match self.state.phase {
                SessionPhase::NotRunning => self.start(),
                SessionPhase::Paused => {
                    self.resume();
                }
                SessionPhase::Running => {
                    if let Some(jump) = player::request_jump(&mut self.state, &self.tuning) {
                        impulse += jump;
                    }
                }
            }
        }

        impulse
    }

    fn step_player(&mut self, impulse: Vec2, dt: f32) {
        let state = &mut self.state;
        let ctx = StepContext {
            segments: &state.segments,
            collectibles: &state.collectibles,
            collectible_size: self.tuning.collectible_size,
            gravity: Vec2::new(0.0, self.tuning.gravity),
            impulse,
            dt,
        };
        self.oracle.step(&mut state.player, &ctx, &mut self.contacts);

        for contact in self.contacts.drain(..) {
            player::handle_contact(state, &contact, &self.tuning);
        }
    }

    fn game_over(&mut self) {
        let state = &mut self.state;
        state.phase = SessionPhase::NotRunning;
        if state.score.current > state.score.best {
            state.score.best = state.score.current;
        }
        state.events.push(GameEvent::GameOver {
            score: state.score.current,
            best: state.score.best,
        });
        state.events.push(GameEvent::OverlayShown {
            message: GAME_OVER_MESSAGE.to_string(),
            score: Some(state.score.current),
        });
        log::info!(
            "Game over: score {} (best {})",
            state.score.current,
            state.score.best
        );
    }
}
