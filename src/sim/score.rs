//! Score accrual
//!
//! Surviving earns `floor(scroll_speed)` once per elapsed second, a gem earns
//! ten times that. `best` is raised after every mutation so it never trails
//! `current`.

use super::state::ScoreState;
use crate::consts::SCORE_INTERVAL;

#[inline]
fn whole_speed(scroll_speed: f32) -> u64 {
    scroll_speed.floor().max(0.0) as u64
}

impl ScoreState {
    /// Time-based award. Returns true if the score changed.
    pub fn tick(&mut self, current_time: f64, scroll_speed: f32) -> bool {
        if current_time - self.last_score_tick_time <= SCORE_INTERVAL {
            return false;
        }
        self.current += whole_speed(scroll_speed);
        self.last_score_tick_time = current_time;
        self.raise_best();
        true
    }

    /// Gem pickup award
    pub fn award_pickup(&mut self, scroll_speed: f32, bonus_per_speed: u64) {
        self.current += bonus_per_speed * whole_speed(scroll_speed);
        self.raise_best();
    }

    /// Start a new run; `best` carries over
    pub fn reset_current(&mut self) {
        self.current = 0;
    }

    fn raise_best(&mut self) {
        if self.current > self.best {
            self.best = self.current;
        }
    }
}
