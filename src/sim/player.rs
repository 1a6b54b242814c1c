//! Skater state machine: jumping, landing, pickups and terminal detection

use glam::Vec2;

use super::collision::{BodyRef, ContactEvent};
use super::state::{Cue, GameEvent, GameState, Player};
use crate::consts::SPARK_VELOCITY_WINDOW;
use crate::tuning::Tuning;

impl Player {
    /// Back to the spawn point, upright and at rest
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Player::spawn(tuning);
    }

    /// Leave the ground. Returns the velocity change to apply, or `None` when
    /// already airborne.
    pub fn jump(&mut self, tuning: &Tuning) -> Option<Vec2> {
        if !self.grounded {
            return None;
        }
        self.grounded = false;
        Some(Vec2::new(0.0, tuning.jump_impulse / tuning.player_mass))
    }

    /// Past the left or bottom edge of the window
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < 0.0 || self.pos.y < 0.0
    }

    pub fn is_tipped_over(&self, max_rotation: f32) -> bool {
        self.rotation > max_rotation || self.rotation < -max_rotation
    }

    /// Run-ending condition, checked every tick regardless of grounding
    pub fn is_terminal(&self, tuning: &Tuning) -> bool {
        self.is_off_screen() || self.is_tipped_over(tuning.max_rotation())
    }
}

/// Handle a jump request. Returns the impulse for the physics oracle.
pub fn request_jump(state: &mut GameState, tuning: &Tuning) -> Option<Vec2> {
    let impulse = state.player.jump(tuning)?;
    state.events.push(GameEvent::Cue(Cue::Jump));
    Some(impulse)
}

/// Apply one contact reported by the physics oracle or the host
pub fn handle_contact(state: &mut GameState, contact: &ContactEvent, tuning: &Tuning) {
    match contact.other_than_player() {
        Some(BodyRef::Segment(id)) => {
            if !state.segments.iter().any(|s| s.id == id) {
                return;
            }
            let vy = contact.relative_velocity.y;
            if !state.player.grounded
                && (-SPARK_VELOCITY_WINDOW..=SPARK_VELOCITY_WINDOW).contains(&vy)
            {
                state.events.push(GameEvent::Sparks {
                    point: contact.point,
                });
            }
            state.player.grounded = true;
            state.player.ground_level_y = state.player.pos.y;
        }
        Some(BodyRef::Collectible(id)) => {
            if !state.remove_collectible(id, true) {
                return;
            }
            state.events.push(GameEvent::Cue(Cue::Pickup));
            state
                .score
                .award_pickup(state.scroll_speed, tuning.pickup_bonus_per_speed);
            state.emit_score();
            log::debug!("Gem {} collected, score {}", id, state.score.current);
        }
        Some(BodyRef::Player) | None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, LevelTier, TrackSegment};

    fn state_with_track(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(tuning);
        let id = state.next_entity_id();
        state.segments.push(TrackSegment {
            id,
            pos: Vec2::new(142.0, 32.0),
            size: tuning.segment_size,
            tier: LevelTier::Low,
            follows_gap: false,
        });
        state
    }

    fn segment_contact(id: u32, vy: f32) -> ContactEvent {
        ContactEvent {
            a: BodyRef::Segment(id),
            b: BodyRef::Player,
            point: Vec2::new(142.0, 64.0),
            relative_velocity: Vec2::new(0.0, vy),
        }
    }

    #[test]
    fn test_jump_only_from_ground() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);

        let impulse = request_jump(&mut state, &tuning).expect("grounded player jumps");
        assert_eq!(impulse, Vec2::new(0.0, 420.0 / 0.8));
        assert!(!state.player.grounded);
        assert_eq!(state.events, vec![GameEvent::Cue(Cue::Jump)]);

        assert!(request_jump(&mut state, &tuning).is_none());
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_segment_contact_grounds_player() {
        let tuning = Tuning::default();
        let mut state = state_with_track(&tuning);
        state.player.grounded = false;

        handle_contact(&mut state, &segment_contact(1, -400.0), &tuning);
        assert!(state.player.grounded);
        // Hard landing: outside the spark window
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_soft_landing_sparks() {
        let tuning = Tuning::default();
        let mut state = state_with_track(&tuning);
        state.player.grounded = false;

        handle_contact(&mut state, &segment_contact(1, -60.0), &tuning);
        assert_eq!(
            state.events,
            vec![GameEvent::Sparks {
                point: Vec2::new(142.0, 64.0)
            }]
        );

        // Already grounded: no sparks
        state.events.clear();
        handle_contact(&mut state, &segment_contact(1, -60.0), &tuning);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_spark_window_is_inclusive() {
        let tuning = Tuning::default();
        for vy in [100.0, -100.0] {
            let mut state = state_with_track(&tuning);
            state.player.grounded = false;
            handle_contact(&mut state, &segment_contact(1, vy), &tuning);
            assert_eq!(state.events.len(), 1, "vy = {}", vy);
        }

        let mut state = state_with_track(&tuning);
        state.player.grounded = false;
        handle_contact(&mut state, &segment_contact(1, 100.5), &tuning);
        assert!(state.events.is_empty());
        assert!(state.player.grounded);
    }

    #[test]
    fn test_landing_records_ground_level() {
        let tuning = Tuning::default();
        let mut state = state_with_track(&tuning);
        state.player.grounded = false;
        state.player.pos.y = 199.0;
        handle_contact(&mut state, &segment_contact(1, -200.0), &tuning);
        assert_eq!(state.player.ground_level_y, 199.0);
    }

    #[test]
    fn test_contact_with_evicted_segment_is_ignored() {
        let tuning = Tuning::default();
        let mut state = state_with_track(&tuning);
        state.player.grounded = false;
        handle_contact(&mut state, &segment_contact(99, 0.0), &tuning);
        assert!(!state.player.grounded);
    }

    #[test]
    fn test_pickup_removes_gem_and_scores() {
        let tuning = Tuning::default();
        let mut state = state_with_track(&tuning);
        state.scroll_speed = 6.7;
        let id = state.next_entity_id();
        state.collectibles.push(Collectible {
            id,
            pos: Vec2::new(150.0, 120.0),
        });

        let contact = ContactEvent {
            a: BodyRef::Player,
            b: BodyRef::Collectible(id),
            point: Vec2::new(150.0, 120.0),
            relative_velocity: Vec2::ZERO,
        };
        handle_contact(&mut state, &contact, &tuning);
        assert!(state.collectibles.is_empty());
        assert_eq!(state.score.current, 60);
        assert_eq!(state.score.best, 60);
        assert!(state.events.contains(&GameEvent::Cue(Cue::Pickup)));

        // A duplicate contact for the same gem is a no-op
        handle_contact(&mut state, &contact, &tuning);
        assert_eq!(state.score.current, 60);
    }

    #[test]
    fn test_off_screen_to_the_left_is_terminal() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning);
        player.pos = Vec2::new(-1.0, 50.0);
        assert!(player.is_terminal(&tuning));

        player.pos = Vec2::new(100.0, -0.5);
        assert!(player.is_terminal(&tuning));

        player.pos = Vec2::new(100.0, 50.0);
        assert!(!player.is_terminal(&tuning));
    }

    #[test]
    fn test_tipped_over_is_terminal() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning);
        player.rotation = crate::deg_to_rad(86.0);
        assert!(player.is_terminal(&tuning));
        player.rotation = -crate::deg_to_rad(86.0);
        assert!(player.is_terminal(&tuning));
        player.rotation = crate::deg_to_rad(84.0);
        assert!(!player.is_terminal(&tuning));
    }

    #[test]
    fn test_reset_restores_spawn() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning);
        player.pos = Vec2::new(-40.0, -10.0);
        player.vel = Vec2::new(0.0, -300.0);
        player.rotation = 1.0;
        player.grounded = false;
        player.reset(&tuning);
        assert_eq!(player.pos, tuning.spawn_position());
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.rotation, 0.0);
        assert!(player.grounded);
    }
}
