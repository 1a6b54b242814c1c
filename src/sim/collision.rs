//! Contact events and the physics oracle seam
//!
//! The session never resolves collisions itself. Each tick it asks a
//! [`PhysicsOracle`] to move the skater and report contacts, and it also
//! accepts contacts pushed by the host. Both land in the same queue.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::{self, Body, Forces};
use super::state::{Collectible, Player, TrackSegment};

/// Participant in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyRef {
    Player,
    Segment(u32),
    Collectible(u32),
}

/// Two bodies started touching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub a: BodyRef,
    pub b: BodyRef,
    pub point: Vec2,
    /// Velocity of the player relative to the other body
    pub relative_velocity: Vec2,
}

impl ContactEvent {
    /// The non-player body, if the player is one side of the contact
    pub fn other_than_player(&self) -> Option<BodyRef> {
        match (self.a, self.b) {
            (BodyRef::Player, BodyRef::Player) => None,
            (BodyRef::Player, other) | (other, BodyRef::Player) => Some(other),
            _ => None,
        }
    }
}

/// Everything an oracle may read during one step
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub segments: &'a [TrackSegment],
    pub collectibles: &'a [Collectible],
    pub collectible_size: Vec2,
    pub gravity: Vec2,
    /// Velocity change requested this tick (jump)
    pub impulse: Vec2,
    /// Seconds since the previous step
    pub dt: f32,
}

/// Moves the player and reports contacts
pub trait PhysicsOracle {
    fn step(
        &mut self,
        player: &mut Player,
        ctx: &StepContext<'_>,
        contacts: &mut Vec<ContactEvent>,
    );

    /// Forget any per-run state (called at session start)
    fn reset(&mut self) {}
}

/// Oracle for hosts that run their own physics and push contacts
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOracle;

impl PhysicsOracle for NullOracle {
    fn step(&mut self, _: &mut Player, _: &StepContext<'_>, _: &mut Vec<ContactEvent>) {}
}

/// Vertical slack when deciding whether the skater landed on a segment top
const LANDING_TOLERANCE: f32 = 2.0;

/// Built-in kinematic physics with box-vs-box resolution
///
/// Contacts are reported when they begin: once per newly supporting segment
/// and once per wall the skater runs into.
#[derive(Debug, Clone, Default)]
pub struct KinematicOracle {
    support: Option<u32>,
    wall: Option<u32>,
}

impl KinematicOracle {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Whether two boxes given by centre and half size overlap
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    let d = (a_pos - b_pos).abs();
    let reach = a_half + b_half;
    d.x < reach.x && d.y < reach.y
}

#[inline]
fn overlaps_horizontally(pos: Vec2, half: Vec2, segment: &TrackSegment) -> bool {
    (pos.x - segment.pos.x).abs() < half.x + segment.size.x / 2.0
}

impl PhysicsOracle for KinematicOracle {
    fn step(
        &mut self,
        player: &mut Player,
        ctx: &StepContext<'_>,
        contacts: &mut Vec<ContactEvent>,
    ) {
        let before = Body {
            pos: player.pos,
            vel: player.vel,
            rotation: player.rotation,
            angular_vel: player.angular_vel,
        };
        let forces = Forces {
            acceleration: ctx.gravity,
            impulse: ctx.impulse,
        };
        let mut after = kinematics::step(before, forces, ctx.dt);
        let half = player.half_size();

        // Landing: highest segment top crossed while falling
        let prev_bottom = before.pos.y - half.y;
        let bottom = after.pos.y - half.y;
        let support = if after.vel.y <= 0.0 {
            ctx.segments
                .iter()
                .filter(|s| overlaps_horizontally(after.pos, half, s))
                .filter(|s| prev_bottom >= s.top() - LANDING_TOLERANCE && bottom <= s.top())
                .max_by(|a, b| a.top().total_cmp(&b.top()))
        } else {
            None
        };

        match support {
            Some(segment) => {
                let impact = after.vel.y;
                after.pos.y = segment.top() + half.y;
                after.vel.y = 0.0;
                if self.support != Some(segment.id) {
                    contacts.push(ContactEvent {
                        a: BodyRef::Player,
                        b: BodyRef::Segment(segment.id),
                        point: Vec2::new(after.pos.x, segment.top()),
                        relative_velocity: Vec2::new(0.0, impact),
                    });
                }
                self.support = Some(segment.id);
            }
            None => self.support = None,
        }

        // Walls: the side of a segment the skater is below the top of
        let wall = ctx
            .segments
            .iter()
            .filter(|s| s.pos.x > after.pos.x)
            .filter(|s| boxes_overlap(after.pos, half, s.pos, s.size / 2.0))
            .filter(|s| after.pos.y - half.y < s.top() - LANDING_TOLERANCE)
            .min_by(|a, b| a.left().total_cmp(&b.left()));

        match wall {
            Some(segment) => {
                after.pos.x = segment.left() - half.x;
                after.vel.x = after.vel.x.min(0.0);
                if self.wall != Some(segment.id) {
                    contacts.push(ContactEvent {
                        a: BodyRef::Player,
                        b: BodyRef::Segment(segment.id),
                        point: Vec2::new(segment.left(), after.pos.y),
                        relative_velocity: Vec2::new(0.0, after.vel.y),
                    });
                }
                self.wall = Some(segment.id);
            }
            None => self.wall = None,
        }

        let collectible_half = ctx.collectible_size / 2.0;
        for collectible in ctx.collectibles {
            if boxes_overlap(after.pos, half, collectible.pos, collectible_half) {
                contacts.push(ContactEvent {
                    a: BodyRef::Player,
                    b: BodyRef::Collectible(collectible.id),
                    point: collectible.pos,
                    relative_velocity: after.vel,
                });
            }
        }

        player.pos = after.pos;
        player.vel = after.vel;
        player.rotation = after.rotation;
        player.angular_vel = after.angular_vel;
    }

    fn reset(&mut self) {
        self.support = None;
        self.wall = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::LevelTier;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn segment(id: u32, x: f32, tier: LevelTier) -> TrackSegment {
        TrackSegment {
            id,
            pos: Vec2::new(x, 32.0 + tier.offset()),
            size: Vec2::new(64.0, 64.0),
            tier,
            follows_gap: false,
        }
    }

    fn ctx<'a>(segments: &'a [TrackSegment], collectibles: &'a [Collectible]) -> StepContext<'a> {
        StepContext {
            segments,
            collectibles,
            collectible_size: Vec2::new(24.0, 24.0),
            gravity: Vec2::new(0.0, -900.0),
            impulse: Vec2::ZERO,
            dt: DT,
        }
    }

    #[test]
    fn test_contact_sides_are_symmetric() {
        let contact = ContactEvent {
            a: BodyRef::Collectible(3),
            b: BodyRef::Player,
            point: Vec2::ZERO,
            relative_velocity: Vec2::ZERO,
        };
        assert_eq!(contact.other_than_player(), Some(BodyRef::Collectible(3)));

        let unrelated = ContactEvent {
            a: BodyRef::Segment(1),
            b: BodyRef::Collectible(2),
            ..contact
        };
        assert_eq!(unrelated.other_than_player(), None);
    }

    #[test]
    fn test_boxes_overlap() {
        let half = Vec2::splat(5.0);
        assert!(boxes_overlap(Vec2::ZERO, half, Vec2::new(9.0, 0.0), half));
        assert!(!boxes_overlap(Vec2::ZERO, half, Vec2::new(10.0, 0.0), half));
        assert!(!boxes_overlap(Vec2::ZERO, half, Vec2::new(0.0, 11.0), half));
    }

    #[test]
    fn test_standing_player_stays_on_flat_track() {
        let mut player = Player::spawn(&Tuning::default());
        let segments: Vec<_> = (0..10)
            .map(|i| segment(i, i as f32 * 65.0, LevelTier::Low))
            .collect();
        let mut oracle = KinematicOracle::new();
        let mut contacts = Vec::new();

        for _ in 0..120 {
            oracle.step(&mut player, &ctx(&segments, &[]), &mut contacts);
        }
        assert_eq!(player.bottom(), 64.0);
        assert_eq!(player.vel.y, 0.0);
        // One landing contact for the segment under the skater, none repeated
        assert_eq!(contacts.len(), 1);
        assert!(matches!(contacts[0].b, BodyRef::Segment(2 | 3)));
    }

    #[test]
    fn test_player_falls_without_support() {
        let mut player = Player::spawn(&Tuning::default());
        let start_y = player.pos.y;
        let mut oracle = KinematicOracle::new();
        let mut contacts = Vec::new();

        for _ in 0..30 {
            oracle.step(&mut player, &ctx(&[], &[]), &mut contacts);
        }
        assert!(player.pos.y < start_y - 50.0);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_jump_and_land_reports_contact() {
        let mut player = Player::spawn(&Tuning::default());
        let segments: Vec<_> = (0..10)
            .map(|i| segment(i, i as f32 * 65.0, LevelTier::Low))
            .collect();
        let mut oracle = KinematicOracle::new();
        let mut contacts = Vec::new();
        oracle.step(&mut player, &ctx(&segments, &[]), &mut contacts);
        contacts.clear();

        let jump = StepContext {
            impulse: Vec2::new(0.0, 525.0),
            ..ctx(&segments, &[])
        };
        oracle.step(&mut player, &jump, &mut contacts);
        assert!(player.bottom() > 64.0);

        let mut peak = player.pos.y;
        for _ in 0..120 {
            oracle.step(&mut player, &ctx(&segments, &[]), &mut contacts);
            peak = peak.max(player.pos.y);
        }
        assert!(peak > 99.0 + 100.0);
        assert_eq!(player.bottom(), 64.0);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].relative_velocity.y < -100.0);
    }

    #[test]
    fn test_raised_tier_pushes_player_back() {
        let mut player = Player::spawn(&Tuning::default());
        player.pos.x = 150.0;
        let segments = vec![
            segment(1, 130.0, LevelTier::Low),
            segment(2, 195.0, LevelTier::High),
        ];
        let mut oracle = KinematicOracle::new();
        let mut contacts = Vec::new();

        oracle.step(&mut player, &ctx(&segments, &[]), &mut contacts);
        assert_eq!(player.pos.x, segments[1].left() - player.size.x / 2.0);
        assert!(contacts.contains(&ContactEvent {
            a: BodyRef::Player,
            b: BodyRef::Segment(2),
            point: Vec2::new(segments[1].left(), player.pos.y),
            relative_velocity: Vec2::ZERO,
        }));
    }

    #[test]
    fn test_overlapping_collectible_is_reported() {
        let mut player = Player::spawn(&Tuning::default());
        let segments: Vec<_> = (0..10)
            .map(|i| segment(i, i as f32 * 65.0, LevelTier::Low))
            .collect();
        let collectibles = vec![
            Collectible { id: 7, pos: player.pos },
            Collectible { id: 8, pos: Vec2::new(500.0, 200.0) },
        ];
        let mut oracle = KinematicOracle::new();
        let mut contacts = Vec::new();

        oracle.step(&mut player, &ctx(&segments, &collectibles), &mut contacts);
        let gems: Vec<_> = contacts
            .iter()
            .filter_map(|c| match c.b {
                BodyRef::Collectible(id) => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(gems, vec![7]);
    }
}
