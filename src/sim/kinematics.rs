//! Pure kinematic integration for the skater

use glam::Vec2;

/// Kinematic state of a rigid body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub angular_vel: f32,
}

/// Forces acting over one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Forces {
    /// Constant acceleration (units/sec²)
    pub acceleration: Vec2,
    /// Instantaneous velocity change applied before integrating
    pub impulse: Vec2,
}

/// Advance a body by `dt` seconds (semi-implicit Euler)
pub fn step(body: Body, forces: Forces, dt: f32) -> Body {
    let vel = body.vel + forces.impulse + forces.acceleration * dt;
    Body {
        pos: body.pos + vel * dt,
        vel,
        rotation: body.rotation + body.angular_vel * dt,
        angular_vel: body.angular_vel,
    }
}
