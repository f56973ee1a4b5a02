//! Player body state.
//!
//! One instance per session. The body is mutated only by the physics
//! integrator and on respawn; there is no shared mutable access from the
//! render side.

use serde::{Deserialize, Serialize};

use crate::geom::Aabb;
use crate::math::Vec2;

/// Player half-extents (a 1x1 sprite).
pub const PLAYER_HALF: Vec2 = Vec2::new(0.5, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// True from jump/bounce until the next landing.
    pub airborne: bool,
}

impl Player {
    pub fn spawn_at(start: Vec2) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            airborne: false,
        }
    }

    /// Repositions at the start point with zero velocity.
    pub fn respawn(&mut self, start: Vec2) {
        self.pos = start;
        self.vel = Vec2::ZERO;
        self.airborne = false;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, PLAYER_HALF)
    }
}
