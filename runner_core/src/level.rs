//! Level and platform model.
//!
//! Platforms are created once at level load and never change shape; only
//! moving platforms mutate position/progress afterwards. Collision response
//! is dispatched by matching on [`PlatformKind`].

use serde::{Deserialize, Serialize};

use crate::geom::Aabb;
use crate::math::Vec2;

/// Standard platform half-extents.
pub const PLATFORM_HALF: Vec2 = Vec2::new(1.5, 0.25);
/// Wider half-extents used for the start and goal pads.
pub const PAD_HALF: Vec2 = Vec2::new(2.0, 0.25);

/// Travel axis of a moving platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Ping-pong path state for a moving platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoverPath {
    pub start: Vec2,
    pub end: Vec2,
    /// Interpolation parameter between `start` and `end`, always in $[0,1]$.
    pub progress: f32,
    /// +1 toward `end`, -1 toward `start`. Flips exactly at the bounds.
    pub direction: f32,
    /// Progress units per tick.
    pub speed: f32,
    pub orientation: Orientation,
    /// Horizontal world displacement applied in the most recent tick; a
    /// player standing on the platform is carried by this amount.
    #[serde(default)]
    pub last_shift: f32,
}

impl MoverPath {
    pub fn new(start: Vec2, end: Vec2, speed: f32, orientation: Orientation) -> Self {
        Self {
            start,
            end,
            progress: 0.0,
            direction: 1.0,
            speed,
            orientation,
            last_shift: 0.0,
        }
    }

    /// World position for the current progress.
    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.end, self.progress)
    }
}

/// Kind-specific platform data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    /// Spawn pad; collides like a static platform.
    Start,
    /// Finish pad; touching it completes the run.
    Goal,
    /// Launches the player upward with a fixed impulse.
    Bounce { impulse: f32 },
    Moving(MoverPath),
}

/// A collidable platform: position, half-extents, kind-specific data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub half: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(pos: Vec2, half: Vec2, kind: PlatformKind) -> Self {
        Self { pos, half, kind }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, PlatformKind::Static)
    }
}

/// A loaded level: platform layout plus player spawn data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub player_start: Vec2,
    /// Respawn once the player's lower edge drops below this.
    pub fall_limit: f32,
}

impl Level {
    /// The standard course: a start pad on the left, a stepping-stone row of
    /// statics, a bounce pad, two movers, and the goal pad on the right.
    /// The ground plane sits at y = -2; falling past -1 respawns.
    pub fn default_course() -> Self {
        let mut platforms = vec![Platform::new(
            Vec2::new(-16.0, 3.0),
            PAD_HALF,
            PlatformKind::Start,
        )];

        for (x, y) in [
            (-12.0, 5.0),
            (-8.0, 4.0),
            (-4.0, 5.0),
            (0.0, 4.0),
            (4.0, 5.0),
            (8.0, 4.0),
            (12.0, 5.0),
        ] {
            platforms.push(Platform::new(
                Vec2::new(x, y),
                PLATFORM_HALF,
                PlatformKind::Static,
            ));
        }

        platforms.push(Platform::new(
            Vec2::new(-2.0, 1.5),
            Vec2::new(1.0, 0.25),
            PlatformKind::Bounce { impulse: 0.45 },
        ));

        platforms.push(Platform::new(
            Vec2::new(-6.0, 6.5),
            PLATFORM_HALF,
            PlatformKind::Moving(MoverPath::new(
                Vec2::new(-6.0, 6.5),
                Vec2::new(-2.0, 6.5),
                0.004,
                Orientation::Horizontal,
            )),
        ));

        platforms.push(Platform::new(
            Vec2::new(14.0, 0.5),
            PLATFORM_HALF,
            PlatformKind::Moving(MoverPath::new(
                Vec2::new(14.0, 0.5),
                Vec2::new(14.0, 3.5),
                0.005,
                Orientation::Vertical,
            )),
        ));

        platforms.push(Platform::new(
            Vec2::new(16.0, 4.0),
            PAD_HALF,
            PlatformKind::Goal,
        ));

        Self {
            platforms,
            player_start: Vec2::new(-16.0, 4.0),
            fall_limit: -1.0,
        }
    }
}
