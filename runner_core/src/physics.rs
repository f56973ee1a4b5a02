//! Physics integration.
//!
//! One call to [`integrate`] advances the player by one tick: Euler position
//! update, gravity, then collision resolution against every platform kind.
//! The step order matters: the ground-fall respawn runs before the bounce and
//! landing checks so a just-respawned player cannot register a stale contact
//! from the prior frame's position.
//!
//! All operations here are total functions over well-formed state; there are
//! no error paths.

use crate::level::{Orientation, Platform, PlatformKind};
use crate::math::Vec2;
use crate::player::Player;

/// Downward acceleration per tick².
pub const GRAVITY: f32 = 0.015;
/// Horizontal speed while a move command is held, units per tick.
pub const MOVE_SPEED: f32 = 0.2;
/// Upward velocity applied on jump.
pub const JUMP_IMPULSE: f32 = 0.3;
/// Landing snap offset above a platform's center (player + platform
/// half-heights).
pub const LANDING_OFFSET: f32 = 0.75;
/// Horizontal offset from a mover's center beyond which contact counts as a
/// side hit rather than a clean landing.
pub const SIDE_CONTACT_THRESHOLD: f32 = 0.4;
/// Lateral ejection speed for side hits on horizontal movers.
pub const SIDE_PUSH: f32 = 0.3;

/// What happened during one integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Player dropped below the fall limit and was respawned.
    pub fell: bool,
    /// Player landed on top of a platform this tick.
    pub landed: bool,
    /// Player hit a bounce pad this tick.
    pub bounced: bool,
    /// Player overlaps the goal pad.
    pub reached_goal: bool,
}

/// Advances the player one tick and resolves collisions against `platforms`.
pub fn integrate(
    player: &mut Player,
    platforms: &[Platform],
    player_start: Vec2,
    fall_limit: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    player.pos += player.vel;
    player.vel.y -= GRAVITY;

    // Ground fall: respawn and stop resolving; the fresh position must not
    // be checked against contacts from the old one.
    if player.pos.y - player.aabb().half.y < fall_limit {
        player.respawn(player_start);
        outcome.fell = true;
        return outcome;
    }

    for platform in platforms {
        if let PlatformKind::Bounce { impulse } = platform.kind {
            if player.aabb().intersects(&platform.aabb()) {
                // Immediate launch; overrides this tick's gravity and leaves
                // horizontal velocity untouched.
                player.vel.y = impulse;
                player.airborne = true;
                outcome.bounced = true;
            }
        }
    }

    for platform in platforms {
        match platform.kind {
            PlatformKind::Bounce { .. } => continue,
            PlatformKind::Static
            | PlatformKind::Start
            | PlatformKind::Goal
            | PlatformKind::Moving(_) => {
                if player.vel.y < 0.0 && player.aabb().intersects(&platform.aabb()) {
                    player.pos.y = platform.pos.y + LANDING_OFFSET;
                    player.vel.y = 0.0;
                    player.airborne = false;
                    outcome.landed = true;

                    if let PlatformKind::Moving(path) = platform.kind {
                        if path.orientation == Orientation::Horizontal {
                            // Ride along with the platform.
                            player.pos.x += path.last_shift;
                            let offset = player.pos.x - platform.pos.x;
                            if offset.abs() > SIDE_CONTACT_THRESHOLD {
                                // Struck from the side rather than landed on:
                                // eject away from the platform center.
                                player.vel.x = SIDE_PUSH * offset.signum();
                            }
                        }
                    }
                }
            }
        }
    }

    for platform in platforms {
        if matches!(platform.kind, PlatformKind::Goal)
            && player.aabb().intersects(&platform.aabb())
        {
            outcome.reached_goal = true;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{MoverPath, Orientation};

    const START: Vec2 = Vec2::new(-16.0, 4.0);
    const LIMIT: f32 = -1.0;

    fn platform(x: f32, y: f32, kind: PlatformKind) -> Platform {
        Platform::new(Vec2::new(x, y), Vec2::new(1.5, 0.25), kind)
    }

    #[test]
    fn free_fall_decrements_vy_by_exactly_gravity() {
        let mut player = Player::spawn_at(Vec2::new(0.0, 20.0));
        let before = player.vel.y;
        let outcome = integrate(&mut player, &[], START, LIMIT);
        assert_eq!(outcome, StepOutcome::default());
        assert_eq!(player.vel.y, before - GRAVITY);
    }

    #[test]
    fn landing_snaps_to_platform_top() {
        // Reference scenario: vy=-0.5 at y=3.0 against a static at y=2.25
        // lands at exactly platform.y + 0.75.
        let mut player = Player::spawn_at(Vec2::new(0.0, 3.0));
        player.vel = Vec2::new(0.0, -0.5);
        player.airborne = true;
        let platforms = [platform(0.0, 2.25, PlatformKind::Static)];

        let outcome = integrate(&mut player, &platforms, START, LIMIT);
        assert!(outcome.landed);
        assert_eq!(player.pos.y, 3.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.airborne);
    }

    #[test]
    fn ascending_player_passes_through_platforms() {
        let mut player = Player::spawn_at(Vec2::new(0.0, 2.0));
        player.vel = Vec2::new(0.0, 0.3);
        player.airborne = true;
        let platforms = [platform(0.0, 2.25, PlatformKind::Static)];

        let outcome = integrate(&mut player, &platforms, START, LIMIT);
        assert!(!outcome.landed);
        assert!(player.airborne);
    }

    #[test]
    fn fall_below_limit_respawns() {
        let mut player = Player::spawn_at(Vec2::new(0.0, -0.4));
        player.vel = Vec2::new(0.1, -0.2);

        let outcome = integrate(&mut player, &[], START, LIMIT);
        assert!(outcome.fell);
        assert_eq!(player.pos, START);
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn respawn_skips_collision_checks_this_tick() {
        // A platform sits right at the spawn point; the respawned player must
        // not pick up a landing or goal contact in the same tick.
        let mut player = Player::spawn_at(Vec2::new(0.0, -0.4));
        player.vel = Vec2::new(0.0, -0.2);
        let platforms = [Platform::new(
            START,
            Vec2::new(2.0, 0.25),
            PlatformKind::Goal,
        )];

        let outcome = integrate(&mut player, &platforms, START, LIMIT);
        assert!(outcome.fell);
        assert!(!outcome.reached_goal);
        assert!(!outcome.landed);
    }

    #[test]
    fn bounce_pad_overrides_descent() {
        let mut player = Player::spawn_at(Vec2::new(0.0, 3.0));
        player.vel = Vec2::new(0.05, -0.5);
        let platforms = [platform(0.0, 2.25, PlatformKind::Bounce { impulse: 0.45 })];

        let outcome = integrate(&mut player, &platforms, START, LIMIT);
        assert!(outcome.bounced);
        assert_eq!(player.vel.y, 0.45);
        assert_eq!(player.vel.x, 0.05);
        assert!(player.airborne);
    }

    #[test]
    fn goal_contact_reported_regardless_of_velocity_sign() {
        let mut player = Player::spawn_at(Vec2::new(16.0, 4.0));
        player.vel = Vec2::new(0.0, 0.2);
        let platforms = [Platform::new(
            Vec2::new(16.0, 4.0),
            Vec2::new(2.0, 0.25),
            PlatformKind::Goal,
        )];

        let outcome = integrate(&mut player, &platforms, START, LIMIT);
        assert!(outcome.reached_goal);
        assert!(!outcome.landed);
    }

    #[test]
    fn horizontal_mover_carries_rider() {
        let mut path = MoverPath::new(
            Vec2::new(0.0, 2.25),
            Vec2::new(4.0, 2.25),
            0.01,
            Orientation::Horizontal,
        );
        path.last_shift = 0.04;
        let platforms = [Platform::new(
            Vec2::new(0.0, 2.25),
            Vec2::new(1.5, 0.25),
            PlatformKind::Moving(path),
        )];

        let mut player = Player::spawn_at(Vec2::new(0.1, 3.0));
        player.vel = Vec2::new(0.0, -0.5);

        let outcome = integrate(&mut player, &platforms, START, LIMIT);
        assert!(outcome.landed);
        // Carried by the platform's per-tick shift; inside the side-contact
        // threshold, so no lateral push.
        assert!((player.pos.x - 0.14).abs() < 1e-6);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn off_center_mover_contact_ejects_sideways() {
        let path = MoverPath::new(
            Vec2::new(0.0, 2.25),
            Vec2::new(4.0, 2.25),
            0.01,
            Orientation::Horizontal,
        );
        let platforms = [Platform::new(
            Vec2::new(0.0, 2.25),
            Vec2::new(1.5, 0.25),
            PlatformKind::Moving(path),
        )];

        let mut player = Player::spawn_at(Vec2::new(1.2, 3.0));
        player.vel = Vec2::new(0.0, -0.5);

        let outcome = integrate(&mut player, &platforms, START, LIMIT);
        assert!(outcome.landed);
        assert_eq!(player.vel.x, SIDE_PUSH);
    }
}
