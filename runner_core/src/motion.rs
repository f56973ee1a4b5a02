//! Platform motion scheduling.
//!
//! Moving platforms ping-pong between two fixed points: progress advances by
//! `speed * direction` each tick and reflects at the $[0,1]$ bounds (clamped,
//! never wrapped).
//!
//! Horizontal and vertical movers resolve world obstruction differently:
//! horizontal movers update unconditionally and are allowed to overlap static
//! platforms, while vertical movers test the tentative position against every
//! static platform and bounce off on contact. The asymmetry is intentional.

use crate::geom::Aabb;
use crate::level::{Orientation, Platform, PlatformKind};

/// Advances every moving platform by one tick.
pub fn advance_platforms(platforms: &mut [Platform]) {
    // Vertical movers can only be blocked by statics; snapshot those boxes
    // before mutating anything.
    let static_boxes: Vec<Aabb> = platforms
        .iter()
        .filter(|p| p.is_static())
        .map(|p| p.aabb())
        .collect();

    for platform in platforms.iter_mut() {
        let PlatformKind::Moving(ref mut path) = platform.kind else {
            continue;
        };

        path.progress += path.speed * path.direction;
        if path.progress >= 1.0 {
            path.progress = 1.0;
            path.direction = -1.0;
        } else if path.progress <= 0.0 {
            path.progress = 0.0;
            path.direction = 1.0;
        }

        let tentative = path.position();
        match path.orientation {
            Orientation::Horizontal => {
                path.last_shift = tentative.x - platform.pos.x;
                platform.pos = tentative;
            }
            Orientation::Vertical => {
                path.last_shift = 0.0;
                let candidate = Aabb::new(tentative, platform.half);
                if static_boxes.iter().any(|b| candidate.intersects(b)) {
                    // Blocked: keep the prior position, bounce off the
                    // obstacle, and restart the path from the bound that
                    // matches the new travel direction.
                    path.direction = -path.direction;
                    path.progress = if path.direction > 0.0 { 0.0 } else { 1.0 };
                } else {
                    platform.pos = tentative;
                }
            }
        }
    }
}
