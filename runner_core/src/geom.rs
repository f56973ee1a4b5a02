//! Collision geometry.
//!
//! Everything collidable is an axis-aligned box described by its center and
//! half-extents. Overlap uses closed intervals: boxes that merely touch
//! edges still count as intersecting, which is what lets a resting body
//! keep registering its support platform.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Axis-aligned bounding box, center + half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub const fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Closed-interval overlap test; symmetric in its arguments.
    pub fn intersects(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() <= self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() <= self.half.y + other.half.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(0.5, 0.5))
    }

    #[test]
    fn overlapping_boxes_intersect() {
        assert!(unit_box(0.0, 0.0).intersects(&unit_box(0.5, 0.5)));
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        assert!(!unit_box(0.0, 0.0).intersects(&unit_box(2.0, 0.0)));
        assert!(!unit_box(0.0, 0.0).intersects(&unit_box(0.0, -2.0)));
    }

    #[test]
    fn touching_edges_count_as_contact() {
        // Exactly one unit apart on x: the closed interval includes it.
        assert!(unit_box(0.0, 0.0).intersects(&unit_box(1.0, 0.0)));
    }

    #[test]
    fn intersection_is_symmetric() {
        let a = unit_box(0.0, 0.0);
        let b = Aabb::new(Vec2::new(0.75, 0.0), Vec2::new(0.3, 0.3));
        assert_eq!(a.intersects(&b), b.intersects(&a));
    }
}
