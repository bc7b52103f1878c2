//! Collision test between two sprites
//!
//! Sprites are circles; two of them touch when their centers are closer than
//! three quarters of their summed radii. Equal distance is a miss.

use super::sprite::Sprite;
use crate::consts::COLLISION_FACTOR;

/// Distance below which two sprites of the given radii collide
#[inline]
pub fn contact_distance(r1: f64, r2: f64) -> f64 {
    COLLISION_FACTOR * (r1 + r2)
}

/// Check collision between two sprites
pub fn sprites_collide(a: &Sprite, b: &Sprite) -> bool {
    a.pos.distance(b.pos) < contact_distance(a.radius(), b.radius())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundary_distance_is_not_collision() {
        // r = 8 each, contact distance = 0.75 * 16 = 12
        let a = Sprite::new(0.0, 0.0, 0.0, 1.0, 0);
        let b = Sprite::new(12.0, 0.0, 0.0, 1.0, 1);
        assert!(!sprites_collide(&a, &b));

        let c = Sprite::new(11.99, 0.0, 0.0, 1.0, 1);
        assert!(sprites_collide(&a, &c));
    }

    #[test]
    fn test_collision_is_symmetric_diagonal() {
        // 3-4-5 triangle: distance 5, radii 4 + 4 -> contact 6
        let a = Sprite::new(10.0, 10.0, 0.0, 0.5, 1);
        let b = Sprite::new(13.0, 14.0, 0.0, 0.5, 1);
        assert!(sprites_collide(&a, &b));
        assert!(sprites_collide(&b, &a));
    }

    #[test]
    fn test_far_apart_misses() {
        let player = Sprite::new(0.0, 128.0, 0.0, 1.0, 0);
        let hostile = Sprite::new(200.0, 128.0, 0.0, 1.5, 1);
        assert!(!sprites_collide(&player, &hostile));
    }

    proptest! {
        #[test]
        fn prop_collision_matches_distance_rule(
            x1 in 0.0f64..256.0, y1 in 0.0f64..256.0, s1 in 0.05f64..2.0,
            x2 in 0.0f64..256.0, y2 in 0.0f64..256.0, s2 in 0.05f64..2.0,
        ) {
            let a = Sprite::new(x1, y1, 0.0, s1, 0);
            let b = Sprite::new(x2, y2, 0.0, s2, 1);
            let dist = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
            let expected = dist < 0.75 * (8.0 * s1 + 8.0 * s2);
            // Skip razor-thin boundary cases where sqrt rounding differs
            prop_assume!((dist - 0.75 * (8.0 * s1 + 8.0 * s2)).abs() > 1e-9);
            prop_assert_eq!(sprites_collide(&a, &b), expected);
            prop_assert_eq!(sprites_collide(&b, &a), expected);
        }
    }
}
