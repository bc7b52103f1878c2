//! Drawable geometry shared by every entity
//!
//! A sprite is a circle in world space:
//! - pos: center, x to the right, y upward
//! - heading: visual facing in degrees
//! - scale: visual size, radius = 8 * scale
//! - layer: draw depth, fixed at construction

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::RADIUS_PER_SCALE;
use crate::{in_bounds, normalize_degrees};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub pos: DVec2,
    /// Facing in degrees, normalized to [0, 360)
    pub heading: f64,
    pub scale: f64,
    layer: u8,
}

impl Sprite {
    pub fn new(x: f64, y: f64, heading: f64, scale: f64, layer: u8) -> Self {
        Self {
            pos: DVec2::new(x, y),
            heading: normalize_degrees(heading),
            scale,
            layer,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn layer(&self) -> u8 {
        self.layer
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        RADIUS_PER_SCALE * self.scale
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = DVec2::new(x, y);
    }

    pub fn move_by(&mut self, delta: DVec2) {
        self.pos += delta;
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.heading = normalize_degrees(self.heading + degrees);
    }

    /// Inside the visible playfield
    pub fn on_screen(&self) -> bool {
        in_bounds(self.pos.x, self.pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_follows_scale() {
        let sprite = Sprite::new(0.0, 0.0, 0.0, 1.5, 1);
        assert_eq!(sprite.radius(), 12.0);
    }

    #[test]
    fn test_rotate_wraps() {
        let mut sprite = Sprite::new(0.0, 0.0, 350.0, 0.5, 1);
        sprite.rotate(20.0);
        assert!((sprite.heading - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_on_screen() {
        let mut sprite = Sprite::new(255.0, 10.0, 0.0, 1.0, 0);
        assert!(sprite.on_screen());
        sprite.move_by(DVec2::new(1.0, 0.0));
        assert!(!sprite.on_screen());
        assert_eq!(sprite.layer(), 0);
    }
}
