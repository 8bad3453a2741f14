//! Per-sprite physics state

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which world edges a body struck during the current update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touching {
    /// True iff all four edges are false
    pub none: bool,
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Default for Touching {
    fn default() -> Self {
        Self {
            none: true,
            left: false,
            right: false,
            top: false,
            bottom: false,
        }
    }
}

impl Touching {
    /// Forget last frame's contacts
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        !self.none
    }
}

/// Velocity, drag, gravity and bounce, all per axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Pixels per second
    pub velocity: Vec2,
    /// Fraction of velocity kept (negated) after striking a world edge
    pub bounce: Vec2,
    /// Fraction of velocity removed each update, expected in [0, 1]
    pub drag: Vec2,
    /// Added to velocity each update
    pub gravity: Vec2,
    pub collide_world_bounds: bool,
    pub touching: Touching,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply drag then gravity to the velocity.
    ///
    /// Drag outside [0, 1] is not validated; `drag > 1` flips the sign
    /// every update.
    pub fn accelerate(&mut self) {
        self.velocity *= Vec2::ONE - self.drag;
        self.velocity += self.gravity;
    }

    /// Reflect horizontal velocity off a vertical world edge
    #[inline]
    pub fn bounce_x(&mut self) {
        self.velocity.x = -(self.velocity.x * self.bounce.x);
    }

    /// Reflect vertical velocity off a horizontal world edge
    #[inline]
    pub fn bounce_y(&mut self) {
        self.velocity.y = -(self.velocity.y * self.bounce.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_reset() {
        let mut touching = Touching {
            none: false,
            left: true,
            right: false,
            top: true,
            bottom: false,
        };
        assert!(touching.any());
        touching.reset();
        assert_eq!(touching, Touching::default());
        assert!(!touching.any());
    }

    #[test]
    fn test_drag_before_gravity() {
        let mut body = Body::new();
        body.velocity = Vec2::new(100.0, 0.0);
        body.drag = Vec2::new(0.5, 0.0);
        body.gravity = Vec2::new(0.0, 10.0);
        body.accelerate();
        assert_eq!(body.velocity, Vec2::new(50.0, 10.0));
        body.accelerate();
        assert_eq!(body.velocity, Vec2::new(25.0, 20.0));
    }

    #[test]
    fn test_drag_above_one_flips_sign() {
        let mut body = Body::new();
        body.velocity = Vec2::new(10.0, -10.0);
        body.drag = Vec2::splat(2.0);
        body.accelerate();
        assert_eq!(body.velocity, Vec2::new(-10.0, 10.0));
    }

    #[test]
    fn test_bounce_scales_and_inverts() {
        let mut body = Body::new();
        body.velocity = Vec2::new(-40.0, 30.0);
        body.bounce = Vec2::new(0.5, 1.0);
        body.bounce_x();
        body.bounce_y();
        assert_eq!(body.velocity, Vec2::new(20.0, -30.0));
    }
}
