//! Geometric value types
//!
//! Points are plain `glam::Vec2`; rectangles and circles keep the scalar
//! field layout the collision primitives read.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Mutable 2D vector
pub type Point = Vec2;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Re-initialize in place
    pub fn set_to(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Circle described by its center and diameter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
    /// Always `diameter / 2`
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, diameter: f32) -> Self {
        let mut circle = Self::default();
        circle.set_to(x, y, diameter);
        circle
    }

    /// Re-initialize in place, recomputing the radius
    pub fn set_to(&mut self, x: f32, y: f32, diameter: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.diameter = diameter;
        self.radius = diameter * 0.5;
        self
    }

    #[inline]
    pub fn center(&self) -> Point {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_set_to() {
        let mut rect = Rectangle::new(1.0, 2.0, 3.0, 4.0);
        rect.set_to(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect, Rectangle::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn test_circle_radius_follows_diameter() {
        let mut circle = Circle::new(0.0, 0.0, 10.0);
        assert_eq!(circle.radius, 5.0);
        circle.set_to(3.0, 4.0, 7.0);
        assert_eq!(circle.radius, 3.5);
        assert_eq!(circle.center(), Vec2::new(3.0, 4.0));
    }
}
