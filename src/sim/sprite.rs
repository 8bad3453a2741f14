//! Sprites: the leaf entities of the scene graph
//!
//! A sprite owns its physics body. Each update it integrates the body,
//! resolves world-bounds contacts, decides whether it is inside the camera
//! view and precomputes the transform that `render` publishes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::entity::{Owner, SpriteId};
use super::geom::{Circle, Point, Rectangle};
use crate::consts::DEFAULT_ANCHOR;
use crate::renderer::{Fill, Presenter, Transform};
use crate::round_half_up;

/// Shared per-frame inputs of `Sprite::update`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Simulation step in seconds
    pub delta: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Camera offset and viewport size at the start of the frame
    pub camera: Rectangle,
}

/// A simulated, optionally visible entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: SpriteId,
    pub x: f32,
    pub y: f32,
    /// Visual size
    pub width: f32,
    pub height: f32,
    /// Normalized pivot
    pub anchor: Point,
    /// Mirrors `x`/`y` after each update
    pub position: Point,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Position and visual size after each update
    pub bounds: Rectangle,
    pub alpha: f32,
    pub alive: bool,
    /// Set during update, read by render
    pub in_camera: bool,
    /// Request despawning once the sprite leaves the world. The check runs
    /// and sets `outside_world`, but never kills.
    pub out_of_bounds_kill: bool,
    /// Result of the last out-of-bounds check
    pub outside_world: bool,
    pub body: Body,
    pub owner: Owner,
    /// Cache key of the image, `None` for a flat-coloured sprite
    pub key: Option<String>,
    pub frame: usize,
    pub fill: Fill,
    pub transform: Transform,
}

impl Sprite {
    /// A sprite at `(x, y)`. Attaching it to a container is the world's job.
    pub fn new(id: SpriteId, x: f32, y: f32, width: f32, height: f32, fill: Fill) -> Self {
        let mut sprite = Self {
            id,
            x,
            y,
            width,
            height,
            anchor: Vec2::splat(DEFAULT_ANCHOR),
            position: Vec2::new(x, y),
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            bounds: Rectangle::new(x, y, width, height),
            alpha: 1.0,
            alive: true,
            in_camera: false,
            out_of_bounds_kill: false,
            outside_world: false,
            body: Body::new(),
            owner: Owner::World,
            key: None,
            frame: 0,
            fill,
            transform: Transform::default(),
        };
        sprite.refresh_edges();
        sprite
    }

    /// Horizontal distance from the pivot to the left edge
    #[inline]
    pub fn pivot_width(&self) -> f32 {
        self.width * self.anchor.x
    }

    /// Vertical distance from the pivot to the top edge
    #[inline]
    pub fn pivot_height(&self) -> f32 {
        self.height * self.anchor.y
    }

    /// Top-left anchored box spanned by the derived edges
    pub fn aabb(&self) -> Rectangle {
        Rectangle::new(self.left, self.top, self.right - self.left, self.bottom - self.top)
    }

    /// Circle at the position whose diameter is the sprite width
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.width)
    }

    /// Advance one frame. Dead sprites are left untouched.
    pub fn update(&mut self, ctx: &FrameContext) {
        if !self.alive {
            return;
        }

        let half_w = self.pivot_width();
        let half_h = self.pivot_height();

        self.body.touching.reset();
        self.body.accelerate();
        self.x += ctx.delta * self.body.velocity.x;
        self.y += ctx.delta * self.body.velocity.y;

        if self.body.collide_world_bounds {
            self.collide_world_bounds(half_w, half_h, ctx.world_width, ctx.world_height);
        }

        // Compared against the viewport size, not its far edge
        let camera = &ctx.camera;
        self.in_camera =
            self.x >= camera.x && self.y >= camera.y && self.x <= camera.width && self.y <= camera.height;

        if self.out_of_bounds_kill {
            self.outside_world = self.x < half_w
                || self.x > ctx.world_width + half_w
                || self.y < half_h
                || self.y > ctx.world_height + half_h;
        }

        self.refresh_edges();
        self.transform = Transform {
            x: round_half_up(self.x - half_w),
            y: round_half_up(self.y - half_h),
        };
    }

    /// Clamp against each world edge independently, bouncing off every one hit
    fn collide_world_bounds(&mut self, half_w: f32, half_h: f32, world_width: f32, world_height: f32) {
        let body = &mut self.body;

        if self.x <= half_w {
            self.x = half_w;
            body.touching.none = false;
            body.touching.left = true;
            body.bounce_x();
        }

        if self.x + half_w >= world_width {
            self.x = world_width - half_w;
            body.touching.none = false;
            body.touching.right = true;
            body.bounce_x();
        }

        if self.y <= half_h {
            self.y = half_h;
            body.touching.none = false;
            body.touching.top = true;
            body.bounce_y();
        }

        if self.y + half_h >= world_height {
            self.y = world_height - half_h;
            body.touching.none = false;
            body.touching.bottom = true;
            body.bounce_y();
        }
    }

    fn refresh_edges(&mut self) {
        self.position = Vec2::new(self.x, self.y);
        self.bounds.set_to(self.x, self.y, self.width, self.height);
        self.left = self.x - self.pivot_width();
        self.right = self.x + self.pivot_width();
        self.top = self.y - self.pivot_height();
        self.bottom = self.y + self.pivot_height();
    }

    /// Publish this frame's transform if the sprite was in view at update
    pub fn render(&self, presenter: &mut (impl Presenter + ?Sized)) {
        if self.in_camera {
            presenter.apply(self.id, self.transform, self.alpha);
        }
    }
}
