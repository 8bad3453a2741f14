//! Camera following a target sprite inside the world

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::SpriteId;
use super::geom::Rectangle;
use crate::renderer::Presenter;

/// Viewport offset, either idle or snapping to a target each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    /// Viewport size
    pub width: f32,
    pub height: f32,
    pub bounds: Rectangle,
    /// Sprite being followed, `None` while idle
    pub target: Option<SpriteId>,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            bounds: Rectangle::new(0.0, 0.0, width, height),
            target: None,
        }
    }

    pub fn follow(&mut self, target: SpriteId) {
        self.target = Some(target);
    }

    pub fn unfollow(&mut self) {
        self.target = None;
    }

    pub fn is_following(&self) -> bool {
        self.target.is_some()
    }

    /// Offset plus viewport size, as sprites test visibility against it
    pub fn view(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }

    /// Snap to `target_pos` per axis while it lies inside the scroll band.
    ///
    /// The band is `(half viewport, world - half viewport]`; outside it the
    /// camera keeps its previous offset. Publishes the negated offset.
    pub fn update(
        &mut self,
        target_pos: Vec2,
        world_width: f32,
        world_height: f32,
        presenter: &mut (impl Presenter + ?Sized),
    ) {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;

        if target_pos.x > half_w && target_pos.x <= world_width - half_w {
            self.x = target_pos.x - half_w;
        }

        if target_pos.y > half_h && target_pos.y <= world_height - half_h {
            self.y = target_pos.y - half_h;
        }

        self.bounds.set_to(self.x, self.y, self.width, self.height);
        presenter.scroll_to(-self.x, -self.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingPresenter;

    #[test]
    fn test_follow_and_unfollow() {
        let mut camera = Camera::new(400.0, 300.0);
        assert!(!camera.is_following());
        camera.follow(SpriteId(3));
        assert_eq!(camera.target, Some(SpriteId(3)));
        camera.unfollow();
        assert!(!camera.is_following());
    }

    #[test]
    fn test_snaps_inside_band() {
        let mut camera = Camera::new(400.0, 300.0);
        let mut presenter = RecordingPresenter::new();
        camera.update(Vec2::new(500.0, 400.0), 2000.0, 1000.0, &mut presenter);
        assert_eq!((camera.x, camera.y), (300.0, 250.0));
        assert_eq!(presenter.last_scroll(), Some((-300.0, -250.0)));
        assert_eq!(camera.bounds, Rectangle::new(300.0, 250.0, 400.0, 300.0));
    }

    #[test]
    fn test_lower_band_edge_is_exclusive() {
        let mut camera = Camera::new(400.0, 300.0);
        let mut presenter = RecordingPresenter::new();
        camera.update(Vec2::new(200.0, 150.0), 2000.0, 1000.0, &mut presenter);
        assert_eq!((camera.x, camera.y), (0.0, 0.0));
    }

    #[test]
    fn test_upper_band_edge_is_inclusive() {
        let mut camera = Camera::new(400.0, 300.0);
        let mut presenter = RecordingPresenter::new();
        camera.update(Vec2::new(1800.0, 850.0), 2000.0, 1000.0, &mut presenter);
        assert_eq!((camera.x, camera.y), (1600.0, 700.0));
    }

    #[test]
    fn test_freezes_outside_band() {
        let mut camera = Camera::new(400.0, 300.0);
        let mut presenter = RecordingPresenter::new();
        camera.update(Vec2::new(1700.0, 500.0), 2000.0, 1000.0, &mut presenter);
        assert_eq!(camera.x, 1500.0);

        // Past the far edge: frozen at the last offset, not clamped to 1600
        camera.update(Vec2::new(1900.0, 500.0), 2000.0, 1000.0, &mut presenter);
        assert_eq!(camera.x, 1500.0);
    }
}
