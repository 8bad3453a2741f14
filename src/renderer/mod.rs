//! Presentation seam
//!
//! The simulation never draws. It publishes per-sprite transforms and
//! opacity, plus the camera scroll offset, to a `Presenter` that turns
//! them into actual output.

pub mod recorder;

pub use recorder::{PresentCommand, RecordingPresenter};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::FrameOffset;
use crate::sim::SpriteId;

/// Integer pixel translation of a sprite's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({}px,{}px)", self.x, self.y)
    }
}

/// How a sprite's element is filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    /// Flat colour, used when the sprite has no image
    Color(String),
    /// Image, optionally shifted to a spritesheet frame
    Image {
        src: String,
        offset: Option<FrameOffset>,
    },
}

/// Everything a presenter needs to create a sprite's element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub width: f32,
    pub height: f32,
    pub fill: Fill,
}

/// Receiver of everything the simulation publishes
pub trait Presenter {
    /// Size and colour the viewport container, once at startup.
    ///
    /// Content outside `width`x`height` is clipped. `None` leaves the
    /// container transparent.
    fn configure_viewport(&mut self, width: f32, height: f32, background: Option<&str>);

    /// A sprite was created
    fn create_element(&mut self, id: SpriteId, element: &Element);

    /// A sprite changed its visual size
    fn resize_element(&mut self, id: SpriteId, width: f32, height: f32);

    /// A sprite switched spritesheet frame
    fn set_frame_offset(&mut self, id: SpriteId, offset: FrameOffset);

    /// A visible sprite's transform and opacity for this frame
    fn apply(&mut self, id: SpriteId, transform: Transform, alpha: f32);

    /// The viewport container's scroll position
    fn scroll_to(&mut self, x: f32, y: f32);

    /// A sprite was destroyed
    fn release_element(&mut self, id: SpriteId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_display() {
        let t = Transform { x: 84, y: -3 };
        assert_eq!(t.to_string(), "translate(84px,-3px)");
    }
}
