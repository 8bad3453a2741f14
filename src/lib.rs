//! Spritegraph - a minimal 2D game-object runtime
//!
//! Core modules:
//! - `sim`: Scene graph (world, groups, sprites), physics bodies, camera, time
//! - `renderer`: Presentation seam the simulation publishes transforms to
//! - `cache`: Image/spritesheet entries read by sprites at construction
//! - `game`: Root object tying the frame update/render order together
//! - `settings`: Data-driven configuration

pub mod cache;
pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use cache::{AssetCache, FrameOffset, ImageAsset};
pub use error::EngineError;
pub use game::{Game, States};
pub use renderer::{Element, Fill, Presenter, RecordingPresenter, Transform};
pub use settings::{GroupDestroyPolicy, Settings};

use rand::Rng;

/// Engine configuration constants
pub mod consts {
    /// Default game (and world, and camera viewport) size
    pub const DEFAULT_WIDTH: f32 = 960.0;
    pub const DEFAULT_HEIGHT: f32 = 540.0;

    /// Default visual size of a new sprite
    pub const DEFAULT_SPRITE_SIZE: f32 = 32.0;
    /// Default normalized pivot
    pub const DEFAULT_ANCHOR: f32 = 0.5;

    /// Default spritesheet frame size
    pub const DEFAULT_FRAME_SIZE: u32 = 32;

    /// Fill used for sprites created without an image key
    pub const UNTEXTURED_FILL: &str = "#00ff00";

    /// Fixed update step used by the demo driver (60 Hz, milliseconds)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Degrees to radians factor
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
/// Radians to degrees factor
pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Random integer between `min` and `max`, both inclusive.
///
/// Swapped bounds are accepted.
pub fn integer_in_range<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(lo..=hi)
}

/// Direction from the first point to the second, in degrees
#[inline]
pub fn angle_between_points(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (y2 - y1).atan2(x2 - x1) * RAD_TO_DEG
}

/// Euclidean distance between two points
#[inline]
pub fn distance_between_points(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x2 - x1).hypot(y2 - y1)
}

/// Round to the nearest integer, halves toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`)
#[inline]
pub fn round_half_up(value: f32) -> i32 {
    // `floor(v + 0.5)` would round 0.49999997 up through the addition
    if value.fract().abs() == 0.5 {
        value.ceil() as i32
    } else {
        value.round() as i32
    }
}
