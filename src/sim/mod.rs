//! Simulation module
//!
//! Everything that advances per frame lives here. This module must stay
//! free of presentation details:
//! - Sprites publish transforms through `Presenter`, never draw
//! - Time arrives as a delta, the frame driver is external
//! - Stable iteration order (insertion order of container children)

pub mod body;
pub mod camera;
pub mod collision;
pub mod entity;
pub mod geom;
pub mod group;
pub mod sprite;
pub mod time;
pub mod world;

pub use body::{Body, Touching};
pub use camera::Camera;
pub use collision::{intersect_circle, intersect_rectangle};
pub use entity::{Child, GroupId, Owner, SpriteId};
pub use geom::{Circle, Point, Rectangle};
pub use group::Group;
pub use sprite::{FrameContext, Sprite};
pub use time::Time;
pub use world::World;
