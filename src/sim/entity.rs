//! Entity identifiers and container membership

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle of a sprite, issued by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Stable handle of a group, issued by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sprite #{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group #{}", self.0)
    }
}

/// The one container a sprite belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    World,
    Group(GroupId),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::World => write!(f, "the world"),
            Owner::Group(id) => write!(f, "{id}"),
        }
    }
}

/// A direct child of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Child {
    Sprite(SpriteId),
    Group(GroupId),
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Sprite(id) => write!(f, "{id}"),
            Child::Group(id) => write!(f, "{id}"),
        }
    }
}

impl From<SpriteId> for Child {
    fn from(id: SpriteId) -> Self {
        Child::Sprite(id)
    }
}

impl From<GroupId> for Child {
    fn from(id: GroupId) -> Self {
        Child::Group(id)
    }
}
