//! Engine error type

use crate::sim::{Child, GroupId, Owner, SpriteId};

/// Errors reported by scene graph, asset and settings operations
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The entity is not in the container it was removed from
    #[error("{child} is not a child of {container}")]
    NotAChild { child: Child, container: Owner },

    /// A group-owned sprite was added to the world directly
    #[error("{sprite} already belongs to {owner}")]
    AlreadyOwned { sprite: SpriteId, owner: Owner },

    /// The entity is already listed by the world
    #[error("{0} is already a child of the world")]
    AlreadyChild(Child),

    /// The entity existed but has already been destroyed
    #[error("{0} has already been destroyed")]
    Detached(Child),

    /// The sprite id was never issued
    #[error("unknown {0}")]
    UnknownSprite(SpriteId),

    /// The group id was never issued
    #[error("unknown {0}")]
    UnknownGroup(GroupId),

    /// No cache entry under this key
    #[error("no image cached under key '{0}'")]
    MissingAsset(String),

    /// Cache entry exists but its image has not finished loading
    #[error("image '{0}' has not finished loading")]
    AssetNotReady(String),

    /// Cache entry has no frame at this index
    #[error("image '{key}' has no frame {frame}")]
    MissingFrame { key: String, frame: usize },

    /// Frame change requested on a sprite without an image
    #[error("{0} has no image to take frames from")]
    NoImage(SpriteId),

    /// Settings file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for `Settings`
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
