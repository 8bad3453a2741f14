//! Game settings
//!
//! Stored as JSON next to the game, loaded once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;

/// What happens to a group's sprites when the group is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupDestroyPolicy {
    /// Sprites are handed back to the world and keep updating
    #[default]
    ReparentToWorld,
    /// Sprites are destroyed along with the group
    Cascade,
}

impl GroupDestroyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupDestroyPolicy::ReparentToWorld => "ReparentToWorld",
            GroupDestroyPolicy::Cascade => "Cascade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reparenttoworld" | "reparent" => Some(GroupDestroyPolicy::ReparentToWorld),
            "cascade" => Some(GroupDestroyPolicy::Cascade),
            _ => None,
        }
    }
}

// Stored by name; loading accepts any case and the short "reparent"
impl Serialize for GroupDestroyPolicy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GroupDestroyPolicy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_str(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown group destroy policy '{}'", name)))
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game width (world and camera viewport width)
    pub width: f32,
    /// Game height (world and camera viewport height)
    pub height: f32,
    /// Leave the container uncoloured
    pub transparent: bool,
    /// Container colour when not transparent
    pub background: String,
    /// Seed for the game RNG
    pub seed: u64,
    /// Policy applied by `Game::destroy_group`
    pub group_destroy_policy: GroupDestroyPolicy,
    /// Visual size of newly created sprites
    pub sprite_width: f32,
    pub sprite_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            transparent: false,
            background: "#000000".to_string(),
            seed: 0,
            group_destroy_policy: GroupDestroyPolicy::default(),
            sprite_width: DEFAULT_SPRITE_SIZE,
            sprite_height: DEFAULT_SPRITE_SIZE,
        }
    }
}

impl Settings {
    /// Settings for a given game size, everything else default
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Container colour, `None` when transparent
    pub fn effective_background(&self) -> Option<&str> {
        if self.transparent {
            None
        } else {
            Some(&self.background)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
