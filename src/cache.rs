//! Image cache shared with the asset loader
//!
//! The loader itself (fetching, decoding) lives outside this crate. It
//! queues entries here, then reports each one as loaded or failed. Sprites
//! read an entry exactly once, when they are constructed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FRAME_SIZE;
use crate::error::EngineError;
use crate::renderer::Fill;

/// Background offset that shows one spritesheet frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameOffset {
    pub x: i32,
    pub y: i32,
}

/// Loading state of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    Pending,
    Ready,
}

/// A cached image, possibly sliced into spritesheet frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub src: String,
    pub state: LoadState,
    /// Pixel size, known once loaded
    pub width: u32,
    pub height: u32,
    /// Frame slicing, `None` for plain images
    pub sheet: Option<SheetLayout>,
    /// Frame offsets, filled when a spritesheet finishes loading
    pub frames: Vec<FrameOffset>,
}

/// How a spritesheet is cut into frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Stop after this many frames
    pub frame_limit: Option<usize>,
}

impl ImageAsset {
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Offset of frame `index`
    pub fn frame(&self, index: usize) -> Option<FrameOffset> {
        self.frames.get(index).copied()
    }
}

/// Frame offsets of a `width`x`height` sheet, columns outer and rows inner
pub fn slice_frames(width: u32, height: u32, layout: SheetLayout) -> Vec<FrameOffset> {
    let fw = layout.frame_width.max(1) as usize;
    let fh = layout.frame_height.max(1) as usize;
    let limit = layout.frame_limit.unwrap_or(usize::MAX);

    let mut frames = Vec::new();
    'columns: for x in (0..width as usize).step_by(fw) {
        for y in (0..height as usize).step_by(fh) {
            if frames.len() >= limit {
                break 'columns;
            }
            frames.push(FrameOffset {
                x: -(x as i32),
                y: -(y as i32),
            });
        }
    }
    frames
}

/// Image entries keyed by name
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    images: HashMap<String, ImageAsset>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain image that is about to load
    pub fn queue_image(&mut self, key: impl Into<String>, src: impl Into<String>) {
        self.queue(key.into(), src.into(), None);
    }

    /// Register a spritesheet that is about to load.
    ///
    /// Frame sizes of 0 fall back to 32.
    pub fn queue_spritesheet(
        &mut self,
        key: impl Into<String>,
        src: impl Into<String>,
        frame_width: u32,
        frame_height: u32,
        frame_limit: Option<usize>,
    ) {
        let or_default = |v: u32| if v == 0 { DEFAULT_FRAME_SIZE } else { v };
        let layout = SheetLayout {
            frame_width: or_default(frame_width),
            frame_height: or_default(frame_height),
            frame_limit,
        };
        self.queue(key.into(), src.into(), Some(layout));
    }

    fn queue(&mut self, key: String, src: String, sheet: Option<SheetLayout>) {
        log::info!("Queued image '{}' ({})", key, src);
        self.images.insert(
            key,
            ImageAsset {
                src,
                state: LoadState::Pending,
                width: 0,
                height: 0,
                sheet,
                frames: Vec::new(),
            },
        );
    }

    /// The loader finished decoding `key`
    pub fn mark_loaded(&mut self, key: &str, width: u32, height: u32) -> Result<(), EngineError> {
        let asset = self
            .images
            .get_mut(key)
            .ok_or_else(|| EngineError::MissingAsset(key.to_string()))?;

        asset.width = width;
        asset.height = height;
        asset.state = LoadState::Ready;
        if let Some(layout) = asset.sheet {
            asset.frames = slice_frames(width, height, layout);
        }
        log::info!(
            "Loaded image '{}' {}x{} ({} frames)",
            key,
            width,
            height,
            asset.frames.len()
        );
        Ok(())
    }

    /// The loader gave up on `key`; the entry is dropped
    pub fn mark_failed(&mut self, key: &str) {
        if self.images.remove(key).is_some() {
            log::warn!("Failed to load image '{}', removed from cache", key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ImageAsset> {
        self.images.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Ready entry under `key`
    pub fn ready(&self, key: &str) -> Result<&ImageAsset, EngineError> {
        let asset = self
            .images
            .get(key)
            .ok_or_else(|| EngineError::MissingAsset(key.to_string()))?;
        if !asset.is_ready() {
            return Err(EngineError::AssetNotReady(key.to_string()));
        }
        Ok(asset)
    }

    /// Offset of `frame` in the ready entry under `key`
    pub fn frame(&self, key: &str, frame: usize) -> Result<FrameOffset, EngineError> {
        self.ready(key)?
            .frame(frame)
            .ok_or_else(|| EngineError::MissingFrame {
                key: key.to_string(),
                frame,
            })
    }

    /// Fill for a new sprite showing `key` at `frame`.
    ///
    /// Frame 0 leaves the image unshifted.
    pub fn resolve(&self, key: &str, frame: usize) -> Result<Fill, EngineError> {
        let asset = self.ready(key)?;
        let offset = if frame == 0 {
            None
        } else {
            Some(self.frame(key, frame)?)
        };
        Ok(Fill::Image {
            src: asset.src.clone(),
            offset,
        })
    }
}
