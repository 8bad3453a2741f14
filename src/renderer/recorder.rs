//! In-memory presenter that records every call

use super::{Element, Presenter, Transform};
use crate::cache::FrameOffset;
use crate::sim::SpriteId;

/// One recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum PresentCommand {
    Viewport {
        width: f32,
        height: f32,
        background: Option<String>,
    },
    Create { id: SpriteId, element: Element },
    Resize { id: SpriteId, width: f32, height: f32 },
    Frame { id: SpriteId, offset: FrameOffset },
    Apply { id: SpriteId, transform: Transform, alpha: f32 },
    Scroll { x: f32, y: f32 },
    Release { id: SpriteId },
}

/// Presenter that keeps a log instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub commands: Vec<PresentCommand>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Transforms published for `id`, oldest first
    pub fn applied(&self, id: SpriteId) -> Vec<(Transform, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                PresentCommand::Apply {
                    id: applied,
                    transform,
                    alpha,
                } if *applied == id => Some((*transform, *alpha)),
                _ => None,
            })
            .collect()
    }

    /// Most recent scroll offset
    pub fn last_scroll(&self) -> Option<(f32, f32)> {
        self.commands.iter().rev().find_map(|c| match c {
            PresentCommand::Scroll { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    /// Sprites that currently have a live element
    pub fn live_elements(&self) -> Vec<SpriteId> {
        let mut live = Vec::new();
        for command in &self.commands {
            match command {
                PresentCommand::Create { id, .. } => live.push(*id),
                PresentCommand::Release { id } => live.retain(|l| l != id),
                _ => {}
            }
        }
        live
    }
}

impl Presenter for RecordingPresenter {
    fn configure_viewport(&mut self, width: f32, height: f32, background: Option<&str>) {
        self.commands.push(PresentCommand::Viewport {
            width,
            height,
            background: background.map(str::to_string),
        });
    }

    fn create_element(&mut self, id: SpriteId, element: &Element) {
        self.commands.push(PresentCommand::Create {
            id,
            element: element.clone(),
        });
    }

    fn resize_element(&mut self, id: SpriteId, width: f32, height: f32) {
        self.commands.push(PresentCommand::Resize { id, width, height });
    }

    fn set_frame_offset(&mut self, id: SpriteId, offset: FrameOffset) {
        self.commands.push(PresentCommand::Frame { id, offset });
    }

    fn apply(&mut self, id: SpriteId, transform: Transform, alpha: f32) {
        self.commands.push(PresentCommand::Apply {
            id,
            transform,
            alpha,
        });
    }

    fn scroll_to(&mut self, x: f32, y: f32) {
        self.commands.push(PresentCommand::Scroll { x, y });
    }

    fn release_element(&mut self, id: SpriteId) {
        self.commands.push(PresentCommand::Release { id });
    }
}
