//! The world: root container, sprite storage and frame traversal
//!
//! The world owns every sprite and group. Its `children` list holds the
//! direct children (sprites not in a group, and all groups) in insertion
//! order, which is also update and render order. A sprite's `owner` tag
//! names the single container whose child list holds it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{Child, GroupId, Owner, SpriteId};
use super::geom::Rectangle;
use super::group::Group;
use super::sprite::{FrameContext, Sprite};
use crate::error::EngineError;
use crate::renderer::{Element, Presenter};

/// Position of `id` in id-sorted sprite storage
pub(super) fn sprite_index(sprites: &[Sprite], id: SpriteId) -> Option<usize> {
    sprites.binary_search_by_key(&id, |s| s.id).ok()
}

/// Root container and simulation boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Extent used for bounds collision, changed through `resize`
    width: f32,
    height: f32,
    bounds: Rectangle,
    pub camera: Camera,
    /// Direct children, in update order
    pub(super) children: Vec<Child>,
    /// All live sprites, sorted by id
    pub(super) sprites: Vec<Sprite>,
    /// All live groups, sorted by id
    pub(super) groups: Vec<Group>,
    next_sprite_id: u32,
    next_group_id: u32,
}

impl World {
    /// A world of the given size whose camera viewport covers `viewport`
    pub fn new(width: f32, height: f32, viewport: Vec2) -> Self {
        Self {
            width,
            height,
            bounds: Rectangle::new(0.0, 0.0, width, height),
            camera: Camera::new(viewport.x, viewport.y),
            children: Vec::new(),
            sprites: Vec::new(),
            groups: Vec::new(),
            next_sprite_id: 1,
            next_group_id: 1,
        }
    }

    /// Change the world extent, keeping `bounds` in step
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.bounds.set_to(0.0, 0.0, width, height);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn contains_child(&self, child: Child) -> bool {
        self.children.contains(&child)
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn sprite(&self, id: SpriteId) -> Result<&Sprite, EngineError> {
        match sprite_index(&self.sprites, id) {
            Some(i) => Ok(&self.sprites[i]),
            None => Err(self.missing_sprite(id)),
        }
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Result<&mut Sprite, EngineError> {
        match sprite_index(&self.sprites, id) {
            Some(i) => Ok(&mut self.sprites[i]),
            None => Err(self.missing_sprite(id)),
        }
    }

    /// Error for a sprite id with no live sprite behind it
    pub(super) fn missing_sprite(&self, id: SpriteId) -> EngineError {
        if id.0 != 0 && id.0 < self.next_sprite_id {
            EngineError::Detached(Child::Sprite(id))
        } else {
            EngineError::UnknownSprite(id)
        }
    }

    /// Error for a group id with no live group behind it
    pub(super) fn missing_group(&self, id: GroupId) -> EngineError {
        if id.0 != 0 && id.0 < self.next_group_id {
            EngineError::Detached(Child::Group(id))
        } else {
            EngineError::UnknownGroup(id)
        }
    }

    pub(super) fn issue_group_id(&mut self) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        id
    }

    /// Reserve the id of the next sprite
    pub fn next_sprite_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next_sprite_id);
        self.next_sprite_id += 1;
        id
    }

    /// Store a newly built sprite and attach it to the container its
    /// `owner` names, then create its element.
    pub(crate) fn attach_sprite(
        &mut self,
        sprite: Sprite,
        element: &Element,
        presenter: &mut (impl Presenter + ?Sized),
    ) -> Result<SpriteId, EngineError> {
        let id = sprite.id;
        if sprite_index(&self.sprites, id).is_some() {
            return Err(EngineError::AlreadyChild(Child::Sprite(id)));
        }
        match sprite.owner {
            Owner::World => self.children.push(Child::Sprite(id)),
            Owner::Group(group) => self.group_mut(group)?.children.push(id),
        }

        // Ids are issued in increasing order, so this keeps storage sorted
        let at = self.sprites.partition_point(|s| s.id < id);
        self.sprites.insert(at, sprite);
        presenter.create_element(id, element);
        log::debug!("Spawned {} in {}", id, self.sprites[at].owner);
        Ok(id)
    }

    /// Append a direct child.
    ///
    /// Only entities whose owner is the world and that are not listed yet
    /// are accepted, so nothing ends up in two places.
    pub(super) fn add_child(&mut self, child: Child) -> Result<(), EngineError> {
        match child {
            Child::Sprite(id) => {
                let sprite = self.sprite(id)?;
                if let Owner::Group(_) = sprite.owner {
                    return Err(EngineError::AlreadyOwned {
                        sprite: id,
                        owner: sprite.owner,
                    });
                }
            }
            Child::Group(id) => {
                self.group(id)?;
            }
        }
        if self.children.contains(&child) {
            return Err(EngineError::AlreadyChild(child));
        }
        self.children.push(child);
        Ok(())
    }

    /// Remove the first occurrence of a direct child. The caller re-homes
    /// or drops the entity.
    pub(super) fn remove_child(&mut self, child: Child) -> Result<(), EngineError> {
        let index = self
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(EngineError::NotAChild {
                child,
                container: Owner::World,
            })?;
        self.children.remove(index);
        Ok(())
    }

    /// Drop a sprite from storage without touching any child list
    pub(super) fn take_sprite(&mut self, id: SpriteId) -> Result<Sprite, EngineError> {
        match sprite_index(&self.sprites, id) {
            Some(i) => Ok(self.sprites.remove(i)),
            None => Err(self.missing_sprite(id)),
        }
    }

    /// Detach a sprite from its container and release its element.
    ///
    /// A second call for the same id reports `Detached`.
    pub fn destroy_sprite(
        &mut self,
        id: SpriteId,
        presenter: &mut (impl Presenter + ?Sized),
    ) -> Result<Sprite, EngineError> {
        let owner = self.sprite(id)?.owner;
        match owner {
            Owner::World => self.remove_child(Child::Sprite(id))?,
            Owner::Group(group) => self.detach_from_group(group, id)?,
        }

        let sprite = self.take_sprite(id)?;
        presenter.release_element(id);
        log::debug!("Destroyed {} (was in {})", id, owner);
        Ok(sprite)
    }

    /// Mark a sprite dead, then destroy it
    pub fn kill_sprite(
        &mut self,
        id: SpriteId,
        presenter: &mut (impl Presenter + ?Sized),
    ) -> Result<Sprite, EngineError> {
        self.sprite_mut(id)?.alive = false;
        self.destroy_sprite(id, presenter)
    }

    /// Inputs every sprite sees this frame
    pub fn frame_context(&self, delta: f32) -> FrameContext {
        FrameContext {
            delta,
            world_width: self.width,
            world_height: self.height,
            camera: self.camera.view(),
        }
    }

    /// Update every direct child in order; groups update their own sprites.
    ///
    /// Sprite updates cannot change the scene structure, so additions and
    /// removals made by game code take effect on the next frame.
    pub fn update(&mut self, delta: f32) {
        let ctx = self.frame_context(delta);
        for i in 0..self.children.len() {
            match self.children[i] {
                Child::Sprite(id) => {
                    if let Some(s) = sprite_index(&self.sprites, id) {
                        self.sprites[s].update(&ctx);
                    }
                }
                Child::Group(id) => self.update_group(id, &ctx),
            }
        }
    }

    /// Move the camera towards its target, if any.
    ///
    /// A target that no longer exists returns the camera to idle.
    pub fn update_camera(&mut self, presenter: &mut (impl Presenter + ?Sized)) {
        let Some(target) = self.camera.target else {
            return;
        };

        match self.sprite(target) {
            Ok(sprite) => {
                let pos = Vec2::new(sprite.x, sprite.y);
                self.camera.update(pos, self.width, self.height, presenter);
            }
            Err(_) => {
                log::warn!("Camera target {} is gone, unfollowing", target);
                self.camera.unfollow();
            }
        }
    }

    /// Render every direct child in order
    pub fn render(&self, presenter: &mut (impl Presenter + ?Sized)) {
        for child in &self.children {
            match *child {
                Child::Sprite(id) => {
                    if let Some(s) = sprite_index(&self.sprites, id) {
                        self.sprites[s].render(presenter);
                    }
                }
                Child::Group(id) => self.render_group(id, presenter),
            }
        }
    }

    /// Every container currently listing `id`
    pub fn containers_of(&self, id: SpriteId) -> Vec<Owner> {
        let mut found: Vec<Owner> = self
            .children
            .iter()
            .filter(|c| **c == Child::Sprite(id))
            .map(|_| Owner::World)
            .collect();
        for group in &self.groups {
            if group.contains(id) {
                found.push(Owner::Group(group.id));
            }
        }
        found
    }
}
