//! Groups: intermediate containers of sprites
//!
//! A group is always a direct child of the world. Adding a sprite to a
//! group takes it out of the world's child list; removing it puts it back
//! at the end.

use serde::{Deserialize, Serialize};

use super::entity::{Child, GroupId, Owner, SpriteId};
use super::sprite::{FrameContext, Sprite};
use super::world::{World, sprite_index};
use crate::error::EngineError;
use crate::renderer::Presenter;
use crate::settings::GroupDestroyPolicy;

/// An ordered set of sprites updated and rendered together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Insertion order is update and render order
    pub(super) children: Vec<SpriteId>,
}

impl Group {
    pub fn children(&self) -> &[SpriteId] {
        &self.children
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.children.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl World {
    fn group_index(&self, id: GroupId) -> Option<usize> {
        self.groups.binary_search_by_key(&id, |g| g.id).ok()
    }

    pub fn group(&self, id: GroupId) -> Result<&Group, EngineError> {
        match self.group_index(id) {
            Some(i) => Ok(&self.groups[i]),
            None => Err(self.missing_group(id)),
        }
    }

    pub(super) fn group_mut(&mut self, id: GroupId) -> Result<&mut Group, EngineError> {
        match self.group_index(id) {
            Some(i) => Ok(&mut self.groups[i]),
            None => Err(self.missing_group(id)),
        }
    }

    /// Create an empty group, already attached to the world
    pub fn create_group(&mut self) -> GroupId {
        let id = self.issue_group_id();
        self.groups.push(Group {
            id,
            children: Vec::new(),
        });
        self.children.push(Child::Group(id));
        log::debug!("Created {}", id);
        id
    }

    /// Move a world-owned sprite into a group
    pub fn add_to_group(&mut self, group: GroupId, sprite: SpriteId) -> Result<(), EngineError> {
        self.group(group)?;
        let owner = self.sprite(sprite)?.owner;
        if let Owner::Group(_) = owner {
            return Err(EngineError::AlreadyOwned { sprite, owner });
        }

        self.remove_child(Child::Sprite(sprite))?;
        self.group_mut(group)?.children.push(sprite);
        self.sprite_mut(sprite)?.owner = Owner::Group(group);
        Ok(())
    }

    /// Move a sprite out of a group, back to the end of the world's children
    pub fn remove_from_group(&mut self, group: GroupId, sprite: SpriteId) -> Result<(), EngineError> {
        self.detach_from_group(group, sprite)?;
        self.sprite_mut(sprite)?.owner = Owner::World;
        self.add_child(Child::Sprite(sprite))
    }

    /// Take a sprite out of a group's child list without re-homing it
    pub(super) fn detach_from_group(&mut self, group: GroupId, sprite: SpriteId) -> Result<(), EngineError> {
        let members = &mut self.group_mut(group)?.children;
        let index = members
            .iter()
            .position(|s| *s == sprite)
            .ok_or(EngineError::NotAChild {
                child: Child::Sprite(sprite),
                container: Owner::Group(group),
            })?;
        members.remove(index);
        Ok(())
    }

    /// Apply `f` to every sprite in the group, in order
    pub fn set_all(&mut self, group: GroupId, mut f: impl FnMut(&mut Sprite)) -> Result<(), EngineError> {
        let index = self.group_index(group).ok_or_else(|| self.missing_group(group))?;
        let members = &self.groups[index].children;
        for id in members {
            if let Some(s) = sprite_index(&self.sprites, *id) {
                f(&mut self.sprites[s]);
            }
        }
        Ok(())
    }

    /// Remove a group from the world, handling its sprites per `policy`
    pub fn destroy_group(
        &mut self,
        group: GroupId,
        policy: GroupDestroyPolicy,
        presenter: &mut (impl Presenter + ?Sized),
    ) -> Result<Group, EngineError> {
        let index = self.group_index(group).ok_or_else(|| self.missing_group(group))?;
        self.remove_child(Child::Group(group))?;
        let removed = self.groups.remove(index);

        match policy {
            GroupDestroyPolicy::ReparentToWorld => {
                for id in &removed.children {
                    self.sprite_mut(*id)?.owner = Owner::World;
                    self.add_child(Child::Sprite(*id))?;
                }
            }
            GroupDestroyPolicy::Cascade => {
                for id in &removed.children {
                    self.take_sprite(*id)?;
                    presenter.release_element(*id);
                }
            }
        }

        log::debug!(
            "Destroyed {} ({} sprites, {})",
            group,
            removed.children.len(),
            policy.as_str()
        );
        Ok(removed)
    }

    pub(super) fn update_group(&mut self, group: GroupId, ctx: &FrameContext) {
        let Some(index) = self.group_index(group) else {
            return;
        };
        let members = &self.groups[index].children;
        for id in members {
            if let Some(s) = sprite_index(&self.sprites, *id) {
                self.sprites[s].update(ctx);
            }
        }
    }

    pub(super) fn render_group(&self, group: GroupId, presenter: &mut (impl Presenter + ?Sized)) {
        let Ok(group) = self.group(group) else {
            return;
        };
        for id in &group.children {
            if let Some(s) = sprite_index(&self.sprites, *id) {
                self.sprites[s].render(presenter);
            }
        }
    }
}
