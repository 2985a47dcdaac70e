use std::collections::HashMap;
use std::hash::Hash;

use crate::entity::EntityId;
use crate::event::Event;
use crate::manager::Manager;
use crate::world::State;

/// Associates unique tags with single entities, e.g. `"PLAYER"` or `"BOSS"`.
///
/// Tags are dropped automatically when their entity is deleted.
pub struct TagManager<T> {
    entities_by_tag: HashMap<T, EntityId>,
    tags_by_entity:  HashMap<EntityId, T>,
}

impl<T> Default for TagManager<T> {
    fn default() -> Self {
        Self { entities_by_tag: HashMap::new(), tags_by_entity: HashMap::new() }
    }
}

impl<T: Eq + Hash + Clone> TagManager<T> {
    /// Tags an entity, replacing any entity previously holding the tag
    /// and any tag previously held by the entity.
    pub fn register(&mut self, tag: T, entity: EntityId) {
        if let Some(old_entity) = self.entities_by_tag.insert(tag.clone(), entity) {
            self.tags_by_entity.remove(&old_entity);
        }
        if let Some(old_tag) = self.tags_by_entity.insert(entity, tag.clone()) {
            if old_tag != tag {
                self.entities_by_tag.remove(&old_tag);
            }
        }
    }

    /// Removes a tag.
    pub fn unregister(&mut self, tag: &T) {
        if let Some(entity) = self.entities_by_tag.remove(tag) {
            self.tags_by_entity.remove(&entity);
        }
    }

    pub fn is_registered(&self, tag: &T) -> bool { self.entities_by_tag.contains_key(tag) }

    /// Gets the entity holding a tag.
    pub fn entity(&self, tag: &T) -> Option<EntityId> { self.entities_by_tag.get(tag).copied() }

    /// Gets the tag held by an entity.
    pub fn tag(&self, entity: EntityId) -> Option<&T> { self.tags_by_entity.get(&entity) }

    pub fn registered_tags(&self) -> impl Iterator<Item = &T> + '_ { self.entities_by_tag.keys() }
}

impl<T: Eq + Hash + Clone + 'static> Manager for TagManager<T> {
    fn notify(&mut self, event: Event, entity: EntityId, _state: &State) {
        if event == Event::Deleted {
            if let Some(tag) = self.tags_by_entity.remove(&entity) {
                self.entities_by_tag.remove(&tag);
            }
        }
    }
}
