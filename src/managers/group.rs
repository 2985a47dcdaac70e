use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::entity::EntityId;
use crate::event::Event;
use crate::manager::Manager;
use crate::world::State;

/// Groups entities together, e.g. tanks into `"units"` or explosions into `"effects"`.
///
/// An entity may belong to any number of groups.
/// Deleted entities are removed from all groups automatically.
pub struct GroupManager<G> {
    entities_by_group: IndexMap<G, IndexSet<EntityId>>,
    groups_by_entity:  IndexMap<EntityId, IndexSet<G>>,
}

impl<G> Default for GroupManager<G> {
    fn default() -> Self {
        Self { entities_by_group: IndexMap::new(), groups_by_entity: IndexMap::new() }
    }
}

impl<G: Eq + Hash + Clone> GroupManager<G> {
    /// Adds an entity to a group.
    pub fn add(&mut self, entity: EntityId, group: G) {
        self.entities_by_group.entry(group.clone()).or_default().insert(entity);
        self.groups_by_entity.entry(entity).or_default().insert(group);
    }

    /// Removes an entity from a group.
    pub fn remove(&mut self, entity: EntityId, group: &G) {
        if let Some(entities) = self.entities_by_group.get_mut(group) {
            entities.swap_remove(&entity);
        }
        if let Some(groups) = self.groups_by_entity.get_mut(&entity) {
            groups.swap_remove(group);
        }
    }

    /// Removes an entity from all groups it belongs to.
    pub fn remove_from_all_groups(&mut self, entity: EntityId) {
        let groups = match self.groups_by_entity.swap_remove(&entity) {
            Some(groups) => groups,
            None => return,
        };

        for group in &groups {
            if let Some(entities) = self.entities_by_group.get_mut(group) {
                entities.swap_remove(&entity);
            }
        }
    }

    /// Iterates over the entities in a group.
    pub fn entities(&self, group: &G) -> impl Iterator<Item = EntityId> + '_ {
        self.entities_by_group.get(group).into_iter().flatten().copied()
    }

    /// Iterates over the groups an entity belongs to.
    pub fn groups(&self, entity: EntityId) -> impl Iterator<Item = &G> + '_ {
        self.groups_by_entity.get(&entity).into_iter().flatten()
    }

    pub fn is_in_any_group(&self, entity: EntityId) -> bool {
        self.groups_by_entity.get(&entity).map_or(false, |groups| !groups.is_empty())
    }

    pub fn is_in_group(&self, entity: EntityId, group: &G) -> bool {
        self.groups_by_entity.get(&entity).map_or(false, |groups| groups.contains(group))
    }
}

impl<G: Eq + Hash + Clone + 'static> Manager for GroupManager<G> {
    fn notify(&mut self, event: Event, entity: EntityId, _state: &State) {
        if event == Event::Deleted {
            self.remove_from_all_groups(entity);
        }
    }
}
