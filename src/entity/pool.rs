use super::EntityId;

/// Allocates entity IDs, recycling released IDs before minting new ones.
#[derive(Debug, Default)]
pub struct IdentifierPool {
    /// Released IDs, used as a FILO stack.
    recycled: Vec<EntityId>,
    /// The smallest ID that has never been allocated.
    gauge:    u32,
}

impl IdentifierPool {
    /// Returns the number of IDs waiting for reuse.
    pub fn recyclable(&self) -> usize { self.recycled.len() }

    /// Allocates an ID.
    ///
    /// The most recently released ID is reused first.
    /// If no IDs are released, the next never-used ID is returned.
    pub fn check_out(&mut self) -> EntityId {
        if let Some(id) = self.recycled.pop() {
            id
        } else {
            let id = EntityId::new(self.gauge);
            self.gauge = self.gauge.checked_add(1).expect("Too many entities");
            id
        }
    }

    /// Releases an ID for reuse.
    ///
    /// The entity previously using this ID must have been fully reclaimed.
    pub fn check_in(&mut self, id: EntityId) {
        debug_assert!(id.get() < self.gauge, "{id:?} was never checked out");
        debug_assert!(!self.recycled.contains(&id), "{id:?} is checked in twice");
        self.recycled.push(id);
    }
}
