use super::{Entity, EntityId, EntityManager, IdentifierPool};
use crate::event::Event;

static_assertions::assert_impl_all!(EntityId: Copy, Send, Sync, Ord, std::hash::Hash);
// Entities are owned by the manager and must not be duplicated.
static_assertions::assert_not_impl_any!(Entity: Clone);

#[test]
fn test_pool_mints_monotonically() {
    let mut pool = IdentifierPool::default();
    let ids: Vec<_> = (0..4).map(|_| pool.check_out().get()).collect();
    assert_eq!(ids, [0, 1, 2, 3]);
}

#[test]
fn test_pool_recycles_last_released_first() {
    let mut pool = IdentifierPool::default();
    for _ in 0..6 {
        pool.check_out();
    }

    pool.check_in(EntityId::new(2));
    pool.check_in(EntityId::new(5));
    assert_eq!(pool.recyclable(), 2);

    assert_eq!(pool.check_out(), EntityId::new(5));
    assert_eq!(pool.check_out(), EntityId::new(2));
    assert_eq!(pool.check_out(), EntityId::new(6));
    assert_eq!(pool.recyclable(), 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic = "is checked in twice"]
fn test_pool_double_check_in() {
    let mut pool = IdentifierPool::default();
    let id = pool.check_out();
    pool.check_in(id);
    pool.check_in(id);
}

#[test]
fn test_entity_id_format() {
    assert_eq!(format!("{:?}", EntityId::new(7)), "#7");
    assert_eq!(EntityId::new(7).to_string(), "7");
}

fn manager_with(count: usize) -> (EntityManager, Vec<EntityId>) {
    let mut manager = EntityManager::default();
    let ids = (0..count)
        .map(|_| {
            let id = manager.create_entity_instance();
            manager.notify(Event::Added, id);
            id
        })
        .collect();
    (manager, ids)
}

#[test]
fn test_manager_statistics() {
    let (mut manager, ids) = manager_with(3);
    let pending = manager.create_entity_instance();

    assert_eq!(manager.total_created(), 4);
    assert_eq!(manager.total_added(), 3);
    assert_eq!(manager.active_entity_count(), 3);
    assert!(manager.is_active(ids[0]));
    assert!(!manager.is_active(pending));

    manager.notify(Event::Deleted, ids[1]);
    assert_eq!(manager.active_entity_count(), 2);
    assert!(manager.is_deleted(ids[1]));

    assert_eq!(manager.clean(), 1);
    assert_eq!(manager.total_deleted(), 1);
    assert!(manager.entity(ids[1]).is_none());
    assert!(!manager.is_active(ids[1]));
    assert!(!manager.is_deleted(ids[1]));
}

#[test]
fn test_manager_double_delete_counts_once() {
    let (mut manager, ids) = manager_with(2);

    manager.notify(Event::Deleted, ids[0]);
    manager.notify(Event::Deleted, ids[0]);
    assert_eq!(manager.active_entity_count(), 1);

    assert_eq!(manager.clean(), 1);
    assert_eq!(manager.clean(), 0);
    assert_eq!(manager.total_deleted(), 1);
}

#[test]
fn test_manager_queue_deletion_once() {
    let (mut manager, ids) = manager_with(2);

    assert!(manager.queue_deletion(ids[0]));
    assert!(!manager.queue_deletion(ids[0]));
    assert!(manager.queue_deletion(ids[1]));

    manager.notify(Event::Deleted, ids[0]);
    assert_eq!(manager.clean(), 1);

    let recycled = manager.create_entity_instance();
    assert_eq!(recycled, ids[0]);
    assert!(manager.queue_deletion(recycled));
}

#[test]
fn test_manager_disable_enable() {
    let (mut manager, ids) = manager_with(1);
    assert!(manager.is_enabled(ids[0]));

    manager.notify(Event::Disabled, ids[0]);
    assert!(!manager.is_enabled(ids[0]));
    assert!(manager.is_active(ids[0]));
    assert_eq!(manager.active_entity_count(), 1);

    manager.notify(Event::Enabled, ids[0]);
    assert!(manager.is_enabled(ids[0]));
}

#[test]
fn test_manager_recycles_reclaimed_id() {
    let (mut manager, ids) = manager_with(8);
    assert_eq!(ids[5], EntityId::new(5));

    manager.notify(Event::Deleted, ids[5]);
    manager.clean();
    assert_eq!(manager.pool().recyclable(), 1);

    let recycled = manager.create_entity_instance();
    assert_eq!(recycled, EntityId::new(5));
    let entity = manager.entity(recycled).expect("entity exists");
    assert!(entity.component_bits().is_empty());
    assert!(entity.system_bits().is_empty());

    assert_eq!(manager.create_entity_instance(), EntityId::new(8));
}
