//! Lifecycle events broadcast to managers and systems.

/// A lifecycle transition of an entity.
///
/// The declaration order is the order in which [`World::process`](crate::World::process)
/// settles the pending queues.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    /// The entity was added to the world.
    Added,
    /// The components of the entity changed.
    Changed,
    /// The entity was disabled and should not be processed until enabled again.
    Disabled,
    /// The entity was re-enabled after being disabled.
    Enabled,
    /// The entity was deleted and will be reclaimed at the end of event settlement.
    Deleted,
}

impl Event {
    /// The order in which pending queues are settled.
    pub const SETTLE_ORDER: [Event; 5] =
        [Event::Added, Event::Changed, Event::Disabled, Event::Enabled, Event::Deleted];
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::Event;

    #[test]
    fn test_settle_order_matches_declaration() {
        assert_eq!(Event::iter().collect::<Vec<_>>(), Event::SETTLE_ORDER.to_vec());
    }

    #[test]
    fn test_display() {
        assert_eq!(Event::Disabled.to_string(), "disabled");
        let name: &'static str = Event::Added.into();
        assert_eq!(name, "added");
    }
}
