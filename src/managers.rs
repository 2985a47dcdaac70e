//! Auxiliary lookup managers.

mod group;
pub use group::GroupManager;

mod tag;
pub use tag::TagManager;
