//! Errors returned by registration APIs.

/// An error raised when registering component types, managers or systems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// All ordinals of this kind are in use.
    #[error("Cannot allocate more than {capacity} {kind} ordinals")]
    CapacityExceeded {
        /// The kind of ordinal, e.g. `"component"`.
        kind:     &'static str,
        /// The capacity of the kind.
        capacity: usize,
    },
    /// The requested ordinal is already occupied.
    #[error("The {kind} ordinal {ordinal} is already in use")]
    OrdinalInUse {
        /// The kind of ordinal, e.g. `"system"`.
        kind:    &'static str,
        /// The occupied ordinal.
        ordinal: usize,
    },
    /// The manager ordinal belongs to a built-in manager.
    #[error("The manager ordinal {0} is reserved for a built-in manager")]
    ReservedManager(usize),
    /// The component ordinal is already bound to another Rust type.
    #[error("Component ordinal {ordinal} is bound to `{existing}` and cannot be bound to `{requested}`")]
    TypeMismatch {
        /// The contested ordinal.
        ordinal:   usize,
        /// The type name already bound to the ordinal.
        existing:  &'static str,
        /// The type name requested.
        requested: &'static str,
    },
}

/// Shorthand for results of registration APIs.
pub type Result<T, E = Error> = std::result::Result<T, E>;
