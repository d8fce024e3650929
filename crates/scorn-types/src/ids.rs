//! Type-safe identifier wrappers around sequential integers.
//!
//! Every record in the generated world carries a strongly-typed ID so that a
//! location id can never be passed where a settlement id is expected. IDs are
//! allocated sequentially from 1 by the world generator, one counter per kind,
//! which keeps them stable for a given seed and cheap to feed into the stable
//! hash.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`u32`] with standard derives.
///
/// The default id is 0, which the generator never hands out.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// The first identifier handed out by the generator.
            pub const FIRST: Self = Self(1);

            /// Return the inner integer value.
            #[must_use]
            pub const fn into_inner(self) -> u32 {
                self.0
            }

            /// Widen the identifier for use as a stable-hash input.
            #[must_use]
            pub const fn as_u64(self) -> u64 {
                self.0 as u64
            }

            /// Return the identifier that follows this one.
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier for an area (the top level of the world hierarchy).
    AreaId
}

define_id! {
    /// Identifier for a settlement within an area.
    SettlementId
}

define_id! {
    /// Identifier for a structure record (descriptive, not traversable).
    StructureId
}

define_id! {
    /// Identifier for a room inside a structure.
    RoomId
}

define_id! {
    /// Identifier for a traversable location (node in the world graph).
    LocationId
}
