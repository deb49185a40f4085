// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the world: entity handles and flags.

use core::fmt;

/// Handle of a simulated object.
///
/// This is a small, copyable handle that stays stable while the object lives
/// but becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On spawn, a fresh slot is allocated with generation `1`.
/// - On despawn, the slot is freed; any existing `Entity` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `Entity`.
///
/// Equality is identity: two handles are equal only when both index and generation match.
/// The total order (index, then generation) exists so handles can key ordered sets.
///
/// ### Liveness
///
/// Use [`Lookup::exists`](crate::Lookup::exists) to check whether an `Entity` still refers
/// to a live object.
/// Stale handles never alias a different live object because the generation must match.
///
/// Handles display as `E{index}.{generation}`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Entity(pub(crate) u32, pub(crate) u32);

impl Entity {
    /// Build a handle from its raw parts.
    ///
    /// Useful for simulations that mint their own handles; the handle is only
    /// live in a [`World`](crate::World) that allocated the same slot and generation.
    pub const fn from_raw(index: u32, generation: u32) -> Self {
        Self(index, generation)
    }

    /// Slot index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Generation of the slot when this handle was issued.
    pub const fn generation(self) -> u32 {
        self.1
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}.{}", self.0, self.1)
    }
}

bitflags::bitflags! {
    /// Marker data used to classify an object.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// Object is pending deletion.
        const DELETED    = 0b0000_0001;
        /// Object is terrain.
        const TERRAIN    = 0b0000_0010;
        /// Object is a tree or other vegetation.
        const PLANT      = 0b0000_0100;
        /// Object is a building.
        const BUILDING   = 0b0000_1000;
        /// Object is static.
        const STATIC     = 0b0001_0000;
        /// Object belongs to the road network.
        const NET_OBJECT = 0b0010_0000;
    }
}

bitflags::bitflags! {
    /// Signals for downstream systems that an object's cached state is stale.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// Simulation data changed.
        const UPDATED         = 0b0000_0001;
        /// Render batches must be rebuilt.
        const BATCHES_UPDATED = 0b0000_0010;
    }
}
