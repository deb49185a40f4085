// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The typed-lookup seam the transform engine talks through.

use crate::components::Component;
use crate::types::{DirtyFlags, Entity, Markers};

/// Typed read/write access to per-object data.
///
/// Implementations are refreshed once per simulation step and passed into
/// every engine call; nothing holds on to a `Lookup` between calls.
pub trait Lookup {
    /// Whether `entity` refers to a live object.
    fn exists(&self, entity: Entity) -> bool;

    /// Read data of kind `C`, if the object is live and carries it.
    fn get<C: Component>(&self, entity: Entity) -> Option<&C>;

    /// Write access to data of kind `C`, if the object is live and carries it.
    fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C>;

    /// Whether the object is live and carries data of kind `C`.
    fn has<C: Component>(&self, entity: Entity) -> bool {
        self.get::<C>(entity).is_some()
    }

    /// Classification markers; empty for stale handles.
    fn markers(&self, entity: Entity) -> Markers;

    /// Flag the object for downstream recompute.
    ///
    /// Idempotent; stale handles are ignored.
    fn mark_dirty(&mut self, entity: Entity, flags: DirtyFlags);
}
