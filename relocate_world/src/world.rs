// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory world: slot allocation, typed storage, dirty tracking.

use alloc::vec::Vec;

use crate::components::{Component, Storage};
use crate::lookup::Lookup;
use crate::types::{DirtyFlags, Entity, Markers};

/// Objects marked dirty since the previous [`World::commit`].
///
/// Each list holds every handle marked with that flag, once, in first-marked order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Damage {
    /// Handles marked [`DirtyFlags::UPDATED`].
    pub updated: Vec<Entity>,
    /// Handles marked [`DirtyFlags::BATCHES_UPDATED`].
    pub batches_updated: Vec<Entity>,
}

impl Damage {
    /// Return true if nothing was marked.
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.batches_updated.is_empty()
    }

    /// Whether `entity` was marked with any flag.
    pub fn contains(&self, entity: Entity) -> bool {
        self.updated.contains(&entity) || self.batches_updated.contains(&entity)
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    markers: Markers,
    dirty: DirtyFlags,
}

impl Slot {
    fn new(generation: u32) -> Self {
        Self {
            generation,
            markers: Markers::empty(),
            dirty: DirtyFlags::empty(),
        }
    }
}

/// Owner of every object and its data.
#[derive(Clone, Default)]
pub struct World {
    slots: Vec<Option<Slot>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    storage: Storage,
    pending: Damage,
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("World")
            .field("slots_total", &total)
            .field("slots_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new object with no data.
    pub fn spawn(&mut self) -> Entity {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot::new(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot::new(generation)));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Entity indices are 32-bit."
        )]
        Entity::from_raw(idx as u32, generation)
    }

    /// Destroy an object and drop all of its data.
    ///
    /// Returns false if the handle was already stale.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.exists(entity) {
            return false;
        }
        let idx = entity.idx();
        self.storage.clear_slot(idx);
        self.slots[idx] = None;
        self.free_list.push(idx);
        true
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Return true if there are no live objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate live handles in slot order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Entity indices are 32-bit."
            )]
            s.as_ref()
                .map(|s| Entity::from_raw(i as u32, s.generation))
        })
    }

    /// Attach `value`, replacing and returning any previous value of that kind.
    ///
    /// Stale handles are ignored and return `None`.
    pub fn insert<C: Component>(&mut self, entity: Entity, value: C) -> Option<C> {
        if !self.exists(entity) {
            return None;
        }
        self.storage.insert(entity.idx(), value)
    }

    /// Overwrite data the object already carries.
    ///
    /// Returns false, leaving the object unchanged, if it does not carry `C`.
    pub fn set<C: Component>(&mut self, entity: Entity, value: C) -> bool {
        match self.get_mut::<C>(entity) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Detach and return data of kind `C`.
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        if !self.exists(entity) {
            return None;
        }
        self.storage.remove(entity.idx())
    }

    /// Replace the object's markers.
    pub fn set_markers(&mut self, entity: Entity, markers: Markers) {
        if let Some(slot) = self.slot_mut(entity) {
            slot.markers = markers;
        }
    }

    /// Add markers to the object.
    pub fn insert_markers(&mut self, entity: Entity, markers: Markers) {
        if let Some(slot) = self.slot_mut(entity) {
            slot.markers |= markers;
        }
    }

    /// Whether `entity` was marked since the last commit.
    pub fn is_dirty(&self, entity: Entity) -> bool {
        self.slot(entity).is_some_and(|s| !s.dirty.is_empty())
    }

    /// Drain the dirty set and return it as damage.
    ///
    /// Handles despawned after being marked are dropped from the result.
    pub fn commit(&mut self) -> Damage {
        let mut damage = core::mem::take(&mut self.pending);
        for e in damage.updated.iter().chain(&damage.batches_updated) {
            let idx = e.idx();
            if let Some(Some(slot)) = self.slots.get_mut(idx)
                && slot.generation == e.1
            {
                slot.dirty = DirtyFlags::empty();
            }
        }
        damage.updated.retain(|e| self.exists(*e));
        damage.batches_updated.retain(|e| self.exists(*e));
        damage
    }

    // --- internals ---

    fn slot(&self, entity: Entity) -> Option<&Slot> {
        self.slots
            .get(entity.idx())
            .and_then(Option::as_ref)
            .filter(|s| s.generation == entity.1)
    }

    fn slot_mut(&mut self, entity: Entity) -> Option<&mut Slot> {
        self.slots
            .get_mut(entity.idx())
            .and_then(Option::as_mut)
            .filter(|s| s.generation == entity.1)
    }
}

impl Lookup for World {
    fn exists(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.slot(entity)?;
        self.storage.get(entity.idx())
    }

    fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.slot(entity)?;
        self.storage.get_mut(entity.idx())
    }

    fn markers(&self, entity: Entity) -> Markers {
        self.slot(entity).map(|s| s.markers).unwrap_or_default()
    }

    fn mark_dirty(&mut self, entity: Entity, flags: DirtyFlags) {
        let Some(slot) = self.slot_mut(entity) else {
            return;
        };
        let fresh = flags - slot.dirty;
        slot.dirty |= flags;
        if fresh.contains(DirtyFlags::UPDATED) {
            self.pending.updated.push(entity);
        }
        if fresh.contains(DirtyFlags::BATCHES_UPDATED) {
            self.pending.batches_updated.push(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{NetNode, Transform};
    use glam::Vec3;

    #[test]
    fn generational_ids_do_not_alias() {
        let mut world = World::new();
        let a = world.spawn();
        world.insert(a, Transform::from_position(Vec3::X));
        assert!(world.despawn(a));
        assert!(!world.despawn(a));
        let b = world.spawn();
        // Slot is reused but the stale handle stays dead.
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(!world.exists(a));
        assert!(world.exists(b));
        // Data of the old occupant does not leak into the new one.
        assert!(!world.has::<Transform>(b));
    }

    #[test]
    fn typed_editing() {
        let mut world = World::new();
        let e = world.spawn();
        assert!(!world.set(e, NetNode::from_position(Vec3::Y)));
        assert!(world.insert(e, NetNode::from_position(Vec3::Y)).is_none());
        assert!(world.set(e, NetNode::from_position(Vec3::Z)));
        assert_eq!(world.get::<NetNode>(e).map(|n| n.position), Some(Vec3::Z));
        assert_eq!(world.remove::<NetNode>(e).map(|n| n.position), Some(Vec3::Z));
        assert!(!world.has::<NetNode>(e));
    }

    #[test]
    fn stale_handles_are_ignored() {
        let mut world = World::new();
        let e = world.spawn();
        world.despawn(e);
        assert!(world.insert(e, Transform::from_position(Vec3::X)).is_none());
        world.set_markers(e, Markers::PLANT);
        assert_eq!(world.markers(e), Markers::empty());
        world.mark_dirty(e, DirtyFlags::UPDATED);
        assert!(world.commit().is_empty());
    }

    #[test]
    fn commit_drains_in_first_marked_order() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        let c = world.spawn();
        world.mark_dirty(b, DirtyFlags::UPDATED);
        world.mark_dirty(a, DirtyFlags::UPDATED | DirtyFlags::BATCHES_UPDATED);
        world.mark_dirty(b, DirtyFlags::UPDATED | DirtyFlags::BATCHES_UPDATED);
        world.mark_dirty(a, DirtyFlags::UPDATED);
        assert!(world.is_dirty(a));
        assert!(!world.is_dirty(c));

        let dmg = world.commit();
        assert_eq!(dmg.updated, [b, a]);
        assert_eq!(dmg.batches_updated, [a, b]);
        assert!(dmg.contains(a));
        assert!(!dmg.contains(c));

        assert!(!world.is_dirty(a));
        assert!(world.commit().is_empty());
    }

    #[test]
    fn despawned_after_marking_is_dropped_from_damage() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        world.mark_dirty(a, DirtyFlags::UPDATED);
        world.mark_dirty(b, DirtyFlags::UPDATED);
        world.despawn(a);
        let dmg = world.commit();
        assert_eq!(dmg.updated, [b]);
    }

    #[test]
    fn entities_lists_live_handles() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        world.despawn(a);
        assert_eq!(world.entities().collect::<Vec<_>>(), [b]);
        assert_eq!(world.len(), 1);
        assert!(!world.is_empty());
    }
}
