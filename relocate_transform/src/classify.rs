// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural classification of objects.

use relocate_world::{AreaGeometry, AreaNodes, Edge, Entity, Lookup, Markers, NetNode};

use crate::types::Category;

/// Label `entity` with its structural category.
///
/// Checked in priority order: stale, deleted or terrain objects are
/// [`Category::Invalid`]; then plants and buildings; then edge data, node data,
/// the static network-object pair; then area data; anything else is
/// [`Category::Other`].
pub fn classify<L: Lookup>(lookup: &L, entity: Entity) -> Category {
    if !lookup.exists(entity) {
        return Category::Invalid;
    }
    let markers = lookup.markers(entity);
    if markers.intersects(Markers::DELETED | Markers::TERRAIN) {
        return Category::Invalid;
    }
    if markers.intersects(Markers::PLANT | Markers::BUILDING) {
        return Category::Point;
    }
    if lookup.has::<Edge>(entity) {
        return Category::NetworkEdge;
    }
    if lookup.has::<NetNode>(entity) {
        return Category::NetworkNode;
    }
    if markers.contains(Markers::STATIC | Markers::NET_OBJECT) {
        return Category::CompoundWrapper;
    }
    if lookup.has::<AreaGeometry>(entity) || lookup.has::<AreaNodes>(entity) {
        return Category::Area;
    }
    Category::Other
}
