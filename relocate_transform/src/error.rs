// Copyright 2025 the Relocate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hard failures of transform operations.
//!
//! A handle that no longer exists is not an error: operations return `Ok(false)`.

use relocate_world::Entity;

/// Structural misuse or a malformed reference graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// A read assumed data the object does not carry.
    #[error("{entity} has no {component} data")]
    MissingComponent {
        /// Object that was read.
        entity: Entity,
        /// Name of the data kind that was required.
        component: &'static str,
    },
    /// Descendant discovery went deeper than the hierarchy limit.
    #[error("hierarchy of {top} reaches {entity} at depth {depth}, deeper than the limit")]
    DepthExceeded {
        /// Top-level object of the walk.
        top: Entity,
        /// First object found past the limit.
        entity: Entity,
        /// Depth it was found at.
        depth: usize,
    },
}

/// Result alias for transform operations.
pub type Result<T, E = TransformError> = core::result::Result<T, E>;
