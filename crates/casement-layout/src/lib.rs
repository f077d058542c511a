#![forbid(unsafe_code)]

//! Sash-based split-tree layout and docking for tiled workbenches.
//!
//! This crate arranges an arbitrary set of rectangular parts inside nested
//! horizontal/vertical splits, negotiates sizes through a cached
//! min/preferred/max protocol, and resolves drag-and-drop docking gestures
//! into tree mutations:
//!
//! - [`LayoutTree`] - the split-tree arena and the size-negotiation solver
//! - [`SashContainer`] - part registry, tree mutation, and relationship
//!   persistence
//! - [`PartStack`] - a tab group arranged as one part by the tree
//! - [`dock`] - drop-target resolution and the drag state machine
//! - [`snapshot`] - versioned layout persistence
//!
//! # Negotiation conventions
//!
//! Sizes are `i32` pixels. [`INFINITE`] is the reserved "unbounded" sentinel;
//! every finite negotiation input must stay below `INFINITE / 2` so that two
//! maximal finite operands still sum without overflow. [`add_sizes`] and
//! [`subtract_sizes`] saturate through the sentinel.

pub mod cache;
pub mod container;
pub mod dock;
pub mod placeholder;
pub mod sash;
pub mod snapshot;
pub mod stack;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cache::{NegotiationStats, SizeCache};
pub use casement_core::{
    ControlSurface, LayoutPart, PartKind, Point, Rect, SizeFlags, StackChildEntry, StackSurface,
};
pub use container::{
    LayoutConfig, LayoutDirection, PartId, Relationship, RelationshipInfo, SashContainer,
    RATIO_BASIS,
};
pub use dock::{
    closest_side, commit_drop, distance_from_edge, resolve_drop, DockCancelReason, DockCommit,
    DockCursor, DockDragEffect, DockDragEvent, DockDragMachine, DockDragState, DockDragTransition,
    DockZone, DragOverListener, DragPayload, DragTargetRegistry, DropTarget, EDGE_DEFER_PX,
    STACK_ZONE_PX,
};
pub use placeholder::PartPlaceholder;
pub use sash::{Orientation, Sash};
pub use snapshot::{
    migrate_snapshot, needs_migration, LayoutSnapshot, PartKindRecord, RelationRecord,
    SnapshotError, SnapshotMigrationError, StackChildRecord, StackRecord,
    LAYOUT_SNAPSHOT_SCHEMA_VERSION,
};
pub use stack::{PartStack, StackPresentation};
pub use tree::{
    ChildSizes, LayoutModelError, LayoutTree, NodeId, NodeKind, NodeRecord, PartHost,
};

/// Reserved sentinel meaning "unbounded" in size negotiation.
pub const INFINITE: i32 = i32::MAX;

/// Debug-check one negotiation input: non-negative and, when finite, small
/// enough that two such values sum without overflow.
#[inline]
pub(crate) fn debug_assert_valid_size(size: i32) {
    debug_assert!(
        size >= 0 && (size == INFINITE || size < INFINITE / 2),
        "invalid negotiation size {size}"
    );
}

/// Infinity-aware addition: any `INFINITE` operand makes the sum `INFINITE`.
#[inline]
#[must_use]
pub fn add_sizes(a: i32, b: i32) -> i32 {
    if a == INFINITE || b == INFINITE {
        return INFINITE;
    }
    a + b
}

/// Infinity-aware subtraction: an `INFINITE` minuend stays `INFINITE`; the
/// result never drops below zero.
#[inline]
#[must_use]
pub fn subtract_sizes(a: i32, b: i32) -> i32 {
    if a == INFINITE {
        return INFINITE;
    }
    debug_assert!(b != INFINITE, "cannot subtract an unbounded size");
    (a - b).max(0)
}
