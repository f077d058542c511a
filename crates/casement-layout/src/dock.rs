//! Drag-and-drop docking: drop-target resolution and the drag machine.
//!
//! While a drag is in flight every pointer move re-resolves the drop target:
//! the tree is descended to the part under the cursor, the closest edge and
//! its pixel distance classify the gesture, and the result is a
//! [`DropTarget`] — snap rectangle, cursor hint, and commit action. The
//! resolver agrees with the layout tree's own bounds pixel for pixel because
//! it reads them.
//!
//! Resolution policy, preserved from long-standing workbench behavior:
//! hugging an edge (`< 5` px) defers to the target part's own drop
//! semantics (tab-level stacking); the deep interior (`> 30` px from every
//! edge) stacks into a willing tab group; the band between splits the edge.
//! A drop that would put an object back exactly where it started resolves to
//! an inert target.

use std::fmt;

use casement_core::{PartKind, Point, Rect, StackSurface as _};
use rustc_hash::FxHashMap;

use crate::container::{PartId, Relationship, SashContainer};
use crate::stack::PartStack;

/// Inside this distance from an edge the target part's own drop semantics
/// win.
pub const EDGE_DEFER_PX: i32 = 5;

/// Beyond this distance from every edge a willing stack absorbs the drop.
pub const STACK_ZONE_PX: i32 = 30;

/// Resolved docking side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockZone {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    /// Suppressed drop (the pointless-drop guard); maps to a neutral cursor
    /// and an inert commit.
    None,
}

impl DockZone {
    /// Relationship realizing an edge zone; `None` for center/suppressed.
    #[must_use]
    pub const fn relationship(self) -> Option<Relationship> {
        match self {
            Self::Left => Some(Relationship::Left),
            Self::Right => Some(Relationship::Right),
            Self::Top => Some(Relationship::Top),
            Self::Bottom => Some(Relationship::Bottom),
            Self::Center | Self::None => None,
        }
    }
}

/// Cursor feedback for an in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockCursor {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Neutral,
}

/// What committing a drop will do.
#[derive(Debug, Clone, PartialEq)]
pub enum DockCommit {
    /// Stack the payload into the target tab group.
    StackInto { target: PartId },
    /// Split the target's leaf and dock the payload on `zone`.
    SplitDock {
        target: PartId,
        zone: DockZone,
        ratio: f32,
    },
    /// Hand the drop to the target part's own semantics (tab-level
    /// stacking when the target is a stack).
    DeferToPart { target: PartId },
    /// Inert drop.
    None,
}

/// A resolved docking decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    /// Rectangle to highlight while hovering.
    pub snap_rect: Rect,
    /// Cursor hint.
    pub cursor: DockCursor,
    /// Commit action.
    pub action: DockCommit,
}

impl DropTarget {
    /// Inert target with a neutral cursor.
    #[must_use]
    pub fn none() -> Self {
        Self {
            snap_rect: Rect::default(),
            cursor: DockCursor::Neutral,
            action: DockCommit::None,
        }
    }
}

/// The object being dragged: one tab out of a stack, or a whole top-level
/// part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// A single tab dragged out of its stack.
    Tab { key: String, source_stack: PartId },
    /// A whole top-level part (a stack, a standalone pane, the editor area).
    Part { id: PartId },
}

impl DragPayload {
    fn kind(&self, container: &SashContainer) -> PartKind {
        match self {
            Self::Tab { .. } => PartKind::Pane,
            Self::Part { id } => container
                .part(*id)
                .map(|part| part.kind())
                .unwrap_or(PartKind::Pane),
        }
    }
}

// ---------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------

/// Edge of `bounds` closest to `point`.
#[must_use]
pub fn closest_side(bounds: Rect, point: Point) -> DockZone {
    let left = point.x - bounds.x;
    let right = bounds.right() - point.x;
    let top = point.y - bounds.y;
    let bottom = bounds.bottom() - point.y;

    let mut zone = DockZone::Left;
    let mut best = left;
    if right < best {
        zone = DockZone::Right;
        best = right;
    }
    if top < best {
        zone = DockZone::Top;
        best = top;
    }
    if bottom < best {
        zone = DockZone::Bottom;
    }
    zone
}

/// Pixel distance from `point` to the given edge of `bounds`.
#[must_use]
pub fn distance_from_edge(bounds: Rect, point: Point, zone: DockZone) -> i32 {
    match zone {
        DockZone::Left => point.x - bounds.x,
        DockZone::Right => bounds.right() - point.x,
        DockZone::Top => point.y - bounds.y,
        DockZone::Bottom => bounds.bottom() - point.y,
        DockZone::Center | DockZone::None => 0,
    }
}

fn edge_slice(bounds: Rect, zone: DockZone, ratio: f32) -> Rect {
    let width = (bounds.width as f32 * ratio).round() as i32;
    let height = (bounds.height as f32 * ratio).round() as i32;
    match zone {
        DockZone::Left => Rect::new(bounds.x, bounds.y, width, bounds.height),
        DockZone::Right => Rect::new(bounds.right() - width, bounds.y, width, bounds.height),
        DockZone::Top => Rect::new(bounds.x, bounds.y, bounds.width, height),
        DockZone::Bottom => Rect::new(bounds.x, bounds.bottom() - height, bounds.width, height),
        DockZone::Center | DockZone::None => bounds,
    }
}

const fn zone_cursor(zone: DockZone) -> DockCursor {
    match zone {
        DockZone::Left => DockCursor::Left,
        DockZone::Right => DockCursor::Right,
        DockZone::Top => DockCursor::Top,
        DockZone::Bottom => DockCursor::Bottom,
        DockZone::Center => DockCursor::Center,
        DockZone::None => DockCursor::Neutral,
    }
}

// ---------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------

/// Resolve the drop target for a payload hovering at `position`.
#[must_use]
pub fn resolve_drop(
    container: &SashContainer,
    payload: &DragPayload,
    position: Point,
) -> DropTarget {
    let Some(target) = container.find_part_at(position) else {
        return DropTarget::none();
    };
    let Some(bounds) = container.part_bounds(target) else {
        return DropTarget::none();
    };

    if is_pointless(container, payload, target) {
        return DropTarget {
            snap_rect: bounds,
            cursor: DockCursor::Neutral,
            action: DockCommit::None,
        };
    }

    let zone = closest_side(bounds, position);
    let distance = distance_from_edge(bounds, position, zone);

    if distance < EDGE_DEFER_PX {
        return DropTarget {
            snap_rect: bounds,
            cursor: DockCursor::Center,
            action: DockCommit::DeferToPart { target },
        };
    }

    if distance > STACK_ZONE_PX
        && let Some(stack) = container.part(target).and_then(|part| part.as_stack())
        && stack.accepts(payload.kind(container))
    {
        return DropTarget {
            snap_rect: bounds,
            cursor: DockCursor::Center,
            action: DockCommit::StackInto { target },
        };
    }

    let ratio = if container.part(target).map(|part| part.kind()) == Some(PartKind::EditorArea) {
        container.config().editor_dock_ratio
    } else {
        container.config().dock_ratio
    };
    DropTarget {
        snap_rect: edge_slice(bounds, zone, ratio),
        cursor: zone_cursor(zone),
        action: DockCommit::SplitDock {
            target,
            zone,
            ratio,
        },
    }
}

/// A drop that would put the payload back exactly where it started.
fn is_pointless(container: &SashContainer, payload: &DragPayload, target: PartId) -> bool {
    match payload {
        DragPayload::Part { id } => *id == target,
        DragPayload::Tab { source_stack, .. } => {
            if *source_stack != target {
                return false;
            }
            container
                .part(*source_stack)
                .and_then(|part| part.as_stack())
                .map(|stack| stack.visible_child_count().saturating_sub(1) <= 1)
                .unwrap_or(false)
        }
    }
}

// ---------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------

/// Apply a resolved drop. Inert targets succeed trivially; cancellation
/// never reaches this function.
pub fn commit_drop(
    container: &mut SashContainer,
    payload: &DragPayload,
    target: &DropTarget,
) -> bool {
    match &target.action {
        DockCommit::None => true,
        DockCommit::StackInto { target } | DockCommit::DeferToPart { target } => {
            stack_payload_into(container, payload, *target)
        }
        DockCommit::SplitDock {
            target,
            zone,
            ratio,
        } => split_dock(container, payload, *target, *zone, *ratio),
    }
}

fn stack_payload_into(container: &mut SashContainer, payload: &DragPayload, target: PartId) -> bool {
    match payload {
        DragPayload::Part { id } => container.stack_into(target, *id).is_some(),
        DragPayload::Tab { key, source_stack } => container.move_tab(*source_stack, key, target),
    }
}

fn split_dock(
    container: &mut SashContainer,
    payload: &DragPayload,
    target: PartId,
    zone: DockZone,
    ratio: f32,
) -> bool {
    let Some(relationship) = zone.relationship() else {
        tracing::warn!(?zone, "split dock without an edge zone");
        return false;
    };
    match payload {
        DragPayload::Part { id } => container.move_part(*id, relationship, ratio, target),
        DragPayload::Tab { key, source_stack } => {
            // Extract the tab into a fresh stack and dock that at the edge.
            if !container.remove_tab(*source_stack, key) {
                return false;
            }
            let stack = PartStack::with_child(format!("stack:{key}"), key.clone());
            container.add(Box::new(stack), relationship, ratio, Some(target));
            true
        }
    }
}

// ---------------------------------------------------------------------
// Drag state machine
// ---------------------------------------------------------------------

/// Lifecycle of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockDragState {
    #[default]
    Idle,
    Tracking,
    Committed,
    Cancelled,
}

/// Why a drag ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockCancelReason {
    EscapeKey,
    PointerCancel,
    Programmatic,
}

/// Input events driving the drag machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DockDragEvent {
    Begin { payload: DragPayload, position: Point },
    Move { position: Point },
    Drop { position: Point },
    Cancel { reason: DockCancelReason },
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockDragNoop {
    NotTracking,
    AlreadyTracking,
}

/// Observable consequence of one event.
#[derive(Debug, Clone, PartialEq)]
pub enum DockDragEffect {
    Ignored(DockDragNoop),
    /// The resolved target changed (or appeared/disappeared).
    TargetChanged(Option<DropTarget>),
    /// The drag committed; `applied` reports whether the commit action ran
    /// to completion.
    Committed { applied: bool },
    /// Normal control-flow outcome, not an error; the caller restores the
    /// pre-drag state.
    Cancelled { reason: DockCancelReason },
}

/// One recorded transition, suitable for journaling and replay.
#[derive(Debug, Clone, PartialEq)]
pub struct DockDragTransition {
    pub from: DockDragState,
    pub to: DockDragState,
    pub effect: DockDragEffect,
}

/// Event-driven machine for one docking drag:
/// `Idle → Tracking → {Committed, Cancelled}`.
///
/// Every applied event appends a transition record, so a gesture can be
/// journaled and replayed deterministically.
#[derive(Debug, Default)]
pub struct DockDragMachine {
    state: DockDragState,
    payload: Option<DragPayload>,
    target: Option<DropTarget>,
    journal: Vec<DockDragTransition>,
}

impl DockDragMachine {
    /// Fresh machine in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> DockDragState {
        self.state
    }

    /// Most recently resolved target, while tracking.
    #[must_use]
    pub const fn target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    /// Transition records in application order.
    #[must_use]
    pub fn journal(&self) -> &[DockDragTransition] {
        &self.journal
    }

    /// Apply one event, resolving against (and on drop, mutating) the
    /// container.
    pub fn apply_event(
        &mut self,
        container: &mut SashContainer,
        event: DockDragEvent,
    ) -> DockDragTransition {
        let from = self.state;
        let transition = match (self.state, event) {
            (DockDragState::Idle | DockDragState::Committed | DockDragState::Cancelled, DockDragEvent::Begin { payload, position }) => {
                let target = resolve_drop(container, &payload, position);
                self.payload = Some(payload);
                self.target = Some(target.clone());
                self.state = DockDragState::Tracking;
                DockDragTransition {
                    from,
                    to: self.state,
                    effect: DockDragEffect::TargetChanged(Some(target)),
                }
            }
            (DockDragState::Tracking, DockDragEvent::Begin { .. }) => DockDragTransition {
                from,
                to: from,
                effect: DockDragEffect::Ignored(DockDragNoop::AlreadyTracking),
            },
            (DockDragState::Tracking, DockDragEvent::Move { position }) => {
                let target = self
                    .payload
                    .as_ref()
                    .map(|payload| resolve_drop(container, payload, position));
                self.target = target.clone();
                DockDragTransition {
                    from,
                    to: from,
                    effect: DockDragEffect::TargetChanged(target),
                }
            }
            (DockDragState::Tracking, DockDragEvent::Drop { position }) => {
                let applied = match self.payload.take() {
                    Some(payload) => {
                        let target = resolve_drop(container, &payload, position);
                        let applied = commit_drop(container, &payload, &target);
                        self.target = Some(target);
                        applied
                    }
                    None => false,
                };
                self.state = DockDragState::Committed;
                DockDragTransition {
                    from,
                    to: self.state,
                    effect: DockDragEffect::Committed { applied },
                }
            }
            (DockDragState::Tracking, DockDragEvent::Cancel { reason }) => {
                self.payload = None;
                self.target = None;
                self.state = DockDragState::Cancelled;
                DockDragTransition {
                    from,
                    to: self.state,
                    effect: DockDragEffect::Cancelled { reason },
                }
            }
            (_, DockDragEvent::Move { .. } | DockDragEvent::Drop { .. } | DockDragEvent::Cancel { .. }) => {
                DockDragTransition {
                    from,
                    to: from,
                    effect: DockDragEffect::Ignored(DockDragNoop::NotTracking),
                }
            }
        };
        self.journal.push(transition.clone());
        transition
    }
}

// ---------------------------------------------------------------------
// Drag-target registry
// ---------------------------------------------------------------------

/// A control-specific drop policy consulted while dragging over it.
pub trait DragOverListener {
    /// Resolve a drop for the hovering payload, or decline.
    fn drag_over(&mut self, payload: &DragPayload, position: Point) -> Option<DropTarget>;
}

/// Registry mapping control keys to drag-over listeners, with default
/// (global) listeners used when no control-specific one matches.
#[derive(Default)]
pub struct DragTargetRegistry {
    targets: FxHashMap<String, Vec<Box<dyn DragOverListener>>>,
    defaults: Vec<Box<dyn DragOverListener>>,
}

impl fmt::Debug for DragTargetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragTargetRegistry")
            .field("targets", &self.targets.len())
            .field("defaults", &self.defaults.len())
            .finish()
    }
}

impl DragTargetRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for a specific control.
    pub fn add_drag_target(&mut self, control: impl Into<String>, listener: Box<dyn DragOverListener>) {
        self.targets.entry(control.into()).or_default().push(listener);
    }

    /// Drop every listener registered for a control. Returns false when the
    /// control had none.
    pub fn remove_drag_target(&mut self, control: &str) -> bool {
        self.targets.remove(control).is_some()
    }

    /// Register a default listener consulted when no control-specific one
    /// matches.
    pub fn add_default(&mut self, listener: Box<dyn DragOverListener>) {
        self.defaults.push(listener);
    }

    /// Consult control-specific listeners first, then the defaults; the
    /// first listener that yields a target wins.
    pub fn resolve(
        &mut self,
        control: Option<&str>,
        payload: &DragPayload,
        position: Point,
    ) -> Option<DropTarget> {
        if let Some(control) = control
            && let Some(listeners) = self.targets.get_mut(control)
        {
            for listener in listeners {
                if let Some(target) = listener.drag_over(payload, position) {
                    return Some(target);
                }
            }
        }
        for listener in &mut self.defaults {
            if let Some(target) = listener.drag_over(payload, position) {
                return Some(target);
            }
        }
        None
    }
}
