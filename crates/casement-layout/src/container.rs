//! The sash container: part registry, tree mutation, and relationship
//! bookkeeping.
//!
//! The container owns the flat list of top-level parts (a stack counts as
//! one part; its tabs are its own business), the split tree arranging them,
//! and the configuration threaded through size negotiation. Mutations are
//! synchronous; visual work can be batched through the deferred-update
//! counter so intermediate states never reach the screen.

use std::collections::BTreeMap;
use std::fmt;

use casement_core::{LayoutPart, PartKind, Point, Rect, StackSurface as _};
use serde::{Deserialize, Serialize};

use crate::sash::{Orientation, Sash};
use crate::tree::{LayoutModelError, LayoutTree, NodeId, PartHost};

/// Basis used when converting a docking ratio into sash side weights; the
/// first layout rewrites the weights to real pixels.
pub const RATIO_BASIS: i32 = 10_000;

/// Stable identifier for registered parts.
///
/// `0` is reserved/invalid so ids are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(u64);

impl PartId {
    /// Lowest valid part id.
    pub const MIN: Self = Self(1);

    /// Create a new part id, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, LayoutModelError> {
        if raw == 0 {
            return Err(LayoutModelError::ZeroPartId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next id, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, LayoutModelError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(LayoutModelError::PartIdOverflow { current: self });
        };
        Self::new(next)
    }
}

impl Default for PartId {
    fn default() -> Self {
        Self::MIN
    }
}

/// Child-solving order for [`crate::tree::LayoutTree::compute_child_sizes`].
///
/// The later-solved child absorbs rounding, so mirrored locales flip which
/// side quantizes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Container configuration threaded through negotiation and docking.
///
/// Explicit state, never a process-wide static.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pixels a sash consumes along its split axis.
    #[serde(default = "default_sash_thickness")]
    pub sash_thickness: i32,
    /// Child-solving order.
    #[serde(default)]
    pub layout_direction: LayoutDirection,
    /// Edge-dock ratio against ordinary parts.
    #[serde(default = "default_dock_ratio")]
    pub dock_ratio: f32,
    /// Edge-dock ratio against the editor area.
    #[serde(default = "default_editor_dock_ratio")]
    pub editor_dock_ratio: f32,
}

fn default_sash_thickness() -> i32 {
    3
}

fn default_dock_ratio() -> f32 {
    0.5
}

fn default_editor_dock_ratio() -> f32 {
    0.25
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sash_thickness: default_sash_thickness(),
            layout_direction: LayoutDirection::default(),
            dock_ratio: default_dock_ratio(),
            editor_dock_ratio: default_editor_dock_ratio(),
        }
    }
}

/// Placement of one part relative to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Left,
    Right,
    Top,
    Bottom,
}

impl Relationship {
    /// Sash orientation realizing this relationship.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Vertical,
            Self::Top | Self::Bottom => Orientation::Horizontal,
        }
    }

    /// True when the placed part lands on the left/top side of the split.
    #[must_use]
    pub const fn is_leading(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }
}

/// One flattened split description: `part` sits on `relationship` side of
/// `relative`, with the split's stored side sizes.
///
/// The first record of a relation list is the anchor (`relative` is `None`
/// and the remaining fields are inert); replaying the list through
/// [`SashContainer::replay_relations`] rebuilds an isomorphic tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipInfo {
    pub part: PartId,
    pub relative: Option<PartId>,
    pub relationship: Relationship,
    pub left: i32,
    pub right: i32,
}

/// Relation remembered from a restored layout for a part key that is not
/// currently materialized in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SavedRelation {
    pub(crate) part_key: String,
    pub(crate) relative_key: Option<String>,
    pub(crate) relationship: Relationship,
    pub(crate) left: i32,
    pub(crate) right: i32,
}

/// The sash container.
pub struct SashContainer {
    pub(crate) config: LayoutConfig,
    pub(crate) parts: BTreeMap<PartId, Box<dyn LayoutPart>>,
    next_part_id: PartId,
    pub(crate) tree: LayoutTree,
    bounds: Rect,
    active: bool,
    defer_depth: u32,
    layout_pending: bool,
    pub(crate) saved_relations: Vec<SavedRelation>,
}

impl fmt::Debug for SashContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SashContainer")
            .field("parts", &self.parts.len())
            .field("tree_nodes", &self.tree.node_count())
            .field("bounds", &self.bounds)
            .field("active", &self.active)
            .field("defer_depth", &self.defer_depth)
            .finish_non_exhaustive()
    }
}

impl Default for SashContainer {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl SashContainer {
    /// Empty container with the given configuration.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            parts: BTreeMap::new(),
            next_part_id: PartId::MIN,
            tree: LayoutTree::new(),
            bounds: Rect::default(),
            active: false,
            defer_depth: 0,
            layout_pending: false,
            saved_relations: Vec::new(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration. Thickness and direction feed every cached
    /// negotiation result, so all caches are flushed.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.invalidate_layout();
    }

    /// Flush every cached negotiation result and schedule a fresh layout
    /// pass. For sweeping external changes (theme/font swaps, many parts
    /// shown or hidden at once); prefer [`Self::part_changed`] for a single
    /// part.
    pub fn invalidate_layout(&mut self) {
        let ids: Vec<NodeId> = self.tree.nodes().map(|record| record.id).collect();
        for id in ids {
            self.tree.flush_node(id);
        }
        self.schedule_layout();
    }

    /// Notify that one part's size constraints or visibility changed.
    ///
    /// Flushes caches from the part's leaf up to the root (ancestor sums are
    /// stale too) and schedules a relayout.
    pub fn part_changed(&mut self, id: PartId) {
        let Some(leaf) = self.tree.leaf_for_part(id) else {
            tracing::warn!(part = id.get(), "change notification for unplaced part");
            return;
        };
        self.tree.flush_cache(leaf);
        self.schedule_layout();
    }

    /// The split tree, for inspection.
    #[must_use]
    pub const fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Registered top-level part ids in canonical order.
    pub fn children(&self) -> impl Iterator<Item = PartId> + '_ {
        self.parts.keys().copied()
    }

    /// Look up a part.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&dyn LayoutPart> {
        self.parts.part(id)
    }

    /// Look up a part for mutation.
    pub fn part_mut(&mut self, id: PartId) -> Option<&mut dyn LayoutPart> {
        self.parts.part_mut(id)
    }

    /// Find a registered part by its identity key.
    #[must_use]
    pub fn part_id_by_key(&self, key: &str) -> Option<PartId> {
        self.parts
            .iter()
            .find_map(|(id, part)| (part.key() == key).then_some(*id))
    }

    /// Bounds last assigned to a part by the layout pass. Agrees with the
    /// tree's own record pixel for pixel.
    #[must_use]
    pub fn part_bounds(&self, id: PartId) -> Option<Rect> {
        let leaf = self.tree.leaf_for_part(id)?;
        self.tree.node(leaf).map(|record| record.bounds())
    }

    // -----------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------

    /// Add a part at `relationship`/`ratio` relative to an existing part.
    ///
    /// `ratio` is the fraction of the split given to the incoming part. An
    /// absent or unknown `relative` falls back to splicing beside the root.
    pub fn add(
        &mut self,
        part: Box<dyn LayoutPart>,
        relationship: Relationship,
        ratio: f32,
        relative: Option<PartId>,
    ) -> PartId {
        let id = self.register(part);
        self.place(id, relationship, ratio, relative);
        id
    }

    fn place(
        &mut self,
        id: PartId,
        relationship: Relationship,
        ratio: f32,
        relative: Option<PartId>,
    ) {
        let relative_leaf = match relative {
            Some(relative_id) => {
                let leaf = self.tree.leaf_for_part(relative_id);
                if leaf.is_none() {
                    tracing::warn!(
                        relative = relative_id.get(),
                        "relative part not in tree; inserting beside root"
                    );
                }
                leaf
            }
            None => None,
        };

        let incoming = ratio_to_weight(ratio);
        let left_side = relationship.is_leading();
        let (left, right) = if left_side {
            (incoming, RATIO_BASIS - incoming)
        } else {
            (RATIO_BASIS - incoming, incoming)
        };
        let sash = Sash::with_sides(relationship.orientation(), left, right);

        match self.tree.insert(id, left_side, sash, relative_leaf) {
            Ok(_) => self.schedule_layout(),
            Err(error) => {
                debug_assert!(false, "insert failed: {error}");
                tracing::warn!(part = id.get(), %error, "part insertion failed");
            }
        }
    }

    /// Register a part without placing it. Used by restore replay.
    pub(crate) fn register(&mut self, part: Box<dyn LayoutPart>) -> PartId {
        let id = self.next_part_id;
        self.next_part_id = id.checked_next().unwrap_or(id);
        self.parts.insert(id, part);
        id
    }

    /// Remove a part from the layout and hand its object back to the caller.
    ///
    /// The tree shrinks to the sibling; an unknown part is a logged no-op.
    pub fn remove(&mut self, id: PartId) -> Option<Box<dyn LayoutPart>> {
        let Some(leaf) = self.tree.leaf_for_part(id) else {
            if self.parts.contains_key(&id) {
                return self.parts.remove(&id);
            }
            tracing::warn!(part = id.get(), "remove of unknown part ignored");
            return None;
        };
        if let Err(error) = self.tree.remove_leaf(leaf) {
            tracing::warn!(part = id.get(), %error, "leaf removal failed");
            return None;
        }
        let part = self.parts.remove(&id);
        self.schedule_layout();
        part
    }

    /// Replace a part in place: the new part takes over the old leaf (and
    /// therefore the old proportions). Returns the new id and the displaced
    /// part object; when `old` is unknown the incoming part is handed back
    /// unchanged.
    pub fn replace(
        &mut self,
        old: PartId,
        part: Box<dyn LayoutPart>,
    ) -> Result<(PartId, Option<Box<dyn LayoutPart>>), Box<dyn LayoutPart>> {
        let Some(leaf) = self.tree.leaf_for_part(old) else {
            tracing::warn!(part = old.get(), "replace of unknown part ignored");
            return Err(part);
        };
        let new_id = self.register(part);
        let swapped = self.tree.set_part(leaf, new_id);
        debug_assert!(swapped.is_ok(), "leaf vanished during replace");
        let displaced = self.parts.remove(&old);
        debug_assert!(displaced.is_some(), "leaf referenced unregistered part");
        self.schedule_layout();
        Ok((new_id, displaced))
    }

    /// Materialize a real part where a placeholder held its spot.
    ///
    /// A live placeholder is swapped in place, keeping its exact position
    /// and proportions. Otherwise the flattened relationship list remembered
    /// from the last restore is searched for the placeholder's entry and its
    /// ratio/relative reused; with no match the part is added beside the
    /// root with the default ratio.
    pub fn add_for_placeholder(
        &mut self,
        part: Box<dyn LayoutPart>,
        placeholder_key: &str,
    ) -> PartId {
        let live = self.part_id_by_key(placeholder_key).filter(|id| {
            self.parts
                .part(*id)
                .map(|part| part.kind() == PartKind::Placeholder)
                .unwrap_or(false)
        });
        let part = match live {
            Some(placeholder) => match self.replace(placeholder, part) {
                Ok((new_id, _placeholder_part)) => return new_id,
                Err(part) => part,
            },
            None => part,
        };

        // No live placeholder: search the relationship list remembered from
        // the last restore for the placeholder's entry.
        if let Some(index) = self
            .saved_relations
            .iter()
            .position(|relation| relation.part_key == placeholder_key)
        {
            let saved = self.saved_relations.remove(index);
            let relative_leaf = saved
                .relative_key
                .as_deref()
                .and_then(|key| self.part_id_by_key(key))
                .and_then(|id| self.tree.leaf_for_part(id));
            if relative_leaf.is_none() && !self.tree.is_empty() {
                tracing::warn!(
                    key = placeholder_key,
                    "saved relative unavailable; splicing beside root"
                );
            }
            let id = self.register(part);
            let sash = Sash::with_sides(saved.relationship.orientation(), saved.left, saved.right);
            if let Err(error) = self
                .tree
                .insert(id, saved.relationship.is_leading(), sash, relative_leaf)
            {
                tracing::warn!(key = placeholder_key, %error, "saved relation insert failed");
            }
            self.schedule_layout();
            return id;
        }

        tracing::warn!(
            key = placeholder_key,
            "no placeholder match; adding at default ratio"
        );
        let ratio = self.config.dock_ratio;
        self.add(part, Relationship::Right, ratio, None)
    }

    // -----------------------------------------------------------------
    // Relationship computation
    // -----------------------------------------------------------------

    /// Flatten the live tree into relationship records: a root anchor
    /// followed by one record per branch, ordered so that replaying through
    /// [`Self::replay_relations`] from an empty tree reproduces an
    /// isomorphic tree.
    #[must_use]
    pub fn compute_relation(&self) -> Vec<RelationshipInfo> {
        let Some(root) = self.tree.root() else {
            return Vec::new();
        };
        let Some(anchor) = self.representative(root) else {
            return Vec::new();
        };
        let mut out = vec![RelationshipInfo {
            part: anchor,
            relative: None,
            relationship: Relationship::Left,
            left: 0,
            right: 0,
        }];
        self.relation_rec(root, &mut out);
        out
    }

    /// Leftmost leaf part of a subtree.
    fn representative(&self, node: NodeId) -> Option<PartId> {
        let mut current = node;
        loop {
            match &self.tree.node(current)?.kind {
                crate::tree::NodeKind::Leaf { part } => return Some(*part),
                crate::tree::NodeKind::Branch { children, .. } => current = children[0],
            }
        }
    }

    fn relation_rec(&self, node: NodeId, out: &mut Vec<RelationshipInfo>) {
        let Some(record) = self.tree.node(node) else {
            return;
        };
        let crate::tree::NodeKind::Branch { sash, children } = record.kind else {
            return;
        };
        let (Some(first), Some(second)) = (
            self.representative(children[0]),
            self.representative(children[1]),
        ) else {
            return;
        };
        let relationship = match sash.orientation() {
            Orientation::Vertical => Relationship::Right,
            Orientation::Horizontal => Relationship::Bottom,
        };
        out.push(RelationshipInfo {
            part: second,
            relative: Some(first),
            relationship,
            left: sash.left,
            right: sash.right,
        });
        self.relation_rec(children[0], out);
        self.relation_rec(children[1], out);
    }

    /// Rebuild the tree by replaying a relation list over already-registered
    /// parts. The tree must be empty. Returns false (after logging) when a
    /// record cannot be applied; surviving records still apply.
    pub fn replay_relations(&mut self, relations: &[RelationshipInfo]) -> bool {
        debug_assert!(self.tree.is_empty(), "replay requires an empty tree");
        let mut complete = true;
        for info in relations {
            if !self.parts.contains_key(&info.part) {
                tracing::warn!(part = info.part.get(), "relation names unknown part; skipped");
                complete = false;
                continue;
            }
            let relative_leaf = match info.relative {
                Some(relative) => {
                    let leaf = self.tree.leaf_for_part(relative);
                    if leaf.is_none() && !self.tree.is_empty() {
                        tracing::warn!(
                            part = info.part.get(),
                            relative = relative.get(),
                            "relation relative not in tree; splicing beside root"
                        );
                        complete = false;
                    }
                    leaf
                }
                None => None,
            };
            let sash = Sash::with_sides(info.relationship.orientation(), info.left, info.right);
            let left_side = info.relationship.is_leading();
            if let Err(error) = self.tree.insert(info.part, left_side, sash, relative_leaf) {
                tracing::warn!(part = info.part.get(), %error, "relation replay failed");
                complete = false;
            }
        }
        self.schedule_layout();
        complete
    }

    // -----------------------------------------------------------------
    // Geometry and interaction
    // -----------------------------------------------------------------

    /// Assign the container's bounds and lay the tree out into them.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.schedule_layout();
    }

    /// Container bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Activate or deactivate the container. Layout runs only while active.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.schedule_layout();
        }
    }

    /// Re-apply the root's bounds to the current container bounds. A no-op
    /// unless the container is active (and not deferring).
    pub fn resize_sashes(&mut self) {
        if !self.active {
            return;
        }
        if self.defer_depth > 0 {
            self.layout_pending = true;
            return;
        }
        let bounds = self.bounds;
        let Self {
            tree,
            parts,
            config,
            ..
        } = self;
        tree.apply_bounds(bounds, config, parts);
    }

    fn schedule_layout(&mut self) {
        if self.defer_depth > 0 {
            self.layout_pending = true;
        } else {
            self.resize_sashes();
        }
    }

    /// Top-level part under the given point, by descending the tree against
    /// each sash midpoint.
    #[must_use]
    pub fn find_part_at(&self, point: Point) -> Option<PartId> {
        let leaf = self.tree.find_leaf_at(point, &self.parts)?;
        match self.tree.node(leaf)?.kind {
            crate::tree::NodeKind::Leaf { part } => Some(part),
            crate::tree::NodeKind::Branch { .. } => None,
        }
    }

    /// Branch whose enabled sash is under the given point.
    #[must_use]
    pub fn find_sash_at(&self, point: Point) -> Option<NodeId> {
        self.tree.find_sash_at(point)
    }

    /// Drag a sash to an absolute position along its split axis and relayout.
    pub fn drag_sash_to(&mut self, branch: NodeId, position: i32) -> bool {
        let moved = self
            .tree
            .drag_sash_to(branch, position, &self.config, &self.parts);
        if moved {
            self.schedule_layout();
        }
        moved
    }

    // -----------------------------------------------------------------
    // Stacking
    // -----------------------------------------------------------------

    /// Stack `source` into the tab group `target`: the source's tab keys move
    /// into the target, the source leaves the tree (its branch collapses),
    /// and the displaced part object is handed back to the caller.
    pub fn stack_into(&mut self, target: PartId, source: PartId) -> Option<Box<dyn LayoutPart>> {
        if target == source {
            return None;
        }
        if self
            .parts
            .part(target)
            .and_then(|part| part.as_stack())
            .is_none()
        {
            tracing::warn!(target = target.get(), "stack-into target is not a stack");
            return None;
        }

        // Keys the target absorbs: a stack contributes its tabs, anything
        // else contributes its own key.
        let absorbed: Vec<String> = match self.parts.part(source) {
            Some(part) => match part.as_stack() {
                Some(stack) => stack
                    .entries()
                    .into_iter()
                    .filter(|entry| !entry.placeholder)
                    .map(|entry| entry.key)
                    .collect(),
                None => vec![part.key().to_string()],
            },
            None => {
                tracing::warn!(source = source.get(), "stack-into source is unknown");
                return None;
            }
        };

        if let Some(leaf) = self.tree.leaf_for_part(source)
            && let Err(error) = self.tree.remove_leaf(leaf)
        {
            tracing::warn!(source = source.get(), %error, "stack-into removal failed");
            return None;
        }
        let displaced = self.parts.remove(&source);

        if let Some(stack) = self
            .parts
            .part_mut(target)
            .and_then(|part| part.as_stack_mut())
        {
            for key in &absorbed {
                stack.add_child(key);
            }
            if let Some(last) = absorbed.last() {
                stack.select(last);
            }
            if self.defer_depth == 0 {
                stack.commit_selection();
            }
        }

        self.schedule_layout();
        displaced
    }

    /// Remove one tab from a stack, culling the stack entirely once nothing
    /// (not even a placeholder) is left in it.
    pub fn remove_tab(&mut self, stack_id: PartId, key: &str) -> bool {
        let Some(stack) = self
            .parts
            .part_mut(stack_id)
            .and_then(|part| part.as_stack_mut())
        else {
            tracing::warn!(stack = stack_id.get(), "remove_tab target is not a stack");
            return false;
        };
        if !stack.remove_child(key) {
            return false;
        }
        if self.defer_depth == 0 {
            if let Some(stack) = self
                .parts
                .part_mut(stack_id)
                .and_then(|part| part.as_stack_mut())
            {
                stack.commit_selection();
            }
        }
        let empty = self
            .parts
            .part(stack_id)
            .and_then(|part| part.as_stack())
            .map(|stack| stack.entries().is_empty())
            .unwrap_or(false);
        if empty {
            drop(self.remove(stack_id));
        }
        true
    }

    /// Move one tab between stacks, selecting it in the target.
    pub fn move_tab(&mut self, source: PartId, key: &str, target: PartId) -> bool {
        if source == target {
            return false;
        }
        if self
            .parts
            .part(target)
            .and_then(|part| part.as_stack())
            .is_none()
        {
            tracing::warn!(target = target.get(), "move_tab target is not a stack");
            return false;
        }
        if !self.remove_tab(source, key) {
            return false;
        }
        if let Some(stack) = self
            .parts
            .part_mut(target)
            .and_then(|part| part.as_stack_mut())
        {
            stack.add_child(key);
            stack.select(key);
            if self.defer_depth == 0 {
                stack.commit_selection();
            }
        }
        true
    }

    /// Detach a part from its current position and re-insert it beside
    /// `relative`. The part object stays registered.
    pub fn move_part(
        &mut self,
        part: PartId,
        relationship: Relationship,
        ratio: f32,
        relative: PartId,
    ) -> bool {
        if part == relative {
            return false;
        }
        let Some(leaf) = self.tree.leaf_for_part(part) else {
            tracing::warn!(part = part.get(), "move of unknown part ignored");
            return false;
        };
        if let Err(error) = self.tree.remove_leaf(leaf) {
            tracing::warn!(part = part.get(), %error, "move detach failed");
            return false;
        }
        self.place(part, relationship, ratio, Some(relative));
        true
    }

    // -----------------------------------------------------------------
    // Deferred updates
    // -----------------------------------------------------------------

    /// Batch visual updates: `defer_updates(true)` increments a depth
    /// counter; the matching `defer_updates(false)` decrements it and, at
    /// zero, flushes the buffered work in one pass.
    pub fn defer_updates(&mut self, defer: bool) {
        if defer {
            if self.defer_depth == 0 {
                self.start_deferring();
            }
            self.defer_depth += 1;
        } else {
            debug_assert!(self.defer_depth > 0, "unbalanced defer_updates(false)");
            self.defer_depth = self.defer_depth.saturating_sub(1);
            if self.defer_depth == 0 {
                self.handle_deferred();
            }
        }
    }

    /// True while updates are being buffered.
    #[must_use]
    pub const fn deferring(&self) -> bool {
        self.defer_depth > 0
    }

    fn start_deferring(&mut self) {
        // Buffering is armed; mutations mark `layout_pending` instead of
        // laying out.
    }

    fn handle_deferred(&mut self) {
        for part in self.parts.values_mut() {
            if let Some(stack) = part.as_stack_mut() {
                stack.commit_selection();
            }
        }
        if self.layout_pending {
            self.layout_pending = false;
            self.resize_sashes();
        }
    }
}

fn ratio_to_weight(ratio: f32) -> i32 {
    let clamped = ratio.clamp(0.0, 1.0);
    (clamped * RATIO_BASIS as f32).round() as i32
}
