#![forbid(unsafe_code)]

//! Part and control contracts.
//!
//! A *part* is anything the layout engine can place: a pane, a tabbed stack,
//! an editor area, or a placeholder holding a spot for a part that is not
//! currently open. Parts are owned by the host application; the engine only
//! arranges them through the [`LayoutPart`] contract.

use bitflags::bitflags;

use crate::geometry::Rect;

bitflags! {
    /// Size-negotiation flags reported by a part, per axis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SizeFlags: u8 {
        /// No negotiation behavior.
        const NONE    = 0b0000;
        /// The part has a minimum size along this axis.
        const HAS_MIN = 0b0001;
        /// The part has a maximum size along this axis.
        const HAS_MAX = 0b0010;
        /// The part reacts to its perpendicular extent (wraps).
        const WRAPS   = 0b0100;
        /// The part participates in fill negotiation along this axis.
        const FILLS   = 0b1000;
    }
}

impl Default for SizeFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// Closed capability classification for parts.
///
/// Behavior differences between part families are decided through this enum
/// and the explicit accessor methods on [`LayoutPart`], never through type
/// introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// A single pane of content.
    Pane,
    /// A tab group showing one of several children at a time.
    Stack,
    /// An invisible part holding layout space for a closed part.
    Placeholder,
    /// The editor area; docking against it uses the shallower ratio.
    EditorArea,
}

/// One ordered child entry of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackChildEntry {
    /// Host-stable identity key of the child.
    pub key: String,
    /// True when the entry holds a spot without presentable content.
    pub placeholder: bool,
}

/// The stacking surface a tab-group part exposes to the engine.
///
/// Reached through [`LayoutPart::as_stack`]; parts that are not stacks
/// return `None` from the accessor.
pub trait StackSurface {
    /// Ordered child entries, placeholders included.
    fn entries(&self) -> Vec<StackChildEntry>;

    /// Number of non-placeholder children.
    fn visible_child_count(&self) -> usize;

    /// Whether this stack accepts a dropped payload of the given kind.
    fn accepts(&self, kind: PartKind) -> bool;

    /// Append a child and request its selection. Returns false if the key is
    /// already present.
    fn add_child(&mut self, key: &str) -> bool;

    /// Remove a child by key. Returns false if the key is absent.
    fn remove_child(&mut self, key: &str) -> bool;

    /// Request selection of a child. Returns false if the key is absent.
    fn select(&mut self, key: &str) -> bool;

    /// Apply the requested selection to the displayed selection.
    ///
    /// Requested and displayed selection are decoupled so deferred updates
    /// never show an inconsistent intermediate state; the container calls
    /// this when it is safe to surface the change.
    fn commit_selection(&mut self);

    /// Currently displayed child, if any.
    fn displayed(&self) -> Option<String>;

    /// Replace children and selection wholesale from persisted state.
    ///
    /// Returns false (after normalizing the selection away) when `selected`
    /// does not name a presentable member.
    fn restore_children(&mut self, children: Vec<StackChildEntry>, selected: Option<String>)
        -> bool;
}

/// Contract every placeable part implements.
///
/// All pixel arguments follow the negotiation convention of the layout crate:
/// `horizontal` selects the axis, `available_parallel` bounds the result,
/// `available_perpendicular` is the extent on the other axis (relevant only
/// to wrapping parts), and `preferred_parallel` is the size the caller would
/// like the part to take.
pub trait LayoutPart: core::fmt::Debug {
    /// Host-stable identity string, used by persistence and stacks.
    fn key(&self) -> &str;

    /// Capability classification.
    fn kind(&self) -> PartKind;

    /// Whether the part currently occupies space.
    fn is_visible(&self) -> bool;

    /// Show or hide the part.
    fn set_visible(&mut self, visible: bool);

    /// Current bounds.
    fn bounds(&self) -> Rect;

    /// Apply bounds computed by the layout pass.
    fn set_bounds(&mut self, bounds: Rect);

    /// Size-negotiation flags along the given axis.
    fn size_flags(&self, horizontal: bool) -> SizeFlags;

    /// Negotiate a size along the given axis.
    ///
    /// Must return a value in `[0, available_parallel]`; parts with quantized
    /// sizes (tab folders) round `preferred_parallel` here.
    fn compute_preferred_size(
        &self,
        horizontal: bool,
        available_parallel: i32,
        available_perpendicular: i32,
        preferred_parallel: i32,
    ) -> i32;

    /// Whether this part absorbs compression before its sibling shrinks.
    fn is_compressible(&self) -> bool {
        false
    }

    /// Stacking surface, for parts that are tab groups.
    fn as_stack(&self) -> Option<&dyn StackSurface> {
        None
    }

    /// Mutable stacking surface, for parts that are tab groups.
    fn as_stack_mut(&mut self) -> Option<&mut dyn StackSurface> {
        None
    }
}

/// Minimal widget-toolkit boundary for anything the engine positions.
///
/// Hosts adapt their toolkit's widget handles to this trait; the engine never
/// paints, it only forwards geometry and visibility.
pub trait ControlSurface {
    /// Position the underlying control.
    fn set_bounds(&mut self, bounds: Rect);

    /// Show or hide the underlying control.
    fn set_visible(&mut self, visible: bool);

    /// Release the underlying control. Called at most once.
    fn dispose(&mut self);
}
