//! Placeholder parts holding layout space for closed parts.

use casement_core::{LayoutPart, PartKind, Rect, SizeFlags};

/// An invisible part keeping a spot (and its proportions) in the tree so a
/// later-opened part can take the exact position a saved layout gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartPlaceholder {
    key: String,
    bounds: Rect,
}

impl PartPlaceholder {
    /// Placeholder for the given identity key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            bounds: Rect::default(),
        }
    }
}

impl LayoutPart for PartPlaceholder {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> PartKind {
        PartKind::Placeholder
    }

    fn is_visible(&self) -> bool {
        false
    }

    fn set_visible(&mut self, _visible: bool) {
        // Placeholders never become visible; they only hold space.
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn size_flags(&self, _horizontal: bool) -> SizeFlags {
        SizeFlags::NONE
    }

    fn compute_preferred_size(
        &self,
        _horizontal: bool,
        available_parallel: i32,
        _available_perpendicular: i32,
        preferred_parallel: i32,
    ) -> i32 {
        preferred_parallel.min(available_parallel)
    }
}
