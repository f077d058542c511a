//! Shared fixtures for the crate's unit tests.

use std::collections::BTreeMap;

use casement_core::{LayoutPart, PartKind, Rect, SizeFlags};

use crate::container::PartId;
use crate::tree::PartHost;
use crate::INFINITE;

/// Configurable part double for negotiation tests.
#[derive(Debug)]
pub(crate) struct FixturePart {
    key: String,
    kind: PartKind,
    visible: bool,
    bounds: Rect,
    min: i32,
    max: Option<i32>,
    wraps: bool,
    compressible: bool,
}

impl FixturePart {
    pub(crate) fn pane(key: &str) -> Self {
        Self {
            key: key.to_string(),
            kind: PartKind::Pane,
            visible: true,
            bounds: Rect::default(),
            min: 0,
            max: None,
            wraps: false,
            compressible: false,
        }
    }

    pub(crate) fn editor_area(key: &str) -> Self {
        Self {
            kind: PartKind::EditorArea,
            ..Self::pane(key)
        }
    }

    /// A compressible part behaving like a tab folder.
    pub(crate) fn stack_like(key: &str) -> Self {
        Self {
            compressible: true,
            ..Self::pane(key)
        }
    }

    pub(crate) fn with_min(mut self, min: i32) -> Self {
        self.min = min;
        self
    }

    pub(crate) fn with_max(mut self, max: i32) -> Self {
        self.max = Some(max);
        self
    }

    pub(crate) fn wrapping(mut self) -> Self {
        self.wraps = true;
        self
    }
}

impl LayoutPart for FixturePart {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> PartKind {
        self.kind
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn size_flags(&self, _horizontal: bool) -> SizeFlags {
        let mut flags = SizeFlags::NONE;
        if self.min > 0 {
            flags |= SizeFlags::HAS_MIN;
        }
        if self.max.is_some() {
            flags |= SizeFlags::HAS_MAX;
        }
        if self.wraps {
            flags |= SizeFlags::WRAPS;
        }
        flags
    }

    fn compute_preferred_size(
        &self,
        _horizontal: bool,
        available_parallel: i32,
        _available_perpendicular: i32,
        preferred_parallel: i32,
    ) -> i32 {
        let upper = available_parallel.min(self.max.unwrap_or(INFINITE));
        if preferred_parallel == 0 {
            return upper.min(self.min);
        }
        if preferred_parallel == INFINITE {
            return upper;
        }
        preferred_parallel.max(self.min).min(upper)
    }

    fn is_compressible(&self) -> bool {
        self.compressible
    }
}

/// Part registry double keyed like the container's.
pub(crate) struct PartMap {
    parts: BTreeMap<PartId, Box<dyn LayoutPart>>,
    next: u64,
}

impl PartMap {
    pub(crate) fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            next: 1,
        }
    }

    pub(crate) fn add(&mut self, part: FixturePart) -> PartId {
        let id = PartId::new(self.next).expect("fixture ids start at 1");
        self.next += 1;
        self.parts.insert(id, Box::new(part));
        id
    }

    pub(crate) fn get(&self, key: &str) -> &dyn LayoutPart {
        self.parts
            .values()
            .map(|part| part.as_ref())
            .find(|part| part.key() == key)
            .expect("fixture part present")
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> &mut dyn LayoutPart {
        self.parts
            .values_mut()
            .map(|part| part.as_mut())
            .find(|part| part.key() == key)
            .expect("fixture part present")
    }
}

impl PartHost for PartMap {
    fn part(&self, id: PartId) -> Option<&dyn LayoutPart> {
        self.parts.part(id)
    }

    fn part_mut(&mut self, id: PartId) -> Option<&mut dyn LayoutPart> {
        self.parts.part_mut(id)
    }
}
