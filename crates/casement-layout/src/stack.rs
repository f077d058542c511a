//! The tab-group part: several children, one shown at a time.
//!
//! A stack is not part of the tree algebra; the tree arranges the stack as
//! one part and the stack manages its own tabs. Selection is split into a
//! *requested* and a *displayed* pointer so the container can defer visual
//! updates: mutations adjust the request, and the displayed pointer moves
//! only when the container commits.

use std::fmt;

use casement_core::{LayoutPart, PartKind, Rect, SizeFlags, StackChildEntry, StackSurface};

use crate::INFINITE;

/// Minimum width a tab folder can render.
const MIN_STACK_WIDTH: i32 = 80;

/// Height consumed by the tab bar.
const TAB_BAR_HEIGHT: i32 = 22;

/// Minimum content extent below the tab bar.
const MIN_CONTENT_HEIGHT: i32 = 40;

/// Tab folders size in increments of the minimum tab width.
const TAB_WIDTH_QUANTUM: i32 = 8;

/// Rendering callbacks for a stack's tab folder.
///
/// Placeholder children never reach the presentation.
pub trait StackPresentation {
    /// A presentable child was appended.
    fn child_added(&mut self, key: &str);

    /// A presentable child was removed.
    fn child_removed(&mut self, key: &str);

    /// The displayed child changed.
    fn selection_changed(&mut self, key: Option<&str>);

    /// The stack was positioned by a layout pass.
    fn set_bounds(&mut self, bounds: Rect);
}

/// A tab group holding parts and placeholders, showing one child at a time.
pub struct PartStack {
    key: String,
    visible: bool,
    bounds: Rect,
    children: Vec<StackChildEntry>,
    requested: Option<String>,
    displayed: Option<String>,
    presentation: Option<Box<dyn StackPresentation>>,
}

impl fmt::Debug for PartStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartStack")
            .field("key", &self.key)
            .field("children", &self.children.len())
            .field("requested", &self.requested)
            .field("displayed", &self.displayed)
            .finish_non_exhaustive()
    }
}

impl PartStack {
    /// Empty stack with the given identity key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            visible: true,
            bounds: Rect::default(),
            children: Vec::new(),
            requested: None,
            displayed: None,
            presentation: None,
        }
    }

    /// Stack seeded with one presentable child, selected.
    #[must_use]
    pub fn with_child(key: impl Into<String>, child_key: impl Into<String>) -> Self {
        let mut stack = Self::new(key);
        let child_key = child_key.into();
        stack.add_child(&child_key);
        stack.commit_selection();
        stack
    }

    /// Attach the tab-folder presentation.
    pub fn set_presentation(&mut self, presentation: Box<dyn StackPresentation>) {
        self.presentation = Some(presentation);
    }

    /// Requested (possibly not yet displayed) selection.
    #[must_use]
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Append a placeholder entry holding a spot for a closed part.
    pub fn add_placeholder(&mut self, key: &str) -> bool {
        if self.entry_index(key).is_some() {
            return false;
        }
        self.children.push(StackChildEntry {
            key: key.to_string(),
            placeholder: true,
        });
        true
    }

    fn entry_index(&self, key: &str) -> Option<usize> {
        self.children.iter().position(|entry| entry.key == key)
    }

    fn first_presentable(&self) -> Option<String> {
        self.children
            .iter()
            .find(|entry| !entry.placeholder)
            .map(|entry| entry.key.clone())
    }
}

impl StackSurface for PartStack {
    fn entries(&self) -> Vec<StackChildEntry> {
        self.children.clone()
    }

    fn visible_child_count(&self) -> usize {
        self.children
            .iter()
            .filter(|entry| !entry.placeholder)
            .count()
    }

    fn accepts(&self, kind: PartKind) -> bool {
        matches!(kind, PartKind::Pane | PartKind::Stack)
    }

    fn add_child(&mut self, key: &str) -> bool {
        if self.entry_index(key).is_some() {
            return false;
        }
        self.children.push(StackChildEntry {
            key: key.to_string(),
            placeholder: false,
        });
        self.requested = Some(key.to_string());
        if let Some(presentation) = &mut self.presentation {
            presentation.child_added(key);
        }
        true
    }

    fn remove_child(&mut self, key: &str) -> bool {
        let Some(index) = self.entry_index(key) else {
            return false;
        };
        let entry = self.children.remove(index);
        if !entry.placeholder
            && let Some(presentation) = &mut self.presentation
        {
            presentation.child_removed(key);
        }
        if self.requested.as_deref() == Some(key) {
            self.requested = self.first_presentable();
        }
        if self.displayed.as_deref() == Some(key) {
            // The displayed child vanished; fall back to the request.
            self.displayed = None;
        }
        true
    }

    fn select(&mut self, key: &str) -> bool {
        match self.entry_index(key) {
            Some(index) if !self.children[index].placeholder => {
                self.requested = Some(key.to_string());
                true
            }
            _ => false,
        }
    }

    fn commit_selection(&mut self) {
        // The displayed child must stay a presentable member or none.
        let target = self
            .requested
            .as_deref()
            .and_then(|key| self.entry_index(key))
            .filter(|index| !self.children[*index].placeholder)
            .map(|index| self.children[index].key.clone());
        if target == self.displayed {
            return;
        }
        self.displayed = target;
        if let Some(presentation) = &mut self.presentation {
            presentation.selection_changed(self.displayed.as_deref());
        }
    }

    fn displayed(&self) -> Option<String> {
        self.displayed.clone()
    }

    fn restore_children(
        &mut self,
        children: Vec<StackChildEntry>,
        selected: Option<String>,
    ) -> bool {
        self.children = children;
        let valid = match selected.as_deref() {
            None => true,
            Some(key) => self
                .entry_index(key)
                .map(|index| !self.children[index].placeholder)
                .unwrap_or(false),
        };
        if valid {
            self.requested = selected;
        } else {
            tracing::warn!(
                stack = self.key.as_str(),
                "restored selection is not a presentable member; cleared"
            );
            self.requested = None;
        }
        self.commit_selection();
        valid
    }
}

impl LayoutPart for PartStack {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> PartKind {
        PartKind::Stack
    }

    fn is_visible(&self) -> bool {
        self.visible && self.visible_child_count() > 0
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        if let Some(presentation) = &mut self.presentation {
            presentation.set_bounds(bounds);
        }
    }

    fn size_flags(&self, _horizontal: bool) -> SizeFlags {
        SizeFlags::FILLS | SizeFlags::HAS_MIN
    }

    fn compute_preferred_size(
        &self,
        horizontal: bool,
        available_parallel: i32,
        _available_perpendicular: i32,
        preferred_parallel: i32,
    ) -> i32 {
        let minimum = if horizontal {
            MIN_STACK_WIDTH
        } else {
            TAB_BAR_HEIGHT + MIN_CONTENT_HEIGHT
        };
        if preferred_parallel == 0 {
            return available_parallel.min(minimum);
        }
        if preferred_parallel == INFINITE {
            return available_parallel;
        }
        // Tab folders size in tab-width increments: round to the nearest
        // quantum, then respect the minimum and the available space.
        let size = if horizontal {
            (preferred_parallel + TAB_WIDTH_QUANTUM / 2) / TAB_WIDTH_QUANTUM * TAB_WIDTH_QUANTUM
        } else {
            preferred_parallel
        };
        size.max(minimum).min(available_parallel)
    }

    fn is_compressible(&self) -> bool {
        // The tab folder degrades to overflow chevrons rather than holding a
        // natural size, so it absorbs pressure before its sibling shrinks.
        true
    }

    fn as_stack(&self) -> Option<&dyn StackSurface> {
        Some(self)
    }

    fn as_stack_mut(&mut self) -> Option<&mut dyn StackSurface> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct EventLog {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl StackPresentation for EventLog {
        fn child_added(&mut self, key: &str) {
            self.events.borrow_mut().push(format!("add:{key}"));
        }
        fn child_removed(&mut self, key: &str) {
            self.events.borrow_mut().push(format!("remove:{key}"));
        }
        fn selection_changed(&mut self, key: Option<&str>) {
            self.events
                .borrow_mut()
                .push(format!("select:{}", key.unwrap_or("-")));
        }
        fn set_bounds(&mut self, bounds: Rect) {
            self.events
                .borrow_mut()
                .push(format!("bounds:{}x{}", bounds.width, bounds.height));
        }
    }

    fn logged_stack() -> (PartStack, Rc<RefCell<Vec<String>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut stack = PartStack::new("stack");
        stack.set_presentation(Box::new(EventLog {
            events: Rc::clone(&events),
        }));
        (stack, events)
    }

    // ---- Selection ----

    #[test]
    fn selection_is_deferred_until_commit() {
        let (mut stack, events) = logged_stack();
        stack.add_child("a");
        stack.add_child("b");
        assert_eq!(stack.requested(), Some("b"));
        assert_eq!(stack.displayed(), None);

        stack.commit_selection();
        assert_eq!(stack.displayed(), Some("b".to_string()));
        assert!(events.borrow().contains(&"select:b".to_string()));
    }

    #[test]
    fn commit_without_change_stays_silent() {
        let (mut stack, events) = logged_stack();
        stack.add_child("a");
        stack.commit_selection();
        let before = events.borrow().len();
        stack.commit_selection();
        assert_eq!(events.borrow().len(), before);
    }

    #[test]
    fn select_rejects_placeholders_and_strangers() {
        let mut stack = PartStack::new("stack");
        stack.add_child("a");
        stack.add_placeholder("ghost");
        assert!(!stack.select("ghost"));
        assert!(!stack.select("missing"));
        assert!(stack.select("a"));
    }

    #[test]
    fn removing_displayed_child_falls_back() {
        let mut stack = PartStack::new("stack");
        stack.add_child("a");
        stack.add_child("b");
        stack.commit_selection();
        assert_eq!(stack.displayed(), Some("b".to_string()));

        stack.remove_child("b");
        stack.commit_selection();
        assert_eq!(stack.displayed(), Some("a".to_string()));
    }

    #[test]
    fn removing_last_child_clears_selection() {
        let mut stack = PartStack::new("stack");
        stack.add_child("a");
        stack.commit_selection();
        stack.remove_child("a");
        stack.commit_selection();
        assert_eq!(stack.displayed(), None);
        assert_eq!(stack.visible_child_count(), 0);
    }

    // ---- Placeholders ----

    #[test]
    fn placeholders_never_reach_presentation() {
        let (mut stack, events) = logged_stack();
        stack.add_placeholder("ghost");
        stack.remove_child("ghost");
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn placeholder_does_not_count_as_visible() {
        let mut stack = PartStack::new("stack");
        stack.add_placeholder("ghost");
        assert_eq!(stack.visible_child_count(), 0);
        assert!(!stack.is_visible());
        stack.add_child("a");
        assert_eq!(stack.visible_child_count(), 1);
        assert!(stack.is_visible());
    }

    // ---- Restore ----

    #[test]
    fn restore_children_validates_selection() {
        let mut stack = PartStack::new("stack");
        let children = vec![
            StackChildEntry {
                key: "a".to_string(),
                placeholder: false,
            },
            StackChildEntry {
                key: "ghost".to_string(),
                placeholder: true,
            },
        ];
        assert!(stack.restore_children(children.clone(), Some("a".to_string())));
        assert_eq!(stack.displayed(), Some("a".to_string()));

        // A placeholder selection is rejected and cleared.
        assert!(!stack.restore_children(children, Some("ghost".to_string())));
        assert_eq!(stack.displayed(), None);
    }

    // ---- Negotiation ----

    #[test]
    fn stack_reports_fill_and_minimum() {
        let stack = PartStack::new("stack");
        let flags = stack.size_flags(true);
        assert!(flags.contains(SizeFlags::FILLS));
        assert!(flags.contains(SizeFlags::HAS_MIN));
        assert!(!flags.contains(SizeFlags::WRAPS));
        assert!(stack.is_compressible());
    }

    #[test]
    fn preferred_width_quantizes_to_tab_grid() {
        let stack = PartStack::new("stack");
        // 133 rounds to 136, clamped by neither bound.
        assert_eq!(stack.compute_preferred_size(true, 500, 100, 133), 136);
        // The minimum wins over small requests.
        assert_eq!(stack.compute_preferred_size(true, 500, 100, 10), MIN_STACK_WIDTH);
        // Availability caps the result.
        assert_eq!(stack.compute_preferred_size(true, 90, 100, 133), 90);
    }

    #[test]
    fn preferred_height_is_not_quantized() {
        let stack = PartStack::new("stack");
        assert_eq!(stack.compute_preferred_size(false, 500, 100, 133), 133);
        assert_eq!(
            stack.compute_preferred_size(false, 500, 100, 0),
            TAB_BAR_HEIGHT + MIN_CONTENT_HEIGHT
        );
    }

    #[test]
    fn accepts_panes_and_stacks_only() {
        let stack = PartStack::new("stack");
        assert!(stack.accepts(PartKind::Pane));
        assert!(stack.accepts(PartKind::Stack));
        assert!(!stack.accepts(PartKind::Placeholder));
        assert!(!stack.accepts(PartKind::EditorArea));
    }
}
