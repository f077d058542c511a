//! The sash primitive: a draggable divider between two sibling subtrees.

use casement_core::Rect;

/// Orientation of a sash.
///
/// A vertical sash is a vertical bar dividing left|right siblings; a
/// horizontal sash divides top/bottom siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Axis along which this sash's siblings are laid out: `true` when the
    /// split distributes width (vertical sash), `false` for height.
    #[must_use]
    pub const fn splits_horizontally(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// A draggable divider owned by exactly one branch of the layout tree.
///
/// `left` and `right` hold the preferred pixel sizes of the two sides. They
/// start as the weights chosen at insertion time and are rewritten to the
/// solved pixel sizes on every layout, so they always carry the user's last
/// explicit proportions across relayouts and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sash {
    orientation: Orientation,
    /// Preferred pixels for the left/top side.
    pub left: i32,
    /// Preferred pixels for the right/bottom side.
    pub right: i32,
    /// False while dragging the sash could have no effect.
    pub enabled: bool,
    /// False while either sibling is invisible.
    pub visible: bool,
    /// Bounds assigned by the last layout pass.
    pub bounds: Rect,
}

impl Sash {
    /// Create a sash with equal side weights.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self::with_sides(orientation, 1, 1)
    }

    /// Create a sash with explicit side weights.
    #[must_use]
    pub fn with_sides(orientation: Orientation, left: i32, right: i32) -> Self {
        Self {
            orientation,
            left: left.max(0),
            right: right.max(0),
            enabled: true,
            visible: true,
            bounds: Rect::default(),
        }
    }

    /// Orientation of the divider.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Midpoint of the divider along its split axis, used by hit testing and
    /// the docking descent.
    #[must_use]
    pub fn split_position(&self) -> i32 {
        if self.orientation.splits_horizontally() {
            self.bounds.x + self.bounds.width / 2
        } else {
            self.bounds.y + self.bounds.height / 2
        }
    }
}
