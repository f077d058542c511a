#![forbid(unsafe_code)]

//! Core: geometry and the part/control contracts.
//!
//! # Role in Casement
//! `casement-core` is the contract layer. It owns the integer-pixel geometry
//! primitives and the traits through which the layout engine talks to
//! application parts and to the host widget toolkit.
//!
//! # Primary responsibilities
//! - **Rect/Point**: pixel rectangles with the transposition helper the
//!   orientation-folding layout pass relies on.
//! - **LayoutPart**: the contract every placeable part implements (identity,
//!   visibility, size flags, preferred-size negotiation).
//! - **ControlSurface**: the minimal widget-toolkit boundary.
//!
//! # How it fits in the system
//! The layout crate (`casement-layout`) consumes these contracts and never
//! sees concrete toolkit types; hosts implement them once per toolkit.

pub mod geometry;
pub mod part;

pub use geometry::{Point, Rect};
pub use part::{ControlSurface, LayoutPart, PartKind, SizeFlags, StackChildEntry, StackSurface};
