//! Low-level, allocation-free primitives.
//!
//! - [`coord`]: integer board coordinates and the eight knight steps in their canonical order.
//! - [`rect`]: half-open sub-rectangles used to address quadrants during recursive generation.

pub mod coord;
pub mod rect;
