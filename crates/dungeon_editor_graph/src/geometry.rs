// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge geometry: midpoints and mid-line arrowheads.
//!
//! Everything here is a pure function of its inputs so the render pass
//! and tests can share it.

use egui::{Pos2, Vec2};

/// Points of an arrowhead drawn at the middle of an edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    /// Tip of the arrow, offset from the midpoint along the edge direction
    pub head: Pos2,
    /// Tail point on one side of the edge
    pub wing1: Pos2,
    /// Tail point on the other side of the edge
    pub wing2: Pos2,
}

/// Midpoint between two points
pub fn midpoint(start: Pos2, end: Pos2) -> Pos2 {
    Pos2::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0)
}

/// Normalize a vector, returning zero for zero-length input instead of NaN
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        v / len
    } else {
        Vec2::ZERO
    }
}

/// Compute the arrowhead for the edge `start -> end`.
///
/// The wings sit `arrow_size` either side of the midpoint, perpendicular to
/// the edge, and the head sits `arrow_size` past the midpoint along it.
/// For `start == end` every point collapses onto the midpoint; use
/// [`edge_arrow`] to skip such edges.
pub fn compute_arrow(start: Pos2, end: Pos2, arrow_size: f32) -> ArrowHead {
    let direction = end - start;
    let mid = midpoint(start, end);
    let perp = normalize_or_zero(Vec2::new(-direction.y, direction.x));

    ArrowHead {
        head: mid + normalize_or_zero(direction) * arrow_size,
        wing1: mid - perp * arrow_size,
        wing2: mid + perp * arrow_size,
    }
}

/// Arrowhead for a drawable edge, or `None` when the edge has zero length
pub fn edge_arrow(start: Pos2, end: Pos2, arrow_size: f32) -> Option<ArrowHead> {
    if start == end {
        return None;
    }
    Some(compute_arrow(start, end, arrow_size))
}
