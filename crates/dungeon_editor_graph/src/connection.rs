// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection drag state and edge descriptions.

use crate::node::NodeId;
use egui::{Pos2, Vec2};

/// A connection being dragged out of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingConnection {
    /// Node the connection starts from
    pub source: NodeId,
    /// Tracked end of the drag line, advanced by drag deltas
    pub cursor: Pos2,
}

impl PendingConnection {
    /// Start a drag from `source` with the line end at `cursor`
    pub fn new(source: NodeId, cursor: Pos2) -> Self {
        Self { source, cursor }
    }

    /// Advance the tracked end by a motion delta
    pub fn advance(&mut self, delta: Vec2) {
        self.cursor += delta;
    }
}

/// A directed parent -> child edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Parent side
    pub parent: NodeId,
    /// Child side
    pub child: NodeId,
}

impl Edge {
    /// Create an edge
    pub fn new(parent: NodeId, child: NodeId) -> Self {
        Self { parent, child }
    }
}
