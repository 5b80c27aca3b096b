// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pluggable edge acceptance rules.
//!
//! Structural rules (no self-loops, no duplicate edges) are always enforced
//! by the nodes themselves. A policy adds game-specific rules on top.

use crate::error::LinkRejection;
use crate::graph::RoomGraph;
use crate::node::RoomNode;

/// Decides whether a new parent -> child edge is allowed
pub trait LinkPolicy {
    /// Accept or reject the edge. Called before either node is mutated.
    fn check(&self, graph: &RoomGraph, parent: &RoomNode, child: &RoomNode) -> Result<(), LinkRejection>;
}

impl<F> LinkPolicy for F
where
    F: Fn(&RoomGraph, &RoomNode, &RoomNode) -> Result<(), LinkRejection>,
{
    fn check(&self, graph: &RoomGraph, parent: &RoomNode, child: &RoomNode) -> Result<(), LinkRejection> {
        self(graph, parent, child)
    }
}

/// Accepts every structurally valid edge
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl LinkPolicy for AcceptAll {
    fn check(&self, _graph: &RoomGraph, _parent: &RoomNode, _child: &RoomNode) -> Result<(), LinkRejection> {
        Ok(())
    }
}

/// Caps the number of children a node may have
#[derive(Debug, Clone, Copy)]
pub struct MaxChildren(pub usize);

impl LinkPolicy for MaxChildren {
    fn check(&self, _graph: &RoomGraph, parent: &RoomNode, _child: &RoomNode) -> Result<(), LinkRejection> {
        if parent.child_count() >= self.0 {
            return Err(LinkRejection::Policy(format!(
                "node already has the maximum of {} children",
                self.0
            )));
        }
        Ok(())
    }
}
