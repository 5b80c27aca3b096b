// SPDX-License-Identifier: MIT OR Apache-2.0
//! Room graph store: ordered nodes, ID index and the pending connection.

use crate::catalog::RoomTypeCatalog;
use crate::connection::{Edge, PendingConnection};
use crate::error::LinkRejection;
use crate::node::{NodeId, RoomNode};
use crate::policy::LinkPolicy;
use egui::{Pos2, Vec2};
use std::collections::HashMap;

/// A room node graph.
///
/// Node order is draw order and hit-test priority: later nodes are on top.
/// The ID index is derived from the node list and refreshed by every
/// structural change made through this type.
#[derive(Debug, Clone, Default)]
pub struct RoomGraph {
    nodes: Vec<RoomNode>,
    by_id: HashMap<NodeId, usize>,
    pending_connection: Option<PendingConnection>,
}

impl RoomGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node
    pub fn add(&mut self, node: RoomNode) -> NodeId {
        let id = node.id();
        self.nodes.push(node);
        self.rebuild_index();
        id
    }

    /// Recompute the ID index from the node list
    pub fn rebuild_index(&mut self) {
        self.by_id.clear();
        for (index, node) in self.nodes.iter().enumerate() {
            self.by_id.insert(node.id(), index);
        }
    }

    /// Bulk-edit the node list; the index is rebuilt afterwards
    pub fn edit_nodes<R>(&mut self, f: impl FnOnce(&mut Vec<RoomNode>) -> R) -> R {
        let result = f(&mut self.nodes);
        self.rebuild_index();
        result
    }

    /// Get a node by ID
    pub fn lookup(&self, id: NodeId) -> Option<&RoomNode> {
        self.by_id.get(&id).and_then(|&index| self.nodes.get(index))
    }

    /// Get a mutable node by ID
    pub fn lookup_mut(&mut self, id: NodeId) -> Option<&mut RoomNode> {
        let index = *self.by_id.get(&id)?;
        self.nodes.get_mut(index)
    }

    /// Whether a node is in the graph
    pub fn contains(&self, id: NodeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Nodes in draw order
    pub fn nodes(&self) -> impl Iterator<Item = &RoomNode> {
        self.nodes.iter()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Topmost node containing `point`
    pub fn node_at(&self, point: Pos2) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.contains(point))
            .map(RoomNode::id)
    }

    /// First node whose type is the catalog's entrance type
    pub fn entrance(&self, catalog: &RoomTypeCatalog) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| catalog.is_entrance(node.room_type))
            .map(RoomNode::id)
    }

    /// Add the edge `parent -> child` on both nodes.
    ///
    /// Both endpoints are resolved and every rule is checked before either
    /// node changes, so a rejection leaves the graph untouched.
    pub fn link(
        &mut self,
        parent: NodeId,
        child: NodeId,
        policy: &dyn LinkPolicy,
    ) -> Result<(), LinkRejection> {
        let parent_index = *self.by_id.get(&parent).ok_or(LinkRejection::UnknownNode(parent))?;
        let child_index = *self.by_id.get(&child).ok_or(LinkRejection::UnknownNode(child))?;

        let parent_node = &self.nodes[parent_index];
        let child_node = &self.nodes[child_index];
        parent_node.can_accept_child(child)?;
        if child_node.has_parent(parent) {
            return Err(LinkRejection::Duplicate { parent, child });
        }
        policy.check(self, parent_node, child_node)?;

        self.nodes[parent_index].try_accept_child(child)?;
        self.nodes[child_index].add_parent(parent);
        Ok(())
    }

    /// All edges whose child resolves, in node then creation order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().flat_map(move |node| {
            node.child_ids()
                .filter(move |child| self.contains(*child))
                .map(move |child| Edge::new(node.id(), child))
        })
    }

    /// Clear every node's selection; returns whether anything changed
    pub fn clear_selection(&mut self) -> bool {
        let mut changed = false;
        for node in self.nodes.iter_mut().filter(|node| node.selected) {
            node.selected = false;
            changed = true;
        }
        changed
    }

    /// Currently selected node IDs
    pub fn selected(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|node| node.selected).map(RoomNode::id)
    }

    /// The connection being dragged, if any
    pub fn pending_connection(&self) -> Option<&PendingConnection> {
        self.pending_connection.as_ref()
    }

    /// Start a connection drag from a node's center.
    ///
    /// Returns `false` when the node is not in the graph.
    pub fn begin_connection(&mut self, source: NodeId) -> bool {
        let Some(center) = self.lookup(source).map(RoomNode::center) else {
            return false;
        };
        self.pending_connection = Some(PendingConnection::new(source, center));
        true
    }

    /// Advance the pending connection's end by a delta; returns whether a drag is active
    pub fn drag_connection(&mut self, delta: Vec2) -> bool {
        match &mut self.pending_connection {
            Some(pending) => {
                pending.advance(delta);
                true
            }
            None => false,
        }
    }

    /// End any connection drag, returning it
    pub fn clear_connection(&mut self) -> Option<PendingConnection> {
        self.pending_connection.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoomType;
    use crate::policy::AcceptAll;

    fn node_at(x: f32, y: f32) -> RoomNode {
        RoomNode::at(Pos2::new(x, y), Vec2::new(160.0, 75.0), RoomType::None)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        let b = graph.add(node_at(300.0, 0.0));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.lookup(a).unwrap().id(), a);
        assert_eq!(graph.lookup(b).unwrap().id(), b);
        assert!(graph.lookup(NodeId::new()).is_none());
    }

    #[test]
    fn test_rebuild_index_is_idempotent() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        graph.rebuild_index();
        graph.rebuild_index();
        assert_eq!(graph.lookup(a).unwrap().id(), a);
    }

    #[test]
    fn test_edit_nodes_keeps_index_consistent() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        let b = graph.add(node_at(300.0, 0.0));

        graph.edit_nodes(|nodes| nodes.reverse());

        assert_eq!(graph.lookup(a).unwrap().id(), a);
        assert_eq!(graph.lookup(b).unwrap().id(), b);
        assert_eq!(graph.nodes().next().unwrap().id(), b);
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut graph = RoomGraph::new();
        let _bottom = graph.add(node_at(0.0, 0.0));
        let top = graph.add(node_at(50.0, 20.0));

        assert_eq!(graph.node_at(Pos2::new(100.0, 50.0)), Some(top));
        assert_eq!(graph.node_at(Pos2::new(1000.0, 1000.0)), None);
    }

    #[test]
    fn test_link_is_paired() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        let b = graph.add(node_at(300.0, 0.0));

        graph.link(a, b, &AcceptAll).unwrap();

        assert!(graph.lookup(a).unwrap().has_child(b));
        assert!(graph.lookup(b).unwrap().has_parent(a));
        assert!(!graph.lookup(a).unwrap().has_parent(b));
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![Edge::new(a, b)]);
    }

    #[test]
    fn test_rejected_link_changes_nothing() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        let b = graph.add(node_at(300.0, 0.0));
        let ghost = NodeId::new();

        assert_eq!(graph.link(a, a, &AcceptAll), Err(LinkRejection::SelfLoop));
        assert_eq!(graph.link(a, ghost, &AcceptAll), Err(LinkRejection::UnknownNode(ghost)));
        graph.link(a, b, &AcceptAll).unwrap();
        assert!(graph.link(a, b, &AcceptAll).is_err());

        let a_node = graph.lookup(a).unwrap();
        assert_eq!(a_node.child_ids().collect::<Vec<_>>(), vec![b]);
        assert_eq!(a_node.parent_ids().count(), 0);
        assert_eq!(graph.lookup(b).unwrap().parent_ids().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_no_self_loops_after_any_sequence() {
        let mut graph = RoomGraph::new();
        let ids: Vec<_> = (0..4).map(|i| graph.add(node_at(i as f32 * 200.0, 0.0))).collect();
        for &p in &ids {
            for &c in &ids {
                let _ = graph.link(p, c, &AcceptAll);
            }
        }
        for node in graph.nodes() {
            assert!(!node.has_child(node.id()));
            assert!(!node.has_parent(node.id()));
            for child in node.child_ids() {
                assert!(graph.lookup(child).unwrap().has_parent(node.id()));
            }
        }
        assert_eq!(graph.edges().count(), 12);
    }

    #[test]
    fn test_edges_skip_unresolved_children() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        let b = graph.add(node_at(300.0, 0.0));
        graph.link(a, b, &AcceptAll).unwrap();

        let removed = graph.edit_nodes(|nodes| {
            let before = nodes.len();
            nodes.retain(|node| node.id() != b);
            before - nodes.len()
        });

        assert_eq!(removed, 1);
        assert!(!graph.contains(b));
        assert!(graph.lookup(a).unwrap().has_child(b));
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn test_mutable_lookup_keeps_edges_paired() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        let b = graph.add(node_at(300.0, 0.0));

        // Moving and selecting through a mutable lookup never touches adjacency
        let node = graph.lookup_mut(a).unwrap();
        node.translate(Vec2::new(10.0, 10.0));
        node.selected = true;
        assert_eq!(graph.edges().count(), 0);

        graph.link(a, b, &AcceptAll).unwrap();
        for edge in graph.edges() {
            assert!(graph.lookup(edge.parent).unwrap().has_child(edge.child));
            assert!(graph.lookup(edge.child).unwrap().has_parent(edge.parent));
        }
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn test_clear_selection() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));
        let b = graph.add(node_at(300.0, 0.0));
        graph.lookup_mut(a).unwrap().selected = true;
        graph.lookup_mut(b).unwrap().selected = true;

        assert_eq!(graph.selected().count(), 2);
        assert!(graph.clear_selection());
        assert_eq!(graph.selected().count(), 0);
        assert!(!graph.clear_selection());
    }

    #[test]
    fn test_pending_connection_lifecycle() {
        let mut graph = RoomGraph::new();
        let a = graph.add(node_at(0.0, 0.0));

        assert!(!graph.drag_connection(Vec2::new(1.0, 1.0)));
        assert!(!graph.begin_connection(NodeId::new()));
        assert!(graph.begin_connection(a));
        assert_eq!(graph.pending_connection().unwrap().cursor, Pos2::new(80.0, 37.5));

        assert!(graph.drag_connection(Vec2::new(10.0, 5.0)));
        assert!(graph.drag_connection(Vec2::new(10.0, 5.0)));
        assert_eq!(graph.pending_connection().unwrap().cursor, Pos2::new(100.0, 47.5));

        let cleared = graph.clear_connection().unwrap();
        assert_eq!(cleared.source, a);
        assert!(graph.pending_connection().is_none());
    }

    #[test]
    fn test_entrance_lookup() {
        let catalog = RoomTypeCatalog::dungeon();
        let mut graph = RoomGraph::new();
        graph.add(node_at(0.0, 0.0));
        assert!(graph.entrance(&catalog).is_none());
        let entrance = graph.add(RoomNode::at(Pos2::ZERO, Vec2::new(160.0, 75.0), RoomType::Entrance));
        assert_eq!(graph.entrance(&catalog), Some(entrance));
    }
}
