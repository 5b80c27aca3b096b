// SPDX-License-Identifier: MIT OR Apache-2.0
//! Room nodes: rectangle, type, flags and adjacency.

use crate::catalog::RoomType;
use crate::error::LinkRejection;
use crate::event::{PointerButton, PointerEvent, PointerEventKind};
use egui::{Pos2, Rect, Vec2};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a room node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a node did with an event forwarded to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeResponse {
    /// Event not relevant to the node
    Ignored,
    /// Node state changed and needs a redraw
    Changed,
    /// Node wants to start a connection drag from its center
    BeginConnection,
}

/// A room in the level graph
#[derive(Debug, Clone)]
pub struct RoomNode {
    id: NodeId,
    /// Position and size on the canvas
    pub rect: Rect,
    /// Room type tag
    pub room_type: RoomType,
    parent_ids: IndexSet<NodeId>,
    child_ids: IndexSet<NodeId>,
    /// Whether the node is selected
    pub selected: bool,
    /// Whether a primary-button drag that started on this node is in progress
    pub dragging: bool,
}

impl RoomNode {
    /// Create a node with a fresh ID
    pub fn new(rect: Rect, room_type: RoomType) -> Self {
        Self {
            id: NodeId::new(),
            rect,
            room_type,
            parent_ids: IndexSet::new(),
            child_ids: IndexSet::new(),
            selected: false,
            dragging: false,
        }
    }

    /// Create a node with its top-left corner at `position`
    pub fn at(position: Pos2, size: Vec2, room_type: RoomType) -> Self {
        Self::new(Rect::from_min_size(position, size), room_type)
    }

    /// Node ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Center of the node rectangle
    pub fn center(&self) -> Pos2 {
        self.rect.center()
    }

    /// Hit-test a point against the node rectangle
    pub fn contains(&self, point: Pos2) -> bool {
        self.rect.contains(point)
    }

    /// Nodes with an edge into this one
    pub fn parent_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.parent_ids.iter().copied()
    }

    /// Nodes this one has an edge to, in creation order
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.child_ids.iter().copied()
    }

    /// Whether `id` is a parent of this node
    pub fn has_parent(&self, id: NodeId) -> bool {
        self.parent_ids.contains(&id)
    }

    /// Whether `id` is a child of this node
    pub fn has_child(&self, id: NodeId) -> bool {
        self.child_ids.contains(&id)
    }

    /// Number of children
    pub fn child_count(&self) -> usize {
        self.child_ids.len()
    }

    /// Check whether `candidate` could be added as a child, without mutating
    pub fn can_accept_child(&self, candidate: NodeId) -> Result<(), LinkRejection> {
        if candidate == self.id {
            return Err(LinkRejection::SelfLoop);
        }
        if self.child_ids.contains(&candidate) {
            return Err(LinkRejection::Duplicate {
                parent: self.id,
                child: candidate,
            });
        }
        Ok(())
    }

    /// Add `candidate` as a child.
    ///
    /// Only the child list changes. [`RoomGraph::link`] pairs this with
    /// [`RoomNode::add_parent`] on the other node, and is the only way in
    /// from outside the crate.
    ///
    /// [`RoomGraph::link`]: crate::graph::RoomGraph::link
    pub(crate) fn try_accept_child(&mut self, candidate: NodeId) -> Result<(), LinkRejection> {
        self.can_accept_child(candidate)?;
        self.child_ids.insert(candidate);
        Ok(())
    }

    /// Record `parent` as a parent of this node
    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        debug_assert_ne!(parent, self.id);
        self.parent_ids.insert(parent);
    }

    /// Move the node by a canvas delta
    pub fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect.translate(delta);
    }

    /// Handle a pointer event routed to this node.
    ///
    /// Primary press toggles selection, primary drag moves the node and
    /// locks the drag until the primary release, secondary press asks for
    /// a connection drag.
    pub fn process_event(&mut self, event: &PointerEvent) -> NodeResponse {
        match (event.kind, event.button) {
            (PointerEventKind::Press, PointerButton::Primary) => {
                self.selected = !self.selected;
                NodeResponse::Changed
            }
            (PointerEventKind::Press, PointerButton::Secondary) => NodeResponse::BeginConnection,
            (PointerEventKind::Drag, PointerButton::Primary) => {
                self.dragging = true;
                self.translate(event.delta);
                NodeResponse::Changed
            }
            (PointerEventKind::Release, PointerButton::Primary) if self.dragging => {
                self.dragging = false;
                NodeResponse::Changed
            }
            _ => NodeResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> RoomNode {
        RoomNode::at(Pos2::new(0.0, 0.0), Vec2::new(160.0, 75.0), RoomType::None)
    }

    #[test]
    fn test_node_ids_are_unique() {
        let a = node();
        let b = node();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_accept_child_rejects_self_and_duplicates() {
        let mut a = node();
        let b = node();

        assert_eq!(a.try_accept_child(a.id()), Err(LinkRejection::SelfLoop));
        assert!(a.try_accept_child(b.id()).is_ok());
        assert!(matches!(
            a.try_accept_child(b.id()),
            Err(LinkRejection::Duplicate { .. })
        ));
        assert_eq!(a.child_count(), 1);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut a = node();
        let ids: Vec<_> = (0..4).map(|_| NodeId::new()).collect();
        for id in &ids {
            a.try_accept_child(*id).unwrap();
        }
        assert_eq!(a.child_ids().collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_primary_press_toggles_selection() {
        let mut a = node();
        let press = PointerEvent::press(PointerButton::Primary, Pos2::new(10.0, 10.0));
        assert_eq!(a.process_event(&press), NodeResponse::Changed);
        assert!(a.selected);
        a.process_event(&press);
        assert!(!a.selected);
    }

    #[test]
    fn test_primary_drag_moves_and_locks() {
        let mut a = node();
        let drag = PointerEvent::drag(PointerButton::Primary, Pos2::new(30.0, 20.0), Vec2::new(20.0, 10.0));
        a.process_event(&drag);
        assert!(a.dragging);
        assert_eq!(a.rect.min, Pos2::new(20.0, 10.0));
        assert_eq!(a.rect.size(), Vec2::new(160.0, 75.0));

        let release = PointerEvent::release(PointerButton::Primary, Pos2::new(30.0, 20.0));
        assert_eq!(a.process_event(&release), NodeResponse::Changed);
        assert!(!a.dragging);
    }

    #[test]
    fn test_secondary_press_begins_connection() {
        let mut a = node();
        let press = PointerEvent::press(PointerButton::Secondary, Pos2::new(10.0, 10.0));
        assert_eq!(a.process_event(&press), NodeResponse::BeginConnection);
        assert!(!a.selected);
    }

    #[test]
    fn test_contains() {
        let a = node();
        assert!(a.contains(Pos2::new(80.0, 40.0)));
        assert!(!a.contains(Pos2::new(200.0, 40.0)));
    }
}
