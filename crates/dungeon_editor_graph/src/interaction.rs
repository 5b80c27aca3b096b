// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer event routing for the room graph editor.
//!
//! Every event is first hit-tested against the graph. It then goes either to
//! the hovered node's own handler or to graph-level handling:
//! - no node under the cursor, or a connection drag in progress: graph level
//! - otherwise: the hovered node
//!
//! A node that is being dragged stays hovered until its drag ends, even when
//! the cursor leaves it. While a connection drag is active the graph level
//! sees every event, so it decides whether a release completes an edge.

use crate::catalog::{RoomType, RoomTypeCatalog};
use crate::config::EditorConfig;
use crate::connection::Edge;
use crate::error::{EditorError, LinkRejection, Result};
use crate::event::{PointerButton, PointerEvent, PointerEventKind};
use crate::graph::RoomGraph;
use crate::node::{NodeId, NodeResponse, RoomNode};
use crate::policy::LinkPolicy;
use egui::Pos2;

/// Actions offered by the canvas context menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContextAction {
    /// Create a room node with its top-left corner at the position
    CreateRoomNode {
        /// Where the menu was opened
        position: Pos2,
    },
}

impl ContextAction {
    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateRoomNode { .. } => "Create Room Node",
        }
    }
}

/// Result of routing one pointer event
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Nothing happened
    Ignored,
    /// The event went to a node's own handler
    Forwarded {
        /// Node that received the event
        node: NodeId,
        /// What the node did
        response: NodeResponse,
    },
    /// The host should show these context actions at the cursor
    ContextMenu(Vec<ContextAction>),
    /// Connection drag cancelled and selection cleared
    SelectionCleared,
    /// The connection drag line moved
    ConnectionDragged {
        /// New tracked end of the drag line
        cursor: Pos2,
    },
    /// A connection drag ended in a new edge
    Linked(Edge),
    /// A connection drag ended over a node that refused the edge
    LinkRejected(LinkRejection),
    /// A connection drag ended over empty canvas
    ConnectionDropped,
}

/// Pointer event state machine.
///
/// Holds only transient interaction state; the graph, catalog and link
/// policy are passed to each call.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    config: EditorConfig,
    hovered: Option<NodeId>,
    repaint_requested: bool,
}

impl InteractionController {
    /// Create a controller with the given settings
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            hovered: None,
            repaint_requested: false,
        }
    }

    /// Active settings
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Node currently under the cursor, or locked by a drag
    pub fn hovered_node(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Take the pending redraw request, resetting it
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    /// Route one pointer event
    pub fn handle_event(
        &mut self,
        graph: &mut RoomGraph,
        policy: &dyn LinkPolicy,
        event: &PointerEvent,
    ) -> EventOutcome {
        self.update_hovered(graph, event.position);

        let hovered = self.hovered;
        match hovered {
            Some(node) if graph.pending_connection().is_none() => {
                self.forward_to_node(graph, node, event)
            }
            _ => self.handle_graph_event(graph, policy, event),
        }
    }

    fn update_hovered(&mut self, graph: &RoomGraph, position: Pos2) {
        let locked = self
            .hovered
            .and_then(|id| graph.lookup(id))
            .is_some_and(|node| node.dragging);

        if !locked {
            self.hovered = graph.node_at(position);
        }
    }

    fn forward_to_node(&mut self, graph: &mut RoomGraph, node: NodeId, event: &PointerEvent) -> EventOutcome {
        let Some(response) = graph.lookup_mut(node).map(|n| n.process_event(event)) else {
            self.hovered = None;
            return EventOutcome::Ignored;
        };

        match response {
            NodeResponse::Ignored => {}
            NodeResponse::Changed => self.request_repaint(),
            NodeResponse::BeginConnection => {
                if graph.begin_connection(node) {
                    tracing::debug!("Connection drag started from {:?}", node);
                }
                self.request_repaint();
            }
        }

        EventOutcome::Forwarded { node, response }
    }

    fn handle_graph_event(
        &mut self,
        graph: &mut RoomGraph,
        policy: &dyn LinkPolicy,
        event: &PointerEvent,
    ) -> EventOutcome {
        match (event.kind, event.button) {
            (PointerEventKind::Press, PointerButton::Secondary) => {
                EventOutcome::ContextMenu(vec![ContextAction::CreateRoomNode {
                    position: event.position,
                }])
            }

            (PointerEventKind::Press, PointerButton::Primary) => {
                graph.clear_connection();
                graph.clear_selection();
                self.request_repaint();
                EventOutcome::SelectionCleared
            }

            (PointerEventKind::Release, PointerButton::Secondary) => {
                let Some(pending) = graph.clear_connection() else {
                    return EventOutcome::Ignored;
                };
                self.request_repaint();

                let Some(target) = graph.node_at(event.position) else {
                    return EventOutcome::ConnectionDropped;
                };

                match graph.link(pending.source, target, policy) {
                    Ok(()) => {
                        tracing::info!("Linked room {:?} -> {:?}", pending.source, target);
                        EventOutcome::Linked(Edge::new(pending.source, target))
                    }
                    Err(rejection) => {
                        tracing::debug!("Edge {:?} -> {:?} refused: {}", pending.source, target, rejection);
                        EventOutcome::LinkRejected(rejection)
                    }
                }
            }

            (PointerEventKind::Drag, PointerButton::Secondary) => {
                if !graph.drag_connection(event.delta) {
                    return EventOutcome::Ignored;
                }
                self.request_repaint();
                match graph.pending_connection() {
                    Some(pending) => EventOutcome::ConnectionDragged {
                        cursor: pending.cursor,
                    },
                    None => EventOutcome::Ignored,
                }
            }

            _ => EventOutcome::Ignored,
        }
    }

    /// Run a context menu action, returning the IDs of created nodes
    pub fn invoke(
        &mut self,
        graph: &mut RoomGraph,
        catalog: &RoomTypeCatalog,
        action: ContextAction,
    ) -> Result<Vec<NodeId>> {
        match action {
            ContextAction::CreateRoomNode { position } => self.create_room_node(graph, catalog, position),
        }
    }

    /// Create a placeholder room at `position`.
    ///
    /// An empty graph first gets an entrance at the configured entrance
    /// position. Both catalog roles are resolved before anything is added.
    pub fn create_room_node(
        &mut self,
        graph: &mut RoomGraph,
        catalog: &RoomTypeCatalog,
        position: Pos2,
    ) -> Result<Vec<NodeId>> {
        let none_type = catalog.none_type()?;
        let entrance_type = if graph.is_empty() {
            Some(catalog.entrance_type()?)
        } else {
            None
        };

        let mut created = Vec::with_capacity(2);
        if let Some(entrance_type) = entrance_type {
            let entrance_position = self.config.entrance_position;
            created.push(self.create_node_of_type(graph, catalog, entrance_position, entrance_type)?);
        }
        created.push(self.create_node_of_type(graph, catalog, position, none_type)?);
        Ok(created)
    }

    /// Create a room of a given type at `position`
    pub fn create_node_of_type(
        &mut self,
        graph: &mut RoomGraph,
        catalog: &RoomTypeCatalog,
        position: Pos2,
        room_type: RoomType,
    ) -> Result<NodeId> {
        if catalog.get(room_type).is_none() {
            return Err(EditorError::UnregisteredRoomType(room_type));
        }
        if catalog.is_entrance(room_type) && !self.config.allow_multiple_entrances {
            if let Some(existing) = graph.entrance(catalog) {
                return Err(EditorError::DuplicateEntrance(existing));
            }
        }

        let id = graph.add(RoomNode::at(position, self.config.node_size, room_type));
        tracing::info!("Created {} room {:?} at ({}, {})", catalog.display_name(room_type), id, position.x, position.y);
        self.request_repaint();
        Ok(id)
    }
}
