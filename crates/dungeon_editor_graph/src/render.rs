// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame draw list for the room graph.
//!
//! The draw list is backend independent. `ui` paints it with egui.

use crate::catalog::RoomTypeCatalog;
use crate::config::EditorConfig;
use crate::geometry::{edge_arrow, ArrowHead};
use crate::graph::RoomGraph;
use crate::node::NodeId;
use egui::{Pos2, Rect};

/// Visual style of a node, chosen only from its selection flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    /// Unselected node
    Normal,
    /// Selected node
    Selected,
}

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// In-progress connection drag line
    DragLine {
        /// Source node center
        from: Pos2,
        /// Tracked cursor position
        to: Pos2,
        /// Stroke width
        width: f32,
    },
    /// Parent -> child edge with its mid-line arrow
    Edge {
        /// Parent node center
        from: Pos2,
        /// Child node center
        to: Pos2,
        /// Arrowhead at the edge midpoint
        arrow: ArrowHead,
        /// Stroke width
        width: f32,
    },
    /// A room node
    Node {
        /// Node ID
        id: NodeId,
        /// Node rectangle
        rect: Rect,
        /// Style picked from the selection flag
        style: NodeStyle,
        /// Room type name
        label: String,
    },
}

/// Build the draw list for one frame: drag line, then edges, then nodes
pub fn build_frame(graph: &RoomGraph, catalog: &RoomTypeCatalog, config: &EditorConfig) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(graph.node_count() * 2 + 1);

    if let Some(pending) = graph.pending_connection() {
        if let Some(source) = graph.lookup(pending.source) {
            commands.push(DrawCommand::DragLine {
                from: source.center(),
                to: pending.cursor,
                width: config.connecting_line_width,
            });
        }
    }

    for parent in graph.nodes() {
        for child_id in parent.child_ids() {
            let Some(child) = graph.lookup(child_id) else {
                continue;
            };
            let (from, to) = (parent.center(), child.center());
            if let Some(arrow) = edge_arrow(from, to, config.arrow_size) {
                commands.push(DrawCommand::Edge {
                    from,
                    to,
                    arrow,
                    width: config.connecting_line_width,
                });
            }
        }
    }

    for node in graph.nodes() {
        commands.push(DrawCommand::Node {
            id: node.id(),
            rect: node.rect,
            style: if node.selected { NodeStyle::Selected } else { NodeStyle::Normal },
            label: catalog.display_name(node.room_type),
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoomType;
    use crate::node::RoomNode;
    use crate::policy::AcceptAll;
    use egui::Vec2;

    fn room(x: f32, y: f32) -> RoomNode {
        RoomNode::at(Pos2::new(x, y), Vec2::new(160.0, 75.0), RoomType::None)
    }

    fn render(graph: &RoomGraph) -> Vec<DrawCommand> {
        build_frame(graph, &RoomTypeCatalog::dungeon(), &EditorConfig::default())
    }

    #[test]
    fn test_empty_graph_draws_nothing() {
        assert!(render(&RoomGraph::new()).is_empty());
    }

    #[test]
    fn test_draw_order_and_styles() {
        let mut graph = RoomGraph::new();
        let a = graph.add(room(0.0, 0.0));
        let b = graph.add(room(400.0, 0.0));
        graph.link(a, b, &AcceptAll).unwrap();
        graph.lookup_mut(b).unwrap().selected = true;
        graph.begin_connection(b);

        let commands = render(&graph);
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::DragLine { .. }));
        let DrawCommand::Edge { from, to, arrow, width } = &commands[1] else {
            panic!("expected edge, got {:?}", commands[1]);
        };
        assert_eq!(*from, Pos2::new(80.0, 37.5));
        assert_eq!(*to, Pos2::new(480.0, 37.5));
        assert_eq!(arrow.head, Pos2::new(286.0, 37.5));
        assert_eq!(*width, 3.0);

        assert!(matches!(
            &commands[2],
            DrawCommand::Node { id, style: NodeStyle::Normal, label, .. } if *id == a && label == "None"
        ));
        assert!(matches!(
            &commands[3],
            DrawCommand::Node { id, style: NodeStyle::Selected, .. } if *id == b
        ));
    }

    #[test]
    fn test_drag_line_only_while_pending() {
        let mut graph = RoomGraph::new();
        let a = graph.add(room(0.0, 0.0));
        let has_drag_line = |graph: &RoomGraph| {
            render(graph)
                .iter()
                .any(|c| matches!(c, DrawCommand::DragLine { .. }))
        };

        assert!(!has_drag_line(&graph));
        graph.begin_connection(a);
        graph.drag_connection(Vec2::new(50.0, 0.0));
        let commands = render(&graph);
        assert_eq!(
            commands[0],
            DrawCommand::DragLine {
                from: Pos2::new(80.0, 37.5),
                to: Pos2::new(130.0, 37.5),
                width: 3.0,
            }
        );
        graph.clear_connection();
        assert!(!has_drag_line(&graph));
    }

    #[test]
    fn test_stale_and_degenerate_edges_skipped() {
        let mut graph = RoomGraph::new();
        let a = graph.add(room(0.0, 0.0));
        let b = graph.add(room(0.0, 0.0));
        let gone = graph.add(room(400.0, 0.0));
        graph.link(a, b, &AcceptAll).unwrap();
        graph.link(a, gone, &AcceptAll).unwrap();
        graph.edit_nodes(|nodes| nodes.retain(|node| node.id() != gone));

        // Same centers, and one child that is no longer in the graph
        let commands = render(&graph);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Edge { .. })));
        assert_eq!(commands.len(), 2);
    }
}
