// SPDX-License-Identifier: MIT OR Apache-2.0
//! Room node graph editor for laying out dungeon levels.
//!
//! Rooms are rectangles on a 2-D canvas. Directed parent -> child edges are
//! made by dragging a connection from one room to another with the
//! secondary mouse button.
//!
//! ## Architecture
//!
//! - [`graph::RoomGraph`] owns the rooms, their ID index and the connection
//!   being dragged
//! - [`interaction::InteractionController`] routes pointer events to the
//!   canvas, a hovered room, or the connection drag
//! - [`geometry`] computes the mid-line arrowheads of edges
//! - [`render::build_frame`] turns the graph into a draw list
//! - [`ui::RoomGraphEditor`] hosts all of it in egui

pub mod catalog;
pub mod config;
pub mod connection;
pub mod error;
pub mod event;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod node;
pub mod policy;
pub mod render;
pub mod ui;

pub use catalog::{RoomType, RoomTypeCatalog, RoomTypeInfo};
pub use config::EditorConfig;
pub use connection::{Edge, PendingConnection};
pub use error::{ConfigError, EditorError, LinkRejection};
pub use event::{PointerButton, PointerEvent, PointerEventKind};
pub use geometry::{compute_arrow, ArrowHead};
pub use graph::RoomGraph;
pub use interaction::{ContextAction, EventOutcome, InteractionController};
pub use node::{NodeId, NodeResponse, RoomNode};
pub use policy::{AcceptAll, LinkPolicy, MaxChildren};
pub use ui::RoomGraphEditor;
