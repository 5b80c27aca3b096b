// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless host for the room graph editor.
//!
//! Replays a scripted pointer session through the interaction controller
//! and logs the resulting room graph:
//!
//! ```text
//! dungeon_editor path/to/session.ron
//! ```
//!
//! Set `RUST_LOG` to change verbosity (for example
//! `RUST_LOG=dungeon_editor_graph=debug` to see routing decisions).

mod session;

use dungeon_editor_graph::{RoomGraph, RoomTypeCatalog};
use session::{Session, SessionError};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dungeon_editor=info,dungeon_editor_graph=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dungeon editor v{}", env!("CARGO_PKG_VERSION"));

    let Some(session_path) = std::env::args().nth(1).map(PathBuf::from) else {
        tracing::error!("Usage: dungeon_editor <session.ron>");
        std::process::exit(2);
    };

    if let Err(e) = run(&session_path) {
        tracing::error!("Replay failed: {e}");
        std::process::exit(1);
    }
}

fn run(session_path: &Path) -> Result<(), SessionError> {
    let session = Session::load(session_path)?;
    let session_dir = session_path.parent().unwrap_or_else(|| Path::new("."));
    let config = session.editor_config(session_dir)?;
    let catalog = RoomTypeCatalog::dungeon();
    let mut graph = RoomGraph::new();

    let report = session.replay(config, &mut graph, &catalog)?;
    tracing::info!(
        "Replayed {} steps: {} linked, {} rejected, {} dropped",
        report.steps,
        report.linked,
        report.rejected,
        report.dropped
    );

    for node in graph.nodes() {
        let children: Vec<String> = node
            .child_ids()
            .filter_map(|id| graph.lookup(id))
            .map(|child| catalog.display_name(child.room_type))
            .collect();
        tracing::info!(
            "{} at ({}, {}) -> [{}]",
            catalog.display_name(node.room_type),
            node.rect.min.x,
            node.rect.min.y,
            children.join(", ")
        );
    }

    Ok(())
}
