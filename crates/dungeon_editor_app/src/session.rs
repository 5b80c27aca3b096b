// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scripted pointer sessions.
//!
//! A session is a RON file listing pointer events and context menu choices.
//! Replaying it drives the interaction controller exactly as a user would,
//! without opening a window.

use dungeon_editor_graph::{
    AcceptAll, ConfigError, ContextAction, EditorConfig, EditorError, EventOutcome,
    InteractionController, LinkPolicy, MaxChildren, PointerEvent, RoomGraph, RoomType,
    RoomTypeCatalog,
};
use egui::Pos2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Replay errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the session file failed
    #[error("Failed to read session {path}: {source}")]
    Io {
        /// Session file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The session file is not valid RON
    #[error("Failed to parse session: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Loading the referenced editor config failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A scripted editor action failed
    #[error("Step {step}: {source}")]
    Editor {
        /// Index of the failing step
        step: usize,
        /// Underlying error
        #[source]
        source: EditorError,
    },

    /// A menu choice was scripted with no menu open
    #[error("Step {step}: no context menu item {index} is open")]
    NoContextMenu {
        /// Index of the failing step
        step: usize,
        /// Requested menu item
        index: usize,
    },
}

/// One scripted step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// Feed a pointer event to the controller
    Pointer(PointerEvent),
    /// Pick an item from the most recently opened context menu
    ChooseContextAction(usize),
    /// Create a room of a specific type, bypassing the menu
    CreateRoom {
        /// Top-left corner
        position: Pos2,
        /// Room type
        room_type: RoomType,
    },
}

/// A scripted editing session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Editor config file, relative to the session file
    pub config: Option<PathBuf>,
    /// Cap on children per room; unlimited when absent
    pub max_children: Option<usize>,
    /// Steps in order
    pub steps: Vec<Step>,
}

/// Summary of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Steps executed
    pub steps: usize,
    /// Edges created by connection drags
    pub linked: usize,
    /// Connection drags refused by a node or policy
    pub rejected: usize,
    /// Connection drags released over empty canvas
    pub dropped: usize,
}

impl Session {
    /// Parse a session from RON text
    pub fn from_ron(content: &str) -> Result<Self, SessionError> {
        Ok(ron::from_str(content)?)
    }

    /// Load a session file
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Resolve the editor config referenced by this session
    pub fn editor_config(&self, session_dir: &Path) -> Result<EditorConfig, SessionError> {
        match &self.config {
            Some(path) => Ok(EditorConfig::load(&session_dir.join(path))?),
            None => Ok(EditorConfig::default()),
        }
    }

    /// Replay every step against `graph`
    pub fn replay(
        &self,
        config: EditorConfig,
        graph: &mut RoomGraph,
        catalog: &RoomTypeCatalog,
    ) -> Result<ReplayReport, SessionError> {
        let policy: Box<dyn LinkPolicy> = match self.max_children {
            Some(max) => Box::new(MaxChildren(max)),
            None => Box::new(AcceptAll),
        };
        let mut controller = InteractionController::new(config);
        let mut menu: Vec<ContextAction> = Vec::new();
        let mut report = ReplayReport::default();

        for (step, action) in self.steps.iter().enumerate() {
            match action {
                Step::Pointer(event) => match controller.handle_event(graph, policy.as_ref(), event) {
                    EventOutcome::ContextMenu(actions) => menu = actions,
                    EventOutcome::Linked(_) => report.linked += 1,
                    EventOutcome::LinkRejected(_) => report.rejected += 1,
                    EventOutcome::ConnectionDropped => report.dropped += 1,
                    _ => {}
                },
                Step::ChooseContextAction(index) => {
                    let chosen = menu
                        .get(*index)
                        .copied()
                        .ok_or(SessionError::NoContextMenu { step, index: *index })?;
                    menu.clear();
                    controller
                        .invoke(graph, catalog, chosen)
                        .map_err(|source| SessionError::Editor { step, source })?;
                }
                Step::CreateRoom { position, room_type } => {
                    controller
                        .create_node_of_type(graph, catalog, *position, *room_type)
                        .map_err(|source| SessionError::Editor { step, source })?;
                }
            }
            report.steps += 1;
        }

        Ok(report)
    }
}
