// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the room graph editor.

use crate::catalog::RoomType;
use crate::node::NodeId;
use std::path::PathBuf;

/// Errors raised by editor actions outside the pointer event loop
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The catalog has no room type matching the requested role
    #[error("Room type catalog has no {0} type")]
    MissingRoomType(&'static str),

    /// The room type is not registered in the catalog
    #[error("Room type not registered: {0:?}")]
    UnregisteredRoomType(RoomType),

    /// A second entrance was requested while multiple entrances are disabled
    #[error("Graph already has an entrance node: {0:?}")]
    DuplicateEntrance(NodeId),
}

/// Reasons an edge insertion was refused.
///
/// These are expected outcomes of editing, not faults. The interaction
/// controller drops them silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkRejection {
    /// One of the endpoints is not in the graph
    #[error("Node not found: {0:?}")]
    UnknownNode(NodeId),

    /// Parent and child are the same node
    #[error("Self-loop not allowed")]
    SelfLoop,

    /// The edge already exists
    #[error("Edge already exists: {parent:?} -> {child:?}")]
    Duplicate {
        /// Parent side of the existing edge
        parent: NodeId,
        /// Child side of the existing edge
        child: NodeId,
    },

    /// Refused by the active link policy
    #[error("Rejected by link policy: {0}")]
    Policy(String),
}

/// Errors loading or saving editor configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("Config I/O error at {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for the config schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serializing the config failed
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// The file was written by a newer editor
    #[error("Config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version stored in the file
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },
}

/// Result type for editor actions
pub type Result<T> = std::result::Result<T, EditorError>;
