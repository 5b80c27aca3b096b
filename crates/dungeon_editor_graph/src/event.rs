// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canvas pointer events consumed by the interaction controller.

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Selection, node dragging, canvas clearing
    Primary,
    /// Connection dragging and the context menu
    Secondary,
    /// Unused by the editor
    Middle,
}

/// What happened to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    /// Button went down
    Press,
    /// Button went up
    Release,
    /// Pointer moved while the button is held
    Drag,
    /// Pointer moved with no button held
    Move,
}

/// A single pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Event kind
    pub kind: PointerEventKind,
    /// Button the event refers to (for `Move`, the button is ignored)
    pub button: PointerButton,
    /// Absolute cursor position
    pub position: Pos2,
    /// Motion since the previous event
    #[serde(default)]
    pub delta: Vec2,
}

impl PointerEvent {
    /// Button press at a position
    pub fn press(button: PointerButton, position: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Press,
            button,
            position,
            delta: Vec2::ZERO,
        }
    }

    /// Button release at a position
    pub fn release(button: PointerButton, position: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Release,
            button,
            position,
            delta: Vec2::ZERO,
        }
    }

    /// Drag with a held button, ending at `position` after moving by `delta`
    pub fn drag(button: PointerButton, position: Pos2, delta: Vec2) -> Self {
        Self {
            kind: PointerEventKind::Drag,
            button,
            position,
            delta,
        }
    }

    /// Plain pointer motion
    pub fn moved(position: Pos2, delta: Vec2) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button: PointerButton::Primary,
            position,
            delta,
        }
    }
}
