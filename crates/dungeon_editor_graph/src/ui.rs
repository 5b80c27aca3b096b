// SPDX-License-Identifier: MIT OR Apache-2.0
//! egui front end for the room graph editor.
//!
//! Translates raw egui pointer events into [`PointerEvent`]s in canvas
//! coordinates, feeds them to the [`InteractionController`], shows the
//! canvas context menu and paints the frame's draw list.

use crate::catalog::RoomTypeCatalog;
use crate::config::EditorConfig;
use crate::event::{PointerButton, PointerEvent};
use crate::graph::RoomGraph;
use crate::interaction::{ContextAction, EventOutcome, InteractionController};
use crate::policy::LinkPolicy;
use crate::render::{build_frame, DrawCommand, NodeStyle};
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

const NODE_ROUNDING: f32 = 6.0;
const NODE_LABEL_SIZE: f32 = 13.0;

const LINE_COLOR: Color32 = Color32::WHITE;
const NODE_FILL: Color32 = Color32::from_rgb(45, 45, 48);
const NODE_SELECTED_FILL: Color32 = Color32::from_rgb(60, 70, 90);
const NODE_OUTLINE: Color32 = Color32::from_rgb(90, 90, 96);
const NODE_SELECTED_OUTLINE: Color32 = Color32::from_rgb(100, 150, 255);

/// Open canvas context menu
#[derive(Debug, Clone)]
struct ContextMenu {
    /// Screen position of the menu's top-left corner
    screen_pos: Pos2,
    actions: Vec<ContextAction>,
    opened_this_frame: bool,
}

/// Room graph editor widget state
pub struct RoomGraphEditor {
    controller: InteractionController,
    last_pointer_pos: Option<Pos2>,
    held: [bool; 3],
    context_menu: Option<ContextMenu>,
    menu_rect: Option<Rect>,
}

impl RoomGraphEditor {
    /// Create an editor with the given settings
    pub fn new(config: EditorConfig) -> Self {
        Self {
            controller: InteractionController::new(config),
            last_pointer_pos: None,
            held: [false; 3],
            context_menu: None,
            menu_rect: None,
        }
    }

    /// Render the editor and process this frame's input
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        graph: &mut RoomGraph,
        catalog: &RoomTypeCatalog,
        policy: &dyn LinkPolicy,
    ) {
        let rect = ui.available_rect_before_wrap();
        let _response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let origin = rect.min.to_vec2();

        let raw_events = ui.input(|i| i.events.clone());
        for event in self.translate_events(&raw_events, rect) {
            let outcome = self.controller.handle_event(graph, policy, &event);
            if let EventOutcome::ContextMenu(actions) = outcome {
                self.context_menu = Some(ContextMenu {
                    screen_pos: event.position + origin,
                    actions,
                    opened_this_frame: true,
                });
            }
        }

        self.context_menu_ui(ui, graph, catalog);

        let config = self.controller.config().clone();
        for command in build_frame(graph, catalog, &config) {
            paint_command(&painter, &command, origin);
        }

        if self.controller.take_repaint_request() {
            ui.ctx().request_repaint();
        }
    }

    fn translate_events(&mut self, raw_events: &[egui::Event], canvas: Rect) -> Vec<PointerEvent> {
        let origin = canvas.min.to_vec2();
        let mut events = Vec::new();

        for raw in raw_events {
            match raw {
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let Some(button) = map_button(*button) else {
                        continue;
                    };
                    self.last_pointer_pos = Some(*pos);

                    // Presses outside the canvas or on the open menu are not ours
                    if *pressed && (!canvas.contains(*pos) || self.over_menu(*pos)) {
                        continue;
                    }
                    self.held[button_index(button)] = *pressed;
                    let position = *pos - origin;
                    events.push(if *pressed {
                        PointerEvent::press(button, position)
                    } else {
                        PointerEvent::release(button, position)
                    });
                }
                egui::Event::PointerMoved(pos) => {
                    let delta = self.last_pointer_pos.map_or(Vec2::ZERO, |last| *pos - last);
                    self.last_pointer_pos = Some(*pos);
                    let position = *pos - origin;

                    let held: Vec<_> = [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle]
                        .into_iter()
                        .filter(|b| self.held[button_index(*b)])
                        .collect();
                    if held.is_empty() {
                        events.push(PointerEvent::moved(position, delta));
                    }
                    for button in held {
                        events.push(PointerEvent::drag(button, position, delta));
                    }
                }
                egui::Event::PointerGone => {
                    self.last_pointer_pos = None;
                }
                _ => {}
            }
        }

        events
    }

    fn over_menu(&self, pos: Pos2) -> bool {
        self.context_menu.is_some() && self.menu_rect.is_some_and(|r| r.contains(pos))
    }

    fn context_menu_ui(&mut self, ui: &egui::Ui, graph: &mut RoomGraph, catalog: &RoomTypeCatalog) {
        let Some(menu) = self.context_menu.clone() else {
            self.menu_rect = None;
            return;
        };

        let mut chosen = None;
        let area = egui::Area::new(ui.id().with("room_graph_context_menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(menu.screen_pos)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    for action in &menu.actions {
                        if ui.button(action.label()).clicked() {
                            chosen = Some(*action);
                        }
                    }
                });
            });
        let menu_rect = area.response.rect;
        self.menu_rect = Some(menu_rect);

        if let Some(action) = chosen {
            self.choose_action(graph, catalog, action);
            return;
        }

        let dismissed = ui.input(|i| {
            i.key_pressed(egui::Key::Escape)
                || (i.pointer.any_pressed()
                    && i.pointer.interact_pos().is_some_and(|p| !menu_rect.contains(p)))
        });
        if dismissed && !menu.opened_this_frame {
            self.context_menu = None;
        } else if let Some(open) = &mut self.context_menu {
            open.opened_this_frame = false;
        }
    }

    /// Run a menu action and close the menu
    fn choose_action(&mut self, graph: &mut RoomGraph, catalog: &RoomTypeCatalog, action: ContextAction) {
        if let Err(e) = self.controller.invoke(graph, catalog, action) {
            tracing::warn!("Context action failed: {e}");
        }
        self.context_menu = None;
    }
}

impl Default for RoomGraphEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn button_index(button: PointerButton) -> usize {
    match button {
        PointerButton::Primary => 0,
        PointerButton::Secondary => 1,
        PointerButton::Middle => 2,
    }
}

fn paint_command(painter: &egui::Painter, command: &DrawCommand, origin: Vec2) {
    match command {
        DrawCommand::DragLine { from, to, width } => {
            painter.line_segment([*from + origin, *to + origin], Stroke::new(*width, LINE_COLOR));
        }
        DrawCommand::Edge { from, to, arrow, width } => {
            let stroke = Stroke::new(*width, LINE_COLOR);
            let head = arrow.head + origin;
            painter.line_segment([head, arrow.wing1 + origin], stroke);
            painter.line_segment([head, arrow.wing2 + origin], stroke);
            painter.line_segment([*from + origin, *to + origin], stroke);
        }
        DrawCommand::Node { rect, style, label, .. } => {
            let screen_rect = rect.translate(origin);
            let (fill, outline) = match style {
                NodeStyle::Normal => (NODE_FILL, Stroke::new(1.0, NODE_OUTLINE)),
                NodeStyle::Selected => (NODE_SELECTED_FILL, Stroke::new(2.0, NODE_SELECTED_OUTLINE)),
            };
            painter.rect_filled(screen_rect, NODE_ROUNDING, fill);
            painter.rect_stroke(screen_rect, NODE_ROUNDING, outline);
            painter.text(
                screen_rect.center(),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(NODE_LABEL_SIZE),
                Color32::WHITE,
            );
        }
    }
}
