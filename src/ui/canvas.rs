//! Canvas input dispatch.
//!
//! Raw egui pointer events are translated into surface-local [`PointerEvent`]s and
//! fed to the layout editor in the order they arrived. A pointer session starts only
//! when the primary button goes down over the visible surface with nothing layered
//! on top of it; after that, moves and the final release are forwarded no matter
//! where the pointer is, so a drag keeps going when the pointer leaves the canvas.

use super::state::LayoutApp;
use crate::geometry::pixel_to_grid;
use crate::gesture::PointerEvent;
use crate::types::{PixelPos, Tool};
use eframe::egui;

/// Pointer input relevant to the canvas, in screen space.
#[derive(Debug, Clone, Copy)]
enum CanvasInput {
    Moved(egui::Pos2),
    Pressed(egui::Pos2),
    Released,
}

impl LayoutApp {
    /// Converts a screen position to a position relative to the surface origin.
    pub fn screen_to_surface(surface: egui::Rect, screen_pos: egui::Pos2) -> PixelPos {
        PixelPos::new(screen_pos.x - surface.min.x, screen_pos.y - surface.min.y)
    }

    /// Forwards this frame's pointer events to the editor.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI hosting the canvas
    /// * `surface` - Screen-space rectangle of the render surface
    pub fn handle_canvas_input(&mut self, ui: &egui::Ui, surface: egui::Rect) {
        // The clip rect bleeds past the scroll viewport by the visuals' margin.
        let viewport = ui.clip_rect().shrink(ui.visuals().clip_rect_margin);
        let visible = surface.intersect(viewport);
        let inputs: Vec<CanvasInput> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerMoved(pos) => Some(CanvasInput::Moved(*pos)),
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed: true,
                        ..
                    } => Some(CanvasInput::Pressed(*pos)),
                    egui::Event::PointerButton {
                        button: egui::PointerButton::Primary,
                        pressed: false,
                        ..
                    } => Some(CanvasInput::Released),
                    _ => None,
                })
                .collect()
        });

        for input in inputs {
            match input {
                CanvasInput::Moved(pos) => {
                    let local = Self::screen_to_surface(surface, pos);
                    self.update_hovered_cell(visible.contains(pos).then_some(local));
                    if self.interaction.pointer_session_active {
                        self.editor.handle_pointer(PointerEvent::Move(local));
                    }
                }
                CanvasInput::Pressed(pos) => {
                    if self.interaction.pointer_session_active
                        || !Self::press_targets_surface(ui, visible, pos)
                    {
                        continue;
                    }
                    let local = Self::screen_to_surface(surface, pos);
                    self.interaction.pointer_session_active = true;
                    self.editor.handle_pointer(PointerEvent::Down(local));
                }
                CanvasInput::Released => {
                    if !self.interaction.pointer_session_active {
                        continue;
                    }
                    self.interaction.pointer_session_active = false;
                    self.editor.handle_pointer(PointerEvent::Up);
                }
            }
        }
    }

    /// True when a press at `pos` lands on the visible surface and not on a
    /// window or popup layered above it.
    fn press_targets_surface(ui: &egui::Ui, visible: egui::Rect, pos: egui::Pos2) -> bool {
        visible.contains(pos)
            && ui
                .ctx()
                .layer_id_at(pos)
                .is_none_or(|layer| layer == ui.layer_id())
    }

    fn update_hovered_cell(&mut self, local: Option<PixelPos>) {
        self.interaction.hovered_cell = local.map(|pos| {
            let cell = pixel_to_grid(pos, self.editor.cell_size());
            (cell.x, cell.y)
        });
    }

    /// Picks a cursor matching the active tool while the pointer is over the canvas.
    pub fn update_canvas_cursor(&self, ui: &egui::Ui, response: &egui::Response) {
        if self.editor.dragged_index().is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            return;
        }
        let Some(hover) = response.hover_pos() else {
            return;
        };
        let over_block = self
            .editor
            .hit_test(Self::screen_to_surface(response.rect, hover))
            .is_some();
        let icon = match (self.editor.tool(), over_block) {
            (Tool::Move, true) => egui::CursorIcon::Grab,
            (_, true) => egui::CursorIcon::PointingHand,
            (_, false) => egui::CursorIcon::Crosshair,
        };
        ui.ctx().set_cursor_icon(icon);
    }
}
