//! User interface components and rendering logic for the layout editor.
//!
//! This module contains the eframe application: toolbar, properties panel,
//! keyboard shortcuts and the canvas that forwards pointer input to the
//! [`LayoutEditor`](crate::gesture::LayoutEditor).
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main LayoutApp
//! - `canvas` - Pointer event dispatch from egui to the editor
//! - `rendering` - Drawing the grid, gesture preview and blocks

mod canvas;
mod rendering;
mod state;

pub use rendering::{block_corners, footprint_rect};
pub use state::LayoutApp;

use crate::constants::{DEFAULT_BLOCK_RGB, GRID_UNIT_SIZE_IN, GRID_UNIT_SIZE_MM, MAX_GRID_SIZE};
use crate::gesture::Command;
use crate::types::{BlockColor, Tool};
use crate::units::{parse_grid_size, UnitSystem};
use eframe::egui;

impl eframe::App for LayoutApp {
    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar, the properties panel and the canvas, and handles
    /// keyboard shortcuts before any of them draw.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_shortcut_keys(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let viewport_width = ctx.input(|i| i.screen_rect().width());
        let max_allowed = (viewport_width * 0.9).max(200.0);
        let clamped_width = self.properties_panel_width.clamp(200.0, max_allowed);

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(clamped_width)
            .show(ctx, |ui| {
                self.properties_panel_width = ui.available_width().clamp(200.0, max_allowed);
                self.draw_properties_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl LayoutApp {
    /// Handles single-key shortcuts for tools, rotation and deletion.
    ///
    /// Ignored while a text field has keyboard focus.
    fn handle_shortcut_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let commands = ctx.input(|i| {
            let mut commands = Vec::new();
            if i.modifiers.command {
                return commands;
            }
            if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
                commands.push(Command::DeleteSelected);
            }
            if i.key_pressed(egui::Key::R) {
                commands.push(if i.modifiers.shift {
                    Command::RotateCounterClockwise
                } else {
                    Command::RotateClockwise
                });
            }
            for (key, tool) in [
                (egui::Key::D, Tool::Draw),
                (egui::Key::E, Tool::Erase),
                (egui::Key::S, Tool::Select),
                (egui::Key::M, Tool::Move),
            ] {
                if i.key_pressed(key) {
                    commands.push(Command::SelectTool(tool));
                }
            }
            if i.key_pressed(egui::Key::Escape) {
                commands.push(Command::ClearSelection);
            }
            commands
        });
        for command in commands {
            self.editor.apply(command);
        }
    }

    /// Renders the top toolbar: units, tools, Clear All and view options.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Units:");
            let current_units = self.editor.config().unit_system();
            let mut units = current_units;
            for option in [UnitSystem::Metric, UnitSystem::Imperial] {
                ui.selectable_value(&mut units, option, option.label());
            }
            if units != current_units {
                self.editor.apply(Command::SetUnitSystem(units));
            }

            ui.separator();

            let current_tool = self.editor.tool();
            let mut tool = current_tool;
            for option in Tool::ALL {
                ui.selectable_value(&mut tool, option, option.label());
            }
            if tool != current_tool {
                self.editor.apply(Command::SelectTool(tool));
            }

            ui.separator();

            let label = egui::RichText::new("Clear All").color(egui::Color32::WHITE);
            let clear_all = egui::Button::new(label).fill(egui::Color32::from_rgb(239, 68, 68));
            if ui
                .add_enabled(!self.editor.store().is_empty(), clear_all)
                .clicked()
            {
                self.editor.apply(Command::ClearAll);
            }

            ui.separator();
            ui.checkbox(&mut self.dark_mode, "Dark Mode");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let count = self.editor.store().len();
                ui.label(format!(
                    "{count} block{}",
                    if count == 1 { "" } else { "s" }
                ));
                if let Some((x, y)) = self.interaction.hovered_cell {
                    ui.label(format!("Cell ({x}, {y})"));
                }
            });
        });
    }

    /// Renders the properties panel: grid settings, the selected block and instructions.
    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Grid");
                ui.separator();
                self.draw_grid_settings(ui);

                ui.add_space(12.0);
                ui.heading("Block");
                ui.separator();
                self.draw_block_properties(ui);

                ui.add_space(12.0);
                self.draw_instructions(ui);
            });
    }

    fn draw_grid_settings(&mut self, ui: &mut egui::Ui) {
        ui.label("Grid Width (units):");
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.grid_input.width_text).desired_width(64.0),
        );
        if response.lost_focus() {
            self.commit_grid_width();
        }
        ui.label(format!("Width: {}", self.editor.config().width_label()));

        ui.label("Grid Height (units):");
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.grid_input.height_text).desired_width(64.0),
        );
        if response.lost_focus() {
            self.commit_grid_height();
        }
        ui.label(format!("Height: {}", self.editor.config().height_label()));
    }

    /// Applies the width entry buffer to the grid, snapping invalid input to a bound.
    pub fn commit_grid_width(&mut self) {
        let value = parse_grid_size(&self.grid_input.width_text);
        self.editor.apply(Command::SetGridWidth(i64::from(value)));
        self.grid_input.width_text = self.editor.config().width_units().to_string();
    }

    /// Applies the height entry buffer to the grid, snapping invalid input to a bound.
    pub fn commit_grid_height(&mut self) {
        let value = parse_grid_size(&self.grid_input.height_text);
        self.editor.apply(Command::SetGridHeight(i64::from(value)));
        self.grid_input.height_text = self.editor.config().height_units().to_string();
    }

    fn draw_block_properties(&mut self, ui: &mut egui::Ui) {
        let selected = self.editor.selected_block().cloned();
        if selected.is_none() {
            ui.weak("Select a block to edit it.");
        }

        ui.add_enabled_ui(selected.is_some(), |ui| {
            ui.label("Nickname:");
            let mut nickname = selected
                .as_ref()
                .map(|b| b.nickname.clone())
                .unwrap_or_default();
            let response = ui.add(
                egui::TextEdit::singleline(&mut nickname)
                    .hint_text("Enter a nickname for this block"),
            );
            if response.changed() {
                self.editor.apply(Command::SetNickname(nickname));
            }

            ui.label("Dimensions:");
            let mut width = selected.as_ref().map_or(1, |b| i64::from(b.width));
            let mut height = selected.as_ref().map_or(1, |b| i64::from(b.height));
            let max = i64::from(MAX_GRID_SIZE);
            ui.horizontal(|ui| {
                if ui
                    .add(egui::DragValue::new(&mut width).range(1..=max))
                    .changed()
                {
                    self.editor.apply(Command::SetBlockWidth(width));
                }
                ui.label("×");
                if ui
                    .add(egui::DragValue::new(&mut height).range(1..=max))
                    .changed()
                {
                    self.editor.apply(Command::SetBlockHeight(height));
                }
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut rgb = selected
                    .as_ref()
                    .map_or(DEFAULT_BLOCK_RGB, |b| b.color.to_rgb());
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    self.editor.apply(Command::SetBlockColor(BlockColor::Rgb(rgb)));
                }
            });

            let rotation = selected.as_ref().map_or(0, |b| b.rotation_degrees);
            ui.label(format!("Rotation: {rotation}°"));
            ui.horizontal(|ui| {
                if ui.button("Rotate -90°").clicked() {
                    self.editor.apply(Command::RotateCounterClockwise);
                }
                if ui.button("Rotate +90°").clicked() {
                    self.editor.apply(Command::RotateClockwise);
                }
            });

            ui.add_space(6.0);
            if ui.button("Delete Selected").clicked() {
                self.editor.apply(Command::DeleteSelected);
            }
        });
    }

    fn draw_instructions(&mut self, ui: &mut egui::Ui) {
        let unit_size = match self.editor.config().unit_system() {
            UnitSystem::Metric => format!("{GRID_UNIT_SIZE_MM:.0}mm"),
            UnitSystem::Imperial => format!("{GRID_UNIT_SIZE_IN:.2} inches"),
        };
        egui::CollapsingHeader::new("Instructions")
            .default_open(true)
            .show(ui, |ui| {
                ui.label("• Draw (D): click and drag on empty cells to create a block");
                ui.label("• Move (M): drag a block around the grid");
                ui.label("• Erase (E): click a block, or drag an area, to remove blocks");
                ui.label("• Select (S): click a block to edit its properties");
                ui.label("• R / Shift+R rotates, Delete removes the selected block");
                ui.label(format!("• Each grid unit is {unit_size}"));
            });
    }

    /// Renders the grid surface and forwards pointer input on it to the editor.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (width, height) = self.editor.surface_size();
        // Solid bars sit beside the viewport instead of floating over the grid.
        ui.spacing_mut().scroll = egui::style::ScrollStyle::solid();
        egui::ScrollArea::both()
            .drag_to_scroll(false)
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let (surface, response) = ui
                    .allocate_exact_size(egui::vec2(width, height), egui::Sense::click_and_drag());
                self.interaction.surface_rect = Some(surface);

                self.handle_canvas_input(ui, surface);
                self.update_canvas_cursor(ui, &response);

                let painter = ui.painter_at(surface.expand(2.0));
                self.render_layout(&painter, surface);
            });
    }
}

#[cfg(test)]
mod tests;
