//! Canvas rendering for the grid, the gesture preview and the placed blocks.
//!
//! The grid and the draw/erase preview are painted first; blocks are painted on
//! top in insertion order, with the block being dragged raised above the rest.

use super::state::LayoutApp;
use crate::constants::{
    BLOCK_STROKE_WIDTH, GRID_STROKE_WIDTH, PREVIEW_STROKE_WIDTH, SELECTED_STROKE_WIDTH,
};
use crate::types::{Block, GridRect, Tool};
use eframe::egui;
use eframe::egui::epaint::{StrokeKind, TextShape};

const DRAW_PREVIEW_RGB: [u8; 3] = [59, 130, 246];
const ERASE_PREVIEW_RGB: [u8; 3] = [239, 68, 68];
const PREVIEW_FILL_ALPHA: u8 = 77;
const SELECTED_OUTLINE: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

/// Screen-space corners of a block, rotated around its top-left corner.
///
/// Corners are returned clockwise starting at the (unmoved) top-left.
pub fn block_corners(block: &Block, cell_size: f32, origin: egui::Pos2) -> [egui::Pos2; 4] {
    let top_left = origin + egui::vec2(block.x as f32 * cell_size, block.y as f32 * cell_size);
    let size = egui::vec2(block.width as f32 * cell_size, block.height as f32 * cell_size);
    let rot = block_rotation(block);
    [
        top_left,
        top_left + rot * egui::vec2(size.x, 0.0),
        top_left + rot * size,
        top_left + rot * egui::vec2(0.0, size.y),
    ]
}

fn block_rotation(block: &Block) -> egui::emath::Rot2 {
    egui::emath::Rot2::from_angle((block.rotation_degrees as f32).to_radians())
}

/// Screen-space rectangle covered by a footprint on a surface starting at `origin`.
pub fn footprint_rect(footprint: GridRect, cell_size: f32, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(footprint.x as f32 * cell_size, footprint.y as f32 * cell_size),
        egui::vec2(
            footprint.width as f32 * cell_size,
            footprint.height as f32 * cell_size,
        ),
    )
}

impl LayoutApp {
    /// Renders the grid, the gesture preview and every block onto the canvas.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `surface` - Screen-space rectangle of the render surface
    pub fn render_layout(&self, painter: &egui::Painter, surface: egui::Rect) {
        self.draw_grid(painter, surface);
        self.draw_selection_preview(painter, surface);

        let blocks = self.editor.blocks();
        let selected = self.editor.selected_index();
        let dragged = self.editor.dragged_index();
        for (index, block) in blocks.iter().enumerate() {
            if Some(index) != dragged {
                self.draw_block(painter, surface.min, block, selected == Some(index));
            }
        }
        if let Some(block) = dragged.and_then(|index| blocks.get(index)) {
            self.draw_block(painter, surface.min, block, selected == dragged);
        }
    }

    /// Draws a line at every cell boundary: width+1 vertical and height+1 horizontal.
    pub fn draw_grid(&self, painter: &egui::Painter, surface: egui::Rect) {
        let cell = self.editor.cell_size();
        let config = self.editor.config();
        let grid_color = if self.dark_mode {
            egui::Color32::from_gray(80)
        } else {
            egui::Color32::from_gray(221)
        };
        let stroke = egui::Stroke::new(GRID_STROKE_WIDTH, grid_color);

        for column in 0..=config.width_units() {
            let x = surface.min.x + column as f32 * cell;
            painter.line_segment(
                [egui::pos2(x, surface.min.y), egui::pos2(x, surface.max.y)],
                stroke,
            );
        }
        for row in 0..=config.height_units() {
            let y = surface.min.y + row as f32 * cell;
            painter.line_segment(
                [egui::pos2(surface.min.x, y), egui::pos2(surface.max.x, y)],
                stroke,
            );
        }
    }

    /// Draws the in-progress draw/erase rectangle, tinted by the active tool.
    pub fn draw_selection_preview(&self, painter: &egui::Painter, surface: egui::Rect) {
        let Some(preview) = self.editor.selection_preview() else {
            return;
        };
        let [r, g, b] = match self.editor.tool() {
            Tool::Erase => ERASE_PREVIEW_RGB,
            _ => DRAW_PREVIEW_RGB,
        };
        let rect = footprint_rect(preview, self.editor.cell_size(), surface.min);
        painter.rect_filled(
            rect,
            0.0,
            egui::Color32::from_rgba_unmultiplied(r, g, b, PREVIEW_FILL_ALPHA),
        );
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(PREVIEW_STROKE_WIDTH, egui::Color32::from_rgb(r, g, b)),
            StrokeKind::Inside,
        );
    }

    /// Draws one block as a rotated, filled quad labelled with its name and size.
    fn draw_block(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        block: &Block,
        selected: bool,
    ) {
        let cell = self.editor.cell_size();
        let [r, g, b] = block.color.to_rgb();
        let fill = egui::Color32::from_rgb(r, g, b);
        let stroke = if selected {
            egui::Stroke::new(SELECTED_STROKE_WIDTH, SELECTED_OUTLINE)
        } else {
            egui::Stroke::new(
                BLOCK_STROKE_WIDTH,
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 51),
            )
        };
        let corners = block_corners(block, cell, origin);
        painter.add(egui::Shape::convex_polygon(corners.to_vec(), fill, stroke));

        // Labels rotate with the block around its centre.
        let rot = block_rotation(block);
        let center = corners[0]
            + rot * egui::vec2(block.width as f32 * cell / 2.0, block.height as f32 * cell / 2.0);
        let name = painter.layout_no_wrap(
            block.display_name().to_string(),
            egui::FontId::proportional(13.0),
            egui::Color32::WHITE,
        );
        let size = painter.layout_no_wrap(
            block.size_label(),
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );
        let name_offset = egui::vec2(-name.size().x / 2.0, -name.size().y);
        let size_offset = egui::vec2(-size.size().x / 2.0, 2.0);
        let angle = rot.angle();
        for (offset, galley) in [(name_offset, name), (size_offset, size)] {
            painter.add(
                TextShape::new(center + rot * offset, galley, egui::Color32::WHITE)
                    .with_angle(angle),
            );
        }
    }
}
