//! Shared application-wide constants.
//! Centralizes tweakable values used across layout logic, UI rendering and interactions.

// Grid bounds
/// Smallest grid width/height, in grid units.
pub const MIN_GRID_SIZE: u32 = 1;
/// Largest grid width/height, in grid units.
pub const MAX_GRID_SIZE: u32 = 21;
/// Grid width used for a fresh session.
pub const DEFAULT_GRID_WIDTH: u32 = 6;
/// Grid height used for a fresh session.
pub const DEFAULT_GRID_HEIGHT: u32 = 4;

// Physical module size
/// Size of one grid unit in millimetres (the standard Gridfinity pitch).
pub const GRID_UNIT_SIZE_MM: f64 = 42.0;
/// Size of one grid unit in inches.
pub const GRID_UNIT_SIZE_IN: f64 = 1.654;

// Drawing
/// On-screen size of one grid cell, in pixels.
pub const CELL_PIXEL_SIZE: f32 = 40.0;
/// Stroke width of the grid lines (in screen pixels).
pub const GRID_STROKE_WIDTH: f32 = 1.0;
/// Stroke width of the in-progress draw/erase rectangle outline.
pub const PREVIEW_STROKE_WIDTH: f32 = 2.0;
/// Stroke width of the outline around the selected block.
pub const SELECTED_STROKE_WIDTH: f32 = 2.0;
/// Stroke width of the outline around unselected blocks.
pub const BLOCK_STROKE_WIDTH: f32 = 1.0;

// Block colours
/// Saturation (percent) of freshly generated block colours.
pub const PASTEL_SATURATION: u8 = 70;
/// Lightness (percent) of freshly generated block colours.
pub const PASTEL_LIGHTNESS: u8 = 60;
/// Colour shown in the picker when nothing is selected.
pub const DEFAULT_BLOCK_RGB: [u8; 3] = [0x3B, 0x82, 0xF6];

// Rotation
/// Angle added or removed by a single rotate command, in degrees.
pub const ROTATION_STEP_DEGREES: i32 = 90;
