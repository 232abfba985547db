//! Core data types for the layout editor.
//!
//! This module defines the fundamental value types used throughout the application:
//! grid and pixel positions, footprints, tools, block colours and the blocks themselves.

use crate::constants::{PASTEL_LIGHTNESS, PASTEL_SATURATION};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for placed blocks.
pub type BlockId = Uuid;

/// A cell coordinate on the layout grid (top-left origin, grid-unit granularity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

impl CellPos {
    /// Creates a new cell position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A pointer position in pixels, relative to the render surface's origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPos {
    /// Horizontal offset in pixels
    pub x: f32,
    /// Vertical offset in pixels
    pub y: f32,
}

impl PixelPos {
    /// Creates a new pixel position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in grid-cell coordinates.
///
/// `width` and `height` are at least 1 for every footprint produced by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in grid units
    pub width: i32,
    /// Height in grid units
    pub height: i32,
}

impl GridRect {
    /// Creates a new rectangle from its top-left cell and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (inclusive).
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge (inclusive).
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true if the given cell lies inside the rectangle.
    pub fn contains_cell(&self, cell: CellPos) -> bool {
        cell.x >= self.left()
            && cell.x < self.right()
            && cell.y >= self.top()
            && cell.y < self.bottom()
    }

    /// Returns true if the pixel position lies inside the rectangle's on-screen area.
    ///
    /// Both pixel edges are inclusive, so a pointer exactly on the far border still hits.
    pub fn contains_pixel(&self, pos: PixelPos, cell_size: f32) -> bool {
        let left = self.left() as f32 * cell_size;
        let top = self.top() as f32 * cell_size;
        let right = self.right() as f32 * cell_size;
        let bottom = self.bottom() as f32 * cell_size;
        pos.x >= left && pos.x <= right && pos.y >= top && pos.y <= bottom
    }
}

/// The active interaction mode governing how pointer gestures are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Drag out a new block on empty cells
    #[default]
    Draw,
    /// Click a block, or drag an area, to remove blocks
    Erase,
    /// Click a block to select it for editing
    Select,
    /// Drag a block to a new position
    Move,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 4] = [Tool::Draw, Tool::Erase, Tool::Select, Tool::Move];

    /// Human-readable name used on toolbar buttons.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Draw => "Draw",
            Tool::Erase => "Erase",
            Tool::Select => "Select",
            Tool::Move => "Move",
        }
    }
}

/// Fill colour of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    /// HSL colour; hue in degrees, saturation and lightness in percent
    Hsl {
        /// Hue in `0..360`
        hue: u16,
        /// Saturation in `0..=100`
        saturation: u8,
        /// Lightness in `0..=100`
        lightness: u8,
    },
    /// Explicit sRGB colour chosen by the user
    Rgb([u8; 3]),
}

impl BlockColor {
    /// Generates a pastel colour with a random hue and fixed saturation/lightness.
    pub fn random_pastel(rng: &mut impl Rng) -> Self {
        BlockColor::Hsl {
            hue: rng.random_range(0..360),
            saturation: PASTEL_SATURATION,
            lightness: PASTEL_LIGHTNESS,
        }
    }

    /// Converts the colour to 8-bit sRGB components.
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            BlockColor::Rgb(rgb) => rgb,
            BlockColor::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(
                f32::from(hue % 360),
                f32::from(saturation.min(100)) / 100.0,
                f32::from(lightness.min(100)) / 100.0,
            ),
        }
    }
}

impl fmt::Display for BlockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockColor::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
            BlockColor::Rgb([r, g, b]) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// A user-placed rectangle on the layout grid.
///
/// Position and size are in grid units. Rotation is display-only and never
/// affects the footprint used for hit-testing or overlap checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identifier, assigned at creation
    pub id: BlockId,
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in grid units (at least 1)
    pub width: i32,
    /// Height in grid units (at least 1)
    pub height: i32,
    /// Fill colour
    pub color: BlockColor,
    /// Optional user label
    pub nickname: String,
    /// Display rotation around the top-left corner, normalized into `0..360`
    pub rotation_degrees: i32,
}

impl Block {
    /// Creates an unrotated, unnamed block covering `footprint`.
    pub fn new(footprint: GridRect, color: BlockColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: footprint.x,
            y: footprint.y,
            width: footprint.width,
            height: footprint.height,
            color,
            nickname: String::new(),
            rotation_degrees: 0,
        }
    }

    /// The axis-aligned area this block occupies, ignoring rotation.
    pub fn footprint(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.width, self.height)
    }

    /// Adds `delta` degrees to the rotation, keeping it within `0..360`.
    pub fn rotate_by(&mut self, delta: i32) {
        self.rotation_degrees = (self.rotation_degrees + delta).rem_euclid(360);
    }

    /// Label shown on the block; falls back to "Block" when no nickname is set.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            "Block"
        } else {
            &self.nickname
        }
    }

    /// Size label such as `2x3`.
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}
