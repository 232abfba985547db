//! # Gridfinity Layout
//!
//! A 2D layout editor for Gridfinity storage baseplates. The baseplate is a grid of
//! 42 mm units; rectangular bins ("blocks") are drawn onto it, moved, rotated,
//! recoloured, nicknamed and erased, while the physical size of the grid is shown in
//! millimetres or inches.
//!
//! ## Features
//! - Draw, Erase, Select and Move tools driven by a single gesture state machine
//! - Overlap-free block creation with random pastel colours
//! - Drag-to-move with clamping to the grid bounds
//! - Metric and imperial readouts of the baseplate size
//! - Keyboard shortcuts for tools, rotation and deletion

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod geometry;
pub mod gesture;
pub mod store;
pub mod types;
pub mod units;
mod ui;

// Re-export public types and functions
pub use gesture::{Command, GestureOutcome, GestureState, LayoutEditor, PointerEvent};
pub use store::{BlockStore, StoreError};
pub use types::*;
pub use ui::{block_corners, footprint_rect, LayoutApp};
pub use units::{GridConfig, UnitSystem};

/// Runs the layout editor with default window settings.
///
/// Every launch starts from an empty 6×4 metric grid; nothing is carried over
/// from a previous session.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use gridfinity_layout::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Gridfinity Layout"),
        ..Default::default()
    };
    eframe::run_native(
        "Gridfinity Layout",
        options,
        Box::new(|_cc| Ok(Box::new(LayoutApp::default()))),
    )
}
