//! Application state management structures.
//!
//! This module contains the state structures that track the application's UI state
//! around the layout editor: text entry buffers, canvas pointer tracking and view
//! settings.

use crate::gesture::LayoutEditor;
use crate::units::GridConfig;
use eframe::egui;

/// Text buffers for the grid size entry fields.
///
/// Input is committed (and clamped) when the field loses focus or Enter is pressed;
/// until then the raw text is kept so the user can type freely.
#[derive(Debug, Clone, Default)]
pub struct GridInputState {
    /// Raw grid width entry
    pub width_text: String,
    /// Raw grid height entry
    pub height_text: String,
}

impl GridInputState {
    /// Resets both buffers to the config's current values.
    pub fn sync_from(&mut self, config: &GridConfig) {
        self.width_text = config.width_units().to_string();
        self.height_text = config.height_units().to_string();
    }
}

/// State related to pointer interaction with the canvas.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Whether the current pointer session started on the canvas
    pub pointer_session_active: bool,
    /// Cell under the pointer, for the status readout
    pub hovered_cell: Option<(i32, i32)>,
    /// Screen-space rectangle the surface occupied in the last frame
    pub surface_rect: Option<egui::Rect>,
}

/// The main application structure containing UI state and the layout editor.
///
/// This struct implements the `eframe::App` trait. Everything here lives for one
/// session; a fresh launch always starts from [`LayoutApp::default`].
pub struct LayoutApp {
    /// The editing core: grid, blocks, selection and gestures
    pub editor: LayoutEditor,
    /// Grid size entry buffers
    pub grid_input: GridInputState,
    /// Canvas pointer tracking
    pub interaction: InteractionState,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Current width of the properties panel
    pub properties_panel_width: f32,
}

impl Default for LayoutApp {
    fn default() -> Self {
        let editor = LayoutEditor::default();
        let mut grid_input = GridInputState::default();
        grid_input.sync_from(editor.config());
        Self {
            editor,
            grid_input,
            interaction: InteractionState::default(),
            dark_mode: true,
            properties_panel_width: 280.0,
        }
    }
}
