//! Tool and gesture state machine.
//!
//! [`LayoutEditor`] owns the grid configuration, the block store, the selection and
//! the in-progress gesture. Pointer input arrives as [`PointerEvent`]s in pixels
//! relative to the render surface; discrete input arrives as [`Command`]s. Both are
//! handled synchronously, in event order, on a single owner.

use crate::constants::{CELL_PIXEL_SIZE, MAX_GRID_SIZE, ROTATION_STEP_DEGREES};
use crate::geometry::{clamp, normalize_span, pixel_to_grid, rects_overlap, surface_contains};
use crate::store::BlockStore;
use crate::types::{Block, BlockColor, CellPos, GridRect, PixelPos, Tool};
use crate::units::{GridConfig, UnitSystem};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Raw pointer input, in pixels relative to the render surface's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down(PixelPos),
    /// Pointer moved, whether or not a button is held
    Move(PixelPos),
    /// Primary button released, anywhere
    Up,
}

/// Direction of a rotate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    /// +90 degrees
    Clockwise,
    /// -90 degrees
    CounterClockwise,
}

impl RotationDirection {
    fn delta(self) -> i32 {
        match self {
            RotationDirection::Clockwise => ROTATION_STEP_DEGREES,
            RotationDirection::CounterClockwise => -ROTATION_STEP_DEGREES,
        }
    }
}

/// Discrete editing commands issued by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch the active tool
    SelectTool(Tool),
    /// Rotate the selected block by +90 degrees
    RotateClockwise,
    /// Rotate the selected block by -90 degrees
    RotateCounterClockwise,
    /// Remove the selected block
    DeleteSelected,
    /// Remove every block
    ClearAll,
    /// Drop the current selection without changing any block
    ClearSelection,
    /// Use the given unit system for physical sizes
    SetUnitSystem(UnitSystem),
    /// Switch between metric and imperial
    ToggleUnits,
    /// Set the grid width (clamped)
    SetGridWidth(i64),
    /// Set the grid height (clamped)
    SetGridHeight(i64),
    /// Rename the selected block
    SetNickname(String),
    /// Resize the selected block horizontally (clamped)
    SetBlockWidth(i64),
    /// Resize the selected block vertically (clamped)
    SetBlockHeight(i64),
    /// Recolour the selected block
    SetBlockColor(BlockColor),
}

/// An in-progress draw or erase-area selection, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    /// Cell where the gesture started
    pub anchor: CellPos,
    /// Cell currently under the pointer
    pub current: CellPos,
}

impl DrawState {
    /// The rectangle spanned by the anchor and current cells.
    pub fn rect(&self) -> GridRect {
        normalize_span(self.anchor, self.current)
    }
}

/// An in-progress block move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Index of the block being moved
    pub block_index: usize,
    /// Pointer offset from the block's top-left corner, in pixels
    pub pointer_offset: PixelPos,
}

/// Transient gesture state; at most one gesture is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No pointer session in progress
    #[default]
    Idle,
    /// Draw or erase-area selection
    Drawing(DrawState),
    /// Block move
    Dragging(DragState),
}

/// What a single pointer event did to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing changed
    Ignored,
    /// Selection changed to the given index (or none)
    Selected(Option<usize>),
    /// A draw or erase-area selection started
    SelectionStarted,
    /// The in-progress selection rectangle changed
    SelectionResized,
    /// A block move started on the given index
    DragStarted(usize),
    /// The dragged block was repositioned
    Moved,
    /// A drag ended
    DragEnded,
    /// A new block was appended at the given index and selected
    Created(usize),
    /// The drawn footprint overlapped an existing block and was discarded
    Rejected,
    /// The given number of blocks were removed
    Erased(usize),
}

/// Interactive layout editing state: configuration, blocks, selection and gesture.
#[derive(Debug, Clone)]
pub struct LayoutEditor {
    config: GridConfig,
    store: BlockStore,
    selected: Option<usize>,
    tool: Tool,
    gesture: GestureState,
    cell_size: f32,
    rng: StdRng,
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::with_rng(GridConfig::default(), StdRng::from_os_rng())
    }
}

impl LayoutEditor {
    /// Creates an empty editor for the given grid.
    pub fn new(config: GridConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates an empty editor whose block colours come from a seeded generator.
    pub fn with_seed(config: GridConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GridConfig, rng: StdRng) -> Self {
        Self {
            config,
            store: BlockStore::new(),
            selected: None,
            tool: Tool::default(),
            gesture: GestureState::Idle,
            cell_size: CELL_PIXEL_SIZE,
            rng,
        }
    }

    /// Grid size and unit system.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The placed blocks.
    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    /// Immutable snapshot of the placed blocks for rendering.
    pub fn blocks(&self) -> Arc<Vec<Block>> {
        self.store.snapshot()
    }

    /// Index of the selected block, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected block, if any.
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.and_then(|index| self.store.get(index))
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Current gesture state.
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Rectangle of the in-progress draw/erase selection, if any.
    pub fn selection_preview(&self) -> Option<GridRect> {
        match self.gesture {
            GestureState::Drawing(draw) => Some(draw.rect()),
            _ => None,
        }
    }

    /// Index of the block currently being moved, if any.
    pub fn dragged_index(&self) -> Option<usize> {
        match self.gesture {
            GestureState::Dragging(drag) => Some(drag.block_index),
            _ => None,
        }
    }

    /// On-screen size of one grid cell, in pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Size of the render surface in pixels, as `(width, height)`.
    pub fn surface_size(&self) -> (f32, f32) {
        (
            self.config.width_units() as f32 * self.cell_size,
            self.config.height_units() as f32 * self.cell_size,
        )
    }

    fn on_surface(&self, pos: PixelPos) -> bool {
        let (width, height) = self.surface_size();
        surface_contains(pos, width, height)
    }

    /// Topmost block whose unrotated footprint contains `pos`.
    pub fn hit_test(&self, pos: PixelPos) -> Option<usize> {
        self.store
            .iter()
            .enumerate()
            .rev()
            .find(|(_, block)| block.footprint().contains_pixel(pos, self.cell_size))
            .map(|(index, _)| index)
    }

    /// Feeds one pointer event into the state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Starts a pointer session at `pos`.
    pub fn pointer_down(&mut self, pos: PixelPos) -> GestureOutcome {
        if !self.on_surface(pos) {
            return GestureOutcome::Ignored;
        }
        let cell = pixel_to_grid(pos, self.cell_size);

        if let Some(index) = self.hit_test(pos) {
            return match self.tool {
                Tool::Erase => {
                    self.remove_block(index);
                    GestureOutcome::Erased(1)
                }
                Tool::Move => {
                    let Some(block) = self.store.get(index) else {
                        return GestureOutcome::Ignored;
                    };
                    let pointer_offset = PixelPos::new(
                        pos.x - block.x as f32 * self.cell_size,
                        pos.y - block.y as f32 * self.cell_size,
                    );
                    self.gesture = GestureState::Dragging(DragState {
                        block_index: index,
                        pointer_offset,
                    });
                    self.selected = Some(index);
                    GestureOutcome::DragStarted(index)
                }
                Tool::Draw | Tool::Select => {
                    self.selected = Some(index);
                    GestureOutcome::Selected(Some(index))
                }
            };
        }

        self.selected = None;
        let starts_selection = match self.tool {
            Tool::Draw => true,
            Tool::Erase => !self.store.is_empty(),
            Tool::Select | Tool::Move => false,
        };
        if starts_selection {
            self.gesture = GestureState::Drawing(DrawState {
                anchor: cell,
                current: cell,
            });
            debug!("{:?} selection started at {:?}", self.tool, cell);
            GestureOutcome::SelectionStarted
        } else {
            GestureOutcome::Selected(None)
        }
    }

    /// Tracks the pointer while a gesture is active.
    pub fn pointer_move(&mut self, pos: PixelPos) -> GestureOutcome {
        if !self.on_surface(pos) {
            return GestureOutcome::Ignored;
        }
        match self.gesture {
            GestureState::Dragging(drag) => self.drag_to(drag, pos),
            GestureState::Drawing(draw) => {
                let current = pixel_to_grid(pos, self.cell_size);
                if current == draw.current {
                    return GestureOutcome::Ignored;
                }
                self.gesture = GestureState::Drawing(DrawState { current, ..draw });
                GestureOutcome::SelectionResized
            }
            GestureState::Idle => GestureOutcome::Ignored,
        }
    }

    fn drag_to(&mut self, drag: DragState, pos: PixelPos) -> GestureOutcome {
        let Some(block) = self.store.get(drag.block_index) else {
            self.gesture = GestureState::Idle;
            return GestureOutcome::Ignored;
        };
        let target = pixel_to_grid(
            PixelPos::new(pos.x - drag.pointer_offset.x, pos.y - drag.pointer_offset.y),
            self.cell_size,
        );
        let max_x = self.config.width_units() as i32 - block.width;
        let max_y = self.config.height_units() as i32 - block.height;
        let x = clamp(target.x, 0, max_x);
        let y = clamp(target.y, 0, max_y);
        if x == block.x && y == block.y {
            return GestureOutcome::Ignored;
        }
        match self.store.update(drag.block_index, |b| {
            b.x = x;
            b.y = y;
        }) {
            Ok(()) => GestureOutcome::Moved,
            Err(err) => {
                warn!("Dropping drag: {err}");
                self.gesture = GestureState::Idle;
                GestureOutcome::Ignored
            }
        }
    }

    /// Ends the current pointer session, committing any draw or erase-area selection.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::Dragging(_) => GestureOutcome::DragEnded,
            GestureState::Drawing(draw) => match self.tool {
                Tool::Draw => self.commit_draw(draw.rect()),
                Tool::Erase => self.commit_erase(draw.rect()),
                Tool::Select | Tool::Move => GestureOutcome::Ignored,
            },
        }
    }

    fn commit_draw(&mut self, footprint: GridRect) -> GestureOutcome {
        if self
            .store
            .iter()
            .any(|block| rects_overlap(&block.footprint(), &footprint))
        {
            debug!("Rejected block at {footprint:?}: overlaps an existing block");
            return GestureOutcome::Rejected;
        }
        let block = Block::new(footprint, BlockColor::random_pastel(&mut self.rng));
        debug!("Created block {} at {:?} ({})", block.id, footprint, block.color);
        let index = self.store.append(block);
        self.selected = Some(index);
        GestureOutcome::Created(index)
    }

    fn commit_erase(&mut self, area: GridRect) -> GestureOutcome {
        let removed = self
            .store
            .retain(|block| !rects_overlap(&block.footprint(), &area));
        if removed > 0 {
            self.selected = None;
            debug!("Erased {removed} block(s) in {area:?}");
        }
        GestureOutcome::Erased(removed)
    }

    /// Applies a discrete command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SelectTool(tool) => self.tool = tool,
            Command::RotateClockwise => self.rotate(RotationDirection::Clockwise),
            Command::RotateCounterClockwise => self.rotate(RotationDirection::CounterClockwise),
            Command::DeleteSelected => self.delete_selected(),
            Command::ClearAll => self.clear_all(),
            Command::ClearSelection => self.selected = None,
            Command::SetUnitSystem(units) => self.config.set_unit_system(units),
            Command::ToggleUnits => {
                let units = self.config.unit_system().toggled();
                self.config.set_unit_system(units);
            }
            Command::SetGridWidth(value) => self.config.set_width_units(value),
            Command::SetGridHeight(value) => self.config.set_height_units(value),
            Command::SetNickname(nickname) => self.update_selected(|b| b.nickname = nickname),
            Command::SetBlockWidth(value) => {
                let width = clamp_block_size(value);
                self.update_selected(|b| b.width = width);
            }
            Command::SetBlockHeight(value) => {
                let height = clamp_block_size(value);
                self.update_selected(|b| b.height = height);
            }
            Command::SetBlockColor(color) => self.update_selected(|b| b.color = color),
        }
    }

    /// Rotates the selected block by 90 degrees; no-op without a selection.
    pub fn rotate(&mut self, direction: RotationDirection) {
        self.update_selected(|b| b.rotate_by(direction.delta()));
    }

    /// Removes the selected block and clears the selection; no-op without a selection.
    pub fn delete_selected(&mut self) {
        if let Some(index) = self.selected {
            self.remove_block(index);
        }
    }

    /// Removes every block.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.selected = None;
        self.gesture = GestureState::Idle;
    }

    fn remove_block(&mut self, index: usize) {
        self.selected = None;
        // A drag holds an index that a removal would invalidate.
        if matches!(self.gesture, GestureState::Dragging(_)) {
            self.gesture = GestureState::Idle;
        }
        match self.store.remove_at(index) {
            Ok(block) => debug!("Removed block {} at index {index}", block.id),
            Err(err) => warn!("Remove failed: {err}"),
        }
    }

    fn update_selected(&mut self, mutator: impl FnOnce(&mut Block)) {
        let Some(index) = self.selected else {
            return;
        };
        if let Err(err) = self.store.update(index, mutator) {
            warn!("Clearing stale selection: {err}");
            self.selected = None;
        }
    }
}

fn clamp_block_size(value: i64) -> i32 {
    value.clamp(1, i64::from(MAX_GRID_SIZE)) as i32
}
