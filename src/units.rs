//! Grid dimensions and physical unit conversion.
//!
//! A grid unit is one standard storage module; its physical size depends on the
//! active [`UnitSystem`]. Grid sizes are always kept within
//! [`MIN_GRID_SIZE`]..=[`MAX_GRID_SIZE`].

use crate::constants::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GRID_UNIT_SIZE_IN, GRID_UNIT_SIZE_MM, MAX_GRID_SIZE,
    MIN_GRID_SIZE,
};
use serde::{Deserialize, Serialize};

/// Measurement system used for displayed physical sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Millimetres
    #[default]
    Metric,
    /// Inches
    Imperial,
}

impl UnitSystem {
    /// Physical size of one grid unit in this system.
    pub fn unit_size(self) -> f64 {
        match self {
            UnitSystem::Metric => GRID_UNIT_SIZE_MM,
            UnitSystem::Imperial => GRID_UNIT_SIZE_IN,
        }
    }

    /// Short unit suffix, e.g. `mm`.
    pub fn suffix(self) -> &'static str {
        match self {
            UnitSystem::Metric => "mm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Label used on the unit toggle buttons.
    pub fn label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "mm",
            UnitSystem::Imperial => "inches",
        }
    }

    /// The other unit system.
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }
}

/// Physical length of `grid_units` modules in the given unit system.
pub fn physical_size(grid_units: u32, units: UnitSystem) -> f64 {
    f64::from(grid_units) * units.unit_size()
}

/// Formats a physical length with one decimal place, e.g. `252.0`.
pub fn format_measurement(value: f64) -> String {
    format!("{value:.1}")
}

/// Clamps a requested grid size into the valid range.
pub fn clamp_grid_size(value: i64) -> u32 {
    value.clamp(i64::from(MIN_GRID_SIZE), i64::from(MAX_GRID_SIZE)) as u32
}

/// Parses free-form grid size input, snapping to the nearest valid bound.
///
/// Leading whitespace and a leading integer prefix are honoured (`"7 units"` is 7);
/// input without any leading digits snaps to the minimum.
pub fn parse_grid_size(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let prefix: String = digits.chars().take_while(char::is_ascii_digit).collect();
    if prefix.is_empty() {
        return MIN_GRID_SIZE;
    }
    // Overlong digit strings are simply too large.
    let magnitude = prefix.parse::<i64>().unwrap_or(i64::MAX);
    clamp_grid_size(if negative { -magnitude } else { magnitude })
}

/// Grid size and unit system for the current session.
///
/// Fields are private so the size bounds can only be changed through the
/// clamping setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    unit_system: UnitSystem,
    width_units: u32,
    height_units: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            width_units: DEFAULT_GRID_WIDTH,
            height_units: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl GridConfig {
    /// Creates a config, clamping both dimensions into the valid range.
    pub fn new(unit_system: UnitSystem, width_units: i64, height_units: i64) -> Self {
        Self {
            unit_system,
            width_units: clamp_grid_size(width_units),
            height_units: clamp_grid_size(height_units),
        }
    }

    /// Active unit system.
    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    /// Switches the unit system used for physical sizes.
    pub fn set_unit_system(&mut self, unit_system: UnitSystem) {
        self.unit_system = unit_system;
    }

    /// Grid width in units.
    pub fn width_units(&self) -> u32 {
        self.width_units
    }

    /// Grid height in units.
    pub fn height_units(&self) -> u32 {
        self.height_units
    }

    /// Sets the grid width, clamped into the valid range.
    pub fn set_width_units(&mut self, value: i64) {
        self.width_units = clamp_grid_size(value);
    }

    /// Sets the grid height, clamped into the valid range.
    pub fn set_height_units(&mut self, value: i64) {
        self.height_units = clamp_grid_size(value);
    }

    /// Physical grid width in the active unit system.
    pub fn physical_width(&self) -> f64 {
        physical_size(self.width_units, self.unit_system)
    }

    /// Physical grid height in the active unit system.
    pub fn physical_height(&self) -> f64 {
        physical_size(self.height_units, self.unit_system)
    }

    /// Display string for the physical width, e.g. `252.0 mm`.
    pub fn width_label(&self) -> String {
        format!(
            "{} {}",
            format_measurement(self.physical_width()),
            self.unit_system.suffix()
        )
    }

    /// Display string for the physical height, e.g. `168.0 mm`.
    pub fn height_label(&self) -> String {
        format!(
            "{} {}",
            format_measurement(self.physical_height()),
            self.unit_system.suffix()
        )
    }
}
