//! Diagram configuration.
//!
//! Limits and presentation settings are supplied once when a [`crate::Diagram`]
//! is built and never change for the lifetime of that diagram.

use crate::constants;
use serde::{Deserialize, Serialize};

/// Limits and settings a diagram is constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Maximum number of grid rows
    pub max_rows: i32,
    /// Maximum number of grid columns
    pub max_columns: i32,
    /// Maximum block height in cells
    pub max_block_height: i32,
    /// Maximum block width in cells
    pub max_block_width: i32,
    /// Pointer travel (in pixels) needed to turn a press into a drag
    pub drag_threshold: f32,
    /// Size (in pixels) of rows/columns appended by a resize
    pub default_cell_size: f32,
    /// Block opacity while nothing is dragged
    pub node_opacity: f32,
    /// Opacity of blocks not involved in the current drag
    pub inactive_node_opacity: f32,
    /// Opacity of blocks overlapping the drag preview
    pub invalid_node_opacity: f32,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            max_rows: constants::MAX_ROWS,
            max_columns: constants::MAX_COLUMNS,
            max_block_height: constants::MAX_BLOCK_HEIGHT,
            max_block_width: constants::MAX_BLOCK_WIDTH,
            drag_threshold: constants::DRAG_THRESHOLD,
            default_cell_size: constants::DEFAULT_CELL_SIZE,
            node_opacity: constants::NODE_OPACITY,
            inactive_node_opacity: constants::INACTIVE_NODE_OPACITY,
            invalid_node_opacity: constants::INVALID_NODE_OPACITY,
        }
    }
}

impl DiagramConfig {
    /// Serialize the configuration to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks that every limit is positive.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is usable as-is, or a message naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), String> {
        let limits = [
            ("max_rows", self.max_rows),
            ("max_columns", self.max_columns),
            ("max_block_height", self.max_block_height),
            ("max_block_width", self.max_block_width),
        ];
        for (name, value) in limits {
            if value < 1 {
                return Err(format!("{name} must be at least 1, got {value}"));
            }
        }
        if !(self.default_cell_size >= 0.0) {
            return Err(format!(
                "default_cell_size must be non-negative, got {}",
                self.default_cell_size
            ));
        }
        if !(self.drag_threshold >= 0.0) {
            return Err(format!(
                "drag_threshold must be non-negative, got {}",
                self.drag_threshold
            ));
        }
        Ok(())
    }

    /// Returns a copy with every limit raised to at least 1 and negative sizes zeroed.
    pub fn normalized(mut self) -> Self {
        self.max_rows = self.max_rows.max(1);
        self.max_columns = self.max_columns.max(1);
        self.max_block_height = self.max_block_height.max(1);
        self.max_block_width = self.max_block_width.max(1);
        self.default_cell_size = self.default_cell_size.max(0.0);
        self.drag_threshold = self.drag_threshold.max(0.0);
        self
    }
}
