use serde::{Deserialize, Serialize};

/// Spacing and fallback tuning for the dependency engine's `serialize`
/// render model.
///
/// The grid-fallback values are presentation heuristics, not semantics —
/// callers with different canvases override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializeConfig {
    /// Horizontal distance between layers, in pixels.
    #[serde(default = "default_x_spacing")]
    pub x_spacing: f64,
    /// Vertical distance between nodes within a layer, in pixels.
    #[serde(default = "default_y_spacing")]
    pub y_spacing: f64,
    /// When the diagram collapses to a single layer with more than this
    /// many nodes, switch from one tall column to a grid.
    #[serde(default = "default_grid_threshold")]
    pub grid_threshold: usize,
    /// Number of columns in the single-layer grid fallback.
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            x_spacing: default_x_spacing(),
            y_spacing: default_y_spacing(),
            grid_threshold: default_grid_threshold(),
            grid_columns: default_grid_columns(),
        }
    }
}

/// Spacing and padding for the layered layout engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Left margin before the first layer, in pixels.
    #[serde(default = "default_padding_x")]
    pub padding_x: f64,
    /// Top margin before the tallest column, in pixels.
    #[serde(default = "default_padding_y")]
    pub padding_y: f64,
    /// Horizontal distance between layers, in pixels.
    #[serde(default = "default_layer_spacing")]
    pub layer_spacing: f64,
    /// Vertical distance between nodes within a layer, in pixels.
    #[serde(default = "default_node_spacing")]
    pub node_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding_x: default_padding_x(),
            padding_y: default_padding_y(),
            layer_spacing: default_layer_spacing(),
            node_spacing: default_node_spacing(),
        }
    }
}

fn default_x_spacing() -> f64 {
    250.0
}

fn default_y_spacing() -> f64 {
    120.0
}

fn default_grid_threshold() -> usize {
    10
}

fn default_grid_columns() -> usize {
    4
}

fn default_padding_x() -> f64 {
    60.0
}

fn default_padding_y() -> f64 {
    60.0
}

fn default_layer_spacing() -> f64 {
    280.0
}

fn default_node_spacing() -> f64 {
    110.0
}
