//! Pixel coordinate assignment.
//!
//! Layers become columns: `x = padding_x + layer × layer_spacing`. Each
//! column is vertically centered against the tallest column, then nodes
//! stack at `node_spacing` intervals. Nodes that never received a layer
//! get a deterministic fallback position in the left margin instead of
//! being dropped.

use waypoint_core::config::LayoutConfig;

/// Final placement for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    pub(crate) layer: usize,
    pub(crate) x: f64,
    pub(crate) y: f64,
}

/// Compute placements per node index.
///
/// `layers` holds ordered node indices; any node index absent from every
/// layer falls back to a stacked position at the left padding edge.
pub(crate) fn assign_coordinates(
    node_count: usize,
    layers: &[Vec<u32>],
    config: &LayoutConfig,
) -> Vec<Placement> {
    let max_rows = layers.iter().map(Vec::len).max().unwrap_or(0);
    let mut placements: Vec<Option<Placement>> = vec![None; node_count];

    for (layer_idx, layer) in layers.iter().enumerate() {
        let offset_y = to_f64(max_rows - layer.len()) * config.node_spacing / 2.0;
        for (row, &node) in layer.iter().enumerate() {
            placements[node as usize] = Some(Placement {
                layer: layer_idx,
                x: config.padding_x + to_f64(layer_idx) * config.layer_spacing,
                y: config.padding_y + offset_y + to_f64(row) * config.node_spacing,
            });
        }
    }

    let mut fallback_count = 0_usize;
    placements
        .into_iter()
        .map(|p| {
            p.unwrap_or_else(|| {
                let placement = Placement {
                    layer: 0,
                    x: config.padding_x,
                    y: config.padding_y + to_f64(fallback_count) * config.node_spacing,
                };
                fallback_count += 1;
                placement
            })
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(n: usize) -> f64 {
    n as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
