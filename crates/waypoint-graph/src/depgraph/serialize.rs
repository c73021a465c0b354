//! Layered render model for the enforced-acyclic graph.
//!
//! # Overview
//!
//! Converts the stored collection into `{ nodes, edges }` with pixel
//! coordinates: topological sort, longest-path depth per node
//! (`1 + max(depth of dependencies)`), layers grouped by depth, and a
//! column per layer. A diagram that collapses to a single layer with many
//! nodes would render as one degenerate tall column, so past a
//! configurable threshold it switches to a fixed-column grid instead.

use serde::{Deserialize, Serialize};

use waypoint_core::config::SerializeConfig;
use waypoint_core::error::{Error, Result};
use waypoint_core::model::{Collection, Status};

use crate::depgraph::topo::{DepIndex, cycle_detail};

/// A positioned node in the render model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub x: f64,
    pub y: f64,
}

/// A rendered edge, pointing from a dependency to its dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub from: String,
    pub to: String,
}

/// The full render model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

/// Build the layered render model for `collection`.
///
/// # Errors
///
/// Returns [`Error::UnresolvedCycle`] if the stored graph contains a
/// cycle — the render model is only defined for a DAG.
pub fn render(collection: &Collection, config: &SerializeConfig) -> Result<RenderGraph> {
    let index = DepIndex::from_collection(collection);
    let order = match index.kahn() {
        Ok(order) => order,
        Err(remaining) => {
            return Err(Error::UnresolvedCycle {
                detail: cycle_detail(collection, &index, &remaining),
            });
        }
    };

    // Longest-path depth, computed in topological order so every
    // dependency's depth is already known. Nodes whose dependencies all
    // failed to resolve default to depth 0.
    let mut depth: Vec<usize> = vec![0; collection.len()];
    for &node in &order {
        let deps = &index.deps[node as usize];
        depth[node as usize] = deps
            .iter()
            .map(|&d| depth[d as usize] + 1)
            .max()
            .unwrap_or(0);
    }

    // Group into layers by depth; within a layer, topological order.
    let layer_count = depth.iter().map(|&d| d + 1).max().unwrap_or(0);
    let mut layers: Vec<Vec<u32>> = vec![Vec::new(); layer_count];
    for &node in &order {
        layers[depth[node as usize]].push(node);
    }

    let single_layer_grid =
        layers.len() == 1 && layers[0].len() > config.grid_threshold && config.grid_columns > 0;

    let mut nodes = Vec::with_capacity(collection.len());
    for (layer_idx, layer) in layers.iter().enumerate() {
        for (row, &node) in layer.iter().enumerate() {
            let (x, y) = if single_layer_grid {
                grid_position(row, config)
            } else {
                (
                    to_f64(layer_idx) * config.x_spacing,
                    to_f64(row) * config.y_spacing,
                )
            };
            let outcome = &collection.outcomes[node as usize];
            nodes.push(RenderNode {
                id: outcome.id.clone(),
                title: outcome.title.clone(),
                status: outcome.status,
                x,
                y,
            });
        }
    }

    // Mirror every resolvable dependency entry as dependency → dependent.
    let mut edges = Vec::new();
    for outcome in &collection.outcomes {
        for dep in &outcome.dependencies {
            if index.interner.get(dep).is_some() {
                edges.push(RenderEdge {
                    from: dep.clone(),
                    to: outcome.id.clone(),
                });
            }
        }
    }

    Ok(RenderGraph { nodes, edges })
}

fn grid_position(row: usize, config: &SerializeConfig) -> (f64, f64) {
    let col = row % config.grid_columns;
    let grid_row = row / config.grid_columns;
    (
        to_f64(col) * config.x_spacing,
        to_f64(grid_row) * config.y_spacing,
    )
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(n: usize) -> f64 {
    n as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
