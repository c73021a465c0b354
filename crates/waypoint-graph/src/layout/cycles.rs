//! Back-edge classification for the tolerant flow graph.
//!
//! # Overview
//!
//! The flow graph may legitimately contain cycles (iterative value
//! loops). Layering needs a DAG, so a DFS classifies every edge as
//! *forward* or *back*: an edge into a node currently on the traversal
//! stack closes a cycle and is a back edge. Back edges are excluded from
//! layering only — they are restored into the final output so the cycle
//! still renders.
//!
//! # Design
//!
//! The DFS runs on an explicit frame stack, not recursion, so adversarial
//! input (a ten-thousand-node chain) cannot exhaust the call stack.
//! Roots are tried in node input order and neighbors in edge input
//! order, which keeps classification deterministic for identical input.

/// DFS colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited.
    White,
    /// Currently on the DFS stack (in progress).
    Gray,
    /// Fully processed.
    Black,
}

/// An outgoing edge in the filtered adjacency list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Neighbor {
    /// Graph index of the edge target.
    pub(crate) target: u32,
    /// Index of this edge in the filtered edge list.
    pub(crate) edge: usize,
}

/// Classify every filtered edge; returns `is_back[edge_index]`.
pub(crate) fn classify_back_edges(
    node_count: usize,
    adjacency: &[Vec<Neighbor>],
    edge_count: usize,
) -> Vec<bool> {
    let mut is_back = vec![false; edge_count];
    let mut color = vec![Color::White; node_count];

    // Explicit frame stack: (node, index of next neighbor to visit).
    let mut stack: Vec<(u32, usize)> = Vec::new();

    for root in 0..node_count {
        if color[root] != Color::White {
            continue;
        }
        color[root] = Color::Gray;
        stack.push((u32::try_from(root).unwrap_or(u32::MAX), 0));

        while let Some(&mut (node, ref mut next)) = stack.last_mut() {
            let neighbors = &adjacency[node as usize];
            if *next < neighbors.len() {
                let Neighbor { target, edge } = neighbors[*next];
                *next += 1;
                match color[target as usize] {
                    Color::Gray => is_back[edge] = true,
                    Color::White => {
                        color[target as usize] = Color::Gray;
                        stack.push((target, 0));
                    }
                    // Black targets are forward/cross edges; the default
                    // `false` classification already covers them.
                    Color::Black => {}
                }
            } else {
                color[node as usize] = Color::Black;
                stack.pop();
            }
        }
    }

    is_back
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
