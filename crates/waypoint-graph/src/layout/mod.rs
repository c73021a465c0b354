//! Layered layout for the tolerant flow graph.
//!
//! # Overview
//!
//! [`compute_layout`] is a pure function over an arbitrary node/edge set
//! — cycles permitted, dangling edges permitted, no I/O, no state between
//! calls. It never fails: invalid edges are filtered silently, cycles are
//! neutralized for layering but preserved in the output edge set, and
//! anything left unplaced gets a deterministic fallback position. The
//! flow graph expresses real iterative value loops and must always render
//! something.
//!
//! ## Pipeline
//!
//! ```text
//! (nodes, edges)
//!        ↓  filter edges with unknown endpoints
//!        ↓  cycles::classify_back_edges   (iterative DFS)
//! forward edges ∪ back edges (back edges kept for output)
//!        ↓  layers::assign_depths         (Kahn over forward edges)
//!        ↓  ordering::order_within_layers (stable barycentric pass)
//!        ↓  coords::assign_coordinates    (centered columns + fallback)
//! FlowLayout { nodes: [..., layer, x, y], edges: [filtered, incl. back] }
//! ```
//!
//! Determinism: identical node/edge arrays in identical order produce
//! identical coordinates. Callers that need repeatable diagrams must
//! supply inputs in a stable order.

pub(crate) mod coords;
pub(crate) mod cycles;
pub(crate) mod layers;
pub(crate) mod ordering;

use serde::{Deserialize, Serialize};

use waypoint_core::config::LayoutConfig;

use crate::intern::Interner;
use crate::layout::cycles::Neighbor;

/// A flow-graph node supplied by the synthesis process.
///
/// `status` is opaque caller data — the layout never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl FlowNode {
    /// Convenience constructor for unlabeled-status nodes.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            status: None,
        }
    }
}

/// A directed flow edge: value state `from` can transition to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FlowEdge {
    /// Convenience constructor for unlabeled edges.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }
}

/// A laid-out node: the input data plus layer and pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub layer: usize,
    pub x: f64,
    pub y: f64,
}

/// The layout result: placed nodes (input order) and the filtered edge
/// set, back edges included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<FlowEdge>,
}

/// Lay out `nodes`/`edges` with default spacing.
#[must_use]
pub fn compute_layout(nodes: &[FlowNode], edges: &[FlowEdge]) -> FlowLayout {
    compute_layout_with(nodes, edges, &LayoutConfig::default())
}

/// Lay out `nodes`/`edges` with caller-supplied spacing.
#[must_use]
pub fn compute_layout_with(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    config: &LayoutConfig,
) -> FlowLayout {
    // Intern ids in input order. Duplicate ids collapse onto their first
    // occurrence and later entries reuse its placement.
    let interner = Interner::from_ids(nodes.iter().map(|n| n.id.as_str()));
    let node_count = interner.len();

    // Step 1: drop edges whose endpoints are not among the supplied
    // nodes. Not an error — the synthesis process is allowed to be sloppy.
    let filtered: Vec<(usize, u32, u32)> = edges
        .iter()
        .enumerate()
        .filter_map(|(idx, e)| {
            let from = interner.get(&e.from)?;
            let to = interner.get(&e.to)?;
            Some((idx, from, to))
        })
        .collect();

    // Step 2: classify back edges on an explicit DFS stack.
    let mut adjacency: Vec<Vec<Neighbor>> = vec![Vec::new(); node_count];
    for (filtered_idx, &(_, from, to)) in filtered.iter().enumerate() {
        adjacency[from as usize].push(Neighbor {
            target: to,
            edge: filtered_idx,
        });
    }
    let is_back = cycles::classify_back_edges(node_count, &adjacency, filtered.len());

    // Steps 3–4: layer over forward edges only, then one barycentric pass.
    let forward: Vec<(u32, u32)> = filtered
        .iter()
        .enumerate()
        .filter(|(i, _)| !is_back[*i])
        .map(|(_, &(_, from, to))| (from, to))
        .collect();

    let depths = layers::assign_depths(node_count, &forward);
    let mut layer_groups = layers::group_layers(&depths);

    let mut predecessors: Vec<Vec<u32>> = vec![Vec::new(); node_count];
    for &(from, to) in &forward {
        predecessors[to as usize].push(from);
    }
    ordering::order_within_layers(&mut layer_groups, &predecessors);

    // Step 5: coordinates.
    let placements = coords::assign_coordinates(node_count, &layer_groups, config);

    let placed = nodes
        .iter()
        .map(|n| {
            // Interned by construction; fall back to origin placement if
            // the id somehow resolves to nothing.
            let placement = interner
                .get(&n.id)
                .map(|idx| placements[idx as usize])
                .unwrap_or(coords::Placement {
                    layer: 0,
                    x: config.padding_x,
                    y: config.padding_y,
                });
            PlacedNode {
                id: n.id.clone(),
                label: n.label.clone(),
                status: n.status.clone(),
                layer: placement.layer,
                x: placement.x,
                y: placement.y,
            }
        })
        .collect();

    // Back edges are restored: the output edge set is exactly the
    // filtered input, in input order.
    let kept_edges = filtered
        .iter()
        .map(|&(input_idx, _, _)| edges[input_idx].clone())
        .collect();

    FlowLayout {
        nodes: placed,
        edges: kept_edges,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<FlowNode> {
        ids.iter().map(|id| FlowNode::new(*id, id.to_uppercase())).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<FlowEdge> {
        pairs.iter().map(|(f, t)| FlowEdge::new(*f, *t)).collect()
    }

    fn placed<'a>(layout: &'a FlowLayout, id: &str) -> &'a PlacedNode {
        layout
            .nodes
            .iter()
            .find(|n| n.id == id)
            .unwrap_or_else(|| panic!("node {id} missing"))
    }

    // -----------------------------------------------------------------------
    // Cycle tolerance
    // -----------------------------------------------------------------------

    #[test]
    fn three_cycle_layers_and_keeps_all_edges() {
        let layout = compute_layout(
            &nodes(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("b", "c"), ("c", "a")]),
        );

        assert_eq!(placed(&layout, "a").layer, 0);
        assert_eq!(placed(&layout, "b").layer, 1);
        assert_eq!(placed(&layout, "c").layer, 2);
        assert_eq!(layout.edges.len(), 3, "back edge preserved in output");
    }

    #[test]
    fn self_loop_is_tolerated() {
        let layout = compute_layout(&nodes(&["a"]), &edges(&[("a", "a")]));
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.edges.len(), 1);
        assert_eq!(placed(&layout, "a").layer, 0);
    }

    #[test]
    fn output_edges_equal_filtered_input_edges() {
        let input = edges(&[("a", "b"), ("ghost", "a"), ("b", "a"), ("a", "missing")]);
        let layout = compute_layout(&nodes(&["a", "b"]), &input);

        assert_eq!(layout.edges, vec![input[0].clone(), input[2].clone()]);
    }

    // -----------------------------------------------------------------------
    // Coordinates
    // -----------------------------------------------------------------------

    #[test]
    fn coordinates_are_non_negative_and_distinct_per_layer() {
        let layout = compute_layout(
            &nodes(&["r", "a", "b", "c"]),
            &edges(&[("r", "a"), ("r", "b"), ("r", "c")]),
        );

        for n in &layout.nodes {
            assert!(n.x >= 0.0, "{}: x={}", n.id, n.x);
            assert!(n.y >= 0.0, "{}: y={}", n.id, n.y);
        }

        let layer1: Vec<f64> = layout
            .nodes
            .iter()
            .filter(|n| n.layer == 1)
            .map(|n| n.y)
            .collect();
        assert_eq!(layer1.len(), 3);
        for (i, y) in layer1.iter().enumerate() {
            for other in &layer1[i + 1..] {
                assert!((y - other).abs() > f64::EPSILON, "duplicate y in layer 1");
            }
        }
    }

    #[test]
    fn custom_spacing_is_respected() {
        let cfg = LayoutConfig {
            padding_x: 5.0,
            padding_y: 7.0,
            layer_spacing: 40.0,
            node_spacing: 30.0,
        };
        let layout = compute_layout_with(&nodes(&["a", "b"]), &edges(&[("a", "b")]), &cfg);
        assert!((placed(&layout, "a").x - 5.0).abs() < f64::EPSILON);
        assert!((placed(&layout, "b").x - 45.0).abs() < f64::EPSILON);
    }

    // -----------------------------------------------------------------------
    // Determinism and tolerance
    // -----------------------------------------------------------------------

    #[test]
    fn identical_input_yields_identical_layout() {
        let ns = nodes(&["x", "y", "z", "w"]);
        let es = edges(&[("x", "y"), ("y", "z"), ("z", "x"), ("x", "w")]);
        let first = compute_layout(&ns, &es);
        let second = compute_layout(&ns, &es);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_produces_empty_layout() {
        let layout = compute_layout(&[], &[]);
        assert!(layout.nodes.is_empty());
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn edges_without_nodes_are_dropped_silently() {
        let layout = compute_layout(&[], &edges(&[("a", "b")]));
        assert!(layout.nodes.is_empty());
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn isolated_nodes_land_in_layer_zero() {
        let layout = compute_layout(&nodes(&["a", "b", "lonely"]), &edges(&[("a", "b")]));
        assert_eq!(placed(&layout, "lonely").layer, 0);
    }

    #[test]
    fn node_metadata_survives_layout() {
        let mut input = nodes(&["a"]);
        input[0].status = Some("in_progress".to_string());
        let mut es = edges(&[]);
        es.push(FlowEdge {
            from: "a".to_string(),
            to: "a".to_string(),
            label: Some("retry".to_string()),
        });

        let layout = compute_layout(&input, &es);
        assert_eq!(placed(&layout, "a").status.as_deref(), Some("in_progress"));
        assert_eq!(layout.edges[0].label.as_deref(), Some("retry"));
    }

    #[test]
    fn duplicate_ids_reuse_first_placement() {
        let input = vec![
            FlowNode::new("a", "First"),
            FlowNode::new("a", "Second"),
            FlowNode::new("b", "B"),
        ];
        let layout = compute_layout(&input, &edges(&[("a", "b")]));
        assert_eq!(layout.nodes.len(), 3);
        assert!((layout.nodes[0].x - layout.nodes[1].x).abs() < f64::EPSILON);
        assert!((layout.nodes[0].y - layout.nodes[1].y).abs() < f64::EPSILON);
    }
}
