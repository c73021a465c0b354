//! Longest-path layer assignment over forward edges.
//!
//! Kahn's algorithm over the back-edge-free subgraph: zero-in-degree
//! nodes seed at depth 0 and every node settles at
//! `max(depth of predecessors) + 1`. Nodes reachable only through back
//! edges have forward in-degree 0 and therefore also land at depth 0.

use std::collections::VecDeque;

/// Depth per node, given `forward` edges `(from, to)` over `node_count`
/// nodes. The forward subgraph is acyclic by construction, so the queue
/// always drains every node.
pub(crate) fn assign_depths(node_count: usize, forward: &[(u32, u32)]) -> Vec<usize> {
    let mut in_degree = vec![0_usize; node_count];
    let mut outgoing: Vec<Vec<u32>> = vec![Vec::new(); node_count];
    for &(from, to) in forward {
        in_degree[to as usize] += 1;
        outgoing[from as usize].push(to);
    }

    let mut depth = vec![0_usize; node_count];
    let mut queue: VecDeque<u32> = (0..node_count)
        .filter(|&i| in_degree[i] == 0)
        .map(|i| u32::try_from(i).unwrap_or(u32::MAX))
        .collect();

    while let Some(node) = queue.pop_front() {
        for &target in &outgoing[node as usize] {
            let t = target as usize;
            depth[t] = depth[t].max(depth[node as usize] + 1);
            in_degree[t] -= 1;
            if in_degree[t] == 0 {
                queue.push_back(target);
            }
        }
    }

    depth
}

/// Group node indices into layers by depth, preserving node input order
/// within each layer.
pub(crate) fn group_layers(depths: &[usize]) -> Vec<Vec<u32>> {
    let layer_count = depths.iter().map(|&d| d + 1).max().unwrap_or(0);
    let mut layers: Vec<Vec<u32>> = vec![Vec::new(); layer_count];
    for (node, &depth) in depths.iter().enumerate() {
        layers[depth].push(u32::try_from(node).unwrap_or(u32::MAX));
    }
    layers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_depths_increase_by_one() {
        let depths = assign_depths(3, &[(0, 1), (1, 2)]);
        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn depth_takes_the_longest_path() {
        // 0→3 directly, and 0→1→2→3: node 3 settles at depth 3.
        let depths = assign_depths(4, &[(0, 3), (0, 1), (1, 2), (2, 3)]);
        assert_eq!(depths[3], 3);
    }

    #[test]
    fn isolated_nodes_default_to_depth_zero() {
        let depths = assign_depths(3, &[(0, 1)]);
        assert_eq!(depths, vec![0, 1, 0]);
    }

    #[test]
    fn no_edges_means_one_layer() {
        let depths = assign_depths(4, &[]);
        let layers = group_layers(&depths);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0], vec![0, 1, 2, 3]);
    }

    #[test]
    fn grouping_preserves_input_order_within_layer() {
        // Nodes 2 and 0 both at depth 0 (no incoming), node 1 at depth 1.
        let depths = assign_depths(3, &[(2, 1), (0, 1)]);
        let layers = group_layers(&depths);
        assert_eq!(layers[0], vec![0, 2]);
        assert_eq!(layers[1], vec![1]);
    }

    #[test]
    fn empty_graph_has_no_layers() {
        let layers = group_layers(&assign_depths(0, &[]));
        assert!(layers.is_empty());
    }
}
