//! Single-pass barycentric crossing reduction.
//!
//! For each layer after the first, every node is sorted by the mean
//! in-layer index of its already-placed predecessors. Nodes with no
//! placed predecessor get a barycenter of +∞ and sink to the bottom of
//! the layer. The sort is stable, so ties keep their prior relative
//! order — one deterministic pass, not an iterated optimization.

/// Reorder `layers` in place.
///
/// `predecessors[node]` lists the forward-edge sources of `node`, in
/// edge input order.
pub(crate) fn order_within_layers(layers: &mut [Vec<u32>], predecessors: &[Vec<u32>]) {
    let node_count = predecessors.len();
    // In-layer index, assigned as each layer is finalized.
    let mut position: Vec<Option<usize>> = vec![None; node_count];

    for (layer_idx, layer) in layers.iter_mut().enumerate() {
        if layer_idx > 0 {
            let barycenters: Vec<(u32, f64)> = layer
                .iter()
                .map(|&node| (node, barycenter(node, predecessors, &position)))
                .collect();
            let mut indexed: Vec<(usize, u32, f64)> = barycenters
                .into_iter()
                .enumerate()
                .map(|(i, (node, b))| (i, node, b))
                .collect();
            // Stable: total_cmp on the barycenter, original index breaks ties.
            indexed.sort_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)));
            *layer = indexed.into_iter().map(|(_, node, _)| node).collect();
        }

        for (idx, &node) in layer.iter().enumerate() {
            position[node as usize] = Some(idx);
        }
    }
}

/// Mean placed-predecessor index, or +∞ when no predecessor has an
/// assigned index yet.
fn barycenter(node: u32, predecessors: &[Vec<u32>], position: &[Option<usize>]) -> f64 {
    let placed: Vec<usize> = predecessors[node as usize]
        .iter()
        .filter_map(|&p| position[p as usize])
        .collect();
    if placed.is_empty() {
        return f64::INFINITY;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        placed.iter().sum::<usize>() as f64 / placed.len() as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
