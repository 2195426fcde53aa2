//! Distance-bounded reachability over the road graph.
//!
//! A service area wants "everything within d miles of this origin along the
//! network", not a point-to-point route, so this is Dijkstra with a cutoff
//! instead of a destination.  Costs are edge lengths in millimetres (`u64`)
//! rather than float metres: integer costs give deterministic heap ordering
//! and cheap saturating arithmetic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use foodshed_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;

// ── ReachSet ──────────────────────────────────────────────────────────────────

/// Nodes and edges of the network within a distance cutoff of an origin.
///
/// An edge is included only when **both** endpoints are within the cutoff
/// (induced-subgraph semantics), so a long edge leaving the reachable zone
/// never drags coverage past the cutoff.
#[derive(Debug, Clone, Default)]
pub struct ReachSet {
    /// Reached nodes, ascending.
    pub nodes: Vec<NodeId>,
    /// Edges whose endpoints are both reached, ascending by `EdgeId`.
    pub edges: Vec<EdgeId>,
}

impl ReachSet {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ── Bounded Dijkstra ──────────────────────────────────────────────────────────

/// Collect all nodes and edges within `cutoff_m` network metres of `origin`.
///
/// An out-of-range origin (or an empty network) yields an empty set rather
/// than an error: the caller decides whether that is worth reporting.
pub fn reachable_within(network: &RoadNetwork, origin: NodeId, cutoff_m: f64) -> ReachSet {
    if network.is_empty() || origin.index() >= network.node_count() || cutoff_m < 0.0 {
        return ReachSet::default();
    }

    let cutoff_mm = (cutoff_m * 1_000.0).round() as u64;
    let n = network.node_count();

    // dist[v] = best known cost (mm) to reach v.
    let mut dist = vec![u64::MAX; n];
    dist[origin.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, origin)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let edge_mm = (network.edge_length_m[edge.index()] * 1_000.0).round() as u64;
            let new_cost = cost.saturating_add(edge_mm);

            if new_cost <= cutoff_mm && new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    // Materialize the reached node set, then the induced edge set.
    let reached = |id: NodeId| dist[id.index()] != u64::MAX;

    let nodes: Vec<NodeId> = (0..n as u32)
        .map(NodeId)
        .filter(|&id| reached(id))
        .collect();

    let edges: Vec<EdgeId> = (0..network.edge_count() as u32)
        .map(EdgeId)
        .filter(|&e| reached(network.edge_from[e.index()]) && reached(network.edge_to[e.index()]))
        .collect();

    ReachSet { nodes, edges }
}
