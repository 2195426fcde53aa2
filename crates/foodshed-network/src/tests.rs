//! Unit tests for foodshed-network.
//!
//! All tests use a hand-crafted network so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use foodshed_core::GeoPoint;
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Build a small line-and-spur network for testing.
    ///
    /// Nodes (lat, lon):
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    ///
    /// Undirected edges (lengths in metres):
    ///   0-1: 100   1-2: 100   2-4: 100   0-3: 500   3-4: 100
    pub fn grid_network() -> (RoadNetwork, [foodshed_core::NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();

        // Positions (lat, lon) — small offsets; actual coords don't matter
        // for reachability tests.
        let n0 = b.add_node(GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0));
        let n2 = b.add_node(GeoPoint::new(0.0, 2.0));
        let n3 = b.add_node(GeoPoint::new(1.0, 0.0));
        let n4 = b.add_node(GeoPoint::new(1.0, 2.0));

        b.add_road(n0, n1, 100.0);
        b.add_road(n1, n2, 100.0);
        b.add_road(n2, n4, 100.0);
        b.add_road(n0, n3, 500.0); // long spur
        b.add_road(n3, n4, 100.0);

        (b.build(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use foodshed_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn single_road() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(33.70, -84.40));
        let c = b.add_node(GeoPoint::new(33.71, -84.40));
        b.add_road(a, c, 1_000.0);
        let net = b.build();
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2); // bidirectional
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();

        let n1_out: Vec<_> = net.out_edges(n1).collect();
        assert_eq!(n1_out.len(), 2, "n1 should have 2 outgoing edges");

        assert_eq!(net.out_degree(n0), 2); // n0→n1, n0→n3
        assert_eq!(net.out_degree(n2), 2); // n2→n1, n2→n4
        assert_eq!(net.out_degree(n3), 2); // n3→n0, n3→n4
        assert_eq!(net.out_degree(n4), 2); // n4→n2, n4→n3
    }

    #[test]
    fn out_edges_source_correctness() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        for e in net.out_edges(n0) {
            assert_eq!(net.edge_from[e.index()], n0);
        }
        let reaches_n1 = net.out_edges(n0).any(|e| net.edge_to[e.index()] == n1);
        assert!(reaches_n1);
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        // One-way a → c only
        b.add_directed_edge(a, c, 100.0);
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_degree(a), 1);
        assert_eq!(net.out_degree(c), 0); // no return edge
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use foodshed_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn snap_exact_position() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let snapped = net.snap_to_node(GeoPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(snapped, n0);
    }

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        // lon 0.4 is nearer n0 (lon 0.0); lon 0.6 is nearer n1 (lon 1.0).
        let near_n0 = net.snap_to_node(GeoPoint::new(0.0, 0.4)).unwrap();
        assert_eq!(near_n0, n0);
        let near_n1 = net.snap_to_node(GeoPoint::new(0.0, 0.6)).unwrap();
        assert_eq!(near_n1, n1);
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.snap_to_node(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn snapped_origins_deduped_and_sorted() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        // Two providers near n1, one near n0, supplied out of order.
        let positions = [
            GeoPoint::new(0.0, 0.9),
            GeoPoint::new(0.0, 0.05),
            GeoPoint::new(0.0, 1.1),
        ];
        let origins = net.snap_origins(&positions);
        assert_eq!(origins, vec![n0, n1]);
    }
}

// ── Bounded reachability ──────────────────────────────────────────────────────

#[cfg(test)]
mod reach {
    use crate::{reachable_within, RoadNetworkBuilder};
    use foodshed_core::{GeoPoint, NodeId};

    #[test]
    fn cutoff_limits_nodes() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();

        // 250 m from n0: n1 (100) and n2 (200) reachable; n3 (500) and
        // n4 (300 via n2) are not.
        let reach = reachable_within(&net, n0, 250.0);
        assert_eq!(reach.nodes, vec![n0, n1, n2]);
        assert!(!reach.nodes.contains(&n3));
        assert!(!reach.nodes.contains(&n4));
    }

    #[test]
    fn larger_cutoff_is_superset() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let small = reachable_within(&net, n0, 250.0);
        let large = reachable_within(&net, n0, 600.0);
        for n in &small.nodes {
            assert!(large.nodes.contains(n));
        }
        assert!(large.nodes.len() >= small.nodes.len());
    }

    #[test]
    fn whole_network_reachable_with_big_cutoff() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let reach = reachable_within(&net, n0, 10_000.0);
        assert_eq!(reach.nodes.len(), net.node_count());
        assert_eq!(reach.edges.len(), net.edge_count());
    }

    #[test]
    fn induced_edges_only() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let reach = reachable_within(&net, n0, 250.0);
        // Every included edge has both endpoints in the node set.
        for e in &reach.edges {
            assert!(reach.nodes.contains(&net.edge_from[e.index()]));
            assert!(reach.nodes.contains(&net.edge_to[e.index()]));
        }
        // The 500 m spur edge n0→n3 must be excluded even though n0 is reached.
        for e in &reach.edges {
            assert!((net.edge_length_m[e.index()] - 500.0).abs() > 1.0);
        }
    }

    #[test]
    fn one_way_constrains_reachability() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0); // one-way a→c
        let net = b.build();

        let from_a = reachable_within(&net, a, 200.0);
        assert_eq!(from_a.nodes, vec![a, c]);

        let from_c = reachable_within(&net, c, 200.0);
        assert_eq!(from_c.nodes, vec![c]); // cannot travel against the arrow
    }

    #[test]
    fn zero_cutoff_is_just_the_origin() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let reach = reachable_within(&net, n0, 0.0);
        assert_eq!(reach.nodes, vec![n0]);
        assert!(reach.edges.is_empty());
    }

    #[test]
    fn invalid_origin_yields_empty_set() {
        let (net, _) = super::helpers::grid_network();
        let reach = reachable_within(&net, NodeId(999), 100.0);
        assert!(reach.is_empty());
    }
}
