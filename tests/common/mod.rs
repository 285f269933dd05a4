#![allow(dead_code)]

use u_dispatch::graph::Graph;
use u_dispatch::models::{DeliveryRequest, NodeId};

/// 50 km/h in m/s.
pub const V_MAIN: f64 = 13.9;
/// 30 km/h in m/s.
pub const V_LOCAL: f64 = 8.3;

const COORDS: &[(&str, f64, f64)] = &[
    ("FH_W", 0.0, 0.0),
    ("FH_M", 4.0, 0.0),
    ("FH_E", 8.0, 0.0),
    ("W_S", 0.0, 1.5),
    ("W_M", 0.0, 3.5),
    ("W_N", 0.0, 7.5),
    ("E_S", 8.0, 1.5),
    ("E_M", 8.0, 3.5),
    ("E_N", 8.0, 7.5),
    ("ST_W", 1.0, 8.0),
    ("ST_M", 4.0, 8.0),
    ("ST_E", 7.0, 8.0),
    ("C_GATE_S", 4.0, 1.5),
    ("C_MID", 4.0, 4.0),
    ("C_PARK", 4.0, 6.5),
    ("R_SW", 2.0, 2.0),
    ("R_SE", 6.0, 2.0),
    ("R_NE", 6.0, 6.0),
    ("R_NW", 2.0, 6.0),
    ("C_MAIN", 4.0, 3.8),
    ("C_GREEN", 3.6, 4.6),
    ("KRUPP_S", 5.5, 3.5),
    ("KRUPP_N", 5.5, 4.7),
    ("PARK_N", 4.0, 7.5),
];

const ROADS: &[(&str, &str, f64)] = &[
    ("FH_W", "FH_M", V_MAIN),
    ("FH_M", "FH_E", V_MAIN),
    ("FH_W", "W_S", V_MAIN),
    ("W_S", "W_M", V_MAIN),
    ("W_M", "W_N", V_MAIN),
    ("FH_E", "E_S", V_MAIN),
    ("E_S", "E_M", V_MAIN),
    ("E_M", "E_N", V_MAIN),
    ("W_N", "ST_W", V_MAIN),
    ("ST_W", "ST_M", V_MAIN),
    ("ST_M", "ST_E", V_MAIN),
    ("ST_E", "E_N", V_MAIN),
    ("ST_M", "C_PARK", V_LOCAL),
    ("C_PARK", "C_MID", V_LOCAL),
    ("R_SW", "R_SE", V_LOCAL),
    ("R_SE", "R_NE", V_LOCAL),
    ("R_NE", "R_NW", V_LOCAL),
    ("R_NW", "R_SW", V_LOCAL),
    ("FH_M", "C_GATE_S", V_LOCAL),
    ("C_GATE_S", "R_SW", V_LOCAL),
    ("C_GATE_S", "R_SE", V_LOCAL),
    ("W_S", "R_SW", V_LOCAL),
    ("E_S", "R_SE", V_LOCAL),
    ("W_N", "R_NW", V_LOCAL),
    ("E_N", "R_NE", V_LOCAL),
    ("C_GATE_S", "C_MID", V_LOCAL),
    ("R_SW", "C_MAIN", V_LOCAL),
    ("R_SE", "C_MAIN", V_LOCAL),
    ("C_MAIN", "C_GREEN", V_LOCAL),
    ("R_NW", "C_GREEN", V_LOCAL),
    ("R_NE", "C_GREEN", V_LOCAL),
    ("R_SE", "KRUPP_S", V_LOCAL),
    ("KRUPP_S", "KRUPP_N", V_LOCAL),
    ("KRUPP_N", "R_NE", V_LOCAL),
    ("C_PARK", "PARK_N", V_LOCAL),
    ("PARK_N", "ST_M", V_LOCAL),
];

/// Campus road network: lengths are 100 × the coordinate distance.
///
/// With `flatten` every node is placed at the origin, which turns the A*
/// heuristic off and leaves a plain Dijkstra search over the same roads.
pub fn campus(flatten: bool) -> Graph {
    let mut g = Graph::new();
    for &(id, x, y) in COORDS {
        let (x, y) = if flatten { (0.0, 0.0) } else { (x, y) };
        g.add_node(id, x, y).expect("unique node");
    }
    for &(a, b, speed) in ROADS {
        let (pa, pb) = (position(a), position(b));
        let length = (pa.0 - pb.0).hypot(pa.1 - pb.1) * 100.0;
        g.add_edge(a, b, length, speed, true).expect("valid road");
    }
    g
}

pub fn campus_nodes() -> Vec<NodeId> {
    COORDS.iter().map(|&(id, _, _)| NodeId::from(id)).collect()
}

fn position(id: &str) -> (f64, f64) {
    COORDS
        .iter()
        .find(|&&(n, _, _)| n == id)
        .map(|&(_, x, y)| (x, y))
        .expect("road endpoint is a campus node")
}

pub fn campus_requests() -> Vec<DeliveryRequest> {
    vec![
        DeliveryRequest::new("R1", "KRUPP_N").with_demand(3),
        DeliveryRequest::new("R2", "C_GREEN").with_demand(2),
        DeliveryRequest::new("R3", "PARK_N"),
        DeliveryRequest::new("R4", "ST_E").with_demand(4),
        DeliveryRequest::new("R5", "W_M").with_demand(2),
        DeliveryRequest::new("R6", "E_M"),
        DeliveryRequest::new("R7", "R_NW").with_demand(3),
        DeliveryRequest::new("R8", "C_MAIN").with_demand(2),
    ]
}

/// Sorted request IDs served by a plan.
pub fn served_ids(plan: &u_dispatch::models::Plan) -> Vec<String> {
    let mut ids: Vec<String> = plan.served().map(|r| r.id().to_string()).collect();
    ids.sort();
    ids
}
