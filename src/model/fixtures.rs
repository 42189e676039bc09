// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::edge::Edge;
use super::graph::GraphStore;
use super::ids::{EdgeId, NodeId};
use super::node::{Node, Position};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

/// Two sibling leaves `a`, `b` with edge `a -> b`.
pub(crate) fn small_flat_graph() -> GraphStore {
    let mut graph = GraphStore::new();

    graph
        .nodes_mut()
        .insert(nid("a"), Node::new("A", "service", Position::new(0.0, 0.0)));
    graph.nodes_mut().insert(
        nid("b"),
        Node::new("B", "service", Position::new(200.0, 0.0)),
    );
    graph
        .edges_mut()
        .insert(eid("ab"), Edge::new(nid("a"), nid("b")));

    graph
}

/// Group `group_0` containing `a`, `b` (edge `a -> b`), plus root leaf `c`
/// with edge `b -> c`.
pub(crate) fn grouped_graph() -> GraphStore {
    let mut graph = small_flat_graph();

    let group = Node::new_group("Backend", Position::new(-40.0, -40.0));
    graph.nodes_mut().insert(nid("group_0"), group);

    for child in ["a", "b"] {
        let node = graph.nodes_mut().get_mut(&nid(child)).expect("fixture node");
        node.set_parent_id(Some(nid("group_0")));
        node.set_depth_and_z_order(1, 10);
    }

    graph.nodes_mut().insert(
        nid("c"),
        Node::new("C", "database", Position::new(400.0, 0.0)),
    );
    graph
        .edges_mut()
        .insert(eid("bc"), Edge::new(nid("b"), nid("c")));

    graph
}
