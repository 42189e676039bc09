// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use super::edge::Edge;
use super::ids::{EdgeId, NodeId};
use super::node::Node;

/// The canonical mutable graph — single source of truth for the canvas.
///
/// Mutation goes through the ops layer (or whole-state restore for undo), so
/// the structural invariants hold after every public operation: no dangling
/// edge endpoints, no dangling or non-group `parent_id`, depth equal to the
/// parent chain length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut BTreeMap<NodeId, Node> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &BTreeMap<EdgeId, Edge> {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut BTreeMap<EdgeId, Edge> {
        &mut self.edges
    }

    /// Replaces both collections wholesale. Used by bulk load and history
    /// restore; callers are responsible for sanitizing first.
    pub fn replace(&mut self, nodes: BTreeMap<NodeId, Node>, edges: BTreeMap<EdgeId, Edge>) {
        self.nodes = nodes;
        self.edges = edges;
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn contains_edge(&self, edge_id: &EdgeId) -> bool {
        self.edges.contains_key(edge_id)
    }

    pub fn is_group(&self, node_id: &NodeId) -> bool {
        self.nodes
            .get(node_id)
            .map(Node::is_group)
            .unwrap_or(false)
    }

    /// Direct children of `parent_id`, in id order.
    pub fn children_of(&self, parent_id: &NodeId) -> SmallVec<[NodeId; 8]> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent_id() == Some(parent_id))
            .map(|(node_id, _)| node_id.clone())
            .collect()
    }

    /// Transitive descendants of `root` (excluding `root` itself), resolved
    /// via parent-chain lookup.
    pub fn descendants_of(&self, root: &NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut frontier: SmallVec<[NodeId; 8]> = self.children_of(root);
        while let Some(node_id) = frontier.pop() {
            frontier.extend(self.children_of(&node_id));
            result.push(node_id);
        }
        result
    }

    pub fn selected_node_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.selected())
            .map(|(node_id, _)| node_id.clone())
            .collect()
    }

    /// Structural consistency check used by tests and debug assertions:
    /// referential integrity of edges and parents, parents are groups, and
    /// depth equals the resolved parent chain length.
    pub fn is_consistent(&self) -> bool {
        for edge in self.edges.values() {
            if !self.contains_node(edge.source()) || !self.contains_node(edge.target()) {
                return false;
            }
        }
        for node in self.nodes.values() {
            if let Some(parent_id) = node.parent_id() {
                if !self.is_group(parent_id) {
                    return false;
                }
            }
            if self.resolved_depth(node) != Some(node.depth()) {
                return false;
            }
        }
        true
    }

    /// Walks the parent chain of `node`; `None` on a broken or cyclic chain.
    fn resolved_depth(&self, node: &Node) -> Option<u32> {
        let mut depth = 0u32;
        let mut current = node.parent_id();
        while let Some(parent_id) = current {
            depth += 1;
            if depth as usize > self.nodes.len() {
                return None;
            }
            current = self.nodes.get(parent_id)?.parent_id();
        }
        Some(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::GraphStore;
    use crate::model::fixtures;
    use crate::model::{Node, NodeId, Position};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn fixtures_are_consistent() {
        assert!(fixtures::small_flat_graph().is_consistent());
        assert!(fixtures::grouped_graph().is_consistent());
    }

    #[test]
    fn descendants_resolve_transitively() {
        let graph = fixtures::grouped_graph();
        let mut descendants = graph.descendants_of(&nid("group_0"));
        descendants.sort();
        assert_eq!(descendants, vec![nid("a"), nid("b")]);
        assert!(graph.descendants_of(&nid("a")).is_empty());
    }

    #[test]
    fn dangling_edge_breaks_consistency() {
        let mut graph = fixtures::small_flat_graph();
        graph.nodes_mut().remove(&nid("a"));
        assert!(!graph.is_consistent());
    }

    #[test]
    fn leaf_parent_breaks_consistency() {
        let mut graph = GraphStore::new();
        graph
            .nodes_mut()
            .insert(nid("a"), Node::new("A", "service", Position::default()));
        let mut child = Node::new("B", "service", Position::default());
        child.set_parent_id(Some(nid("a")));
        child.set_depth_and_z_order(1, 10);
        graph.nodes_mut().insert(nid("b"), child);
        assert!(!graph.is_consistent());
    }

    #[test]
    fn stale_depth_breaks_consistency() {
        let mut graph = fixtures::grouped_graph();
        graph
            .nodes_mut()
            .get_mut(&nid("a"))
            .expect("node a")
            .set_depth_and_z_order(0, 0);
        assert!(!graph.is_consistent());
    }

    #[test]
    fn replace_swaps_both_collections() {
        let mut graph = fixtures::small_flat_graph();
        graph.replace(Default::default(), Default::default());
        assert!(graph.nodes().is_empty());
        assert!(graph.edges().is_empty());
    }
}
