// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-item selection for the properties panel.
//!
//! Tracks at most one node XOR one edge. Multi-selection (grouping, bulk
//! delete, bulk move) lives as a per-node flag on the graph itself and never
//! drives this tracker.
//!
//! The tracker stores ids only and re-derives the selected object from the
//! graph on demand, so it can never serve stale data after a mutation.

use crate::model::{Edge, EdgeId, GraphStore, Node, NodeId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    node_id: Option<NodeId>,
    edge_id: Option<EdgeId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reacts to a selection report from the canvas. Exactly one node and
    /// zero edges selects that node; exactly one edge and zero nodes selects
    /// that edge; any other combination clears both.
    pub fn on_selection_change(&mut self, nodes: &[NodeId], edges: &[EdgeId]) {
        match (nodes, edges) {
            ([node_id], []) => {
                self.node_id = Some(node_id.clone());
                self.edge_id = None;
            }
            ([], [edge_id]) => {
                self.node_id = None;
                self.edge_id = Some(edge_id.clone());
            }
            _ => self.clear(),
        }
    }

    pub fn selected_node<'a>(&self, graph: &'a GraphStore) -> Option<(&NodeId, &'a Node)> {
        let node_id = self.node_id.as_ref()?;
        graph.nodes().get(node_id).map(|node| (node_id, node))
    }

    pub fn selected_edge<'a>(&self, graph: &'a GraphStore) -> Option<(&EdgeId, &'a Edge)> {
        let edge_id = self.edge_id.as_ref()?;
        graph.edges().get(edge_id).map(|edge| (edge_id, edge))
    }

    /// Drops tracked ids that no longer resolve, e.g. after a delete, an undo,
    /// or a merge removed the selected object.
    pub fn refresh(&mut self, graph: &GraphStore) {
        if let Some(node_id) = &self.node_id {
            if !graph.contains_node(node_id) {
                self.node_id = None;
            }
        }
        if let Some(edge_id) = &self.edge_id {
            if !graph.contains_edge(edge_id) {
                self.edge_id = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.node_id = None;
        self.edge_id = None;
    }
}
