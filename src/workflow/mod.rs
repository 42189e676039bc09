// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editor facade: the one API surface the rendering layer talks to.
//!
//! Composes the graph, history, selection, clipboard, and id generator. All
//! mutation here is silent best-effort: invalid references and invalid
//! structural requests degrade to no-ops instead of surfacing errors, on the
//! premise that this layer must never leave the diagram worse than a no-op.
//! Structural changes checkpoint history once per logical operation; pure
//! data patches (labels, tags, volumes) intentionally do not, so typing does
//! not flood the undo stack.

use std::collections::BTreeMap;

use crate::clipboard::{Clipboard, ClipboardItem};
use crate::history::History;
use crate::merge::{self, MergeDiff, MergeOutcome};
use crate::model::{
    Edge, EdgeId, GraphStore, IdGenerator, Node, NodeId, Position, Volume,
};
use crate::ops;
use crate::selection::SelectionTracker;


/// A buffered node snapshot: the id travels with the copy so paste can remap
/// it.
#[derive(Debug, Clone)]
pub struct CopiedNode {
    id: NodeId,
    node: Node,
}

impl CopiedNode {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl ClipboardItem for CopiedNode {
    fn shift(&mut self, dx: f64, dy: f64) {
        self.node.translate(dx, dy);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    graph: GraphStore,
    history: History,
    selection: SelectionTracker,
    clipboard: Clipboard<CopiedNode>,
    ids: IdGenerator,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    // ----- node CRUD ---------------------------------------------------

    /// Creates a leaf node and returns its freshly minted id.
    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        node_type: impl Into<String>,
        position: Position,
    ) -> NodeId {
        self.history.checkpoint(&self.graph);
        let node_id = self.ids.fresh_node_id();
        let node = Node::new(label, node_type, position);
        let _ = ops::add_node(&mut self.graph, node_id.clone(), node);
        node_id
    }

    pub fn update_node_label(&mut self, node_id: &NodeId, label: impl Into<String>) {
        let _ = ops::set_node_label(&mut self.graph, node_id, label);
    }

    pub fn add_node_tag(&mut self, node_id: &NodeId, tag: impl Into<String>) {
        let _ = ops::add_node_tag(&mut self.graph, node_id, tag);
    }

    pub fn remove_node_tag(&mut self, node_id: &NodeId, tag: &str) {
        let _ = ops::remove_node_tag(&mut self.graph, node_id, tag);
    }

    pub fn add_volume(&mut self, node_id: &NodeId, volume: Volume) {
        let _ = ops::add_node_volume(&mut self.graph, node_id, volume);
    }

    pub fn remove_volume(&mut self, node_id: &NodeId, name: &str) {
        let _ = ops::remove_node_volume(&mut self.graph, node_id, name);
    }

    /// Cascade-deletes a node (with descendants and incident edges).
    pub fn delete_node(&mut self, node_id: &NodeId) {
        if !self.graph.contains_node(node_id) {
            return;
        }
        self.history.checkpoint(&self.graph);
        let _ = ops::remove_node(&mut self.graph, node_id);
        self.selection.refresh(&self.graph);
    }

    /// Cascade-deletes every node carrying the multi-selection flag.
    pub fn delete_selected(&mut self) {
        if self.graph.selected_node_ids().is_empty() {
            return;
        }
        self.history.checkpoint(&self.graph);
        ops::remove_selected(&mut self.graph);
        self.selection.refresh(&self.graph);
    }

    // ----- grouping ----------------------------------------------------

    /// Groups the eligible sibling subset of `node_ids` under a new group
    /// node; `None` when fewer than 2 candidates qualify.
    pub fn create_group(
        &mut self,
        node_ids: &[NodeId],
        label: impl Into<String>,
    ) -> Option<NodeId> {
        if ops::eligible_members(&self.graph, node_ids).len() < 2 {
            return None;
        }
        self.history.checkpoint(&self.graph);
        let group_id = self.ids.fresh_group_id();
        match ops::create_group(&mut self.graph, group_id.clone(), label, node_ids) {
            Ok(_) => Some(group_id),
            Err(_) => None,
        }
    }

    pub fn ungroup(&mut self, group_id: &NodeId) {
        if !self.graph.is_group(group_id) {
            return;
        }
        self.history.checkpoint(&self.graph);
        let _ = ops::ungroup(&mut self.graph, group_id);
        self.selection.refresh(&self.graph);
    }

    pub fn add_node_to_group(&mut self, node_id: &NodeId, group_id: &NodeId) {
        let eligible = self
            .graph
            .nodes()
            .get(node_id)
            .map(|node| node.parent_id().is_none())
            .unwrap_or(false)
            && self.graph.is_group(group_id);
        if !eligible {
            return;
        }
        self.history.checkpoint(&self.graph);
        let _ = ops::add_node_to_group(&mut self.graph, node_id, group_id);
    }

    pub fn remove_from_group(&mut self, node_id: &NodeId) {
        let grouped = self
            .graph
            .nodes()
            .get(node_id)
            .map(|node| node.parent_id().is_some())
            .unwrap_or(false);
        if !grouped {
            return;
        }
        self.history.checkpoint(&self.graph);
        let _ = ops::remove_from_group(&mut self.graph, node_id);
    }

    pub fn delete_group(&mut self, group_id: &NodeId, cascade_children: bool) {
        if !self.graph.is_group(group_id) {
            return;
        }
        self.history.checkpoint(&self.graph);
        let _ = ops::delete_group(&mut self.graph, group_id, cascade_children);
        self.selection.refresh(&self.graph);
    }

    pub fn get_groups(&self) -> Vec<(&NodeId, &Node)> {
        self.graph
            .nodes()
            .iter()
            .filter(|(_, node)| node.is_group())
            .collect()
    }

    // ----- history -----------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let replayed = self.history.undo(&mut self.graph);
        if replayed {
            self.selection.refresh(&self.graph);
        }
        replayed
    }

    pub fn redo(&mut self) -> bool {
        let replayed = self.history.redo(&mut self.graph);
        if replayed {
            self.selection.refresh(&self.graph);
        }
        replayed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ----- clipboard ---------------------------------------------------

    /// Buffers structural copies of every flagged node. The buffer survives
    /// graph mutations and repeated pastes.
    pub fn copy_selected_nodes(&mut self) {
        let copies = self.snapshot_selected();
        if !copies.is_empty() {
            self.clipboard.copy(copies);
        }
    }

    /// Pastes the buffered nodes with fresh ids and a fixed offset. Returns
    /// the new ids; empty when the buffer is empty.
    pub fn paste_nodes(&mut self) -> Vec<NodeId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        self.history.checkpoint(&self.graph);
        let clipboard = std::mem::take(&mut self.clipboard);
        let pasted = self.insert_copies(&clipboard);
        self.clipboard = clipboard;
        pasted
    }

    /// Copy + paste in one step, without disturbing the clipboard buffer.
    pub fn duplicate_selected_nodes(&mut self) -> Vec<NodeId> {
        let copies = self.snapshot_selected();
        if copies.is_empty() {
            return Vec::new();
        }
        self.history.checkpoint(&self.graph);
        let mut scratch = Clipboard::new();
        scratch.copy(copies);
        self.insert_copies(&scratch)
    }

    fn snapshot_selected(&self) -> Vec<CopiedNode> {
        self.graph
            .selected_node_ids()
            .into_iter()
            .filter_map(|node_id| {
                self.graph.nodes().get(&node_id).map(|node| CopiedNode {
                    id: node_id.clone(),
                    node: node.clone(),
                })
            })
            .collect()
    }

    fn insert_copies(&mut self, clipboard: &Clipboard<CopiedNode>) -> Vec<NodeId> {
        let ids = &mut self.ids;
        let mut remapped: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        let mut copies = clipboard.paste_with(|mut copy| {
            let fresh_id = if copy.node.is_group() {
                ids.fresh_group_id()
            } else {
                ids.fresh_node_id()
            };
            remapped.insert(copy.id.clone(), fresh_id.clone());
            copy.id = fresh_id;
            copy
        });
        // Parents insert before children so reattached copies pass parent
        // validation.
        copies.sort_by_key(|copy| copy.node.depth());

        let mut pasted = Vec::with_capacity(copies.len());
        for mut copy in copies {
            // A parent link into the buffer follows the pasted copy of that
            // parent; a link outside it survives only while the parent still
            // resolves to a live group, otherwise the copy lands at root.
            if let Some(parent_id) = copy.node.parent_id().cloned() {
                if let Some(new_parent) = remapped.get(&parent_id) {
                    copy.node.set_parent_id(Some(new_parent.clone()));
                } else if !self.graph.is_group(&parent_id) {
                    copy.node.set_parent_id(None);
                }
            }
            copy.node.set_selected(false);
            if ops::add_node(&mut self.graph, copy.id.clone(), copy.node).is_ok() {
                pasted.push(copy.id);
            }
        }
        pasted
    }

    // ----- multi-selection ---------------------------------------------

    pub fn select_all(&mut self) {
        ops::set_all_selected(&mut self.graph, true);
    }

    pub fn deselect_all(&mut self) {
        ops::set_all_selected(&mut self.graph, false);
    }

    pub fn set_node_selected(&mut self, node_id: &NodeId, selected: bool) {
        if let Some(node) = self.graph.nodes_mut().get_mut(node_id) {
            node.set_selected(selected);
        }
    }

    /// Translates every flagged node by one logical drag step; a single
    /// undoable unit per call.
    pub fn move_selected_nodes(&mut self, dx: f64, dy: f64) {
        if self.graph.selected_node_ids().is_empty() {
            return;
        }
        self.history.checkpoint(&self.graph);
        ops::translate_selected(&mut self.graph, dx, dy);
    }

    // ----- single-item selection ---------------------------------------

    pub fn on_selection_change(&mut self, nodes: &[NodeId], edges: &[EdgeId]) {
        self.selection.on_selection_change(nodes, edges);
    }

    pub fn selected_node(&self) -> Option<(&NodeId, &Node)> {
        self.selection.selected_node(&self.graph)
    }

    pub fn selected_edge(&self) -> Option<(&EdgeId, &Edge)> {
        self.selection.selected_edge(&self.graph)
    }

    // ----- merge & bulk load -------------------------------------------

    /// Applies one externally generated diff as a single undoable unit.
    pub fn merge_diagram_changes(&mut self, diff: &MergeDiff) -> MergeOutcome {
        let outcome = merge::apply_diff(&mut self.graph, &mut self.ids, &mut self.history, diff);
        self.selection.refresh(&self.graph);
        outcome
    }

    /// Replaces the whole diagram. The input is sanitized the way merge input
    /// is: dangling edges are dropped, unresolvable or non-group parents are
    /// cleared, parent cycles are broken, and depth/z-order are recomputed.
    /// History and selection reset; id counters reconcile above every loaded
    /// id.
    pub fn load_diagram(
        &mut self,
        mut nodes: BTreeMap<NodeId, Node>,
        mut edges: BTreeMap<EdgeId, Edge>,
    ) {
        let group_ids: std::collections::BTreeSet<NodeId> = nodes
            .iter()
            .filter(|(_, node)| node.is_group())
            .map(|(node_id, _)| node_id.clone())
            .collect();
        for node in nodes.values_mut() {
            let parent_ok = node
                .parent_id()
                .map(|parent_id| group_ids.contains(parent_id))
                .unwrap_or(true);
            if !parent_ok {
                node.set_parent_id(None);
            }
        }

        // Every parent chain must terminate at a root, or refresh below never
        // reaches the cycle members. Cut the link on each node that sits on
        // its own chain; nodes hanging off a cut cycle keep their parent.
        let cycle_members: Vec<NodeId> = nodes
            .keys()
            .filter(|node_id| on_own_parent_chain(&nodes, node_id))
            .cloned()
            .collect();
        for node_id in &cycle_members {
            if let Some(node) = nodes.get_mut(node_id) {
                node.set_parent_id(None);
            }
        }

        edges.retain(|_, edge| {
            nodes.contains_key(edge.source()) && nodes.contains_key(edge.target())
        });

        self.graph.replace(nodes, edges);
        let roots: Vec<NodeId> = self
            .graph
            .nodes()
            .iter()
            .filter(|(_, node)| node.parent_id().is_none())
            .map(|(node_id, _)| node_id.clone())
            .collect();
        for root in &roots {
            ops::refresh_subtree(&mut self.graph, root);
        }

        self.history.clear();
        self.selection.clear();
        self.ids
            .reconcile_from(self.graph.nodes().keys().map(|id| id.as_str()));
    }
}

/// Whether `node_id` appears in its own parent chain. Bounded by the node
/// count so a chain that cycles without revisiting `node_id` still terminates.
fn on_own_parent_chain(nodes: &BTreeMap<NodeId, Node>, node_id: &NodeId) -> bool {
    let mut current = nodes.get(node_id).and_then(Node::parent_id);
    let mut hops = 0usize;
    while let Some(parent_id) = current {
        if parent_id == node_id {
            return true;
        }
        hops += 1;
        if hops > nodes.len() {
            return false;
        }
        current = nodes.get(parent_id).and_then(Node::parent_id);
    }
    false
}
