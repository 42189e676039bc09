// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hierarchical grouping and ungrouping.
//!
//! Grouping is only valid among siblings: candidates that do not share the
//! reference parent are silently excluded, not merged across levels.

use std::collections::BTreeSet;

use crate::model::{GraphStore, Node, NodeId, Position};

use super::GraphOpError;

/// Z-order step per nesting level; `z_order = depth * Z_ORDER_STEP`.
pub const Z_ORDER_STEP: i32 = 10;

/// Margin between a new group's position and the top-left of its children.
pub const GROUP_MARGIN: f64 = 40.0;

/// Filters `node_ids` to the candidates eligible for one group: existing
/// nodes sharing the parent of the first resolvable candidate, deduplicated
/// in first-mention order.
pub fn eligible_members(graph: &GraphStore, node_ids: &[NodeId]) -> Vec<NodeId> {
    let mut reference_parent: Option<Option<NodeId>> = None;
    let mut seen = BTreeSet::new();
    let mut eligible = Vec::new();

    for node_id in node_ids {
        let Some(node) = graph.nodes().get(node_id) else {
            continue;
        };
        if !seen.insert(node_id.clone()) {
            continue;
        }
        let parent = node.parent_id().cloned();
        match &reference_parent {
            None => {
                reference_parent = Some(parent);
                eligible.push(node_id.clone());
            }
            Some(reference) if reference == &parent => eligible.push(node_id.clone()),
            Some(_) => {}
        }
    }

    eligible
}

/// Creates a group node under `group_id` enclosing the eligible subset of
/// `node_ids` (requires at least 2). The group inherits the children's common
/// parent; children are reparented to the group and their depth chain is
/// refreshed. Returns the grouped node ids.
pub fn create_group(
    graph: &mut GraphStore,
    group_id: NodeId,
    label: impl Into<String>,
    node_ids: &[NodeId],
) -> Result<Vec<NodeId>, GraphOpError> {
    if graph.contains_node(&group_id) {
        return Err(GraphOpError::NodeExists { node_id: group_id });
    }

    let eligible = eligible_members(graph, node_ids);
    if eligible.len() < 2 {
        return Err(GraphOpError::TooFewSiblings {
            eligible: eligible.len(),
        });
    }

    let common_parent = graph
        .nodes()
        .get(&eligible[0])
        .expect("eligible members exist")
        .parent_id()
        .cloned();

    let mut group = Node::new_group(label, group_position(graph, &eligible));
    group.set_parent_id(common_parent);
    graph.nodes_mut().insert(group_id.clone(), group);
    refresh_subtree(graph, &group_id);

    for node_id in &eligible {
        let node = graph
            .nodes_mut()
            .get_mut(node_id)
            .expect("eligible members exist");
        node.set_parent_id(Some(group_id.clone()));
        refresh_subtree(graph, node_id);
    }

    Ok(eligible)
}

/// Dissolves a group: every direct child is reparented to the group's own
/// former parent (or root) and the group node is removed together with edges
/// touching it. Positions are absolute, so no coordinate transform is needed.
/// Returns the released child ids.
pub fn ungroup(graph: &mut GraphStore, group_id: &NodeId) -> Result<Vec<NodeId>, GraphOpError> {
    let former_parent = {
        let Some(group) = graph.nodes().get(group_id) else {
            return Err(GraphOpError::NodeNotFound {
                node_id: group_id.clone(),
            });
        };
        if !group.is_group() {
            return Err(GraphOpError::NotAGroup {
                node_id: group_id.clone(),
            });
        }
        group.parent_id().cloned()
    };

    let children = graph.children_of(group_id);
    for child_id in &children {
        let child = graph
            .nodes_mut()
            .get_mut(child_id)
            .expect("child resolved via parent lookup");
        child.set_parent_id(former_parent.clone());
        refresh_subtree(graph, child_id);
    }

    graph.nodes_mut().remove(group_id);
    graph.edges_mut().retain(|_, edge| !edge.touches(group_id));

    Ok(children.into_vec())
}

/// Reparents a single ungrouped node into an existing group. Rejected if the
/// node already has a parent (ungroup it first), if the target is not a
/// group, or if the move would close a parent cycle.
pub fn add_node_to_group(
    graph: &mut GraphStore,
    node_id: &NodeId,
    group_id: &NodeId,
) -> Result<(), GraphOpError> {
    if !graph.contains_node(node_id) {
        return Err(GraphOpError::NodeNotFound {
            node_id: node_id.clone(),
        });
    }
    if !graph.is_group(group_id) {
        return Err(GraphOpError::NotAGroup {
            node_id: group_id.clone(),
        });
    }
    if node_id == group_id || graph.descendants_of(node_id).contains(group_id) {
        return Err(GraphOpError::WouldCycle {
            node_id: node_id.clone(),
        });
    }

    let node = graph
        .nodes_mut()
        .get_mut(node_id)
        .expect("node existence checked above");
    if node.parent_id().is_some() {
        return Err(GraphOpError::AlreadyGrouped {
            node_id: node_id.clone(),
        });
    }
    node.set_parent_id(Some(group_id.clone()));
    refresh_subtree(graph, node_id);
    Ok(())
}

/// Clears a node's parent, moving it (and its subtree's depth chain) back to
/// the root level.
pub fn remove_from_group(graph: &mut GraphStore, node_id: &NodeId) -> Result<(), GraphOpError> {
    let Some(node) = graph.nodes_mut().get_mut(node_id) else {
        return Err(GraphOpError::NodeNotFound {
            node_id: node_id.clone(),
        });
    };
    if node.parent_id().is_none() {
        return Err(GraphOpError::NotGrouped {
            node_id: node_id.clone(),
        });
    }
    node.set_parent_id(None);
    refresh_subtree(graph, node_id);
    Ok(())
}

/// Deletes a group node. With `cascade_children` the whole subtree and its
/// incident edges go; without, children are released to the group's former
/// parent first and only the group node is removed. Returns the removed node
/// ids.
pub fn delete_group(
    graph: &mut GraphStore,
    group_id: &NodeId,
    cascade_children: bool,
) -> Result<Vec<NodeId>, GraphOpError> {
    if !graph.is_group(group_id) {
        return if graph.contains_node(group_id) {
            Err(GraphOpError::NotAGroup {
                node_id: group_id.clone(),
            })
        } else {
            Err(GraphOpError::NodeNotFound {
                node_id: group_id.clone(),
            })
        };
    }

    if cascade_children {
        super::remove_node(graph, group_id)
    } else {
        ungroup(graph, group_id)?;
        Ok(vec![group_id.clone()])
    }
}

/// Recomputes `depth` and `z_order` for `root` (from its parent's depth) and
/// for its whole subtree.
pub(crate) fn refresh_subtree(graph: &mut GraphStore, root: &NodeId) {
    let mut pending = vec![root.clone()];
    while let Some(node_id) = pending.pop() {
        let parent_depth = graph
            .nodes()
            .get(&node_id)
            .and_then(Node::parent_id)
            .and_then(|parent_id| graph.nodes().get(parent_id))
            .map(Node::depth);
        let depth = parent_depth.map_or(0, |d| d + 1);

        if let Some(node) = graph.nodes_mut().get_mut(&node_id) {
            node.set_depth_and_z_order(depth, depth as i32 * Z_ORDER_STEP);
        }
        pending.extend(graph.children_of(&node_id));
    }
}

fn group_position(graph: &GraphStore, members: &[NodeId]) -> Position {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for node_id in members {
        if let Some(node) = graph.nodes().get(node_id) {
            min_x = min_x.min(node.position().x);
            min_y = min_y.min(node.position().y);
        }
    }
    if !min_x.is_finite() || !min_y.is_finite() {
        return Position::default();
    }
    Position::new(min_x - GROUP_MARGIN, min_y - GROUP_MARGIN)
}
