// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Atomic mutation primitives on the [`GraphStore`].
//!
//! Every function either applies fully or returns a typed error with the
//! graph untouched; the facade and merge engine decide whether an error is
//! surfaced or silently absorbed. Derived fields (`depth`, `z_order`) are
//! recomputed here so callers never hand-maintain them.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{Edge, EdgeId, GraphStore, Node, NodeId};

mod groups;

pub use groups::{
    add_node_to_group, create_group, delete_group, eligible_members, remove_from_group, ungroup,
    GROUP_MARGIN, Z_ORDER_STEP,
};
pub(crate) use groups::refresh_subtree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOpError {
    NodeExists { node_id: NodeId },
    NodeNotFound { node_id: NodeId },
    EdgeExists { edge_id: EdgeId },
    EdgeNotFound { edge_id: EdgeId },
    MissingEndpoint { node_id: NodeId },
    ParentNotFound { parent_id: NodeId },
    NotAGroup { node_id: NodeId },
    AlreadyGrouped { node_id: NodeId },
    NotGrouped { node_id: NodeId },
    WouldCycle { node_id: NodeId },
    TooFewSiblings { eligible: usize },
}

impl fmt::Display for GraphOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeExists { node_id } => write!(f, "node already exists (id={node_id})"),
            Self::NodeNotFound { node_id } => write!(f, "node not found (id={node_id})"),
            Self::EdgeExists { edge_id } => write!(f, "edge already exists (id={edge_id})"),
            Self::EdgeNotFound { edge_id } => write!(f, "edge not found (id={edge_id})"),
            Self::MissingEndpoint { node_id } => {
                write!(f, "edge endpoint not found (node id={node_id})")
            }
            Self::ParentNotFound { parent_id } => {
                write!(f, "parent node not found (id={parent_id})")
            }
            Self::NotAGroup { node_id } => write!(f, "node is not a group (id={node_id})"),
            Self::AlreadyGrouped { node_id } => {
                write!(f, "node already has a parent group (id={node_id})")
            }
            Self::NotGrouped { node_id } => write!(f, "node has no parent group (id={node_id})"),
            Self::WouldCycle { node_id } => {
                write!(f, "reparenting would create a parent cycle (id={node_id})")
            }
            Self::TooFewSiblings { eligible } => {
                write!(f, "grouping needs at least 2 sibling nodes (eligible={eligible})")
            }
        }
    }
}

impl std::error::Error for GraphOpError {}

/// Inserts `node` under `node_id`. The node's `parent_id`, if set, must
/// resolve to an existing group; depth and z-order are recomputed from it.
pub fn add_node(graph: &mut GraphStore, node_id: NodeId, mut node: Node) -> Result<(), GraphOpError> {
    if graph.contains_node(&node_id) {
        return Err(GraphOpError::NodeExists { node_id });
    }

    let depth = match node.parent_id() {
        Some(parent_id) => {
            let Some(parent) = graph.nodes().get(parent_id) else {
                return Err(GraphOpError::ParentNotFound {
                    parent_id: parent_id.clone(),
                });
            };
            if !parent.is_group() {
                return Err(GraphOpError::NotAGroup {
                    node_id: parent_id.clone(),
                });
            }
            parent.depth() + 1
        }
        None => 0,
    };
    node.set_depth_and_z_order(depth, depth as i32 * Z_ORDER_STEP);

    graph.nodes_mut().insert(node_id, node);
    Ok(())
}

pub fn set_node_label(
    graph: &mut GraphStore,
    node_id: &NodeId,
    label: impl Into<String>,
) -> Result<(), GraphOpError> {
    node_mut(graph, node_id)?.data_mut().set_label(label);
    Ok(())
}

pub fn add_node_tag(
    graph: &mut GraphStore,
    node_id: &NodeId,
    tag: impl Into<String>,
) -> Result<(), GraphOpError> {
    node_mut(graph, node_id)?.data_mut().add_tag(tag);
    Ok(())
}

pub fn remove_node_tag(
    graph: &mut GraphStore,
    node_id: &NodeId,
    tag: &str,
) -> Result<(), GraphOpError> {
    node_mut(graph, node_id)?.data_mut().remove_tag(tag);
    Ok(())
}

pub fn add_node_volume(
    graph: &mut GraphStore,
    node_id: &NodeId,
    volume: crate::model::Volume,
) -> Result<(), GraphOpError> {
    node_mut(graph, node_id)?.data_mut().add_volume(volume);
    Ok(())
}

pub fn remove_node_volume(
    graph: &mut GraphStore,
    node_id: &NodeId,
    name: &str,
) -> Result<(), GraphOpError> {
    node_mut(graph, node_id)?.data_mut().remove_volume(name);
    Ok(())
}

pub fn set_node_position(
    graph: &mut GraphStore,
    node_id: &NodeId,
    position: crate::model::Position,
) -> Result<(), GraphOpError> {
    node_mut(graph, node_id)?.set_position(position);
    Ok(())
}

/// Translates every node carrying the multi-selection flag. Returns how many
/// nodes moved.
pub fn translate_selected(graph: &mut GraphStore, dx: f64, dy: f64) -> usize {
    let mut moved = 0;
    for node in graph.nodes_mut().values_mut() {
        if node.selected() {
            node.translate(dx, dy);
            moved += 1;
        }
    }
    moved
}

pub fn set_all_selected(graph: &mut GraphStore, selected: bool) {
    for node in graph.nodes_mut().values_mut() {
        node.set_selected(selected);
    }
}

/// Removes `node_id` together with its transitive descendants and every edge
/// incident to any removed node. Cascade is mandatory; anything less would
/// leave dangling `parent_id`s or edges. Returns the removed node ids.
pub fn remove_node(graph: &mut GraphStore, node_id: &NodeId) -> Result<Vec<NodeId>, GraphOpError> {
    if !graph.contains_node(node_id) {
        return Err(GraphOpError::NodeNotFound {
            node_id: node_id.clone(),
        });
    }

    let mut removed: BTreeSet<NodeId> = graph.descendants_of(node_id).into_iter().collect();
    removed.insert(node_id.clone());
    remove_node_set(graph, &removed);
    Ok(removed.into_iter().collect())
}

/// Cascade-removes every node carrying the multi-selection flag, applying the
/// same descendant rule as [`remove_node`]. Returns the removed node ids.
pub fn remove_selected(graph: &mut GraphStore) -> Vec<NodeId> {
    let mut removed: BTreeSet<NodeId> = BTreeSet::new();
    for node_id in graph.selected_node_ids() {
        removed.extend(graph.descendants_of(&node_id));
        removed.insert(node_id);
    }
    if removed.is_empty() {
        return Vec::new();
    }
    remove_node_set(graph, &removed);
    removed.into_iter().collect()
}

fn remove_node_set(graph: &mut GraphStore, removed: &BTreeSet<NodeId>) {
    graph
        .nodes_mut()
        .retain(|node_id, _| !removed.contains(node_id));
    graph
        .edges_mut()
        .retain(|_, edge| !removed.contains(edge.source()) && !removed.contains(edge.target()));
}

pub fn add_edge(graph: &mut GraphStore, edge_id: EdgeId, edge: Edge) -> Result<(), GraphOpError> {
    if graph.contains_edge(&edge_id) {
        return Err(GraphOpError::EdgeExists { edge_id });
    }
    if !graph.contains_node(edge.source()) {
        return Err(GraphOpError::MissingEndpoint {
            node_id: edge.source().clone(),
        });
    }
    if !graph.contains_node(edge.target()) {
        return Err(GraphOpError::MissingEndpoint {
            node_id: edge.target().clone(),
        });
    }
    graph.edges_mut().insert(edge_id, edge);
    Ok(())
}

/// Partial edge update; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePatch {
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    pub label: Option<String>,
}

pub fn update_edge(
    graph: &mut GraphStore,
    edge_id: &EdgeId,
    patch: EdgePatch,
) -> Result<(), GraphOpError> {
    let (updated_source, updated_target) = {
        let Some(existing) = graph.edges().get(edge_id) else {
            return Err(GraphOpError::EdgeNotFound {
                edge_id: edge_id.clone(),
            });
        };
        (
            patch.source.unwrap_or_else(|| existing.source().clone()),
            patch.target.unwrap_or_else(|| existing.target().clone()),
        )
    };

    if !graph.contains_node(&updated_source) {
        return Err(GraphOpError::MissingEndpoint {
            node_id: updated_source,
        });
    }
    if !graph.contains_node(&updated_target) {
        return Err(GraphOpError::MissingEndpoint {
            node_id: updated_target,
        });
    }

    let edge = graph
        .edges_mut()
        .get_mut(edge_id)
        .expect("edge existence checked above");
    edge.set_source(updated_source);
    edge.set_target(updated_target);
    if let Some(label) = patch.label {
        edge.data_mut().set_label(Some(label));
    }
    Ok(())
}

pub fn set_edge_label(
    graph: &mut GraphStore,
    edge_id: &EdgeId,
    label: Option<String>,
) -> Result<(), GraphOpError> {
    let Some(edge) = graph.edges_mut().get_mut(edge_id) else {
        return Err(GraphOpError::EdgeNotFound {
            edge_id: edge_id.clone(),
        });
    };
    edge.data_mut().set_label(label);
    Ok(())
}

pub fn remove_edge(graph: &mut GraphStore, edge_id: &EdgeId) -> Result<(), GraphOpError> {
    if graph.edges_mut().remove(edge_id).is_none() {
        return Err(GraphOpError::EdgeNotFound {
            edge_id: edge_id.clone(),
        });
    }
    Ok(())
}

fn node_mut<'a>(
    graph: &'a mut GraphStore,
    node_id: &NodeId,
) -> Result<&'a mut Node, GraphOpError> {
    graph
        .nodes_mut()
        .get_mut(node_id)
        .ok_or_else(|| GraphOpError::NodeNotFound {
            node_id: node_id.clone(),
        })
}
