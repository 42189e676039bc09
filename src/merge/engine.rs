// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::history::History;
use crate::model::{Edge, EdgeData, EdgeId, GraphStore, IdGenerator, Node, NodeId, Position, Volume};
use crate::ops::{self, EdgePatch};

use super::{DiffEdge, DiffEdgePatch, DiffNode, DiffNodePatch, MergeDiff, MergeOutcome};

/// Applies one diff as a single logical transaction.
///
/// Phases run in a fixed order so no phase references an entity not yet
/// created or still pending deletion:
///
/// 1. delete nodes (cascading to descendants and incident edges)
/// 2. delete edges
/// 3. modify existing nodes
/// 4. modify existing edges
/// 5. add new nodes
/// 6. add new edges
/// 7. create groups
///
/// Exactly one history checkpoint precedes the transaction — the merge is one
/// undoable unit, not seven. Afterwards the id counters are reconciled above
/// every id the diff introduced, so locally minted ids never collide with
/// AI-introduced ones.
///
/// Any reference to a nonexistent node or edge skips that single
/// sub-operation and counts it in [`MergeOutcome::skipped`]; the rest of the
/// diff still applies.
pub fn apply_diff(
    graph: &mut GraphStore,
    ids: &mut IdGenerator,
    history: &mut History,
    diff: &MergeDiff,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    if diff.is_empty() {
        return outcome;
    }

    history.checkpoint(graph);

    for raw_id in &diff.nodes_to_delete {
        let Ok(node_id) = NodeId::new(raw_id.clone()) else {
            outcome.skipped += 1;
            continue;
        };
        match ops::remove_node(graph, &node_id) {
            Ok(removed) => outcome.nodes_removed += removed.len(),
            Err(_) => outcome.skipped += 1,
        }
    }

    for raw_id in &diff.edges_to_delete {
        let Ok(edge_id) = EdgeId::new(raw_id.clone()) else {
            outcome.skipped += 1;
            continue;
        };
        match ops::remove_edge(graph, &edge_id) {
            Ok(()) => outcome.edges_removed += 1,
            Err(_) => outcome.skipped += 1,
        }
    }

    for patch in &diff.nodes_to_modify {
        if modify_node(graph, patch) {
            outcome.nodes_modified += 1;
        } else {
            outcome.skipped += 1;
        }
    }

    for patch in &diff.edges_to_modify {
        if modify_edge(graph, patch) {
            outcome.edges_modified += 1;
        } else {
            outcome.skipped += 1;
        }
    }

    for entry in &diff.nodes_to_add {
        if add_node(graph, entry) {
            outcome.nodes_added += 1;
        } else {
            outcome.skipped += 1;
        }
    }

    for entry in &diff.edges_to_add {
        if add_edge(graph, entry) {
            outcome.edges_added += 1;
        } else {
            outcome.skipped += 1;
        }
    }

    for entry in &diff.groups_to_create {
        let Ok(group_id) = NodeId::new(entry.group_id.clone()) else {
            outcome.skipped += 1;
            continue;
        };
        let members: Vec<NodeId> = entry
            .node_ids
            .iter()
            .filter_map(|raw| NodeId::new(raw.clone()).ok())
            .collect();
        match ops::create_group(graph, group_id.clone(), entry.group_label.clone(), &members) {
            Ok(_) => {
                if let Some(group) = graph.nodes_mut().get_mut(&group_id) {
                    group.data_mut().replace_tags(entry.group_tags.clone());
                }
                outcome.groups_created += 1;
            }
            Err(_) => outcome.skipped += 1,
        }
    }

    ids.reconcile_from(
        diff.nodes_to_add
            .iter()
            .map(|entry| entry.id.as_str())
            .chain(diff.groups_to_create.iter().map(|entry| entry.group_id.as_str())),
    );

    outcome
}

fn modify_node(graph: &mut GraphStore, patch: &DiffNodePatch) -> bool {
    let Ok(node_id) = NodeId::new(patch.node_id.clone()) else {
        return false;
    };
    if !graph.contains_node(&node_id) {
        return false;
    }

    // Reparent first: the target must resolve to a group and must not close a
    // parent cycle, otherwise the whole patch entry is skipped.
    if let Some(raw_parent) = &patch.new_parent_group {
        let Ok(parent_id) = NodeId::new(raw_parent.clone()) else {
            return false;
        };
        if !graph.is_group(&parent_id)
            || parent_id == node_id
            || graph.descendants_of(&node_id).contains(&parent_id)
        {
            return false;
        }
        let node = graph
            .nodes_mut()
            .get_mut(&node_id)
            .expect("node existence checked above");
        node.set_parent_id(Some(parent_id));
        ops::refresh_subtree(graph, &node_id);
    }

    let node = graph
        .nodes_mut()
        .get_mut(&node_id)
        .expect("node existence checked above");
    let data = node.data_mut();

    if let Some(label) = &patch.new_label {
        data.set_label(label.clone());
    }

    // `new_tags` wins outright; otherwise add/remove apply as set
    // union/difference.
    if let Some(new_tags) = &patch.new_tags {
        data.replace_tags(new_tags.iter().cloned());
    } else {
        if let Some(add_tags) = &patch.add_tags {
            for tag in add_tags {
                data.add_tag(tag.clone());
            }
        }
        if let Some(remove_tags) = &patch.remove_tags {
            for tag in remove_tags {
                data.remove_tag(tag);
            }
        }
    }

    if let Some(volumes) = &patch.add_volumes {
        for volume in volumes {
            data.add_volume(Volume::new(volume.name.clone(), volume.mount_path.clone()));
        }
    }

    true
}

fn modify_edge(graph: &mut GraphStore, patch: &DiffEdgePatch) -> bool {
    let Ok(edge_id) = EdgeId::new(patch.edge_id.clone()) else {
        return false;
    };
    let source = match &patch.new_source {
        Some(raw) => match NodeId::new(raw.clone()) {
            Ok(node_id) => Some(node_id),
            Err(_) => return false,
        },
        None => None,
    };
    let target = match &patch.new_target {
        Some(raw) => match NodeId::new(raw.clone()) {
            Ok(node_id) => Some(node_id),
            Err(_) => return false,
        },
        None => None,
    };

    ops::update_edge(
        graph,
        &edge_id,
        EdgePatch {
            source,
            target,
            label: patch.new_label.clone(),
        },
    )
    .is_ok()
}

fn add_node(graph: &mut GraphStore, entry: &DiffNode) -> bool {
    let Ok(node_id) = NodeId::new(entry.id.clone()) else {
        return false;
    };

    let position = Position::new(entry.position.x, entry.position.y);
    let is_group = entry.data.is_group || entry.kind == "group";
    let mut node = if is_group {
        Node::new_group(entry.data.label.clone(), position)
    } else {
        Node::new(entry.data.label.clone(), entry.data.node_type.clone(), position)
    };
    if !is_group && entry.data.node_type.is_empty() {
        node.data_mut().set_node_type("default");
    }
    node.data_mut().replace_tags(entry.data.tags.iter().cloned());
    for volume in &entry.data.volumes {
        node.data_mut()
            .add_volume(Volume::new(volume.name.clone(), volume.mount_path.clone()));
    }

    // Attach to the named parent when it resolves to a group; otherwise the
    // node lands at root rather than being dropped.
    if let Some(raw_parent) = &entry.parent_node {
        if let Ok(parent_id) = NodeId::new(raw_parent.clone()) {
            if graph.is_group(&parent_id) {
                node.set_parent_id(Some(parent_id));
            }
        }
    }

    ops::add_node(graph, node_id, node).is_ok()
}

fn add_edge(graph: &mut GraphStore, entry: &DiffEdge) -> bool {
    let Ok(edge_id) = EdgeId::new(entry.id.clone()) else {
        return false;
    };
    let (Ok(source), Ok(target)) = (
        NodeId::new(entry.source.clone()),
        NodeId::new(entry.target.clone()),
    ) else {
        return false;
    };

    let data = entry.data.as_ref().map(|data| {
        EdgeData::new(data.label.clone(), data.color_from_target.unwrap_or(false))
    });

    ops::add_edge(graph, edge_id, Edge::new_with(source, target, data)).is_ok()
}
