// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structured diffs produced by the external AI backend, and the engine that
//! applies them.
//!
//! The diff is untrusted, best-effort input: every field defaults, unknown
//! references are skipped per sub-operation, and the engine never fails on
//! malformed content — partial application is preferred over total rejection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod engine;

pub use engine::apply_diff;

/// One transaction's worth of externally generated changes. Consumed once,
/// never retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MergeDiff {
    #[serde(default)]
    pub nodes_to_add: Vec<DiffNode>,
    #[serde(default)]
    pub nodes_to_modify: Vec<DiffNodePatch>,
    #[serde(default)]
    pub nodes_to_delete: Vec<String>,
    #[serde(default)]
    pub edges_to_add: Vec<DiffEdge>,
    #[serde(default)]
    pub edges_to_modify: Vec<DiffEdgePatch>,
    #[serde(default)]
    pub edges_to_delete: Vec<String>,
    #[serde(default)]
    pub groups_to_create: Vec<DiffGroup>,
}

impl MergeDiff {
    pub fn is_empty(&self) -> bool {
        self.nodes_to_add.is_empty()
            && self.nodes_to_modify.is_empty()
            && self.nodes_to_delete.is_empty()
            && self.edges_to_add.is_empty()
            && self.edges_to_modify.is_empty()
            && self.edges_to_delete.is_empty()
            && self.groups_to_create.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffPosition {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffVolume {
    pub name: String,
    #[serde(rename = "mountPath")]
    pub mount_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffNodeData {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "nodeType", default)]
    pub node_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub volumes: Vec<DiffVolume>,
    #[serde(rename = "isGroup", default)]
    pub is_group: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffNode {
    pub id: String,
    /// `"leaf"` or `"group"`; `data.isGroup` wins if the two disagree.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub position: DiffPosition,
    #[serde(default)]
    pub data: DiffNodeData,
    #[serde(rename = "parentNode", default)]
    pub parent_node: Option<String>,
    /// Renderer hints passed through by the generator; the engine ignores
    /// them but tolerates their presence.
    #[serde(default)]
    pub extent: Option<String>,
    #[serde(rename = "expandParent", default)]
    pub expand_parent: Option<bool>,
    #[serde(default)]
    pub style: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffNodePatch {
    pub node_id: String,
    #[serde(default)]
    pub new_label: Option<String>,
    /// Replaces the tag set outright; wins over `add_tags`/`remove_tags`.
    #[serde(default)]
    pub new_tags: Option<Vec<String>>,
    #[serde(default)]
    pub add_tags: Option<Vec<String>>,
    #[serde(default)]
    pub remove_tags: Option<Vec<String>>,
    #[serde(default)]
    pub add_volumes: Option<Vec<DiffVolume>>,
    #[serde(default)]
    pub new_parent_group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffEdgeData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "colorFromTarget", default)]
    pub color_from_target: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "sourceHandle", default)]
    pub source_handle: Option<String>,
    #[serde(rename = "targetHandle", default)]
    pub target_handle: Option<String>,
    #[serde(default)]
    pub data: Option<DiffEdgeData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffEdgePatch {
    pub edge_id: String,
    #[serde(default)]
    pub new_label: Option<String>,
    #[serde(default)]
    pub new_source: Option<String>,
    #[serde(default)]
    pub new_target: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffGroup {
    pub group_id: String,
    #[serde(default)]
    pub group_label: String,
    #[serde(default)]
    pub group_tags: Vec<String>,
    #[serde(default)]
    pub node_ids: Vec<String>,
}

/// Coarse per-family counts of what one diff actually did, so a rendering
/// layer can refresh derived state and callers can observe skips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct MergeOutcome {
    pub nodes_added: usize,
    pub nodes_modified: usize,
    pub nodes_removed: usize,
    pub edges_added: usize,
    pub edges_modified: usize,
    pub edges_removed: usize,
    pub groups_created: usize,
    /// Sub-operations dropped because they referenced something that does not
    /// exist (or no longer exists) in the graph.
    pub skipped: usize,
}
