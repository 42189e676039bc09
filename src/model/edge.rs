// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;

/// Optional presentation payload of an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeData {
    label: Option<String>,
    color_from_target: bool,
}

impl EdgeData {
    pub fn new(label: Option<String>, color_from_target: bool) -> Self {
        Self {
            label,
            color_from_target,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn color_from_target(&self) -> bool {
        self.color_from_target
    }

    pub fn set_color_from_target(&mut self, color_from_target: bool) {
        self.color_from_target = color_from_target;
    }
}

/// A directed edge. Both endpoints must resolve to existing nodes by the end
/// of every public operation; the ops layer enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    data: Option<EdgeData>,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            data: None,
        }
    }

    pub fn new_with(source: NodeId, target: NodeId, data: Option<EdgeData>) -> Self {
        Self {
            source,
            target,
            data,
        }
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn set_target(&mut self, target: NodeId) {
        self.target = target;
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }

    pub fn data(&self) -> Option<&EdgeData> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> &mut EdgeData {
        self.data.get_or_insert_with(EdgeData::default)
    }

    pub fn set_data(&mut self, data: Option<EdgeData>) {
        self.data = data;
    }
}
