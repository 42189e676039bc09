// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;

/// Whether a node is a plain canvas element or a container for other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Group,
}

/// Absolute canvas position. Positions stay absolute even for grouped nodes,
/// so ungrouping never needs a coordinate transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    name: String,
    mount_path: String,
}

impl Volume {
    pub fn new(name: impl Into<String>, mount_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mount_path: mount_path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }
}

/// User-editable payload of a node. Pure data patches on this struct are not
/// history-checkpointed; only structural graph changes are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    label: String,
    node_type: String,
    tags: Vec<String>,
    volumes: Vec<Volume>,
}

impl NodeData {
    pub fn new(label: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            node_type: node_type.into(),
            tags: Vec::new(),
            volumes: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn set_node_type(&mut self, node_type: impl Into<String>) {
        self.node_type = node_type.into();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Adds a tag unless it is already present; tag order is insertion order.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.iter().any(|existing| existing == &tag) {
            self.tags.push(tag);
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|existing| existing != tag);
    }

    /// Replaces the tag set outright, deduplicating while preserving order.
    pub fn replace_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag);
        }
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    pub fn add_volume(&mut self, volume: Volume) {
        self.volumes.push(volume);
    }

    pub fn remove_volume(&mut self, name: &str) {
        self.volumes.retain(|volume| volume.name() != name);
    }
}

/// A single canvas node. The id lives as the key of the owning
/// [`GraphStore`](super::GraphStore) collection, not inside the node.
///
/// `depth` and `z_order` are derived from the parent chain and maintained by
/// the ops layer; callers never set them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    position: Position,
    parent_id: Option<NodeId>,
    depth: u32,
    z_order: i32,
    selected: bool,
    data: NodeData,
}

impl Node {
    pub fn new(label: impl Into<String>, node_type: impl Into<String>, position: Position) -> Self {
        Self {
            kind: NodeKind::Leaf,
            position,
            parent_id: None,
            depth: 0,
            z_order: 0,
            selected: false,
            data: NodeData::new(label, node_type),
        }
    }

    pub fn new_group(label: impl Into<String>, position: Position) -> Self {
        Self {
            kind: NodeKind::Group,
            position,
            parent_id: None,
            depth: 0,
            z_order: 0,
            selected: false,
            data: NodeData::new(label, "group"),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_group(&self) -> bool {
        self.kind == NodeKind::Group
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position.translate(dx, dy);
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    pub fn set_parent_id(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub(crate) fn set_depth_and_z_order(&mut self, depth: u32, z_order: i32) {
        self.depth = depth;
        self.z_order = z_order;
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeKind, Position, Volume};

    #[test]
    fn node_can_be_constructed_and_updated() {
        let mut node = Node::new("API", "service", Position::new(10.0, 20.0));
        assert_eq!(node.kind(), NodeKind::Leaf);
        assert!(!node.is_group());
        assert_eq!(node.data().label(), "API");
        assert_eq!(node.data().node_type(), "service");
        assert_eq!(node.depth(), 0);
        assert_eq!(node.parent_id(), None);

        node.data_mut().set_label("Gateway");
        node.translate(5.0, -5.0);

        assert_eq!(node.data().label(), "Gateway");
        assert_eq!(node.position(), Position::new(15.0, 15.0));
    }

    #[test]
    fn group_node_reports_group_kind() {
        let group = Node::new_group("Backend", Position::default());
        assert_eq!(group.kind(), NodeKind::Group);
        assert!(group.is_group());
        assert_eq!(group.data().node_type(), "group");
    }

    #[test]
    fn tags_deduplicate_and_preserve_order() {
        let mut node = Node::new("DB", "database", Position::default());
        node.data_mut().add_tag("storage");
        node.data_mut().add_tag("critical");
        node.data_mut().add_tag("storage");
        assert_eq!(node.data().tags(), ["storage", "critical"]);

        node.data_mut().remove_tag("storage");
        assert_eq!(node.data().tags(), ["critical"]);

        node.data_mut().replace_tags(["a", "b", "a"]);
        assert_eq!(node.data().tags(), ["a", "b"]);
    }

    #[test]
    fn volumes_append_and_remove_by_name() {
        let mut node = Node::new("DB", "database", Position::default());
        node.data_mut().add_volume(Volume::new("data", "/var/lib/data"));
        node.data_mut().add_volume(Volume::new("logs", "/var/log"));
        assert_eq!(node.data().volumes().len(), 2);

        node.data_mut().remove_volume("data");
        assert_eq!(node.data().volumes().len(), 1);
        assert_eq!(node.data().volumes()[0].name(), "logs");
    }
}
