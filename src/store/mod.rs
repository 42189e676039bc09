// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram persistence.
//!
//! The on-disk format is a single JSON document with camelCase field names,
//! matching the wire shape the merge layer already speaks. Derived node state
//! (depth, z-order, selection) is not persisted; it is recomputed on load.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{Edge, EdgeData, EdgeId, IdError, Node, NodeId, Position, Volume};

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Id {
        value: String,
        source: IdError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Id { value, source } => write!(f, "invalid id {value:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Id { source, .. } => Some(source),
        }
    }
}

/// Durability level for diagram writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and the rename to stable
    /// storage where possible. Exact guarantees are platform/filesystem-
    /// dependent.
    Durable,
}

/// Raw diagram collections as loaded from or written to a backing store.
pub type DiagramContents = (BTreeMap<NodeId, Node>, BTreeMap<EdgeId, Edge>);

/// Abstraction over diagram persistence so the editor shell can swap the
/// JSON file backend for anything else.
pub trait DiagramStore {
    /// Loads the stored diagram, or `Ok(None)` when nothing has been saved
    /// yet.
    fn load(&self) -> Result<Option<DiagramContents>, StoreError>;

    fn save(
        &self,
        nodes: &BTreeMap<NodeId, Node>,
        edges: &BTreeMap<EdgeId, Edge>,
    ) -> Result<(), StoreError>;
}

/// Stores the diagram as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    durability: WriteDurability,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(path: impl Into<PathBuf>, durability: WriteDurability) -> Self {
        Self {
            path: path.into(),
            durability,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagramStore for JsonFileStore {
    fn load(&self) -> Result<Option<DiagramContents>, StoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let file: DiagramFile =
            serde_json::from_slice(&contents).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        file.into_contents().map(Some)
    }

    fn save(
        &self,
        nodes: &BTreeMap<NodeId, Node>,
        edges: &BTreeMap<EdgeId, Edge>,
    ) -> Result<(), StoreError> {
        let file = DiagramFile::from_contents(nodes, edges);
        let json = serde_json::to_vec_pretty(&file).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, &json, self.durability)
    }
}

/// Writes `contents` to a sibling temp file, then renames it into place so a
/// crash mid-write never leaves a truncated diagram behind.
fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "diagram".to_owned());
    let tmp_path = match parent {
        Some(parent) => parent.join(format!(".galatea.tmp.{file_name}.{nanos}")),
        None => PathBuf::from(format!(".galatea.tmp.{file_name}.{nanos}")),
    };

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        if let Some(parent) = parent {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DiagramFile {
    #[serde(default)]
    nodes: Vec<NodeFile>,
    #[serde(default)]
    edges: Vec<EdgeFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeFile {
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    position: PositionFile,
    #[serde(rename = "parentNode", default, skip_serializing_if = "Option::is_none")]
    parent_node: Option<String>,
    data: NodeDataFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeDataFile {
    #[serde(default)]
    label: String,
    #[serde(rename = "nodeType", default)]
    node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<VolumeFile>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct PositionFile {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VolumeFile {
    name: String,
    #[serde(rename = "mountPath")]
    mount_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeFile {
    id: String,
    source: String,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<EdgeDataFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeDataFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(rename = "colorFromTarget", default)]
    color_from_target: bool,
}

impl DiagramFile {
    fn from_contents(nodes: &BTreeMap<NodeId, Node>, edges: &BTreeMap<EdgeId, Edge>) -> Self {
        let nodes = nodes
            .iter()
            .map(|(id, node)| NodeFile {
                id: id.as_str().to_owned(),
                kind: if node.is_group() { "group" } else { "custom" }.to_owned(),
                position: PositionFile {
                    x: node.position().x,
                    y: node.position().y,
                },
                parent_node: node.parent_id().map(|parent| parent.as_str().to_owned()),
                data: NodeDataFile {
                    label: node.data().label().to_owned(),
                    node_type: node.data().node_type().to_owned(),
                    tags: node.data().tags().to_vec(),
                    volumes: node
                        .data()
                        .volumes()
                        .iter()
                        .map(|volume| VolumeFile {
                            name: volume.name().to_owned(),
                            mount_path: volume.mount_path().to_owned(),
                        })
                        .collect(),
                },
            })
            .collect();
        let edges = edges
            .iter()
            .map(|(id, edge)| EdgeFile {
                id: id.as_str().to_owned(),
                source: edge.source().as_str().to_owned(),
                target: edge.target().as_str().to_owned(),
                data: edge.data().map(|data| EdgeDataFile {
                    label: data.label().map(str::to_owned),
                    color_from_target: data.color_from_target(),
                }),
            })
            .collect();
        Self { nodes, edges }
    }

    fn into_contents(self) -> Result<DiagramContents, StoreError> {
        let mut nodes = BTreeMap::new();
        for entry in self.nodes {
            let node_id = parse_id::<crate::model::NodeIdTag>(entry.id)?;
            let position = Position::new(entry.position.x, entry.position.y);
            let mut node = if entry.kind == "group" || entry.data.node_type == "group" {
                Node::new_group(entry.data.label, position)
            } else {
                Node::new(entry.data.label, entry.data.node_type, position)
            };
            node.data_mut().replace_tags(entry.data.tags);
            for volume in entry.data.volumes {
                node.data_mut()
                    .add_volume(Volume::new(volume.name, volume.mount_path));
            }
            if let Some(raw_parent) = entry.parent_node {
                node.set_parent_id(Some(parse_id(raw_parent)?));
            }
            nodes.insert(node_id, node);
        }

        let mut edges = BTreeMap::new();
        for entry in self.edges {
            let edge_id = parse_id::<crate::model::EdgeIdTag>(entry.id)?;
            let source = parse_id(entry.source)?;
            let target = parse_id(entry.target)?;
            let data = entry
                .data
                .map(|data| EdgeData::new(data.label, data.color_from_target));
            edges.insert(edge_id, Edge::new_with(source, target, data));
        }

        Ok((nodes, edges))
    }
}

fn parse_id<T>(value: String) -> Result<crate::model::Id<T>, StoreError> {
    crate::model::Id::new(value.clone()).map_err(|source| StoreError::Id { value, source })
}
