// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical in-memory diagram model.
//!
//! Ids are typed wrappers, the graph is the single source of truth, and every
//! derived field (`depth`, `z_order`) is recomputed by the ops layer rather
//! than trusted from callers.

mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
mod graph;
mod ids;
mod node;

pub use edge::{Edge, EdgeData};
pub use graph::GraphStore;
pub use ids::{EdgeId, EdgeIdTag, Id, IdError, IdGenerator, NodeId, NodeIdTag};
pub use node::{Node, NodeData, NodeKind, Position, Volume};
