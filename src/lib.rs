// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea — graph mutation and consistency engine for canvas diagram editors.
//!
//! The crate owns the canonical in-memory diagram graph (nodes, edges, nested
//! groups) and every way it may change: direct CRUD, hierarchical grouping,
//! bounded snapshot undo/redo, clipboard duplication, and the merge engine
//! that applies best-effort structured diffs produced by an external AI
//! backend. Rendering, networking, and prompt logic live outside; they talk
//! to [`workflow::Editor`].

pub mod clipboard;
pub mod history;
pub mod merge;
pub mod model;
pub mod ops;
pub mod selection;
pub mod store;
pub mod workflow;
