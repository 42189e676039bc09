// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bounded snapshot-based undo/redo.
//!
//! Snapshots are structurally independent clones of the whole graph. This
//! trades memory for correctness under every mutation shape (CRUD, grouping,
//! merges) without needing an inverse per operation type.

use crate::model::GraphStore;

/// Maximum number of past snapshots retained; oldest dropped first.
pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayState {
    Idle,
    Replaying,
}

/// Past/future snapshot stacks over a [`GraphStore`].
///
/// The replay state is an explicit machine checked synchronously: `checkpoint`
/// is a no-op while a replay is installing a snapshot, and the state returns
/// to `Idle` before `undo`/`redo` return.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<GraphStore>,
    future: Vec<GraphStore>,
    state: ReplayState,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            state: ReplayState::Idle,
        }
    }

    /// Clones `current` onto the past stack and invalidates the redo stack.
    /// Branching redo timelines are not supported. No-op during replay.
    pub fn checkpoint(&mut self, current: &GraphStore) {
        if self.state == ReplayState::Replaying {
            return;
        }
        if self.past.len() == MAX_HISTORY {
            self.past.remove(0);
        }
        self.past.push(current.clone());
        self.future.clear();
    }

    /// Installs the most recent past snapshot into `current`; the replaced
    /// state moves to the future stack. Returns `false` on an empty past.
    pub fn undo(&mut self, current: &mut GraphStore) -> bool {
        let Some(snapshot) = self.past.pop() else {
            return false;
        };
        self.state = ReplayState::Replaying;
        self.future.push(current.clone());
        *current = snapshot;
        self.state = ReplayState::Idle;
        true
    }

    /// Symmetric to [`History::undo`]; no-op on an empty future stack.
    pub fn redo(&mut self, current: &mut GraphStore) -> bool {
        let Some(snapshot) = self.future.pop() else {
            return false;
        };
        self.state = ReplayState::Replaying;
        self.past.push(current.clone());
        *current = snapshot;
        self.state = ReplayState::Idle;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    #[cfg(test)]
    fn past_len(&self) -> usize {
        self.past.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{History, MAX_HISTORY};
    use crate::model::fixtures;
    use crate::model::GraphStore;

    #[test]
    fn undo_restores_the_preceding_snapshot_exactly() {
        let mut graph = fixtures::small_flat_graph();
        let before = graph.clone();
        let mut history = History::new();

        history.checkpoint(&graph);
        graph.nodes_mut().remove(&fixtures::nid("a"));
        graph.edges_mut().remove(&fixtures::eid("ab"));
        assert_ne!(graph, before);

        assert!(history.undo(&mut graph));
        assert_eq!(graph, before);
    }

    #[test]
    fn redo_after_undo_restores_the_mutated_state_exactly() {
        let mut graph = fixtures::small_flat_graph();
        let mut history = History::new();

        history.checkpoint(&graph);
        graph.nodes_mut().remove(&fixtures::nid("b"));
        graph.edges_mut().remove(&fixtures::eid("ab"));
        let mutated = graph.clone();

        assert!(history.undo(&mut graph));
        assert!(history.redo(&mut graph));
        assert_eq!(graph, mutated);
    }

    #[test]
    fn undo_and_redo_underflow_are_no_ops() {
        let mut graph = GraphStore::new();
        let mut history = History::new();
        assert!(!history.undo(&mut graph));
        assert!(!history.redo(&mut graph));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn checkpoint_clears_the_redo_stack() {
        let mut graph = fixtures::small_flat_graph();
        let mut history = History::new();

        history.checkpoint(&graph);
        graph.nodes_mut().remove(&fixtures::nid("a"));
        graph.edges_mut().remove(&fixtures::eid("ab"));
        history.undo(&mut graph);
        assert!(history.can_redo());

        history.checkpoint(&graph);
        assert!(!history.can_redo());
    }

    #[test]
    fn past_stack_is_clamped_to_max_history() {
        let graph = GraphStore::new();
        let mut history = History::new();
        for _ in 0..(MAX_HISTORY + 13) {
            history.checkpoint(&graph);
        }
        assert_eq!(history.past_len(), MAX_HISTORY);
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut graph = fixtures::small_flat_graph();
        let mut history = History::new();
        history.checkpoint(&graph);
        graph.nodes_mut().remove(&fixtures::nid("a"));
        graph.edges_mut().remove(&fixtures::eid("ab"));
        history.undo(&mut graph);

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
