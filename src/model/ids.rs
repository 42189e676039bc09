// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable identifier used across the model, merge, and store surfaces.
///
/// This is intentionally std-only and does not enforce any particular naming
/// scheme; externally merged ids are arbitrary strings. It only enforces that
/// the id is a non-empty path segment (i.e. contains no `/`), because ids
/// appear inside store paths and diff references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_segment(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsSlash => f.write_str("id must not contain '/'"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

/// Monotonic counters for locally minted node and group ids.
///
/// Locally created ids follow `node_<n>` / `group_<n>`. After a bulk load or a
/// merge introduces foreign ids, [`IdGenerator::reconcile_from`] bumps the
/// counters strictly above any numeric suffix observed, so later local ids can
/// never collide with externally supplied ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    next_node: u64,
    next_group: u64,
}

const NODE_ID_PREFIX: &str = "node_";
const GROUP_ID_PREFIX: &str = "group_";

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_node_id(&mut self) -> NodeId {
        let id = mint(NODE_ID_PREFIX, self.next_node);
        self.next_node += 1;
        id
    }

    pub fn fresh_group_id(&mut self) -> NodeId {
        let id = mint(GROUP_ID_PREFIX, self.next_group);
        self.next_group += 1;
        id
    }

    /// Bumps both counters strictly above any trailing decimal suffix found in
    /// `ids`. Ids without a trailing digit run are ignored.
    pub fn reconcile_from<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            let Some(suffix) = numeric_suffix(id) else {
                continue;
            };
            let floor = suffix.saturating_add(1);
            if id.starts_with(GROUP_ID_PREFIX) {
                self.next_group = self.next_group.max(floor);
            } else {
                self.next_node = self.next_node.max(floor);
            }
        }
    }
}

fn mint(prefix: &str, counter: u64) -> NodeId {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(counter);
    let mut value = String::with_capacity(prefix.len() + digits.len());
    value.push_str(prefix);
    value.push_str(digits);
    NodeId::new(value).expect("minted id is non-empty and slash-free")
}

fn numeric_suffix(id: &str) -> Option<u64> {
    let stripped = id.trim_end_matches(|ch: char| ch.is_ascii_digit());
    let run = &id[stripped.len()..];
    if run.is_empty() {
        return None;
    }
    run.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{Id, IdError, IdGenerator};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_slash() {
        let result: Result<Id<()>, _> = Id::new("a/b");
        assert_eq!(result, Err(IdError::ContainsSlash));
    }

    #[test]
    fn generator_mints_monotonic_ids() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.fresh_node_id().as_str(), "node_0");
        assert_eq!(ids.fresh_node_id().as_str(), "node_1");
        assert_eq!(ids.fresh_group_id().as_str(), "group_0");
        assert_eq!(ids.fresh_node_id().as_str(), "node_2");
    }

    #[test]
    fn reconcile_bumps_past_highest_suffix() {
        let mut ids = IdGenerator::new();
        ids.reconcile_from(["node_7", "web_server", "group_2", "api_12"]);
        assert_eq!(ids.fresh_node_id().as_str(), "node_13");
        assert_eq!(ids.fresh_group_id().as_str(), "group_3");
    }

    #[test]
    fn reconcile_ignores_ids_without_numeric_suffix() {
        let mut ids = IdGenerator::new();
        ids.reconcile_from(["database", "cache_", "node_abc"]);
        assert_eq!(ids.fresh_node_id().as_str(), "node_0");
    }
}
