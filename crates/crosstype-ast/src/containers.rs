//! Node containers: `NodeSet` and `NodeMap`.
//!
//! Both hold node indices in insertion order without duplicates. A `NodeSet`
//! is unique by identity; a `NodeMap` is unique by name, where the key is
//! always the held node's own name. Shared behaviour lives in the
//! [`NodeIterable`] trait.

use crate::arena::NodeArena;
use crate::node::NodeIndex;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;
type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Behaviour shared by `NodeSet` and `NodeMap`.
pub trait NodeIterable {
    type Nodes<'a>: Iterator<Item = NodeIndex>
    where
        Self: 'a;

    /// Member nodes in insertion order.
    fn nodes(&self) -> Self::Nodes<'_>;

    fn len(&self) -> usize;

    fn contains_node(&self, node: NodeIndex) -> bool;

    /// Drop members that no longer refer to live nodes. Returns the number removed.
    fn prune(&mut self, arena: &NodeArena) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_vec(&self) -> Vec<NodeIndex> {
        self.nodes().collect()
    }

    /// Like [`to_vec`](Self::to_vec), but `None` when empty.
    fn to_vec_or_none(&self) -> Option<Vec<NodeIndex>> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_vec())
        }
    }

    /// First member matching `predicate`.
    fn find(&self, mut predicate: impl FnMut(NodeIndex) -> bool) -> Option<NodeIndex> {
        self.nodes().find(|&n| predicate(n))
    }
}

// =============================================================================
// NodeSet
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: FxIndexSet<NodeIndex>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: FxIndexSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Build from any sequence, mapping each item to a node. Items mapped to
    /// `None` (and `NodeIndex::NONE`) are skipped; duplicates keep their first
    /// position.
    pub fn from_iter_with<I, F>(items: I, mut map: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Option<NodeIndex>,
    {
        items
            .into_iter()
            .filter_map(|item| map(item).filter(|n| n.is_some()))
            .collect()
    }

    /// Add a node. Returns `false` if it was already present.
    #[inline]
    pub fn add(&mut self, node: NodeIndex) -> bool {
        self.nodes.insert(node)
    }

    /// Remove a node, keeping the order of the remaining members.
    #[inline]
    pub fn remove(&mut self, node: NodeIndex) -> bool {
        self.nodes.shift_remove(&node)
    }

    /// Substitute `new` for `old` at the same position. If `new` is already a
    /// member, `old` is simply removed.
    pub fn replace(&mut self, old: NodeIndex, new: NodeIndex) -> bool {
        let Some(position) = self.nodes.get_index_of(&old) else {
            return false;
        };
        self.nodes.shift_remove_index(position);
        if !self.nodes.contains(&new) {
            self.nodes.shift_insert(position, new);
        }
        true
    }

    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(NodeIndex) -> bool) {
        self.nodes.retain(|&n| keep(n));
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// `None` when empty, otherwise the set itself.
    pub fn or_none_if_empty(self) -> Option<Self> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Convert to a `NodeMap`, keeping only live named members.
    pub fn to_node_map(&self, arena: &NodeArena) -> NodeMap {
        let mut map = NodeMap::new();
        for node in self.iter() {
            map.insert_node(arena, node);
        }
        map
    }
}

impl NodeIterable for NodeSet {
    type Nodes<'a> = std::iter::Copied<indexmap::set::Iter<'a, NodeIndex>>;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.nodes.iter().copied()
    }

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn contains_node(&self, node: NodeIndex) -> bool {
        self.contains(node)
    }

    fn prune(&mut self, arena: &NodeArena) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|&n| arena.is_live(n));
        before - self.nodes.len()
    }
}

impl FromIterator<NodeIndex> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeIndex>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl Extend<NodeIndex> for NodeSet {
    fn extend<I: IntoIterator<Item = NodeIndex>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = NodeIndex;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, NodeIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

// =============================================================================
// NodeMap
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMap {
    entries: FxIndexMap<String, NodeIndex>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any sequence, mapping each item to a node. Items mapped to
    /// `None`, and nodes that are dead or unnamed, are skipped.
    pub fn from_iter_with<I, F>(arena: &NodeArena, items: I, mut map: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Option<NodeIndex>,
    {
        let mut result = Self::new();
        for item in items {
            if let Some(node) = map(item) {
                result.insert_node(arena, node);
            }
        }
        result
    }

    /// Build from nodes, keyed by their names.
    pub fn from_nodes(arena: &NodeArena, nodes: impl IntoIterator<Item = NodeIndex>) -> Self {
        Self::from_iter_with(arena, nodes, Some)
    }

    /// Insert a node under its own name. Returns `false` if the node is dead
    /// or has no name. A node already stored under the same name is replaced.
    pub fn insert_node(&mut self, arena: &NodeArena, node: NodeIndex) -> bool {
        match arena.name_of(node) {
            Some(name) => {
                self.entries.insert(name.to_string(), node);
                true
            }
            None => false,
        }
    }

    /// Store `node` under an explicit key. Used when re-keying after a rename.
    pub fn set(&mut self, key: impl Into<String>, node: NodeIndex) -> Option<NodeIndex> {
        self.entries.insert(key.into(), node)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeIndex> {
        self.entries.get(name).copied()
    }

    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Key under which `node` is stored.
    pub fn key_of(&self, node: NodeIndex) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, n)| **n == node)
            .map(|(k, _)| k.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<NodeIndex> {
        self.entries.shift_remove(name)
    }

    pub fn remove_node(&mut self, node: NodeIndex) -> bool {
        let before = self.entries.len();
        self.entries.retain(|_, n| *n != node);
        before != self.entries.len()
    }

    /// Move the entry at `old_key` to `new_key`, keeping its position.
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> bool {
        if old_key == new_key {
            return self.entries.contains_key(old_key);
        }
        let Some(position) = self.entries.get_index_of(old_key) else {
            return false;
        };
        let Some((_, node)) = self.entries.shift_remove_index(position) else {
            return false;
        };
        self.entries.shift_remove(new_key);
        let position = position.min(self.entries.len());
        self.entries.shift_insert(position, new_key.to_string(), node);
        true
    }

    /// Substitute `new` for `old` at the same position, keyed by `new_key`.
    pub fn replace_node(&mut self, old: NodeIndex, new_key: &str, new: NodeIndex) -> bool {
        let Some(position) = self.entries.values().position(|&n| n == old) else {
            return false;
        };
        self.entries.shift_remove_index(position);
        self.entries.shift_remove(new_key);
        let position = position.min(self.entries.len());
        self.entries.shift_insert(position, new_key.to_string(), new);
        true
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeIndex)> {
        self.entries.iter().map(|(k, &n)| (k.as_str(), n))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn or_none_if_empty(self) -> Option<Self> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn to_node_set(&self) -> NodeSet {
        self.entries.values().copied().collect()
    }
}

impl NodeIterable for NodeMap {
    type Nodes<'a> = std::iter::Copied<indexmap::map::Values<'a, String, NodeIndex>>;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.entries.values().copied()
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains_node(&self, node: NodeIndex) -> bool {
        self.entries.values().any(|&n| n == node)
    }

    fn prune(&mut self, arena: &NodeArena) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, n| arena.is_live(*n));
        before - self.entries.len()
    }
}

#[cfg(test)]
#[path = "../tests/containers_tests.rs"]
mod containers_tests;
