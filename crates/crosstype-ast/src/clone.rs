//! Deep clone of a subtree.

use crate::arena::NodeArena;
use crate::containers::{NodeIterable, NodeMap, NodeSet};
use crate::errors::{AstError, AstResult};
use crate::node::{ChildSlots, ChildValue, NodeData, NodeId, NodeIndex};
use crosstype_common::limits::{CLONE_MAP_INITIAL_CAPACITY, MAX_TREE_DEPTH};
use rustc_hash::FxHashMap;
use tracing::trace;

type CloneMap = FxHashMap<NodeIndex, NodeIndex>;

impl NodeArena {
    /// Deep-copy the subtree rooted at `idx` and return the copy's root.
    ///
    /// Child properties are copied recursively. Everything else is copied by
    /// value: non-child node links (heritage, TypeArgument associations) keep
    /// pointing at the original nodes. A cloned Reference whose target is in
    /// the subtree is rewired to the target's clone; one pointing outside
    /// keeps its target and is registered as an additional referrer.
    ///
    /// The copy's root gets `new_parent` as its parent link only; placing it
    /// in one of `new_parent`'s properties is up to the caller.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn clone_node(&mut self, idx: NodeIndex, new_parent: NodeIndex) -> AstResult<NodeIndex> {
        self.node(idx)?;
        let mut map: CloneMap =
            FxHashMap::with_capacity_and_hasher(CLONE_MAP_INITIAL_CAPACITY, Default::default());
        let root = self.copy_node(idx, &mut map, 0)?;

        let pairs: Vec<(NodeIndex, NodeIndex)> = map.iter().map(|(&o, &c)| (o, c)).collect();

        for &(original, copy) in &pairs {
            let parent = if original == idx {
                new_parent
            } else {
                let original_parent = self.node(original)?.parent;
                map.get(&original_parent).copied().unwrap_or(NodeIndex::NONE)
            };
            self.node_mut(copy)?.parent = parent;
        }

        for &(_, copy) in &pairs {
            let (target, base) = match &self.node(copy)?.data {
                NodeData::Reference(data) => (data.target, data.target_base),
                _ => continue,
            };
            if let Some(&cloned_base) = map.get(&base) {
                if let NodeData::Reference(data) = &mut self.node_mut(copy)?.data {
                    data.target_base = cloned_base;
                }
            }
            if !self.is_live(target) {
                continue;
            }
            let new_target = map.get(&target).copied().unwrap_or(target);
            if let NodeData::Reference(data) = &mut self.node_mut(copy)?.data {
                data.target = new_target;
            }
            self.node_mut(new_target)?.references_to_this.add(copy);
        }

        trace!(%idx, %root, nodes = pairs.len(), "cloned subtree");
        Ok(root)
    }

    fn copy_node(&mut self, original: NodeIndex, map: &mut CloneMap, depth: u32) -> AstResult<NodeIndex> {
        if depth >= MAX_TREE_DEPTH {
            return Err(AstError::DepthExceeded { node: original });
        }
        let mut record = self.node(original)?.clone();
        record.id = NodeId::next();
        record.parent = NodeIndex::NONE;
        record.references_to_this = NodeSet::new();
        let children = std::mem::take(&mut record.children);
        record.children = children.iter().map(|_| None).collect();

        let copy = self.alloc(record);
        map.insert(original, copy);

        let mut copied: ChildSlots = ChildSlots::with_capacity(children.len());
        for value in children {
            let value = match value {
                None => None,
                Some(ChildValue::Node(child)) => self
                    .copy_child(child, map, depth)?
                    .map(ChildValue::Node),
                Some(ChildValue::Set(set)) => {
                    let mut cloned = NodeSet::with_capacity(set.len());
                    for child in set.iter() {
                        if let Some(c) = self.copy_child(child, map, depth)? {
                            cloned.add(c);
                        }
                    }
                    Some(ChildValue::Set(cloned))
                }
                Some(ChildValue::Map(entries)) => {
                    let mut cloned = NodeMap::new();
                    for (key, child) in entries.iter() {
                        if let Some(c) = self.copy_child(child, map, depth)? {
                            cloned.set(key, c);
                        }
                    }
                    Some(ChildValue::Map(cloned))
                }
            };
            copied.push(value);
        }
        self.node_mut(copy)?.children = copied;
        Ok(copy)
    }

    /// Copy of a child, reusing an existing copy. Dead children are dropped.
    fn copy_child(
        &mut self,
        child: NodeIndex,
        map: &mut CloneMap,
        depth: u32,
    ) -> AstResult<Option<NodeIndex>> {
        if let Some(&existing) = map.get(&child) {
            return Ok(Some(existing));
        }
        if !self.is_live(child) {
            return Ok(None);
        }
        self.copy_node(child, map, depth + 1).map(Some)
    }
}

#[cfg(test)]
#[path = "../tests/clone_tests.rs"]
mod clone_tests;
