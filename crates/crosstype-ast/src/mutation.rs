//! Tree mutation: property updates, child placement, cleanup, delete and
//! replace.
//!
//! All operations keep the graph invariants intact:
//! - a node held in a child property of `P` has `parent == P`, and a node
//!   whose parent is `P` is held by exactly one property of `P`;
//! - every Reference is in the back-reference set of its cached target.

use crate::arena::NodeArena;
use crate::containers::{NodeIterable, NodeMap, NodeSet};
use crate::errors::{AstError, AstResult};
use crate::kinds::NodeKind;
use crate::metadata::{ChildShape, keys};
use crate::node::{ChildSlots, ChildValue, Node, NodeData, NodeIndex};
use crosstype_common::limits::MAX_TREE_DEPTH;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

/// Called by `delete` for each Reference whose target is going away and that
/// cannot be re-resolved. Returning a node other than the Reference replaces
/// the Reference with it.
pub type ReferenceReplacer<'a> = dyn FnMut(&mut NodeArena, NodeIndex) -> AstResult<NodeIndex> + 'a;

impl NodeArena {
    // =========================================================================
    // Property updates
    // =========================================================================

    /// Apply `update` to the node record. A changed name is propagated to the
    /// parent's NodeMaps. A member whose new name collides with a sibling
    /// displaces it, and a member left without a name leaves the map; either
    /// way the node that lost its entry is detached.
    pub fn update_properties(
        &mut self,
        idx: NodeIndex,
        update: impl FnOnce(&mut Node),
    ) -> AstResult<NodeIndex> {
        let node = self.node_mut(idx)?;
        let old_name = node.name.clone();
        update(node);
        if node.name != old_name {
            self.update_name_on_parent_container(idx)?;
        }
        Ok(idx)
    }

    pub fn set_name(&mut self, idx: NodeIndex, name: impl Into<String>) -> AstResult<NodeIndex> {
        let name = name.into();
        self.update_properties(idx, |node| node.name = Some(name))
    }

    /// Re-key every NodeMap of the parent that holds `idx`. For a
    /// TypeParameter, also re-key the TypeArguments bound to it in the
    /// enclosing Definition.
    pub(crate) fn update_name_on_parent_container(&mut self, idx: NodeIndex) -> AstResult<()> {
        let node = self.node(idx)?;
        let parent = node.parent;
        let is_type_parameter = node.kind == NodeKind::TypeParameterDeclaration;
        let new_name = self.name_of(idx).map(str::to_owned);

        let released = match self.get_mut(parent) {
            Some(parent_node) => {
                rekey_in_maps(&mut parent_node.children, &[idx], new_name.as_deref())
            }
            None => Vec::new(),
        };
        for node in released {
            self.release(node, parent);
        }

        if is_type_parameter {
            let Some(definition) = self.get_definition(idx)? else {
                return Ok(());
            };
            let bound: Vec<NodeIndex> = self
                .node(definition)?
                .child_map(keys::TYPE_ARGUMENTS)
                .map(|arguments| {
                    arguments
                        .nodes()
                        .filter(|&arg| {
                            matches!(
                                self.get(arg).map(|n| &n.data),
                                Some(NodeData::TypeArgument { association }) if *association == idx
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();
            if !bound.is_empty() {
                let definition_node = self.node_mut(definition)?;
                let released =
                    rekey_in_maps(&mut definition_node.children, &bound, new_name.as_deref());
                for node in released {
                    self.release(node, definition);
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Child placement
    // =========================================================================

    /// Assign a child property. Members that already belong to another node,
    /// or to another property of this one, are cloned; displaced children are
    /// detached. A NodeMap value must hold distinctly named nodes.
    pub fn set_child(
        &mut self,
        idx: NodeIndex,
        key: &str,
        value: Option<ChildValue>,
    ) -> AstResult<()> {
        let kind = self.node(idx)?.kind;
        let key = self.child_key(kind, key)?;

        let mut adopted = FxHashSet::default();
        let value = match value {
            None => None,
            Some(ChildValue::Node(child)) => {
                Some(ChildValue::Node(self.claim_child(child, idx, key, &mut adopted)?))
            }
            Some(ChildValue::Set(set)) => {
                let mut claimed = NodeSet::with_capacity(set.len());
                for child in set.iter() {
                    claimed.add(self.claim_child(child, idx, key, &mut adopted)?);
                }
                Some(ChildValue::Set(claimed))
            }
            Some(ChildValue::Map(map)) => {
                let members = map.to_vec();
                self.check_map_members(kind, key, &members)?;
                let mut claimed = NodeMap::new();
                for child in members {
                    let child = self.claim_child(child, idx, key, &mut adopted)?;
                    claimed.insert_node(self, child);
                }
                Some(ChildValue::Map(claimed))
            }
        };

        let slot = self
            .node_mut(idx)?
            .child_mut(key)
            .ok_or_else(|| unknown_child(kind, key))?;
        let previous = std::mem::replace(slot, value);

        if let Some(previous) = previous {
            for old in previous.nodes() {
                if !adopted.contains(&old) {
                    self.release(old, idx);
                }
            }
        }
        for child in adopted {
            if let Some(child_node) = self.get_mut(child) {
                child_node.parent = idx;
            }
        }
        Ok(())
    }

    /// Add one child to a property. Set and Map properties grow; a single-node
    /// property is overwritten. Returns the node actually inserted, which is a
    /// clone if `child` already had a parent.
    ///
    /// A Map member must be named. One with the name of an existing member
    /// takes its entry, and the old member is detached.
    pub fn insert_child(
        &mut self,
        idx: NodeIndex,
        key: &str,
        child: NodeIndex,
    ) -> AstResult<NodeIndex> {
        let kind = self.node(idx)?.kind;
        let key = self.child_key(kind, key)?;
        let shape = self
            .node(idx)?
            .metadata()
            .child_property(key)
            .map(|p| p.shape)
            .ok_or_else(|| unknown_child(kind, key))?;

        if shape == ChildShape::Map {
            self.check_map_members(kind, key, &[child])?;
        }
        let claimed = self.claim_child(child, idx, key, &mut FxHashSet::default())?;
        if shape == ChildShape::Node {
            self.set_child(idx, key, Some(ChildValue::Node(claimed)))?;
            return Ok(claimed);
        }

        let name = self.name_of(claimed).map(str::to_owned);
        let slot = self
            .node_mut(idx)?
            .child_mut(key)
            .ok_or_else(|| unknown_child(kind, key))?;
        let mut displaced = None;
        match slot {
            Some(ChildValue::Set(set)) => {
                set.add(claimed);
            }
            Some(ChildValue::Map(map)) => {
                if let Some(name) = name {
                    displaced = map.set(name, claimed).filter(|&old| old != claimed);
                }
            }
            Some(ChildValue::Node(_)) | None => {
                *slot = Some(match (shape, name) {
                    (ChildShape::Map, Some(name)) => {
                        let mut map = NodeMap::new();
                        map.set(name, claimed);
                        ChildValue::Map(map)
                    }
                    _ => ChildValue::Set(std::iter::once(claimed).collect()),
                });
            }
        }
        if let Some(old) = displaced {
            self.release(old, idx);
        }
        self.node_mut(claimed)?.parent = idx;
        Ok(claimed)
    }

    /// Every node is live and named, and no two share a name.
    pub(crate) fn check_map_members(
        &self,
        kind: NodeKind,
        key: &'static str,
        members: &[NodeIndex],
    ) -> AstResult<()> {
        let mut names = FxHashSet::default();
        for &member in members {
            self.node(member)?;
            let name = self
                .name_of(member)
                .ok_or(AstError::UnnamedMapMember { kind, key, node: member })?;
            if !names.insert(name) {
                return Err(AstError::DuplicateMapMember {
                    kind,
                    key,
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Clear `node`'s parent link if it still points at `holder`.
    fn release(&mut self, node: NodeIndex, holder: NodeIndex) {
        if let Some(record) = self.get_mut(node) {
            if record.parent == holder {
                trace!(%node, %holder, "released child");
                record.parent = NodeIndex::NONE;
            }
        }
    }

    /// Key of the NodeMap property of `parent` that holds `child`.
    fn map_property_holding(&self, parent: NodeIndex, child: NodeIndex) -> Option<&'static str> {
        self.get(parent)?
            .child_entries()
            .find_map(|(key, value)| match value {
                ChildValue::Map(map) if map.contains_node(child) => Some(key),
                _ => None,
            })
    }

    fn child_key(&self, kind: NodeKind, key: &str) -> AstResult<&'static str> {
        crate::metadata::NodeMetadata::for_kind(kind)
            .child_property(key)
            .map(|p| p.key)
            .ok_or_else(|| unknown_child(kind, key))
    }

    /// Clear or substitute `idx` in whichever property of its parent holds it.
    /// In a NodeMap the replacement must be named; a sibling already stored
    /// under that name is detached.
    pub(crate) fn remove_from_parent(
        &mut self,
        idx: NodeIndex,
        replacement: Option<NodeIndex>,
    ) -> AstResult<()> {
        let parent = self.node(idx)?.parent;
        if parent.is_none() {
            return Ok(());
        }
        let replacement_key = replacement.and_then(|r| self.name_of(r).map(str::to_owned));
        if let Some(new) = replacement.filter(|_| replacement_key.is_none()) {
            if let Some(key) = self.map_property_holding(parent, idx) {
                let kind = self.node(parent)?.kind;
                return Err(AstError::UnnamedMapMember { kind, key, node: new });
            }
        }

        let mut displaced = Vec::new();
        if let Some(parent_node) = self.get_mut(parent) {
            for slot in parent_node.children.iter_mut() {
                if matches!(slot, Some(ChildValue::Node(child)) if *child == idx) {
                    *slot = replacement.map(ChildValue::Node);
                    continue;
                }
                match slot {
                    Some(ChildValue::Set(set)) if set.contains(idx) => match replacement {
                        Some(new) => {
                            set.replace(idx, new);
                        }
                        None => {
                            set.remove(idx);
                        }
                    },
                    Some(ChildValue::Map(map)) if map.contains_node(idx) => {
                        match (replacement, replacement_key.as_deref()) {
                            (Some(new), Some(new_key)) => {
                                displaced.extend(map.get(new_key).filter(|&d| d != idx && d != new));
                                map.replace_node(idx, new_key, new);
                            }
                            _ => {
                                map.remove_node(idx);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        for node in displaced {
            self.release(node, parent);
        }
        if let Some(new) = replacement {
            self.node_mut(new)?.parent = parent;
        }
        self.node_mut(idx)?.parent = NodeIndex::NONE;
        trace!(%idx, %parent, ?replacement, "removed from parent");
        Ok(())
    }

    // =========================================================================
    // Cleanup / fixup
    // =========================================================================

    /// Drop dead entries from child containers and the back-reference set.
    /// Optional properties left empty (or holding a dead node) are cleared.
    pub fn cleanup(&mut self, idx: NodeIndex) -> AstResult<()> {
        let node = self.node_mut(idx)?;
        let properties = node.metadata().child_container_properties;
        let mut children = std::mem::take(&mut node.children);
        let mut references = std::mem::take(&mut node.references_to_this);

        for (property, slot) in properties.iter().zip(children.iter_mut()) {
            let clear = match slot {
                Some(ChildValue::Set(set)) => {
                    set.prune(self);
                    set.is_empty()
                }
                Some(ChildValue::Map(map)) => {
                    map.prune(self);
                    map.is_empty()
                }
                Some(ChildValue::Node(child)) => !self.is_live(*child),
                None => false,
            };
            if clear && property.optional {
                *slot = None;
            }
        }
        references.prune(self);

        let node = self.node_mut(idx)?;
        node.children = children;
        node.references_to_this = references;
        Ok(())
    }

    /// Top-down repair: `cleanup` each node, then point every child's parent
    /// at its holder. A subtree deeper than `MAX_TREE_DEPTH` is rejected
    /// before anything is touched.
    pub fn fixup(&mut self, idx: NodeIndex) -> AstResult<()> {
        self.check_subtree_depth(idx, false)?;
        self.fixup_inner(idx, 0)
    }

    /// Fail with `DepthExceeded` if the subtree under `idx` is deeper than
    /// `MAX_TREE_DEPTH`. With `owned_only`, only children whose parent link
    /// points back at their holder are followed.
    fn check_subtree_depth(&self, idx: NodeIndex, owned_only: bool) -> AstResult<()> {
        let mut stack = vec![(idx, 0u32)];
        while let Some((node, depth)) = stack.pop() {
            if depth >= MAX_TREE_DEPTH {
                return Err(AstError::DepthExceeded { node });
            }
            for (child, _) in self.children_of(node)? {
                let follow = if owned_only {
                    self.parent_of(child) == Some(node)
                } else {
                    self.is_live(child)
                };
                if follow {
                    stack.push((child, depth + 1));
                }
            }
        }
        Ok(())
    }

    fn fixup_inner(&mut self, idx: NodeIndex, depth: u32) -> AstResult<()> {
        if depth >= MAX_TREE_DEPTH {
            return Err(AstError::DepthExceeded { node: idx });
        }
        self.cleanup(idx)?;
        for (child, _) in self.children_of(idx)? {
            let Some(child_node) = self.get_mut(child) else {
                continue;
            };
            child_node.parent = idx;
            self.fixup_inner(child, depth + 1)?;
        }
        Ok(())
    }

    // =========================================================================
    // Delete / replace
    // =========================================================================

    /// Delete `idx` and its descendants.
    ///
    /// References to a deleted node from outside the subtree are cleared and
    /// re-resolved; if that fails, `replacer` is consulted. Every handle into
    /// the subtree is dead afterwards. The depth limit is checked before
    /// anything is deleted.
    pub fn delete(
        &mut self,
        idx: NodeIndex,
        replacer: Option<&mut ReferenceReplacer<'_>>,
    ) -> AstResult<()> {
        self.node(idx)?;
        self.check_subtree_depth(idx, true)?;
        debug!(%idx, "delete");
        self.delete_inner(idx, replacer, idx, None, 0)
    }

    fn delete_inner(
        &mut self,
        idx: NodeIndex,
        mut replacer: Option<&mut ReferenceReplacer<'_>>,
        doomed_root: NodeIndex,
        replacement: Option<NodeIndex>,
        depth: u32,
    ) -> AstResult<()> {
        if depth >= MAX_TREE_DEPTH {
            return Err(AstError::DepthExceeded { node: idx });
        }
        let Some(node) = self.get(idx) else {
            return Ok(());
        };
        let is_reference = node.kind == NodeKind::Reference;
        let references = node.references_to_this.to_vec();

        // Only the doomed root is detached. Descendants keep their parent links
        // until they are tombstoned, so the doomed-subtree checks below hold.
        // Placing the replacement first lets references resolve to it.
        if depth == 0 {
            self.remove_from_parent(idx, replacement)?;
        }

        for reference in references {
            if self.kind_of(reference) != Some(NodeKind::Reference)
                || self.is_within(reference, doomed_root)?
            {
                continue;
            }
            self.clear_target(reference)?;
            let outside_doomed = |arena: &NodeArena, target: NodeIndex| {
                !arena.is_within(target, doomed_root).unwrap_or(true)
            };
            if self.resolve_filtered(reference, &outside_doomed)?.is_some() {
                continue;
            }
            if let Some(replace_with) = replacer.as_deref_mut() {
                let new = replace_with(self, reference)?;
                if new != reference && self.is_live(new) {
                    debug!(%reference, %new, "replacing orphaned reference");
                    self.replace(reference, new, None, false)?;
                }
            }
        }

        for (child, _) in self.children_of(idx)? {
            if self.parent_of(child) == Some(idx) {
                self.delete_inner(child, replacer.as_deref_mut(), doomed_root, None, depth + 1)?;
            }
        }

        if is_reference {
            self.clear_target(idx)?;
        }
        self.tombstone(idx);
        trace!(%idx, "tombstoned");
        Ok(())
    }

    fn is_within(&self, idx: NodeIndex, root: NodeIndex) -> AstResult<bool> {
        Ok(idx == root || self.is_descendant_of(idx, root)?)
    }

    /// Put `new` where `idx` is.
    ///
    /// Without `reuse_memory`, `idx` is torn down exactly as by
    /// [`delete`](Self::delete) and `new` takes its slot in the parent; the
    /// result is `new`. With `reuse_memory`, `new`'s record moves into `idx`'s
    /// arena slot, keeping `idx`'s identity and parent, and `new`'s handle is
    /// retired; the result is `idx`.
    ///
    /// Fails without changing anything if `new` is an ancestor of `idx`, or
    /// if `idx` is a NodeMap member and `new` has no name.
    pub fn replace(
        &mut self,
        idx: NodeIndex,
        new: NodeIndex,
        replacer: Option<&mut ReferenceReplacer<'_>>,
        reuse_memory: bool,
    ) -> AstResult<NodeIndex> {
        self.node(idx)?;
        self.node(new)?;
        if idx == new {
            return Ok(idx);
        }
        if self.is_descendant_of(idx, new)? {
            return Err(AstError::ReplaceWithAncestor {
                node: idx,
                replacement: new,
            });
        }
        let parent = self.node(idx)?.parent;
        if self.name_of(new).is_none() {
            if let Some(key) = self.map_property_holding(parent, idx) {
                let kind = self.node(parent)?.kind;
                return Err(AstError::UnnamedMapMember { kind, key, node: new });
            }
        }
        self.check_subtree_depth(idx, true)?;
        debug!(%idx, %new, reuse_memory, "replace");
        self.remove_from_parent(new, None)?;

        if !reuse_memory {
            self.delete_inner(idx, replacer, idx, Some(new), 0)?;
            return Ok(new);
        }
        self.replace_in_place(idx, new, replacer)?;
        Ok(idx)
    }

    fn replace_in_place(
        &mut self,
        idx: NodeIndex,
        new: NodeIndex,
        mut replacer: Option<&mut ReferenceReplacer<'_>>,
    ) -> AstResult<()> {
        for (child, _) in self.children_of(idx)? {
            if self.parent_of(child) == Some(idx) {
                self.delete_inner(child, replacer.as_deref_mut(), child, None, 1)?;
            }
        }

        let old = self.node(idx)?;
        let (id, parent, old_name) = (old.id, old.parent, old.name.clone());
        let old_references = old.references_to_this.clone();
        if old.kind == NodeKind::Reference {
            self.clear_target(idx)?;
        }

        let mut record = self.tombstone(new).ok_or(AstError::DeletedNode { index: new })?;
        let moved_references = std::mem::take(&mut record.references_to_this);
        record.id = id;
        record.parent = parent;
        record.references_to_this = old_references;
        record.references_to_this.extend(moved_references.iter());
        let outgoing_target = match &record.data {
            NodeData::Reference(data) => data.target.into_option(),
            _ => None,
        };
        self.put(idx, record)?;

        for (child, _) in self.children_of(idx)? {
            if let Some(child_node) = self.get_mut(child) {
                child_node.parent = idx;
            }
        }
        if let Some(target) = outgoing_target.filter(|&t| self.is_live(t)) {
            if let Some(target_node) = self.get_mut(target) {
                target_node.references_to_this.replace(new, idx);
            }
        }
        for reference in self.node(idx)?.references_to_this.to_vec() {
            if !self.is_live(reference) {
                continue;
            }
            if moved_references.contains(reference) {
                if let NodeData::Reference(data) = &mut self.node_mut(reference)?.data {
                    data.target = idx;
                }
            }
            self.update_path(reference)?;
        }

        if self.node(idx)?.name != old_name {
            self.update_name_on_parent_container(idx)?;
        }
        Ok(())
    }
}

fn unknown_child(kind: NodeKind, key: &str) -> AstError {
    AstError::UnknownChildProperty {
        kind,
        key: key.to_string(),
    }
}

/// Re-key `nodes` in every NodeMap among `children`. With no name the entry
/// is dropped. Returns the nodes that lost their entry: dropped ones and
/// siblings displaced by the new key.
fn rekey_in_maps(
    children: &mut ChildSlots,
    nodes: &[NodeIndex],
    new_name: Option<&str>,
) -> Vec<NodeIndex> {
    let mut released = Vec::new();
    for slot in children.iter_mut() {
        let Some(ChildValue::Map(map)) = slot else {
            continue;
        };
        for &node in nodes {
            let Some(old_key) = map.key_of(node).map(str::to_owned) else {
                continue;
            };
            match new_name {
                Some(new_key) => {
                    if old_key != new_key {
                        released.extend(map.get(new_key));
                    }
                    map.rename(&old_key, new_key);
                }
                None => {
                    map.remove(&old_key);
                    released.push(node);
                }
            }
        }
    }
    released
}

#[cfg(test)]
#[path = "../tests/mutation_tests.rs"]
mod mutation_tests;
