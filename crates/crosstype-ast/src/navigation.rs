//! Tree navigation: ancestor walks and child enumeration.
//!
//! Ancestor walks are iterative and track visited nodes, so a corrupted parent
//! chain surfaces as `AstError::CircularParentChain` instead of looping.
//! Child enumeration is driven entirely by the metadata table.

use crate::arena::NodeArena;
use crate::containers::NodeSet;
use crate::errors::{AstError, AstResult};
use crate::kinds::NodeKind;
use crate::node::{Node, NodeIndex};
use crosstype_common::limits::MAX_TREE_DEPTH;
use regex::Regex;
use rustc_hash::FxHashSet;

/// Name filter for [`NodeArena::get_named_parent`].
#[derive(Debug, Clone, Copy)]
pub enum NameMatch<'a> {
    Exact(&'a str),
    Pattern(&'a Regex),
}

impl NameMatch<'_> {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Exact(expected) => *expected == name,
            NameMatch::Pattern(re) => re.is_match(name),
        }
    }
}

impl NodeArena {
    // =========================================================================
    // Ancestors
    // =========================================================================

    /// Walk ancestors from the parent upward, stopping at the first one for
    /// which `visit` returns true.
    fn walk_ancestors(
        &self,
        idx: NodeIndex,
        mut visit: impl FnMut(NodeIndex, &Node) -> bool,
    ) -> AstResult<Option<NodeIndex>> {
        let mut current = self.node(idx)?.parent;
        let mut seen = FxHashSet::default();
        seen.insert(idx);

        while current.is_some() {
            if !seen.insert(current) {
                return Err(AstError::CircularParentChain { node: current });
            }
            let Some(node) = self.get(current) else {
                break;
            };
            if visit(current, node) {
                return Ok(Some(current));
            }
            current = node.parent;
        }
        Ok(None)
    }

    /// Ancestors from the parent to the root, or `None` for a root node.
    pub fn get_lineage(&self, idx: NodeIndex) -> AstResult<Option<Vec<NodeIndex>>> {
        let mut lineage = Vec::new();
        self.walk_ancestors(idx, |ancestor, _| {
            lineage.push(ancestor);
            false
        })?;
        Ok(if lineage.is_empty() {
            None
        } else {
            Some(lineage)
        })
    }

    /// Nearest ancestor matching `predicate`.
    pub fn find_parent(
        &self,
        idx: NodeIndex,
        mut predicate: impl FnMut(&Node) -> bool,
    ) -> AstResult<Option<NodeIndex>> {
        self.walk_ancestors(idx, |_, node| predicate(node))
    }

    /// Nearest Named ancestor, optionally restricted by name.
    pub fn get_named_parent(
        &self,
        idx: NodeIndex,
        name: Option<NameMatch<'_>>,
    ) -> AstResult<Option<NodeIndex>> {
        self.walk_ancestors(idx, |ancestor, node| {
            if !node.is_named() {
                return false;
            }
            match name {
                None => true,
                Some(filter) => self
                    .name_of(ancestor)
                    .is_some_and(|ancestor_name| filter.matches(ancestor_name)),
            }
        })
    }

    /// Enclosing Definition.
    pub fn get_definition(&self, idx: NodeIndex) -> AstResult<Option<NodeIndex>> {
        self.find_parent(idx, Node::is_definition)
    }

    /// Enclosing SourceFile.
    pub fn get_source_file(&self, idx: NodeIndex) -> AstResult<Option<NodeIndex>> {
        self.find_parent(idx, |node| node.kind == NodeKind::SourceFile)
    }

    /// True if `ancestor` appears in the parent chain of `idx`.
    pub fn is_descendant_of(&self, idx: NodeIndex, ancestor: NodeIndex) -> AstResult<bool> {
        Ok(self
            .walk_ancestors(idx, |candidate, _| candidate == ancestor)?
            .is_some())
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Snapshot of the direct children with the property each is held in,
    /// in property-declaration order then container order.
    pub fn children_of(&self, idx: NodeIndex) -> AstResult<Vec<(NodeIndex, &'static str)>> {
        let node = self.node(idx)?;
        let mut children = Vec::new();
        for (key, value) in node.child_entries() {
            children.extend(value.nodes().into_iter().map(|child| (child, key)));
        }
        Ok(children)
    }

    /// Call `callback` for each direct child. The child list is taken before
    /// the first call.
    pub fn for_each_child(
        &self,
        idx: NodeIndex,
        mut callback: impl FnMut(NodeIndex, &'static str),
    ) -> AstResult<()> {
        for (child, key) in self.children_of(idx)? {
            callback(child, key);
        }
        Ok(())
    }

    /// Live children of `idx`, or all live descendants when `deep` is set.
    ///
    /// `predicate` only decides which nodes are included; the walk always
    /// descends into every child. Returns `None` when nothing is collected.
    pub fn get_children(
        &self,
        idx: NodeIndex,
        deep: bool,
        predicate: Option<&dyn Fn(&Node) -> bool>,
    ) -> AstResult<Option<NodeSet>> {
        let mut result = NodeSet::new();
        let mut visited = FxHashSet::default();
        visited.insert(idx);
        self.collect_children(idx, deep, predicate, 0, &mut visited, &mut result)?;
        Ok(result.or_none_if_empty())
    }

    fn collect_children(
        &self,
        idx: NodeIndex,
        deep: bool,
        predicate: Option<&dyn Fn(&Node) -> bool>,
        depth: u32,
        visited: &mut FxHashSet<NodeIndex>,
        result: &mut NodeSet,
    ) -> AstResult<()> {
        if depth >= MAX_TREE_DEPTH {
            return Err(AstError::DepthExceeded { node: idx });
        }
        for (child, _) in self.children_of(idx)? {
            let Some(node) = self.get(child) else {
                continue;
            };
            if !visited.insert(child) {
                continue;
            }
            if predicate.is_none_or(|keep| keep(node)) {
                result.add(child);
            }
            if deep {
                self.collect_children(child, deep, predicate, depth + 1, visited, result)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/navigation_tests.rs"]
mod navigation_tests;
