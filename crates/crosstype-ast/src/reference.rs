//! Reference bookkeeping.
//!
//! A Reference node carries a declaration-search root (`target_base`), a name
//! path from that root, and a cached target. Every node keeps the set of
//! References currently targeting it; `set_target` and `clear_target` are the
//! only operations that change that set outside of `cleanup` and `delete`.

use crate::arena::NodeArena;
use crate::containers::NodeSet;
use crate::errors::{AstError, AstResult};
use crate::kinds::NodeKind;
use crate::metadata::keys;
use crate::node::{NodeData, NodeIndex, ReferenceData};
use crosstype_common::limits::MAX_TREE_DEPTH;
use tracing::{debug, trace};

impl NodeArena {
    pub fn reference_data(&self, reference: NodeIndex) -> AstResult<&ReferenceData> {
        let node = self.node_of_kind(reference, NodeKind::Reference)?;
        match &node.data {
            NodeData::Reference(data) => Ok(data),
            _ => Err(AstError::KindMismatch {
                index: reference,
                expected: "Reference",
                found: node.kind,
            }),
        }
    }

    fn reference_data_mut(&mut self, reference: NodeIndex) -> AstResult<&mut ReferenceData> {
        self.node_of_kind(reference, NodeKind::Reference)?;
        let node = self.node_mut(reference)?;
        let kind = node.kind;
        match &mut node.data {
            NodeData::Reference(data) => Ok(data),
            _ => Err(AstError::KindMismatch {
                index: reference,
                expected: "Reference",
                found: kind,
            }),
        }
    }

    /// Cached target, if it is still live.
    pub fn target(&self, reference: NodeIndex) -> AstResult<Option<NodeIndex>> {
        let target = self.reference_data(reference)?.target;
        Ok(target.into_option().filter(|&t| self.is_live(t)))
    }

    /// References currently targeting `idx`.
    #[inline]
    pub fn references_to(&self, idx: NodeIndex) -> AstResult<&NodeSet> {
        Ok(self.node(idx)?.references_to_this())
    }

    /// Point `reference` at `target`, recompute its path and move it between
    /// back-reference sets.
    pub fn set_target(&mut self, reference: NodeIndex, target: NodeIndex) -> AstResult<()> {
        self.node(target)?;
        let old = self.reference_data(reference)?.target;
        if old.is_some() && old != target {
            if let Some(old_node) = self.get_mut(old) {
                old_node.references_to_this.remove(reference);
            }
        }
        self.reference_data_mut(reference)?.target = target;
        self.node_mut(target)?.references_to_this.add(reference);
        self.update_path(reference)?;
        trace!(%reference, %target, "set reference target");
        Ok(())
    }

    /// Drop the cached target. `target_base` and `path` are kept so the
    /// reference can be resolved again.
    pub fn clear_target(&mut self, reference: NodeIndex) -> AstResult<()> {
        let old = std::mem::replace(
            &mut self.reference_data_mut(reference)?.target,
            NodeIndex::NONE,
        );
        if let Some(old_node) = self.get_mut(old) {
            old_node.references_to_this.remove(reference);
        }
        Ok(())
    }

    /// Recompute `target_base` and `path` from the cached target.
    ///
    /// The base is the target's Definition. The path is the Definition name,
    /// then the names of the named nodes below the root declaration down to
    /// the target. A Definition target is its own base.
    pub fn update_path(&mut self, reference: NodeIndex) -> AstResult<()> {
        let Some(target) = self.target(reference)? else {
            return Ok(());
        };
        let (base, path) = self.path_to(target)?;
        let data = self.reference_data_mut(reference)?;
        data.target_base = base;
        data.path = path;
        Ok(())
    }

    fn path_to(&self, target: NodeIndex) -> AstResult<(NodeIndex, Vec<String>)> {
        let name_or_empty = |idx: NodeIndex| self.name_of(idx).unwrap_or_default().to_string();

        if self.node(target)?.is_definition() {
            return Ok((target, vec![name_or_empty(target)]));
        }

        let lineage = self.get_lineage(target)?.unwrap_or_default();
        let Some(def_position) = lineage
            .iter()
            .position(|&a| self.get(a).is_some_and(|n| n.is_definition()))
        else {
            // Detached from any Definition: path of named ancestors from the top.
            let mut path: Vec<String> = lineage
                .iter()
                .rev()
                .filter(|&&a| self.get(a).is_some_and(|n| n.is_named()))
                .map(|&a| name_or_empty(a))
                .collect();
            path.push(name_or_empty(target));
            return Ok((NodeIndex::NONE, path));
        };

        let base = lineage[def_position];
        let mut path = vec![name_or_empty(base)];
        if def_position > 0 {
            // lineage[def_position - 1] is the root declaration; skip it.
            for &ancestor in lineage[..def_position - 1].iter().rev() {
                if self.get(ancestor).is_some_and(|n| n.is_named()) {
                    path.push(name_or_empty(ancestor));
                }
            }
            if self.name_of(target).is_some() {
                path.push(name_or_empty(target));
            }
        }
        Ok((base, path))
    }

    /// Resolve `reference` to a declaration.
    ///
    /// A live cached target is kept (its path is refreshed). Otherwise the
    /// target is looked up from `target_base` and `path`, and a hit is cached
    /// through [`set_target`](Self::set_target).
    pub fn resolve(&mut self, reference: NodeIndex) -> AstResult<Option<NodeIndex>> {
        self.resolve_filtered(reference, &|_, _| true)
    }

    /// [`resolve`](Self::resolve), considering only targets for which
    /// `accept` holds.
    #[tracing::instrument(level = "trace", skip(self, accept))]
    pub(crate) fn resolve_filtered(
        &mut self,
        reference: NodeIndex,
        accept: &dyn Fn(&NodeArena, NodeIndex) -> bool,
    ) -> AstResult<Option<NodeIndex>> {
        if let Some(target) = self.target(reference)? {
            if accept(self, target) {
                self.update_path(reference)?;
                return Ok(Some(target));
            }
            self.clear_target(reference)?;
        }

        let data = self.reference_data(reference)?;
        let base = data.target_base;
        let path = data.path.clone();
        if !self.is_live(base) || path.is_empty() {
            return Ok(None);
        }

        let found = match self
            .find_target_declarations_by_path(base, path.as_slice(), None)?
            .and_then(|matches| matches.into_iter().find(|&t| accept(self, t)))
        {
            Some(found) => Some(found),
            None => self
                .find_by_named_children(base, &path)?
                .filter(|&t| accept(self, t)),
        };

        match found {
            Some(target) => {
                self.set_target(reference, target)?;
                debug!(%reference, %target, path = ?path, "resolved reference");
            }
            None => debug!(%reference, path = ?path, "reference unresolved"),
        }
        Ok(found)
    }

    /// Fallback lookup: walk from the root declarations through named
    /// children, matching one declaration name per path segment.
    fn find_by_named_children(
        &self,
        base: NodeIndex,
        path: &[String],
    ) -> AstResult<Option<NodeIndex>> {
        if self.name_of(base) != path.first().map(String::as_str) {
            return Ok(None);
        }
        let base_node = self.node(base)?;
        let mut current: Vec<NodeIndex> = match base_node.child(keys::DECLARATIONS) {
            Some(declarations) => declarations.nodes(),
            None => vec![base],
        };

        for segment in &path[1..] {
            let mut next = None;
            for &scope in &current {
                let mut named = Vec::new();
                self.collect_named_children(scope, 0, &mut named)?;
                next = named.into_iter().find(|&child| {
                    self.get(child).is_some_and(|n| n.is_declaration())
                        && self.name_of(child) == Some(segment.as_str())
                });
                if next.is_some() {
                    break;
                }
            }
            match next {
                Some(found) => current = vec![found],
                None => return Ok(None),
            }
        }
        Ok(current.first().copied())
    }

    /// Named descendants of `idx` that have no named node between them and
    /// `idx`.
    fn collect_named_children(
        &self,
        idx: NodeIndex,
        depth: u32,
        out: &mut Vec<NodeIndex>,
    ) -> AstResult<()> {
        if depth >= MAX_TREE_DEPTH {
            return Err(AstError::DepthExceeded { node: idx });
        }
        for (child, _) in self.children_of(idx)? {
            let Some(node) = self.get(child) else {
                continue;
            };
            if node.is_named() {
                out.push(child);
            } else {
                self.collect_named_children(child, depth + 1, out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/reference_tests.rs"]
mod reference_tests;
