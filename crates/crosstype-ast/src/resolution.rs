//! Path-based declaration lookup.
//!
//! Given a search root (a Definition or a TypeParameter) and a name path
//! starting with the root's own name, find the declarations the path denotes.
//! A Definition may merge several same-named declarations (an interface and a
//! class, say); each one is searched independently and the results are
//! ordered by a priority list of kind predicates.

use crate::arena::NodeArena;
use crate::containers::NodeMap;
use crate::errors::AstResult;
use crate::flags::TypeFlags;
use crate::kinds::NodeKind;
use crate::metadata::keys;
use crate::node::{ChildValue, Node, NodeIndex};
use crate::typeguards;
use tracing::trace;

/// Kind predicate used to order ambiguous matches.
pub type DeclarationPredicate = fn(&Node) -> bool;

/// Interface, class, type alias, variable, enum, function.
pub const DEFAULT_DECLARATION_PRIORITY: &[DeclarationPredicate] = &[
    typeguards::is_interface_declaration,
    typeguards::is_class_declaration,
    typeguards::is_type_declaration,
    typeguards::is_variable_declaration,
    typeguards::is_enum_declaration,
    typeguards::is_function_declaration,
];

impl NodeArena {
    /// Declarations under `base` denoted by `path`.
    ///
    /// `path[0]` must be the name of `base`. With a one-segment path every
    /// root declaration matches. Returns `None` when nothing matches.
    #[tracing::instrument(level = "trace", skip(self, path, priority))]
    pub fn find_target_declarations_by_path<S: AsRef<str>>(
        &self,
        base: NodeIndex,
        path: &[S],
        priority: Option<&[DeclarationPredicate]>,
    ) -> AstResult<Option<Vec<NodeIndex>>> {
        let base_node = self.node(base)?;
        let Some((first, rest)) = path.split_first() else {
            return Ok(None);
        };
        if self.name_of(base) != Some(first.as_ref()) {
            return Ok(None);
        }

        let roots: Vec<NodeIndex> = match base_node.kind {
            NodeKind::Definition => base_node
                .child(keys::DECLARATIONS)
                .map(ChildValue::nodes)
                .unwrap_or_default(),
            NodeKind::TypeParameterDeclaration => vec![base],
            _ => return Ok(None),
        };

        let matches: Vec<(NodeIndex, NodeIndex)> = roots
            .into_iter()
            .filter_map(|root| self.descend_path(root, rest).map(|found| (root, found)))
            .collect();
        trace!(matches = matches.len(), "path lookup");

        match matches.as_slice() {
            [] => Ok(None),
            [(_, only)] => Ok(Some(vec![*only])),
            _ => {
                let priority = priority.unwrap_or(DEFAULT_DECLARATION_PRIORITY);
                let mut ordered = Vec::with_capacity(matches.len());
                for predicate in priority {
                    for &(root, found) in &matches {
                        let root_matches = self.get(root).is_some_and(|n| predicate(n));
                        if root_matches && !ordered.contains(&found) {
                            ordered.push(found);
                        }
                    }
                }
                Ok(if ordered.is_empty() {
                    None
                } else {
                    Some(ordered)
                })
            }
        }
    }

    /// Follow `segments` from the root declaration `root`.
    fn descend_path<S: AsRef<str>>(&self, root: NodeIndex, segments: &[S]) -> Option<NodeIndex> {
        let Some((last, intermediate)) = segments.split_last() else {
            return Some(root);
        };
        let mut members = self.declaration_members(root)?;
        for segment in intermediate {
            let property = self.get(members.get(segment.as_ref())?)?;
            if property.kind != NodeKind::PropertyDeclaration {
                return None;
            }
            members = self.object_like_members(property.child_node(keys::VALUE)?)?;
        }
        members.get(last.as_ref())
    }

    /// Member map searched below a root declaration.
    fn declaration_members(&self, root: NodeIndex) -> Option<&NodeMap> {
        let node = self.get(root)?;
        match node.kind {
            NodeKind::TypeDeclaration | NodeKind::VariableDeclaration => {
                self.object_like_members(node.child_node(keys::VALUE)?)
            }
            NodeKind::TypeParameterDeclaration => {
                self.object_like_members(node.child_node(keys::CONSTRAINT)?)
            }
            NodeKind::EnumDeclaration
            | NodeKind::ClassDeclaration
            | NodeKind::InterfaceDeclaration => node.child_map(keys::MEMBERS),
            _ => None,
        }
    }

    fn object_like_members(&self, idx: NodeIndex) -> Option<&NodeMap> {
        let node = self.get(idx)?;
        if !node.type_flags.intersects(TypeFlags::OBJECT_LIKE) {
            return None;
        }
        node.child_map(keys::MEMBERS)
    }
}
