//! Properties derived from a node's children on demand.

use crate::arena::NodeArena;
use crate::containers::{NodeIterable, NodeMap};
use crate::errors::{AstError, AstResult};
use crate::flags::{DefinitionFlags, TypeFlags};
use crate::kinds::NodeKind;
use crate::metadata::keys;
use crate::node::{ChildValue, Node, NodeIndex};

impl NodeArena {
    /// Aggregate flags of a Definition: one flag per declaration kind, plus
    /// `HAS_MULTIPLE_DECLARATIONS` and `PARAMETERIZED`.
    pub fn definition_flags(&self, definition: NodeIndex) -> AstResult<DefinitionFlags> {
        let node = self.node_of_kind(definition, NodeKind::Definition)?;
        let declarations = node
            .child(keys::DECLARATIONS)
            .map(ChildValue::nodes)
            .unwrap_or_default();

        let mut flags = DefinitionFlags::empty();
        if declarations.len() > 1 {
            flags |= DefinitionFlags::HAS_MULTIPLE_DECLARATIONS;
        }
        if node
            .child_map(keys::TYPE_ARGUMENTS)
            .is_some_and(|arguments| !arguments.is_empty())
        {
            flags |= DefinitionFlags::PARAMETERIZED;
        }
        for declaration in declarations {
            flags |= match self.kind_of(declaration) {
                Some(NodeKind::FunctionDeclaration) => DefinitionFlags::FUNCTION,
                Some(NodeKind::VariableDeclaration) => DefinitionFlags::VARIABLE,
                Some(NodeKind::ClassDeclaration) => DefinitionFlags::CLASS,
                Some(NodeKind::InterfaceDeclaration) => DefinitionFlags::INTERFACE,
                Some(NodeKind::TypeDeclaration) => DefinitionFlags::TYPE,
                Some(NodeKind::EnumDeclaration) => DefinitionFlags::ENUM,
                _ => DefinitionFlags::empty(),
            };
        }
        Ok(flags)
    }

    /// Root-level declarations of a Definition.
    pub fn declarations(&self, definition: NodeIndex) -> AstResult<Vec<NodeIndex>> {
        let node = self.node_of_kind(definition, NodeKind::Definition)?;
        Ok(node
            .child(keys::DECLARATIONS)
            .map(ChildValue::nodes)
            .unwrap_or_default())
    }

    /// Member names of an enum, in declaration order.
    pub fn enum_keys(&self, enum_declaration: NodeIndex) -> AstResult<Vec<String>> {
        let node = self.node_of_kind(enum_declaration, NodeKind::EnumDeclaration)?;
        Ok(node
            .child_map(keys::MEMBERS)
            .map(|members| members.keys().map(str::to_owned).collect())
            .unwrap_or_default())
    }

    /// Value node of each enum member, aligned with [`enum_keys`](Self::enum_keys).
    pub fn enum_values(&self, enum_declaration: NodeIndex) -> AstResult<Vec<Option<NodeIndex>>> {
        let node = self.node_of_kind(enum_declaration, NodeKind::EnumDeclaration)?;
        Ok(node
            .child_map(keys::MEMBERS)
            .map(|members| {
                members
                    .nodes()
                    .map(|member| self.get(member).and_then(|m| m.child_node(keys::VALUE)))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Members of an object-like node.
    pub fn members(&self, object: NodeIndex) -> AstResult<Option<&NodeMap>> {
        let node = self.object_like(object)?;
        Ok(node.child_map(keys::MEMBERS))
    }

    /// Property members of an object-like node.
    pub fn object_properties(&self, object: NodeIndex) -> AstResult<NodeMap> {
        self.filtered_members(object, NodeKind::PropertyDeclaration)
    }

    /// Method members of an object-like node.
    pub fn object_methods(&self, object: NodeIndex) -> AstResult<NodeMap> {
        self.filtered_members(object, NodeKind::MethodDeclaration)
    }

    fn filtered_members(&self, object: NodeIndex, kind: NodeKind) -> AstResult<NodeMap> {
        let Some(members) = self.members(object)? else {
            return Ok(NodeMap::new());
        };
        Ok(NodeMap::from_iter_with(self, members.nodes(), |member| {
            (self.kind_of(member) == Some(kind)).then_some(member)
        }))
    }

    fn object_like(&self, idx: NodeIndex) -> AstResult<&Node> {
        let node = self.node(idx)?;
        if !node.type_flags.intersects(TypeFlags::OBJECT_LIKE) {
            return Err(AstError::KindMismatch {
                index: idx,
                expected: "object-like node",
                found: node.kind,
            });
        }
        Ok(node)
    }
}

#[cfg(test)]
#[path = "../tests/computed_tests.rs"]
mod computed_tests;
