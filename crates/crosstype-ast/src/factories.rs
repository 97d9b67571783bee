//! Node construction.
//!
//! [`NodeArena::create_node`] is the single entry point; the `create_*`
//! wrappers fill in kind defaults and required children. Any child that
//! already has a parent is cloned rather than moved, so building a node never
//! disturbs an existing tree.

use crate::arena::NodeArena;
use crate::containers::{NodeMap, NodeSet};
use crate::errors::{AstError, AstResult};
use crate::flags::{ModifierFlags, NodeFlags, TypeFlags};
use crate::kinds::{NodeKind, OrderKind};
use crate::metadata::{NodeMetadata, keys};
use crate::node::{
    ChildValue, DefinitionData, IterableData, ModuleData, Node, NodeData, NodeIndex,
    ReferenceData, SignatureData,
};
use crate::origin::NodeOrigin;
use crosstype_common::CompileOptionsSet;
use rustc_hash::FxHashSet;
use tracing::trace;

/// Initial value of a child property.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildInit {
    Node(NodeIndex),
    Set(Vec<NodeIndex>),
    Map(Vec<NodeIndex>),
}

/// Properties for a new node. Unset fields take the kind's defaults.
#[derive(Debug, Clone, Default)]
pub struct NodeInit {
    pub name: Option<String>,
    pub flags: NodeFlags,
    pub type_flags: TypeFlags,
    pub modifiers: ModifierFlags,
    pub origin: Option<NodeOrigin>,
    pub compile_options: CompileOptionsSet,
    pub data: NodeData,
    pub children: Vec<(&'static str, ChildInit)>,
}

impl NodeInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn type_flags(mut self, flags: TypeFlags) -> Self {
        self.type_flags |= flags;
        self
    }

    #[must_use]
    pub fn modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifiers |= modifiers;
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: NodeOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    #[must_use]
    pub fn compile_options(mut self, options: CompileOptionsSet) -> Self {
        self.compile_options = options;
        self
    }

    #[must_use]
    pub fn data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn child(mut self, key: &'static str, node: NodeIndex) -> Self {
        self.children.push((key, ChildInit::Node(node)));
        self
    }

    #[must_use]
    pub fn set(mut self, key: &'static str, nodes: impl IntoIterator<Item = NodeIndex>) -> Self {
        self.children
            .push((key, ChildInit::Set(nodes.into_iter().collect())));
        self
    }

    #[must_use]
    pub fn map(mut self, key: &'static str, nodes: impl IntoIterator<Item = NodeIndex>) -> Self {
        self.children
            .push((key, ChildInit::Map(nodes.into_iter().collect())));
        self
    }

    fn has_child(&self, key: &str) -> bool {
        self.children.iter().any(|(k, _)| *k == key)
    }

    /// Use `data` unless the caller supplied some.
    fn or_data(mut self, data: NodeData) -> Self {
        if self.data == NodeData::Empty {
            self.data = data;
        }
        self
    }
}

impl NodeArena {
    /// Create a node of `kind`.
    ///
    /// Flags are combined with the kind's base flags. A child that already
    /// has a parent (or appears twice in `init`) is replaced by a clone. A
    /// property given more than once keeps its last value; the earlier
    /// values are left untouched. NodeMap properties reject unnamed and
    /// same-named members.
    pub fn create_node(&mut self, kind: NodeKind, init: NodeInit) -> AstResult<NodeIndex> {
        let meta = NodeMetadata::for_kind(kind);
        let mut node = Node::new(kind);
        node.flags |= init.flags;
        node.type_flags |= init.type_flags;
        if init.origin.as_ref().is_some_and(|o| o.specific_kind.is_some()) {
            node.type_flags |= TypeFlags::SPECIFIC;
        }
        node.modifiers = init.modifiers;
        node.name = init.name;
        node.origin = init.origin;
        node.compile_options = init.compile_options;
        node.data = init.data;

        let mut entries = Vec::with_capacity(init.children.len());
        let mut seen = FxHashSet::default();
        for (key, child) in init.children.into_iter().rev() {
            let position = meta
                .child_position(key)
                .ok_or_else(|| AstError::UnknownChildProperty {
                    kind,
                    key: key.to_string(),
                })?;
            if seen.insert(position) {
                entries.push((key, position, child));
            }
        }
        entries.reverse();
        for (key, _, child) in &entries {
            if let ChildInit::Map(children) = child {
                self.check_map_members(kind, *key, children)?;
            }
        }

        let mut adopted = FxHashSet::default();
        for (key, position, child) in entries {
            let value = match child {
                ChildInit::Node(child) => {
                    ChildValue::Node(self.claim_child(child, NodeIndex::NONE, key, &mut adopted)?)
                }
                ChildInit::Set(children) => {
                    let mut set = NodeSet::with_capacity(children.len());
                    for child in children {
                        set.add(self.claim_child(child, NodeIndex::NONE, key, &mut adopted)?);
                    }
                    ChildValue::Set(set)
                }
                ChildInit::Map(children) => {
                    let mut map = NodeMap::new();
                    for child in children {
                        let claimed = self.claim_child(child, NodeIndex::NONE, key, &mut adopted)?;
                        map.insert_node(self, claimed);
                    }
                    ChildValue::Map(map)
                }
            };
            node.children[position] = Some(value);
        }

        let idx = self.alloc(node);
        for (child, _) in self.children_of(idx)? {
            self.node_mut(child)?.parent = idx;
        }
        trace!(%kind, %idx, "created node");
        Ok(idx)
    }

    /// `child` itself if it is free to be placed in `owner`'s `key` property,
    /// otherwise a parentless clone of it. A child of `owner` held in a
    /// different property is taken.
    pub(crate) fn claim_child(
        &mut self,
        child: NodeIndex,
        owner: NodeIndex,
        key: &str,
        adopted: &mut FxHashSet<NodeIndex>,
    ) -> AstResult<NodeIndex> {
        let parent = self.node(child)?.parent;
        let taken = parent.is_some() && (parent != owner || self.held_elsewhere(owner, key, child));
        let claimed = if taken || adopted.contains(&child) {
            trace!(%child, %parent, "auto-cloning parented child");
            self.clone_node(child, NodeIndex::NONE)?
        } else {
            child
        };
        adopted.insert(claimed);
        Ok(claimed)
    }

    fn held_elsewhere(&self, owner: NodeIndex, key: &str, child: NodeIndex) -> bool {
        self.get(owner).is_some_and(|node| {
            node.child_entries()
                .any(|(held_in, value)| held_in != key && value.contains(child))
        })
    }

    // =========================================================================
    // Reference
    // =========================================================================

    /// Reference to `target`, or an unresolved one when `target` is `None`.
    pub fn create_reference(
        &mut self,
        target: Option<NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init.or_data(NodeData::Reference(ReferenceData::default()));
        let reference = self.create_node(NodeKind::Reference, init)?;
        if let Some(target) = target {
            self.set_target(reference, target)?;
        }
        Ok(reference)
    }

    /// Unresolved Reference to be looked up from `base` by `path`.
    pub fn create_reference_by_path(
        &mut self,
        base: NodeIndex,
        path: impl IntoIterator<Item = impl Into<String>>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = ReferenceData {
            target: NodeIndex::NONE,
            target_base: base,
            path: path.into_iter().map(Into::into).collect(),
        };
        self.create_node(NodeKind::Reference, init.data(NodeData::Reference(data)))
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    pub fn create_string(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::String, init)
    }

    pub fn create_character(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        let init = init.or_data(NodeData::Character {
            length: None,
            bit_length: None,
        });
        self.create_node(NodeKind::Character, init)
    }

    pub fn create_byte(&mut self, signed: bool, init: NodeInit) -> AstResult<NodeIndex> {
        let init = init.or_data(NodeData::Byte {
            length: None,
            signed,
            bit_length: None,
        });
        self.create_node(NodeKind::Byte, init)
    }

    pub fn create_reg_exp(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::RegExp, init)
    }

    pub fn create_symbol(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::Symbol, init)
    }

    pub fn create_boolean(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::Boolean, init)
    }

    pub fn create_integer(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        let init = init.or_data(NodeData::Numeric { bit_length: None });
        self.create_node(NodeKind::Integer, init)
    }

    pub fn create_decimal_number(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        let init = init.or_data(NodeData::DecimalNumber {
            decimal_kind: Default::default(),
            decimal_precision: None,
            bit_length: None,
        });
        self.create_node(NodeKind::DecimalNumber, init)
    }

    pub fn create_complex_number(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        let init = init.or_data(NodeData::Numeric { bit_length: None });
        self.create_node(NodeKind::ComplexNumber, init)
    }

    pub fn create_not_a_number(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::NotANumber, init)
    }

    pub fn create_infinity(&mut self, negative: bool, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(
            NodeKind::Infinity,
            init.or_data(NodeData::Infinity { negative }),
        )
    }

    // =========================================================================
    // Literals
    // =========================================================================

    pub fn create_string_literal(
        &mut self,
        value: impl Into<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = NodeData::StringLiteral {
            value: value.into(),
        };
        self.create_node(NodeKind::StringLiteral, init.data(data))
    }

    pub fn create_true_literal(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::TrueLiteral, init)
    }

    pub fn create_false_literal(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::FalseLiteral, init)
    }

    pub fn create_reg_exp_literal(
        &mut self,
        expression: impl Into<String>,
        regex_flags: Option<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = NodeData::RegExpLiteral {
            expression: expression.into(),
            regex_flags,
        };
        self.create_node(NodeKind::RegExpLiteral, init.data(data))
    }

    pub fn create_symbol_literal(
        &mut self,
        value: Option<String>,
        always_unique: bool,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = NodeData::SymbolLiteral {
            value,
            always_unique,
        };
        self.create_node(NodeKind::SymbolLiteral, init.data(data))
    }

    pub fn create_date_time_literal(
        &mut self,
        format: impl Into<String>,
        value: impl Into<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = NodeData::DateTimeLiteral {
            format: format.into(),
            value: value.into(),
        };
        self.create_node(NodeKind::DateTimeLiteral, init.data(data))
    }

    pub fn create_integer_literal(
        &mut self,
        value: impl Into<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = NodeData::NumericLiteral {
            value: value.into(),
        };
        self.create_node(NodeKind::IntegerLiteral, init.data(data))
    }

    pub fn create_decimal_literal(
        &mut self,
        value: impl Into<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = NodeData::NumericLiteral {
            value: value.into(),
        };
        self.create_node(NodeKind::DecimalLiteral, init.data(data))
    }

    pub fn create_imaginary_number_literal(
        &mut self,
        value: impl Into<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let data = NodeData::NumericLiteral {
            value: value.into(),
        };
        self.create_node(NodeKind::ImaginaryNumberLiteral, init.data(data))
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub fn create_function_declaration(
        &mut self,
        name: impl Into<String>,
        signatures: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init.name(name).set(keys::SIGNATURES, signatures);
        self.create_node(NodeKind::FunctionDeclaration, init)
    }

    pub fn create_anonymous_function(
        &mut self,
        signature: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        self.create_node(
            NodeKind::AnonymousFunction,
            init.child(keys::SIGNATURE, signature),
        )
    }

    pub fn create_signature(
        &mut self,
        return_type: NodeIndex,
        parameters: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let parameters: Vec<NodeIndex> = parameters.into_iter().collect();
        let mut init = init
            .or_data(NodeData::Signature(SignatureData::default()))
            .child(keys::RETURN_TYPE, return_type);
        if !parameters.is_empty() {
            init = init.map(keys::PARAMETERS, parameters);
        }
        self.create_node(NodeKind::Signature, init)
    }

    pub fn create_parameter(
        &mut self,
        name: impl Into<String>,
        parameter_type: Option<NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let mut init = init.name(name).or_data(NodeData::Parameter {
            marked_optional: false,
            is_rest_parameter: false,
        });
        if let Some(parameter_type) = parameter_type {
            init = init.child(keys::TYPE, parameter_type);
        }
        self.create_node(NodeKind::Parameter, init)
    }

    // =========================================================================
    // Iterables
    // =========================================================================

    fn create_iterable(
        &mut self,
        kind: NodeKind,
        value_type: NodeIndex,
        defaults: IterableData,
        integer_index: bool,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let mut init = init
            .or_data(NodeData::Iterable(defaults))
            .child(keys::VALUE_TYPE, value_type);
        if integer_index && !init.has_child(keys::INDEX_TYPE) {
            let index_type = self.create_integer(NodeInit::new())?;
            init = init.child(keys::INDEX_TYPE, index_type);
        }
        self.create_node(kind, init)
    }

    pub fn create_generic_iterable(
        &mut self,
        value_type: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        self.create_iterable(
            NodeKind::GenericIterable,
            value_type,
            IterableData::default(),
            false,
            init,
        )
    }

    /// Array; the index type defaults to Integer.
    pub fn create_array(&mut self, value_type: NodeIndex, init: NodeInit) -> AstResult<NodeIndex> {
        let defaults = IterableData {
            order_kind: OrderKind::Index,
            ..IterableData::default()
        };
        self.create_iterable(NodeKind::Array, value_type, defaults, true, init)
    }

    pub fn create_set(&mut self, value_type: NodeIndex, init: NodeInit) -> AstResult<NodeIndex> {
        let defaults = IterableData {
            unique_members: Some(true),
            ..IterableData::default()
        };
        self.create_iterable(NodeKind::Set, value_type, defaults, false, init)
    }

    pub fn create_multi_set(
        &mut self,
        value_type: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let defaults = IterableData {
            unique_members: Some(false),
            ..IterableData::default()
        };
        self.create_iterable(NodeKind::MultiSet, value_type, defaults, false, init)
    }

    pub fn create_map(
        &mut self,
        index_type: NodeIndex,
        value_type: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let defaults = IterableData {
            order_kind: OrderKind::Index,
            unique_members: Some(true),
            resizable: Some(true),
            ..IterableData::default()
        };
        let init = init.child(keys::INDEX_TYPE, index_type);
        self.create_iterable(NodeKind::Map, value_type, defaults, false, init)
    }

    /// List; the index type defaults to Integer.
    pub fn create_list(&mut self, value_type: NodeIndex, init: NodeInit) -> AstResult<NodeIndex> {
        let defaults = IterableData {
            order_kind: OrderKind::Index,
            resizable: Some(true),
            ..IterableData::default()
        };
        self.create_iterable(NodeKind::List, value_type, defaults, true, init)
    }

    pub fn create_linked_list(
        &mut self,
        value_type: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let defaults = IterableData {
            order_kind: OrderKind::Link,
            ..IterableData::default()
        };
        self.create_iterable(NodeKind::LinkedList, value_type, defaults, false, init)
    }

    // =========================================================================
    // Enums, type parameters, set operations
    // =========================================================================

    pub fn create_enum_declaration(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .name(name)
            .or_data(NodeData::Enum { bit_length: None })
            .map(keys::MEMBERS, members);
        self.create_node(NodeKind::EnumDeclaration, init)
    }

    pub fn create_enum_member_declaration(
        &mut self,
        name: impl Into<String>,
        value: Option<NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let mut init = init.name(name);
        if let Some(value) = value {
            init = init.child(keys::VALUE, value);
        }
        self.create_node(NodeKind::EnumMemberDeclaration, init)
    }

    pub fn create_type_parameter_declaration(
        &mut self,
        name: impl Into<String>,
        constraint: Option<NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let mut init = init.name(name);
        if let Some(constraint) = constraint {
            init = init.child(keys::CONSTRAINT, constraint);
        }
        self.create_node(NodeKind::TypeParameterDeclaration, init)
    }

    /// TypeArgument bound to the TypeParameter `association`. It is keyed by
    /// the parameter's name.
    pub fn create_type_argument(
        &mut self,
        association: NodeIndex,
        argument_type: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        self.node_of_kind(association, NodeKind::TypeParameterDeclaration)?;
        let init = init
            .data(NodeData::TypeArgument { association })
            .child(keys::TYPE, argument_type);
        self.create_node(NodeKind::TypeArgument, init)
    }

    pub fn create_tuple(
        &mut self,
        elements: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .or_data(NodeData::Tuple {
                has_rest_element: false,
            })
            .set(keys::ELEMENTS, elements);
        self.create_node(NodeKind::Tuple, init)
    }

    pub fn create_union(
        &mut self,
        members: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .or_data(NodeData::Union {
                discriminants: Vec::new(),
            })
            .set(keys::MEMBERS, members);
        self.create_node(NodeKind::Union, init)
    }

    pub fn create_intersection(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::Intersection, init)
    }

    pub fn create_anything(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::Anything, init)
    }

    pub fn create_nothing(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::Nothing, init)
    }

    pub fn create_null(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(NodeKind::Null, init)
    }

    // =========================================================================
    // Modules
    // =========================================================================

    pub fn create_namespace(
        &mut self,
        name: impl Into<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .name(name)
            .or_data(NodeData::Module(ModuleData::default()));
        self.create_node(NodeKind::Namespace, init)
    }

    /// SourceFile named after `file_name`.
    pub fn create_source_file(
        &mut self,
        file_name: impl Into<String>,
        language: Option<String>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let file_name = file_name.into();
        let init = init.name(file_name.clone()).or_data(NodeData::Module(ModuleData {
            exported: false,
            language,
            file_name: Some(file_name),
        }));
        self.create_node(NodeKind::SourceFile, init)
    }

    // =========================================================================
    // Object-like and members
    // =========================================================================

    fn create_object_like(
        &mut self,
        kind: NodeKind,
        members: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .or_data(NodeData::ObjectLike {
                heritage: NodeSet::new(),
            })
            .map(keys::MEMBERS, members);
        self.create_node(kind, init)
    }

    pub fn create_object(
        &mut self,
        members: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        self.create_object_like(NodeKind::Object, members, init)
    }

    pub fn create_class_declaration(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        self.create_object_like(NodeKind::ClassDeclaration, members, init.name(name))
    }

    pub fn create_anonymous_class(
        &mut self,
        members: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        self.create_object_like(NodeKind::AnonymousClass, members, init)
    }

    pub fn create_interface_declaration(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        self.create_object_like(NodeKind::InterfaceDeclaration, members, init.name(name))
    }

    pub fn create_property_declaration(
        &mut self,
        name: impl Into<String>,
        value: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .name(name)
            .or_data(NodeData::ObjectMember {
                optional: false,
                is_accessor: false,
            })
            .child(keys::VALUE, value);
        self.create_node(NodeKind::PropertyDeclaration, init)
    }

    pub fn create_method_declaration(
        &mut self,
        name: impl Into<String>,
        signatures: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .name(name)
            .or_data(NodeData::ObjectMember {
                optional: false,
                is_accessor: false,
            })
            .set(keys::SIGNATURES, signatures);
        self.create_node(NodeKind::MethodDeclaration, init)
    }

    // =========================================================================
    // Dates, declarations, definitions
    // =========================================================================

    pub fn create_date(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(
            NodeKind::Date,
            init.or_data(NodeData::DateLike { format: None }),
        )
    }

    pub fn create_date_time(&mut self, init: NodeInit) -> AstResult<NodeIndex> {
        self.create_node(
            NodeKind::DateTime,
            init.or_data(NodeData::DateLike { format: None }),
        )
    }

    pub fn create_type_declaration(
        &mut self,
        name: impl Into<String>,
        value: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init.name(name).child(keys::VALUE, value);
        self.create_node(NodeKind::TypeDeclaration, init)
    }

    pub fn create_variable_declaration(
        &mut self,
        name: impl Into<String>,
        value: NodeIndex,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init.name(name).child(keys::VALUE, value);
        self.create_node(NodeKind::VariableDeclaration, init)
    }

    /// Definition grouping `declarations` under one name. Merged
    /// declarations share the name, so they are held in a set.
    pub fn create_definition(
        &mut self,
        name: impl Into<String>,
        declarations: impl IntoIterator<Item = NodeIndex>,
        init: NodeInit,
    ) -> AstResult<NodeIndex> {
        let init = init
            .name(name)
            .or_data(NodeData::Definition(DefinitionData {
                primary: true,
                ..DefinitionData::default()
            }))
            .set(keys::DECLARATIONS, declarations);
        self.create_node(NodeKind::Definition, init)
    }
}

#[cfg(test)]
#[path = "../tests/factories_tests.rs"]
mod factories_tests;
