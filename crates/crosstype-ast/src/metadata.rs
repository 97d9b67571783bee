//! Static per-kind metadata table.
//!
//! For every [`NodeKind`] the table records which properties hold children
//! (and whether they are optional), the flags every node of that kind carries,
//! and whether the kind is a named node. Generic tree code (navigation,
//! cleanup, clone, delete) consults only this table to find a node's
//! children; it never matches on concrete kinds.
//!
//! Child properties are listed in declaration order, which is the order
//! `for_each_child` visits them.

use crate::flags::{NodeFlags, TypeFlags};
use crate::kinds::NodeKind;
use once_cell::sync::Lazy;

/// Child-holding property keys.
pub mod keys {
    pub const DECLARATIONS: &str = "declarations";
    pub const TYPE_ARGUMENTS: &str = "type_arguments";
    pub const DEFINITIONS: &str = "definitions";
    pub const NAMESPACES: &str = "namespaces";
    pub const INDEX_TYPE: &str = "index_type";
    pub const VALUE_TYPE: &str = "value_type";
    pub const MEMBERS: &str = "members";
    pub const VALUE: &str = "value";
    pub const ELEMENTS: &str = "elements";
    pub const CONSTRUCT_SIGNATURES: &str = "construct_signatures";
    pub const CALL_SIGNATURES: &str = "call_signatures";
    pub const TYPE_PARAMETERS: &str = "type_parameters";
    pub const SIGNATURES: &str = "signatures";
    pub const SIGNATURE: &str = "signature";
    pub const RETURN_TYPE: &str = "return_type";
    pub const PARAMETERS: &str = "parameters";
    pub const TYPE: &str = "type";
    pub const INITIALIZER: &str = "initializer";
    pub const CONSTRAINT: &str = "constraint";
    pub const DEFAULT: &str = "default";
    pub const RESOLVED_TYPE: &str = "resolved_type";
}

/// Which container a child property normally holds.
///
/// Only used to pick a container when a child is inserted into an empty
/// property; the stored value may still be any `ChildValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildShape {
    Node,
    Set,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildProperty {
    pub key: &'static str,
    pub optional: bool,
    pub shape: ChildShape,
}

const fn required(key: &'static str, shape: ChildShape) -> ChildProperty {
    ChildProperty {
        key,
        optional: false,
        shape,
    }
}

const fn optional(key: &'static str, shape: ChildShape) -> ChildProperty {
    ChildProperty {
        key,
        optional: true,
        shape,
    }
}

#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub kind: NodeKind,
    pub child_container_properties: &'static [ChildProperty],
    pub base_flags: NodeFlags,
    pub base_type_flags: TypeFlags,
    pub is_named_node: bool,
}

impl NodeMetadata {
    /// Metadata entry for `kind`.
    #[inline]
    pub fn for_kind(kind: NodeKind) -> &'static NodeMetadata {
        &NODE_METADATA[kind.index()]
    }

    /// Position of `key` among the child properties.
    #[inline]
    pub fn child_position(&self, key: &str) -> Option<usize> {
        self.child_container_properties
            .iter()
            .position(|p| p.key == key)
    }

    #[inline]
    pub fn child_property(&self, key: &str) -> Option<&'static ChildProperty> {
        self.child_container_properties.iter().find(|p| p.key == key)
    }

    #[inline]
    pub fn is_child_property(&self, key: &str) -> bool {
        self.child_position(key).is_some()
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.child_container_properties.is_empty()
    }
}

// =============================================================================
// Table
// =============================================================================

use ChildShape::{Map, Node, Set};

const NO_CHILDREN: &[ChildProperty] = &[];

const DEFINITION_CHILDREN: &[ChildProperty] = &[
    required(keys::DECLARATIONS, Set),
    optional(keys::TYPE_ARGUMENTS, Map),
];

const MODULE_CHILDREN: &[ChildProperty] = &[
    optional(keys::DEFINITIONS, Map),
    optional(keys::NAMESPACES, Map),
];

const ITERABLE_CHILDREN: &[ChildProperty] = &[
    optional(keys::INDEX_TYPE, Node),
    required(keys::VALUE_TYPE, Node),
];

const INDEXED_ITERABLE_CHILDREN: &[ChildProperty] = &[
    required(keys::INDEX_TYPE, Node),
    required(keys::VALUE_TYPE, Node),
];

const ENUM_CHILDREN: &[ChildProperty] = &[required(keys::MEMBERS, Map)];

const OPTIONAL_VALUE_CHILDREN: &[ChildProperty] = &[optional(keys::VALUE, Node)];

const VALUE_CHILDREN: &[ChildProperty] = &[required(keys::VALUE, Node)];

const TUPLE_CHILDREN: &[ChildProperty] = &[optional(keys::ELEMENTS, Set)];

const OBJECT_CHILDREN: &[ChildProperty] = &[
    required(keys::MEMBERS, Map),
    optional(keys::INDEX_TYPE, Node),
    optional(keys::VALUE_TYPE, Node),
];

const CLASS_CHILDREN: &[ChildProperty] = &[
    required(keys::MEMBERS, Map),
    optional(keys::INDEX_TYPE, Node),
    optional(keys::VALUE_TYPE, Node),
    optional(keys::CONSTRUCT_SIGNATURES, Set),
    optional(keys::TYPE_PARAMETERS, Map),
];

const INTERFACE_CHILDREN: &[ChildProperty] = &[
    required(keys::MEMBERS, Map),
    optional(keys::INDEX_TYPE, Node),
    optional(keys::VALUE_TYPE, Node),
    optional(keys::CONSTRUCT_SIGNATURES, Set),
    optional(keys::TYPE_PARAMETERS, Map),
    optional(keys::CALL_SIGNATURES, Set),
];

const SIGNATURES_CHILDREN: &[ChildProperty] = &[required(keys::SIGNATURES, Set)];

const ANONYMOUS_FUNCTION_CHILDREN: &[ChildProperty] = &[required(keys::SIGNATURE, Node)];

const SIGNATURE_CHILDREN: &[ChildProperty] = &[
    required(keys::RETURN_TYPE, Node),
    optional(keys::PARAMETERS, Map),
    optional(keys::TYPE_PARAMETERS, Map),
];

const PARAMETER_CHILDREN: &[ChildProperty] = &[
    optional(keys::TYPE, Node),
    optional(keys::INITIALIZER, Node),
];

const TYPE_PARAMETER_CHILDREN: &[ChildProperty] = &[
    optional(keys::CONSTRAINT, Node),
    optional(keys::DEFAULT, Node),
];

const TYPE_ARGUMENT_CHILDREN: &[ChildProperty] = &[required(keys::TYPE, Node)];

const UNION_CHILDREN: &[ChildProperty] = &[required(keys::MEMBERS, Set)];

const INTERSECTION_CHILDREN: &[ChildProperty] = &[optional(keys::RESOLVED_TYPE, Node)];

fn child_properties(kind: NodeKind) -> &'static [ChildProperty] {
    use NodeKind as K;
    match kind {
        K::Definition => DEFINITION_CHILDREN,
        K::Namespace | K::SourceFile => MODULE_CHILDREN,
        K::GenericIterable | K::Set | K::MultiSet | K::LinkedList => ITERABLE_CHILDREN,
        K::Array | K::Map | K::List => INDEXED_ITERABLE_CHILDREN,
        K::EnumDeclaration => ENUM_CHILDREN,
        K::EnumMemberDeclaration => OPTIONAL_VALUE_CHILDREN,
        K::Tuple => TUPLE_CHILDREN,
        K::Object => OBJECT_CHILDREN,
        K::ClassDeclaration | K::AnonymousClass => CLASS_CHILDREN,
        K::InterfaceDeclaration => INTERFACE_CHILDREN,
        K::PropertyDeclaration | K::TypeDeclaration | K::VariableDeclaration => VALUE_CHILDREN,
        K::MethodDeclaration | K::FunctionDeclaration => SIGNATURES_CHILDREN,
        K::AnonymousFunction => ANONYMOUS_FUNCTION_CHILDREN,
        K::Signature => SIGNATURE_CHILDREN,
        K::Parameter => PARAMETER_CHILDREN,
        K::TypeParameterDeclaration => TYPE_PARAMETER_CHILDREN,
        K::TypeArgument => TYPE_ARGUMENT_CHILDREN,
        K::Union => UNION_CHILDREN,
        K::Intersection => INTERSECTION_CHILDREN,
        K::Reference
        | K::String
        | K::Character
        | K::Byte
        | K::RegExp
        | K::Symbol
        | K::Boolean
        | K::Integer
        | K::DecimalNumber
        | K::ComplexNumber
        | K::NotANumber
        | K::Infinity
        | K::StringLiteral
        | K::TrueLiteral
        | K::FalseLiteral
        | K::RegExpLiteral
        | K::SymbolLiteral
        | K::DateTimeLiteral
        | K::IntegerLiteral
        | K::DecimalLiteral
        | K::ImaginaryNumberLiteral
        | K::Anything
        | K::Nothing
        | K::Null
        | K::Date
        | K::DateTime => NO_CHILDREN,
    }
}

fn base_flags(kind: NodeKind) -> NodeFlags {
    use NodeKind as K;
    let named = NodeFlags::NAMED;
    let declaration = NodeFlags::NAMED | NodeFlags::DECLARATION;
    match kind {
        K::Definition => named | NodeFlags::DEFINITION,
        K::Namespace | K::SourceFile => named,
        K::FunctionDeclaration
        | K::ClassDeclaration
        | K::InterfaceDeclaration
        | K::EnumDeclaration
        | K::TypeDeclaration
        | K::VariableDeclaration => declaration,
        K::EnumMemberDeclaration
        | K::PropertyDeclaration
        | K::MethodDeclaration
        | K::TypeParameterDeclaration => declaration | NodeFlags::NESTED,
        K::Parameter | K::TypeArgument => named | NodeFlags::NESTED,
        K::Signature => NodeFlags::NESTED,
        _ => NodeFlags::empty(),
    }
}

fn base_type_flags(kind: NodeKind) -> TypeFlags {
    use NodeKind as K;
    match kind {
        K::Reference => TypeFlags::REFERENCE,
        K::String | K::Character | K::Byte | K::RegExp | K::Symbol | K::Boolean => {
            TypeFlags::PRIMITIVE
        }
        K::Integer | K::DecimalNumber | K::ComplexNumber | K::NotANumber | K::Infinity => {
            TypeFlags::PRIMITIVE | TypeFlags::NUMERIC
        }
        K::StringLiteral
        | K::TrueLiteral
        | K::FalseLiteral
        | K::RegExpLiteral
        | K::SymbolLiteral
        | K::DateTimeLiteral
        | K::IntegerLiteral
        | K::DecimalLiteral
        | K::ImaginaryNumberLiteral => TypeFlags::LITERAL,
        K::FunctionDeclaration | K::AnonymousFunction => TypeFlags::FUNCTION,
        K::GenericIterable
        | K::Array
        | K::Set
        | K::MultiSet
        | K::Map
        | K::List
        | K::LinkedList => TypeFlags::ITERABLE | TypeFlags::COMPOSITE,
        K::EnumDeclaration => TypeFlags::ENUM,
        K::Tuple => TypeFlags::TUPLE,
        K::Union | K::Intersection => TypeFlags::COMPOSITE,
        K::Null => TypeFlags::UNIT,
        K::Namespace | K::SourceFile => TypeFlags::MODULE,
        K::Object => TypeFlags::OBJECT,
        K::ClassDeclaration | K::AnonymousClass => TypeFlags::CLASS | TypeFlags::COMPOSITE,
        K::InterfaceDeclaration => TypeFlags::INTERFACE | TypeFlags::COMPOSITE,
        K::PropertyDeclaration => TypeFlags::PROPERTY | TypeFlags::OBJECT_MEMBER,
        K::MethodDeclaration => TypeFlags::METHOD | TypeFlags::OBJECT_MEMBER,
        K::Date | K::DateTime => TypeFlags::ABSTRACT,
        _ => TypeFlags::empty(),
    }
}

static NODE_METADATA: Lazy<Vec<NodeMetadata>> = Lazy::new(|| {
    NodeKind::ALL
        .iter()
        .map(|&kind| {
            let flags = base_flags(kind);
            let is_named_node = flags.contains(NodeFlags::NAMED);
            let mut type_flags = base_type_flags(kind);
            if is_named_node {
                type_flags |= TypeFlags::NAMED;
            }
            NodeMetadata {
                kind,
                child_container_properties: child_properties(kind),
                base_flags: flags,
                base_type_flags: type_flags,
                is_named_node,
            }
        })
        .collect()
});

#[cfg(test)]
#[path = "../tests/metadata_tests.rs"]
mod metadata_tests;
