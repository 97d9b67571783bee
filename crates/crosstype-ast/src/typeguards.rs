//! Kind and kind-group predicates over `&Node`.
//!
//! All predicates are plain `fn(&Node) -> bool`, so they can be used directly
//! as a [`DeclarationPredicate`](crate::resolution::DeclarationPredicate).

use crate::flags::{NodeFlags, TypeFlags};
use crate::kinds::NodeKind;
use crate::node::Node;

macro_rules! kind_guards {
    ($($name:ident => $kind:ident),+ $(,)?) => {
        $(
            #[inline]
            pub fn $name(node: &Node) -> bool {
                node.kind == NodeKind::$kind
            }
        )+
    };
}

kind_guards! {
    is_reference => Reference,
    is_string => String,
    is_character => Character,
    is_byte => Byte,
    is_reg_exp => RegExp,
    is_symbol => Symbol,
    is_boolean => Boolean,
    is_integer => Integer,
    is_decimal_number => DecimalNumber,
    is_complex_number => ComplexNumber,
    is_not_a_number => NotANumber,
    is_infinity => Infinity,
    is_string_literal => StringLiteral,
    is_true_literal => TrueLiteral,
    is_false_literal => FalseLiteral,
    is_reg_exp_literal => RegExpLiteral,
    is_symbol_literal => SymbolLiteral,
    is_date_time_literal => DateTimeLiteral,
    is_integer_literal => IntegerLiteral,
    is_decimal_literal => DecimalLiteral,
    is_imaginary_number_literal => ImaginaryNumberLiteral,
    is_function_declaration => FunctionDeclaration,
    is_anonymous_function => AnonymousFunction,
    is_signature => Signature,
    is_parameter => Parameter,
    is_generic_iterable => GenericIterable,
    is_array => Array,
    is_set => Set,
    is_multi_set => MultiSet,
    is_map => Map,
    is_list => List,
    is_linked_list => LinkedList,
    is_enum_declaration => EnumDeclaration,
    is_enum_member_declaration => EnumMemberDeclaration,
    is_type_parameter_declaration => TypeParameterDeclaration,
    is_type_argument => TypeArgument,
    is_tuple => Tuple,
    is_union => Union,
    is_intersection => Intersection,
    is_anything => Anything,
    is_nothing => Nothing,
    is_null => Null,
    is_namespace => Namespace,
    is_source_file => SourceFile,
    is_object => Object,
    is_class_declaration => ClassDeclaration,
    is_anonymous_class => AnonymousClass,
    is_interface_declaration => InterfaceDeclaration,
    is_property_declaration => PropertyDeclaration,
    is_method_declaration => MethodDeclaration,
    is_date => Date,
    is_date_time => DateTime,
    is_type_declaration => TypeDeclaration,
    is_variable_declaration => VariableDeclaration,
    is_definition => Definition,
}

// =============================================================================
// Groups
// =============================================================================

pub fn is_named_node(node: &Node) -> bool {
    node.flags.contains(NodeFlags::NAMED)
}

pub fn is_declaration(node: &Node) -> bool {
    node.flags.contains(NodeFlags::DECLARATION)
}

pub fn is_definition_node(node: &Node) -> bool {
    node.flags.contains(NodeFlags::DEFINITION)
}

/// Namespace or SourceFile.
pub fn is_module(node: &Node) -> bool {
    node.type_flags.contains(TypeFlags::MODULE)
}

pub fn is_numeric(node: &Node) -> bool {
    node.type_flags.contains(TypeFlags::NUMERIC)
}

/// Numbers on the real line (no complex or NaN).
pub fn is_real_number(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Integer | NodeKind::DecimalNumber | NodeKind::Infinity
    )
}

pub fn is_iterable(node: &Node) -> bool {
    node.type_flags.contains(TypeFlags::ITERABLE)
}

pub fn is_object_like(node: &Node) -> bool {
    node.type_flags.intersects(TypeFlags::OBJECT_LIKE)
}

pub fn is_class_like(node: &Node) -> bool {
    node.type_flags.intersects(TypeFlags::CLASS_LIKE)
}

pub fn is_object_member(node: &Node) -> bool {
    node.type_flags.contains(TypeFlags::OBJECT_MEMBER)
}

pub fn is_date_like(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Date | NodeKind::DateTime)
}

pub fn is_function_node(node: &Node) -> bool {
    node.type_flags.contains(TypeFlags::FUNCTION)
}

pub fn is_literal(node: &Node) -> bool {
    node.type_flags.contains(TypeFlags::LITERAL)
}

pub fn is_numeric_literal(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::IntegerLiteral | NodeKind::DecimalLiteral | NodeKind::ImaginaryNumberLiteral
    )
}

#[cfg(test)]
#[path = "../tests/typeguards_tests.rs"]
mod typeguards_tests;
