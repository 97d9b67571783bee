//! Closed enumerations: node kinds and small per-kind enums.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! node_kinds {
    ($($(#[$meta:meta])* $kind:ident),+ $(,)?) => {
        /// Concrete shape of a node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u16)]
        pub enum NodeKind {
            $($(#[$meta])* $kind,)+
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind,)+];

            pub const COUNT: usize = Self::ALL.len();

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)+
                }
            }
        }
    };
}

node_kinds! {
    Reference,
    // Non-numeric primitives
    String,
    Character,
    Byte,
    RegExp,
    Symbol,
    Boolean,
    // Number-like primitives
    Integer,
    DecimalNumber,
    ComplexNumber,
    NotANumber,
    Infinity,
    // Non-numeric literals
    StringLiteral,
    TrueLiteral,
    FalseLiteral,
    RegExpLiteral,
    SymbolLiteral,
    DateTimeLiteral,
    // Numeric literals
    IntegerLiteral,
    DecimalLiteral,
    ImaginaryNumberLiteral,
    // Function-related
    FunctionDeclaration,
    AnonymousFunction,
    Signature,
    Parameter,
    // Iterables
    GenericIterable,
    Array,
    Set,
    MultiSet,
    Map,
    List,
    LinkedList,
    // Enum-related
    EnumDeclaration,
    EnumMemberDeclaration,
    // Type parameters
    TypeParameterDeclaration,
    TypeArgument,
    Tuple,
    // Set operations
    Union,
    Intersection,
    // Special types
    Anything,
    Nothing,
    Null,
    // Modules
    Namespace,
    SourceFile,
    // Object-like
    Object,
    ClassDeclaration,
    AnonymousClass,
    InterfaceDeclaration,
    // Object members
    PropertyDeclaration,
    MethodDeclaration,
    // Abstract data types
    Date,
    DateTime,
    // Other declarations
    TypeDeclaration,
    VariableDeclaration,
    Definition,
}

impl NodeKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an iterable orders its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderKind {
    #[default]
    Insertion,
    Index,
    Link,
    Calculated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignatureKind {
    #[default]
    Call,
    Construct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DecimalKind {
    #[default]
    Float,
    Fixed,
    Either,
}
