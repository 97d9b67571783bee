//! Bitmask flag sets used for fast node classification.

use bitflags::bitflags;

bitflags! {
    /// Structural flags. Generic tree code uses these to decide how to treat a
    /// node without knowing its concrete kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        /// Node has a `name` and can be keyed in a `NodeMap`.
        const NAMED = 1 << 0;
        /// Node can be the target of a Reference.
        const DECLARATION = 1 << 1;
        const CAN_REFERENCE = Self::DECLARATION.bits();
        /// Root-level named collection of declarations.
        const DEFINITION = 1 << 2;
        /// Node only appears nested inside another declaration.
        const NESTED = 1 << 29;
    }
}

bitflags! {
    /// Broad type categories, independent of the exact kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u32 {
        // Classification
        const UNIT = 1 << 1;
        const PRIMITIVE = 1 << 2;
        const COMPOSITE = 1 << 3;
        // Additional detail
        const NAMED = 1 << 4;
        /// Language-specific kind information is present in the origin.
        const SPECIFIC = 1 << 5;
        // Type grouping
        const LITERAL = 1 << 6;
        const NUMERIC = 1 << 7;
        const MODULE = 1 << 8;
        const ITERABLE = 1 << 9;
        const FUNCTION = 1 << 10;
        const TUPLE = 1 << 11;
        const OBJECT = 1 << 12;
        const REFERENCE = 1 << 13;
        const ENUM = 1 << 14;
        const CLASS = 1 << 15;
        const INTERFACE = 1 << 16;
        const PROPERTY = 1 << 17;
        const METHOD = 1 << 18;
        const ABSTRACT = 1 << 19;
        const OBJECT_MEMBER = 1 << 29;

        // Groups
        const OBJECT_LIKE = Self::OBJECT.bits() | Self::CLASS.bits() | Self::INTERFACE.bits();
        const CLASS_LIKE = Self::CLASS.bits() | Self::INTERFACE.bits();
    }
}

bitflags! {
    /// Access and mutability modifiers, meaningful mainly on declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const READ_ONLY = 1 << 1;
        const WRITE_ONLY = 1 << 2;
        const PUBLIC = 1 << 3;
        const PRIVATE = 1 << 4;
        const PROTECTED = 1 << 5;
        const INTERNAL = 1 << 6;
        /// Not part of the published API surface (e.g. a JSDoc `@internal` item).
        const UNPUBLISHED = 1 << 29;
    }
}

bitflags! {
    /// Aggregate flags of a Definition, derived from its declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DefinitionFlags: u32 {
        // Declaration kinds
        const FUNCTION = 1 << 0;
        const VARIABLE = 1 << 1;
        const CLASS = 1 << 2;
        const INTERFACE = 1 << 3;
        const TYPE = 1 << 4;
        const ENUM = 1 << 5;
        // Modifiers
        const HAS_MULTIPLE_DECLARATIONS = 1 << 6;
        /// Instance of a generic with supplied type arguments.
        const PARAMETERIZED = 1 << 29;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LinkedListFlags: u32 {
        const SINGLE = 1 << 0;
        const DOUBLE = 1 << 1;
        const MULTIPLE = 1 << 2;
        const CIRCULAR = 1 << 3;
        const HAS_SENTINEL = 1 << 4;
        const HASH_LINKING = 1 << 29;
    }
}
