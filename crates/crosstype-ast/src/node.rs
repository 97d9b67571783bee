//! Node record, identifiers and kind-specific data.

use crate::containers::{NodeIterable, NodeMap, NodeSet};
use crate::flags::{LinkedListFlags, ModifierFlags, NodeFlags, TypeFlags};
use crate::kinds::{DecimalKind, NodeKind, OrderKind, SignatureKind};
use crate::metadata::NodeMetadata;
use crate::origin::{NodeOrigin, OutputFile};
use crosstype_common::CompileOptionsSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for process-unique node ids.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// Identifiers
// =============================================================================

/// Process-unique node identity, assigned at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generational handle to a node in a [`NodeArena`](crate::NodeArena).
///
/// A handle outlives the node it points at: once the node is deleted the slot
/// generation moves on, and every lookup through a stale handle fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex {
    slot: u32,
    generation: u32,
}

impl NodeIndex {
    /// Sentinel for "no node" (absent parent, unresolved target).
    pub const NONE: Self = Self {
        slot: u32::MAX,
        generation: 0,
    };

    #[inline]
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.slot == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// `None` for the sentinel, otherwise `Some(self)`.
    #[inline]
    pub fn into_option(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("#none")
        } else {
            write!(f, "#{}@{}", self.slot, self.generation)
        }
    }
}

// =============================================================================
// Child values
// =============================================================================

/// Value of a child-holding property.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildValue {
    Node(NodeIndex),
    Set(NodeSet),
    Map(NodeMap),
}

impl ChildValue {
    /// Member nodes, in container order.
    pub fn nodes(&self) -> Vec<NodeIndex> {
        match self {
            ChildValue::Node(n) => vec![*n],
            ChildValue::Set(set) => set.to_vec(),
            ChildValue::Map(map) => map.to_vec(),
        }
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        match self {
            ChildValue::Node(n) => *n == node,
            ChildValue::Set(set) => set.contains(node),
            ChildValue::Map(map) => map.contains_node(node),
        }
    }

    /// True for an empty container. A single node is never empty.
    pub fn is_empty_container(&self) -> bool {
        match self {
            ChildValue::Node(_) => false,
            ChildValue::Set(set) => set.is_empty(),
            ChildValue::Map(map) => map.is_empty(),
        }
    }

    #[inline]
    pub fn as_node(&self) -> Option<NodeIndex> {
        match self {
            ChildValue::Node(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_set(&self) -> Option<&NodeSet> {
        match self {
            ChildValue::Set(set) => Some(set),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            ChildValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Child-holding property values of a node, positioned as in the kind's
/// metadata entry.
pub(crate) type ChildSlots = SmallVec<[Option<ChildValue>; 2]>;

// =============================================================================
// Kind-specific data
// =============================================================================

/// `{ min, max }` range used for lengths and bit widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: u64,
    pub max: Option<u64>,
}

/// A length, a set of permitted lengths, or a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    Fixed(u64),
    OneOf(Vec<u64>),
    Range(NumberRange),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceData {
    /// Cached target; `NONE` while unresolved.
    pub(crate) target: NodeIndex,
    /// Declaration-search root (the target's Definition).
    pub target_base: NodeIndex,
    /// Names from the search root down to the target.
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterableData {
    pub order_kind: OrderKind,
    pub unique_members: Option<bool>,
    pub resizable: Option<bool>,
    pub linked_list_flags: LinkedListFlags,
}

impl Default for IterableData {
    fn default() -> Self {
        Self {
            order_kind: OrderKind::Insertion,
            unique_members: None,
            resizable: None,
            linked_list_flags: LinkedListFlags::empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefinitionData {
    pub primary: bool,
    pub exported: bool,
    pub outputs: Vec<OutputFile>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleData {
    pub exported: bool,
    /// Source language (source files only).
    pub language: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureData {
    pub signature_kind: SignatureKind,
    pub is_async: bool,
    pub is_generator: bool,
}

/// Non-child data of a node. Child-holding properties are not stored here;
/// see [`Node::child`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeData {
    #[default]
    Empty,
    Reference(ReferenceData),
    Character {
        length: Option<Length>,
        bit_length: Option<Length>,
    },
    Byte {
        length: Option<Length>,
        signed: bool,
        bit_length: Option<Length>,
    },
    /// Integer and complex numbers.
    Numeric {
        bit_length: Option<Length>,
    },
    DecimalNumber {
        decimal_kind: DecimalKind,
        decimal_precision: Option<u32>,
        bit_length: Option<Length>,
    },
    Infinity {
        negative: bool,
    },
    StringLiteral {
        value: String,
    },
    RegExpLiteral {
        expression: String,
        regex_flags: Option<String>,
    },
    DateTimeLiteral {
        format: String,
        value: String,
    },
    SymbolLiteral {
        value: Option<String>,
        always_unique: bool,
    },
    /// Integer, decimal and imaginary literals; the value is kept as source text.
    NumericLiteral {
        value: String,
    },
    Iterable(IterableData),
    Definition(DefinitionData),
    Module(ModuleData),
    Enum {
        bit_length: Option<Length>,
    },
    Tuple {
        has_rest_element: bool,
    },
    /// Object-like nodes. `heritage` holds References to base classes and
    /// interfaces; it is not a child container.
    ObjectLike {
        heritage: NodeSet,
    },
    ObjectMember {
        optional: bool,
        is_accessor: bool,
    },
    DateLike {
        format: Option<String>,
    },
    Signature(SignatureData),
    Parameter {
        marked_optional: bool,
        is_rest_parameter: bool,
    },
    /// `association` is the TypeParameter this argument binds; not a child.
    TypeArgument {
        association: NodeIndex,
    },
    Union {
        discriminants: Vec<String>,
    },
}

// =============================================================================
// Node
// =============================================================================

/// A node of the graph. Lives in a [`NodeArena`](crate::NodeArena) and is
/// addressed by [`NodeIndex`].
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub flags: NodeFlags,
    pub type_flags: TypeFlags,
    pub modifiers: ModifierFlags,
    /// Enclosing node; `NONE` for roots.
    pub parent: NodeIndex,
    /// Name of a named node. TypeArguments take their name from the
    /// associated TypeParameter instead (see `NodeArena::name_of`).
    pub name: Option<String>,
    pub origin: Option<NodeOrigin>,
    pub compile_options: CompileOptionsSet,
    pub data: NodeData,
    pub(crate) children: ChildSlots,
    pub(crate) references_to_this: NodeSet,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        let meta = NodeMetadata::for_kind(kind);
        Self {
            id: NodeId::next(),
            kind,
            flags: meta.base_flags,
            type_flags: meta.base_type_flags,
            modifiers: ModifierFlags::empty(),
            parent: NodeIndex::NONE,
            name: None,
            origin: None,
            compile_options: CompileOptionsSet::default(),
            data: NodeData::Empty,
            children: std::iter::repeat_n(None, meta.child_container_properties.len()).collect(),
            references_to_this: NodeSet::new(),
        }
    }

    #[inline]
    pub fn metadata(&self) -> &'static NodeMetadata {
        NodeMetadata::for_kind(self.kind)
    }

    /// Kind name, e.g. `"ClassDeclaration"`.
    #[inline]
    pub fn kind_str(&self) -> &'static str {
        self.kind.as_str()
    }

    #[inline]
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    #[inline]
    pub fn is_named(&self) -> bool {
        self.flags.contains(NodeFlags::NAMED)
    }

    #[inline]
    pub fn is_declaration(&self) -> bool {
        self.flags.contains(NodeFlags::DECLARATION)
    }

    #[inline]
    pub fn is_definition(&self) -> bool {
        self.flags.contains(NodeFlags::DEFINITION)
    }

    /// Value of the child property `key`; `None` if the kind has no such
    /// property or it is unset.
    pub fn child(&self, key: &str) -> Option<&ChildValue> {
        let position = self.metadata().child_position(key)?;
        self.children.get(position)?.as_ref()
    }

    pub(crate) fn child_mut(&mut self, key: &str) -> Option<&mut Option<ChildValue>> {
        let position = self.metadata().child_position(key)?;
        self.children.get_mut(position)
    }

    /// Single-node child at `key`.
    #[inline]
    pub fn child_node(&self, key: &str) -> Option<NodeIndex> {
        self.child(key).and_then(ChildValue::as_node)
    }

    #[inline]
    pub fn child_set(&self, key: &str) -> Option<&NodeSet> {
        self.child(key).and_then(ChildValue::as_set)
    }

    #[inline]
    pub fn child_map(&self, key: &str) -> Option<&NodeMap> {
        self.child(key).and_then(ChildValue::as_map)
    }

    /// Set child properties paired with their keys, in declaration order.
    pub fn child_entries(&self) -> impl Iterator<Item = (&'static str, &ChildValue)> {
        self.metadata()
            .child_container_properties
            .iter()
            .zip(self.children.iter())
            .filter_map(|(prop, value)| value.as_ref().map(|v| (prop.key, v)))
    }

    /// References currently pointing at this node.
    #[inline]
    pub fn references_to_this(&self) -> &NodeSet {
        &self.references_to_this
    }
}
