//! Error type for node graph operations.
//!
//! Lookups that simply find nothing return `Option::None`; `AstError` is
//! reserved for broken structure and misuse of handles.

use crate::kinds::NodeKind;
use crate::node::NodeIndex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// A parent walk revisited a node.
    #[error("circular parent chain detected at node {node}")]
    CircularParentChain { node: NodeIndex },

    /// The handle points at a slot whose node was deleted.
    #[error("node {index} has been deleted")]
    DeletedNode { index: NodeIndex },

    /// The handle is `NONE` or outside the arena.
    #[error("invalid node index {index}")]
    InvalidIndex { index: NodeIndex },

    #[error("node {index} is a {found}, expected {expected}")]
    KindMismatch {
        index: NodeIndex,
        expected: &'static str,
        found: NodeKind,
    },

    #[error("{kind} has no child property `{key}`")]
    UnknownChildProperty { kind: NodeKind, key: String },

    /// NodeMap properties are keyed by the member's name.
    #[error("{kind}.{key} is keyed by name, but node {node} has none")]
    UnnamedMapMember {
        kind: NodeKind,
        key: &'static str,
        node: NodeIndex,
    },

    #[error("{kind}.{key} was given two nodes named `{name}`")]
    DuplicateMapMember {
        kind: NodeKind,
        key: &'static str,
        name: String,
    },

    #[error("node {replacement} is an ancestor of {node} and cannot replace it")]
    ReplaceWithAncestor {
        node: NodeIndex,
        replacement: NodeIndex,
    },

    /// A recursive child walk went deeper than `MAX_TREE_DEPTH`.
    #[error("tree depth limit exceeded at node {node}")]
    DepthExceeded { node: NodeIndex },
}

pub type AstResult<T> = Result<T, AstError>;
