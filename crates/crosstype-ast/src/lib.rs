//! CrossType node graph engine.
//!
//! A language-agnostic tree of type and declaration nodes, stored in a
//! generational arena:
//!
//! - **Metadata table**: per-kind child properties and base flags drive every
//!   generic tree walk
//! - **Typed containers**: `NodeSet` (unique by identity) and `NodeMap`
//!   (unique by name)
//! - **Tree maintenance**: parent links, cleanup, delete and replace keep the
//!   ownership and back-reference invariants
//! - **References**: cached targets with back-reference sets, re-resolved by
//!   name path when their target goes away
//! - **Clone**: deep copy with internal references rewired to the copy
pub mod arena;
mod clone;
mod computed;
pub mod containers;
pub mod errors;
mod factories;
pub mod flags;
pub mod kinds;
pub mod metadata;
mod mutation;
pub mod navigation;
pub mod node;
pub mod origin;
mod reference;
pub mod resolution;
pub mod typeguards;

pub use arena::NodeArena;
pub use containers::{NodeIterable, NodeMap, NodeSet};
pub use errors::{AstError, AstResult};
pub use factories::{ChildInit, NodeInit};
pub use flags::{DefinitionFlags, LinkedListFlags, ModifierFlags, NodeFlags, TypeFlags};
pub use kinds::{DecimalKind, NodeKind, OrderKind, SignatureKind};
pub use metadata::{ChildProperty, ChildShape, NodeMetadata, keys};
pub use mutation::ReferenceReplacer;
pub use navigation::NameMatch;
pub use node::{
    ChildValue, DefinitionData, IterableData, Length, ModuleData, Node, NodeData, NodeId,
    NodeIndex, NumberRange, ReferenceData, SignatureData,
};
pub use origin::{NodeOrigin, OutputFile, SourceFileInfo};
pub use resolution::{DEFAULT_DECLARATION_PRIORITY, DeclarationPredicate};
