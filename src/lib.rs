//! CrossType: a language-agnostic graph of type and declaration nodes.
//!
//! - [`ast`]: the node arena, factories, tree maintenance and reference resolution
//! - [`languages`]: language table, parser/compiler contracts, registry and matcher
//! - [`common`]: limits, option sets, origin tags and the file `Host`
//!
//! ```text
//! let mut arena = NodeArena::new();
//! let x = arena.create_property_declaration("x", number, NodeInit::new())?;
//! let point = arena.create_class_declaration("Point", [x], NodeInit::new())?;
//! let definition = arena.create_definition("Point", [point], NodeInit::new())?;
//! let text = registry.compile(&arena, definition, "ts", None)?;
//! ```

pub use crosstype_ast as ast;
pub use crosstype_common as common;
pub use crosstype_core as languages;

pub mod tracing_config;

pub use crosstype_ast::{
    AstError, AstResult, ChildValue, Node, NodeArena, NodeIndex, NodeInit, NodeIterable,
    NodeKind, NodeMap, NodeSet,
};
pub use crosstype_common::{CompileOptionsSet, FileSystemHost, Host, MemoryHost, ParseOptionsSet};
pub use crosstype_core::{
    CompileError, CompileResult, Compiler, LanguageInfo, LanguageRegistry, Matcher, Parser,
};
