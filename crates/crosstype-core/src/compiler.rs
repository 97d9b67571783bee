//! Compiler contract implemented by language packages.

use crate::errors::CompileResult;
use crosstype_ast::{NodeArena, NodeIndex};
use crosstype_common::OptionsBase;

/// Renders a node (and everything below it) as source text of one language.
pub trait Compiler {
    /// `options` are already merged for this language: the node's own compile
    /// options overridden by whatever the caller passed.
    fn compile_node(
        &self,
        arena: &NodeArena,
        node: NodeIndex,
        options: &OptionsBase,
    ) -> CompileResult<String>;

    /// Extension used when emitting a Definition to an output file without one.
    fn file_extension(&self) -> Option<&str> {
        None
    }
}
