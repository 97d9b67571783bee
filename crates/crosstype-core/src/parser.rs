//! Parser contract implemented by language packages.

use crate::errors::CompileResult;
use crosstype_ast::{NodeArena, NodeData, NodeIndex, NodeKind};
use crosstype_common::{Host, OptionsBase};
use std::path::PathBuf;
use tracing::debug;

/// Turns source text of one language into nodes of the graph.
pub trait Parser {
    /// Parse `source_text` into `arena`, returning the root it created
    /// (normally a `SourceFile`).
    fn parse_source(
        &self,
        arena: &mut NodeArena,
        source_text: &str,
        options: &OptionsBase,
    ) -> CompileResult<NodeIndex>;

    /// Read each file through `host` and parse it. A returned `SourceFile`
    /// without a file name is given the path it was read from.
    fn parse_files(
        &self,
        arena: &mut NodeArena,
        host: &dyn Host,
        file_names: &[PathBuf],
        options: &OptionsBase,
    ) -> CompileResult<Vec<NodeIndex>> {
        let mut roots = Vec::with_capacity(file_names.len());
        for (path, text) in host.read_files(file_names)? {
            let root = self.parse_source(arena, &text, options)?;
            name_source_file(arena, root, &path.to_string_lossy())?;
            debug!(path = %path.display(), root = %root, "parsed file");
            roots.push(root);
        }
        Ok(roots)
    }
}

fn name_source_file(arena: &mut NodeArena, root: NodeIndex, file_name: &str) -> CompileResult<()> {
    let node = arena.node(root)?;
    if node.kind != NodeKind::SourceFile {
        return Ok(());
    }
    let unnamed = matches!(&node.data, NodeData::Module(module) if module.file_name.is_none());
    if unnamed {
        arena.update_properties(root, |node| {
            if let NodeData::Module(module) = &mut node.data {
                module.file_name = Some(file_name.to_string());
            }
            node.name = Some(file_name.to_string());
        })?;
    }
    Ok(())
}
