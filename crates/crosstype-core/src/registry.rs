//! Language registry: names, parsers and compilers.
//!
//! The registry starts with the built-in language table. Language packages
//! register their [`Parser`] and [`Compiler`] against a short or full name;
//! `compile`/`parse_*` then resolve the language, merge options and dispatch.
//!
//! Option merging for a compile of `node` to language `L`:
//!
//! 1. the node's own `compile_options[L]`
//! 2. an output file's `compile_options[L]` (when emitting a Definition)
//! 3. the call-site `options[L]`
//!
//! Later layers override earlier ones key by key.

use crate::compiler::Compiler;
use crate::errors::{CompileError, CompileResult};
use crate::language::{BUILTIN_LANGUAGES, LanguageInfo};
use crate::parser::Parser;
use crosstype_ast::{AstError, NodeArena, NodeData, NodeIndex};
use crosstype_common::{CompileOptionsSet, Host, OptionsBase, ParseOptionsSet};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub struct LanguageRegistry {
    languages: Vec<LanguageInfo>,
    parsers: FxHashMap<&'static str, Box<dyn Parser>>,
    compilers: FxHashMap<&'static str, Box<dyn Compiler>>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parsers: Vec<_> = self.parsers.keys().collect();
        parsers.sort();
        let mut compilers: Vec<_> = self.compilers.keys().collect();
        compilers.sort();
        f.debug_struct("LanguageRegistry")
            .field("languages", &self.languages)
            .field("parsers", &parsers)
            .field("compilers", &compilers)
            .finish()
    }
}

impl LanguageRegistry {
    /// Registry holding the built-in languages, with no implementations yet.
    pub fn new() -> Self {
        Self {
            languages: BUILTIN_LANGUAGES.to_vec(),
            parsers: FxHashMap::default(),
            compilers: FxHashMap::default(),
        }
    }

    /// Registry with no languages at all.
    pub fn empty() -> Self {
        Self {
            languages: Vec::new(),
            parsers: FxHashMap::default(),
            compilers: FxHashMap::default(),
        }
    }

    // =========================================================================
    // Languages
    // =========================================================================

    /// Add a language, replacing any entry with the same short name.
    pub fn register_language(&mut self, info: LanguageInfo) {
        match self
            .languages
            .iter_mut()
            .find(|existing| existing.short_name == info.short_name)
        {
            Some(existing) => *existing = info,
            None => self.languages.push(info),
        }
        debug!(language = info.short_name, active = info.active, "registered language");
    }

    /// Find a language by short or full name, active or not.
    pub fn lookup(&self, name: &str) -> Option<&LanguageInfo> {
        self.languages.iter().find(|info| info.is_named(name))
    }

    /// Find an active language by short or full name.
    pub fn language(&self, name: &str) -> CompileResult<&LanguageInfo> {
        let info = self
            .lookup(name)
            .ok_or_else(|| CompileError::UnknownLanguage(name.to_string()))?;
        if !info.active {
            return Err(CompileError::InactiveLanguage(info.short_name.to_string()));
        }
        Ok(info)
    }

    pub fn languages(&self) -> &[LanguageInfo] {
        &self.languages
    }

    pub fn active_languages(&self) -> impl Iterator<Item = &LanguageInfo> {
        self.languages.iter().filter(|info| info.active)
    }

    // =========================================================================
    // Implementations
    // =========================================================================

    pub fn set_parser(&mut self, language: &str, parser: impl Parser + 'static) -> CompileResult<()> {
        let short_name = self.known_short_name(language)?;
        self.parsers.insert(short_name, Box::new(parser));
        Ok(())
    }

    pub fn set_compiler(
        &mut self,
        language: &str,
        compiler: impl Compiler + 'static,
    ) -> CompileResult<()> {
        let short_name = self.known_short_name(language)?;
        self.compilers.insert(short_name, Box::new(compiler));
        Ok(())
    }

    pub fn parser(&self, language: &str) -> Option<&dyn Parser> {
        let short_name = self.lookup(language)?.short_name;
        self.parsers.get(short_name).map(Box::as_ref)
    }

    pub fn compiler(&self, language: &str) -> Option<&dyn Compiler> {
        let short_name = self.lookup(language)?.short_name;
        self.compilers.get(short_name).map(Box::as_ref)
    }

    fn known_short_name(&self, language: &str) -> CompileResult<&'static str> {
        self.lookup(language)
            .map(|info| info.short_name)
            .ok_or_else(|| CompileError::UnknownLanguage(language.to_string()))
    }

    fn active_compiler(&self, language: &str) -> CompileResult<(&LanguageInfo, &dyn Compiler)> {
        let info = self.language(language)?;
        let compiler = self
            .compilers
            .get(info.short_name)
            .ok_or_else(|| CompileError::NoCompiler(info.short_name.to_string()))?;
        Ok((info, compiler.as_ref()))
    }

    fn active_parser(&self, language: &str) -> CompileResult<(&LanguageInfo, &dyn Parser)> {
        let info = self.language(language)?;
        let parser = self
            .parsers
            .get(info.short_name)
            .ok_or_else(|| CompileError::NoParser(info.short_name.to_string()))?;
        Ok((info, parser.as_ref()))
    }

    // =========================================================================
    // Compile
    // =========================================================================

    /// Compile `node` to a single language.
    #[tracing::instrument(level = "debug", skip(self, arena, options))]
    pub fn compile(
        &self,
        arena: &NodeArena,
        node: NodeIndex,
        language: &str,
        options: Option<&CompileOptionsSet>,
    ) -> CompileResult<String> {
        let (info, compiler) = self.active_compiler(language)?;
        let merged = merge_options(arena, node, info.short_name, None, options)?;
        trace!(language = info.short_name, keys = merged.len(), "compiling node");
        compiler.compile_node(arena, node, &merged)
    }

    /// Compile `node` to several languages, keyed by short name in request
    /// order. `None` selects every active language with a compiler.
    pub fn compile_to_languages(
        &self,
        arena: &NodeArena,
        node: NodeIndex,
        languages: Option<&[&str]>,
        options: Option<&CompileOptionsSet>,
    ) -> CompileResult<IndexMap<&'static str, String>> {
        let targets: Vec<&'static str> = match languages {
            Some(names) => names
                .iter()
                .map(|name| self.language(name).map(|info| info.short_name))
                .collect::<CompileResult<_>>()?,
            None => self
                .active_languages()
                .filter(|info| self.compilers.contains_key(info.short_name))
                .map(|info| info.short_name)
                .collect(),
        };

        let mut out = IndexMap::with_capacity(targets.len());
        for short_name in targets {
            let text = self.compile(arena, node, short_name, options)?;
            out.insert(short_name, text);
        }
        Ok(out)
    }

    /// Compile a Definition to each of its output files and write them
    /// through `host`. Returns the written paths in output order.
    #[tracing::instrument(level = "debug", skip(self, arena, host, options))]
    pub fn emit_definition(
        &self,
        arena: &NodeArena,
        definition: NodeIndex,
        host: &mut dyn Host,
        options: Option<&CompileOptionsSet>,
    ) -> CompileResult<Vec<PathBuf>> {
        let node = arena.node(definition)?;
        let NodeData::Definition(data) = &node.data else {
            return Err(AstError::KindMismatch {
                index: definition,
                expected: "Definition",
                found: node.kind,
            }
            .into());
        };

        let mut written = Vec::with_capacity(data.outputs.len());
        for output in &data.outputs {
            let (info, compiler) = self.active_compiler(&output.language)?;
            let output_options = output
                .compile_options
                .as_ref()
                .and_then(|set| set.get(info.short_name));
            let merged = merge_options(arena, definition, info.short_name, output_options, options)?;
            let text = compiler.compile_node(arena, definition, &merged)?;

            let path = output_path(&output.file_name, compiler.file_extension());
            host.write_file(&path, &text)?;
            debug!(path = %path.display(), language = info.short_name, "emitted definition");
            written.push(path);
        }
        Ok(written)
    }

    // =========================================================================
    // Parse
    // =========================================================================

    pub fn parse_source(
        &self,
        arena: &mut NodeArena,
        language: &str,
        source_text: &str,
        options: Option<&ParseOptionsSet>,
    ) -> CompileResult<NodeIndex> {
        let (info, parser) = self.active_parser(language)?;
        let options = parse_options(info, options);
        parser.parse_source(arena, source_text, &options)
    }

    pub fn parse_files(
        &self,
        arena: &mut NodeArena,
        language: &str,
        host: &dyn Host,
        file_names: &[PathBuf],
        options: Option<&ParseOptionsSet>,
    ) -> CompileResult<Vec<NodeIndex>> {
        let (info, parser) = self.active_parser(language)?;
        let options = parse_options(info, options);
        let roots = parser.parse_files(arena, host, file_names, &options)?;
        debug!(language = info.short_name, files = roots.len(), "parsed files");
        Ok(roots)
    }
}

/// Node options for `language`, then `output` overrides, then `call_site`.
fn merge_options(
    arena: &NodeArena,
    node: NodeIndex,
    language: &str,
    output: Option<&OptionsBase>,
    call_site: Option<&CompileOptionsSet>,
) -> CompileResult<OptionsBase> {
    let mut merged = arena.node(node)?.compile_options.resolve(language, output);
    if let Some(overrides) = call_site.and_then(|set| set.get(language)) {
        merged.extend(overrides.clone());
    }
    Ok(merged)
}

fn parse_options(info: &LanguageInfo, options: Option<&ParseOptionsSet>) -> OptionsBase {
    options
        .and_then(|set| set.get(info.short_name))
        .cloned()
        .unwrap_or_default()
}

fn output_path(file_name: &str, extension: Option<&str>) -> PathBuf {
    let path = Path::new(file_name);
    match extension {
        Some(ext) if path.extension().is_none() => path.with_extension(ext),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
