//! Parse -> graph -> compile -> emit through the registry, with a toy
//! alias language: each line is `Name = member | member ...`.

use anyhow::Result;
use crosstype_ast::{
    ModuleData, Node, NodeArena, NodeData, NodeIndex, NodeInit, NodeIterable, NodeKind, keys,
    typeguards,
};
use crosstype_common::{Host, MemoryHost, OptionsBase, ParseOptionsSet};
use crosstype_core::{CompileError, CompileResult, Compiler, LanguageRegistry, Matcher, Parser};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::{Path, PathBuf};

struct AliasParser;

impl AliasParser {
    fn member(arena: &mut NodeArena, text: &str, options: &OptionsBase) -> CompileResult<NodeIndex> {
        let init = NodeInit::new();
        Ok(match text {
            "string" => arena.create_string(init)?,
            "number" => arena.create_decimal_number(init)?,
            "boolean" => arena.create_boolean(init)?,
            "null" => arena.create_null(init)?,
            _ if options.get("strict") == Some(&Value::Bool(true)) => {
                return Err(CompileError::failed("ts", format!("unknown type `{text}`")));
            }
            _ => arena.create_anything(init)?,
        })
    }
}

impl Parser for AliasParser {
    fn parse_source(
        &self,
        arena: &mut NodeArena,
        source_text: &str,
        options: &OptionsBase,
    ) -> CompileResult<NodeIndex> {
        let mut definitions = Vec::new();
        for line in source_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (name, body) = line
                .split_once('=')
                .ok_or_else(|| CompileError::failed("ts", format!("expected `=` in `{line}`")))?;
            let name = name.trim();
            let mut members = Vec::new();
            for part in body.split('|') {
                members.push(Self::member(arena, part.trim(), options)?);
            }
            let value = if members.len() == 1 {
                members[0]
            } else {
                arena.create_union(members, NodeInit::new())?
            };
            let declaration = arena.create_type_declaration(name, value, NodeInit::new())?;
            definitions.push(arena.create_definition(name, [declaration], NodeInit::new())?);
        }

        let init = NodeInit::new()
            .data(NodeData::Module(ModuleData {
                exported: false,
                language: Some("ts".to_string()),
                file_name: None,
            }))
            .map(keys::DEFINITIONS, definitions);
        Ok(arena.create_node(NodeKind::SourceFile, init)?)
    }
}

static TYPE_TEXT: Lazy<Matcher<Node, String, NodeArena>> = Lazy::new(|| {
    Matcher::<Node, String, NodeArena>::new()
        .on_kind(NodeKind::String, |_, _| "string".to_string())
        .on(typeguards::is_numeric, |_, _| "number".to_string())
        .on_kind(NodeKind::Boolean, |_, _| "boolean".to_string())
        .on_kind(NodeKind::Null, |_, _| "null".to_string())
        .on_kind(NodeKind::Union, |node, arena| {
            node.child_set(keys::MEMBERS)
                .map(|members| {
                    members
                        .iter()
                        .map(|member| type_text(arena, member))
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .unwrap_or_default()
        })
        .otherwise(|_, _| "any".to_string())
});

fn type_text(arena: &NodeArena, idx: NodeIndex) -> String {
    arena
        .get(idx)
        .and_then(|node| TYPE_TEXT.run(node, arena))
        .unwrap_or_default()
}

struct AliasCompiler;

impl AliasCompiler {
    fn definition(&self, arena: &NodeArena, definition: NodeIndex, semi: &str) -> CompileResult<String> {
        let mut lines = Vec::new();
        for declaration in arena.declarations(definition)? {
            let node = arena.node(declaration)?;
            let name = node.name.as_deref().unwrap_or_default();
            let value = node.child_node(keys::VALUE).unwrap_or(NodeIndex::NONE);
            lines.push(format!("export type {name} = {}{semi}", type_text(arena, value)));
        }
        Ok(lines.join("\n"))
    }
}

impl Compiler for AliasCompiler {
    fn compile_node(
        &self,
        arena: &NodeArena,
        node: NodeIndex,
        options: &OptionsBase,
    ) -> CompileResult<String> {
        let semi = match options.get("semi") {
            Some(Value::Bool(false)) => "",
            _ => ";",
        };
        let record = arena.node(node)?;
        match record.kind {
            NodeKind::Definition => self.definition(arena, node, semi),
            NodeKind::SourceFile => {
                let mut out = Vec::new();
                if let Some(definitions) = record.child_map(keys::DEFINITIONS) {
                    for definition in definitions.to_vec() {
                        out.push(self.definition(arena, definition, semi)?);
                    }
                }
                Ok(out.join("\n"))
            }
            _ => Ok(type_text(arena, node)),
        }
    }

    fn file_extension(&self) -> Option<&str> {
        Some("ts")
    }
}

fn registry() -> Result<LanguageRegistry> {
    let mut registry = LanguageRegistry::new();
    registry.set_parser("ts", AliasParser)?;
    registry.set_compiler("ts", AliasCompiler)?;
    Ok(registry)
}

#[test]
fn test_parse_files_names_source_files() -> Result<()> {
    let host = MemoryHost::new()
        .with_file("ids.alias", "Id = string\nMaybeId = string | null\n")
        .with_file("flags.alias", "Flag = boolean");
    let files = [PathBuf::from("ids.alias"), PathBuf::from("flags.alias")];
    let mut arena = NodeArena::new();

    let roots = registry()?.parse_files(&mut arena, "typescript", &host, &files, None)?;

    assert_eq!(roots.len(), 2);
    assert_eq!(arena.node(roots[0])?.name.as_deref(), Some("ids.alias"));
    assert_eq!(arena.node(roots[1])?.name.as_deref(), Some("flags.alias"));
    let definitions = arena.node(roots[0])?.child_map(keys::DEFINITIONS).cloned();
    assert_eq!(
        definitions.map(|d| d.keys().map(str::to_owned).collect::<Vec<_>>()),
        Some(vec!["Id".to_string(), "MaybeId".to_string()])
    );
    Ok(())
}

#[test]
fn test_compile_source_file_through_matcher() -> Result<()> {
    let mut arena = NodeArena::new();
    let registry = registry()?;
    let root = registry.parse_source(
        &mut arena,
        "ts",
        "Id = string\nCount = number | null\nBlob = bytes",
        None,
    )?;

    let text = registry.compile(&arena, root, "ts", None)?;
    assert_eq!(
        text,
        "export type Id = string;\nexport type Count = number | null;\nexport type Blob = any;"
    );
    Ok(())
}

#[test]
fn test_parse_options_reach_the_parser() -> Result<()> {
    let mut arena = NodeArena::new();
    let strict = ParseOptionsSet::from_json(r#"{ "ts": { "strict": true } }"#)?;
    let err = registry()?
        .parse_source(&mut arena, "ts", "Blob = bytes", Some(&strict))
        .unwrap_err();
    assert!(matches!(err, CompileError::Failed { ref language, .. } if language == "ts"));
    assert_eq!(err.to_string(), "ts: unknown type `bytes`");
    Ok(())
}

#[test]
fn test_missing_file_is_a_host_error() -> Result<()> {
    let mut arena = NodeArena::new();
    let err = registry()?
        .parse_files(&mut arena, "ts", &MemoryHost::new(), &[PathBuf::from("nope")], None)
        .unwrap_err();
    assert!(matches!(err, CompileError::Host(_)));
    Ok(())
}

#[test]
fn test_emit_after_edit() -> Result<()> {
    let mut arena = NodeArena::new();
    let registry = registry()?;
    let root = registry.parse_source(&mut arena, "ts", "Id = string", None)?;
    let definition = arena
        .node(root)?
        .child_map(keys::DEFINITIONS)
        .and_then(|d| d.get("Id"))
        .unwrap_or(NodeIndex::NONE);

    arena.update_properties(definition, |node| {
        if let NodeData::Definition(data) = &mut node.data {
            data.outputs.push(crosstype_ast::OutputFile {
                file_name: "gen/id".to_string(),
                language: "ts".to_string(),
                compile_options: None,
            });
        }
    })?;
    let declaration = arena.declarations(definition)?[0];
    let old_value = arena.node(declaration)?.child_node(keys::VALUE).unwrap_or(NodeIndex::NONE);
    let number = arena.create_integer(NodeInit::new())?;
    arena.replace(old_value, number, None, false)?;

    let mut host = MemoryHost::new();
    let mut options = crosstype_common::CompileOptionsSet::new();
    options.set("ts", "semi", Value::Bool(false));
    let written = registry.emit_definition(&arena, definition, &mut host, Some(&options))?;

    assert_eq!(written, vec![PathBuf::from("gen/id.ts")]);
    assert!(host.file_exists(Path::new("gen/id.ts")));
    assert_eq!(host.file(Path::new("gen/id.ts")), Some("export type Id = number"));
    Ok(())
}
