//! Language plumbing for the CrossType node graph.
//!
//! - **Language table**: built-in languages by short and full name
//! - **Contracts**: the `Parser` and `Compiler` traits language packages implement
//! - **Registry**: dispatch of parse/compile calls with per-language option merging
//! - **Matcher**: priority-ordered predicate dispatch used by compilers

pub mod compiler;
pub mod errors;
pub mod language;
pub mod matcher;
pub mod parser;
pub mod registry;

pub use compiler::Compiler;
pub use errors::{CompileError, CompileResult};
pub use language::{BUILTIN_LANGUAGES, LanguageInfo, TypeScriptSpecificKind, find_builtin};
pub use matcher::Matcher;
pub use parser::Parser;
pub use registry::LanguageRegistry;
