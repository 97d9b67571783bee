//! Errors raised while dispatching to language parsers and compilers.

use crosstype_ast::AstError;
use crosstype_common::HostError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("language `{0}` is not active")]
    InactiveLanguage(String),

    #[error("no compiler registered for `{0}`")]
    NoCompiler(String),

    #[error("no parser registered for `{0}`")]
    NoParser(String),

    #[error(transparent)]
    Ast(#[from] AstError),

    #[error(transparent)]
    Host(#[from] HostError),

    /// Reported by a language implementation.
    #[error("{language}: {message}")]
    Failed { language: String, message: String },
}

impl CompileError {
    pub fn failed(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            language: language.into(),
            message: message.into(),
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
