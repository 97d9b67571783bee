//! Built-in language table.

use std::fmt;

/// Static description of a language package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageInfo {
    /// Key used for options and origins (`"ts"`).
    pub short_name: &'static str,
    pub full_name: &'static str,
    pub package_name: &'static str,
    /// Inactive languages are known by name but cannot be parsed or compiled.
    pub active: bool,
    pub code: u16,
}

impl LanguageInfo {
    /// True if `name` is this language's short or full name (ASCII case-insensitive).
    pub fn is_named(&self, name: &str) -> bool {
        self.short_name.eq_ignore_ascii_case(name) || self.full_name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for LanguageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name)
    }
}

pub const TYPESCRIPT: LanguageInfo = LanguageInfo {
    short_name: "ts",
    full_name: "typescript",
    package_name: "ctl-typescript",
    active: true,
    code: 1,
};

pub const JSON_SCHEMA: LanguageInfo = LanguageInfo {
    short_name: "json-schema",
    full_name: "jsonschema",
    package_name: "ctl-json-schema",
    active: true,
    code: 2,
};

pub const PYTHON: LanguageInfo = LanguageInfo {
    short_name: "python",
    full_name: "python",
    package_name: "ctl-python",
    active: false,
    code: 3,
};

pub const BUILTIN_LANGUAGES: &[LanguageInfo] = &[TYPESCRIPT, JSON_SCHEMA, PYTHON];

/// Look up a built-in language by short or full name.
pub fn find_builtin(name: &str) -> Option<&'static LanguageInfo> {
    BUILTIN_LANGUAGES.iter().find(|info| info.is_named(name))
}

/// TypeScript intrinsics that share one CrossType kind. Stored in
/// `NodeOrigin::specific_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TypeScriptSpecificKind {
    Any = 1,
    Unknown = 2,
    Undefined = 3,
    Null = 4,
    ArrowFunction = 5,
    Function = 6,
}

impl TypeScriptSpecificKind {
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            1 => Self::Any,
            2 => Self::Unknown,
            3 => Self::Undefined,
            4 => Self::Null,
            5 => Self::ArrowFunction,
            6 => Self::Function,
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../tests/language_tests.rs"]
mod language_tests;
