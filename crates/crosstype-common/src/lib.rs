//! Common types and utilities for the CrossType node graph.
//!
//! This crate provides foundational types used across all crosstype crates:
//! - Limits and thresholds for tree walks and arena sizing
//! - Free-form origin tags (`TagMap`)
//! - Per-language option sets (`LanguageOptionsSet`)
//! - File access abstraction (`Host`)

// Centralized limits and thresholds
pub mod limits;

// Origin tags
pub mod tag_map;
pub use tag_map::TagMap;

// Per-language compile/parse options
pub mod options;
pub use options::{CompileOptionsSet, LanguageOptionsSet, OptionsBase, ParseOptionsSet};

// File access for parsers and compilers
pub mod host;
pub use host::{FileSystemHost, Host, HostError, HostResult, MemoryHost};
