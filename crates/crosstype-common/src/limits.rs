//! Centralized limits and thresholds for the node graph.
//!
//! Shared constants for traversal depth and pre-allocation sizes used by the
//! arena and the tree algorithms built on top of it.
//!
//! # Categories
//!
//! - **Recursion Depths**: Limits for recursive walks over the child structure
//! - **Capacity Limits**: Pre-allocation sizes for arenas and working maps

// =============================================================================
// Recursion Depth Limits
// =============================================================================
// Parent walks are cycle-checked and iterative. Child walks recurse, so they
// are bounded by tree depth and cut off here.

/// Maximum depth for recursive child walks (`get_children(deep)`, `fixup`,
/// recursive `delete`).
///
/// A well-formed tree produced by a parser rarely exceeds a few dozen levels.
/// Deeper structures are almost always the result of a broken child link, so
/// the walk fails with `AstError::DepthExceeded` instead of overflowing the
/// stack.
///
/// # Example
///
/// ```text
/// Definition
///   InterfaceDeclaration
///     PropertyDeclaration
///       Object
///         PropertyDeclaration
///           ... 1000 levels ...
/// ```
pub const MAX_TREE_DEPTH: u32 = 1_000;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Number of node slots reserved by `NodeArena::new`.
pub const DEFAULT_ARENA_CAPACITY: usize = 256;

/// Maximum pre-allocation to avoid capacity overflow for huge inputs.
///
/// Parsers size the arena from source length heuristics; the requested
/// capacity is clamped to this value.
pub const MAX_NODE_PREALLOC: usize = 5_000_000;

/// Initial capacity of the original-to-clone map used by `clone_node`.
pub const CLONE_MAP_INITIAL_CAPACITY: usize = 32;
