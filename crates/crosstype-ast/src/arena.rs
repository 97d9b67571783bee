//! Generational node storage.
//!
//! Every node lives in a slot of a `NodeArena` and is addressed by a
//! [`NodeIndex`] (slot + generation). Deleting a node tombstones its slot and
//! advances the slot generation, so stale handles are detected on access
//! instead of silently reading a recycled node.
//!
//! Navigation, mutation, reference bookkeeping and resolution are all
//! implemented as further `impl NodeArena` blocks in their own modules.

use crate::errors::{AstError, AstResult};
use crate::kinds::NodeKind;
use crate::node::{Node, NodeData, NodeIndex};
use crosstype_common::limits::{DEFAULT_ARENA_CAPACITY, MAX_NODE_PREALLOC};

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owner of all nodes of one graph.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::with_capacity(DEFAULT_ARENA_CAPACITY)
    }

    /// Create an arena with room for `capacity` nodes, clamped to
    /// `MAX_NODE_PREALLOC`.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            slots: Vec::with_capacity(capacity.min(MAX_NODE_PREALLOC)),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    // =========================================================================
    // Access
    // =========================================================================

    #[inline]
    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        let slot = self.slots.get(idx.slot() as usize)?;
        if slot.generation != idx.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut Node> {
        let slot = self.slots.get_mut(idx.slot() as usize)?;
        if slot.generation != idx.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    /// Like [`get`](Self::get), but distinguishes a deleted node from a bad
    /// handle.
    pub fn node(&self, idx: NodeIndex) -> AstResult<&Node> {
        if let Some(node) = self.get(idx) {
            return Ok(node);
        }
        Err(self.access_error(idx))
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> AstResult<&mut Node> {
        if self.get(idx).is_none() {
            return Err(self.access_error(idx));
        }
        self.get_mut(idx).ok_or(AstError::InvalidIndex { index: idx })
    }

    fn access_error(&self, idx: NodeIndex) -> AstError {
        if idx.is_none() || idx.slot() as usize >= self.slots.len() {
            AstError::InvalidIndex { index: idx }
        } else {
            AstError::DeletedNode { index: idx }
        }
    }

    /// Node at `idx`, checked to be of `kind`.
    pub fn node_of_kind(&self, idx: NodeIndex, kind: NodeKind) -> AstResult<&Node> {
        let node = self.node(idx)?;
        if node.kind != kind {
            return Err(AstError::KindMismatch {
                index: idx,
                expected: kind.as_str(),
                found: node.kind,
            });
        }
        Ok(node)
    }

    /// True if `idx` refers to a node that has not been deleted.
    #[inline]
    pub fn is_live(&self, idx: NodeIndex) -> bool {
        self.get(idx).is_some()
    }

    #[inline]
    pub fn kind_of(&self, idx: NodeIndex) -> Option<NodeKind> {
        self.get(idx).map(|n| n.kind)
    }

    #[inline]
    pub fn parent_of(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.get(idx).and_then(|n| n.parent.into_option())
    }

    /// Name a node is keyed by in a `NodeMap`.
    ///
    /// A TypeArgument has no name of its own; it is known by the name of the
    /// TypeParameter it is associated with.
    pub fn name_of(&self, idx: NodeIndex) -> Option<&str> {
        let node = self.get(idx)?;
        match &node.data {
            NodeData::TypeArgument { association } if node.kind == NodeKind::TypeArgument => {
                self.get(*association)?.name.as_deref()
            }
            _ => node.name.as_deref(),
        }
    }

    // =========================================================================
    // Slot management
    // =========================================================================

    pub(crate) fn alloc(&mut self, node: Node) -> NodeIndex {
        self.live += 1;
        if let Some(slot_index) = self.free.pop() {
            let slot = &mut self.slots[slot_index as usize];
            slot.node = Some(node);
            return NodeIndex::new(slot_index, slot.generation);
        }
        let slot_index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeIndex::new(slot_index, 0)
    }

    /// Remove the node at `idx` and retire the handle. Returns the record.
    pub(crate) fn tombstone(&mut self, idx: NodeIndex) -> Option<Node> {
        let slot = self.slots.get_mut(idx.slot() as usize)?;
        if slot.generation != idx.generation() {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx.slot());
        self.live -= 1;
        Some(node)
    }

    /// Overwrite the record of the live node at `idx`, keeping the handle.
    pub(crate) fn put(&mut self, idx: NodeIndex, node: Node) -> AstResult<()> {
        *self.node_mut(idx)? = node;
        Ok(())
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.node
                .as_ref()
                .map(|node| (NodeIndex::new(i as u32, slot.generation), node))
        })
    }

    /// Live nodes without a parent.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod arena_tests;
