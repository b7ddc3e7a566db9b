//! Core types and data structures for TrieMap.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the trie implementation.

use crate::arena::Arena;
use crate::policy::{Medium, SizePolicy};
use smallvec::SmallVec;
use std::marker::PhantomData;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation.
pub type NodeId = u32;

/// Sentinel ID meaning "no node" (absent root, absent parent).
pub const NULL_NODE: NodeId = u32::MAX;

/// Slot referring to the value stored at a node itself rather than in its
/// child table.
pub(crate) const VALUE_SLOT: usize = usize::MAX;

/// One-past-the-last slot; signals exhaustion to the navigation API.
pub(crate) const END_SLOT: usize = usize::MAX - 1;

/// Edge-label storage. Labels are usually short, so short ones live inline
/// and only long ones spill to the heap.
pub(crate) type Label = SmallVec<[u8; 14]>;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// An ordered map from byte-string keys to values, backed by an adaptive
/// compressed trie.
///
/// Keys are arbitrary byte strings. Common prefixes are stored once (path
/// compression), branches are selected by a single byte, and each branch
/// table adapts its capacity to its population: sparse branches use a small
/// sorted table, dense branches a 256-entry direct-indexed one. The policy
/// parameter `P` picks the capacity tiers; see [`crate::policy`].
///
/// Iteration visits keys in lexicographic byte order. In addition to the
/// usual ordered-map queries, the map answers *prefix-of-key* queries:
/// every stored key that is a prefix of a query string.
///
/// # Type Parameters
///
/// * `V` - Value type
/// * `P` - Size policy controlling branch-table capacity tiers
///
/// # Examples
///
/// ```
/// use triemap::TrieMap;
///
/// let mut map: TrieMap<i32> = TrieMap::new();
/// map.insert(b"foo", 1);
/// map.insert(b"foobar", 2);
///
/// assert_eq!(map.get(b"foo"), Some(&1));
/// assert_eq!(map.len(), 2);
///
/// let prefixes: Vec<_> = map.prefix_items(b"foobark").map(|(k, _)| k).collect();
/// assert_eq!(prefixes, vec![b"foo".to_vec(), b"foobar".to_vec()]);
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion / lookup / deletion**: O(k) where k is the key length
/// - **Iteration**: O(n), keys reconstructed on demand in O(depth)
/// - **Prefix queries**: O(|query|) to enumerate all matching prefixes
#[derive(Debug)]
pub struct TrieMap<V, P: SizePolicy = Medium> {
    /// Root interior node, or `NULL_NODE` when the map is empty.
    pub(crate) root: NodeId,
    /// Number of stored entries (nodes holding a value).
    pub(crate) size: usize,
    /// Arena storage for leaf nodes.
    pub(crate) leaves: Arena<LeafNode<V>>,
    /// Arena storage for interior nodes.
    pub(crate) interiors: Arena<InteriorNode<V>>,
    pub(crate) _policy: PhantomData<P>,
}

/// Terminal node: the unique suffix of a stored key plus its value.
///
/// Leaves are reachable only through their parent's child table and carry
/// no parent link.
#[derive(Debug, Clone)]
pub struct LeafNode<V> {
    /// Edge-label suffix between the parent's branching byte and the key end.
    pub(crate) label: Label,
    /// The stored value.
    pub(crate) value: V,
}

/// Branching node: an edge label, an optional value terminating at this
/// node, and a child table keyed by branching byte.
#[derive(Debug, Clone)]
pub struct InteriorNode<V> {
    /// Edge-label fragment shared by every key passing through this node.
    pub(crate) label: Label,
    /// Owning parent, or `NULL_NODE` for the root.
    pub(crate) parent: NodeId,
    /// The byte under which the parent's child table reaches this node.
    /// Meaningless for the root.
    pub(crate) parent_byte: u8,
    /// Value stored when a key ends exactly at this node.
    pub(crate) value: Option<V>,
    /// The branch table.
    pub(crate) table: ChildTable,
}

/// Child table of an interior node.
///
/// The compressed form keeps parallel arrays sorted by branching byte with
/// a capacity drawn from the size policy's tiers; the full form is indexed
/// directly by the branching byte.
#[derive(Debug, Clone)]
pub enum ChildTable {
    Compressed {
        /// Current capacity tier.
        capacity: u16,
        /// Branching bytes, ascending.
        bytes: Vec<u8>,
        /// Children parallel to `bytes`.
        children: Vec<NodeRef>,
    },
    Full {
        /// Occupied slot count.
        len: u16,
        /// One slot per possible branching byte.
        slots: Box<[Option<NodeRef>; 256]>,
    },
}

// ============================================================================
// HANDLES AND POSITIONS
// ============================================================================

/// Node reference that can be either a leaf or an interior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Leaf(NodeId),
    Interior(NodeId),
}

impl NodeRef {
    /// Return the raw node ID.
    pub fn id(&self) -> NodeId {
        match *self {
            NodeRef::Leaf(id) => id,
            NodeRef::Interior(id) => id,
        }
    }

    /// Returns true if this reference points to a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_))
    }
}

/// A raw entry position: an interior node plus a slot within it.
///
/// Positions are cheap to copy and carry no borrow; they are produced by
/// [`Cursor::position`](crate::Cursor::position) and consumed by
/// [`TrieMap::erase_at`] and [`TrieMap::cursor_at`]. Any mutation of the
/// map invalidates previously obtained positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub(crate) node: NodeId,
    pub(crate) slot: usize,
}

impl Position {
    /// The one-past-the-last position.
    pub const END: Position = Position {
        node: NULL_NODE,
        slot: END_SLOT,
    };

    /// Returns true if this is the end position.
    pub fn is_end(&self) -> bool {
        self.node == NULL_NODE
    }

    pub(crate) fn new(node: NodeId, slot: usize) -> Self {
        Position { node, slot }
    }
}

// ============================================================================
// LOOKUP RESULTS
// ============================================================================

/// Result of descending the trie with a search key: the closest node, the
/// slot within it, and how that position's key compares to the search key.
///
/// `cmp` values:
/// * `< 0` - the position's key is lexically before the search key
/// * `0`   - exact match
/// * `1`   - one key is a strict prefix of the other (a partial match)
/// * `2`   - the position's key is lexically after the search key
#[derive(Debug, Clone, Copy)]
pub(crate) struct FindResult {
    pub(crate) node: NodeId,
    pub(crate) slot: usize,
    pub(crate) cmp: i32,
}
