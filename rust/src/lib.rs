//! Adaptive compressed trie map with a dict-like API.
//!
//! [`TrieMap`] stores byte-string keys in lexicographic order with path
//! compression: shared prefixes are stored once, and each branching node
//! adapts its child table to its population, from small sorted arrays up
//! to a direct-indexed 256-slot table. On top of the usual ordered-map
//! operations it supports bidirectional cursors, range queries with an
//! optional match-part mode, and prefix-of-key iteration.
//!
//! ```
//! use triemap::TrieMap;
//!
//! let mut map: TrieMap<u32> = TrieMap::new();
//! map.insert(b"rose", 1);
//! map.insert(b"rosemary", 2);
//! map.insert(b"rust", 3);
//!
//! // Ordered iteration
//! let keys: Vec<_> = map.keys().collect();
//! assert_eq!(keys, vec![b"rose".to_vec(), b"rosemary".to_vec(), b"rust".to_vec()]);
//!
//! // Every stored key that is a prefix of a query
//! let hits: Vec<_> = map.prefix_items(b"rosemary oil").map(|(k, _)| k).collect();
//! assert_eq!(hits, vec![b"rose".to_vec(), b"rosemary".to_vec()]);
//!
//! // Subtree counting
//! assert_eq!(map.count(b"ros", true), 2);
//! ```

mod arena;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
pub mod policy;
mod prefix_iteration;
mod range_queries;
mod types;
mod validation;

pub use arena::{Arena, ArenaStats};
pub use error::{KeyResult, TrieError, TrieResult};
pub use iteration::{Cursor, Items, ItemsRev, Keys, Values};
pub use policy::{Fast, Medium, SizePolicy, Small};
pub use prefix_iteration::{PrefixItems, PrefixItemsRev};
pub use range_queries::RangeItems;
pub use types::{NodeId, NodeRef, Position, TrieMap, NULL_NODE};
