//! GET operations for TrieMap.
//!
//! Key lookup in its various forms: exact lookup, error-returning lookup,
//! partial-match lookup, and counting (including subtree counting in
//! match-part mode). The shared descent routine `find_raw` reports where a
//! search key lands relative to the stored keys; ordered queries in
//! `range_queries` build on the same result.

use crate::error::{KeyResult, TrieError};
use crate::iteration::Cursor;
use crate::types::{FindResult, NodeRef, Position, TrieMap};
use crate::policy::SizePolicy;
use crate::types::{END_SLOT, NULL_NODE, VALUE_SLOT};
use std::cmp::Ordering;

impl<V, P: SizePolicy> TrieMap<V, P> {
    /// Get a reference to the value associated with a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use triemap::TrieMap;
    ///
    /// let mut map: TrieMap<&str> = TrieMap::new();
    /// map.insert(b"one", "1");
    /// assert_eq!(map.get(b"one"), Some(&"1"));
    /// assert_eq!(map.get(b"two"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let found = self.find_raw(key)?;
        if found.cmp != 0 {
            return None;
        }
        self.value_at(Position::new(found.node, found.slot))
    }

    /// Get a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let found = self.find_raw(key)?;
        if found.cmp != 0 {
            return None;
        }
        self.value_at_mut(Position::new(found.node, found.slot))
    }

    /// Check if a key exists in the map.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Get the value for a key, returning an error if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use triemap::{TrieMap, TrieError};
    ///
    /// let mut map: TrieMap<i32> = TrieMap::new();
    /// map.insert(b"present", 1);
    /// assert_eq!(map.get_item(b"present").unwrap(), &1);
    /// assert_eq!(map.get_item(b"absent"), Err(TrieError::KeyNotFound));
    /// ```
    pub fn get_item(&self, key: &[u8]) -> KeyResult<&V> {
        self.get(key).ok_or(TrieError::KeyNotFound)
    }

    /// Locate `key` and return a cursor to the entry, or an end cursor when
    /// there is no match.
    ///
    /// With `match_part` a stored key counts as a hit when the search key
    /// is a prefix of it (or lands exactly on a valueless branching node);
    /// the cursor then points at the first such stored key.
    pub fn find(&self, key: &[u8], match_part: bool) -> Cursor<'_, V, P> {
        let pos = match self.find_raw(key) {
            Some(found) if found.cmp == 0 => Position::new(found.node, found.slot),
            Some(found) if match_part && found.cmp == 1 => {
                self.position_from(found.node, found.slot, false)
            }
            _ => Position::END,
        };
        self.cursor_at(pos)
    }

    /// Number of entries matching `key`: 0 or 1 exactly, or, with
    /// `match_part`, the number of stored keys extending `key` (inclusive).
    ///
    /// # Examples
    ///
    /// ```
    /// use triemap::TrieMap;
    ///
    /// let map: TrieMap<i32> = [("ab", 0), ("abc", 1), ("abd", 2)]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(map.count(b"abc", false), 1);
    /// assert_eq!(map.count(b"ab", true), 3);
    /// assert_eq!(map.count(b"a", true), 3);
    /// assert_eq!(map.count(b"a", false), 0);
    /// ```
    pub fn count(&self, key: &[u8], match_part: bool) -> usize {
        let found = match self.find_raw(key) {
            Some(found) => found,
            None => return 0,
        };
        if found.cmp == 0 || (match_part && found.cmp == 1) {
            if match_part && found.slot == VALUE_SLOT {
                self.subtree_value_count(NodeRef::Interior(found.node))
            } else {
                1
            }
        } else {
            0
        }
    }

    // ========================================================================
    // DESCENT
    // ========================================================================

    /// Descend with `key` without mutating, reporting the closest position
    /// and how it compares to the key (see [`FindResult`]).
    pub(crate) fn find_raw(&self, key: &[u8]) -> Option<FindResult> {
        if self.root == NULL_NODE {
            return None;
        }
        let mut node = self.root;
        let mut pos = 0usize;
        loop {
            let n = self.interior(node);
            let label = &n.label;
            if !label.is_empty() {
                let remaining = key.len() - pos;
                if remaining >= label.len() {
                    // The whole label must match or the search is decided here
                    match label[..].cmp(&key[pos..pos + label.len()]) {
                        Ordering::Greater => {
                            return Some(FindResult {
                                node,
                                slot: VALUE_SLOT,
                                cmp: 2,
                            })
                        }
                        Ordering::Less => {
                            return Some(FindResult {
                                node,
                                slot: END_SLOT,
                                cmp: -1,
                            })
                        }
                        Ordering::Equal => {}
                    }
                } else {
                    // The key ends inside this node's label; equality means
                    // the key is a strict prefix of this node's key.
                    let cmp = match label[..remaining].cmp(&key[pos..]) {
                        Ordering::Less => {
                            return Some(FindResult {
                                node,
                                slot: END_SLOT,
                                cmp: -1,
                            })
                        }
                        Ordering::Equal => 1,
                        Ordering::Greater => 2,
                    };
                    return Some(FindResult {
                        node,
                        slot: VALUE_SLOT,
                        cmp,
                    });
                }
                pos += label.len();
            }

            if pos == key.len() {
                // The key matches this node; exact when a value is here
                let cmp = i32::from(!n.has_value());
                return Some(FindResult {
                    node,
                    slot: VALUE_SLOT,
                    cmp,
                });
            }

            let (slot, found) = n.table.probe(key[pos]);
            if !found {
                return Some(if slot == END_SLOT {
                    // Every child is before the key's next byte
                    FindResult {
                        node,
                        slot: END_SLOT,
                        cmp: -1,
                    }
                } else {
                    FindResult { node, slot, cmp: 2 }
                });
            }

            pos += 1;
            match n.table.child(slot) {
                NodeRef::Interior(child) => node = child,
                NodeRef::Leaf(leaf_id) => {
                    let leaf = self.leaf(leaf_id);
                    let rest = &key[pos..];
                    let min = leaf.label.len().min(rest.len());
                    let cmp = match leaf.label[..min].cmp(&rest[..min]) {
                        Ordering::Less => -1,
                        Ordering::Greater => 2,
                        Ordering::Equal => match leaf.label.len().cmp(&rest.len()) {
                            Ordering::Less => -1,
                            Ordering::Equal => 0,
                            Ordering::Greater => 1,
                        },
                    };
                    return Some(FindResult { node, slot, cmp });
                }
            }
        }
    }

    /// Number of values stored in the subtree rooted at `node`, inclusive.
    pub(crate) fn subtree_value_count(&self, node: NodeRef) -> usize {
        match node {
            NodeRef::Leaf(_) => 1,
            NodeRef::Interior(id) => {
                let n = self.interior(id);
                let mut count = usize::from(n.has_value());
                for (_, child) in n.table.children() {
                    count += self.subtree_value_count(child);
                }
                count
            }
        }
    }

    // ========================================================================
    // POSITION DEREFERENCE
    // ========================================================================

    /// The value stored at an entry position, if any.
    pub(crate) fn value_at(&self, pos: Position) -> Option<&V> {
        if pos.is_end() {
            return None;
        }
        if pos.slot == VALUE_SLOT {
            self.interior(pos.node).value.as_ref()
        } else {
            match self.interior(pos.node).table.child(pos.slot) {
                NodeRef::Leaf(leaf_id) => Some(&self.leaf(leaf_id).value),
                NodeRef::Interior(_) => None,
            }
        }
    }

    /// Mutable access to the value stored at an entry position.
    pub(crate) fn value_at_mut(&mut self, pos: Position) -> Option<&mut V> {
        if pos.is_end() {
            return None;
        }
        if pos.slot == VALUE_SLOT {
            self.interior_mut(pos.node).value.as_mut()
        } else {
            match self.interior(pos.node).table.child(pos.slot) {
                NodeRef::Leaf(leaf_id) => Some(&mut self.leaf_mut(leaf_id).value),
                NodeRef::Interior(_) => None,
            }
        }
    }
}
