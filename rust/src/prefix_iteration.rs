//! Prefix-of-key iteration for TrieMap.
//!
//! `prefix_items(query)` yields every stored key that is a prefix of the
//! query, shortest first. The walk follows the query byte-for-byte down a
//! single root-to-leaf path, so it never inspects more of the trie than
//! the query addresses: at each step the next query byte selects one
//! child, the child's edge label must itself be a prefix of the remaining
//! query, and any value passed along the way is a hit.

use crate::policy::SizePolicy;
use crate::types::{NodeRef, Position, TrieMap};
use crate::types::{NULL_NODE, VALUE_SLOT};

impl<V, P: SizePolicy> TrieMap<V, P> {
    /// Iterate every stored key that is a prefix of `query`, in ascending
    /// length order.
    ///
    /// # Examples
    ///
    /// ```
    /// use triemap::TrieMap;
    ///
    /// let map: TrieMap<i32> = [("", 0), ("do", 1), ("dog", 2), ("door", 3)]
    ///     .into_iter()
    ///     .collect();
    /// let hits: Vec<_> = map.prefix_items(b"dogs").map(|(k, _)| k).collect();
    /// assert_eq!(hits, vec![b"".to_vec(), b"do".to_vec(), b"dog".to_vec()]);
    /// ```
    pub fn prefix_items(&self, query: &[u8]) -> PrefixItems<'_, V, P> {
        let mut iter = PrefixItems {
            map: self,
            query: query.to_vec(),
            qpos: 0,
            pos: Position::END,
        };
        if self.root == NULL_NODE {
            return iter;
        }
        let root = self.interior(self.root);
        // The root's own label must lead the query or nothing can match
        if root.label.len() > iter.query.len()
            || root.label[..] != iter.query[..root.label.len()]
        {
            return iter;
        }
        iter.qpos = root.label.len();
        iter.pos = Position::new(self.root, VALUE_SLOT);
        if !root.has_value() && !iter.advance_prefix() {
            iter.pos = Position::END;
        }
        iter
    }

    /// Iterate the stored prefixes of `query` in descending length order.
    ///
    /// Computed by a forward pass that records each hit, then replayed
    /// backward.
    pub fn prefix_items_rev(&self, query: &[u8]) -> PrefixItemsRev<'_, V, P> {
        let mut forward = self.prefix_items(query);
        let mut positions = Vec::new();
        while !forward.pos.is_end() {
            positions.push(forward.pos);
            if !forward.advance_prefix() {
                break;
            }
        }
        PrefixItemsRev {
            map: self,
            positions,
        }
    }
}

/// Iterator over the stored prefixes of a query, shortest first.
pub struct PrefixItems<'a, V, P: SizePolicy> {
    map: &'a TrieMap<V, P>,
    query: Vec<u8>,
    /// Cursor into `query`: how much of it the current position consumed.
    qpos: usize,
    pos: Position,
}

impl<V, P: SizePolicy> PrefixItems<'_, V, P> {
    /// Advance to the next stored key that is a prefix of the query.
    /// Returns false (leaving the position alone) when there is none.
    fn advance_prefix(&mut self) -> bool {
        if self.pos.slot != VALUE_SLOT {
            // The last hit was a leaf; nothing extends past it
            return false;
        }
        let mut node = self.pos.node;
        loop {
            if self.qpos >= self.query.len() {
                return false;
            }
            let byte = self.query[self.qpos];
            self.qpos += 1;
            let (slot, found) = self.map.interior(node).table.find_entry(byte);
            if !found {
                return false;
            }
            match self.map.interior(node).table.child(slot) {
                NodeRef::Leaf(leaf_id) => {
                    let label = &self.map.leaf(leaf_id).label;
                    let rest = &self.query[self.qpos..];
                    if label.len() > rest.len() || label[..] != rest[..label.len()] {
                        return false;
                    }
                    self.qpos += label.len();
                    self.pos = Position::new(node, slot);
                    return true;
                }
                NodeRef::Interior(child) => {
                    let n = self.map.interior(child);
                    let rest = &self.query[self.qpos..];
                    if n.label.len() > rest.len() || n.label[..] != rest[..n.label.len()] {
                        return false;
                    }
                    self.qpos += n.label.len();
                    if n.has_value() {
                        self.pos = Position::new(child, VALUE_SLOT);
                        return true;
                    }
                    node = child;
                }
            }
        }
    }
}

impl<'a, V, P: SizePolicy> Iterator for PrefixItems<'a, V, P> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos.is_end() {
            return None;
        }
        let key = self.map.key_at(self.pos);
        let value = self.map.value_at(self.pos)?;
        if !self.advance_prefix() {
            self.pos = Position::END;
        }
        Some((key, value))
    }
}

/// Iterator over the stored prefixes of a query, longest first.
pub struct PrefixItemsRev<'a, V, P: SizePolicy> {
    map: &'a TrieMap<V, P>,
    positions: Vec<Position>,
}

impl<'a, V, P: SizePolicy> Iterator for PrefixItemsRev<'a, V, P> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.positions.pop()?;
        let key = self.map.key_at(pos);
        let value = self.map.value_at(pos)?;
        Some((key, value))
    }
}
