//! Ordered range queries for TrieMap.
//!
//! `lower_bound` / `upper_bound` / `equal_range` in the usual ordered-map
//! sense, plus match-part variants that treat a query as a key prefix and
//! scope the bounds to the whole subtree of keys extending it.

use crate::iteration::Cursor;
use crate::policy::SizePolicy;
use crate::types::{Position, TrieMap, VALUE_SLOT};

impl<V, P: SizePolicy> TrieMap<V, P> {
    /// Cursor at the first entry whose key is `>= key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use triemap::TrieMap;
    ///
    /// let map: TrieMap<i32> = [("b", 1), ("d", 2)].into_iter().collect();
    /// assert_eq!(map.lower_bound(b"b").key(), Some(b"b".to_vec()));
    /// assert_eq!(map.lower_bound(b"c").key(), Some(b"d".to_vec()));
    /// assert!(map.lower_bound(b"e").at_end());
    /// ```
    pub fn lower_bound(&self, key: &[u8]) -> Cursor<'_, V, P> {
        match self.find_raw(key) {
            None => self.end(),
            Some(found) => {
                self.cursor_at(self.position_from(found.node, found.slot, found.cmp < 0))
            }
        }
    }

    /// Cursor at the first entry whose key is strictly greater than `key`.
    ///
    /// With `match_part`, a query matching a stored key or branching node
    /// skips past the entire subtree of keys extending the query.
    pub fn upper_bound(&self, key: &[u8], match_part: bool) -> Cursor<'_, V, P> {
        let found = match self.find_raw(key) {
            None => return self.end(),
            Some(found) => found,
        };
        let pos = if found.slot == VALUE_SLOT && match_part && (found.cmp == 0 || found.cmp == 1) {
            // The match is at the node itself; everything below it extends
            // the query, so resume after the node's last child subtree.
            let last = self.interior(found.node).table.last_slot();
            self.position_from(found.node, last, true)
        } else if found.cmp <= 0 || (match_part && found.cmp == 1) {
            self.position_from(found.node, found.slot, true)
        } else {
            self.position_from(found.node, found.slot, false)
        };
        self.cursor_at(pos)
    }

    /// The pair `(lower, upper)` bounding the entries that match `key`.
    ///
    /// Without `match_part` the range holds at most the exact entry; with
    /// it, the range spans every stored key the query is a prefix of.
    pub fn equal_range(&self, key: &[u8], match_part: bool) -> (Cursor<'_, V, P>, Cursor<'_, V, P>) {
        let found = match self.find_raw(key) {
            None => return (self.end(), self.end()),
            Some(found) => found,
        };
        if found.slot == VALUE_SLOT && match_part && (found.cmp == 0 || found.cmp == 1) {
            let first = self.position_from(found.node, VALUE_SLOT, false);
            let last = self.interior(found.node).table.last_slot();
            let second = self.position_from(found.node, last, true);
            (self.cursor_at(first), self.cursor_at(second))
        } else if found.cmp == 0 || (match_part && found.cmp == 1) {
            (
                self.cursor_at(self.position_from(found.node, found.slot, false)),
                self.cursor_at(self.position_from(found.node, found.slot, true)),
            )
        } else {
            let pos = self.position_from(found.node, found.slot, found.cmp < 0);
            (self.cursor_at(pos), self.cursor_at(pos))
        }
    }

    /// Iterate entries with keys in `[start, end)`. `None` bounds are
    /// unbounded on that side.
    ///
    /// # Examples
    ///
    /// ```
    /// use triemap::TrieMap;
    ///
    /// let map: TrieMap<i32> = [("a", 1), ("b", 2), ("c", 3), ("d", 4)]
    ///     .into_iter()
    ///     .collect();
    /// let keys: Vec<_> = map
    ///     .items_range(Some(b"b"), Some(b"d"))
    ///     .map(|(k, _)| k)
    ///     .collect();
    /// assert_eq!(keys, vec![b"b".to_vec(), b"c".to_vec()]);
    /// ```
    pub fn items_range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> RangeItems<'_, V, P> {
        let from = match start {
            Some(key) => self.lower_bound(key).position(),
            None => self.begin_position(),
        };
        let mut until = match end {
            Some(key) => self.lower_bound(key).position(),
            None => Position::END,
        };
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                until = from;
            }
        }
        RangeItems {
            map: self,
            pos: from,
            until,
        }
    }

    /// Returns the first entry in key order.
    pub fn first(&self) -> Option<(Vec<u8>, &V)> {
        self.items().next()
    }

    /// Returns the last entry in key order.
    pub fn last(&self) -> Option<(Vec<u8>, &V)> {
        self.items_rev().next()
    }
}

/// Iterator over a half-open key range, in ascending order.
pub struct RangeItems<'a, V, P: SizePolicy> {
    map: &'a TrieMap<V, P>,
    pos: Position,
    until: Position,
}

impl<'a, V, P: SizePolicy> Iterator for RangeItems<'a, V, P> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos.is_end() || self.pos == self.until {
            return None;
        }
        let key = self.map.key_at(self.pos);
        let value = self.map.value_at(self.pos)?;
        self.pos = self.map.successor(self.pos);
        Some((key, value))
    }
}
