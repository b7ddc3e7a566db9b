//! DELETE operations for TrieMap.
//!
//! Erasing an entry removes the value or leaf at the position, then repairs
//! the structure around it: nodes left with neither value nor children are
//! destroyed up the tree, a childless value-bearing interior reverts to a
//! leaf, and a valueless interior with a single child is spliced out so
//! path compression stays maximal. Every erase reports the in-order
//! successor of the removed entry.

use crate::policy::SizePolicy;
use crate::types::{ChildTable, LeafNode, NodeId, NodeRef, Position, TrieMap};
use crate::types::{END_SLOT, NULL_NODE, VALUE_SLOT};

/// What remained after splicing out a single-child interior.
enum Spliced {
    /// The root absorbed its only leaf and now carries the value itself.
    RootLeaf(NodeId),
    /// The only child took over as root.
    RootInterior(NodeId),
    /// A leaf took the spliced node's place in its parent.
    Leaf { parent: NodeId, slot: usize },
    /// An interior child took the spliced node's place.
    Interior {
        parent: NodeId,
        slot: usize,
        child: NodeId,
    },
}

impl<V, P: SizePolicy> TrieMap<V, P> {
    /// Remove `key` from the map. Returns the number of entries removed
    /// (0 or 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use triemap::TrieMap;
    ///
    /// let mut map: TrieMap<i32> = [("foo", 1), ("foobar", 2)].into_iter().collect();
    /// assert_eq!(map.erase(b"foobar"), 1);
    /// assert_eq!(map.erase(b"foobar"), 0);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn erase(&mut self, key: &[u8]) -> usize {
        match self.find_raw(key) {
            Some(found) if found.cmp == 0 => {
                self.erase_at(Position::new(found.node, found.slot));
                1
            }
            _ => 0,
        }
    }

    /// Remove the entry at `pos` and return the position of its in-order
    /// successor (end when the removed entry was the last).
    ///
    /// `pos` must be a valid entry position obtained since the last
    /// mutation; stale positions are rejected only by debug assertions.
    pub fn erase_at(&mut self, pos: Position) -> Position {
        debug_assert!(!pos.is_end(), "erase_at on the end position");
        if pos.is_end() {
            return Position::END;
        }
        self.size -= 1;
        let node = pos.node;

        if pos.slot == VALUE_SLOT {
            debug_assert!(self.interior(node).has_value());
            self.interior_mut(node).value = None;
            return match self.interior(node).table.len() {
                0 => self.remove_dead_node(node),
                1 => {
                    let spliced = self.splice_single_child(node);
                    self.spliced_entry_position(&spliced)
                }
                // The successor is the first value below this node
                _ => self.first_value_position(node),
            };
        }

        match self.interior(node).table.child(pos.slot) {
            NodeRef::Leaf(leaf_id) => {
                self.leaves.deallocate(leaf_id);
            }
            NodeRef::Interior(_) => {
                debug_assert!(false, "erase_at on a non-entry slot");
                return Position::END;
            }
        }
        let next_slot = self.interior_mut(node).table.erase_child::<P>(pos.slot);
        self.finish_removal(node, next_slot)
    }

    /// Erase every entry from `first` up to (not including) `last`,
    /// following successor positions.
    ///
    /// `last` must be the end position or one untouched by the erasures in
    /// between (in practice: end, or a position outside the erased range's
    /// nodes).
    pub fn erase_range(&mut self, first: Position, last: Position) {
        let mut current = first;
        while current != last && !current.is_end() {
            current = self.erase_at(current);
        }
    }

    // ========================================================================
    // STRUCTURAL REPAIR
    // ========================================================================

    /// `node` just lost a child; `next_slot` is the slot after the removed
    /// one. Repair the node and compute the erased entry's successor.
    fn finish_removal(&mut self, node: NodeId, next_slot: usize) -> Position {
        let (has_value, children, is_root) = {
            let n = self.interior(node);
            (n.has_value(), n.table.len(), n.parent == NULL_NODE)
        };
        match (has_value, children) {
            // Nothing left here at all: remove the node and repair upward
            (false, 0) => self.remove_dead_node(node),
            // One child and no value: restore path compression
            (false, 1) => {
                let at_subtree_end = next_slot == END_SLOT;
                let spliced = self.splice_single_child(node);
                if at_subtree_end {
                    self.spliced_after_position(&spliced)
                } else {
                    self.spliced_entry_position(&spliced)
                }
            }
            // A childless interior holding a value is a leaf in disguise
            (true, 0) if !is_root => {
                let (parent, slot) = self.convert_to_leaf(node);
                self.successor(Position::new(parent, slot))
            }
            // Node stays; step back one slot and advance to find the
            // successor, descending into subtrees as needed
            _ => {
                let prev = self.interior(node).table.prev_slot(next_slot);
                self.successor(Position::new(node, prev))
            }
        }
    }

    /// Destroy a node with no value and no children, cascading into its
    /// parent.
    fn remove_dead_node(&mut self, node: NodeId) -> Position {
        let (parent, parent_byte) = {
            let n = self.interior(node);
            debug_assert!(n.is_exhausted());
            (n.parent, n.parent_byte)
        };
        self.interiors.deallocate(node);
        if parent == NULL_NODE {
            self.root = NULL_NODE;
            return Position::END;
        }
        let (slot, found) = self.interior(parent).table.find_entry(parent_byte);
        debug_assert!(found, "parent table lost its child entry");
        let next_slot = self.interior_mut(parent).table.erase_child::<P>(slot);
        self.finish_removal(parent, next_slot)
    }

    /// Turn a non-root, childless, value-bearing interior back into a leaf.
    /// Returns the parent and the slot now holding the leaf.
    fn convert_to_leaf(&mut self, node: NodeId) -> (NodeId, usize) {
        let n = self
            .interiors
            .deallocate(node)
            .expect("interior node missing from arena");
        debug_assert_eq!(n.table.len(), 0);
        let value = n.value.expect("valueless interior cannot become a leaf");
        let leaf = self.leaves.allocate(LeafNode {
            label: n.label,
            value,
        });
        let (slot, found) = self.interior(n.parent).table.find_entry(n.parent_byte);
        debug_assert!(found, "parent table lost its child entry");
        self.interior_mut(n.parent)
            .table
            .set_child(slot, NodeRef::Leaf(leaf));
        (n.parent, slot)
    }

    /// Splice out a valueless interior with exactly one child: the child
    /// absorbs `label + branching byte + child label` and takes the node's
    /// place (or the root's, where the node may also fuse with a leaf into
    /// a value-bearing childless root).
    fn splice_single_child(&mut self, node: NodeId) -> Spliced {
        let (parent, parent_byte, byte, child) = {
            let n = self.interior(node);
            debug_assert!(!n.has_value() && n.table.len() == 1);
            let (byte, child) = n
                .table
                .children()
                .next()
                .expect("single-child table is empty");
            (n.parent, n.parent_byte, byte, child)
        };

        match child {
            NodeRef::Leaf(leaf_id) => {
                if parent == NULL_NODE {
                    let leaf = self
                        .leaves
                        .deallocate(leaf_id)
                        .expect("leaf node missing from arena");
                    let root = self.interior_mut(node);
                    root.label.push(byte);
                    root.label.extend_from_slice(&leaf.label);
                    root.value = Some(leaf.value);
                    root.table = ChildTable::new::<P>();
                    Spliced::RootLeaf(node)
                } else {
                    let n = self
                        .interiors
                        .deallocate(node)
                        .expect("interior node missing from arena");
                    {
                        let leaf = self.leaf_mut(leaf_id);
                        let mut label = n.label;
                        label.push(byte);
                        label.extend_from_slice(&leaf.label);
                        leaf.label = label;
                    }
                    let (slot, found) = self.interior(parent).table.find_entry(parent_byte);
                    debug_assert!(found, "parent table lost its child entry");
                    self.interior_mut(parent)
                        .table
                        .set_child(slot, NodeRef::Leaf(leaf_id));
                    Spliced::Leaf { parent, slot }
                }
            }
            NodeRef::Interior(child_id) => {
                let n = self
                    .interiors
                    .deallocate(node)
                    .expect("interior node missing from arena");
                {
                    let c = self.interior_mut(child_id);
                    let mut label = n.label;
                    label.push(byte);
                    label.extend_from_slice(&c.label);
                    c.label = label;
                    c.parent = parent;
                    c.parent_byte = parent_byte;
                }
                if parent == NULL_NODE {
                    self.root = child_id;
                    Spliced::RootInterior(child_id)
                } else {
                    let (slot, found) = self.interior(parent).table.find_entry(parent_byte);
                    debug_assert!(found, "parent table lost its child entry");
                    self.interior_mut(parent)
                        .table
                        .set_child(slot, NodeRef::Interior(child_id));
                    Spliced::Interior {
                        parent,
                        slot,
                        child: child_id,
                    }
                }
            }
        }
    }

    /// First entry within the spliced remainder.
    fn spliced_entry_position(&self, spliced: &Spliced) -> Position {
        match *spliced {
            Spliced::RootLeaf(root) => Position::new(root, VALUE_SLOT),
            Spliced::RootInterior(child) => self.first_value_position(child),
            Spliced::Leaf { parent, slot } => Position::new(parent, slot),
            Spliced::Interior { child, .. } => self.first_value_position(child),
        }
    }

    /// First entry after the spliced remainder's whole subtree.
    fn spliced_after_position(&self, spliced: &Spliced) -> Position {
        match *spliced {
            Spliced::RootLeaf(_) | Spliced::RootInterior(_) => Position::END,
            Spliced::Leaf { parent, slot } | Spliced::Interior { parent, slot, .. } => {
                self.successor(Position::new(parent, slot))
            }
        }
    }
}
