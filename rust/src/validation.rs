//! Validation and debugging utilities for TrieMap.
//!
//! Structural invariant checking (ordering, path compression, parent
//! links, capacity fit, size agreement, arena consistency) plus debug
//! printing. The checks are meant for tests and debugging; none of them
//! run during normal operations.

use crate::error::{TrieError, TrieResult};
use crate::policy::{SizePolicy, FULL};
use crate::types::{ChildTable, NodeId, NodeRef, TrieMap, NULL_NODE};

/// Values, leaves, and interiors counted while walking a subtree.
#[derive(Default, Clone, Copy)]
struct SubtreeCounts {
    values: usize,
    leaves: usize,
    interiors: usize,
}

impl<V, P: SizePolicy> TrieMap<V, P> {
    /// Check if the map maintains its structural invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> TrieResult<()> {
        if self.root == NULL_NODE {
            if self.size != 0 {
                return Err(TrieError::corrupted_tree(
                    "size",
                    &format!("{} entries recorded in an empty map", self.size),
                ));
            }
            if !self.leaves.is_empty() || !self.interiors.is_empty() {
                return Err(TrieError::corrupted_tree(
                    "arena",
                    "allocated nodes in an empty map",
                ));
            }
            return Ok(());
        }

        let root = self
            .interiors
            .get(self.root)
            .ok_or_else(|| TrieError::corrupted_tree("root", "missing from arena"))?;
        if root.parent != NULL_NODE {
            return Err(TrieError::corrupted_tree("root", "has a parent link"));
        }

        let counts = self.check_subtree(self.root, true)?;
        if counts.values != self.size {
            return Err(TrieError::corrupted_tree(
                "size",
                &format!("counter says {}, tree holds {}", self.size, counts.values),
            ));
        }
        if counts.leaves != self.leaves.len() || counts.interiors != self.interiors.len() {
            return Err(TrieError::corrupted_tree(
                "arena",
                &format!(
                    "tree has {} leaves / {} interiors, arenas hold {} / {}",
                    counts.leaves,
                    counts.interiors,
                    self.leaves.len(),
                    self.interiors.len()
                ),
            ));
        }

        self.check_iteration_order()
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> TrieResult<()> {
        self.check_invariants_detailed()
    }

    /// Returns all key-value pairs as a vector (for testing/debugging).
    pub fn slice(&self) -> Vec<(Vec<u8>, &V)> {
        self.items().collect()
    }

    /// Keys must come out of the iterator strictly ascending, one per
    /// stored entry.
    fn check_iteration_order(&self) -> TrieResult<()> {
        let mut count = 0usize;
        let mut previous: Option<Vec<u8>> = None;
        for key in self.keys() {
            if let Some(prev) = &previous {
                if prev >= &key {
                    return Err(TrieError::corrupted_tree(
                        "ordering",
                        &format!("{:?} yielded after {:?}", key, prev),
                    ));
                }
            }
            previous = Some(key);
            count += 1;
        }
        if count != self.size {
            return Err(TrieError::corrupted_tree(
                "ordering",
                &format!("iterator yielded {} keys for {} entries", count, self.size),
            ));
        }
        Ok(())
    }

    /// Recursively check one interior node and everything below it.
    fn check_subtree(&self, id: NodeId, is_root: bool) -> TrieResult<SubtreeCounts> {
        let node = self
            .interiors
            .get(id)
            .ok_or_else(|| TrieError::corrupted_tree("interior", "missing from arena"))?;

        match &node.table {
            ChildTable::Compressed {
                capacity,
                bytes,
                children,
            } => {
                if bytes.len() != children.len() {
                    return Err(TrieError::corrupted_tree(
                        "child table",
                        "byte and child arrays disagree",
                    ));
                }
                if bytes.len() > *capacity as usize || *capacity > FULL {
                    return Err(TrieError::corrupted_tree(
                        "child table",
                        &format!("{} children in a {}-capacity node", bytes.len(), capacity),
                    ));
                }
                if !bytes.windows(2).all(|pair| pair[0] < pair[1]) {
                    return Err(TrieError::corrupted_tree(
                        "child table",
                        "branching bytes out of order",
                    ));
                }
            }
            ChildTable::Full { len, slots } => {
                let occupied = slots.iter().filter(|slot| slot.is_some()).count();
                if occupied != *len as usize {
                    return Err(TrieError::corrupted_tree(
                        "child table",
                        &format!("occupancy {} recorded as {}", occupied, len),
                    ));
                }
            }
        }

        // Path compression: a non-root interior earns its keep with a
        // value or at least two children
        if !is_root && !node.has_value() && node.table.len() < 2 {
            return Err(TrieError::corrupted_tree(
                "interior",
                &format!("valueless node with {} children", node.table.len()),
            ));
        }

        let mut counts = SubtreeCounts {
            values: usize::from(node.has_value()),
            interiors: 1,
            ..Default::default()
        };
        for (byte, child) in node.table.children() {
            match child {
                NodeRef::Leaf(leaf_id) => {
                    if self.leaves.get(leaf_id).is_none() {
                        return Err(TrieError::corrupted_tree("leaf", "missing from arena"));
                    }
                    counts.values += 1;
                    counts.leaves += 1;
                }
                NodeRef::Interior(child_id) => {
                    let c = self.interiors.get(child_id).ok_or_else(|| {
                        TrieError::corrupted_tree("interior", "missing from arena")
                    })?;
                    if c.parent != id || c.parent_byte != byte {
                        return Err(TrieError::corrupted_tree(
                            "parent link",
                            &format!("child under byte {:#04x} points elsewhere", byte),
                        ));
                    }
                    let sub = self.check_subtree(child_id, false)?;
                    counts.values += sub.values;
                    counts.leaves += sub.leaves;
                    counts.interiors += sub.interiors;
                }
            }
        }
        Ok(counts)
    }

    // ========================================================================
    // DEBUGGING UTILITIES
    // ========================================================================

    /// Prints the tree structure for debugging.
    pub fn print_node_chain(&self) {
        println!("Trie structure ({} entries):", self.size);
        if self.root == NULL_NODE {
            println!("  <empty>");
            return;
        }
        self.print_node(NodeRef::Interior(self.root), 1);
    }

    fn print_node(&self, node: NodeRef, depth: usize) {
        let indent = "  ".repeat(depth);
        match node {
            NodeRef::Leaf(id) => match self.leaves.get(id) {
                Some(leaf) => println!(
                    "{}Leaf[id={}, label={:?}]",
                    indent,
                    id,
                    String::from_utf8_lossy(&leaf.label)
                ),
                None => println!("{}Leaf[id={}]: <missing>", indent, id),
            },
            NodeRef::Interior(id) => match self.interiors.get(id) {
                Some(n) => {
                    let kind = match &n.table {
                        ChildTable::Compressed { capacity, .. } => format!("cap={}", capacity),
                        ChildTable::Full { .. } => "full".to_string(),
                    };
                    println!(
                        "{}Interior[id={}, label={:?}, {}, value={}, {} children]",
                        indent,
                        id,
                        String::from_utf8_lossy(&n.label),
                        kind,
                        n.has_value(),
                        n.table.len()
                    );
                    for (byte, child) in n.table.children() {
                        println!("{}  [{:?}]", indent, byte as char);
                        self.print_node(child, depth + 2);
                    }
                }
                None => println!("{}Interior[id={}]: <missing>", indent, id),
            },
        }
    }
}
