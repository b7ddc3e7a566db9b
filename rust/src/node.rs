//! Node-level operations: child tables, slot navigation, and capacity
//! transitions.
//!
//! Slots within an interior node are ordered `VALUE_SLOT` first (when the
//! node holds a value), then child slots in ascending branching-byte order,
//! then `END_SLOT`. All growth and shrinkage between capacity tiers happens
//! in place, so a node's ID never changes when its table is re-shaped.

use crate::policy::{SizePolicy, FULL};
use crate::types::{ChildTable, InteriorNode, Label, LeafNode, NodeId, NodeRef};
use crate::types::{END_SLOT, VALUE_SLOT};

/// Length of the common prefix of `a` and `b`.
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

// ============================================================================
// CHILD TABLE
// ============================================================================

impl ChildTable {
    /// A fresh compressed table at the policy's initial tier.
    pub(crate) fn new<P: SizePolicy>() -> Self {
        ChildTable::Compressed {
            capacity: P::INITIAL,
            bytes: Vec::with_capacity(P::INITIAL as usize),
            children: Vec::with_capacity(P::INITIAL as usize),
        }
    }

    /// Number of children in the table.
    pub(crate) fn len(&self) -> usize {
        match self {
            ChildTable::Compressed { bytes, .. } => bytes.len(),
            ChildTable::Full { len, .. } => *len as usize,
        }
    }

    /// Locate `byte`: `(slot, true)` when present; otherwise the insertion
    /// point for a compressed table (`END_SLOT` when `byte` is greater than
    /// all entries) or the byte's own slot for a full table.
    pub(crate) fn find_entry(&self, byte: u8) -> (usize, bool) {
        match self {
            ChildTable::Compressed { bytes, .. } => match bytes.binary_search(&byte) {
                Ok(slot) => (slot, true),
                Err(slot) if slot == bytes.len() => (END_SLOT, false),
                Err(slot) => (slot, false),
            },
            ChildTable::Full { slots, .. } => (byte as usize, slots[byte as usize].is_some()),
        }
    }

    /// Like `find_entry`, but when `byte` is absent the returned slot is the
    /// first occupied slot with a larger byte (or `END_SLOT`). Used by
    /// ordered lookups, which want a successor rather than an insertion
    /// point.
    pub(crate) fn probe(&self, byte: u8) -> (usize, bool) {
        match self {
            ChildTable::Compressed { .. } => self.find_entry(byte),
            ChildTable::Full { slots, .. } => {
                if slots[byte as usize].is_some() {
                    (byte as usize, true)
                } else {
                    let next = (byte as usize + 1..256).find(|&i| slots[i].is_some());
                    (next.unwrap_or(END_SLOT), false)
                }
            }
        }
    }

    /// The child stored at `slot`.
    pub(crate) fn child(&self, slot: usize) -> NodeRef {
        match self {
            ChildTable::Compressed { children, .. } => children[slot],
            ChildTable::Full { slots, .. } => {
                slots[slot].expect("full table slot is unoccupied")
            }
        }
    }

    /// Replace the child stored at `slot`.
    pub(crate) fn set_child(&mut self, slot: usize, child: NodeRef) {
        match self {
            ChildTable::Compressed { children, .. } => children[slot] = child,
            ChildTable::Full { slots, .. } => {
                debug_assert!(slots[slot].is_some());
                slots[slot] = Some(child);
            }
        }
    }

    /// The branching byte that selects `slot`.
    pub(crate) fn byte_at(&self, slot: usize) -> u8 {
        match self {
            ChildTable::Compressed { bytes, .. } => bytes[slot],
            ChildTable::Full { .. } => slot as u8,
        }
    }

    /// Insert `child` under `byte`. `slot` is the insertion point from
    /// `find_entry`; a full table ignores it and keys the slot by the byte
    /// itself. Grows one tier in place when the current one is at capacity.
    /// Returns the slot the child ended up in.
    pub(crate) fn insert_child<P: SizePolicy>(
        &mut self,
        slot: usize,
        byte: u8,
        child: NodeRef,
    ) -> usize {
        self.grow_if_full::<P>();
        match self {
            ChildTable::Compressed {
                bytes, children, ..
            } => {
                let slot = if slot == END_SLOT { bytes.len() } else { slot };
                bytes.insert(slot, byte);
                children.insert(slot, child);
                slot
            }
            ChildTable::Full { len, slots } => {
                debug_assert!(slots[byte as usize].is_none());
                slots[byte as usize] = Some(child);
                *len += 1;
                byte as usize
            }
        }
    }

    /// Step up one capacity tier if the table is at capacity, promoting to
    /// the full form past the top compressed tier.
    fn grow_if_full<P: SizePolicy>(&mut self) {
        let promote = match self {
            ChildTable::Compressed {
                capacity,
                bytes,
                children,
            } => {
                if bytes.len() < *capacity as usize {
                    return;
                }
                let up = P::up(*capacity);
                if up != FULL {
                    let grow = (up - *capacity) as usize;
                    bytes.reserve(grow);
                    children.reserve(grow);
                    *capacity = up;
                    return;
                }
                true
            }
            ChildTable::Full { .. } => false,
        };
        if promote {
            self.promote_to_full();
        }
    }

    /// Remove the child at `slot`, shrinking a tier when the population
    /// falls to the policy threshold. Returns the slot of the next child in
    /// the (possibly re-tiered) table, or `END_SLOT`.
    pub(crate) fn erase_child<P: SizePolicy>(&mut self, slot: usize) -> usize {
        let next = match self {
            ChildTable::Compressed {
                capacity,
                bytes,
                children,
            } => {
                bytes.remove(slot);
                children.remove(slot);
                let next = if slot < bytes.len() { slot } else { END_SLOT };
                if bytes.len() as u16 <= P::down_threshold(*capacity) {
                    let target = P::down(*capacity);
                    if target < *capacity {
                        *capacity = target;
                        bytes.shrink_to(target as usize);
                        children.shrink_to(target as usize);
                    }
                }
                return next;
            }
            ChildTable::Full { len, slots } => {
                debug_assert!(slots[slot].is_some());
                slots[slot] = None;
                *len -= 1;
                let next = (slot + 1..256)
                    .find(|&i| slots[i].is_some())
                    .unwrap_or(END_SLOT);
                if *len > P::down_threshold(FULL) {
                    return next;
                }
                next
            }
        };
        // Population fell to the threshold: back to a compressed tier, with
        // the next slot re-expressed in compressed indexing.
        self.demote_to_compressed::<P>();
        if next == END_SLOT {
            END_SLOT
        } else {
            self.find_entry(next as u8).0
        }
    }

    /// First child slot, or `END_SLOT` when there are no children.
    pub(crate) fn first_slot(&self) -> usize {
        match self {
            ChildTable::Compressed { bytes, .. } => {
                if bytes.is_empty() {
                    END_SLOT
                } else {
                    0
                }
            }
            ChildTable::Full { slots, .. } => (0..256)
                .find(|&i| slots[i].is_some())
                .unwrap_or(END_SLOT),
        }
    }

    /// Last child slot, or `END_SLOT` when there are no children.
    pub(crate) fn last_slot(&self) -> usize {
        match self {
            ChildTable::Compressed { bytes, .. } => {
                if bytes.is_empty() {
                    END_SLOT
                } else {
                    bytes.len() - 1
                }
            }
            ChildTable::Full { slots, .. } => (0..256)
                .rev()
                .find(|&i| slots[i].is_some())
                .unwrap_or(END_SLOT),
        }
    }

    /// Slot after `slot` in the `VALUE_SLOT`, children, `END_SLOT` order.
    pub(crate) fn next_slot(&self, slot: usize) -> usize {
        if slot == VALUE_SLOT {
            return self.first_slot();
        }
        debug_assert_ne!(slot, END_SLOT);
        match self {
            ChildTable::Compressed { bytes, .. } => {
                if slot + 1 < bytes.len() {
                    slot + 1
                } else {
                    END_SLOT
                }
            }
            ChildTable::Full { slots, .. } => (slot + 1..256)
                .find(|&i| slots[i].is_some())
                .unwrap_or(END_SLOT),
        }
    }

    /// Slot before `slot`, bottoming out at `VALUE_SLOT`.
    pub(crate) fn prev_slot(&self, slot: usize) -> usize {
        if slot == VALUE_SLOT {
            return VALUE_SLOT;
        }
        if slot == END_SLOT {
            return self.last_slot_or_value();
        }
        if slot == 0 {
            return VALUE_SLOT;
        }
        match self {
            ChildTable::Compressed { .. } => slot - 1,
            ChildTable::Full { slots, .. } => (0..slot)
                .rev()
                .find(|&i| slots[i].is_some())
                .unwrap_or(VALUE_SLOT),
        }
    }

    fn last_slot_or_value(&self) -> usize {
        let last = self.last_slot();
        if last == END_SLOT {
            VALUE_SLOT
        } else {
            last
        }
    }

    /// Iterate `(byte, child)` pairs in ascending byte order.
    pub(crate) fn children(&self) -> Children<'_> {
        Children {
            table: self,
            slot: self.first_slot(),
        }
    }

    /// Replace a compressed table with a direct-indexed one.
    fn promote_to_full(&mut self) {
        if let ChildTable::Compressed {
            bytes, children, ..
        } = self
        {
            let len = bytes.len() as u16;
            let mut slots: Box<[Option<NodeRef>; 256]> = Box::new([None; 256]);
            for (byte, child) in bytes.iter().zip(children.iter()) {
                slots[*byte as usize] = Some(*child);
            }
            *self = ChildTable::Full { len, slots };
        }
    }

    /// Replace a full table with a compressed one at the policy's
    /// downsize-target tier.
    fn demote_to_compressed<P: SizePolicy>(&mut self) {
        if let ChildTable::Full { len, slots } = self {
            let capacity = P::down(FULL);
            debug_assert!(*len <= capacity);
            let mut bytes = Vec::with_capacity(capacity as usize);
            let mut children = Vec::with_capacity(capacity as usize);
            for (byte, slot) in slots.iter().enumerate() {
                if let Some(child) = slot {
                    bytes.push(byte as u8);
                    children.push(*child);
                }
            }
            *self = ChildTable::Compressed {
                capacity,
                bytes,
                children,
            };
        }
    }
}

/// Iterator over `(byte, child)` pairs of a child table.
pub(crate) struct Children<'a> {
    table: &'a ChildTable,
    slot: usize,
}

impl Iterator for Children<'_> {
    type Item = (u8, NodeRef);

    fn next(&mut self) -> Option<Self::Item> {
        if self.slot == END_SLOT {
            return None;
        }
        let item = (self.table.byte_at(self.slot), self.table.child(self.slot));
        self.slot = self.table.next_slot(self.slot);
        Some(item)
    }
}

// ============================================================================
// NODE CONSTRUCTORS AND ACCESSORS
// ============================================================================

impl<V> LeafNode<V> {
    pub(crate) fn new(label: &[u8], value: V) -> Self {
        Self {
            label: Label::from_slice(label),
            value,
        }
    }
}

impl<V> InteriorNode<V> {
    pub(crate) fn new<P: SizePolicy>(
        label: &[u8],
        parent: NodeId,
        parent_byte: u8,
        value: Option<V>,
    ) -> Self {
        Self {
            label: Label::from_slice(label),
            parent,
            parent_byte,
            value,
            table: ChildTable::new::<P>(),
        }
    }

    pub(crate) fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// True when the node holds neither a value nor any children, which
    /// makes it dead weight outside of a transient erase step.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.value.is_none() && self.table.len() == 0
    }
}
