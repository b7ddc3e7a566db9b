//! Adaptive size policies for interior-node child tables.
//!
//! A policy is a pure parameter table: for each legal compressed capacity it
//! names the next capacity to grow into when an insertion overflows, the
//! capacity to shrink to when the child count falls to the downsize
//! threshold, and the capacity a freshly created node starts with.
//! [`FULL`] is the sentinel for promotion to a direct-indexed 256-slot
//! table.
//!
//! Three policies are provided, differing only in their numbers: [`Small`]
//! re-tiers often and keeps sparse nodes tight, [`Fast`] jumps straight
//! from one compressed tier to the full table, and [`Medium`] sits in
//! between. Transitions move one tier at a time: one insert overflow causes
//! exactly one promotion, and erase shrinks step by step.

/// Capacity sentinel for the direct-indexed (256-slot) table.
pub const FULL: u16 = 256;

/// Parameter table governing child-table capacity transitions.
///
/// `capacity` arguments must be tiers of the implementing policy (or
/// [`FULL`] for `down`/`down_threshold`).
pub trait SizePolicy {
    /// Capacity of a freshly created interior node.
    const INITIAL: u16;

    /// The capacity to grow into when an insertion would overflow
    /// `capacity`. Returns [`FULL`] past the top compressed tier.
    fn up(capacity: u16) -> u16;

    /// The capacity to shrink to once the child count falls to
    /// `down_threshold(capacity)`. The bottom tier maps to itself.
    fn down(capacity: u16) -> u16;

    /// The child count at which a node of `capacity` shrinks. Zero means
    /// the tier never shrinks.
    fn down_threshold(capacity: u16) -> u16;
}

/// Capacities {2, 4, 8, 16, 32, full}, starting at 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Small;

impl SizePolicy for Small {
    const INITIAL: u16 = 2;

    fn up(capacity: u16) -> u16 {
        match capacity {
            2 => 4,
            4 => 8,
            8 => 16,
            16 => 32,
            32 => FULL,
            _ => unreachable!("not a Small tier: {}", capacity),
        }
    }

    fn down(capacity: u16) -> u16 {
        match capacity {
            2 => 2,
            4 => 2,
            8 => 4,
            16 => 8,
            32 => 16,
            FULL => 32,
            _ => unreachable!("not a Small tier: {}", capacity),
        }
    }

    fn down_threshold(capacity: u16) -> u16 {
        match capacity {
            2 => 0,
            4 => 1,
            8 => 2,
            16 => 4,
            32 => 8,
            FULL => 16,
            _ => unreachable!("not a Small tier: {}", capacity),
        }
    }
}

/// Capacities {4, 16, full}, starting at 4. The default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Medium;

impl SizePolicy for Medium {
    const INITIAL: u16 = 4;

    fn up(capacity: u16) -> u16 {
        match capacity {
            4 => 16,
            16 => FULL,
            _ => unreachable!("not a Medium tier: {}", capacity),
        }
    }

    fn down(capacity: u16) -> u16 {
        match capacity {
            4 => 4,
            16 => 4,
            FULL => 16,
            _ => unreachable!("not a Medium tier: {}", capacity),
        }
    }

    fn down_threshold(capacity: u16) -> u16 {
        match capacity {
            4 => 0,
            16 => 2,
            FULL => 8,
            _ => unreachable!("not a Medium tier: {}", capacity),
        }
    }
}

/// Capacities {8, full}, starting at 8. Fewest transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fast;

impl SizePolicy for Fast {
    const INITIAL: u16 = 8;

    fn up(capacity: u16) -> u16 {
        match capacity {
            8 => FULL,
            _ => unreachable!("not a Fast tier: {}", capacity),
        }
    }

    fn down(capacity: u16) -> u16 {
        match capacity {
            8 => 8,
            FULL => 8,
            _ => unreachable!("not a Fast tier: {}", capacity),
        }
    }

    fn down_threshold(capacity: u16) -> u16 {
        match capacity {
            8 => 0,
            FULL => 4,
            _ => unreachable!("not a Fast tier: {}", capacity),
        }
    }
}
