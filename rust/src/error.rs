//! Error handling and result types for TrieMap operations.
//!
//! The map has few failure modes of its own: duplicate insertion and
//! missing keys are reported by value, and allocation failure aborts as
//! usual for Rust collections. The error type covers error-returning
//! lookups and the structural checks in the validation module.

/// Error type for trie operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// Key not found in the map.
    KeyNotFound,
    /// A structural invariant does not hold.
    CorruptedTree(String),
    /// An operation was applied in a state it cannot handle.
    InvalidState(String),
}

impl TrieError {
    /// Create a CorruptedTree error with context.
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{}: {}", component, details))
    }

    /// Create an InvalidState error with context.
    pub fn invalid_state(operation: &str, state: &str) -> Self {
        Self::InvalidState(format!("cannot {} in state: {}", operation, state))
    }

    /// Check if this error reports a structural violation.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptedTree(_))
    }
}

impl std::fmt::Display for TrieError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrieError::KeyNotFound => write!(f, "key not found in map"),
            TrieError::CorruptedTree(msg) => write!(f, "corrupted tree: {}", msg),
            TrieError::InvalidState(msg) => write!(f, "invalid state: {}", msg),
        }
    }
}

impl std::error::Error for TrieError {}

/// Result type for trie operations that may fail.
pub type TrieResult<T> = Result<T, TrieError>;

/// Result type for key lookup operations.
pub type KeyResult<T> = Result<T, TrieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(TrieError::KeyNotFound.to_string(), "key not found in map");
        let err = TrieError::corrupted_tree("child table", "bytes out of order");
        assert_eq!(
            err.to_string(),
            "corrupted tree: child table: bytes out of order"
        );
        assert!(err.is_corruption());
        assert!(!TrieError::KeyNotFound.is_corruption());
    }
}
