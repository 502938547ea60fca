//! Error types for offset heaps

use thiserror::Error;

/// Result type alias using the heap error
pub type Result<T> = std::result::Result<T, HeapError>;

/// Precondition violations rejected by heap operations. None of them leaves
/// the heap in a partially modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The root of an empty heap was requested
    #[error("the heap is empty")]
    EmptyHeap,

    /// The logical window would extend past the backing storage
    #[error("window at offset {offset} with {size} elements exceeds storage of length {capacity}")]
    OffsetOutOfRange {
        offset: usize,
        size: usize,
        capacity: usize,
    },

    /// More elements were requested than the buffer can hold
    #[error("cannot hold {size} elements in storage of length {capacity}")]
    CapacityMismatch { size: usize, capacity: usize },
}
