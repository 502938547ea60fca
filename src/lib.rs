#![warn(clippy::all)]
//! An array-backed binary min-heap whose root can be placed at any offset
//! inside its storage, with a driver measuring how that offset affects the
//! cost of building the heap.
use std::ops::Range;

/// A range of indexes in the backing storage of a heap
type Window = Range<usize>;

pub mod benchmark;
pub mod error;
pub mod heap;
pub mod offset_indexable;
pub mod window;

pub use benchmark::BenchError;
pub use error::{HeapError, Result};
pub use heap::OffsetHeap;
