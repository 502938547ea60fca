use crate::error::{HeapError, Result};
use crate::offset_indexable::HeapIndex;
use crate::window::LogicalWindow;
use itertools::Itertools;
use log::{debug, trace};
use std::fmt;

/// An entry of the heapify work stack.
#[derive(Debug, Clone, Copy)]
enum Visit {
    /// Bottom-up pass over every parent, schedules its predecessor.
    Sweep(HeapIndex),
    /// Continuation of a sift-down after a swap.
    SiftDown(HeapIndex),
}

/// A fixed-capacity binary min-heap stored in a flat vector, whose root can
/// be moved away from the beginning of the vector.
///
/// ## Structure
/// The backing vector is split in two parts : `offset` padding slots, which
/// are never touched by the heap operations, followed by the _logical window_
/// of `size` elements holding the heap itself. The children of the element
/// at index `i` are found at `(i - offset) * 2 + 1 + offset` and
/// `(i - offset) * 2 + 2 + offset`, so the window always has the shape of a
/// complete binary tree rooted at `offset`, wherever that is in the vector.
/// This allows placing the root on an arbitrary alignment boundary without
/// moving the data.
///
/// ## Heapify
/// The heap is built once, in O(n), by sweeping every parent from the last
/// one down to the root with an explicit stack. When a child is smaller than
/// its parent, the smallest child is swapped up and its new position is pushed
/// back on the stack, which finishes the sift-down before the sweep goes on.
///
/// Elements are compared with `<` only. Equal elements may end up in any
/// relative order, and values that are not comparable with themselves (like
/// `f32::NAN`) break the heap property.
#[derive(Debug, Clone)]
pub struct OffsetHeap<T> {
    storage: Vec<T>,
    window: LogicalWindow,
}

impl<T: PartialOrd + Copy + Default> OffsetHeap<T> {
    /// Creates a heap of `n` default elements, rooted at the beginning of
    /// its storage.
    ///
    /// # Example
    /// ```
    /// use offset_heap::OffsetHeap;
    ///
    /// let heap = OffsetHeap::<u32>::with_capacity(4);
    ///
    /// assert_eq!(heap.size(), 4);
    /// assert_eq!(heap.top(), Ok(0));
    /// ```
    pub fn with_capacity(n: usize) -> OffsetHeap<T> {
        debug!("allocating heap of {} elements", n);

        OffsetHeap {
            storage: vec![T::default(); n],
            window: LogicalWindow::new(0, n),
        }
    }

    /// Creates a heap from a slice of values. The storage is exactly as long
    /// as the slice.
    ///
    /// # Panics
    /// In debug builds, panics if the values are not totally ordered (for
    /// instance a `f32::NAN` among floats), as the heap property cannot hold.
    ///
    /// # Example
    /// ```
    /// use offset_heap::OffsetHeap;
    ///
    /// let heap = OffsetHeap::from_slice(&[5, 4, 3, 2, 1]);
    ///
    /// assert_eq!(heap.top(), Ok(1));
    /// assert!(heap.is_heap());
    /// ```
    pub fn from_slice(values: &[T]) -> OffsetHeap<T> {
        let mut heap = OffsetHeap {
            storage: values.to_vec(),
            window: LogicalWindow::new(0, values.len()),
        };

        debug!("building heap of {} elements", values.len());
        heap.heapify();
        heap
    }

    /// Creates a heap from a slice of values, preceded by `offset` padding
    /// slots. The padding holds default values. Fails with
    /// `OffsetOutOfRange` if the storage cannot be allocated.
    ///
    /// # Panics
    /// In debug builds, panics if the values are not totally ordered, like
    /// [`OffsetHeap::from_slice`].
    ///
    /// # Example
    /// ```
    /// use offset_heap::OffsetHeap;
    ///
    /// let heap = OffsetHeap::from_slice_with_offset(&[10, 1], 3).unwrap();
    ///
    /// assert_eq!(heap.top(), Ok(1));
    /// assert_eq!(heap.capacity(), 5);
    /// assert_eq!(heap.window(), &[1, 10]);
    /// ```
    pub fn from_slice_with_offset(values: &[T], offset: usize) -> Result<OffsetHeap<T>> {
        let window = LogicalWindow::new(offset, values.len());
        let unallocatable = HeapError::OffsetOutOfRange {
            offset,
            size: values.len(),
            capacity: usize::MAX,
        };
        let capacity = offset.checked_add(values.len()).ok_or(unallocatable)?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| unallocatable)?;
        storage.resize(capacity, T::default());
        storage[window.range()].copy_from_slice(values);

        let mut heap = OffsetHeap { storage, window };

        debug!(
            "building heap of {} elements at offset {}",
            values.len(),
            offset
        );
        heap.heapify();
        Ok(heap)
    }

    /// Adopts an existing buffer, turning its first `size` elements into a
    /// heap. The rest of the buffer is left as is.
    ///
    /// # Example
    /// ```
    /// use offset_heap::{HeapError, OffsetHeap};
    ///
    /// let heap = OffsetHeap::from_buffer(vec![3, 2, 1, 0], 3).unwrap();
    ///
    /// assert_eq!(heap.storage(), &[1, 2, 3, 0]);
    ///
    /// assert_eq!(
    ///     OffsetHeap::from_buffer(vec![3, 2, 1], 4).unwrap_err(),
    ///     HeapError::CapacityMismatch { size: 4, capacity: 3 }
    /// );
    /// ```
    pub fn from_buffer(buffer: Vec<T>, size: usize) -> Result<OffsetHeap<T>> {
        if size > buffer.len() {
            return Err(HeapError::CapacityMismatch {
                size,
                capacity: buffer.len(),
            });
        }

        Self::from_buffer_with_offset(buffer, size, 0)
    }

    /// Adopts an existing buffer, turning the `size` elements starting at
    /// `offset` into a heap. The elements outside that window are left as is.
    ///
    /// # Panics
    /// In debug builds, panics if the window is not totally ordered, like
    /// [`OffsetHeap::from_slice`]. The same goes for
    /// [`OffsetHeap::from_buffer`] and [`OffsetHeap::set_offset`].
    ///
    /// # Example
    /// ```
    /// use offset_heap::{HeapError, OffsetHeap};
    ///
    /// let heap = OffsetHeap::from_buffer_with_offset(vec![9, 9, 7, 5, 6, 9], 3, 2).unwrap();
    ///
    /// assert_eq!(heap.storage(), &[9, 9, 5, 7, 6, 9]);
    ///
    /// assert!(matches!(
    ///     OffsetHeap::from_buffer_with_offset(vec![0u8; 4], 3, 2),
    ///     Err(HeapError::OffsetOutOfRange { .. })
    /// ));
    /// ```
    pub fn from_buffer_with_offset(
        buffer: Vec<T>,
        size: usize,
        offset: usize,
    ) -> Result<OffsetHeap<T>> {
        let window = LogicalWindow::new(offset, size);

        if !window.fits_in(buffer.len()) {
            return Err(HeapError::OffsetOutOfRange {
                offset,
                size,
                capacity: buffer.len(),
            });
        }

        let mut heap = OffsetHeap {
            storage: buffer,
            window,
        };

        debug!(
            "adopting buffer of {} slots, heap of {} elements at offset {}",
            heap.capacity(),
            size,
            offset
        );
        heap.heapify();
        Ok(heap)
    }

    /// Returns the number of elements in the heap.
    pub fn size(&self) -> usize {
        self.window.size
    }

    pub fn is_empty(&self) -> bool {
        self.window.size == 0
    }

    /// Returns the index of the root in the storage.
    pub fn offset(&self) -> usize {
        self.window.offset
    }

    /// Returns the length of the backing storage, padding included.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the smallest element of the heap.
    ///
    /// # Example
    /// ```
    /// use offset_heap::{HeapError, OffsetHeap};
    ///
    /// assert_eq!(OffsetHeap::from_slice(&[42]).top(), Ok(42));
    /// assert_eq!(OffsetHeap::<i32>::from_slice(&[]).top(), Err(HeapError::EmptyHeap));
    /// ```
    pub fn top(&self) -> Result<T> {
        if self.is_empty() {
            Err(HeapError::EmptyHeap)
        } else {
            Ok(self.storage[self.window.start()])
        }
    }

    /// Moves the root to `offset` and rebuilds the heap from whatever the
    /// storage holds in the new window. The heap is left untouched if the new
    /// window does not fit in the storage.
    ///
    /// # Example
    /// ```
    /// use offset_heap::{HeapError, OffsetHeap};
    ///
    /// let mut heap = OffsetHeap::from_slice_with_offset(&[4, 3, 2], 2).unwrap();
    ///
    /// assert_eq!(heap.storage(), &[0, 0, 2, 3, 4]);
    ///
    /// heap.set_offset(1).unwrap();
    ///
    /// assert_eq!(heap.storage(), &[0, 0, 2, 3, 4]);
    /// assert_eq!(heap.top(), Ok(0));
    ///
    /// assert!(matches!(heap.set_offset(3), Err(HeapError::OffsetOutOfRange { .. })));
    /// assert_eq!(heap.offset(), 1);
    /// ```
    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        let window = LogicalWindow::new(offset, self.window.size);

        if !window.fits_in(self.storage.len()) {
            return Err(HeapError::OffsetOutOfRange {
                offset,
                size: window.size,
                capacity: self.storage.len(),
            });
        }

        debug!("moving heap root from {} to {}", self.window.offset, offset);
        self.window = window;
        self.heapify();
        Ok(())
    }

    /// Returns the elements of the heap, in storage order.
    pub fn window(&self) -> &[T] {
        &self.storage[self.window.range()]
    }

    /// Returns the whole backing storage, padding included.
    pub fn storage(&self) -> &[T] {
        &self.storage
    }

    pub fn into_storage(self) -> Vec<T> {
        self.storage
    }

    /// Returns true if no element of the window is greater than one of its
    /// children.
    pub fn is_heap(&self) -> bool {
        self.window.range().all(|parent| {
            self.window
                .children(parent)
                .all(|child| self.storage[parent] <= self.storage[child])
        })
    }

    fn smallest_child(&self, parent: HeapIndex) -> Option<HeapIndex> {
        self.window.children(parent).reduce(|smallest, child| {
            if self.storage[child] < self.storage[smallest] {
                child
            } else {
                smallest
            }
        })
    }

    /// Restores the heap property over the window, returning the number of
    /// swaps performed.
    fn heapify(&mut self) -> usize {
        let start = self.window.start();
        let mut swaps = 0;
        let mut stack: Vec<Visit> = self
            .window
            .last_parent()
            .map(Visit::Sweep)
            .into_iter()
            .collect();

        while let Some(visit) = stack.pop() {
            let parent = match visit {
                Visit::Sweep(parent) => {
                    if parent > start {
                        stack.push(Visit::Sweep(parent - 1));
                    }
                    parent
                }
                Visit::SiftDown(parent) => parent,
            };

            if let Some(child) = self.smallest_child(parent) {
                if self.storage[child] < self.storage[parent] {
                    self.storage.swap(child, parent);
                    swaps += 1;
                    stack.push(Visit::SiftDown(child));
                }
            }
        }

        debug_assert!(self.is_heap());
        trace!(
            "heapified {} elements at offset {} with {} swaps",
            self.window.size,
            self.window.offset,
            swaps
        );
        swaps
    }
}

/// Prints the whole storage, padding included, as `[ a b c ]`.
///
/// # Example
/// ```
/// use offset_heap::OffsetHeap;
///
/// let heap = OffsetHeap::from_slice_with_offset(&[3, 1, 2], 1).unwrap();
///
/// assert_eq!(heap.to_string(), "[ 0 1 3 2 ]");
/// assert_eq!(OffsetHeap::<u8>::from_slice(&[]).to_string(), "[ ]");
/// ```
impl<T: fmt::Display> fmt::Display for OffsetHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ {}]",
            self.storage
                .iter()
                .format_with("", |element, f| f(&format_args!("{} ", element)))
        )
    }
}
