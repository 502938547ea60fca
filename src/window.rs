use crate::offset_indexable::{HeapIndex, OffsetIndexable};
use crate::Window;

/// The contiguous part of the backing storage holding the heap : `size`
/// elements starting at `offset`. Everything before `offset` is padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalWindow {
    pub offset: usize,
    pub size: usize,
}

impl LogicalWindow {
    pub fn new(offset: usize, size: usize) -> LogicalWindow {
        LogicalWindow { offset, size }
    }

    /// Index of the root.
    #[inline]
    pub fn start(&self) -> HeapIndex {
        self.offset
    }

    /// One past the last element of the window.
    ///
    /// # Example
    /// ```
    /// use offset_heap::window::LogicalWindow;
    ///
    /// assert_eq!(LogicalWindow::new(3, 5).end(), 8);
    /// ```
    #[inline]
    pub fn end(&self) -> HeapIndex {
        self.offset + self.size
    }

    pub fn range(&self) -> Window {
        self.start()..self.end()
    }

    #[inline]
    pub fn contains(&self, index: HeapIndex) -> bool {
        index >= self.start() && index < self.end()
    }

    /// Returns true if a storage of length `capacity` covers the whole window.
    pub fn fits_in(&self, capacity: usize) -> bool {
        self.offset
            .checked_add(self.size)
            .map_or(false, |end| end <= capacity)
    }

    /// The last index having at least one child inside the window. Windows
    /// of zero or one element have none.
    ///
    /// # Example
    /// ```
    /// use offset_heap::window::LogicalWindow;
    ///
    /// assert_eq!(LogicalWindow::new(0, 5).last_parent(), Some(1));
    /// assert_eq!(LogicalWindow::new(4, 5).last_parent(), Some(5));
    /// assert_eq!(LogicalWindow::new(4, 1).last_parent(), None);
    /// ```
    pub fn last_parent(&self) -> Option<HeapIndex> {
        if self.size < 2 {
            None
        } else {
            Some(self.offset + self.size / 2 - 1)
        }
    }

    /// The children of `index` that lie inside the window, left first.
    pub fn children(&self, index: HeapIndex) -> impl Iterator<Item = HeapIndex> {
        let window = *self;
        [
            index.left_child(self.offset),
            index.right_child(self.offset),
        ]
        .into_iter()
        .filter(move |&child| window.contains(child))
    }
}
