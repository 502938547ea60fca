/// The index of a node in a heap whose root sits at `origin` in the backing
/// storage. Indices are absolute (they address the storage directly), the
/// tree shape is relative to the origin, like so with `origin = 3` :
///                          3
///                       /     \
///                      4       5
///                    /   \   /   \
///                   6     7 8     9
///
/// And so forth.
pub trait OffsetIndexable {
    fn left_child(&self, origin: Self) -> Self;
    fn right_child(&self, origin: Self) -> Self;
    fn parent(&self, origin: Self) -> Self;
}

pub type HeapIndex = usize;

impl OffsetIndexable for HeapIndex {
    #[inline]
    fn left_child(&self, origin: Self) -> Self {
        (self - origin) * 2 + 1 + origin
    }

    #[inline]
    fn right_child(&self, origin: Self) -> Self {
        (self - origin) * 2 + 2 + origin
    }

    #[inline]
    fn parent(&self, origin: Self) -> Self {
        assert!(*self > origin);

        origin + (self - origin - 1) / 2
    }
}
