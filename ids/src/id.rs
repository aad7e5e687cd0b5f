use core::{fmt::Debug, hash::Hash};

/// Types that represent integer ids.
///
/// A type of this trait represents an `usize` index value in the range `0..=Self::MAX_ID_INDEX`.
/// The specific representation is up to the implementing type, which is usually a newtype around
/// a smaller integer.
///
/// Implementations must compare, order and hash exactly like the represented index does, so that
/// collections keyed by ids behave like collections keyed by indices.
pub trait Id: Copy + Ord + Hash + Debug {
    /// The largest index representable by this id type.
    const MAX_ID_INDEX: usize;

    /// Returns the id with a given index, or `None` when the index is out of range.
    fn try_from_id_index(index: usize) -> Option<Self>;

    /// Returns the index represented by this id.
    fn id_index(self) -> usize;

    /// Returns the id with a given index, panicking when the index is invalid.
    ///
    /// This panics if and only if `index > Self::MAX_ID_INDEX`.
    #[inline(always)]
    #[track_caller]
    fn from_id_index(index: usize) -> Self {
        match Self::try_from_id_index(index) {
            Some(id) => id,
            None => panic!(
                "index {index} out of range for {} (max {})",
                core::any::type_name::<Self>(),
                Self::MAX_ID_INDEX
            ),
        }
    }

    /// The id with index `0`.
    #[inline(always)]
    fn min_id() -> Self {
        Self::from_id_index(0)
    }
}

impl Id for usize {
    const MAX_ID_INDEX: usize = usize::MAX;

    #[inline(always)]
    fn try_from_id_index(index: usize) -> Option<Self> {
        Some(index)
    }

    #[inline(always)]
    fn id_index(self) -> usize {
        self
    }
}

impl Id for u32 {
    const MAX_ID_INDEX: usize = u32::MAX as usize;

    #[inline(always)]
    fn try_from_id_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok()
    }

    #[inline(always)]
    fn id_index(self) -> usize {
        self as usize
    }
}
