//! Object identifiers.
use ntk_ids::Id;

/// Numeric identifier of an object in a network.
///
/// The index range is limited so that every `(id, polarity)` pair has a [`NodeRef`] code below
/// `u32::MAX`, which is reserved for [`NodeRef::NONE`].
///
/// [`NodeRef`]: crate::NodeRef
/// [`NodeRef::NONE`]: crate::NodeRef::NONE
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    /// The largest valid object index.
    pub const MAX_INDEX: usize = (u32::MAX as usize >> 1) - 1;

    /// Returns the object id with the given index.
    ///
    /// # Panics
    ///
    /// Panics when `index > ObjectId::MAX_INDEX`.
    #[inline(always)]
    #[track_caller]
    pub fn from_index(index: usize) -> Self {
        <Self as Id>::from_id_index(index)
    }

    /// Returns the index of this object id.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Id for ObjectId {
    const MAX_ID_INDEX: usize = Self::MAX_INDEX;

    #[inline(always)]
    fn try_from_id_index(index: usize) -> Option<Self> {
        (index <= Self::MAX_INDEX).then_some(Self(index as u32))
    }

    #[inline(always)]
    fn id_index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}
