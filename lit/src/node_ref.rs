//! Polarity tagged object references.
use std::ops;

use crate::{ObjectId, Pol};

/// Reference to an object of a network together with an edge polarity.
///
/// The object id and polarity are combined into a single number, called the
/// [`code`][`Self::code`], as `id * 2 + pol`. An even code thus refers to the plain object and an
/// odd code to its complement. Complementation is a tag on the reference, there never is a separate
/// object for the negated value.
///
/// The code `u32::MAX` is reserved for [`NodeRef::NONE`], the absent reference. As it is outside
/// of the range of valid codes it cannot be confused with the complement of object `0`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeRef(u32);

impl Default for NodeRef {
    #[inline(always)]
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            None => write!(f, "none"),
            Some((id, Pol::Pos)) => write!(f, "{id}"),
            Some((id, Pol::Neg)) => write!(f, "!{id}"),
        }
    }
}

impl From<ObjectId> for NodeRef {
    #[inline(always)]
    fn from(id: ObjectId) -> Self {
        Self::new(id, Pol::Pos)
    }
}

impl NodeRef {
    /// The absent reference.
    pub const NONE: Self = Self(u32::MAX);

    /// The largest valid [`code`][`Self::code`] of a present reference.
    pub const MAX_CODE: u32 = (ObjectId::MAX_INDEX as u32) * 2 + 1;

    /// Returns the reference to an object with the given polarity.
    #[inline(always)]
    pub fn new(id: ObjectId, pol: Pol) -> Self {
        Self(((id.index() as u32) << 1) | pol as u32)
    }

    /// Returns the plain reference to an object.
    #[inline(always)]
    pub fn pos(id: ObjectId) -> Self {
        Self::new(id, Pol::Pos)
    }

    /// Returns the complemented reference to an object.
    #[inline(always)]
    pub fn neg(id: ObjectId) -> Self {
        Self::new(id, Pol::Neg)
    }

    /// Returns the reference for a given code.
    ///
    /// # Panics
    ///
    /// Panics when `code` is neither a valid code nor the code of [`NodeRef::NONE`].
    #[inline]
    #[track_caller]
    pub fn from_code(code: u32) -> Self {
        assert!(
            code <= Self::MAX_CODE || code == Self::NONE.0,
            "invalid node reference code {code}"
        );
        Self(code)
    }

    /// Returns the code of this reference.
    #[inline(always)]
    pub fn code(self) -> u32 {
        self.0
    }

    /// Returns `true` for [`NodeRef::NONE`].
    #[inline(always)]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` for any present reference.
    #[inline(always)]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the referenced object and polarity, or `None` for the absent reference.
    #[inline(always)]
    pub fn get(self) -> Option<(ObjectId, Pol)> {
        self.is_some().then(|| (self.id(), self.pol()))
    }

    /// Returns the referenced object.
    ///
    /// # Panics
    ///
    /// Panics for [`NodeRef::NONE`].
    #[inline(always)]
    #[track_caller]
    pub fn id(self) -> ObjectId {
        assert!(self.is_some(), "absent node reference has no object");
        ObjectId::from_index((self.0 >> 1) as usize)
    }

    /// Returns the polarity of this reference.
    ///
    /// The absent reference has positive polarity.
    #[inline(always)]
    pub fn pol(self) -> Pol {
        Pol::neg_if(self.is_complemented())
    }

    /// Returns `true` if this reference is tagged as complemented.
    #[inline(always)]
    pub fn is_complemented(self) -> bool {
        self.is_some() && self.0 & 1 != 0
    }

    /// Returns the same reference with the complement tag stripped.
    #[inline(always)]
    pub fn regular(self) -> Self {
        if self.is_none() {
            self
        } else {
            Self(self.0 & !1)
        }
    }

    /// Complements this reference if `cond` is `true`.
    #[inline(always)]
    pub fn not_cond(self, cond: bool) -> Self {
        self ^ cond
    }
}

impl ops::Not for NodeRef {
    type Output = Self;

    /// Flips the complement tag. The absent reference is its own complement.
    #[inline(always)]
    fn not(self) -> Self::Output {
        if self.is_none() {
            self
        } else {
            Self(self.0 ^ 1)
        }
    }
}

impl ops::BitXor<bool> for NodeRef {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: bool) -> Self::Output {
        if rhs {
            !self
        } else {
            self
        }
    }
}

impl ops::BitXor<Pol> for NodeRef {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Pol) -> Self::Output {
        self ^ rhs.is_neg()
    }
}

impl ops::BitXorAssign<bool> for NodeRef {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: bool) {
        *self = *self ^ rhs;
    }
}

impl ops::BitXorAssign<Pol> for NodeRef {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Pol) {
        *self = *self ^ rhs;
    }
}
