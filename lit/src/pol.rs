//! Edge polarities.
use std::ops;

/// Either the identity function on, or negation of Booleans.
///
/// This is used for the polarity of an edge in a network. Using a separate type instead of a
/// `bool` avoids having to remember whether `true` means "complemented" or "plain" at every use
/// site.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Pol {
    /// Positive polarity, represents the identity function.
    #[default]
    Pos = 0,
    /// Negative polarity, represents Boolean negation.
    Neg = 1,
}

impl std::fmt::Debug for Pol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for Pol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pos => write!(f, "="),
            Self::Neg => write!(f, "!"),
        }
    }
}

impl Pol {
    /// Returns the negative polarity if the given condition is `true` and a positive polarity
    /// otherwise.
    #[inline(always)]
    pub fn neg_if(neg: bool) -> Self {
        if neg {
            Pol::Neg
        } else {
            Pol::Pos
        }
    }

    /// Returns the positive polarity if the given condition is `true` and a negative polarity
    /// otherwise.
    #[inline(always)]
    pub fn pos_if(pos: bool) -> Self {
        Self::neg_if(!pos)
    }

    /// Returns `true` when this is the negative polarity.
    #[inline(always)]
    pub fn is_neg(self) -> bool {
        self == Pol::Neg
    }

    /// Returns `true` when this is the positive polarity.
    #[inline(always)]
    pub fn is_pos(self) -> bool {
        self == Pol::Pos
    }

    /// Applies this polarity to a Boolean value.
    #[inline(always)]
    pub fn apply(self, value: bool) -> bool {
        value ^ self.is_neg()
    }
}

impl ops::BitXor for Pol {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Pol::neg_if(self.is_neg() ^ rhs.is_neg())
    }
}

impl ops::BitXorAssign for Pol {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs
    }
}

impl ops::BitXor<bool> for Pol {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: bool) -> Self::Output {
        Pol::neg_if(self.is_neg() ^ rhs)
    }
}

impl ops::Not for Pol {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        self ^ Pol::Neg
    }
}

impl From<Pol> for bool {
    /// Returns `true` for [`Pol::Neg`].
    fn from(pol: Pol) -> Self {
        pol.is_neg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition() {
        for a in [Pol::Pos, Pol::Neg] {
            for b in [Pol::Pos, Pol::Neg] {
                for x in [false, true] {
                    assert_eq!((a ^ b).apply(x), b.apply(a.apply(x)));
                }
            }
            assert_eq!(!!a, a);
            assert_eq!(a ^ false, a);
            assert_eq!(a ^ true, !a);
        }
        assert_eq!(Pol::default(), Pol::Pos);
        assert_eq!(format!("{}{}", Pol::Pos, Pol::Neg), "=!");
    }
}
