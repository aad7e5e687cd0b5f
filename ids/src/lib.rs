//! Type checked integer ids and id indexed vectors.
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::undocumented_unsafe_blocks)]

mod id;
pub mod id_vec;

pub use id::Id;

/// Defines a `u32` backed newtype implementing [`Id`].
///
/// The largest representable index is `u32::MAX - 1`, leaving `u32::MAX` free for use as a
/// sentinel by containing types.
///
/// ```
/// ntk_ids::define_id! {
///     /// Identifies a widget.
///     pub struct WidgetId;
/// }
///
/// use ntk_ids::Id;
/// assert_eq!(WidgetId::from_id_index(3).id_index(), 3);
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        $vis struct $name(u32);

        impl $crate::Id for $name {
            const MAX_ID_INDEX: usize = (u32::MAX - 1) as usize;

            #[inline(always)]
            fn try_from_id_index(index: usize) -> Option<Self> {
                if index <= Self::MAX_ID_INDEX {
                    Some(Self(index as u32))
                } else {
                    None
                }
            }

            #[inline(always)]
            fn id_index(self) -> usize {
                self.0 as usize
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}
