//! Conversions into arbitrary-precision positions.

use num_bigint::BigUint;

/// Anything usable as a position or length argument.
///
/// Machine integers cover the common case; [`BigUint`] reaches positions in
/// sequences that sharing has made longer than any machine word.
pub trait IntoPosition {
    /// Converts into a [`BigUint`].
    fn into_position(self) -> BigUint;
}

macro_rules! impl_into_position {
    ($($integer:ty),*) => {
        $(
            impl IntoPosition for $integer {
                #[inline]
                fn into_position(self) -> BigUint {
                    BigUint::from(self)
                }
            }
        )*
    };
}

impl_into_position!(usize, u32, u64, u128);

impl IntoPosition for BigUint {
    #[inline]
    fn into_position(self) -> BigUint {
        self
    }
}

impl IntoPosition for &BigUint {
    #[inline]
    fn into_position(self) -> BigUint {
        self.clone()
    }
}
