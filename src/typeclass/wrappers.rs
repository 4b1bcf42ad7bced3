//! Newtypes that pick one monoid out of the several a number carries.
//!
//! Wrapping the mapped value is usually all a [`FoldMap`] needs:
//! `FoldMap::new(|price: &u32| Sum(u64::from(*price)))` keeps a running
//! total, `Max` a running peak.
//!
//! [`FoldMap`]: crate::persistent::FoldMap

/// Aggregates by `+`, starting from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sum<A>(pub A);

/// Aggregates by `*`, starting from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Product<A>(pub A);

/// Keeps the greatest value, starting from the type's minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Max<A>(pub A);

/// Keeps the least value, starting from the type's maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Min<A>(pub A);

macro_rules! unwrap_into_inner {
    ($($wrapper:ident),*) => {
        $(
            impl<A> $wrapper<A> {
                /// Returns the aggregated value.
                #[inline]
                pub fn into_inner(self) -> A {
                    self.0
                }
            }

            impl<A> From<A> for $wrapper<A> {
                #[inline]
                fn from(value: A) -> Self {
                    Self(value)
                }
            }
        )*
    };
}

unwrap_into_inner!(Sum, Product, Max, Min);
