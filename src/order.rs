//! Ordering and matching policies for ordered and range maps.
//!
//! A `KeyOrder` is a total order over keys. Two keys are the same key
//! when the order says they are `Equal`. A `KeyMatch` decides whether a
//! lookup key falls into the span owned by a boundary key.
//!
//! Plain closures work for both:
//!
//! ```
//! use std::cmp::Ordering;
//! use mapkit::order::{KeyOrder, KeyMatch};
//!
//! let descending = |a: &i32, b: &i32| b.cmp(a);
//! assert_eq!(descending.compare(&1, &2), Ordering::Greater);
//!
//! let within_ten = |q: &i32, b: &i32| (b - q).abs() <= 10;
//! assert!(within_ten.matches(&5, &12));
//! ```
use std::{cmp::Ordering, fmt::{self, Debug, Formatter}};

pub trait KeyOrder<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own `Ord`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> KeyOrder<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// The inverse of another order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: KeyOrder<K>> KeyOrder<K> for Reversed<C> {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Orders keys by a derived sort key, e.g. the reversed spelling of a
/// string, or the absolute value of a number. Keys with equal derived
/// keys fall back to their own `Ord`, so `-3` and `3` under `abs` stay
/// two distinct keys, `-3` first.
#[derive(Clone, Copy, Default)]
pub struct ByKey<F>(pub F);

impl<F> Debug for ByKey<F> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("ByKey(..)")
    }
}

impl<K, T, F> KeyOrder<K> for ByKey<F>
where
    K: Ord + ?Sized,
    T: Ord,
    F: Fn(&K) -> T,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a).cmp(&(self.0)(b)).then_with(|| a.cmp(b))
    }
}

impl<K: ?Sized, F> KeyOrder<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Decides whether `lookup` falls inside the span owned by `boundary`.
pub trait KeyMatch<Q: ?Sized, K: ?Sized> {
    fn matches(&self, lookup: &Q, boundary: &K) -> bool;
}

macro_rules! comparison_match {
    ($(#[$doc:meta])* $name:ident, $op:tt) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl<Q, K> KeyMatch<Q, K> for $name
        where
            Q: PartialOrd<K> + ?Sized,
            K: ?Sized,
        {
            fn matches(&self, lookup: &Q, boundary: &K) -> bool {
                lookup $op boundary
            }
        }
    };
}

comparison_match!(
    /// lookup <= boundary: spans are open below and closed above. This is
    /// the default.
    LessOrEqual, <=
);
comparison_match!(
    /// lookup < boundary: the boundary itself belongs to the next span
    Less, <
);
comparison_match!(
    /// lookup >= boundary, for maps ordered descending
    GreaterOrEqual, >=
);
comparison_match!(Greater, >);

impl<Q: ?Sized, K: ?Sized, F> KeyMatch<Q, K> for F
where
    F: Fn(&Q, &K) -> bool,
{
    fn matches(&self, lookup: &Q, boundary: &K) -> bool {
        self(lookup, boundary)
    }
}
