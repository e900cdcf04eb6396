//! A map that uses its keys as the bounds of spans.
//!
//! Each boundary key owns the span of lookup keys that "match" it under
//! the map's match predicate, and a lookup resolves to the value of the
//! first matching boundary in ascending order. With the default
//! predicate (lookup <= boundary) a key maps to the nearest boundary at
//! or above it, so spans are open below and closed above:
//!
//! ```
//! use mapkit::range::{RangeMap, RangeValue, Position};
//!
//! // 1-3 -> 'a', 4-6 -> 'b'
//! let r: RangeMap<i32, char> = vec![(3, 'a'), (6, 'b')].into_iter().collect();
//! assert_eq!(r.get(&1), Ok(&'a'));
//! assert_eq!(r.get(&3), Ok(&'a'));
//! assert_eq!(r.get(&4), Ok(&'b'));
//! assert_eq!(r.get(&-1), Ok(&'a'));
//! assert!(r.get(&7).is_err());
//!
//! // close the open end with the sentinel
//! let mut r = r;
//! r.insert_undefined(0);
//! assert!(r.get(&0).is_err());
//! assert_eq!(r.get_at(Position::Last), Ok(&'b'));
//! assert_eq!(r.bounds(), Ok((&0, &6)));
//! ```
use crate::{
    error::{Error, Result},
    order::{KeyMatch, KeyOrder, LessOrEqual, Natural},
    ordered::OrderedKeyMap,
};
use log::trace;
use std::{
    fmt::{self, Debug, Formatter},
    iter::FromIterator,
};

/// The value stored at a boundary. `Undefined` marks a span that is
/// explicitly unmapped: resolving to it is `NotFound`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeValue<V> {
    Value(V),
    Undefined,
}

impl<V> RangeValue<V> {
    pub fn as_option(&self) -> Option<&V> {
        match self {
            RangeValue::Value(v) => Some(v),
            RangeValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, RangeValue::Undefined)
    }
}

impl<V> From<V> for RangeValue<V> {
    fn from(v: V) -> Self {
        RangeValue::Value(v)
    }
}

impl<V> From<RangeValue<V>> for Option<V> {
    fn from(v: RangeValue<V>) -> Option<V> {
        match v {
            RangeValue::Value(v) => Some(v),
            RangeValue::Undefined => None,
        }
    }
}

/// Addresses a boundary by its position in sorted order instead of
/// through the match predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    First,
    Last,
    /// negative indexes count back from the end, -1 is the last boundary
    Index(isize),
}

impl Position {
    fn index(self) -> isize {
        match self {
            Position::First => 0,
            Position::Last => -1,
            Position::Index(i) => i,
        }
    }
}

#[derive(Clone)]
pub struct RangeMap<K, V, C = Natural, M = LessOrEqual> {
    entries: OrderedKeyMap<K, RangeValue<V>, C>,
    matcher: M,
}

impl<K, V, C: Default, M: Default> Default for RangeMap<K, V, C, M> {
    fn default() -> Self {
        RangeMap::with_policy(C::default(), M::default())
    }
}

impl<K, V, C, M> Debug for RangeMap<K, V, C, M>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.entries.fmt(f)
    }
}

impl<K, V, C, M> PartialEq for RangeMap<K, V, C, M>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V, T, C, M> FromIterator<(K, T)> for RangeMap<K, V, C, M>
where
    T: Into<RangeValue<V>>,
    C: KeyOrder<K> + Default,
    M: Default,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut r = RangeMap::with_policy(C::default(), M::default());
        r.extend(iter);
        r
    }
}

impl<K, V, T, C, M> Extend<(K, T)> for RangeMap<K, V, C, M>
where
    T: Into<RangeValue<V>>,
    C: KeyOrder<K>,
{
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k, v.into())))
    }
}

impl<K: Ord, V> RangeMap<K, V> {
    /// An empty map with ascending boundaries and the lookup <= boundary
    /// predicate.
    pub fn new() -> Self {
        RangeMap::with_policy(Natural, LessOrEqual)
    }
}

impl<K, V, C> RangeMap<K, V, C> {
    /// An empty map sorting its boundaries by `order`, matching with
    /// lookup <= boundary.
    pub fn with_order(order: C) -> Self {
        RangeMap::with_policy(order, LessOrEqual)
    }
}

impl<K, V, C, M> RangeMap<K, V, C, M> {
    pub fn with_policy(order: C, matcher: M) -> Self {
        RangeMap {
            entries: OrderedKeyMap::with_order(order),
            matcher,
        }
    }

    /// the boundary bindings, sorted under the active order
    pub fn entries(&self) -> &OrderedKeyMap<K, RangeValue<V>, C> {
        &self.entries
    }

    /// raw access to the boundary bindings. Lookups always see the
    /// current contents.
    pub fn entries_mut(&mut self) -> &mut OrderedKeyMap<K, RangeValue<V>, C> {
        &mut self.entries
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &RangeValue<V>)> {
        self.entries.iter()
    }

    /// the smallest and largest boundary keys under the active order
    pub fn bounds(&self) -> Result<(&K, &K)> {
        match (self.entries.first(), self.entries.last()) {
            (Some((lo, _)), Some((hi, _))) => Ok((lo, hi)),
            _ => Err(Error::EmptyCollection("range map")),
        }
    }

    /// the value stored at a positional boundary
    pub fn get_at(&self, pos: Position) -> Result<&V> {
        if self.entries.is_empty() {
            return Err(Error::EmptyCollection("range map"));
        }
        let index = pos.index();
        match self.entries.nth(index) {
            None => Err(Error::OutOfRange {
                index,
                len: self.entries.len(),
            }),
            Some((_, RangeValue::Value(v))) => Ok(v),
            Some((_, RangeValue::Undefined)) => {
                trace!("position {:?} holds an undefined span", pos);
                Err(Error::NotFound)
            }
        }
    }

    /// the first boundary, in ascending order, that `key` matches. The
    /// boundary may hold the undefined sentinel.
    pub fn matching_boundary<Q>(&self, key: &Q) -> Result<&K>
    where
        Q: ?Sized,
        M: KeyMatch<Q, K>,
    {
        self.find_first_match(key).map(|(k, _)| k)
    }

    fn find_first_match<Q>(&self, key: &Q) -> Result<(&K, &RangeValue<V>)>
    where
        Q: ?Sized,
        M: KeyMatch<Q, K>,
    {
        let matcher = &self.matcher;
        match self.entries.iter().find(|&(b, _)| matcher.matches(key, b)) {
            Some(kv) => Ok(kv),
            None => {
                trace!("no boundary matches among {} boundaries", self.len());
                Err(Error::NotFound)
            }
        }
    }

    /// resolve `key` to the value of the first boundary it matches
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        Q: ?Sized,
        M: KeyMatch<Q, K>,
    {
        match self.find_first_match(key)? {
            (_, RangeValue::Value(v)) => Ok(v),
            (_, RangeValue::Undefined) => {
                trace!("lookup resolved to an undefined span");
                Err(Error::NotFound)
            }
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        M: KeyMatch<Q, K>,
    {
        self.get(key).is_ok()
    }
}

impl<K, V, C, M> RangeMap<K, V, C, M>
where
    C: KeyOrder<K>,
{
    /// bind boundary `k` to `v`, replacing any value already there
    pub fn insert(&mut self, k: K, v: V) -> Option<RangeValue<V>> {
        self.entries.insert(k, RangeValue::Value(v))
    }

    /// mark the span owned by `k` as explicitly unmapped
    pub fn insert_undefined(&mut self, k: K) -> Option<RangeValue<V>> {
        self.entries.insert(k, RangeValue::Undefined)
    }

    pub fn remove(&mut self, k: &K) -> Option<RangeValue<V>> {
        self.entries.remove(k)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{RangeMap, RangeValue};
    use crate::order::KeyOrder;
    use serde::{
        de::{Deserialize, Deserializer, SeqAccess, Visitor},
        ser::{Serialize, SerializeSeq, Serializer},
    };
    use std::{fmt, marker::PhantomData};

    impl<K, V, C, M> Serialize for RangeMap<K, V, C, M>
    where
        K: Serialize,
        V: Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (k, v) in self.iter() {
                seq.serialize_element(&(k, v.as_option()))?;
            }
            seq.end()
        }
    }

    impl<'de, K, V, C, M> Deserialize<'de> for RangeMap<K, V, C, M>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        C: KeyOrder<K> + Default,
        M: Default,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(RangeMapVisitor(PhantomData))
        }
    }

    struct RangeMapVisitor<K, V, C, M>(PhantomData<fn() -> RangeMap<K, V, C, M>>);

    impl<'de, K, V, C, M> Visitor<'de> for RangeMapVisitor<K, V, C, M>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        C: KeyOrder<K> + Default,
        M: Default,
    {
        type Value = RangeMap<K, V, C, M>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a sequence of (boundary, optional value) pairs")
        }

        fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut r = RangeMap::with_policy(C::default(), M::default());
            while let Some((k, v)) = access.next_element::<(K, Option<V>)>()? {
                let v = match v {
                    Some(v) => RangeValue::Value(v),
                    None => RangeValue::Undefined,
                };
                r.entries.insert(k, v);
            }
            Ok(r)
        }
    }
}
