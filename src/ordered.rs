use crate::{
    mapping::{Entries, Mapping, MappingMut},
    order::{KeyOrder, Natural},
};
use std::{
    cmp::{Eq, PartialEq},
    fmt::{self, Debug, Formatter},
    iter::{self, FromIterator},
    ops::Index,
    slice, vec,
};

/// A finite map that keeps its keys sorted under a configurable
/// order. Two keys are the same key when the order says they compare
/// `Equal`, so a custom order also decides key identity.
///
/// Keys and values live in two parallel sorted vectors, so lookups
/// are a binary search, and iteration, first, last, and positional
/// access are all cheap. Inserting or removing is linear in the
/// number of entries that have to shift, which is fine for the small
/// boundary sets range maps are built from.
///
/// # Examples
/// ```
/// use mapkit::{ordered::OrderedKeyMap, order::Reversed, order::Natural};
///
/// let mut m = OrderedKeyMap::with_order(Reversed(Natural));
/// m.insert(1, "one");
/// m.insert(3, "three");
/// m.insert(2, "two");
///
/// assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// assert_eq!(m.first(), Some((&3, &"three")));
/// assert_eq!(m.nth(-1), Some((&1, &"one")));
/// ```
#[derive(Clone)]
pub struct OrderedKeyMap<K, V, C = Natural> {
    keys: Vec<K>,
    vals: Vec<V>,
    order: C,
}

impl<K, V, C> Debug for OrderedKeyMap<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for OrderedKeyMap<K, V, C> {
    fn default() -> Self {
        OrderedKeyMap::with_order(C::default())
    }
}

impl<K, V, C> PartialEq for OrderedKeyMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &OrderedKeyMap<K, V, C>) -> bool {
        self.keys == other.keys && self.vals == other.vals
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedKeyMap<K, V, C> {}

impl<'a, K, V, C> Index<&'a K> for OrderedKeyMap<K, V, C>
where
    C: KeyOrder<K>,
{
    type Output = V;
    fn index(&self, k: &K) -> &V {
        self.get(k).expect("element not found for key")
    }
}

impl<K, V, C> FromIterator<(K, V)> for OrderedKeyMap<K, V, C>
where
    C: KeyOrder<K> + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = OrderedKeyMap::default();
        m.extend(iter);
        m
    }
}

impl<K, V, C> Extend<(K, V)> for OrderedKeyMap<K, V, C>
where
    C: KeyOrder<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

pub type Iter<'a, K, V> = iter::Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>;

impl<'a, K, V, C> IntoIterator for &'a OrderedKeyMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for OrderedKeyMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = iter::Zip<vec::IntoIter<K>, vec::IntoIter<V>>;
    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.vals)
    }
}

impl<K: Ord, V> OrderedKeyMap<K, V, Natural> {
    /// Create a new empty map ordered by the key's `Ord`
    pub fn new() -> Self {
        OrderedKeyMap::with_order(Natural)
    }
}

impl<K, V, C> OrderedKeyMap<K, V, C> {
    /// Create a new empty map ordered by `order`
    pub fn with_order(order: C) -> Self {
        OrderedKeyMap {
            keys: Vec::new(),
            vals: Vec::new(),
            order,
        }
    }

    pub fn order(&self) -> &C {
        &self.order
    }

    /// get the number of elements in the map O(1) time and space
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.vals.clear();
    }

    /// iterate over the bindings in ascending order
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.keys.iter().zip(self.vals.iter())
    }

    pub fn keys(&self) -> slice::Iter<'_, K> {
        self.keys.iter()
    }

    pub fn values(&self) -> slice::Iter<'_, V> {
        self.vals.iter()
    }

    pub fn values_mut(&mut self) -> slice::IterMut<'_, V> {
        self.vals.iter_mut()
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.kv(0)
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.len().checked_sub(1).and_then(|i| self.kv(i))
    }

    /// the binding at position `i` in sorted order. Negative positions
    /// count back from the end, so -1 is the last binding.
    pub fn nth(&self, i: isize) -> Option<(&K, &V)> {
        self.resolve_position(i).and_then(|i| self.kv(i))
    }

    pub(crate) fn resolve_position(&self, i: isize) -> Option<usize> {
        if i >= 0 {
            let i = i as usize;
            if i < self.len() {
                Some(i)
            } else {
                None
            }
        } else {
            self.len().checked_sub(i.unsigned_abs())
        }
    }

    fn kv(&self, i: usize) -> Option<(&K, &V)> {
        match (self.keys.get(i), self.vals.get(i)) {
            (Some(k), Some(v)) => Some((k, v)),
            _ => None,
        }
    }

    /// keep only the bindings for which `f` returns true
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let keep: Vec<bool> = self
            .keys
            .iter()
            .zip(self.vals.iter_mut())
            .map(|(k, v)| f(k, v))
            .collect();
        // Vec::retain visits elements in order, exactly once each
        let mut flags = keep.iter();
        self.keys.retain(|_| flags.next().copied().unwrap_or(false));
        let mut flags = keep.iter();
        self.vals.retain(|_| flags.next().copied().unwrap_or(false));
    }
}

impl<K, V, C> OrderedKeyMap<K, V, C>
where
    C: KeyOrder<K>,
{
    fn locate(&self, k: &K) -> Result<usize, usize> {
        let order = &self.order;
        self.keys.binary_search_by(|probe| order.compare(probe, k))
    }

    /// insert (k, v). If a key the order considers equal to k is
    /// already present, its value is replaced and returned, and the
    /// stored key is kept.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        match self.locate(&k) {
            Ok(i) => Some(std::mem::replace(&mut self.vals[i], v)),
            Err(i) => {
                self.keys.insert(i, k);
                self.vals.insert(i, v);
                None
            }
        }
    }

    /// lookup the mapping for k. Runs in log(N) time.
    pub fn get(&self, k: &K) -> Option<&V> {
        self.locate(k).ok().map(|i| &self.vals[i])
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        match self.locate(k) {
            Ok(i) => Some(&mut self.vals[i]),
            Err(_) => None,
        }
    }

    pub fn get_key_value(&self, k: &K) -> Option<(&K, &V)> {
        self.locate(k).ok().and_then(|i| self.kv(i))
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.locate(k).is_ok()
    }

    pub fn remove(&mut self, k: &K) -> Option<V> {
        match self.locate(k) {
            Ok(i) => {
                self.keys.remove(i);
                Some(self.vals.remove(i))
            }
            Err(_) => None,
        }
    }
}

#[cfg(feature = "rayon")]
impl<K: Sync, V: Sync, C> OrderedKeyMap<K, V, C> {
    /// iterate over the bindings in parallel, in ascending order when
    /// collected
    pub fn par_iter(
        &self,
    ) -> rayon::iter::Zip<rayon::slice::Iter<'_, K>, rayon::slice::Iter<'_, V>> {
        use rayon::prelude::*;
        self.keys.par_iter().zip(self.vals.par_iter())
    }
}

impl<K, V, C: KeyOrder<K>> Mapping for OrderedKeyMap<K, V, C> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<K, V, C: KeyOrder<K>> MappingMut for OrderedKeyMap<K, V, C> {
    fn lookup_mut(&mut self, key: &K) -> Option<&mut V> {
        self.get_mut(key)
    }

    fn store(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn discard(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::OrderedKeyMap;
    use crate::order::KeyOrder;
    use serde::{
        de::{Deserialize, Deserializer, SeqAccess, Visitor},
        ser::{Serialize, SerializeSeq, Serializer},
    };
    use std::{fmt, marker::PhantomData};

    impl<K, V, C> Serialize for OrderedKeyMap<K, V, C>
    where
        K: Serialize,
        V: Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for kv in self.iter() {
                seq.serialize_element(&kv)?;
            }
            seq.end()
        }
    }

    impl<'de, K, V, C> Deserialize<'de> for OrderedKeyMap<K, V, C>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        C: KeyOrder<K> + Default,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(OrderedKeyMapVisitor(PhantomData))
        }
    }

    struct OrderedKeyMapVisitor<K, V, C>(PhantomData<fn() -> OrderedKeyMap<K, V, C>>);

    impl<'de, K, V, C> Visitor<'de> for OrderedKeyMapVisitor<K, V, C>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        C: KeyOrder<K> + Default,
    {
        type Value = OrderedKeyMap<K, V, C>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a sequence of (key, value) pairs")
        }

        fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut m = OrderedKeyMap::default();
            while let Some((k, v)) = access.next_element()? {
                m.insert(k, v);
            }
            Ok(m)
        }
    }
}
