use crate::mapping::{Entries, Mapping, MappingMut};
use std::{
    collections::HashMap,
    fmt::{self, Debug, Display, Formatter},
};

/// Normalizes a supplied key of type `Q` into the stored key type `K`.
/// Transforms should be pure: the same input always yields the same
/// key. Distinct inputs may collide.
pub trait KeyTransform<Q: ?Sized, K> {
    fn transform(&self, key: &Q) -> K;
}

impl<Q: ?Sized, K, F> KeyTransform<Q, K> for F
where
    F: Fn(&Q) -> K,
{
    fn transform(&self, key: &Q) -> K {
        self(key)
    }
}

/// Case-insensitive string keys: every key is folded to lower case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FoldCase;

impl<Q: AsRef<str> + ?Sized> KeyTransform<Q, String> for FoldCase {
    fn transform(&self, key: &Q) -> String {
        key.as_ref().to_lowercase()
    }
}

/// Every key is stored as its `Display` rendering, so `3` and `"3"`
/// name the same entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stringify;

impl<Q: Display + ?Sized> KeyTransform<Q, String> for Stringify {
    fn transform(&self, key: &Q) -> String {
        key.to_string()
    }
}

/// A map that passes every key through a transform before storing or
/// looking it up. Only the transformed key is kept, so iteration yields
/// transformed keys, and writes under two keys that transform alike
/// land on the same entry.
///
/// The backing store `S` is any `MappingMut` keyed by the transformed
/// key, a `HashMap` by default.
///
/// # Examples
/// ```
/// use mapkit::transform::FoldedCaseMap;
///
/// let mut m = FoldedCaseMap::default();
/// m.insert("heLlo", "world");
/// m.insert("HELLO", "world2");
///
/// assert_eq!(m.len(), 1);
/// assert_eq!(m.get("hello"), Some(&"world2"));
/// assert!(m.contains_key("Hello"));
/// assert_eq!(m.keys().collect::<Vec<_>>(), vec!["hello"]);
/// ```
#[derive(Clone)]
pub struct KeyTransformingMap<K, V, T, S = HashMap<K, V>> {
    store: S,
    transform: T,
    _key: std::marker::PhantomData<fn() -> (K, V)>,
}

/// case-insensitive string keyed map
pub type FoldedCaseMap<V> = KeyTransformingMap<String, V, FoldCase>;

/// map whose keys are always strings
pub type StringKeyMap<V> = KeyTransformingMap<String, V, Stringify>;

impl<K, V, T, S: Debug> Debug for KeyTransformingMap<K, V, T, S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.store, f)
    }
}

impl<K, V, T, S> Default for KeyTransformingMap<K, V, T, S>
where
    T: Default,
    S: Default,
{
    fn default() -> Self {
        KeyTransformingMap::new(T::default())
    }
}

impl<K, V, T, S: PartialEq> PartialEq for KeyTransformingMap<K, V, T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}

impl<K, V, T, S> KeyTransformingMap<K, V, T, S> {
    /// an empty map applying `transform` to every key
    pub fn new(transform: T) -> Self
    where
        S: Default,
    {
        KeyTransformingMap::with_store(transform, S::default())
    }

    fn with_store(transform: T, store: S) -> Self {
        KeyTransformingMap {
            store,
            transform,
            _key: std::marker::PhantomData,
        }
    }

    pub fn transformer(&self) -> &T {
        &self.transform
    }

    /// the backing store, keyed by transformed keys
    pub fn backing(&self) -> &S {
        &self.store
    }

    pub fn into_backing(self) -> S {
        self.store
    }
}

impl<K, V, T, S> KeyTransformingMap<K, V, T, S>
where
    S: MappingMut<Key = K, Value = V>,
{
    /// Build a map from `(key, value)` pairs, transforming each key in
    /// source order, so a later pair overwrites an earlier one whose key
    /// transforms the same.
    pub fn from_entries<Q, I>(transform: T, entries: I) -> Self
    where
        S: Default,
        T: KeyTransform<Q, K>,
        I: IntoIterator<Item = (Q, V)>,
    {
        let mut m = KeyTransformingMap::new(transform);
        m.extend(entries);
        m
    }

    /// the transformed form of `key`
    pub fn normalize<Q: ?Sized>(&self, key: &Q) -> K
    where
        T: KeyTransform<Q, K>,
    {
        self.transform.transform(key)
    }

    pub fn insert<Q: ?Sized>(&mut self, key: &Q, value: V) -> Option<V>
    where
        T: KeyTransform<Q, K>,
    {
        let k = self.normalize(key);
        self.store.store(k, value)
    }

    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        T: KeyTransform<Q, K>,
    {
        self.store.lookup(&self.normalize(key))
    }

    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        T: KeyTransform<Q, K>,
    {
        let k = self.normalize(key);
        self.store.lookup_mut(&k)
    }

    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        T: KeyTransform<Q, K>,
    {
        self.store.contains(&self.normalize(key))
    }

    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        T: KeyTransform<Q, K>,
    {
        let k = self.normalize(key);
        self.store.discard(&k)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// the stored bindings, under their transformed keys
    pub fn iter(&self) -> Entries<'_, K, V> {
        self.store.entries()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.store.entries().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.store.entries().map(|(_, v)| v)
    }
}

impl<Q, K, V, T, S> Extend<(Q, V)> for KeyTransformingMap<K, V, T, S>
where
    T: KeyTransform<Q, K>,
    S: MappingMut<Key = K, Value = V>,
{
    fn extend<I: IntoIterator<Item = (Q, V)>>(&mut self, iter: I) {
        for (q, v) in iter {
            self.insert(&q, v);
        }
    }
}

impl<K, V, T, S> Mapping for KeyTransformingMap<K, V, T, S>
where
    T: KeyTransform<K, K>,
    S: MappingMut<Key = K, Value = V>,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn entries(&self) -> Entries<'_, K, V> {
        self.store.entries()
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}

impl<K, V, T, S> MappingMut for KeyTransformingMap<K, V, T, S>
where
    T: KeyTransform<K, K>,
    S: MappingMut<Key = K, Value = V>,
{
    fn lookup_mut(&mut self, key: &K) -> Option<&mut V> {
        self.get_mut(key)
    }

    fn store(&mut self, key: K, value: V) -> Option<V> {
        self.insert(&key, value)
    }

    fn discard(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{KeyTransform, KeyTransformingMap};
    use crate::mapping::MappingMut;
    use serde::{
        de::{Deserialize, Deserializer, MapAccess, Visitor},
        ser::{Serialize, SerializeMap, Serializer},
    };
    use std::{fmt, marker::PhantomData};

    impl<K, V, T, S> Serialize for KeyTransformingMap<K, V, T, S>
    where
        K: Serialize,
        V: Serialize,
        S: MappingMut<Key = K, Value = V>,
    {
        fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
        where
            Ser: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    /// keys are transformed again on the way in, so a map serialized
    /// elsewhere with raw keys still folds correctly
    impl<'de, K, V, T, S> Deserialize<'de> for KeyTransformingMap<K, V, T, S>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        T: KeyTransform<K, K> + Default,
        S: MappingMut<Key = K, Value = V> + Default,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(TransformingVisitor(PhantomData))
        }
    }

    struct TransformingVisitor<K, V, T, S>(PhantomData<fn() -> KeyTransformingMap<K, V, T, S>>);

    impl<'de, K, V, T, S> Visitor<'de> for TransformingVisitor<K, V, T, S>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        T: KeyTransform<K, K> + Default,
        S: MappingMut<Key = K, Value = V> + Default,
    {
        type Value = KeyTransformingMap<K, V, T, S>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut m = KeyTransformingMap::new(T::default());
            while let Some((k, v)) = access.next_entry::<K, V>()? {
                m.insert(&k, v);
            }
            Ok(m)
        }
    }
}
