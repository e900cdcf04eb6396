//! A sub-map view selected by a set of keys.
//!
//! ```
//! use std::collections::{HashMap, HashSet};
//! use mapkit::filter::{KeyPattern, SubsetView};
//!
//! let sample: HashMap<String, i32> =
//!     vec![("a", 1), ("b", 2), ("c", 3), ("ef", 5)]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v))
//!         .collect();
//!
//! let wanted: HashSet<String> = vec!["a".to_string(), "c".to_string()].into_iter().collect();
//! let filtered = SubsetView::new(&sample, wanted);
//! assert_eq!(filtered.len(), 2);
//! assert!(filtered.get(&"b".to_string()).is_err());
//!
//! // only single character keys
//! let single = SubsetView::new(&sample, KeyPattern::new(".$").unwrap());
//! assert_eq!(single.len(), 3);
//! ```
use crate::{
    error::{Error, Result},
    mapping::{Entries, Mapping},
};
use regex::Regex;
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    hash::{BuildHasher, Hash},
};

/// Membership test for the keys a view includes.
pub trait KeySet<K: ?Sized> {
    fn includes(&self, key: &K) -> bool;
}

impl<K: Hash + Eq, S: BuildHasher> KeySet<K> for HashSet<K, S> {
    fn includes(&self, key: &K) -> bool {
        self.contains(key)
    }
}

impl<K: Ord> KeySet<K> for BTreeSet<K> {
    fn includes(&self, key: &K) -> bool {
        self.contains(key)
    }
}

impl<K: PartialEq> KeySet<K> for [K] {
    fn includes(&self, key: &K) -> bool {
        self.contains(key)
    }
}

impl<K: PartialEq, const N: usize> KeySet<K> for [K; N] {
    fn includes(&self, key: &K) -> bool {
        self.contains(key)
    }
}

impl<K: PartialEq> KeySet<K> for Vec<K> {
    fn includes(&self, key: &K) -> bool {
        self.contains(key)
    }
}

impl<'a, K: ?Sized, S: KeySet<K> + ?Sized> KeySet<K> for &'a S {
    fn includes(&self, key: &K) -> bool {
        (**self).includes(key)
    }
}

/// the union of two key sets
impl<K: ?Sized, A: KeySet<K>, B: KeySet<K>> KeySet<K> for (A, B) {
    fn includes(&self, key: &K) -> bool {
        self.0.includes(key) || self.1.includes(key)
    }
}

/// A collection containing every possible key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Everything;

impl<K: ?Sized> KeySet<K> for Everything {
    fn includes(&self, _key: &K) -> bool {
        true
    }
}

/// String keys matching a regular expression at their start, the way a
/// pattern `match` (not `search`) behaves. As with `match`, an end anchor
/// `$` also matches just before a single trailing newline, so `.$`
/// includes `"a\n"`.
#[derive(Clone, Debug)]
pub struct KeyPattern(Regex);

impl KeyPattern {
    /// compile `pattern`. A pattern that does not compile is rejected
    /// here, not on first use.
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(KeyPattern)
            .map_err(|e| Error::invalid_arg("pattern", e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn matches_at_start(&self, s: &str) -> bool {
        // the leftmost match starts at 0 whenever any match does
        self.0.find(s).map_or(false, |m| m.start() == 0)
    }
}

impl<K: AsRef<str> + ?Sized> KeySet<K> for KeyPattern {
    fn includes(&self, key: &K) -> bool {
        let key = key.as_ref();
        self.matches_at_start(key)
            || key
                .strip_suffix('\n')
                .map_or(false, |head| self.matches_at_start(head))
    }
}

/// A live view of the entries of `map` whose keys are in `include`.
/// The key set is recomputed from the map on every call, so changes to
/// the map between calls show through.
#[derive(Clone, Debug)]
pub struct SubsetView<'a, M, S> {
    map: &'a M,
    include: S,
}

impl<'a, M, S> SubsetView<'a, M, S>
where
    M: Mapping,
    S: KeySet<M::Key>,
{
    pub fn new(map: &'a M, include: S) -> Self {
        SubsetView { map, include }
    }

    pub fn include(&self) -> &S {
        &self.include
    }

    /// the included keys present in the map
    pub fn keys(&self) -> impl Iterator<Item = &'a M::Key> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &'a M::Value> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a M::Key, &'a M::Value)> + '_ {
        let map: &'a M = self.map;
        let include = &self.include;
        map.entries().filter(move |(k, _)| include.includes(*k))
    }

    /// the value for an included key. Excluded keys are `NotFound` even
    /// when the underlying map has them.
    pub fn get(&self, key: &M::Key) -> Result<&'a M::Value> {
        if !self.include.includes(key) {
            return Err(Error::NotFound);
        }
        let map: &'a M = self.map;
        map.lookup(key).ok_or(Error::NotFound)
    }

    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.include.includes(key) && self.map.contains(key)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// copy the visible entries out
    pub fn to_hash_map(&self) -> HashMap<M::Key, M::Value>
    where
        M::Key: Hash + Eq + Clone,
        M::Value: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<'a, M, S, H> PartialEq<HashMap<M::Key, M::Value, H>> for SubsetView<'a, M, S>
where
    M: Mapping,
    M::Key: Hash + Eq,
    M::Value: PartialEq,
    S: KeySet<M::Key>,
    H: BuildHasher,
{
    fn eq(&self, other: &HashMap<M::Key, M::Value, H>) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k).map_or(false, |o| o == v))
    }
}

impl<'a, M, S> Mapping for SubsetView<'a, M, S>
where
    M: Mapping,
    S: KeySet<M::Key>,
{
    type Key = M::Key;
    type Value = M::Value;

    fn lookup(&self, key: &M::Key) -> Option<&M::Value> {
        self.get(key).ok()
    }

    fn contains(&self, key: &M::Key) -> bool {
        self.contains_key(key)
    }

    fn entries(&self) -> Entries<'_, M::Key, M::Value> {
        let include = &self.include;
        Box::new(self.map.entries().filter(move |(k, _)| include.includes(*k)))
    }

    fn len(&self) -> usize {
        self.iter().count()
    }
}
