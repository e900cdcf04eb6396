use crate::{
    error::{Error, Result},
    mapping::{Mapping, MappingMut},
};
use std::{borrow::Cow, collections::HashMap, fmt};

/// What a `DefaultingMap` answers for a key it does not hold.
pub enum OnMissing<K, V> {
    /// fail with `NotFound`
    Raise,
    /// answer a fixed value
    Default(V),
    /// answer a value computed from the key
    Derive(fn(&K) -> V),
}

impl<K, V> OnMissing<K, V>
where
    K: Clone + Into<V>,
{
    /// every missing key maps to itself
    pub fn identity() -> Self {
        OnMissing::Derive(|k: &K| k.clone().into())
    }
}

impl<K, V: Clone> Clone for OnMissing<K, V> {
    fn clone(&self) -> Self {
        match self {
            OnMissing::Raise => OnMissing::Raise,
            OnMissing::Default(v) => OnMissing::Default(v.clone()),
            OnMissing::Derive(f) => OnMissing::Derive(*f),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for OnMissing<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OnMissing::Raise => f.write_str("Raise"),
            OnMissing::Default(v) => f.debug_tuple("Default").field(v).finish(),
            OnMissing::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// A mapping that answers missing keys according to an `OnMissing`
/// policy instead of always failing.
///
/// ```
/// use std::collections::HashMap;
/// use mapkit::defaulting::{DefaultingMap, OnMissing};
///
/// let mut d: DefaultingMap<HashMap<String, String>> =
///     DefaultingMap::new(OnMissing::identity());
/// assert_eq!(d.get(&"42".to_string()).unwrap().as_str(), "42");
/// d.insert("speed".to_string(), "speedo".to_string());
/// assert_eq!(d.get(&"speed".to_string()).unwrap().as_str(), "speedo");
/// ```
pub struct DefaultingMap<M: Mapping> {
    inner: M,
    on_missing: OnMissing<M::Key, M::Value>,
}

impl<M> Clone for DefaultingMap<M>
where
    M: Mapping + Clone,
    M::Value: Clone,
{
    fn clone(&self) -> Self {
        DefaultingMap {
            inner: self.inner.clone(),
            on_missing: self.on_missing.clone(),
        }
    }
}

impl<M> fmt::Debug for DefaultingMap<M>
where
    M: Mapping + fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DefaultingMap")
            .field("inner", &self.inner)
            .field("on_missing", &self.on_missing)
            .finish()
    }
}

impl<K, V> DefaultingMap<HashMap<K, V>>
where
    K: std::hash::Hash + Eq,
{
    /// an empty `HashMap` backed map
    pub fn new(on_missing: OnMissing<K, V>) -> Self {
        DefaultingMap::wrap(HashMap::new(), on_missing)
    }
}

impl<M: Mapping> DefaultingMap<M> {
    pub fn wrap(inner: M, on_missing: OnMissing<M::Key, M::Value>) -> Self {
        DefaultingMap { inner, on_missing }
    }

    pub fn on_missing(&self) -> &OnMissing<M::Key, M::Value> {
        &self.on_missing
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut M {
        &mut self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }

    /// the stored value, or the policy's answer for a missing key
    pub fn get(&self, key: &M::Key) -> Result<Cow<'_, M::Value>>
    where
        M::Value: Clone,
    {
        if let Some(v) = self.inner.lookup(key) {
            return Ok(Cow::Borrowed(v));
        }
        match &self.on_missing {
            OnMissing::Raise => Err(Error::NotFound),
            OnMissing::Default(v) => Ok(Cow::Borrowed(v)),
            OnMissing::Derive(f) => Ok(Cow::Owned(f(key))),
        }
    }

    /// true only for keys actually stored
    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.inner.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<M: MappingMut> DefaultingMap<M> {
    pub fn insert(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        self.inner.store(key, value)
    }

    pub fn remove(&mut self, key: &M::Key) -> Option<M::Value> {
        self.inner.discard(key)
    }
}
