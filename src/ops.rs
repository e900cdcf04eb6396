use crate::{
    error::{Error, Result},
    mapping::Mapping,
    order::KeyOrder,
};
use log::debug;
use std::{collections::HashMap, hash::Hash};

/// Swap the keys and values of `map`. Two keys bound to the same value
/// would collide in the result, and are reported as a `KeyConflict`.
///
/// ```
/// use std::collections::HashMap;
/// use mapkit::ops::invert;
///
/// let mut numbers = HashMap::from([("a", 1), ("b", 2), ("c", 3)]);
/// assert_eq!(invert(&numbers).unwrap()[&1], "a");
///
/// numbers.insert("d", 3);
/// assert!(invert(&numbers).is_err());
/// ```
pub fn invert<M>(map: &M) -> Result<HashMap<M::Value, M::Key>>
where
    M: Mapping,
    M::Key: Clone,
    M::Value: Hash + Eq + Clone,
{
    let mut inverted = HashMap::with_capacity(map.len());
    for (k, v) in map.entries() {
        if inverted.insert(v.clone(), k.clone()).is_some() {
            debug!("value shared by two keys, {} entries", map.len());
            return Err(Error::KeyConflict);
        }
    }
    Ok(inverted)
}

/// A new map with `f` applied to every value of `map`, keys unchanged.
pub fn map_values<M, F, W>(map: &M, mut f: F) -> HashMap<M::Key, W>
where
    M: Mapping,
    M::Key: Hash + Eq + Clone,
    F: FnMut(&M::Value) -> W,
{
    map.entries().map(|(k, v)| (k.clone(), f(v))).collect()
}

/// The bindings of `map` sorted by key under `order`. Pass
/// `Reversed(order)` to sort descending, or `ByKey(f)` to sort by a
/// derived key.
pub fn sorted_items<M, C>(map: &M, order: C) -> Vec<(&M::Key, &M::Value)>
where
    M: Mapping,
    C: KeyOrder<M::Key>,
{
    let mut items: Vec<_> = map.entries().collect();
    items.sort_by(|(a, _), (b, _)| order.compare(*a, *b));
    items
}
