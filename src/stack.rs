use crate::{
    error::{Error, Result},
    mapping::{Entries, Mapping, MappingMut},
};
use log::debug;
use std::{
    collections::HashSet,
    fmt::{self, Debug, Formatter},
    hash::Hash,
    iter::FromIterator,
};

/// A stack of mappings that behaves as one mapping, giving preference
/// to the most recently pushed layer.
///
/// The stack is a view: layers are never copied or merged, and pushing
/// or popping only changes which layers take part in a lookup. A layer
/// may be an owned map, a borrowed `&M`, or a shared `Rc<M>`. Changes
/// made to an owned layer through `layers_mut` or `top_mut` show
/// through the view. Borrowed and shared layers are read-only while
/// the stack holds them.
///
/// Writes are explicit. `insert_top` binds into the top layer, there is
/// no implicit `set`.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use mapkit::stack::DictStack;
///
/// let mut stack = DictStack::from(vec![
///     HashMap::from([("a", 1), ("c", 2)]),
///     HashMap::from([("b", 2), ("a", 2)]),
/// ]);
/// assert_eq!(stack.get(&"a"), Ok(&2));
/// assert_eq!(stack.get(&"c"), Ok(&2));
///
/// stack.push(HashMap::from([("a", 3)]));
/// assert_eq!(stack.get(&"a"), Ok(&3));
///
/// stack.pop().unwrap();
/// stack.pop().unwrap();
/// assert_eq!(stack.get(&"a"), Ok(&1));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DictStack<L> {
    layers: Vec<L>,
}

impl<L> Default for DictStack<L> {
    fn default() -> Self {
        DictStack::new()
    }
}

impl<L: Debug> Debug for DictStack<L> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(self.layers.iter()).finish()
    }
}

impl<L> From<Vec<L>> for DictStack<L> {
    fn from(layers: Vec<L>) -> Self {
        DictStack { layers }
    }
}

impl<L> FromIterator<L> for DictStack<L> {
    fn from_iter<T: IntoIterator<Item = L>>(iter: T) -> Self {
        DictStack {
            layers: iter.into_iter().collect(),
        }
    }
}

impl<L> DictStack<L> {
    /// Create a stack with no layers
    pub fn new() -> Self {
        DictStack { layers: Vec::new() }
    }

    /// push a layer on top, it shadows every layer below it
    pub fn push(&mut self, layer: L) {
        self.layers.push(layer);
        debug!("pushed layer, depth {}", self.layers.len());
    }

    /// remove and return the top layer
    pub fn pop(&mut self) -> Result<L> {
        match self.layers.pop() {
            Some(layer) => {
                debug!("popped layer, depth {}", self.layers.len());
                Ok(layer)
            }
            None => Err(Error::EmptyCollection("dict stack")),
        }
    }

    /// the number of layers
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// the layers, bottom first
    pub fn layers(&self) -> &[L] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [L] {
        &mut self.layers
    }

    pub fn top(&self) -> Option<&L> {
        self.layers.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut L> {
        self.layers.last_mut()
    }

    pub fn into_layers(self) -> Vec<L> {
        self.layers
    }
}

impl<L: Mapping> DictStack<L> {
    fn resolve(&self, key: &L::Key) -> Option<&L::Value> {
        self.layers.iter().rev().find_map(|layer| layer.lookup(key))
    }

    /// the value bound to `key` in the highest layer that has it
    pub fn get(&self, key: &L::Key) -> Result<&L::Value> {
        self.resolve(key).ok_or(Error::NotFound)
    }

    pub fn contains_key(&self, key: &L::Key) -> bool {
        self.layers.iter().any(|layer| layer.contains(key))
    }
}

impl<L> DictStack<L>
where
    L: Mapping,
    L::Key: Hash + Eq,
{
    /// every key bound in any layer
    pub fn keys(&self) -> HashSet<&L::Key> {
        self.layers
            .iter()
            .flat_map(|layer| layer.entries().map(|(k, _)| k))
            .collect()
    }

    /// each distinct key once, with the value it resolves to. Keys come
    /// out top layer first.
    pub fn iter(&self) -> impl Iterator<Item = (&L::Key, &L::Value)> {
        let mut seen = HashSet::new();
        self.layers
            .iter()
            .rev()
            .flat_map(|layer| layer.entries())
            .filter(move |(k, _)| seen.insert(*k))
    }
}

impl<L: MappingMut> DictStack<L> {
    /// bind `key` in the top layer. The lower layers are untouched, so
    /// popping the top brings their bindings back.
    pub fn insert_top(&mut self, key: L::Key, value: L::Value) -> Result<Option<L::Value>> {
        match self.layers.last_mut() {
            Some(top) => Ok(top.store(key, value)),
            None => Err(Error::EmptyCollection("dict stack")),
        }
    }
}

impl<L> Mapping for DictStack<L>
where
    L: Mapping,
    L::Key: Hash + Eq,
{
    type Key = L::Key;
    type Value = L::Value;

    fn lookup(&self, key: &L::Key) -> Option<&L::Value> {
        self.resolve(key)
    }

    fn contains(&self, key: &L::Key) -> bool {
        self.contains_key(key)
    }

    fn entries(&self) -> Entries<'_, L::Key, L::Value> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        self.keys().len()
    }
}
