//! The capability the adapters in this crate are generic over: something
//! that can look up a key, test membership, enumerate its entries, and
//! (for `MappingMut`) store and discard bindings.
use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    rc::Rc,
};

pub type Entries<'a, K, V> = Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;

pub trait Mapping {
    type Key;
    type Value;

    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn contains(&self, key: &Self::Key) -> bool {
        self.lookup(key).is_some()
    }

    /// every binding, in the mapping's own iteration order
    fn entries(&self) -> Entries<'_, Self::Key, Self::Value>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait MappingMut: Mapping {
    fn lookup_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Value>;

    /// bind key to value, returning the previous value if any
    fn store(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    fn discard(&mut self, key: &Self::Key) -> Option<Self::Value>;
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<K, V, S> MappingMut for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn lookup_mut(&mut self, key: &K) -> Option<&mut V> {
        HashMap::get_mut(self, key)
    }

    fn store(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn discard(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }
}

impl<K: Ord, V> Mapping for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<K: Ord, V> MappingMut for BTreeMap<K, V> {
    fn lookup_mut(&mut self, key: &K) -> Option<&mut V> {
        BTreeMap::get_mut(self, key)
    }

    fn store(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn discard(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }
}

macro_rules! forward_mapping {
    ($([$($lt:lifetime)?] $ptr:ty),*) => {
        $(
            impl<$($lt,)? M: Mapping + ?Sized> Mapping for $ptr {
                type Key = M::Key;
                type Value = M::Value;

                fn lookup(&self, key: &M::Key) -> Option<&M::Value> {
                    (**self).lookup(key)
                }

                fn contains(&self, key: &M::Key) -> bool {
                    (**self).contains(key)
                }

                fn entries(&self) -> Entries<'_, M::Key, M::Value> {
                    (**self).entries()
                }

                fn len(&self) -> usize {
                    (**self).len()
                }
            }
        )*
    };
}

forward_mapping!(['r] &'r M, ['r] &'r mut M, [] Box<M>, [] Rc<M>);

impl<'r, M: MappingMut + ?Sized> MappingMut for &'r mut M {
    fn lookup_mut(&mut self, key: &M::Key) -> Option<&mut M::Value> {
        (**self).lookup_mut(key)
    }

    fn store(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        (**self).store(key, value)
    }

    fn discard(&mut self, key: &M::Key) -> Option<M::Value> {
        (**self).discard(key)
    }
}

impl<M: MappingMut + ?Sized> MappingMut for Box<M> {
    fn lookup_mut(&mut self, key: &M::Key) -> Option<&mut M::Value> {
        (**self).lookup_mut(key)
    }

    fn store(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        (**self).store(key, value)
    }

    fn discard(&mut self, key: &M::Key) -> Option<M::Value> {
        (**self).discard(key)
    }
}
