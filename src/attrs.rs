//! Attribute-style access for mappings.
//!
//! `attr(name)` on an `ItemsAsAttributes` type looks at the type's own
//! named fields first and falls back to item lookup, so a field always
//! shadows an item of the same name. `FieldItems` goes the other way and
//! reads a value's fields through an item-style `get`.
use crate::{
    defaulting::{DefaultingMap, OnMissing},
    error::{Error, Result},
    mapping::Mapping,
};
use std::fmt;

/// Named fields of a value, all readable as one value type.
pub trait Fields {
    type Value;

    fn field(&self, name: &str) -> Option<&Self::Value>;
}

pub trait ItemsAsAttributes: Fields {
    /// item lookup, consulted when no field has the name
    fn item(&self, name: &str) -> Option<&Self::Value>;

    fn attr(&self, name: &str) -> Result<&Self::Value> {
        self.field(name)
            .or_else(|| self.item(name))
            .ok_or_else(|| Error::NoAttribute(name.to_owned()))
    }
}

/// A map of string items with native fields layered over it.
///
/// ```
/// use std::collections::HashMap;
/// use mapkit::attrs::{Attributed, ItemsAsAttributes};
///
/// let mut a = Attributed::new(HashMap::new());
/// a.items_mut().insert("foo".to_string(), "bar");
/// assert_eq!(a.attr("foo"), Ok(&"bar"));
///
/// a.set_field("foo", "henry");
/// assert_eq!(a.attr("foo"), Ok(&"henry"));
/// assert_eq!(a.items()[&"foo".to_string()], "bar");
/// assert!(a.attr("missing").is_err());
/// ```
pub struct Attributed<M: Mapping> {
    fields: Vec<(String, M::Value)>,
    items: M,
}

impl<M> Clone for Attributed<M>
where
    M: Mapping + Clone,
    M::Value: Clone,
{
    fn clone(&self) -> Self {
        Attributed {
            fields: self.fields.clone(),
            items: self.items.clone(),
        }
    }
}

impl<M> fmt::Debug for Attributed<M>
where
    M: Mapping + fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Attributed")
            .field("fields", &self.fields)
            .field("items", &self.items)
            .finish()
    }
}

impl<M: Mapping<Key = String>> Attributed<M> {
    pub fn new(items: M) -> Self {
        Attributed {
            fields: Vec::new(),
            items,
        }
    }

    /// set a native field, shadowing any item of the same name
    pub fn set_field(&mut self, name: &str, value: M::Value) -> Option<M::Value> {
        match self.fields.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.fields.push((name.to_owned(), value));
                None
            }
        }
    }

    pub fn items(&self) -> &M {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut M {
        &mut self.items
    }
}

impl<M: Mapping<Key = String>> Fields for Attributed<M> {
    type Value = M::Value;

    fn field(&self, name: &str) -> Option<&M::Value> {
        self.fields.iter().find(|(n, _)| n.as_str() == name).map(|(_, v)| v)
    }
}

impl<M: Mapping<Key = String>> ItemsAsAttributes for Attributed<M> {
    fn item(&self, name: &str) -> Option<&M::Value> {
        self.items.lookup(&name.to_owned())
    }
}

/// A defaulting map has no native fields, so every attribute is an item
/// lookup and a missing item falls to the map's policy. Only a fixed
/// `OnMissing::Default` value can be lent out; a `Derive` policy builds
/// a fresh value per call, so a missing name under it is `NoAttribute`.
///
/// ```
/// use std::collections::HashMap;
/// use mapkit::attrs::ItemsAsAttributes;
/// use mapkit::defaulting::{DefaultingMap, OnMissing};
///
/// let mut d: DefaultingMap<HashMap<String, &str>> =
///     DefaultingMap::new(OnMissing::Default("missing item"));
/// assert_eq!(d.attr("foo"), Ok(&"missing item"));
/// d.insert("foo".to_string(), "bar");
/// assert_eq!(d.attr("foo"), Ok(&"bar"));
/// ```
impl<M: Mapping<Key = String>> Fields for DefaultingMap<M> {
    type Value = M::Value;

    fn field(&self, _name: &str) -> Option<&M::Value> {
        None
    }
}

impl<M: Mapping<Key = String>> ItemsAsAttributes for DefaultingMap<M> {
    fn item(&self, name: &str) -> Option<&M::Value> {
        self.inner()
            .lookup(&name.to_owned())
            .or_else(|| match self.on_missing() {
                OnMissing::Default(v) => Some(v),
                OnMissing::Raise | OnMissing::Derive(_) => None,
            })
    }
}

/// Item-style access to the fields of a value.
#[derive(Clone, Copy, Debug)]
pub struct FieldItems<'a, T>(pub &'a T);

impl<'a, T: Fields> FieldItems<'a, T> {
    pub fn get(&self, name: &str) -> Result<&'a T::Value> {
        let inner: &'a T = self.0;
        inner.field(name).ok_or(Error::NotFound)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.field(name).is_some()
    }
}
