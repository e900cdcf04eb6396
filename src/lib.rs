#![forbid(unsafe_code)]
//! Composable mapping adapters. See the range, stack, and transform
//! modules for the main types.

pub mod error;
pub mod order;
pub mod mapping;
pub mod ordered;
pub mod range;
pub mod stack;
pub mod transform;
pub mod filter;
pub mod defaulting;
pub mod attrs;
pub mod ops;

pub use error::{Error, Result};
pub use mapping::{Mapping, MappingMut};
pub use ordered::OrderedKeyMap;
pub use range::{Position, RangeMap, RangeValue};
pub use stack::DictStack;
pub use transform::{FoldedCaseMap, KeyTransformingMap, StringKeyMap};

#[cfg(test)]
mod tests;
