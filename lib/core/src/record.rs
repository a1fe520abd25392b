//! Named property access
//!
//! Aggregators never look inside a record type directly. They ask for a
//! property by name and get either a value or nothing. An absent property is
//! distinct from every real value.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to the named properties of a query or case.
pub trait Record {
    type Value;

    /// The value stored under `name`, or `None` when the property is absent.
    fn property(&self, name: &str) -> Option<&Self::Value>;
}

/// JSON objects expose their members; `null` and non-objects count as absent.
impl Record for Value {
    type Value = Value;

    fn property(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| !v.is_null())
    }
}

impl<V, S: BuildHasher> Record for HashMap<String, V, S> {
    type Value = V;

    fn property(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V> Record for BTreeMap<String, V> {
    type Value = V;

    fn property(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<R: Record + ?Sized> Record for &R {
    type Value = R::Value;

    fn property(&self, name: &str) -> Option<&R::Value> {
        (**self).property(name)
    }
}
