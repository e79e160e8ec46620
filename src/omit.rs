//! The "omit if empty" field directive.
//!
//! Storable hashes count only the fields actually written, so a skipped field leaves no trace in
//! the output. Length-bearing fields opt in with serde's `skip_serializing_if`:
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     #[serde(skip_serializing_if = "storable_pack::omit_empty")]
//!     nickname: String,
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::reference::Ref;

/// Types with a length, which may therefore be omitted from a hash when empty.
pub trait OmitEmpty {
    fn is_empty_value(&self) -> bool;
}

/// Returns true if the field should be left out of its hash.
pub fn omit_empty<T: OmitEmpty + ?Sized>(value: &T) -> bool {
    value.is_empty_value()
}

impl OmitEmpty for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl OmitEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> OmitEmpty for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> OmitEmpty for [T; N] {
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T> OmitEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> OmitEmpty for VecDeque<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> OmitEmpty for BTreeSet<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> OmitEmpty for HashSet<T, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> OmitEmpty for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> OmitEmpty for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: OmitEmpty + ?Sized> OmitEmpty for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: OmitEmpty + ?Sized> OmitEmpty for Box<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: OmitEmpty> OmitEmpty for Ref<T> {
    fn is_empty_value(&self) -> bool {
        self.0.is_empty_value()
    }
}
