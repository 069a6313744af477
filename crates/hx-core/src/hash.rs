//! Fast hash map type alias.
//!
//! The registry and directory overrides are keyed by short strings and small
//! enums, which is the case the Fx hash is tuned for. None of these maps are
//! fed untrusted keys, so denial-of-service resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use hx_core::{FxHashMap, fx_hash_map};
//!
//! let mut map: FxHashMap<String, i32> = fx_hash_map();
//! map.insert("echo".to_owned(), 1);
//! assert_eq!(map.get("echo"), Some(&1));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}
