//! # emap_core
//!
//! `emap_core` provides `OrderedMap`, an insertion-ordered key/value container
//! with unique keys and a rich set of query, transform and combine methods,
//! together with the runtime configuration shared by all map instances.

#![deny(warnings)]
#![cfg_attr(test, allow(warnings))]

/// Runtime configuration and shared constants.
///
/// The default capacity of new maps is read once from
/// `${EMAP_DEFAULT_CAPACITY}` and can be changed at runtime.
pub mod common;

/// Contains the in-memory data structures.
pub mod basic;

pub use basic::ordered_map::{Entry, IntoEntry, OrderedMap};

/// Commonly used items, re-exported for convenience.
pub use common::{
    KB, MAX_DEFAULT_CAPACITY, MB, emap_get_default_capacity, emap_parse_default_capacity,
    emap_set_default_capacity,
};
