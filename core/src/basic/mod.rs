//!
//! # Basic Data Structures
//!
//! Single-owner, in-memory containers. None of them synchronize internally,
//! callers sharing one instance across threads must serialize access.
//!

/// An insertion-ordered map with array-like methods.
pub mod ordered_map;
