//!
//! # Common Components
//!
//! Re-exports the runtime configuration of `emap_core`,
//! plus the `ende` codec layer and the facade macros.
//!

/// Encoding and decoding of values.
pub mod ende;
pub mod macros;

pub use emap_core::common::*;
