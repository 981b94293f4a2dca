#![doc = include_str!("../README.md")]
#![deny(warnings)]
#![cfg_attr(test, allow(warnings))]

pub mod common;

pub use common::ende::{RawBytes, ValueDe, ValueEn, ValueEnDe};

pub use emap_core::{self, *};

/// Stream-driven stage chains, see [`emap_stage_chain`].
#[cfg(feature = "stage_chain")]
pub use emap_stage_chain as stage_chain;
