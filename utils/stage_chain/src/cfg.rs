//!
//! Per-chain settings.
//!

use once_cell::sync::Lazy;
use std::env;

const CHAIN_TRACE_VAR: &str = "EMAP_CHAIN_TRACE";

const DEFAULT_NAME: &str = "stage-chain";

static TRACE_CHUNKS_BY_DEFAULT: Lazy<bool> = Lazy::new(|| {
    env::var(CHAIN_TRACE_VAR)
        .map(|v| parse_switch(&v))
        .unwrap_or(false)
});

pub(crate) fn parse_switch(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Settings of one [`StageChain`](crate::StageChain) run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainCfg {
    /// Shows up in the tracing span of the run.
    pub name: String,

    /// Emit a `trace!` event per forwarded chunk,
    /// defaults to ${EMAP_CHAIN_TRACE}.
    pub trace_chunks: bool,
}

impl ChainCfg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn trace_chunks(mut self, on: bool) -> Self {
        self.trace_chunks = on;
        self
    }
}

impl Default for ChainCfg {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            trace_chunks: *TRACE_CHUNKS_BY_DEFAULT,
        }
    }
}
