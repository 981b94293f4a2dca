//!
//! Failure reporting of a chain.
//!

use std::fmt;
use thiserror::Error;

/// Identifies one link of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    Source,
    /// Transformation stages, numbered from 0 in piping order.
    Stage(usize),
    Sink,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Source => write!(f, "source"),
            Link::Stage(i) => write!(f, "stage #{}", i),
            Link::Sink => write!(f, "sink"),
        }
    }
}

/// The first failure observed in a chain, with the link that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{link} failed: {cause}")]
pub struct ChainError<E> {
    pub link: Link,
    pub cause: E,
}

impl<E> ChainError<E> {
    #[inline(always)]
    pub fn new(link: Link, cause: E) -> Self {
        Self { link, cause }
    }

    #[inline(always)]
    pub fn into_cause(self) -> E {
        self.cause
    }
}
