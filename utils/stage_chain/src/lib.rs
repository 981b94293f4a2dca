//! # emap_stage_chain
//!
//! Connects a source through zero or more transformation stages into one
//! sink, and settles to a single outcome:
//!
//! - `Ok(())` once the source is exhausted and the sink has drained,
//! - `Err(ChainError)` with the cause of the first failure raised by any
//!   link (source, stage or sink).
//!
//! Sources are `futures::Stream`s of `Result<T, E>`, sinks are
//! `futures::Sink`s with `Error = E`, all links of one chain share `E`.
//! The chain runs on the caller's task; nothing is spawned. Dropping the
//! returned future cancels it, deadlines are the caller's business
//! (e.g. `tokio::time::timeout`).
//!
//! ```
//! use emap_stage_chain::{Link, sink, stage, stage_chain};
//! use futures::{executor::block_on, stream};
//!
//! let (out, collected) = sink::collect::<u32, String>();
//! let src = stream::iter(vec![Ok(1), Ok(2), Ok(3), Ok(4)]);
//!
//! block_on(stage_chain!(
//!     src,
//!     stage::filter(|x: &u32| x % 2 == 0),
//!     stage::map(|x: u32| Ok::<_, String>(x + 1));
//!     out
//! ))
//! .unwrap();
//! assert_eq!(collected.take(), vec![3, 5]);
//!
//! let (out, _) = sink::collect::<u32, String>();
//! let src = stream::iter(vec![Ok(1)]);
//! let err = block_on(stage_chain!(
//!     src,
//!     stage::map(|_: u32| Err::<u32, _>("boom".to_owned()));
//!     out
//! ))
//! .unwrap_err();
//! assert_eq!(err.link, Link::Stage(0));
//! assert_eq!(err.into_cause(), "boom");
//! ```

#![deny(warnings)]
#![cfg_attr(test, allow(warnings))]


mod cfg;
mod chain;
mod error;

pub mod sink;
pub mod stage;

pub use cfg::ChainCfg;
pub use chain::StageChain;
pub use error::{ChainError, Link};
pub use stage::Stage;

use futures::{Sink, Stream};

/// Pipes `source` straight into `sink`.
pub async fn run<'a, S, K, T, E>(source: S, sink: K) -> Result<(), ChainError<E>>
where
    S: Stream<Item = Result<T, E>> + Send + 'a,
    K: Sink<T, Error = E>,
    T: Send + 'a,
    E: Send + 'a,
{
    StageChain::new(source).run(sink).await
}

/// `stage_chain!(source, stage_0, .., stage_n; sink)`
///
/// Expands to the future of
/// `StageChain::new(source).pipe(stage_0)..pipe(stage_n).run(sink)`.
#[macro_export]
macro_rules! stage_chain {
    ($source: expr $(, $stage: expr)* ; $sink: expr $(,)?) => {
        $crate::StageChain::new($source)$(.pipe($stage))*.run($sink)
    };
}
