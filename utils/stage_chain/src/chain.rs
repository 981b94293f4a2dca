//!
//! The chain itself.
//!
//! Every link's output is tagged with the link's identity, so the first
//! failure surfacing at the end of the chain carries its origin. A stage whose
//! upstream fails sees its input end; the upstream failure is parked in a slot
//! shared with the stage's output side, which reports it on the next poll,
//! ahead of anything the stage emits afterwards.
//!

use crate::{
    cfg::ChainCfg,
    error::{ChainError, Link},
    stage::Stage,
};
use futures::{
    Sink, SinkExt, ready,
    stream::{BoxStream, Stream, StreamExt},
};
use parking_lot::Mutex;
use pin_project_lite::pin_project;
use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::Instrument;

type Slot<E> = Arc<Mutex<Option<ChainError<E>>>>;

/// A source piped through zero or more stages, waiting for its sink.
///
/// ```
/// use emap_stage_chain::{StageChain, sink, stage};
/// use futures::{executor::block_on, stream};
///
/// let (out, collected) = sink::collect::<u32, String>();
/// let src = stream::iter(vec![Ok(1), Ok(2), Ok(3)]);
///
/// let chain = StageChain::new(src).pipe(stage::map(|x: u32| Ok::<_, String>(x * 10)));
/// block_on(chain.run(out)).unwrap();
///
/// assert!(collected.is_drained());
/// assert_eq!(collected.take(), vec![10, 20, 30]);
/// ```
#[must_use = "chains do nothing unless `run`"]
pub struct StageChain<'a, T, E> {
    cfg: ChainCfg,
    stream: BoxStream<'a, Result<T, ChainError<E>>>,
    stages: usize,
}

impl<'a, T, E> StageChain<'a, T, E>
where
    T: Send + 'a,
    E: Send + 'a,
{
    pub fn new<S>(source: S) -> Self
    where
        S: Stream<Item = Result<T, E>> + Send + 'a,
    {
        Self::with_cfg(source, ChainCfg::default())
    }

    pub fn with_cfg<S>(source: S, cfg: ChainCfg) -> Self
    where
        S: Stream<Item = Result<T, E>> + Send + 'a,
    {
        let stream = source
            .map(|chunk| chunk.map_err(|cause| ChainError::new(Link::Source, cause)))
            .boxed();
        Self {
            cfg,
            stream,
            stages: 0,
        }
    }

    /// Number of stages piped so far.
    #[inline(always)]
    pub fn stage_count(&self) -> usize {
        self.stages
    }

    /// Feeds the current output into `stage`.
    pub fn pipe<P>(self, stage: P) -> StageChain<'a, P::Output, E>
    where
        P: Stage<'a, T, E>,
        P::Output: Send + 'a,
    {
        let slot: Slot<E> = Arc::new(Mutex::new(None));

        let gate = Gate {
            upstream: self.stream,
            slot: Arc::clone(&slot),
            closed: false,
        };

        let stream = Tagged {
            inner: stage.pipe(gate.boxed()),
            slot,
            link: Link::Stage(self.stages),
            done: false,
        }
        .boxed();

        StageChain {
            cfg: self.cfg,
            stream,
            stages: self.stages + 1,
        }
    }

    /// Drives the chain into `sink`.
    ///
    /// Resolves once the source is exhausted and the sink has been closed,
    /// or fails with the first error raised by any link. Nothing is polled
    /// after either outcome.
    pub async fn run<K>(self, sink: K) -> Result<(), ChainError<E>>
    where
        K: Sink<T, Error = E>,
    {
        let Self {
            cfg,
            mut stream,
            stages,
        } = self;

        let span = tracing::debug_span!("stage_chain", name = %cfg.name, stages);

        async move {
            futures::pin_mut!(sink);
            let mut chunks = 0usize;

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(failed)?;
                sink.send(chunk)
                    .await
                    .map_err(|cause| failed(ChainError::new(Link::Sink, cause)))?;

                chunks += 1;
                if cfg.trace_chunks {
                    tracing::trace!(chunk = chunks, "forwarded");
                }
            }

            sink.close()
                .await
                .map_err(|cause| failed(ChainError::new(Link::Sink, cause)))?;

            tracing::debug!(chunks, "drained");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

fn failed<E>(e: ChainError<E>) -> ChainError<E> {
    tracing::warn!(link = %e.link, "chain failed");
    e
}

pin_project! {
    // The input side of a stage: upstream chunks with failures filtered out.
    struct Gate<St, E> {
        #[pin]
        upstream: St,
        slot: Slot<E>,
        closed: bool,
    }
}

impl<St, T, E> Stream for Gate<St, E>
where
    St: Stream<Item = Result<T, ChainError<E>>>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.project();
        if *this.closed {
            return Poll::Ready(None);
        }

        match ready!(this.upstream.poll_next(cx)) {
            Some(Ok(chunk)) => Poll::Ready(Some(chunk)),
            Some(Err(e)) => {
                *this.slot.lock() = Some(e);
                *this.closed = true;
                Poll::Ready(None)
            }
            None => {
                *this.closed = true;
                Poll::Ready(None)
            }
        }
    }
}

pin_project! {
    // The output side of a stage: tags its failures,
    // and reports an upstream failure parked by the `Gate`.
    struct Tagged<St, E> {
        #[pin]
        inner: St,
        slot: Slot<E>,
        link: Link,
        done: bool,
    }
}

impl<St, O, E> Stream for Tagged<St, E>
where
    St: Stream<Item = Result<O, E>>,
{
    type Item = Result<O, ChainError<E>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        let polled = this.inner.poll_next(cx);

        if let Some(upstream) = this.slot.lock().take() {
            *this.done = true;
            return Poll::Ready(Some(Err(upstream)));
        }

        match ready!(polled) {
            Some(Ok(chunk)) => Poll::Ready(Some(Ok(chunk))),
            Some(Err(cause)) => {
                *this.done = true;
                Poll::Ready(Some(Err(ChainError::new(*this.link, cause))))
            }
            None => {
                *this.done = true;
                Poll::Ready(None)
            }
        }
    }
}
