//!
//! Transformation stages.
//!
//! A stage consumes a stream of clean chunks and yields transformed chunks,
//! any of which may be a failure. Failures of upstream links never reach a
//! stage: the chain cuts the stage's input short and reports them itself.
//!

use futures::{
    future,
    stream::{BoxStream, Stream, StreamExt},
};

/// One transformation step between the source and the sink.
pub trait Stage<'a, I, E> {
    type Output;

    /// Wires `input` through this stage.
    fn pipe(self, input: BoxStream<'a, I>) -> BoxStream<'a, Result<Self::Output, E>>;
}

/// See [`map`].
#[must_use = "stages do nothing unless piped into a chain"]
pub struct Map<F> {
    func: F,
}

/// Maps every chunk, a returned `Err` fails the chain.
pub fn map<F>(func: F) -> Map<F> {
    Map { func }
}

impl<'a, I, O, E, F> Stage<'a, I, E> for Map<F>
where
    F: FnMut(I) -> Result<O, E> + Send + 'a,
    I: Send + 'a,
    O: Send + 'a,
    E: Send + 'a,
{
    type Output = O;

    fn pipe(self, input: BoxStream<'a, I>) -> BoxStream<'a, Result<O, E>> {
        input.map(self.func).boxed()
    }
}

/// See [`filter`].
#[must_use = "stages do nothing unless piped into a chain"]
pub struct Filter<F> {
    func: F,
}

/// Drops the chunks for which `func` returns `false`.
pub fn filter<F>(func: F) -> Filter<F> {
    Filter { func }
}

impl<'a, I, E, F> Stage<'a, I, E> for Filter<F>
where
    F: FnMut(&I) -> bool + Send + 'a,
    I: Send + 'a,
    E: Send + 'a,
{
    type Output = I;

    fn pipe(self, input: BoxStream<'a, I>) -> BoxStream<'a, Result<I, E>> {
        let mut func = self.func;
        input
            .filter(move |chunk| future::ready(func(chunk)))
            .map(Ok)
            .boxed()
    }
}

/// See [`from_fn`].
#[must_use = "stages do nothing unless piped into a chain"]
pub struct FromFn<F> {
    func: F,
}

/// Builds a stage out of any stream adapter.
///
/// ```
/// use emap_stage_chain::stage;
/// use futures::StreamExt;
///
/// // splits every line into words
/// let words = stage::from_fn(|lines: futures::stream::BoxStream<'static, String>| {
///     lines.flat_map(|l| {
///         let w = l.split_whitespace().map(|w| Ok::<_, String>(w.to_owned()));
///         futures::stream::iter(w.collect::<Vec<_>>())
///     })
/// });
/// # let _ = words;
/// ```
pub fn from_fn<F>(func: F) -> FromFn<F> {
    FromFn { func }
}

impl<'a, I, O, E, F, S> Stage<'a, I, E> for FromFn<F>
where
    F: FnOnce(BoxStream<'a, I>) -> S,
    S: Stream<Item = Result<O, E>> + Send + 'a,
{
    type Output = O;

    fn pipe(self, input: BoxStream<'a, I>) -> BoxStream<'a, Result<O, E>> {
        (self.func)(input).boxed()
    }
}
