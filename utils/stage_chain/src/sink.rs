//!
//! Stock sinks.
//!

use futures::Sink;
use parking_lot::Mutex;
use std::{
    marker::PhantomData,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    task::{Context, Poll},
};

#[derive(Debug)]
struct Shared<T> {
    buf: Mutex<Vec<T>>,
    drained: AtomicBool,
}

/// A sink gathering every chunk it receives, see [`collect`].
#[must_use = "sinks do nothing unless polled"]
pub struct Collect<T, E> {
    shared: Arc<Shared<T>>,
    _e: PhantomData<fn() -> E>,
}

/// Read side of a [`Collect`] sink.
#[derive(Debug)]
pub struct Collected<T> {
    shared: Arc<Shared<T>>,
}

/// Creates a collecting sink and the handle to read what it gathered.
///
/// `E` is the error type of the chain the sink is plugged into,
/// the sink itself never fails.
pub fn collect<T, E>() -> (Collect<T, E>, Collected<T>) {
    let shared = Arc::new(Shared {
        buf: Mutex::new(vec![]),
        drained: AtomicBool::new(false),
    });
    (
        Collect {
            shared: Arc::clone(&shared),
            _e: PhantomData,
        },
        Collected { shared },
    )
}

impl<T> Collected<T> {
    /// Whether the sink has been closed.
    pub fn is_drained(&self) -> bool {
        self.shared.drained.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.shared.buf.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.buf.lock().is_empty()
    }

    /// Moves out everything gathered so far.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.shared.buf.lock())
    }
}

impl<T, E> Sink<T> for Collect<T, E> {
    type Error = E;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), E>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: T) -> Result<(), E> {
        self.shared.buf.lock().push(item);
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), E>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), E>> {
        self.shared.drained.store(true, Ordering::Release);
        Poll::Ready(Ok(()))
    }
}
