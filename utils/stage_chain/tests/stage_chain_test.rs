use emap_stage_chain::{
    ChainCfg, ChainError, Link, StageChain, run, sink, stage, stage_chain,
};
use futures::{
    Sink, SinkExt, StreamExt,
    channel::mpsc,
    stream::{self, BoxStream},
};
use ruc::{RucResult, pnk};
use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
enum IoFault {
    #[error("read failed at {0}")]
    Read(u32),
    #[error("bad chunk {0}")]
    Parse(u32),
    #[error("write refused")]
    Write,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn numbers(n: u32) -> impl futures::Stream<Item = Result<u32, IoFault>> + Send {
    stream::iter((1..=n).map(Ok))
}

/// Accepts `limit` chunks, then refuses; optionally refuses to close.
struct Picky {
    got: Vec<u32>,
    limit: usize,
    fail_close: bool,
}

impl Sink<u32> for Picky {
    type Error = IoFault;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), IoFault>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: u32) -> Result<(), IoFault> {
        let this = self.get_mut();
        if this.got.len() >= this.limit {
            return Err(IoFault::Write);
        }
        this.got.push(item);
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), IoFault>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), IoFault>> {
        if self.fail_close {
            Poll::Ready(Err(IoFault::Write))
        } else {
            Poll::Ready(Ok(()))
        }
    }
}

#[tokio::test]
async fn resolves_after_sink_drains() {
    init_tracing();
    let (out, collected) = sink::collect::<u32, IoFault>();

    pnk!(run(numbers(3), out).await);

    assert!(collected.is_drained());
    assert_eq!(collected.take(), vec![1, 2, 3]);
}

#[tokio::test]
async fn empty_source_still_drains() {
    let (out, collected) = sink::collect::<u32, IoFault>();
    pnk!(run(numbers(0), out).await);

    assert!(collected.is_drained());
    assert!(collected.is_empty());
}

#[tokio::test]
async fn stages_transform_in_order() {
    init_tracing();
    let (out, collected) = sink::collect::<String, IoFault>();

    let chain = StageChain::with_cfg(numbers(6), ChainCfg::new("fmt").trace_chunks(true))
        .pipe(stage::filter(|x: &u32| x % 3 != 0))
        .pipe(stage::map(|x: u32| Ok(x * 10)))
        .pipe(stage::map(|x: u32| Ok(format!("#{}", x))));
    assert_eq!(chain.stage_count(), 3);

    pnk!(chain.run(out).await);
    assert_eq!(collected.take(), vec!["#10", "#20", "#40", "#50"]);
}

#[tokio::test]
async fn failing_stage_rejects_with_its_cause() {
    init_tracing();
    let (out, collected) = sink::collect::<u32, IoFault>();

    let err = stage_chain!(
        numbers(1),
        stage::map(|x: u32| Err::<u32, _>(IoFault::Parse(x)));
        out
    )
    .await
    .unwrap_err();

    assert_eq!(err, ChainError::new(Link::Stage(0), IoFault::Parse(1)));
    assert_eq!(err.to_string(), "stage #0 failed: bad chunk 1");
    assert!(collected.is_empty());
    assert!(!collected.is_drained());
}

#[tokio::test]
async fn first_failure_wins() {
    // stage #1 trips on the first chunk, before stage #0 sees its bad one
    let (out, _) = sink::collect::<u32, IoFault>();
    let err = stage_chain!(
        numbers(5),
        stage::map(|x: u32| {
            if x == 3 {
                Err(IoFault::Parse(x))
            } else {
                Ok(x)
            }
        }),
        stage::map(|x: u32| {
            if x == 1 {
                Err(IoFault::Parse(100 + x))
            } else {
                Ok(x)
            }
        });
        out
    )
    .await
    .unwrap_err();
    assert_eq!(err, ChainError::new(Link::Stage(1), IoFault::Parse(101)));

    // the other way around
    let (out, collected) = sink::collect::<u32, IoFault>();
    let err = stage_chain!(
        numbers(5),
        stage::map(|x: u32| {
            if x == 2 {
                Err(IoFault::Parse(x))
            } else {
                Ok(x)
            }
        }),
        stage::map(|x: u32| {
            if x == 4 {
                Err(IoFault::Parse(100 + x))
            } else {
                Ok(x)
            }
        });
        out
    )
    .await
    .unwrap_err();
    assert_eq!(err, ChainError::new(Link::Stage(0), IoFault::Parse(2)));
    assert_eq!(collected.take(), vec![1]);
}

#[tokio::test]
async fn source_failure_is_attributed() {
    let src = stream::iter(vec![Ok(1), Ok(2), Err(IoFault::Read(3)), Ok(4)]);
    let (out, collected) = sink::collect::<u32, IoFault>();

    let err = stage_chain!(src, stage::map(|x: u32| Ok(x + 1)); out)
        .await
        .unwrap_err();

    assert_eq!(err.link, Link::Source);
    assert_eq!(err.into_cause(), IoFault::Read(3));
    assert_eq!(collected.take(), vec![2, 3]);
}

#[tokio::test]
async fn sink_failures_are_attributed() {
    let refusing = Picky {
        got: vec![],
        limit: 2,
        fail_close: false,
    };
    let err = run(numbers(5), refusing).await.unwrap_err();
    assert_eq!(err, ChainError::new(Link::Sink, IoFault::Write));

    let unclosable = Picky {
        got: vec![],
        limit: 10,
        fail_close: true,
    };
    let err = stage_chain!(numbers(5), stage::filter(|_: &u32| true); unclosable)
        .await
        .unwrap_err();
    assert_eq!(err.link, Link::Sink);
}

#[tokio::test]
async fn async_source() {
    let (mut tx, rx) = mpsc::channel::<Result<u32, IoFault>>(1);
    let producer = tokio::spawn(async move {
        for i in 0..20 {
            pnk!(tx.send(Ok(i)).await);
            tokio::task::yield_now().await;
        }
    });

    let (out, collected) = sink::collect::<u32, IoFault>();
    pnk!(stage_chain!(rx, stage::filter(|x: &u32| x % 2 == 1); out).await);
    pnk!(producer.await);

    assert_eq!(collected.take(), (0..20).filter(|x| x % 2 == 1).collect::<Vec<_>>());
}

#[tokio::test]
async fn from_fn_stage() {
    let lines = stream::iter(vec![Ok("a b".to_owned()), Ok("c".to_owned())]);
    let words = stage::from_fn(|input: BoxStream<'static, String>| {
        input.flat_map(|l| {
            stream::iter(
                l.split_whitespace()
                    .map(|w| Ok::<_, IoFault>(w.to_owned()))
                    .collect::<Vec<_>>(),
            )
        })
    });
    let (out, collected) = sink::collect::<String, IoFault>();

    pnk!(stage_chain!(lines, words; out).await);
    assert_eq!(collected.take(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn independent_chains() {
    let (out_a, got_a) = sink::collect::<u32, IoFault>();
    let (out_b, got_b) = sink::collect::<u32, IoFault>();

    let (a, b) = futures::join!(
        stage_chain!(numbers(100), stage::map(|x: u32| Ok(x * 2)); out_a),
        stage_chain!(
            numbers(100),
            stage::map(|x: u32| {
                if x == 50 {
                    Err(IoFault::Parse(x))
                } else {
                    Ok(x)
                }
            });
            out_b
        ),
    );

    pnk!(a);
    assert_eq!(b.unwrap_err().link, Link::Stage(0));
    assert_eq!(got_a.len(), 100);
    assert_eq!(got_b.len(), 49);
    assert!(got_a.is_drained());
    assert!(!got_b.is_drained());
}

#[tokio::test]
async fn caller_side_deadline() {
    let (out, collected) = sink::collect::<u32, IoFault>();
    let never_ends = numbers(2).chain(stream::pending());

    let res = tokio::time::timeout(Duration::from_millis(20), run(never_ends, out)).await;

    assert!(res.is_err());
    assert_eq!(collected.take(), vec![1, 2]);
    assert!(!collected.is_drained());
}
