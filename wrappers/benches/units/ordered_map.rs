use criterion::{Criterion, criterion_group};
use emap::{OrderedMap, ValueEnDe};
use rand::Rng;
use ruc::*;
use std::sync::atomic::{AtomicUsize, Ordering};

fn read_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("** emap::OrderedMap **");
    group
        .measurement_time(std::time::Duration::from_secs(3))
        .sample_size(10);

    let i = AtomicUsize::new(0);
    let mut m = OrderedMap::new();

    group.bench_function(" write ", |b| {
        b.iter(|| {
            let n = i.fetch_add(1, Ordering::SeqCst);
            m.set([n; 2], vec![n; 128]);
        })
    });

    group.bench_function(" read ", |b| {
        b.iter(|| {
            let n = i.fetch_sub(1, Ordering::SeqCst);
            m.get(&[n; 2]);
        })
    });

    group.bench_function(" positional read ", |b| {
        b.iter(|| {
            let n = i.load(Ordering::SeqCst);
            m.get_at(n / 2);
        })
    });

    group.finish();
}

fn random_read_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("** emap::OrderedMap **");
    group
        .measurement_time(std::time::Duration::from_secs(3))
        .sample_size(10);

    let mut rng = rand::thread_rng();
    let mut m = OrderedMap::new();
    let mut keys = vec![];

    group.bench_function(" random write ", |b| {
        b.iter(|| {
            let n = rng.gen::<u64>() as usize;
            m.set([n; 2], vec![n; 128]);
            keys.push([n; 2]);
        })
    });

    group.bench_function(" random read ", |b| {
        b.iter(|| {
            let k = keys[rng.gen_range(0..keys.len())];
            m.get(&k);
        })
    });

    group.finish();
}

fn bulk_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("** emap::OrderedMap bulk **");
    group
        .measurement_time(std::time::Duration::from_secs(3))
        .sample_size(10);

    let m = (0..10_000usize)
        .map(|n| (n, n.wrapping_mul(40503) % 10_007))
        .collect::<OrderedMap<_, _>>();

    group.bench_function(" map (10k) ", |b| {
        b.iter(|| m.map(|e, _| (e.key, e.value + 1)))
    });

    group.bench_function(" sort (10k) ", |b| {
        b.iter(|| m.clone().sort(|x, y| x.value.cmp(&y.value)).len())
    });

    group.bench_function(" remove every 3rd (10k) ", |b| {
        b.iter(|| m.clone().remove(|_, idx| idx % 3 == 0).len())
    });

    group.bench_function(" encode + decode (10k) ", |b| {
        b.iter(|| pnk!(OrderedMap::<usize, usize>::decode(&m.encode())))
    });

    group.finish();
}

criterion_group!(benches, read_write, random_read_write, bulk_ops);
