use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lrukit::policy::lru::LruCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn filled(capacity: u64) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity as usize);
    for i in 0..capacity {
        cache.put(i, i);
    }
    cache
}

fn bench_lru_put_get(c: &mut Criterion) {
    c.bench_function("lru_put_get", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(black_box(i + 10_000), i);
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_get_hit(c: &mut Criterion) {
    c.bench_function("lru_get_hit", |b| {
        b.iter_batched(
            || filled(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_exists(c: &mut Criterion) {
    let cache = filled(4096);
    c.bench_function("lru_exists", |b| {
        b.iter(|| {
            for i in 0..8192u64 {
                black_box(cache.exists(&black_box(i)));
            }
        })
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.put(black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_overwrite(c: &mut Criterion) {
    c.bench_function("lru_overwrite", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    black_box(cache.put(black_box(i), i + 1));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_pop_lru(c: &mut Criterion) {
    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

/// Uniform random keys over a universe twice the capacity: roughly half of
/// all reads miss and every miss is followed by a put that evicts.
fn bench_lru_random_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_random_workload");
    for capacity in [256u64, 4096, 65_536] {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let keys: Vec<u64> = (0..16_384)
            .map(|_| rng.random_range(0..capacity * 2))
            .collect();

        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &keys, |b, keys| {
            b.iter_batched(
                || filled(capacity),
                |mut cache| {
                    for &key in keys {
                        if cache.get(&key).is_err() {
                            cache.put(key, key);
                        }
                    }
                    cache
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_lru_put_get,
    bench_lru_get_hit,
    bench_lru_exists,
    bench_lru_eviction_churn,
    bench_lru_overwrite,
    bench_lru_pop_lru,
    bench_lru_random_workload
);
criterion_main!(benches);
