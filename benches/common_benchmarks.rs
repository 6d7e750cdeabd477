use std::hint::black_box;

use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
type RandomState = hashbrown::DefaultHashBuilder;
type TandemMap<K, V> = tandem_map::ordered_map::OrderedMap<K, V, RandomState>;

type HashLinkedMap<K, V> = hashlink::LinkedHashMap<K, V, RandomState>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

const MAP_SIZES: &[usize] = &[10000];

fn fill_tandem(mut map: TandemMap<usize, usize>, size: usize) -> TandemMap<usize, usize> {
    for key in 0..size {
        map.insert(black_box(key), black_box(key * 2));
    }
    map
}

fn fill_indexmap(mut map: IndexMap<usize, usize>, size: usize) -> IndexMap<usize, usize> {
    for key in 0..size {
        map.insert(black_box(key), black_box(key * 2));
    }
    map
}

fn fill_hashlinked(
    mut map: HashLinkedMap<usize, usize>,
    size: usize,
) -> HashLinkedMap<usize, usize> {
    for key in 0..size {
        map.insert(black_box(key), black_box(key * 2));
    }
    map
}

/// Filled map with every third key removed.
fn sparse_tandem(size: usize) -> TandemMap<usize, usize> {
    let mut map = fill_tandem(TandemMap::default(), size);
    for key in (0..size).step_by(3) {
        map.remove(&key);
    }
    map
}

fn sparse_indexmap(size: usize) -> IndexMap<usize, usize> {
    let mut map = fill_indexmap(IndexMap::default(), size);
    for key in (0..size).step_by(3) {
        map.swap_remove(&key);
    }
    map
}

fn sparse_hashlinked(size: usize) -> HashLinkedMap<usize, usize> {
    let mut map = fill_hashlinked(HashLinkedMap::default(), size);
    for key in (0..size).step_by(3) {
        map.remove(&key);
    }
    map
}

/// Removal order that fans out from the middle of a `size`-entry map; every
/// key addresses an interior entry.
fn middle_out_keys(size: usize) -> Vec<usize> {
    let mid = size / 2;
    let mut keys = Vec::with_capacity(size);
    for offset in 0..mid {
        keys.push(mid - offset);
        keys.push((mid + 1 + offset).min(size - 1));
    }
    keys
}

fn random_keys(size: usize) -> Vec<usize> {
    (0..100).map(|_| rand::random_range(0..size)).collect()
}

fn sum_lookups(keys: &[usize], mut lookup: impl FnMut(usize) -> Option<usize>) -> usize {
    keys.iter().filter_map(|&key| lookup(black_box(key))).sum()
}

fn sum_entries<'a>(entries: impl Iterator<Item = (&'a usize, &'a usize)>) -> usize {
    entries
        .map(|(key, value)| black_box(*key) + black_box(*value))
        .sum()
}

fn bench_insertion_at_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion_at_end");

    for &size in MAP_SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            b.iter(|| fill_tandem(TandemMap::default(), size))
        });

        group.bench_with_input(
            BenchmarkId::new("tandem_map_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    fill_tandem(
                        TandemMap::with_capacity_and_hasher(size, RandomState::default()),
                        size,
                    )
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter(|| fill_indexmap(IndexMap::default(), size))
        });

        group.bench_with_input(
            BenchmarkId::new("indexmap_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    fill_indexmap(
                        IndexMap::with_capacity_and_hasher(size, RandomState::default()),
                        size,
                    )
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter(|| fill_hashlinked(HashLinkedMap::default(), size))
        });
    }

    group.finish();
}

fn bench_pop_from_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("pop_from_end");

    for &size in MAP_SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            b.iter_batched(
                || fill_tandem(TandemMap::default(), size),
                |mut map| {
                    let mut popped = 0;
                    while let Some(ptr) = map.tail_ptr() {
                        map.remove_ptr(ptr);
                        popped += 1;
                    }
                    popped
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter_batched(
                || fill_indexmap(IndexMap::default(), size),
                |mut map| {
                    let mut popped = 0;
                    while map.pop().is_some() {
                        popped += 1;
                    }
                    popped
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter_batched(
                || fill_hashlinked(HashLinkedMap::default(), size),
                |mut map| {
                    let mut popped = 0;
                    while map.pop_back().is_some() {
                        popped += 1;
                    }
                    popped
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_remove_from_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_from_middle");

    for &size in MAP_SIZES {
        let middle_keys = middle_out_keys(size);

        group.throughput(Throughput::Elements(middle_keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            b.iter_batched(
                || fill_tandem(TandemMap::default(), size),
                |mut map| {
                    for &key in &middle_keys {
                        black_box(map.remove(&key));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(
            BenchmarkId::new("indexmap_swap_remove", size),
            &size,
            |b, &size| {
                b.iter_batched(
                    || fill_indexmap(IndexMap::default(), size),
                    |mut map| {
                        for &key in &middle_keys {
                            black_box(map.swap_remove(&key));
                        }
                        map
                    },
                    BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter_batched(
                || fill_hashlinked(HashLinkedMap::default(), size),
                |mut map| {
                    for &key in &middle_keys {
                        black_box(map.remove(&key));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_replace_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_key");

    for &size in MAP_SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            b.iter_batched(
                || fill_tandem(TandemMap::default(), size),
                |mut map| {
                    for key in 0..size {
                        map.replace_key(&black_box(key), black_box(key + size));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });

        // Renaming by hand costs a removal plus an insertion and loses the
        // entry's position.
        group.bench_with_input(
            BenchmarkId::new("tandem_map_remove_insert", size),
            &size,
            |b, &size| {
                b.iter_batched(
                    || fill_tandem(TandemMap::default(), size),
                    |mut map| {
                        for key in 0..size {
                            if let Some(value) = map.remove(&black_box(key)) {
                                map.insert(black_box(key + size), value);
                            }
                        }
                        map
                    },
                    BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter_batched(
                || fill_hashlinked(HashLinkedMap::default(), size),
                |mut map| {
                    for key in 0..size {
                        if let Some(value) = map.remove(&black_box(key)) {
                            map.insert(black_box(key + size), value);
                        }
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_random_access_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access_full");

    for &size in MAP_SIZES {
        let access_keys = random_keys(size);

        group.throughput(Throughput::Elements(access_keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            let map = fill_tandem(TandemMap::default(), size);
            b.iter(|| sum_lookups(&access_keys, |key| map.get(&key).copied()))
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let map = fill_indexmap(IndexMap::default(), size);
            b.iter(|| sum_lookups(&access_keys, |key| map.get(&key).copied()))
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            let map = fill_hashlinked(HashLinkedMap::default(), size);
            b.iter(|| sum_lookups(&access_keys, |key| map.get(&key).copied()))
        });
    }

    group.finish();
}

fn bench_random_access_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access_sparse");

    for &size in MAP_SIZES {
        let access_keys = random_keys(size);

        group.throughput(Throughput::Elements(access_keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            let map = sparse_tandem(size);
            b.iter(|| sum_lookups(&access_keys, |key| map.get(&key).copied()))
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let map = sparse_indexmap(size);
            b.iter(|| sum_lookups(&access_keys, |key| map.get(&key).copied()))
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            let map = sparse_hashlinked(size);
            b.iter(|| sum_lookups(&access_keys, |key| map.get(&key).copied()))
        });
    }

    group.finish();
}

fn bench_iteration_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_full");

    for &size in MAP_SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            let map = fill_tandem(TandemMap::default(), size);
            b.iter(|| sum_entries(map.iter()))
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let map = fill_indexmap(IndexMap::default(), size);
            b.iter(|| sum_entries(map.iter()))
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            let map = fill_hashlinked(HashLinkedMap::default(), size);
            b.iter(|| sum_entries(map.iter()))
        });
    }

    group.finish();
}

fn bench_iteration_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_sparse");

    for &size in MAP_SIZES {
        group.throughput(Throughput::Elements(size as u64 / 3));

        group.bench_with_input(BenchmarkId::new("tandem_map", size), &size, |b, &size| {
            let map = sparse_tandem(size);
            b.iter(|| sum_entries(map.iter()))
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let map = sparse_indexmap(size);
            b.iter(|| sum_entries(map.iter()))
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            let map = sparse_hashlinked(size);
            b.iter(|| sum_entries(map.iter()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion_at_end,
    bench_pop_from_end,
    bench_remove_from_middle,
    bench_replace_key,
    bench_random_access_full,
    bench_random_access_sparse,
    bench_iteration_full,
    bench_iteration_sparse,
);
criterion_main!(benches);
