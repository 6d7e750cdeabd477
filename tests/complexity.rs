use std::hint::black_box;
use std::time::Duration;
use std::time::Instant;

use tandem_map::OrderedMap;

const SMALL: usize = 8_192;
const SCALE: usize = 4;
const OPS: usize = 4_096;
const ROUNDS: usize = 5;

/// Upper bound on how much slower an operation may get when the map holds
/// `SCALE` times as many entries. An accidental O(n) path scales with the
/// map and lands far beyond this.
const MAX_RATIO: f64 = 3.0;

fn filled(len: usize) -> OrderedMap<usize, usize> {
    let mut map = OrderedMap::with_capacity(len);
    for i in 0..len {
        map.insert(i, i);
    }
    map
}

/// Per-operation cost in nanoseconds, keeping the fastest of `ROUNDS`
/// attempts to damp scheduler noise.
fn per_op_nanos<T>(
    map: &mut OrderedMap<usize, usize>,
    mut op: impl FnMut(&mut OrderedMap<usize, usize>, usize) -> T,
) -> f64 {
    let mut best = Duration::MAX;
    for _ in 0..ROUNDS {
        let start = Instant::now();
        for i in 0..OPS {
            black_box(op(map, black_box(i)));
        }
        best = best.min(start.elapsed());
    }
    best.as_nanos() as f64 / OPS as f64
}

fn assert_flat(name: &str, small_ns: f64, large_ns: f64) {
    assert!(
        large_ns <= small_ns * MAX_RATIO,
        "{} scaled with map size: {:.1}ns per op at {} entries vs {:.1}ns at {}",
        name,
        large_ns,
        SMALL * SCALE,
        small_ns,
        SMALL
    );
}

#[test]
fn get_stays_flat_as_the_map_grows() {
    let mut small = filled(SMALL);
    let mut large = filled(SMALL * SCALE);

    let small_ns = per_op_nanos(&mut small, |map, i| map.get(&(i * 7 % SMALL)).copied());
    let large_ns = per_op_nanos(&mut large, |map, i| {
        map.get(&(i * 7 % (SMALL * SCALE))).copied()
    });

    assert_flat("get", small_ns, large_ns);
}

#[test]
fn contains_stays_flat_as_the_map_grows() {
    let mut small = filled(SMALL);
    let mut large = filled(SMALL * SCALE);

    let small_ns = per_op_nanos(&mut small, |map, i| map.contains_key(&(i * 7 % SMALL)));
    let large_ns = per_op_nanos(&mut large, |map, i| {
        map.contains_key(&(i * 7 % (SMALL * SCALE)))
    });

    assert_flat("contains_key", small_ns, large_ns);
}

#[test]
fn insert_of_existing_keys_stays_flat_as_the_map_grows() {
    let mut small = filled(SMALL);
    let mut large = filled(SMALL * SCALE);

    let small_ns = per_op_nanos(&mut small, |map, i| map.insert(i * 7 % SMALL, i));
    let large_ns = per_op_nanos(&mut large, |map, i| map.insert(i * 7 % (SMALL * SCALE), i));

    assert_flat("insert", small_ns, large_ns);
}

#[test]
fn remove_and_reinsert_stays_flat_as_the_map_grows() {
    let mut small = filled(SMALL);
    let mut large = filled(SMALL * SCALE);

    let small_ns = per_op_nanos(&mut small, |map, i| {
        let key = i * 7 % SMALL;
        let value = map.remove(&key).unwrap();
        map.insert(key, value)
    });
    let large_ns = per_op_nanos(&mut large, |map, i| {
        let key = i * 7 % (SMALL * SCALE);
        let value = map.remove(&key).unwrap();
        map.insert(key, value)
    });

    assert_flat("remove", small_ns, large_ns);
}
