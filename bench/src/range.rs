use crate::utils;
use mapkit::RangeMap;
use std::time::{Duration, Instant};

fn bench_insert(len: usize) -> (RangeMap<i64, i64>, Vec<i64>, Duration) {
    let mut m = RangeMap::new();
    let data = utils::randvec::<i64>(len);
    let begin = Instant::now();
    for k in &data {
        m.insert(*k, *k);
    }
    (m, data, begin.elapsed())
}

fn bench_collect(data: &[i64]) -> Duration {
    let begin = Instant::now();
    let m: RangeMap<i64, i64> = data.iter().map(|k| (*k, *k)).collect();
    assert_eq!(m.len(), data.len());
    begin.elapsed()
}

// lookups land between boundaries, so each one walks to its match
fn bench_get(m: &RangeMap<i64, i64>, d: &[i64]) -> Duration {
    let begin = Instant::now();
    for k in d {
        let _ = m.get(&k.saturating_sub(1));
    }
    begin.elapsed()
}

fn bench_remove(m: &mut RangeMap<i64, i64>, d: &[i64]) -> Duration {
    let begin = Instant::now();
    for k in d {
        m.remove(k);
    }
    begin.elapsed()
}

pub(crate) fn run(size: usize) {
    let (mut m, d, insert) = bench_insert(size);
    let collect = bench_collect(&d);
    let get = bench_get(&m, &d);
    let rm = bench_remove(&mut m, &d);
    println!(
        "insert: {}ns, collect: {}ns, get: {}ns, remove: {}ns",
        utils::to_ns_per(insert, size),
        utils::to_ns_per(collect, size),
        utils::to_ns_per(get, size),
        utils::to_ns_per(rm, size)
    );
}
