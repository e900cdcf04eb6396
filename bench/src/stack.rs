use crate::utils;
use mapkit::DictStack;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

const DEPTH: usize = 8;

fn build(len: usize) -> (DictStack<HashMap<i64, i64>>, Vec<i64>, Duration) {
    let data = utils::randvec::<i64>(len);
    let begin = Instant::now();
    let stack = data
        .chunks((len / DEPTH).max(1))
        .map(|c| c.iter().map(|k| (*k, *k)).collect())
        .collect();
    (stack, data, begin.elapsed())
}

fn bench_get(stack: &DictStack<HashMap<i64, i64>>, d: &[i64]) -> Duration {
    let begin = Instant::now();
    for k in d {
        let _ = stack.get(k);
    }
    begin.elapsed()
}

fn bench_keys(stack: &DictStack<HashMap<i64, i64>>) -> Duration {
    let begin = Instant::now();
    let _ = stack.keys().len();
    begin.elapsed()
}

pub(crate) fn run(size: usize) {
    let (stack, d, build) = build(size);
    let get = bench_get(&stack, &d);
    let keys = bench_keys(&stack);
    println!(
        "build: {}ns, get: {}ns, keys: {}ns, depth: {}",
        utils::to_ns_per(build, size),
        utils::to_ns_per(get, size),
        utils::to_ns_per(keys, size),
        stack.depth()
    );
}
