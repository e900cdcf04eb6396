use crate::utils;
use mapkit::FoldedCaseMap;
use std::time::{Duration, Instant};

fn bench_insert(len: usize) -> (FoldedCaseMap<usize>, Vec<String>, Duration) {
    let mut m = FoldedCaseMap::default();
    let data = utils::randvec::<String>(len);
    let begin = Instant::now();
    for (i, k) in data.iter().enumerate() {
        m.insert(k.as_str(), i);
    }
    (m, data, begin.elapsed())
}

fn bench_get(m: &FoldedCaseMap<usize>, d: &[String]) -> Duration {
    let upper: Vec<String> = d.iter().map(|k| k.to_uppercase()).collect();
    let begin = Instant::now();
    for k in &upper {
        let _ = m.get(k.as_str());
    }
    begin.elapsed()
}

pub(crate) fn run(size: usize) {
    let (m, d, insert) = bench_insert(size);
    let get = bench_get(&m, &d);
    println!(
        "insert: {}ns, get: {}ns, distinct: {}",
        utils::to_ns_per(insert, size),
        utils::to_ns_per(get, size),
        m.len()
    );
}
