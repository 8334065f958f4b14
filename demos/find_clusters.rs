use kmeans_consensus::*;
use rand::prelude::*;
use std::sync::Mutex;
use std::time::Instant;

fn main() {
    let (per_group, sample_dims, groups) = (200, 32, 5);

    // Noisy groups of shades around a few distinct levels
    let mut rnd = StdRng::seed_from_u64(1337);
    let mut samples = Vec::with_capacity(per_group * groups * sample_dims);
    for g in 0..groups {
        let level = 40 * g as i32 + 20;
        for _ in 0..per_group * sample_dims {
            samples.push((level + rnd.gen_range(-8..=8)) as u8);
        }
    }

    let kmean: KMeans<u8, f64> = KMeans::new(samples, per_group * groups, sample_dims, EuclideanDistance)
        .expect("valid sample buffer");

    // Report per k: average distance, its relative change and elapsed time
    let last = Mutex::new((Instant::now(), None::<f64>));
    let report = |r: &ClusteringResult<f64>| {
        let mut last = last.lock().unwrap();
        let elapsed = last.0.elapsed().as_secs_f64();
        let change = last.1.map_or(0.0, |prev| 1.0 - r.average_distance / prev);
        println!("{:>3} | {:>10.2} ({:+.3}) | {:.3}s", r.k, r.average_distance, -change, elapsed);
        *last = (Instant::now(), Some(r.average_distance));
    };
    let conf = KMeansConfig::build()
        .random_generator(rnd)
        .k_done(&report)
        .build();

    let result = kmean.fit_unknown_k(2, 10, &conf).expect("valid cluster range");
    println!("Selected k: {}", result.k);
}
