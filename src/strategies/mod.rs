//! Restart strategies: run the randomized Lloyd iteration repeatedly and aggregate the results.
mod maxcount;
mod mindistance;
mod unknownk;

pub(crate) use maxcount::MaxCount;
pub(crate) use mindistance::MinDistance;
pub(crate) use unknownk::UnknownK;

use crate::variants::Lloyd;
use crate::{ClusteringResult, DistanceFunction, KMeans, KMeansConfig, Primitive};
use rand::prelude::*;
use rayon::prelude::*;
use std::ops::ControlFlow;

/// Draw one seed per attempt from the configured generator.
pub(crate) fn attempt_seeds<T: Primitive>(config: &KMeansConfig<'_, T>) -> Vec<u64> {
    let mut rnd = config.rnd.borrow_mut();
    (0..config.attempts).map(|_| rnd.next_u64()).collect()
}

/// Run `config.attempts` Lloyd attempts for **k** clusters, dispatched to the worker pool in
/// batches of `config.batch_size()`. Results are handed to **visit** on the calling thread in
/// attempt order; when **visit** breaks, the remaining batches are skipped.
///
/// Every attempt runs on its own generator, seeded from the configured one, so the outcome does
/// not depend on thread count or batch size.
pub(crate) fn for_each_attempt<R, T, D, B, F>(data: &KMeans<R, T, D>, k: usize, config: &KMeansConfig<'_, T>, mut visit: F) -> Option<B>
where
    R: Copy + Send + Sync,
    T: Primitive,
    D: DistanceFunction<R, T>,
    F: FnMut(ClusteringResult<T>) -> ControlFlow<B>,
{
    let seeds = attempt_seeds(config);
    let params = config.lloyd_params();
    let mut attempt_nr = 0;
    for batch in seeds.chunks(config.batch_size()) {
        let results: Vec<ClusteringResult<T>> = batch.par_iter()
            .map(|&seed| Lloyd::calculate(data, k, &mut StdRng::seed_from_u64(seed), &params))
            .collect();
        for result in results {
            attempt_nr += 1;
            (config.attempt_done)(&result, attempt_nr);
            if let ControlFlow::Break(done) = visit(result) {
                return Some(done);
            }
        }
    }
    None
}
