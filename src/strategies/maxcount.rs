use super::for_each_attempt;
use crate::errors::{ArgumentError, Result};
use crate::relabel::assignment_distance;
use crate::{ClusteringResult, DistanceFunction, KMeans, KMeansConfig, Primitive};
use std::ops::ControlFlow;

/// A distinct partition found so far, with the amount of attempts that found it.
struct ClusterCount<T: Primitive> {
    result: ClusteringResult<T>,
    count: usize,
}

pub(crate) struct MaxCount;
impl MaxCount {
    /// Consensus over all attempts: return the partition found most often (first seen wins ties),
    /// or the first partition found by more than half of the attempts, as soon as that happens.
    pub fn calculate<R, T, D>(data: &KMeans<R, T, D>, k: usize, config: &KMeansConfig<'_, T>) -> Result<ClusteringResult<T>>
    where
        R: Copy + Send + Sync,
        T: Primitive,
        D: DistanceFunction<R, T>,
    {
        let majority = config.attempts / 2;
        let mut counts: Vec<ClusterCount<T>> = Vec::with_capacity(config.attempts);
        let decided = for_each_attempt(data, k, config, |result| {
            match counts.iter().position(|c| assignment_distance(&result.assignments, &c.result.assignments) == 0.0) {
                Some(idx) => {
                    counts[idx].count += 1;
                    if counts[idx].count > majority {
                        return ControlFlow::Break(idx);
                    }
                }
                None => {
                    counts.push(ClusterCount { result, count: 1 });
                    // a single attempt is its own majority
                    if majority == 0 {
                        return ControlFlow::Break(counts.len() - 1);
                    }
                }
            }
            ControlFlow::Continue(())
        });

        let idx = match decided {
            Some(idx) => idx,
            None => {
                let mut best: Option<usize> = None;
                for (idx, c) in counts.iter().enumerate() {
                    if best.map_or(true, |b| c.count > counts[b].count) {
                        best = Some(idx);
                    }
                }
                best.ok_or(ArgumentError::NoAttempts)?
            }
        };
        Ok(counts.swap_remove(idx).result)
    }
}
