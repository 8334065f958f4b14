use super::for_each_attempt;
use crate::errors::{ArgumentError, Result};
use crate::{ClusteringResult, DistanceFunction, KMeans, KMeansConfig, Primitive};
use std::ops::ControlFlow;

pub(crate) struct MinDistance;
impl MinDistance {
    /// Keep the attempt with the lowest average distance. The first one wins ties.
    pub fn calculate<R, T, D>(data: &KMeans<R, T, D>, k: usize, config: &KMeansConfig<'_, T>) -> Result<ClusteringResult<T>>
    where
        R: Copy + Send + Sync,
        T: Primitive,
        D: DistanceFunction<R, T>,
    {
        let mut best: Option<ClusteringResult<T>> = None;
        for_each_attempt(data, k, config, |result| {
            if best.as_ref().map_or(true, |b| result.average_distance < b.average_distance) {
                best = Some(result);
            }
            ControlFlow::<()>::Continue(())
        });
        best.ok_or_else(|| ArgumentError::NoAttempts.into())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{attempt_seeds, tests::two_blobs};
    use super::*;
    use crate::variants::Lloyd;
    use crate::{EuclideanDistance, Strategy};
    use rand::prelude::*;

    #[test]
    fn returns_lowest_of_captured_attempts() {
        let mut rnd = StdRng::seed_from_u64(21);
        let mut samples = vec![0.0f64; 80 * 2];
        samples.iter_mut().for_each(|v| *v = rnd.gen_range(0.0..10.0));
        let kmean: KMeans<f64, f64> = KMeans::new(samples, 80, 2, EuclideanDistance).unwrap();

        // Replay the seeds the strategy will draw
        let replay = KMeansConfig::<f64>::build().random_generator(StdRng::seed_from_u64(4)).attempts(30).build();
        let attempts: Vec<_> = attempt_seeds(&replay).into_iter()
            .map(|seed| Lloyd::calculate(&kmean, 5, &mut StdRng::seed_from_u64(seed), &replay.lloyd_params()))
            .collect();
        let lowest = attempts.iter().map(|r| r.average_distance).fold(f64::INFINITY, f64::min);
        let first_lowest = attempts.iter().find(|r| r.average_distance == lowest).unwrap();

        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(4))
            .strategy(Strategy::MinDistance)
            .attempts(30)
            .build();
        let result = kmean.fit(5, &conf).unwrap();
        assert_eq!(result.average_distance, lowest);
        assert_eq!(&result, first_lowest);
        assert!(attempts.iter().all(|r| result.average_distance <= r.average_distance));
    }

    #[test]
    fn single_attempt() {
        let kmean: KMeans<f64, f64> = KMeans::new(two_blobs(4, 3, 8), 8, 3, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(0)).attempts(1).build();
        let result = kmean.fit(2, &conf).unwrap();
        assert_eq!(result.assignments.len(), 8);
        assert!(result.assignments.iter().all(|&c| c < 2));
    }
}
