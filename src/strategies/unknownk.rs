use super::MaxCount;
use crate::errors::Result;
use crate::{ClusteringResult, DistanceFunction, KMeans, KMeansConfig, Primitive};

pub(crate) struct UnknownK;
impl UnknownK {
    /// Elbow search over `min_k..=max_k`, using the consensus strategy for every k.
    ///
    /// Starting at **min_k**, k is raised until the configured abort strategy decides that the
    /// gain in average distance is no longer worth it; the result for the k before that is
    /// returned. With `max_k <= 3` there is nothing meaningful to compare, so **max_k** is used.
    pub fn calculate<R, T, D>(data: &KMeans<R, T, D>, min_k: usize, max_k: usize, config: &KMeansConfig<'_, T>) -> Result<ClusteringResult<T>>
    where
        R: Copy + Send + Sync,
        T: Primitive,
        D: DistanceFunction<R, T>,
    {
        if max_k <= 3 {
            let result = MaxCount::calculate(data, max_k, config)?;
            (config.k_done)(&result);
            return Ok(result);
        }

        let mut abort_strategy = config.elbow.create_logic();
        let mut last = MaxCount::calculate(data, min_k, config)?;
        (config.k_done)(&last);
        abort_strategy.next(last.average_distance);

        for k in min_k + 1..=max_k {
            let next = MaxCount::calculate(data, k, config)?;
            (config.k_done)(&next);
            if !abort_strategy.next(next.average_distance) {
                return Ok(last);
            }
            last = next;
        }
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbortStrategy, EuclideanDistance};
    use rand::prelude::*;
    use std::sync::Mutex;

    /// Two far apart groups of uniform noise in many dimensions. Splitting a group only
    /// removes a small share of its spread, so the elbow is at k = 2.
    fn noisy_blobs(per_blob: usize, dims: usize, seed: u64) -> Vec<f64> {
        let mut rnd = StdRng::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(2 * per_blob * dims);
        for offset in [0.0, 100.0] {
            for _ in 0..per_blob * dims {
                samples.push(offset + rnd.gen::<f64>());
            }
        }
        samples
    }

    #[test]
    fn finds_two_clusters() {
        let kmean: KMeans<f64, f64> = KMeans::new(noisy_blobs(50, 64, 17), 100, 64, EuclideanDistance).unwrap();
        let evaluated = Mutex::new(Vec::new());
        let on_k = |r: &ClusteringResult<f64>| evaluated.lock().unwrap().push(r.k);
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(2))
            .k_done(&on_k)
            .build();
        let result = kmean.fit_unknown_k(2, 6, &conf).unwrap();
        assert_eq!(result.k, 2);
        assert_eq!(result.centroid_frequency, vec![50, 50]);
        assert_eq!(*evaluated.lock().unwrap(), vec![2, 3]);
    }

    #[test]
    fn small_range_uses_max_k() {
        let kmean: KMeans<u8, f64> = KMeans::new(vec![0, 1, 50, 51, 100, 101], 6, 1, EuclideanDistance).unwrap();
        let evaluated = Mutex::new(Vec::new());
        let on_k = |r: &ClusteringResult<f64>| evaluated.lock().unwrap().push(r.k);
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(5)).k_done(&on_k).build();
        let result = kmean.fit_unknown_k(1, 3, &conf).unwrap();
        assert_eq!(result.k, 3);
        assert_eq!(result.assignments[0], 0);
        assert!(result.assignments.iter().all(|&c| c < 3));
        assert_eq!(*evaluated.lock().unwrap(), vec![3]);
    }

    #[test]
    fn abort_strategy_decides_where_to_stop() {
        let kmean: KMeans<f64, f64> = KMeans::new(noisy_blobs(8, 2, 6), 16, 2, EuclideanDistance).unwrap();

        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(9))
            .attempts(5)
            .elbow(AbortStrategy::NoImprovement { threshold: f64::INFINITY })
            .build();
        assert_eq!(kmean.fit_unknown_k(2, 6, &conf).unwrap().k, 2);

        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(9))
            .attempts(5)
            .elbow(AbortStrategy::NoImprovement { threshold: f64::NEG_INFINITY })
            .build();
        assert_eq!(kmean.fit_unknown_k(2, 6, &conf).unwrap().k, 6);
    }

    #[test]
    fn single_k_range() {
        let kmean: KMeans<f64, f64> = KMeans::new(noisy_blobs(10, 2, 4), 20, 2, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1)).attempts(5).build();
        let result = kmean.fit_unknown_k(4, 4, &conf).unwrap();
        assert_eq!(result.k, 4);
    }
}
