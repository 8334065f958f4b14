use crate::api::LloydParams;
use crate::relabel::assignment_distance;
use crate::{ClusteringResult, DistanceFunction, KMeans, Primitive};
use rand::Rng;

pub(crate) struct Lloyd;
impl Lloyd {
    /// Average the samples of each cluster. A cluster without samples keeps its previous centroid.
    fn update_centroids<R, T, D>(data: &KMeans<R, T, D>, result: &ClusteringResult<T>) -> Vec<T>
    where
        R: Copy + Send + Sync,
        T: Primitive,
        D: DistanceFunction<R, T>,
    {
        let dims = data.sample_dims;
        // Sum all samples in a cluster together into new_centroids
        let mut new_centroids = vec![T::zero(); result.centroids.len()];
        data.samples()
            .zip(result.assignments.iter().cloned())
            .for_each(|(s, centroid_id)| {
                new_centroids[centroid_id * dims..(centroid_id + 1) * dims].iter_mut()
                    .zip(s.iter().cloned())
                    .for_each(|(c, v)| *c += data.distance.to_value(v));
            });

        new_centroids.chunks_exact_mut(dims)
            .zip(result.centroids.chunks_exact(dims))
            .zip(result.centroid_frequency.iter().cloned())
            .for_each(|((c, prev), cfreq)| {
                if cfreq == 0 {
                    c.copy_from_slice(prev);
                } else {
                    let cfreq = T::from_count(cfreq);
                    c.iter_mut().for_each(|v| *v = *v / cfreq);
                }
            });
        new_centroids
    }

    /// One randomized attempt. **k** has to be validated by the caller.
    #[inline(always)]
    pub fn calculate<R, T, D, G>(data: &KMeans<R, T, D>, k: usize, rnd: &mut G, params: &LloydParams<'_, T>) -> ClusteringResult<T>
    where
        R: Copy + Send + Sync,
        T: Primitive,
        D: DistanceFunction<R, T>,
        G: Rng + ?Sized,
    {
        let centroids = crate::inits::randomsample::calculate(data, k, rnd);
        let mut result = data.assign(k, centroids);
        result.relabel();
        (params.init_done)(&result);
        Self::refine(data, result, params)
    }

    /// Refine a relabeled **result** until its assignment stops changing, or `max_iter` iterations were done.
    fn refine<R, T, D>(data: &KMeans<R, T, D>, mut result: ClusteringResult<T>, params: &LloydParams<'_, T>) -> ClusteringResult<T>
    where
        R: Copy + Send + Sync,
        T: Primitive,
        D: DistanceFunction<R, T>,
    {
        let k = result.k;
        for i in 1..=params.max_iter {
            let centroids = Self::update_centroids(data, &result);
            let mut candidate = data.assign(k, centroids);

            // The last cluster lost all of its samples: keep the previous result and try again
            if Self::is_degenerate(&candidate) {
                (params.iteration_done)(&candidate, i, false);
                continue;
            }

            candidate.relabel();
            (params.iteration_done)(&candidate, i, true);
            let converged = assignment_distance(&result.assignments, &candidate.assignments) == 0.0;
            result = candidate;
            if converged {
                break;
            }
        }
        result
    }

    /// Whether the highest cluster index in use of a not yet relabeled **candidate** is below `k - 1`.
    /// Empty clusters below that index are tolerated, they keep their centroid in the next update.
    fn is_degenerate<T: Primitive>(candidate: &ClusteringResult<T>) -> bool {
        candidate.assignments.iter().max().map_or(true, |&highest| highest + 1 < candidate.k)
    }
}
