use crate::distances::{self, closest_centroid, DistanceFunction, EuclideanDistance};
use crate::errors::{ArgumentError, Result};
use crate::{AbortStrategy, Primitive};
use rand::prelude::*;
use rayon::prelude::*;
use std::cell::RefCell;
use std::marker::PhantomData;

pub type InitDoneCallbackFn<'a, T> = &'a (dyn Fn(&ClusteringResult<T>) + Sync);
pub type IterationDoneCallbackFn<'a, T> = &'a (dyn Fn(&ClusteringResult<T>, usize, bool) + Sync);
pub type AttemptDoneCallbackFn<'a, T> = &'a (dyn Fn(&ClusteringResult<T>, usize) + Sync);
pub type KDoneCallbackFn<'a, T> = &'a (dyn Fn(&ClusteringResult<T>) + Sync);

/// Strategy used by [`KMeans::fit`] to pick one result out of multiple randomized attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Return the attempt with the lowest average distance (first one wins ties).
    #[default]
    MinDistance,
    /// Return the partition found most often (consensus). Stops early, as soon as one partition
    /// was found by more than half of the attempts.
    MaxCount,
}

/// This is a structure holding various configuration options for clustering calculations, such as
/// the random number generator to use, the restart strategy, or a couple of callbacks, that can be
/// set to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initial assignment of a single attempt is done.
    /// May be called from worker threads.
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each refinement iteration of a single attempt.
    /// May be called from worker threads.
    /// ## Arguments
    /// - **candidate**: Result computed in this iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **accepted**: Whether the candidate was kept (**false** when its highest cluster index ran empty)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Callback that is called after each finished attempt, in attempt order
    pub(crate) attempt_done: AttemptDoneCallbackFn<'a, T>,
    /// Callback that is called with the selected result for each k evaluated by [`KMeans::fit_unknown_k`]
    pub(crate) k_done: KDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    pub(crate) strategy: Strategy,
    pub(crate) attempts: usize,
    pub(crate) max_iter: usize,
    pub(crate) batch_size: Option<usize>,
    pub(crate) elbow: AbortStrategy<T>,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            attempt_done: &|_, _| {},
            k_done: &|_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            strategy: Strategy::default(),
            attempts: 30,
            max_iter: 30,
            batch_size: None,
            elbow: AbortStrategy::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.attempts == 0 {
            return Err(ArgumentError::NoAttempts.into());
        }
        if self.batch_size == Some(0) {
            return Err(ArgumentError::ZeroBatchSize.into());
        }
        Ok(())
    }

    pub(crate) fn lloyd_params(&self) -> LloydParams<'a, T> {
        LloydParams { max_iter: self.max_iter, init_done: self.init_done, iteration_done: self.iteration_done }
    }

    pub(crate) fn batch_size(&self) -> usize {
        self.batch_size.unwrap_or_else(rayon::current_num_threads).max(1)
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("strategy", &self.strategy)
            .field("attempts", &self.attempts)
            .field("max_iter", &self.max_iter)
            .field("batch_size", &self.batch_size)
            .field("elbow", &self.elbow)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the initial assignment of each attempt.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each refinement iteration of each attempt.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the callback that should be called after each attempt.
    pub fn attempt_done(mut self, attempt_done: AttemptDoneCallbackFn<'a, T>) -> Self {
        self.config.attempt_done = attempt_done; self
    }
    /// Set the callback that should be called for each k evaluated during automatic k-selection.
    pub fn k_done(mut self, k_done: KDoneCallbackFn<'a, T>) -> Self {
        self.config.k_done = k_done; self
    }
    /// Set the random number generator that should be used in the calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the restart strategy used by [`KMeans::fit`].
    /// ## Default
    /// [`Strategy::MinDistance`]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy; self
    }
    /// Set the amount of randomized attempts per k.
    /// ## Default
    /// 30
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.config.attempts = attempts; self
    }
    /// Set the maximum amount of refinement iterations per attempt.
    /// ## Default
    /// 30
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter; self
    }
    /// Set the amount of attempts that are dispatched to the worker pool at once.
    /// The consensus strategy checks for a majority after each batch.
    /// ## Default
    /// `rayon::current_num_threads()`
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = Some(batch_size); self
    }
    /// Set the abort-strategy used by the automatic k-selection. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::RelativeImprovement`] `{ tolerance: 0.1 }`
    pub fn elbow(mut self, elbow: AbortStrategy<T>) -> Self {
        self.config.elbow = elbow; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}

/// The part of the configuration a single attempt needs. Unlike [`KMeansConfig`], this can be
/// shared with worker threads.
#[derive(Clone, Copy)]
pub(crate) struct LloydParams<'a, T: Primitive> {
    pub max_iter: usize,
    pub init_done: InitDoneCallbackFn<'a, T>,
    pub iteration_done: IterationDoneCallbackFn<'a, T>,
}


/// Result of a clustering calculation.
///
/// Cluster indices are in canonical form (see [`crate::relabel`]), and each cluster index
/// addresses the matching row of **centroids**.
///
/// ## Generics
/// - **T**: Value type used for centroids and distances
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this result
/// - **assignments**: Vector mapping each sample to its cluster
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each cluster
/// - **centroid_distances**: Vector containing each sample's distance to its centroid
/// - **average_distance**: Mean of **centroid_distances**
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringResult<T: Primitive> {
    pub k: usize,
    pub assignments: Vec<usize>,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub average_distance: T,

    pub(crate) sample_dims: usize,
}
impl<T: Primitive> ClusteringResult<T> {
    pub(crate) fn new(k: usize, sample_dims: usize, assignments: Vec<usize>, centroids: Vec<T>, centroid_distances: Vec<T>) -> Self {
        let mut centroid_frequency = vec![0usize; k];
        assignments.iter().for_each(|&c| centroid_frequency[c] += 1);
        let average_distance = centroid_distances.iter().cloned().sum::<T>() / T::from_count(centroid_distances.len().max(1));
        Self { k, assignments, centroids, centroid_frequency, centroid_distances, average_distance, sample_dims }
    }

    /// Rewrite cluster indices into canonical form, reordering centroids and frequencies alongside.
    pub(crate) fn relabel(&mut self) {
        let map = crate::relabel::canonical_mapping(&self.assignments, self.k);
        self.assignments.iter_mut().for_each(|c| *c = map[*c]);

        let mut centroids = vec![T::zero(); self.centroids.len()];
        let mut centroid_frequency = vec![0usize; self.k];
        self.centroids.chunks_exact(self.sample_dims).zip(self.centroid_frequency.iter().cloned())
            .zip(map.iter().cloned())
            .for_each(|((c, freq), label)| {
                centroids[label * self.sample_dims..(label + 1) * self.sample_dims].copy_from_slice(c);
                centroid_frequency[label] = freq;
            });
        self.centroids = centroids;
        self.centroid_frequency = centroid_frequency;
    }

    /// Dimensionality of the centroids.
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// The centroid of cluster **idx**.
    pub fn centroid(&self, idx: usize) -> Option<&[T]> {
        self.centroids.chunks_exact(self.sample_dims).nth(idx)
    }

    /// Centroids converted back into the raw sample type by **metric**, row-major like
    /// **centroids**. Returns [`None`] if the metric can not convert values back.
    pub fn raw_centroids<R: Copy, D: DistanceFunction<R, T> + ?Sized>(&self, metric: &D) -> Option<Vec<R>> {
        self.centroids.iter().map(|&v| metric.from_value(v)).collect()
    }

    /// Classify a new **point** against this result's centroids.
    pub fn predict<R: Copy, D: DistanceFunction<R, T> + ?Sized>(&self, metric: &D, point: &[R]) -> Result<usize> {
        if point.len() != self.sample_dims {
            return Err(ArgumentError::DimensionMismatch { expected: self.sample_dims, found: point.len() }.into());
        }
        distances::nearest_centroid(metric, point, &self.centroids)
    }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on and the metric
/// to use. Calculations do not mutate it, so it can be shared by parallel attempts without
/// duplicating the samples.
///
/// ## Generics
/// - **R**: Raw component type of the samples
/// - **T**: Value type of centroids and distances
/// - **D**: Metric, see [`DistanceFunction`]
///
/// ## Supported calculations
/// - Single randomized Lloyd run [`KMeans::cluster_once`]
/// - Best of multiple runs [`KMeans::fit`] (see [`Strategy`])
/// - Automatic k-selection [`KMeans::fit_unknown_k`]
pub struct KMeans<R, T, D = EuclideanDistance> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<R>,
    pub(crate) distance: D,
    _value: PhantomData<fn() -> T>,
}
impl<R, T, D> KMeans<R, T, D>
where
    R: Copy + Send + Sync,
    T: Primitive,
    D: DistanceFunction<R, T>,
{
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    /// - **distance**: Metric used for all calculations on this instance
    pub fn new(samples: Vec<R>, sample_cnt: usize, sample_dims: usize, distance: D) -> Result<Self> {
        if sample_cnt == 0 {
            return Err(ArgumentError::EmptyDataset.into());
        }
        if sample_dims == 0 {
            return Err(ArgumentError::ZeroDimensions.into());
        }
        if sample_cnt.checked_mul(sample_dims) != Some(samples.len()) {
            return Err(ArgumentError::ShapeMismatch { len: samples.len(), sample_cnt, sample_dims }.into());
        }
        Ok(Self { sample_cnt, sample_dims, samples, distance, _value: PhantomData })
    }

    /// Create a new instance from a list of equally long rows.
    pub fn from_rows<P: AsRef<[R]>>(rows: &[P], distance: D) -> Result<Self> {
        let sample_dims = rows.first().ok_or(ArgumentError::EmptyDataset)?.as_ref().len();
        let mut samples = Vec::with_capacity(rows.len() * sample_dims);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != sample_dims {
                return Err(ArgumentError::RaggedSample { index, found: row.len(), expected: sample_dims }.into());
            }
            samples.extend_from_slice(row);
        }
        Self::new(samples, rows.len(), sample_dims, distance)
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }
    pub fn distance_function(&self) -> &D { &self.distance }

    pub(crate) fn samples(&self) -> std::slice::ChunksExact<'_, R> {
        self.samples.chunks_exact(self.sample_dims)
    }

    pub(crate) fn validate_k(&self, k: usize) -> Result<()> {
        if k == 0 || k > self.sample_cnt {
            return Err(ArgumentError::ClusterCount { k, sample_cnt: self.sample_cnt }.into());
        }
        Ok(())
    }

    /// Assign every sample to its closest centroid.
    pub(crate) fn assign(&self, k: usize, centroids: Vec<T>) -> ClusteringResult<T> {
        let mut assignments = vec![0usize; self.sample_cnt];
        let mut centroid_distances = vec![T::zero(); self.sample_cnt];
        self.samples.par_chunks_exact(self.sample_dims)
            .zip(assignments.par_iter_mut())
            .zip(centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = closest_centroid(&self.distance, s, &centroids);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
        ClusteringResult::new(k, self.sample_dims, assignments, centroids, centroid_distances)
    }

    /// A single randomized Lloyd run: seed **k** centroids from randomly chosen samples and refine
    /// them until the assignment stops changing, or `max_iter` iterations were done.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_consensus::*;
    /// use rand::prelude::*;
    ///
    /// let samples = vec![0u8, 1, 2, 200, 201, 202];
    /// let kmean: KMeans<u8, f64> = KMeans::new(samples, 6, 1, EuclideanDistance).unwrap();
    /// let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
    /// let result = kmean.cluster_once(2, &conf).unwrap();
    ///
    /// assert_eq!(result.assignments[0], 0);
    /// assert_eq!(result.assignments.len(), 6);
    /// ```
    pub fn cluster_once(&self, k: usize, config: &KMeansConfig<'_, T>) -> Result<ClusteringResult<T>> {
        self.validate_k(k)?;
        let mut rnd = config.rnd.borrow_mut();
        Ok(crate::variants::Lloyd::calculate(self, k, &mut *rnd, &config.lloyd_params()))
    }

    /// Run `attempts` randomized Lloyd runs for **k** clusters and select one result, using the
    /// configured [`Strategy`].
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_consensus::*;
    ///
    /// let rows = vec![[0u8, 0], [1, 1], [0, 1], [100, 100], [101, 100], [100, 101]];
    /// let kmean: KMeans<u8, f64> = KMeans::from_rows(&rows, EuclideanDistance).unwrap();
    /// let conf = KMeansConfig::build().strategy(Strategy::MaxCount).build();
    /// let result = kmean.fit(2, &conf).unwrap();
    ///
    /// assert_eq!(result.assignments, vec![0, 0, 0, 1, 1, 1]);
    /// ```
    pub fn fit(&self, k: usize, config: &KMeansConfig<'_, T>) -> Result<ClusteringResult<T>> {
        self.validate_k(k)?;
        config.validate()?;
        match config.strategy {
            Strategy::MinDistance => crate::strategies::MinDistance::calculate(self, k, config),
            Strategy::MaxCount => crate::strategies::MaxCount::calculate(self, k, config),
        }
    }

    /// Automatically select the amount of clusters within `min_k..=max_k` (elbow method), using the
    /// consensus strategy for each k. See [`AbortStrategy`] for the stop criterion.
    pub fn fit_unknown_k(&self, min_k: usize, max_k: usize, config: &KMeansConfig<'_, T>) -> Result<ClusteringResult<T>> {
        if min_k == 0 || min_k > max_k || max_k > self.sample_cnt {
            return Err(ArgumentError::ClusterRange { min_k, max_k, sample_cnt: self.sample_cnt }.into());
        }
        config.validate()?;
        crate::strategies::UnknownK::calculate(self, min_k, max_k, config)
    }

    /// Index of the centroid (from the row-major **centroids**) closest to **point**.
    pub fn nearest_centroid(&self, point: &[R], centroids: &[T]) -> Result<usize> {
        if point.len() != self.sample_dims {
            return Err(ArgumentError::DimensionMismatch { expected: self.sample_dims, found: point.len() }.into());
        }
        distances::nearest_centroid(&self.distance, point, centroids)
    }

    /// Distance between **point** and **centroid** under this instance's metric.
    pub fn centroid_distance(&self, point: &[R], centroid: &[T]) -> Result<T> {
        distances::centroid_distance(&self.distance, point, centroid)
    }

    /// Distance between two raw points; **other** is converted into centroid space first.
    pub fn point_distance(&self, point: &[R], other: &[R]) -> Result<T> {
        let other: Vec<T> = other.iter().map(|&r| self.distance.to_value(r)).collect();
        self.centroid_distance(point, &other)
    }
}
