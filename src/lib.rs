//! # kmeans-consensus - API documentation
//!
//! Small library for k-means clustering of arbitrary vector-like data (bytes, measurements, pixel
//! shades, ...), built around many cheap randomized Lloyd runs instead of one expensive one.
//!
//! ## Design target
//! Samples are given using a raw row-major vector of any component type. How a raw component is
//! turned into a real-valued centroid coordinate, and how the distance between a sample and a
//! centroid is measured, are both pluggable through the [`DistanceFunction`] trait.
//! Raw components and centroid values are two distinct types, connected only by
//! [`DistanceFunction::to_value`].
//!
//! ## Supported calculations
//! Lloyd's iteration only finds a local optimum, and the one it finds depends on its random
//! initialization. Therefore each calculation runs multiple independent attempts (in parallel)
//! and picks one result:
//! - **min-distance**: the attempt with the lowest average distance ([`Strategy::MinDistance`])
//! - **consensus**: the partition found most often ([`Strategy::MaxCount`])
//! - **unknown k**: elbow search for the amount of clusters ([`KMeans::fit_unknown_k`])
//!
//! To compare partitions across attempts, cluster indices are always in canonical form: clusters are
//! numbered in order of their first appearance in the samples (see [`relabel`]).
//!
//! ## Supported value types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_consensus::*;
//! use rand::prelude::*;
//!
//! let (sample_cnt, sample_dims, k) = (2000, 8, 4);
//!
//! // Generate some random byte data
//! let mut rnd = StdRng::seed_from_u64(1337);
//! let mut samples = vec![0u8; sample_cnt * sample_dims];
//! samples.iter_mut().for_each(|v| *v = rnd.gen());
//!
//! let kmean: KMeans<u8, f64> = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).unwrap();
//! let conf = KMeansConfig::build()
//!     .random_generator(rnd)
//!     .strategy(Strategy::MinDistance)
//!     .build();
//! let result = kmean.fit(k, &conf).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Cluster-Assignments: {:?}", result.assignments);
//! println!("Average distance: {}", result.average_distance);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans_consensus::*;
//!
//! let rows = vec![[0u8, 0], [1, 1], [0, 1], [100, 100], [101, 100], [100, 101], [200, 0], [201, 1]];
//! let kmean: KMeans<u8, f64> = KMeans::from_rows(&rows, EuclideanDistance).unwrap();
//!
//! let conf = KMeansConfig::build()
//!     .attempt_done(&|r, nr| println!("Attempt {} - Average distance: {:.2}", nr, r.average_distance))
//!     .k_done(&|r| println!("k = {} - Average distance: {:.2}", r.k, r.average_distance))
//!     .build();
//! let result = kmean.fit_unknown_k(2, 5, &conf).unwrap();
//!
//! println!("Selected k: {}", result.k);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, which takes over the samples and the metric.
//! Its methods do not mutate it; each calculation creates fresh [`ClusteringResult`] instances.
//! All options (random generator, strategy, amount of attempts, callbacks, ...) are passed using a
//! [`KMeansConfig`], created through [`KMeansConfig::build`].
//!
//! For reproducible results, pass a seeded generator: each attempt gets its own generator seeded
//! from it, so results do not depend on the amount of worker threads.

#[macro_use] mod helpers;
mod primitive;
mod errors;
mod api;
mod distances;
mod inits;
mod variants;
mod strategies;
mod abort_strategy;
pub mod relabel;

pub use abort_strategy::AbortStrategy;
pub use api::{ClusteringResult, KMeans, KMeansConfig, KMeansConfigBuilder, Strategy};
pub use api::{AttemptDoneCallbackFn, InitDoneCallbackFn, IterationDoneCallbackFn, KDoneCallbackFn};
pub use distances::{centroid_distance, nearest_centroid, DistanceFunction, EuclideanDistance, FnDistance, HistogramDistance};
pub use errors::{ArgumentError, KMeansError, Result};
pub use primitive::Primitive;
pub use relabel::{assignment_distance, relabel};


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::assert_same_partition;
    use rand::prelude::*;

    #[test]
    fn custom_metric_end_to_end() {
        // Only the first dimension counts
        let metric = FnDistance::new(
            |p: &[u8], c: &[f64]| (p[0] as f64 - c[0]).powi(2),
            |raw: u8| raw as f64,
        );
        let rows = vec![[0u8, 255], [1, 0], [2, 128], [90, 0], [91, 255], [92, 7]];
        let kmean: KMeans<u8, f64, _> = KMeans::from_rows(&rows, metric).unwrap();
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(3))
            .strategy(Strategy::MaxCount)
            .build();
        let result = kmean.fit(2, &conf).unwrap();
        assert_same_partition(&[5, 5, 5, 7, 7, 7], &result.assignments);
        assert_eq!(result.centroid(0), Some(&[1.0, 383.0 / 3.0][..]));
        assert_eq!(kmean.nearest_centroid(&[89, 1], &result.centroids), Ok(1));
    }

    #[test]
    fn histogram_samples() {
        let rows = vec![[4u32, 0, 0, 0], [3, 1, 0, 0], [0, 0, 1, 3], [0, 0, 0, 4]];
        let kmean: KMeans<u32, f32, _> = KMeans::from_rows(&rows, HistogramDistance).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(8)).build();
        let result = kmean.fit(2, &conf).unwrap();
        assert_eq!(result.assignments, vec![0, 0, 1, 1]);
    }
}
