use crate::{DistanceFunction, KMeans, Primitive};
use rand::prelude::*;

/// Draw **k** distinct samples uniformly at random (reservoir sampling) and convert them into
/// centroid space. Returns the centroids row-major.
#[inline(always)]
pub(crate) fn calculate<R, T, D, G>(kmean: &KMeans<R, T, D>, k: usize, rnd: &mut G) -> Vec<T>
where
    R: Copy + Send + Sync,
    T: Primitive,
    D: DistanceFunction<R, T>,
    G: Rng + ?Sized,
{
    let mut centroids = Vec::with_capacity(k * kmean.sample_dims);
    kmean.samples()
        .choose_multiple(rnd, k).into_iter()
        .for_each(|c| { // Copy randomly chosen samples into the centroids
            centroids.extend(c.iter().map(|&v| kmean.distance.to_value(v)));
        });
    centroids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuclideanDistance;

    #[test]
    fn draws_distinct_samples() {
        let samples: Vec<u8> = (0..20).collect();
        let kmean: KMeans<u8, f64> = KMeans::new(samples, 10, 2, EuclideanDistance).unwrap();
        let mut rnd = StdRng::seed_from_u64(1337);
        for k in 1..=10 {
            let centroids = calculate(&kmean, k, &mut rnd);
            assert_eq!(centroids.len(), k * 2);
            let mut firsts: Vec<u64> = centroids.chunks_exact(2)
                .map(|c| {
                    assert_eq!(c[1], c[0] + 1.0);
                    c[0] as u64
                })
                .collect();
            firsts.sort_unstable();
            firsts.dedup();
            assert_eq!(firsts.len(), k);
        }
    }
}
