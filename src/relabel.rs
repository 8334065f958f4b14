//! Canonical relabeling of cluster assignments.
//!
//! Two runs with different random seeds may find the same partition, but number its clusters
//! differently. Relabeling renumbers clusters by order of first appearance (the first sample is
//! always in cluster 0, the next cluster encountered is 1, ...), so that assignments of runs over
//! the same samples in the same order can be compared directly.
//!
//! Partitions whose clusters first appear in a different order still relabel differently; this
//! only holds for assignments over the same sample order.

/// Compute the canonical label for each raw cluster index in `0..k`.
///
/// Raw indices that occur in **assignments** are numbered by first appearance. Indices that never
/// occur receive the remaining labels in ascending order, so the result is always a permutation
/// of `0..k`, which allows per-cluster data (centroids, frequencies) to be reordered alongside.
pub(crate) fn canonical_mapping(assignments: &[usize], k: usize) -> Vec<usize> {
    let mut map = vec![usize::MAX; k];
    let mut next_label = 0;
    for &c in assignments {
        if next_label == k {
            break;
        }
        if map[c] == usize::MAX {
            map[c] = next_label;
            next_label += 1;
        }
    }
    map.iter_mut().filter(|m| **m == usize::MAX).for_each(|m| {
        *m = next_label;
        next_label += 1;
    });
    map
}

/// Rewrite **assignments** into canonical form, in place.
pub fn relabel(assignments: &mut [usize]) {
    let k = assignments.iter().cloned().max().map_or(0, |m| m + 1);
    let map = canonical_mapping(assignments, k);
    assignments.iter_mut().for_each(|c| *c = map[*c]);
}

/// Mean elementwise squared difference between two assignment sequences.
///
/// Symmetric, and exactly zero iff both sequences are identical. Sequences of different
/// length are never equal and yield infinity.
pub fn assignment_distance(lhs: &[usize], rhs: &[usize]) -> f64 {
    if lhs.len() != rhs.len() {
        return f64::INFINITY;
    }
    if lhs.is_empty() {
        return 0.0;
    }
    let sum: f64 = lhs.iter().zip(rhs.iter())
        .map(|(&l, &r)| (l as f64 - r as f64).powi(2))
        .sum();
    sum / lhs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_appearance_order() {
        let mut assignments = vec![2, 2, 0, 1, 0, 2];
        relabel(&mut assignments);
        assert_eq!(assignments, vec![0, 0, 1, 2, 1, 0]);
    }

    #[test]
    fn idempotent() {
        let mut assignments = vec![3, 1, 1, 0, 2, 3, 0];
        relabel(&mut assignments);
        let once = assignments.clone();
        relabel(&mut assignments);
        assert_eq!(assignments, once);
        assert_eq!(assignments[0], 0);
    }

    #[test]
    fn same_partition_different_numbering() {
        let mut a = vec![1, 1, 0, 2, 2];
        let mut b = vec![2, 2, 1, 0, 0];
        assert!(assignment_distance(&a, &b) > 0.0);
        relabel(&mut a);
        relabel(&mut b);
        assert_eq!(assignment_distance(&a, &b), 0.0);
    }

    #[test]
    fn mapping_is_a_permutation() {
        // cluster 1 never occurs
        let map = canonical_mapping(&[3, 0, 3, 2], 4);
        assert_eq!(map, vec![1, 3, 2, 0]);
        let mut sorted = map.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn assignment_distance_properties() {
        let (a, b) = (vec![0, 1, 1, 2], vec![0, 1, 2, 0]);
        assert_eq!(assignment_distance(&a, &b), assignment_distance(&b, &a));
        assert_eq!(assignment_distance(&a, &b), (1.0 + 4.0) / 4.0);
        assert_eq!(assignment_distance(&a, &a), 0.0);
        assert_eq!(assignment_distance(&a, &b[..3]), f64::INFINITY);
        assert_eq!(assignment_distance(&[], &[]), 0.0);
    }
}
