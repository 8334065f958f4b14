#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use std::collections::HashMap;

	/// Assert that two assignments describe the same partition, regardless of how clusters are numbered.
	pub fn assert_same_partition(should: &[usize], actual: &[usize]) {
		assert_eq!(should.len(), actual.len(), "Assignments differ in length");
		let mut idmap = HashMap::new();
		let mut idrevmap = HashMap::new();
		for idx in 0..should.len() {
			let (should_id, actual_id) = (should[idx], actual[idx]);
			let mapped = *idmap.entry(should_id).or_insert(actual_id);
			let rev_mapped = *idrevmap.entry(actual_id).or_insert(should_id);
			if mapped != actual_id || rev_mapped != should_id {
				panic!(
					"Cluster assignments different at idx {}.\nMapping(should -> actual): {:?}\nActual: {:?}\nShould: {:?}",
					idx, idmap, actual, should
				);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::testing::assert_same_partition;
	use crate::relabel::relabel;

	#[test]
	fn same_partition_after_relabel() {
		let should = vec![4, 4, 1, 0, 1];
		let mut actual = should.clone();
		relabel(&mut actual);
		assert_eq!(actual, vec![0, 0, 1, 2, 1]);
		assert_same_partition(&should, &actual);
	}

	#[test]
	#[should_panic]
	fn merged_clusters_differ() {
		assert_same_partition(&[0, 0, 1, 2], &[0, 0, 1, 1]);
	}

	#[test]
	#[should_panic]
	fn split_clusters_differ() {
		assert_same_partition(&[0, 0, 1], &[0, 2, 1]);
	}
}
