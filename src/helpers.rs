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
	use crate::Vector;
	use rand::prelude::*;

	/// Build RGB samples from plain channel triples.
	pub fn colors(values: &[[u8; 3]]) -> Vec<Vector<u8>> {
		values.iter().map(|&c| Vector::from(c)).collect()
	}

	/// **cnt** uniformly distributed RGB samples, repeatable per **seed**.
	pub fn random_colors(cnt: usize, seed: u64) -> Vec<Vector<u8>> {
		let mut rnd = StdRng::seed_from_u64(seed);
		(0..cnt).map(|_| Vector::from(rnd.gen::<[u8; 3]>())).collect()
	}

	/// Every sample index in `0..sample_cnt` has to be a member of exactly one group.
	pub fn assert_partition_complete(groups: &[Vec<usize>], sample_cnt: usize) {
		let mut seen = vec![0usize; sample_cnt];
		for (cluster_id, group) in groups.iter().enumerate() {
			for &s in group {
				assert!(s < sample_cnt, "cluster {} references sample {} of {}", cluster_id, s, sample_cnt);
				seen[s] += 1;
			}
		}
		if let Some((idx, cnt)) = seen.iter().enumerate().find(|(_, &cnt)| cnt != 1) {
			panic!("sample {} is a member of {} groups (should be exactly 1). Groups: {:?}", idx, cnt, groups);
		}
	}
}
