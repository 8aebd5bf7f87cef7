use crate::{Component, DistanceFunction, KMeans, KMeansConfig, KMeansError, Vector};
use rand::seq::index;
use std::ops::DerefMut;
use tracing::trace;

#[inline(always)] pub fn calculate<'a, T, D>(kmean: &KMeans<T, D>, k: usize, config: &KMeansConfig<'a, T>) -> Result<Vec<Vector<T>>, KMeansError>
				where T: Component, D: DistanceFunction<T> {
	if k > kmean.sample_cnt() {
		return Err(KMeansError::InsufficientDistinctSeeds { k, available: kmean.sample_cnt() });
	}
	// Distinct positions, not distinct values
	let seed_ids = index::sample(config.rnd.borrow_mut().deref_mut(), kmean.sample_cnt(), k);
	trace!(?seed_ids, "selected random seed samples");
	Ok(seed_ids.into_iter().map(|id| kmean.samples[id].clone()).collect())
}
