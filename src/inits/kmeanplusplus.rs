use crate::{Component, DistanceFunction, KMeans, KMeansConfig, KMeansError, Vector};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rayon::prelude::*;
use std::ops::DerefMut;
use tracing::trace;

#[inline(always)]
pub fn calculate<T, D>(kmean: &KMeans<T, D>, k: usize, config: &KMeansConfig<'_, T>) -> Result<Vec<Vector<T>>, KMeansError>
where
    T: Component,
    D: DistanceFunction<T>,
{
    let sample_cnt = kmean.sample_cnt();
    if k > sample_cnt {
        return Err(KMeansError::InsufficientDistinctSeeds { k, available: sample_cnt });
    }
    if k == 0 {
        return Ok(Vec::new());
    }
    let mut rnd = config.rnd.borrow_mut();
    let mut seed_ids = Vec::with_capacity(k);

    // Randomly select first centroid
    let mut last_id = rnd.gen_range(0..sample_cnt);
    seed_ids.push(last_id);

    // Squared distance of each sample to its nearest centroid so far
    let mut min_distances = vec![f64::INFINITY; sample_cnt];
    for _ in 1..k {
        let last = kmean.samples[last_id].coords();
        min_distances.par_iter_mut()
            .zip(kmean.samples.par_iter())
            .for_each(|(min_dist, s)| {
                let d = kmean.distance.distance(s.coords(), last);
                if d * d < *min_dist {
                    *min_dist = d * d;
                }
            });

        // Chosen samples have a weight of 0, so they can not be drawn twice
        last_id = match WeightedIndex::new(&min_distances) {
            Ok(centroid_index) => centroid_index.sample(rnd.deref_mut()),
            Err(_) => {
                // Every sample coincides with a centroid -> draw uniformly from the remaining positions
                let remaining: Vec<usize> = (0..sample_cnt).filter(|id| !seed_ids.contains(id)).collect();
                *remaining.choose(rnd.deref_mut()).ok_or(KMeansError::InsufficientDistinctSeeds { k, available: sample_cnt })?
            }
        };
        seed_ids.push(last_id);
    }
    trace!(?seed_ids, "selected k-means++ seed samples");

    Ok(seed_ids.into_iter().map(|id| kmean.samples[id].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use crate::EuclideanDistance;

    #[test]
    fn picks_far_apart_seeds() {
        // two point-blobs: the second seed always lands in the blob the first one did not
        let mut samples = colors(&[[0, 0, 0]; 4]);
        samples.extend(colors(&[[250, 250, 250]; 4]));
        let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
        for seed in 0..20 {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let seeds = calculate(&kmean, 2, &conf).unwrap();
            assert_ne!(seeds[0].coords()[0] > 100, seeds[1].coords()[0] > 100);
        }
    }

    #[test]
    fn identical_samples_still_give_k_seeds() {
        let kmean = KMeans::new(colors(&[[7, 7, 7]; 5]), EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(5)).build();
        let seeds = calculate(&kmean, 5, &conf).unwrap();
        assert_eq!(seeds, colors(&[[7, 7, 7]; 5]));
    }

    #[test]
    fn fails_fast_without_enough_samples() {
        let kmean = KMeans::new(colors(&[[7, 7, 7]]), EuclideanDistance).unwrap();
        let res = calculate(&kmean, 2, &KMeansConfig::default());
        assert!(matches!(res, Err(KMeansError::InsufficientDistinctSeeds { k: 2, available: 1 })));
    }
}
