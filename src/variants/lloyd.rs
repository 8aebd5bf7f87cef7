use crate::{Assignment, Cluster, Component, Convergence, DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Vector};
use tracing::{debug, trace, warn};

pub(crate) struct Lloyd<T, D> {
	_p: std::marker::PhantomData<(T, D)>
}
impl<T: Component, D: DistanceFunction<T>> Lloyd<T, D> {
    pub(crate) fn update_centroids(data: &KMeans<T, D>, state: &KMeansState<T>, assignment: Assignment) -> Result<KMeansState<T>, KMeansError> {
        if assignment.groups.len() != state.k {
            return Err(KMeansError::InvalidClusterCount { k: assignment.groups.len() });
        }
        if assignment.assignments.len() != data.sample_cnt() {
            return Err(KMeansError::SampleCountMismatch { expected: data.sample_cnt(), actual: assignment.assignments.len() });
        }
        if let Some((index, c)) = state.clusters.iter().enumerate().find(|(_, c)| c.center.dims() != data.sample_dims) {
            return Err(KMeansError::InvalidDimensionality { index, expected: data.sample_dims, actual: c.center.dims() });
        }
        let Assignment { assignments, groups, distsum } = assignment;

        // Calculate new centroids from the new member groups
        let clusters = state.clusters.iter()
            .zip(groups)
            .enumerate()
            .map(|(cluster_id, (prev, members))| {
                let center = match Vector::centroid(members.iter().map(|&s| &data.samples[s])) {
                    Ok(center) => center,
                    Err(KMeansError::EmptyGroup) => {
                        // Empty clusters keep their previous center
                        debug!(cluster_id, "cluster received no samples, keeping its previous center");
                        prev.center.clone()
                    },
                    Err(e) => return Err(e)
                };
                Ok(Cluster { center, members })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let max_movement = state.clusters.iter()
            .zip(clusters.iter())
            .map(|(old, new)| data.distance.distance(old.center.coords(), new.center.coords()))
            .fold(0.0, f64::max);

        Ok(KMeansState {
            k: state.k,
            clusters,
            assignments,
            distsum,
            max_movement,
            iterations: state.iterations + 1,
            convergence: Convergence::Pending,
            sample_dims: state.sample_dims
        })
    }

    #[inline(always)] pub fn calculate<'a, F>(data: &KMeans<T, D>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T, D>, usize, &KMeansConfig<'c, T>) -> Result<Vec<Vector<T>>, KMeansError> {
        if k == 0 {
            return Err(KMeansError::InvalidClusterCount { k });
        }
        if k > data.sample_cnt() {
            return Err(KMeansError::InsufficientDistinctSeeds { k, available: data.sample_cnt() });
        }
        if max_iter == 0 {
            return Err(KMeansError::InvalidIterationLimit);
        }
        config.abort_strategy.validate()?;

        // Initialize clusters and notify subscriber
        let seeds = init(data, k, config)?;
        if seeds.len() != k {
            return Err(KMeansError::SeedCount { expected: k, actual: seeds.len() });
        }
        data.validate_centers(&seeds)?;
        let mut state = KMeansState::seeded(seeds, data.sample_dims);
        debug!(k, sample_cnt = data.sample_cnt(), sample_dims = data.sample_dims, max_iter, "seeded clusters");
        (config.init_done)(&state);
        let mut abort_strategy = config.abort_strategy.create_logic();

        for i in 1..=max_iter {
            let assignment = data.assign(&state.centers())?;
            let next = Self::update_centroids(data, &state, assignment)?;
            trace!(iteration = i, max_movement = next.max_movement, distsum = next.distsum, "finished iteration");

			// Notify subscriber about finished iteration
            (config.iteration_done)(&next, i, next.max_movement);
            let proceed = abort_strategy.next(next.max_movement, next.distsum);
            state = next;
            if !proceed {
                state.convergence = Convergence::Converged;
                state.distsum = data.distsum(&state);
                debug!(iterations = i, max_movement = state.max_movement, distsum = state.distsum, "converged");
                return Ok(state);
            }
        }

        warn!(max_iter, max_movement = state.max_movement, "iteration limit reached before convergence");
        state.convergence = Convergence::IterationLimit;
        state.distsum = data.distsum(&state);
        Ok(state)
    }
}
