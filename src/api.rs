use crate::{AbortStrategy, Component, EuclideanDistance, KMeansError, Vector};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, f64);

/// Metric used to compare samples with cluster centers.
///
/// Implementations may assume that both slices have the same length.
pub trait DistanceFunction<T: Component>: Sync + Send {
    fn distance(&self, a: &[T], b: &[T]) -> f64;
}

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Component> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Seeded [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **max_movement**: Largest distance a cluster center moved during the iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy
}
impl<'a, T: Component> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            abort_strategy: AbortStrategy::default()
        }
    }
}
impl<'a, T: Component> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Component> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig").field("abort_strategy", &self.abort_strategy).finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Component> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Component> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::CenterMovement`] `{ threshold: 1.0 }`
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Where a calculation stands regarding its abort-strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// Seeded or still iterating. Centers are not trustworthy before the first update step.
    Pending,
    /// The abort-strategy signalled convergence.
    Converged,
    /// The iteration limit was reached before the abort-strategy signalled convergence.
    IterationLimit,
}

/// One cluster of a [`KMeansState`].
///
/// ## Fields
/// - **center**: The cluster's current center
/// - **members**: Indices (into the samples given to [`KMeans`]) of all samples assigned to this cluster
/// by the most recent assignment step. Seeded clusters (as seen by the `init_done` callback) have no members yet:
/// a seed is a value, not necessarily a sample position (see [`KMeans::init_precomputed`]), so membership only
/// starts with the first assignment step.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<T: Component> {
    pub center: Vector<T>,
    pub members: Vec<usize>,
}
impl<T: Component> Cluster<T> {
    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }
}

/// Result of an assignment step: a full partition of all samples over the given centers.
#[derive(Clone, Debug)]
pub struct Assignment {
    pub(crate) assignments: Vec<usize>,
    pub(crate) groups: Vec<Vec<usize>>,
    pub(crate) distsum: f64,
}
impl Assignment {
    /// Index of the nearest center, for every sample
    pub fn assignments(&self) -> &[usize] { &self.assignments }
    /// Sample indices per center, in ascending order
    pub fn groups(&self) -> &[Vec<usize>] { &self.groups }
    /// Sum of squared distances from all samples to their nearest center
    pub fn distsum(&self) -> f64 { self.distsum }
}


/// This is the data-structure storing the current state during calculation, as well as the final result,
/// as returned by the API.
/// Every iteration produces a new state from the previous one, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Generics
/// - **T**: Component type of the clustered samples
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **clusters**: The clusters, each with its center and members. Cluster `i` stays cluster `i` for the whole run
/// - **assignments**: Vector mapping each sample to its respective nearest cluster
/// - **distsum**: The total sum of squared distances from all samples to their respective centers
/// - **max_movement**: Largest distance a cluster center moved during the last iteration
/// - **iterations**: Amount of finished iterations
/// - **convergence**: Whether the calculation converged
#[derive(Clone, Debug)]
pub struct KMeansState<T: Component> {
    pub k: usize,
    pub clusters: Vec<Cluster<T>>,
    pub assignments: Vec<usize>,
    pub distsum: f64,
    pub max_movement: f64,
    pub iterations: usize,
    pub convergence: Convergence,

    pub(crate) sample_dims: usize
}
impl<T: Component> KMeansState<T> {
    pub(crate) fn seeded(seeds: Vec<Vector<T>>, sample_dims: usize) -> Self {
        Self {
            k: seeds.len(),
            clusters: seeds.into_iter().map(|center| Cluster { center, members: Vec::new() }).collect(),
            assignments: Vec::new(),
            distsum: f64::INFINITY,
            max_movement: f64::INFINITY,
            iterations: 0,
            convergence: Convergence::Pending,
            sample_dims
        }
    }

    /// Current cluster centers, ordered by cluster index.
    pub fn centers(&self) -> Vec<Vector<T>> {
        self.clusters.iter().map(|c| c.center.clone()).collect()
    }

    pub fn sample_dims(&self) -> usize { self.sample_dims }

    pub fn is_converged(&self) -> bool { self.convergence == Convergence::Converged }

    /// Turn a result that hit its iteration limit into an error.
    ///
    /// ## Errors
    /// [`KMeansError::NonConvergence`] unless the calculation converged.
    pub fn into_converged(self) -> Result<Self, KMeansError> {
        match self.convergence {
            Convergence::Converged => Ok(self),
            _ => Err(KMeansError::NonConvergence { iterations: self.iterations, max_movement: self.max_movement })
        }
    }
}




/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. All samples are validated
/// to share one dimensionality on construction, so no calculation ever sees mismatching vectors.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - Random-Sample [`KMeans::init_random_sample`]
/// - K-Mean++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed [`KMeans::init_precomputed`]
pub struct KMeans<T: Component, D: DistanceFunction<T> = EuclideanDistance> {
    pub(crate) samples: Vec<Vector<T>>,
    pub(crate) sample_dims: usize,
    pub(crate) distance: D
}
impl<T: Component, D: DistanceFunction<T>> KMeans<T, D> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: The samples to cluster
    /// - **distance**: The distance function used to compare samples and centers
    ///
    /// ## Errors
    /// - [`KMeansError::EmptyInput`] if there are no samples
    /// - [`KMeansError::InvalidDimensionality`] if not all samples have the same dimensionality
    pub fn new(samples: Vec<Vector<T>>, distance: D) -> Result<Self, KMeansError> {
        let sample_dims = samples.first().ok_or(KMeansError::EmptyInput)?.dims();
        if let Some((index, s)) = samples.iter().enumerate().find(|(_, s)| s.dims() != sample_dims) {
            return Err(KMeansError::InvalidDimensionality { index, expected: sample_dims, actual: s.dims() });
        }
        Ok(Self { samples, sample_dims, distance })
    }

    /// Create a new instance of the [`KMeans`] structure from raw, interleaved sample data
    /// (e.g. the raw buffer of an RGB image).
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_dims**: Amount of dimensions each sample from the **samples** slice has
    /// - **distance**: The distance function used to compare samples and centers
    pub fn from_flat(samples: &[T], sample_dims: usize, distance: D) -> Result<Self, KMeansError> {
        if samples.is_empty() {
            return Err(KMeansError::EmptyInput);
        }
        if sample_dims == 0 || samples.len() % sample_dims != 0 {
            let sample_cnt = samples.len() / sample_dims.max(1);
            return Err(KMeansError::InvalidDimensionality {
                index: sample_cnt, expected: sample_dims, actual: samples.len() - sample_cnt * sample_dims
            });
        }
        let samples = samples.chunks_exact(sample_dims).map(|s| Vector::new(s.to_vec())).collect();
        Ok(Self { samples, sample_dims, distance })
    }

    pub fn samples(&self) -> &[Vector<T>] { &self.samples }
    pub fn sample_cnt(&self) -> usize { self.samples.len() }
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    pub(crate) fn validate_centers(&self, centers: &[Vector<T>]) -> Result<(), KMeansError> {
        match centers.iter().enumerate().find(|(_, c)| c.dims() != self.sample_dims) {
            Some((index, c)) => Err(KMeansError::InvalidDimensionality { index, expected: self.sample_dims, actual: c.dims() }),
            None => Ok(())
        }
    }

    /// Index of, and distance to, the nearest of **centers**. Ties go to the lowest index.
    #[inline(always)]
    fn nearest_center(&self, sample: &Vector<T>, centers: &[Vector<T>]) -> (usize, f64) {
        centers.iter()
            .map(|c| self.distance.distance(sample.coords(), c.coords()))
            .enumerate()
            .min_by(|(_,d0), (_,d1)| d0.total_cmp(d1))
            .unwrap_or((0, f64::INFINITY))
    }

    /// Assignment step: partition all samples over **centers**, assigning every sample to its
    /// nearest center (ties go to the center with the lowest index).
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidClusterCount`] if **centers** is empty
    /// - [`KMeansError::InvalidDimensionality`] if a center does not match the samples' dimensionality
    pub fn assign(&self, centers: &[Vector<T>]) -> Result<Assignment, KMeansError> {
        if centers.is_empty() {
            return Err(KMeansError::InvalidClusterCount { k: 0 });
        }
        self.validate_centers(centers)?;

        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (self.samples.len() / rayon::current_num_threads()).max(1);
        let nearest: Vec<(usize, f64)> = self.samples.par_iter()
            .with_min_len(work_packet_size)
            .map(|s| self.nearest_center(s, centers))
            .collect();

        let mut groups = vec![Vec::new(); centers.len()];
        let mut assignments = Vec::with_capacity(nearest.len());
        let mut distsum = 0.0;
        for (sample_id, (center_id, dist)) in nearest.into_iter().enumerate() {
            groups[center_id].push(sample_id);
            assignments.push(center_id);
            distsum += dist * dist;
        }
        Ok(Assignment { assignments, groups, distsum })
    }

    /// Update step: replace every cluster's members with its group from **assignment**, and recompute
    /// its center as the centroid of these members. A cluster without members keeps its previous center.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidClusterCount`] if **assignment** was calculated for a different amount of clusters.
    pub fn update(&self, state: &KMeansState<T>, assignment: Assignment) -> Result<KMeansState<T>, KMeansError> {
        crate::variants::Lloyd::update_centroids(self, state, assignment)
    }

    /// Sum of squared distances from all samples to the center of their assigned cluster.
    pub(crate) fn distsum(&self, state: &KMeansState<T>) -> f64 {
        self.samples.par_iter()
            .zip(state.assignments.par_iter().cloned())
            .map(|(s, cluster_id)| {
                let d = self.distance.distance(s.coords(), state.clusters[cluster_id].center.coords());
                d * d
            })
            .sum()
    }



    /// Normal K-Means algorithm implementation (Lloyd): alternate assignment and update steps until
    /// the configured [`AbortStrategy`] signals convergence, or **max_iter** iterations ran.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of iterations
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result). Check [`KMeansState::convergence`]
    /// (or use [`KMeansState::into_converged`]) to find out whether the iteration limit was hit.
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidClusterCount`] if **k** is 0
    /// - [`KMeansError::InsufficientDistinctSeeds`] if **k** exceeds the amount of samples
    /// - [`KMeansError::InvalidIterationLimit`] if **max_iter** is 0
    /// - [`KMeansError::InvalidThreshold`] if the abort-strategy is misconfigured
    /// - any error of the initialization method
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_palette::*;
    /// use rand::prelude::*;
    ///
    /// let samples = vec![
    ///     Vector::from([250u8, 10, 10]), Vector::from([245, 0, 5]),
    ///     Vector::from([5, 5, 240]), Vector::from([0, 10, 250]),
    /// ];
    /// let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
    /// let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
    /// let result = kmean.kmeans_lloyd(2, 100, KMeans::init_random_sample, &conf).unwrap();
    ///
    /// println!("Centers: {:?}", result.centers());
    /// println!("Iterations: {}", result.iterations);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T, D>, usize, &KMeansConfig<'c, T>) -> Result<Vec<Vector<T>>, KMeansError> {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// K-Mean++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by selecting one sample as first centroid.
    /// Proceeding from there, the method iteratively selects one new centroid (per iteration), drawn with
    /// a probability proportional to each sample's squared distance to its nearest, already selected centroid.
    /// This leads to a tendency of selecting centroids, that are far away from each other.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_kmeanplusplus<'a>(kmean: &KMeans<T, D>, k: usize, config: &KMeansConfig<'a, T>) -> Result<Vec<Vector<T>>, KMeansError> {
        crate::inits::kmeanplusplus::calculate(kmean, k, config)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method randomly selects k distinct sample positions (without replacement) as initial centroids.
    /// Positions, not values, are distinct: two samples with the same color can both become centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_sample<'a>(kmean: &KMeans<T, D>, k: usize, config: &KMeansConfig<'a, T>) -> Result<Vec<Vector<T>>, KMeansError> {
        crate::inits::randomsample::calculate(kmean, k, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given **centers** as initial centroids. Their amount has to match k.
    pub fn init_precomputed(centers: Vec<Vector<T>>) -> impl for<'a> FnOnce(&KMeans<T, D>, usize, &KMeansConfig<'a, T>) -> Result<Vec<Vector<T>>, KMeansError> {
        move |kmean, k, config| crate::inits::precomputed::calculate(kmean, k, config, centers)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    #[test]
    fn construction_validates_dimensions() {
        let res = KMeans::new(vec![Vector::from([1u8, 2, 3]), Vector::from([1u8, 2, 3]), Vector::from([4u8, 5])], EuclideanDistance);
        assert!(matches!(res, Err(KMeansError::InvalidDimensionality { index: 2, expected: 3, actual: 2 })));

        let res = KMeans::<u8>::new(vec![], EuclideanDistance);
        assert!(matches!(res, Err(KMeansError::EmptyInput)));

        let res = KMeans::from_flat(&[1u8, 2, 3, 4, 5, 6, 7], 3, EuclideanDistance);
        assert!(matches!(res, Err(KMeansError::InvalidDimensionality { index: 2, expected: 3, actual: 1 })));

        let kmean = KMeans::from_flat(&[1u8, 2, 3, 4, 5, 6], 3, EuclideanDistance).unwrap();
        assert_eq!(kmean.sample_cnt(), 2);
        assert_eq!(kmean.sample_dims(), 3);
        assert_eq!(kmean.samples()[1], Vector::from([4u8, 5, 6]));
    }

    #[test]
    fn assignment_is_complete_partition() {
        let samples = random_colors(1000, 7);
        let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
        let centers = vec![Vector::from([0u8, 0, 0]), Vector::from([128u8, 128, 128]), Vector::from([255u8, 255, 255]), Vector::from([255u8, 0, 0])];

        let assignment = kmean.assign(&centers).unwrap();
        assert_partition_complete(assignment.groups(), kmean.sample_cnt());
        assert_eq!(assignment.assignments().len(), kmean.sample_cnt());
        for (cluster_id, group) in assignment.groups().iter().enumerate() {
            assert!(group.iter().all(|&s| assignment.assignments()[s] == cluster_id));
        }
    }

    #[test]
    fn assignment_matches_sequential_search() {
        let samples = random_colors(2000, 3);
        let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
        let centers: Vec<Vector<u8>> = random_colors(6, 99);

        // calculate assignments using method that (hopefully) works.
        let mut should_assignments = Vec::new();
        let mut should_distsum = 0.0;
        for s in kmean.samples() {
            let mut best = (0, f64::MAX);
            for (ci, c) in centers.iter().enumerate() {
                let d = s.distance(c).unwrap();
                if d < best.1 {
                    best = (ci, d);
                }
            }
            should_assignments.push(best.0);
            should_distsum += best.1 * best.1;
        }

        // calculate assignments using parallel code
        let assignment = kmean.assign(&centers).unwrap();
        assert_eq!(assignment.assignments(), &should_assignments[..]);
        assert_approx_eq!(assignment.distsum(), should_distsum, 1e-6);
    }

    #[test]
    fn assignment_ties_go_to_lowest_index() {
        let kmean = KMeans::new(colors(&[[5, 5, 5], [0, 0, 0], [10, 10, 10]]), EuclideanDistance).unwrap();
        // (5,5,5) is equidistant to both centers
        let centers = colors(&[[0, 0, 0], [10, 10, 10]]);
        let assignment = kmean.assign(&centers).unwrap();
        assert_eq!(assignment.assignments(), &[0, 0, 1]);

        // identical centers: the first one takes everything
        let centers = colors(&[[7, 7, 7], [7, 7, 7]]);
        let assignment = kmean.assign(&centers).unwrap();
        assert_eq!(assignment.groups(), &[vec![0, 1, 2], vec![]]);
    }

    #[test]
    fn assignment_rejects_invalid_centers() {
        let kmean = KMeans::new(colors(&[[5, 5, 5], [0, 0, 0]]), EuclideanDistance).unwrap();
        assert!(matches!(kmean.assign(&[]), Err(KMeansError::InvalidClusterCount { k: 0 })));
        assert!(matches!(
            kmean.assign(&[Vector::from([1u8, 2, 3]), Vector::from([1u8, 2])]),
            Err(KMeansError::InvalidDimensionality { index: 1, expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn seeded_clusters_have_no_members() {
        let state = KMeansState::seeded(colors(&[[1, 2, 3], [4, 5, 6]]), 3);
        assert_eq!(state.k, 2);
        assert!(state.clusters.iter().all(|c| c.is_empty()));
        assert!(state.assignments.is_empty());
        assert_eq!(state.iterations, 0);
        assert_eq!(state.convergence, Convergence::Pending);
    }

    #[test]
    fn into_converged() {
        let mut state = KMeansState::seeded(colors(&[[1, 2, 3]]), 3);
        state.iterations = 4;
        state.max_movement = 2.5;
        state.convergence = Convergence::IterationLimit;
        assert!(!state.is_converged());
        assert!(matches!(
            state.clone().into_converged(),
            Err(KMeansError::NonConvergence { iterations: 4, .. })
        ));
        state.convergence = Convergence::Converged;
        assert!(state.into_converged().is_ok());
    }
}
