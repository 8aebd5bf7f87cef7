//! # kmeans-palette - API documentation
//!
//! kmeans-palette reduces the color palette of an image to a few representative colors, by
//! clustering the image's pixels with the k-means algorithm.
//!
//! ## Design target
//! The clustering core is independent of images: it operates on plain, fixed-length vectors of unsigned
//! integer components ([`Vector`]), which makes the calculation exactly reproducible. Centers are the
//! (truncated) integer mean of their members, so they are themselves valid colors.
//! Image decoding ([`source`]) and rendering of the result ([`report`]) are thin layers around it.
//!
//! ## Supported variants
//! For a list of supported variants, have a look at the documentation of [`KMeans`].
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. There exist
//! multiple algorithms for this initialization, most of which are based on at least some
//! degree of randomness. For a list of implemented initialization methods, see [`KMeans`].
//!
//! ## Supported component types
//! - [`u8`]
//! - [`u16`]
//! - [`u32`]
//!
//! ## Example
//! ```rust
//! use kmeans_palette::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     // Generate some random colors
//!     let mut rnd = StdRng::seed_from_u64(1337);
//!     let samples: Vec<Vector<u8>> = (0..2000).map(|_| Vector::from(rnd.gen::<[u8; 3]>())).collect();
//!
//!     // Calculate kmeans, using kmean++ as initialization-method
//!     let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
//!     let conf = KMeansConfig::build().random_generator(rnd).build();
//!     let result = kmean.kmeans_lloyd(4, 100, KMeans::init_kmeanplusplus, &conf).unwrap();
//!
//!     println!("Centers: {:?}", result.centers());
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Iterations: {}", result.iterations);
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans_palette::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let mut rnd = StdRng::seed_from_u64(42);
//!     let samples: Vec<Vector<u8>> = (0..2000).map(|_| Vector::from(rnd.gen::<[u8; 3]>())).collect();
//!
//!     let conf = KMeansConfig::<u8>::build()
//!         .init_done(&|_| println!("Initialization completed."))
//!         .iteration_done(&|s, nr, max_movement|
//!             println!("Iteration {} - Error: {:.2} | Max. movement: {:.2}", nr, s.distsum, max_movement))
//!         .random_generator(rnd)
//!         .build();
//!
//!     let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
//!     let result = kmean.kmeans_lloyd(4, 100, KMeans::init_random_sample, &conf).unwrap();
//!     println!("Converged: {:?}", result.convergence);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It takes ownership of the samples, validates
//! that they share one dimensionality, and is never mutated afterwards. The instance-methods of [`KMeans`]
//! represent the supported k-Means variants, each of them producing a new [`KMeansState`] per iteration
//! and returning the last one as the result. The single steps ([`KMeans::assign`] and [`KMeans::update`])
//! are exposed as well, for callers that want to drive the iteration themselves.
//!
//! All of the variant-methods take the chosen centroid initialization method as argument. These
//! initialization-method implementations are static methods within the [`KMeans`] struct, which are simply passed in as reference.

#[macro_use] mod helpers;
mod primitive;
mod vector;
mod error;
mod api;
mod variants;
mod inits;
mod abort_strategy;
mod distances;
pub mod source;
pub mod report;

pub use abort_strategy::AbortStrategy;
pub use api::{
    Assignment, Cluster, Convergence, DistanceFunction, InitDoneCallbackFn, IterationDoneCallbackFn,
    KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState,
};
pub use distances::EuclideanDistance;
pub use error::KMeansError;
pub use primitive::Component;
pub use vector::Vector;
