use kmeans_palette::*;

fn main() {
    let (sample_cnt, k, max_iter) = (20000, 4, 2500);

    // Generate some random colors
    let samples: Vec<Vector<u8>> = (0..sample_cnt).map(|_| Vector::from(rand::random::<[u8; 3]>())).collect();

	let conf = KMeansConfig::<u8>::build()
		.init_done(&|s| println!("Initialization completed. Seeds: {:?}", s.centers()))
		.iteration_done(&|s, nr, max_movement|
			println!("Iteration {} - Error: {:.2} | Max. movement: {:.2} | Cluster sizes: {:?}",
				nr, s.distsum, max_movement, s.clusters.iter().map(|c| c.len()).collect::<Vec<_>>()))
		.abort_strategy(AbortStrategy::CenterMovement { threshold: 0.5 })
		.build();

    // Calculate kmeans, using random samples as initialization-method
    let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
    let result = kmean.kmeans_lloyd(k, max_iter, KMeans::init_random_sample, &conf).unwrap();

    println!("Centers: {:?}", result.centers());
    println!("Converged: {:?} after {} iterations", result.convergence, result.iterations);
}
