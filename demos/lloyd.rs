use kmeans_palette::*;

fn main() {
    let (sample_cnt, k, max_iter) = (20000, 4, 100);

    // Generate some random colors
    let samples: Vec<Vector<u8>> = (0..sample_cnt).map(|_| Vector::from(rand::random::<[u8; 3]>())).collect();

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::new(samples, EuclideanDistance).unwrap();
    let result = kmean.kmeans_lloyd(k, max_iter, KMeans::init_kmeanplusplus, &KMeansConfig::default()).unwrap();

    println!("Centers: {:?}", result.centers());
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Error: {}", result.distsum);
    println!("{}", report::PaletteReport::from(&result));
}
