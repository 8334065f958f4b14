use kmeans_consensus::*;

fn main() {
    let (sample_cnt, sample_dims, k) = (20000, 16, 4);

    // Generate some random byte data
    let mut samples = vec![0u8; sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

    let kmean: KMeans<u8, f64> = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance)
        .expect("valid sample buffer");
    let conf = KMeansConfig::build().strategy(Strategy::MinDistance).build();
    let result = kmean.fit(k, &conf).expect("valid k");

    println!("Centroids: {:?}", result.centroids);
    if let Some(palette) = result.raw_centroids::<u8, _>(kmean.distance_function()) {
        println!("Centroids as bytes: {:?}", palette);
    }
    println!("Cluster-Assignments: {:?}", &result.assignments[..20]);
    println!("Average distance: {}", result.average_distance);
}
