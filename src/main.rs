use anyhow::{ensure, Context};
use clap::{Parser, ValueEnum};
use kmeans_palette::report::PaletteReport;
use kmeans_palette::*;
use rand::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Init {
    /// k distinct sample positions, chosen uniformly at random
    RandomSample,
    /// spread-out seeds (k-means++)
    Kmeanplusplus,
}

#[derive(Parser, Debug)]
#[command(name = "kmeans-palette")]
#[command(about = "Reduce an image to its dominant colors using k-means clustering")]
struct Args {
    /// Image to process.
    #[arg(default_value = "lenna.jpg")]
    file: PathBuf,

    /// Amount of colors to extract.
    #[arg(short = 'k', long, default_value_t = 3)]
    clusters: usize,

    /// Stop once no center moves by this distance or more within one iteration.
    #[arg(short, long, default_value_t = 1.0)]
    threshold: f64,

    /// Give up after this many iterations.
    #[arg(long, default_value_t = 1000)]
    max_iter: usize,

    /// Seed for the random number generator. Seeded from OS entropy if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Seed initialization method.
    #[arg(long, value_enum, default_value_t = Init::RandomSample)]
    init: Init,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    ensure!(args.clusters >= 1, "at least one cluster is required (-k {})", args.clusters);
    ensure!(args.threshold.is_finite() && args.threshold >= 0.0, "invalid threshold {}", args.threshold);
    ensure!(args.max_iter >= 1, "--max-iter has to be at least 1");

    println!("Processing file {}", args.file.display());
    let samples = source::load_samples(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let start = Instant::now();
    let report = process(samples, &args)?;
    let duration = start.elapsed();

    println!("{}", report);
    println!("Finished processing, duration {:?}", duration);
    Ok(())
}

fn process(samples: Vec<Vector<u8>>, args: &Args) -> anyhow::Result<PaletteReport> {
    let rnd = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let iteration_done = |s: &KMeansState<u8>, nr: usize, max_movement: f64| {
        tracing::debug!(iteration = nr, max_movement, distsum = s.distsum, "iteration done")
    };
    let conf = KMeansConfig::build()
        .random_generator(rnd)
        .abort_strategy(AbortStrategy::CenterMovement { threshold: args.threshold })
        .iteration_done(&iteration_done)
        .build();

    let kmean = KMeans::new(samples, EuclideanDistance)?;
    let result = match args.init {
        Init::RandomSample => kmean.kmeans_lloyd(args.clusters, args.max_iter, KMeans::init_random_sample, &conf),
        Init::Kmeanplusplus => kmean.kmeans_lloyd(args.clusters, args.max_iter, KMeans::init_kmeanplusplus, &conf),
    }
    .context("clustering failed")?
    .into_converged()?;

    Ok(PaletteReport::from(&result))
}
