//! Boson Sampling Benchmark Suite
//!
//! Usage: benchmark [experiment.json]

use bosonsampling::distribution::summarize;
use bosonsampling::experiment::{run_scaling, ExperimentConfig};
use bosonsampling::interferometer::{random_unitary, HaarSource};
use bosonsampling::{
    configuration_count, enumerate, ExperimentError, OccupationVector, ProbabilityEngine,
};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn benchmark_enumeration() -> Result<(), ExperimentError> {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: Output Configuration Enumeration");
    println!("{}", "=".repeat(60));

    let cases = [(2, 40), (4, 10), (6, 8), (8, 8), (10, 6)];

    for &(photons, modes) in &cases {
        let start = Instant::now();
        let count = enumerate(photons, modes)?.count();
        let elapsed = start.elapsed().as_secs_f64();

        let expected = configuration_count(photons, modes).unwrap_or(0);
        println!(
            "  {} photons / {} modes: {} configurations (expected {}) in {:.3} ms",
            photons,
            modes,
            count,
            expected,
            elapsed * 1000.0
        );
    }
    Ok(())
}

fn benchmark_probability(seed: u64) -> Result<(), ExperimentError> {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: Single Output Probability (Ryser permanent)");
    println!("{}", "=".repeat(60));

    let mut rng = StdRng::seed_from_u64(seed);
    let engine: ProbabilityEngine = ProbabilityEngine::default();

    for photons in [2, 4, 6, 8, 10, 12] {
        let modes = photons * 2;
        let u = random_unitary(modes, &mut rng);
        let input = OccupationVector::single_photons(modes, photons)?;
        // Photons leave through the last modes.
        let mut counts = vec![0; modes];
        counts[modes - photons..].fill(1);
        let output = OccupationVector::new(counts);

        let n_iters = if photons <= 8 { 1000 } else { 20 };

        let start = Instant::now();
        let mut p = 0.0;
        for _ in 0..n_iters {
            p = engine.probability(&input, &output, &u)?;
        }
        let elapsed = start.elapsed().as_secs_f64() / n_iters as f64;

        println!(
            "  {} photons / {} modes: {:.1} μs (p = {:.3e})",
            photons,
            modes,
            elapsed * 1e6,
            p
        );
    }
    Ok(())
}

fn benchmark_distribution(seed: u64) -> Result<(), ExperimentError> {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: Full Output Distribution");
    println!("{}", "=".repeat(60));

    let mut rng = StdRng::seed_from_u64(seed);
    let engine: ProbabilityEngine = ProbabilityEngine::default();
    let inputs = [vec![1, 0, 0, 0], vec![3, 1, 0, 1], vec![0, 3, 2, 2]];

    for counts in inputs {
        let input = OccupationVector::new(counts);
        let u = random_unitary(input.channels(), &mut rng);

        let start = Instant::now();
        let summary = summarize(&engine, &input, &u)?;
        let elapsed = start.elapsed().as_secs_f64();

        println!(
            "  input {}: {} configurations, sum = {:.12}, {:.3} ms",
            input,
            summary.configurations,
            summary.total_probability,
            elapsed * 1000.0
        );
        if let Some(best) = summary.most_likely {
            println!(
                "         most likely {} with p = {:.4}",
                best.configuration, best.probability
            );
        }
    }
    Ok(())
}

fn benchmark_scaling(config: &ExperimentConfig) -> Result<(), ExperimentError> {
    println!("\n{}", "=".repeat(60));
    println!(
        "BENCHMARK: Collision Scaling ({} photons, {}..={} modes)",
        config.photons, config.min_modes, config.max_modes
    );
    println!("{}", "=".repeat(60));

    let mut source = HaarSource::seeded(config.seed);
    let points = run_scaling(config, &mut source)?;

    for point in &points {
        println!(
            "  {:>3} modes: P(collision) = {:.4}, sum = {:.12}, {:.2} ms",
            point.modes, point.collision_probability, point.total_probability, point.elapsed_ms
        );
    }
    Ok(())
}

fn run() -> Result<(), ExperimentError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };

    println!("\n{}", "#".repeat(60));
    println!("#  Boson Sampling Benchmark Suite");
    println!("{}", "#".repeat(60));

    benchmark_enumeration()?;
    benchmark_probability(config.seed)?;
    benchmark_distribution(config.seed)?;
    benchmark_scaling(&config)?;

    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK COMPLETE");
    println!("{}", "=".repeat(60));
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run() {
        error!(%err, "benchmark failed");
        std::process::exit(1);
    }
}
