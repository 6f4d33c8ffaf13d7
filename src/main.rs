use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use feedback_nn::{
    train::{predictions, TrainingReport},
    train_until_converged, Network, NetworkConfig, TrainConfig, TrainingExample,
};

#[derive(Parser)]
#[command(
    name = "feedback-nn",
    about = "Train a tiny output-feedback network on short binary sequences"
)]
struct Args {
    /// Network config JSON (`{"layers": [3, 3, 1], "learning_rate": 1.0}`)
    #[arg(long)]
    network: Option<String>,

    /// Training config JSON (threshold, max_epochs, log_every)
    #[arg(long)]
    train: Option<String>,

    /// Training examples JSON (`[{"inputs": [...], "targets": [...]}, ...]`)
    #[arg(long)]
    data: Option<String>,

    /// Seed for weight initialization; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many epochs even if not converged
    #[arg(long)]
    max_epochs: Option<u64>,

    /// Train until converged, however long it takes
    #[arg(long, conflicts_with = "max_epochs")]
    unbounded: bool,

    /// Batch error below which training stops
    #[arg(long)]
    threshold: Option<f64>,
}

fn reference_examples() -> Result<Vec<TrainingExample>> {
    let pairs: [(&[f64], &[f64]); 5] = [
        (&[0.0, 0.0], &[0.0, 0.0]),
        (&[1.0, 0.0], &[1.0, 1.0]),
        (&[0.0, 1.0], &[0.0, 1.0]),
        (&[1.0, 1.0, 0.0], &[1.0, 0.0, 0.0]),
        (&[1.0, 1.0, 1.0], &[1.0, 0.0, 1.0]),
    ];
    pairs
        .iter()
        .map(|(inputs, targets)| TrainingExample::new(inputs.to_vec(), targets.to_vec()).map_err(Into::into))
        .collect()
}

/// Longer sequences than anything in the training set, with the value the
/// trained network is expected to produce.
const PROBES: [([f64; 5], f64); 6] = [
    ([0.0, 0.0, 0.0, 0.0, 0.0], 0.0),
    ([0.0, 1.0, 1.0, 0.0, 0.0], 0.0),
    ([1.0, 1.0, 1.0, 1.0, 0.0], 0.0),
    ([1.0, 0.0, 0.0, 0.0, 0.0], 1.0),
    ([0.0, 0.0, 0.0, 1.0, 0.0], 1.0),
    ([0.0, 0.0, 0.0, 1.0, 1.0], 0.0),
];

fn print_predictions(network: &Network, examples: &[TrainingExample]) -> Result<()> {
    let outputs = predictions(network, examples)?;
    for (example, output) in examples.iter().zip(outputs) {
        println!(
            "({:?}) = {:.6} (should be {})",
            example.inputs,
            output,
            example.final_target().unwrap_or(0.0)
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let network_config = match &args.network {
        Some(path) => NetworkConfig::load_json(path)
            .with_context(|| format!("failed to load network config from {path}"))?,
        None => NetworkConfig::default(),
    };

    let mut train_config = match &args.train {
        Some(path) => TrainConfig::load_json(path)
            .with_context(|| format!("failed to load training config from {path}"))?,
        None => TrainConfig::default(),
    };
    if let Some(max_epochs) = args.max_epochs {
        train_config.max_epochs = Some(max_epochs);
    }
    if args.unbounded {
        train_config.max_epochs = None;
    }
    if let Some(threshold) = args.threshold {
        train_config.error_threshold = threshold;
    }

    let examples = match &args.data {
        Some(path) => TrainingExample::load_json(path)
            .with_context(|| format!("failed to load training examples from {path}"))?,
        None => reference_examples()?,
    };

    let mut network = match args.seed {
        Some(seed) => Network::with_rng(network_config, &mut StdRng::seed_from_u64(seed)),
        None => Network::new(network_config),
    };

    print_predictions(&network, &examples)?;

    let TrainingReport { epochs, batch_error, converged } =
        train_until_converged(&mut network, &examples, &train_config).context("training failed")?;

    println!("[Trained for {epochs} epochs, batch error {batch_error:.6}]");
    if !converged {
        println!("warning: did not reach error threshold {}", train_config.error_threshold);
    }
    print_predictions(&network, &examples)?;

    println!("Testing training:");
    for (sequence, expected) in PROBES {
        let output = network.evaluate(&sequence)?;
        println!("{sequence:?} is {output:.6} (should be {expected})");
    }

    Ok(())
}
