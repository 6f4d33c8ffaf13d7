// Training loop: convergence on the reference sequences, stopping rules and
// progress reporting.

use std::sync::mpsc;

use feedback_nn::{
    train::{batch_error, predictions, train_epoch},
    train_until_converged, Network, NetworkConfig, TrainConfig, TrainingExample,
};
use rand::{rngs::StdRng, SeedableRng};

const THRESHOLD: f64 = 1e-4;

fn reference_examples() -> Vec<TrainingExample> {
    vec![
        TrainingExample::new(vec![0.0, 0.0], vec![0.0, 0.0]).unwrap(),
        TrainingExample::new(vec![1.0, 0.0], vec![1.0, 1.0]).unwrap(),
        TrainingExample::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap(),
        TrainingExample::new(vec![1.0, 1.0, 0.0], vec![1.0, 0.0, 0.0]).unwrap(),
        TrainingExample::new(vec![1.0, 1.0, 1.0], vec![1.0, 0.0, 1.0]).unwrap(),
    ]
}

fn seeded(layers: Vec<usize>, seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    Network::with_rng(NetworkConfig::new(layers).unwrap(), &mut rng)
}

#[test]
fn test_reference_sequences_converge() {
    let examples = reference_examples();
    let config = TrainConfig::new(THRESHOLD, Some(60_000));

    // Some initializations settle in a local minimum, so try a few seeds.
    let (network, report) = (0..10)
        .map(|seed| {
            let mut network = seeded(vec![3, 3, 1], seed);
            let report = train_until_converged(&mut network, &examples, &config).unwrap();
            (network, report)
        })
        .find(|(_, report)| report.converged)
        .expect("no seed converged");

    assert!(report.epochs > 0);
    assert!(report.batch_error < THRESHOLD);
    assert_eq!(report.batch_error, batch_error(&network, &examples).unwrap());

    // Inference reproduces every final target within the tolerance.
    let tolerance = (2.0 * THRESHOLD).sqrt();
    for (example, output) in examples.iter().zip(predictions(&network, &examples).unwrap()) {
        let target = example.final_target().unwrap();
        assert!(
            (output - target).abs() < tolerance,
            "{:?} -> {output}, expected {target}",
            example.inputs
        );
    }
}

#[test]
fn test_single_sequence_converges() {
    let examples = vec![TrainingExample::new(vec![0.0, 0.0], vec![0.0, 0.0]).unwrap()];
    let mut network = seeded(vec![3, 1], 17);

    let report =
        train_until_converged(&mut network, &examples, &TrainConfig::new(THRESHOLD, Some(200_000))).unwrap();

    assert!(report.converged);
    assert!(network.evaluate(&[0.0, 0.0]).unwrap() < (2.0 * THRESHOLD).sqrt());
}

#[test]
fn test_epoch_limit_stops_training() {
    let examples = reference_examples();
    let mut network = seeded(vec![3, 3, 1], 2);

    let report = train_until_converged(&mut network, &examples, &TrainConfig::new(THRESHOLD, Some(3))).unwrap();
    assert_eq!(report.epochs, 3);
    assert!(!report.converged);
    assert_eq!(report.batch_error, batch_error(&network, &examples).unwrap());

    let untouched = seeded(vec![3, 3, 1], 2);
    let mut idle = seeded(vec![3, 3, 1], 2);
    let report = train_until_converged(&mut idle, &examples, &TrainConfig::new(THRESHOLD, Some(0))).unwrap();
    assert_eq!(report.epochs, 0);
    assert_eq!(idle.weights(), untouched.weights());
}

#[test]
fn test_empty_example_list_is_trivially_converged() {
    let mut network = seeded(vec![3, 1], 0);
    let report = train_until_converged(&mut network, &[], &TrainConfig::default()).unwrap();
    assert_eq!(report.epochs, 0);
    assert!(report.converged);
}

#[test]
fn test_train_epoch_leaves_accumulators_zeroed() {
    let examples = reference_examples();
    let mut network = seeded(vec![3, 3, 1], 8);
    let before: Vec<_> = network.weights().into_iter().cloned().collect();

    let (last_before, last_after) = train_epoch(&mut network, &examples).unwrap();
    assert_eq!(last_before, last_after);

    let last = examples.last().unwrap();
    let mut replay = seeded(vec![3, 3, 1], 8);
    let (_, trace) = replay.evaluate_for_training(&last.inputs, &last.targets).unwrap();
    assert_eq!(last_before, trace.final_error());

    assert_ne!(network.weights().into_iter().cloned().collect::<Vec<_>>(), before);
    for g in network.gradients() {
        assert!(g.data.iter().flatten().all(|&x| x == 0.0));
    }

    // The same epoch by hand: gradients of every example summed, one update.
    for example in &examples {
        let (_, trace) = replay.evaluate_for_training(&example.inputs, &example.targets).unwrap();
        replay.accumulate_gradients(&trace).unwrap();
    }
    replay.apply_gradients_and_reset(&trace).unwrap();
    assert_eq!(replay.weights(), network.weights());
}

#[test]
fn test_progress_channel_reports_each_epoch() {
    let examples = reference_examples();
    let mut network = seeded(vec![3, 3, 1], 6);

    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(THRESHOLD, Some(5));
    config.progress_tx = Some(tx);

    let report = train_until_converged(&mut network, &examples, &config).unwrap();
    drop(config);

    let stats: Vec<_> = rx.iter().collect();
    assert_eq!(stats.len() as u64, report.epochs);
    assert_eq!(stats.iter().map(|s| s.epoch).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(stats.last().unwrap().batch_error, report.batch_error);
}

#[test]
fn test_dropped_receiver_stops_training() {
    let examples = reference_examples();
    let mut network = seeded(vec![3, 3, 1], 6);

    let (tx, rx) = mpsc::channel();
    drop(rx);
    let mut config = TrainConfig::new(THRESHOLD, None);
    config.progress_tx = Some(tx);

    let report = train_until_converged(&mut network, &examples, &config).unwrap();
    assert_eq!(report.epochs, 1);
    assert!(!report.converged);
}

#[test]
fn test_mismatched_example_aborts_training() {
    let mut examples = reference_examples();
    examples.push(TrainingExample {
        inputs: vec![1.0, 0.0],
        targets: vec![1.0],
    });
    let mut network = seeded(vec![3, 3, 1], 0);
    assert!(train_until_converged(&mut network, &examples, &TrainConfig::default()).is_err());
    assert!(TrainingExample::new(vec![1.0], vec![]).is_err());
}
