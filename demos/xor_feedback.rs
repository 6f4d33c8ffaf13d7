use feedback_nn::{train_until_converged, Network, NetworkConfig, TrainConfig, TrainingExample};
use std::sync::mpsc;

// Learns to output `input XOR previous output` on two-step sequences,
// streaming per-epoch progress over a channel.
fn main() {
    let config = NetworkConfig::new(vec![3, 4, 1]).expect("valid layer widths");
    let mut network = Network::new(config);

    let examples = vec![
        TrainingExample::new(vec![0.0, 0.0], vec![0.0, 0.0]).unwrap(),
        TrainingExample::new(vec![1.0, 0.0], vec![1.0, 1.0]).unwrap(),
        TrainingExample::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap(),
        TrainingExample::new(vec![1.0, 1.0], vec![1.0, 0.0]).unwrap(),
    ];

    let (tx, rx) = mpsc::channel();
    let mut train_config = TrainConfig::new(1e-3, Some(200_000));
    train_config.progress_tx = Some(tx);

    let report = train_until_converged(&mut network, &examples, &train_config).expect("training");
    drop(train_config);

    for stats in rx.iter().filter(|s| s.epoch % 5_000 == 0) {
        println!("Epoch {}: batch error = {:.6}", stats.epoch, stats.batch_error);
    }
    println!("{report:?}");

    for example in &examples {
        let output = network.evaluate(&example.inputs).unwrap();
        println!("Input: {:?} -> Output: {:.4}", example.inputs, output);
    }
}
