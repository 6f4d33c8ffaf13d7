use crate::{
    math::shape_error::ShapeError,
    network::{cache::TrainingTrace, network::Network},
    train::example::TrainingExample,
};

/// One full-batch epoch: forward and backward over every example, gradients
/// summed across all of them, then a single weight update.
///
/// Returns the `(error_before, error_after)` pair of
/// `Network::apply_gradients_and_reset`, which only describes the last
/// example in `examples`.
pub fn train_epoch(network: &mut Network, examples: &[TrainingExample]) -> Result<(f64, f64), ShapeError> {
    let mut last_trace = TrainingTrace::default();

    for example in examples {
        let (_, trace) = network.evaluate_for_training(&example.inputs, &example.targets)?;
        network.accumulate_gradients(&trace)?;
        last_trace = trace;
    }

    network.apply_gradients_and_reset(&last_trace)
}
