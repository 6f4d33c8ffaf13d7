use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::{
    math::shape_error::ShapeError,
    network::network::Network,
    train::{
        epoch_stats::{EpochStats, TrainingReport},
        example::TrainingExample,
        train_config::TrainConfig,
        trainer::train_epoch,
    },
};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `examples` until the batch error falls below
/// `config.error_threshold`.
///
/// Every epoch runs [`train_epoch`] and then re-evaluates all examples to get
/// the batch error used for the stopping decision. At least one epoch is
/// always run.
///
/// # Early termination
/// The loop also stops, reporting `converged: false`, if:
/// - `config.max_epochs` epochs have completed, **or**
/// - the `progress_tx` receiver has been dropped.
///
/// An empty example list trains nothing and reports convergence with zero error.
pub fn train_until_converged(
    network: &mut Network,
    examples: &[TrainingExample],
    config: &TrainConfig,
) -> Result<TrainingReport, ShapeError> {
    if examples.is_empty() {
        return Ok(TrainingReport {
            epochs: 0,
            batch_error: 0.0,
            converged: true,
        });
    }

    let mut epochs: u64 = 0;
    let mut error = batch_error(network, examples)?;

    loop {
        if config.max_epochs.is_some_and(|max| epochs >= max) {
            warn!(epochs, batch_error = error, "epoch limit reached before convergence");
            return Ok(TrainingReport {
                epochs,
                batch_error: error,
                converged: error < config.error_threshold,
            });
        }

        let t_start = Instant::now();

        // ── One full-batch epoch ──────────────────────────────────────────
        let (last_before, last_after) = train_epoch(network, examples)?;
        epochs += 1;
        trace!(epoch = epochs, last_before, last_after, "last example error");

        // ── Stopping metric over the whole batch ──────────────────────────
        error = batch_error(network, examples)?;

        if config.log_every > 0 && epochs % config.log_every == 0 {
            debug!(epoch = epochs, batch_error = error, "training");
        }

        // ── Emit progress ─────────────────────────────────────────────────
        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch: epochs,
                batch_error: error,
                elapsed_us: t_start.elapsed().as_micros() as u64,
            };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                info!(epochs, "progress receiver dropped; stopping");
                return Ok(TrainingReport {
                    epochs,
                    batch_error: error,
                    converged: error < config.error_threshold,
                });
            }
        }

        if error < config.error_threshold {
            info!(epochs, batch_error = error, "converged");
            return Ok(TrainingReport {
                epochs,
                batch_error: error,
                converged: true,
            });
        }
    }
}

/// Sum over `examples` of the half squared error at each example's final
/// timestep, under the current weights.
pub fn batch_error(network: &Network, examples: &[TrainingExample]) -> Result<f64, ShapeError> {
    let mut total = 0.0;
    for example in examples {
        let (_, trace) = network.evaluate_for_training(&example.inputs, &example.targets)?;
        total += trace.final_error();
    }
    Ok(total)
}

/// Final prediction for every example, in order.
pub fn predictions(network: &Network, examples: &[TrainingExample]) -> Result<Vec<f64>, ShapeError> {
    examples
        .iter()
        .map(|example| network.evaluate(&example.inputs))
        .collect()
}
