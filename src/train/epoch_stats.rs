use serde::{Deserialize, Serialize};

/// Statistics for one completed epoch.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: u64,
    /// Sum over all examples of the final-timestep half squared error,
    /// measured after this epoch's update.
    pub batch_error: f64,
    /// Wall-clock duration of the epoch in microseconds.
    pub elapsed_us: u64,
}

/// Outcome of `train_until_converged`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Number of completed epochs (weight updates).
    pub epochs: u64,
    /// Batch error after the last completed epoch.
    pub batch_error: f64,
    /// Whether `batch_error` fell below the configured threshold.
    pub converged: bool,
}
