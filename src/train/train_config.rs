use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_until_converged` run.
///
/// # Fields
/// - `error_threshold` — training stops once the batch error drops below this
/// - `max_epochs`      — hard cap on the number of epochs; `None` trains until
///                       convergence no matter how long it takes
/// - `log_every`       — emit a `debug` log line every this many epochs (0 = never)
/// - `progress_tx`     — optional channel sender; one `EpochStats` is sent per
///                       completed epoch. If the receiver is dropped the loop
///                       stops early.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub error_threshold: f64,
    pub max_epochs: Option<u64>,
    pub log_every: u64,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    pub fn new(error_threshold: f64, max_epochs: Option<u64>) -> Self {
        TrainConfig {
            error_threshold,
            max_epochs,
            ..TrainConfig::default()
        }
    }

    /// Serializes the config (without the progress channel) to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a config from JSON; omitted fields take their defaults.
    pub fn load_json(path: &str) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            error_threshold: 1e-4,
            max_epochs: Some(1_000_000),
            log_every: 10_000,
            progress_tx: None,
        }
    }
}
