pub mod epoch_stats;
pub mod example;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{EpochStats, TrainingReport};
pub use example::TrainingExample;
pub use loop_fn::{batch_error, predictions, train_until_converged};
pub use train_config::TrainConfig;
pub use trainer::train_epoch;
