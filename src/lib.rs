pub mod math;
pub mod activation;
pub mod loss;
pub mod optim;
pub mod layers;
pub mod network;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use math::shape_error::ShapeError;
pub use activation::sigmoid::Sigmoid;
pub use network::cache::{ActivationCache, TrainingTrace};
pub use network::config::NetworkConfig;
pub use network::network::Network;
pub use train::example::TrainingExample;
pub use train::train_config::TrainConfig;
pub use train::loop_fn::train_until_converged;
