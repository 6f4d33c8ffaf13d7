pub mod cache;
pub mod config;
pub mod network;

pub use cache::{ActivationCache, TrainingTrace};
pub use config::NetworkConfig;
pub use network::Network;
