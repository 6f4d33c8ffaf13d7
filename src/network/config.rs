use serde::{Deserialize, Serialize};

use crate::math::shape_error::ShapeError;

/// Width of the per-timestep input vector `[timestep, feedback, input]`.
pub const INPUT_WIDTH: usize = 3;

/// Width of the output layer; the prediction is a single scalar.
pub const OUTPUT_WIDTH: usize = 1;

fn default_learning_rate() -> f64 {
    1.0
}

/// Layer widths (input → output) and the gradient-descent learning rate.
///
/// Always valid once constructed: at least two layers, the first exactly
/// [`INPUT_WIDTH`] wide, the last exactly [`OUTPUT_WIDTH`] wide and none empty.
/// Deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetworkConfig")]
pub struct NetworkConfig {
    layers: Vec<usize>,
    learning_rate: f64,
}

#[derive(Deserialize)]
struct RawNetworkConfig {
    layers: Vec<usize>,
    #[serde(default = "default_learning_rate")]
    learning_rate: f64,
}

impl TryFrom<RawNetworkConfig> for NetworkConfig {
    type Error = ShapeError;

    fn try_from(raw: RawNetworkConfig) -> Result<Self, Self::Error> {
        Ok(NetworkConfig::new(raw.layers)?.with_learning_rate(raw.learning_rate))
    }
}

impl NetworkConfig {
    pub fn new(layers: Vec<usize>) -> Result<NetworkConfig, ShapeError> {
        let reason = if layers.len() < 2 {
            Some("need at least an input and an output layer")
        } else if layers[0] != INPUT_WIDTH {
            Some("input layer must be 3 wide (timestep, feedback, input)")
        } else if layers[layers.len() - 1] != OUTPUT_WIDTH {
            Some("output layer must be 1 wide")
        } else if layers.contains(&0) {
            Some("layer widths must be positive")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ShapeError::InvalidLayers { layers, reason }),
            None => Ok(NetworkConfig {
                layers,
                learning_rate: default_learning_rate(),
            }),
        }
    }

    pub fn with_learning_rate(self, learning_rate: f64) -> NetworkConfig {
        NetworkConfig { learning_rate, ..self }
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            layers: vec![INPUT_WIDTH, 3, OUTPUT_WIDTH],
            learning_rate: default_learning_rate(),
        }
    }
}
