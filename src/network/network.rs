use rand::Rng;

use crate::{
    activation::sigmoid::Sigmoid,
    layers::dense::DenseLayer,
    loss::squared_error::SquaredErrorLoss,
    math::{matrix::Matrix, shape_error::ShapeError},
    network::{
        cache::{ActivationCache, TrainingTrace},
        config::NetworkConfig,
    },
    optim::sgd::Sgd,
};

/// Feed-forward sigmoid network whose scalar output is fed back as part of
/// the next timestep's input.
///
/// Each timestep sees the column `[t, feedback, x]`, where `feedback` is the
/// previous timestep's output (0 at the start of every sequence).
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    layers: Vec<DenseLayer>,
    optimizer: Sgd,
}

impl Network {
    /// Builds a network with weights drawn uniformly from [0, 1).
    pub fn new(config: NetworkConfig) -> Network {
        Network::with_rng(config, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Network {
        let layers = config
            .layers()
            .windows(2)
            .map(|pair| DenseLayer::new(pair[1], pair[0], &mut *rng))
            .collect();
        let optimizer = Sgd::new(config.learning_rate());
        Network { config, layers, optimizer }
    }

    /// Builds a network around explicit bias-extended weight matrices, one
    /// per adjacent layer pair.
    pub fn from_weights(config: NetworkConfig, weights: Vec<Matrix>) -> Result<Network, ShapeError> {
        let widths = config.layers();
        if weights.len() != widths.len() - 1 {
            return Err(ShapeError::LayerCount {
                expected: widths.len() - 1,
                actual: weights.len(),
            });
        }

        let mut layers = Vec::with_capacity(weights.len());
        for (pair, w) in widths.windows(2).zip(weights) {
            if w.shape() != (pair[0] + 1, pair[1]) {
                return Err(ShapeError::mismatch("from_weights", (pair[0] + 1, pair[1]), w.shape()));
            }
            layers.push(DenseLayer::with_weights(w)?);
        }

        let optimizer = Sgd::new(config.learning_rate());
        Ok(Network { config, layers, optimizer })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub fn weights(&self) -> Vec<&Matrix> {
        self.layers.iter().map(DenseLayer::weights).collect()
    }

    pub fn gradients(&self) -> Vec<&Matrix> {
        self.layers.iter().map(DenseLayer::gradient).collect()
    }

    fn input_column(timestep: usize, feedback: f64, input: f64) -> Matrix {
        Matrix::column(&[timestep as f64, feedback, input])
    }

    /// Runs the recurrence over `inputs` and returns the last output.
    /// An empty sequence yields the initial feedback, `0.0`.
    pub fn evaluate(&self, inputs: &[f64]) -> Result<f64, ShapeError> {
        let mut feedback = 0.0;

        for (t, &x) in inputs.iter().enumerate() {
            let mut current = Network::input_column(t, feedback, x);
            for layer in &self.layers {
                current = layer.feed_from(&current)?;
            }
            feedback = current.get(0, 0);
        }

        Ok(feedback)
    }

    /// Same recurrence as [`Network::evaluate`], recording one
    /// [`ActivationCache`] per timestep for the backward pass.
    pub fn evaluate_for_training(
        &self,
        inputs: &[f64],
        targets: &[f64],
    ) -> Result<(f64, TrainingTrace), ShapeError> {
        if inputs.len() != targets.len() {
            return Err(ShapeError::SequenceLength {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }

        let layer_count = self.config.layer_count();
        let mut trace = TrainingTrace::with_capacity(inputs.len());
        let mut feedback = 0.0;

        for (t, (&x, &target)) in inputs.iter().zip(targets).enumerate() {
            let mut cache = ActivationCache::new(Network::input_column(t, feedback, x), layer_count);

            for layer in &self.layers {
                let output = layer.feed_from(&cache.outputs[cache.outputs.len() - 1])?;
                cache.derivatives.push(output.map(Sigmoid::derivative_from_output));
                cache.outputs.push(output);
            }

            feedback = cache.outputs[layer_count - 1].get(0, 0);
            cache.residual = SquaredErrorLoss::residual(feedback, target);
            trace.push(cache);
        }

        Ok((feedback, trace))
    }

    /// Back-propagates one example's trace and adds the resulting weight
    /// changes to the gradient accumulators.
    ///
    /// Timesteps are walked newest first. The output error signal of each
    /// timestep is carried into the previous one as `delta` and added to its
    /// residual; this threads the feedback loop's error backwards without
    /// differentiating through the feedback input itself.
    ///
    /// The accumulators are only touched once the whole trace has been
    /// processed, so a failing trace leaves them unchanged.
    pub fn accumulate_gradients(&mut self, trace: &TrainingTrace) -> Result<(), ShapeError> {
        let layer_count = self.config.layer_count();
        let mut staged: Vec<Matrix> = self
            .layers
            .iter()
            .map(|layer| Matrix::zeros(layer.weights().rows, layer.weights().cols))
            .collect();
        let mut delta = Matrix::zeros(self.config.layers()[layer_count - 1], 1);

        for cache in trace.steps().iter().rev() {
            if cache.outputs.len() != layer_count || cache.derivatives.len() != layer_count - 1 {
                return Err(ShapeError::mismatch(
                    "accumulate_gradients",
                    (layer_count, layer_count - 1),
                    (cache.outputs.len(), cache.derivatives.len()),
                ));
            }

            let top = delta
                .map(|d| d + cache.residual)
                .hadamard(&cache.derivatives[layer_count - 2])?;

            let mut signal = top.clone();
            for i in (0..self.layers.len()).rev() {
                let contribution = self.optimizer.gradient(&signal, &cache.outputs[i].extend())?;
                staged[i].add_assign(&contribution)?;

                if i > 0 {
                    let projected = self.layers[i].project_back(&signal)?;
                    signal = cache.derivatives[i - 1].row_broadcast_mul(&projected)?;
                }
            }

            delta = top;
        }

        for (layer, gradient) in self.layers.iter_mut().zip(&staged) {
            layer.accumulate(gradient)?;
        }
        Ok(())
    }

    /// Adds every accumulated gradient into its weights and zeroes the
    /// accumulators.
    ///
    /// Returns `(error_before, error_after)`: the half squared error of the
    /// final timestep of `last_trace`, the most recently processed example.
    /// The trace is not re-evaluated, so both values are equal and describe a
    /// single example, never the whole batch. Use `train::batch_error` for a
    /// stopping decision.
    pub fn apply_gradients_and_reset(&mut self, last_trace: &TrainingTrace) -> Result<(f64, f64), ShapeError> {
        let error_before = last_trace.final_error();

        for layer in &mut self.layers {
            layer.apply_gradient(&self.optimizer)?;
        }

        Ok((error_before, last_trace.final_error()))
    }

    /// Zeroes the accumulators without touching the weights.
    pub fn reset_gradients(&mut self) {
        for layer in &mut self.layers {
            layer.reset_gradient();
        }
    }
}
