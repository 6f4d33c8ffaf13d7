use crate::{loss::squared_error::SquaredErrorLoss, math::matrix::Matrix};

/// Everything the backward pass needs from one timestep of a training
/// forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationCache {
    /// Post-activation output of every layer; `outputs[0]` is the raw
    /// `[timestep, feedback, input]` column.
    pub outputs: Vec<Matrix>,
    /// `o ⊙ (1 - o)` for `o = outputs[i + 1]`.
    pub derivatives: Vec<Matrix>,
    /// Final-layer prediction minus target.
    pub residual: f64,
}

impl ActivationCache {
    pub(crate) fn new(input: Matrix, layer_count: usize) -> ActivationCache {
        let mut outputs = Vec::with_capacity(layer_count);
        outputs.push(input);
        ActivationCache {
            outputs,
            derivatives: Vec::with_capacity(layer_count - 1),
            residual: 0.0,
        }
    }

    /// Half squared error of this timestep.
    pub fn error(&self) -> f64 {
        SquaredErrorLoss::loss(self.residual)
    }
}

/// The per-timestep caches of one training example, oldest first.
///
/// Returned by `Network::evaluate_for_training` and consumed by
/// `Network::accumulate_gradients`. A trace describes the weights it was
/// recorded with, so it goes stale once those weights are updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingTrace {
    steps: Vec<ActivationCache>,
}

impl TrainingTrace {
    pub(crate) fn with_capacity(len: usize) -> TrainingTrace {
        TrainingTrace {
            steps: Vec::with_capacity(len),
        }
    }

    pub(crate) fn push(&mut self, cache: ActivationCache) {
        self.steps.push(cache);
    }

    pub fn steps(&self) -> &[ActivationCache] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Half squared error of the final timestep; `0.0` for an empty sequence.
    pub fn final_error(&self) -> f64 {
        self.steps.last().map_or(0.0, ActivationCache::error)
    }
}
