use rand::Rng;

use crate::{
    activation::sigmoid::Sigmoid,
    math::{matrix::Matrix, shape_error::ShapeError},
    optim::sgd::Sgd,
};

/// One fully connected sigmoid transition between two layers.
///
/// `weights` is `(input_size + 1) x size`; its last row holds the biases.
/// `gradient` has the same shape and accumulates weight changes until the
/// next update.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub size: usize,
    pub input_size: usize,
    weights: Matrix,
    gradient: Matrix,
}

impl DenseLayer {
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> DenseLayer {
        DenseLayer {
            size,
            input_size,
            weights: Matrix::uniform(input_size + 1, size, rng),
            gradient: Matrix::zeros(input_size + 1, size),
        }
    }

    /// Builds a layer around explicit bias-extended weights.
    pub fn with_weights(weights: Matrix) -> Result<DenseLayer, ShapeError> {
        if weights.rows < 2 || weights.cols == 0 {
            return Err(ShapeError::mismatch("with_weights", (2, 1), weights.shape()));
        }
        if let Some(row) = weights.data.iter().find(|row| row.len() != weights.cols) {
            return Err(ShapeError::mismatch("with_weights", (1, weights.cols), (1, row.len())));
        }
        if !weights.is_rectangular() {
            return Err(ShapeError::mismatch("with_weights", weights.shape(), (weights.data.len(), weights.cols)));
        }
        Ok(DenseLayer {
            size: weights.cols,
            input_size: weights.rows - 1,
            gradient: Matrix::zeros(weights.rows, weights.cols),
            weights,
        })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn gradient(&self) -> &Matrix {
        &self.gradient
    }

    /// Post-activation output for a column `input` of height `input_size`.
    pub fn feed_from(&self, input: &Matrix) -> Result<Matrix, ShapeError> {
        if input.shape() != (self.input_size, 1) {
            return Err(ShapeError::mismatch("feed_from", (self.input_size, 1), input.shape()));
        }
        let z = input
            .extend()
            .row_broadcast_mul(&self.weights)?
            .column_sums()
            .transpose();
        Ok(z.map(Sigmoid::function))
    }

    /// Projects an error signal of height `size` back onto this layer's input
    /// width, ignoring the bias row.
    pub fn project_back(&self, error_signal: &Matrix) -> Result<Matrix, ShapeError> {
        self.weights.unextend()?.mat_vec_mul(error_signal)
    }

    pub fn accumulate(&mut self, contribution: &Matrix) -> Result<(), ShapeError> {
        self.gradient.add_assign(contribution)
    }

    pub fn reset_gradient(&mut self) {
        self.gradient.fill(0.0);
    }

    /// Moves the accumulated gradient into the weights and clears it.
    pub fn apply_gradient(&mut self, optimizer: &Sgd) -> Result<(), ShapeError> {
        optimizer.step(&mut self.weights, &self.gradient)?;
        self.reset_gradient();
        Ok(())
    }
}
