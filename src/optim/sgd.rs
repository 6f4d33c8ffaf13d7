use crate::math::{matrix::Matrix, shape_error::ShapeError};

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Weight change for one layer at one timestep:
    /// `-learning_rate * (augmented_input ⊗ error_signal)`, shaped like the
    /// layer's bias-extended weight matrix.
    pub fn gradient(&self, error_signal: &Matrix, augmented_input: &Matrix) -> Result<Matrix, ShapeError> {
        Ok(Matrix::outer(augmented_input, error_signal)?.scale(-self.learning_rate))
    }

    /// Adds an accumulated gradient into `weights`. The learning rate and sign
    /// were already folded in by [`Sgd::gradient`].
    pub fn step(&self, weights: &mut Matrix, accumulated: &Matrix) -> Result<(), ShapeError> {
        weights.add_assign(accumulated)
    }
}
