pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// Signed error `prediction - target`; seeds the backward pass.
    pub fn residual(prediction: f64, target: f64) -> f64 {
        prediction - target
    }

    /// Half squared error: `residual² / 2`.
    pub fn loss(residual: f64) -> f64 {
        residual * residual / 2.0
    }
}
