/// Logistic activation with a fixed steepness of 1.
pub struct Sigmoid;

impl Sigmoid {
    /// `1 / (1 + e^(-z))`, always in the open interval (0, 1).
    pub fn function(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Derivative expressed through the activation output `o = function(z)`:
    /// `o * (1 - o)`, which lies in [0, 0.25].
    pub fn derivative_from_output(o: f64) -> f64 {
        o * (1.0 - o)
    }
}
