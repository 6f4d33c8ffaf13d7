use std::fmt;

/// The only error the library raises: operands whose dimensions do not fit
/// the operation they were handed to.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A matrix operation received operands of incompatible dimensions.
    ///
    /// `expected` and `actual` are `(rows, cols)`.
    Mismatch {
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Training input and target sequences differ in length.
    SequenceLength { inputs: usize, targets: usize },
    /// A different number of weight matrices than the network has layer
    /// transitions.
    LayerCount { expected: usize, actual: usize },
    /// Layer widths that cannot describe a feedback network.
    InvalidLayers { layers: Vec<usize>, reason: &'static str },
}

impl ShapeError {
    pub(crate) fn mismatch(
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> ShapeError {
        ShapeError::Mismatch { op, expected, actual }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Mismatch { op, expected, actual } => write!(
                f,
                "{op}: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            ShapeError::SequenceLength { inputs, targets } => write!(
                f,
                "input sequence has {inputs} steps but target sequence has {targets}"
            ),
            ShapeError::LayerCount { expected, actual } => {
                write!(f, "expected {expected} weight matrices, got {actual}")
            }
            ShapeError::InvalidLayers { layers, reason } => {
                write!(f, "invalid layer widths {layers:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ShapeError {}
