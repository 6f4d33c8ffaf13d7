pub mod matrix;
pub mod shape_error;

pub use matrix::Matrix;
pub use shape_error::ShapeError;
