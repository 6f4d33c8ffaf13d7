use rand::Rng;

use crate::math::shape_error::ShapeError;

/// Dense row-major matrix of `f64`.
///
/// Every operation returns a new matrix except `add_assign` and `fill`,
/// which are only used to maintain gradient accumulators and weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Entries drawn independently from the uniform distribution on [0, 1).
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>();
            }
        }

        res
    }

    /// Builds a matrix from row vectors. All rows must have the same length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, Vec::len);
        debug_assert!(data.iter().all(|row| row.len() == cols), "ragged rows");
        Matrix {
            rows: data.len(),
            cols,
            data,
        }
    }

    /// Column vector (`values.len() x 1`).
    pub fn column(values: &[f64]) -> Matrix {
        Matrix::from_data(values.iter().map(|&v| vec![v]).collect())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Every row holds exactly `cols` entries and there are `rows` of them.
    pub fn is_rectangular(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    pub fn is_column(&self) -> bool {
        self.cols == 1
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|x| k * x)
    }

    /// Appends a row of ones so a bias can be folded into a single multiply.
    pub fn extend(&self) -> Matrix {
        let mut data = self.data.clone();
        data.push(vec![1.0; self.cols]);
        Matrix {
            rows: self.rows + 1,
            cols: self.cols,
            data,
        }
    }

    /// Removes the bias row added by [`Matrix::extend`].
    pub fn unextend(&self) -> Result<Matrix, ShapeError> {
        if self.rows < 2 {
            return Err(ShapeError::mismatch("unextend", (2, self.cols), self.shape()));
        }
        let mut data = self.data.clone();
        data.pop();
        Ok(Matrix {
            rows: self.rows - 1,
            cols: self.cols,
            data,
        })
    }

    /// Scales row `i` of `other` by `self[i][0]`; a diagonal multiply without
    /// building the diagonal matrix.
    pub fn row_broadcast_mul(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        if !self.is_column() || self.rows != other.rows {
            return Err(ShapeError::mismatch(
                "row_broadcast_mul",
                (other.rows, 1),
                self.shape(),
            ));
        }

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(scale, row)| row.iter().map(|x| scale[0] * x).collect())
            .collect();

        Ok(Matrix {
            rows: other.rows,
            cols: other.cols,
            data,
        })
    }

    /// `1 x cols` row holding the sum of each column.
    pub fn column_sums(&self) -> Matrix {
        let mut sums = vec![0.0; self.cols];
        for row in &self.data {
            for (sum, x) in sums.iter_mut().zip(row) {
                *sum += x;
            }
        }
        Matrix::from_data(vec![sums])
    }

    pub fn mat_vec_mul(&self, vec: &Matrix) -> Result<Matrix, ShapeError> {
        if !vec.is_column() || self.cols != vec.rows {
            return Err(ShapeError::mismatch("mat_vec_mul", (self.cols, 1), vec.shape()));
        }

        let values: Vec<f64> = self
            .data
            .iter()
            .map(|row| row.iter().zip(&vec.data).map(|(a, b)| a * b[0]).sum())
            .collect();

        Ok(Matrix::column(&values))
    }

    /// `a ⊗ bᵀ` for two column vectors; shape `a.rows x b.rows`.
    pub fn outer(a: &Matrix, b: &Matrix) -> Result<Matrix, ShapeError> {
        if !a.is_column() {
            return Err(ShapeError::mismatch("outer", (a.rows, 1), a.shape()));
        }
        if !b.is_column() {
            return Err(ShapeError::mismatch("outer", (b.rows, 1), b.shape()));
        }

        let data = a
            .data
            .iter()
            .map(|x| b.data.iter().map(|y| x[0] * y[0]).collect())
            .collect();

        Ok(Matrix {
            rows: a.rows,
            cols: b.rows,
            data,
        })
    }

    /// Elementwise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// In-place `self += other`.
    pub fn add_assign(&mut self, other: &Matrix) -> Result<(), ShapeError> {
        self.check_same_shape(other, "add_assign")?;
        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (x, y) in row.iter_mut().zip(other_row) {
                *x += y;
            }
        }
        Ok(())
    }

    pub fn fill(&mut self, value: f64) {
        for row in &mut self.data {
            row.iter_mut().for_each(|x| *x = value);
        }
    }

    pub fn element_sum(&self) -> f64 {
        self.data.iter().flatten().sum()
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<(), ShapeError> {
        if self.shape() != other.shape() {
            return Err(ShapeError::mismatch(op, self.shape(), other.shape()));
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &Matrix, op: &'static str, f: F) -> Result<Matrix, ShapeError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(other, op)?;

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(row_a, row_b)| row_a.iter().zip(row_b).map(|(&a, &b)| f(a, b)).collect())
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}
