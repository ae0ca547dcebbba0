use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dense row-major matrix of `f64`.
///
/// `rows` and `cols` are fixed at construction. Every operation that combines
/// two matrices allocates a fresh result, except `accumulate`, which adds into
/// the receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixData")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

/// Unchecked wire form; converted into `Matrix` only if the stored shape
/// agrees with the stored values.
#[derive(Deserialize)]
struct MatrixData {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl TryFrom<MatrixData> for Matrix {
    type Error = Error;

    fn try_from(raw: MatrixData) -> Result<Matrix> {
        if raw.data.len() != raw.rows {
            return Err(Error::UninitializedState(format!(
                "stored matrix claims {}x{} but holds {} rows",
                raw.rows,
                raw.cols,
                raw.data.len()
            )));
        }
        if let Some((i, row)) = raw.data.iter().enumerate().find(|(_, row)| row.len() != raw.cols) {
            return Err(Error::UninitializedState(format!(
                "stored row {} has {} elements, expected {}",
                i,
                row.len(),
                raw.cols
            )));
        }
        Ok(Matrix { rows: raw.rows, cols: raw.cols, data: raw.data })
    }
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a matrix from nested rows. Every row must have the same length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(Error::UninitializedState(format!(
                "row {} has {} elements, expected {}",
                i,
                row.len(),
                cols
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// A `1 x values.len()` matrix.
    pub fn row_vector(values: &[f64]) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values.to_vec()],
        }
    }

    /// Xavier (Glorot) initialization: samples from N(0, 1/sqrt(fan_in)).
    ///
    /// Identical `(rows, cols, fan_in, seed)` always yield identical values.
    pub fn xavier(rows: usize, cols: usize, fan_in: usize, seed: u64) -> Result<Matrix> {
        let mut res = Matrix::zeros(rows, cols);
        res.initialize_weights(fan_in, seed)?;
        Ok(res)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Reads one element. Panics if `(r, c)` is out of bounds.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r][c]
    }

    /// Writes one element. Panics if `(r, c)` is out of bounds.
    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        self.data[r][c] = value;
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r]
    }

    /// Iterates over the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(|row| row.as_slice())
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|x| x * k)
    }

    /// Standard matrix product. Requires `self.cols == other.rows`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::shape("multiply", self.shape(), other.shape()));
        }

        let mut res = Matrix::zeros(self.rows, other.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * other.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Hadamard product of two same-shape matrices.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "element-wise multiply", |a, b| a * b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// In-place addition: `self[i][j] += other[i][j]`.
    pub fn accumulate(&mut self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::shape("accumulate", self.shape(), other.shape()));
        }

        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (a, b) in row.iter_mut().zip(other_row) {
                *a += b;
            }
        }

        Ok(())
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

    /// Overwrites every element with a draw from N(0, 1/sqrt(fan_in)) using
    /// a generator seeded by `seed`.
    pub fn initialize_weights(&mut self, fan_in: usize, seed: u64) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::UninitializedState(format!(
                "cannot initialize weights of an empty {}x{} matrix",
                self.rows, self.cols
            )));
        }
        if fan_in == 0 {
            return Err(Error::UninitializedState(
                "weight initialization needs a fan-in of at least 1".into(),
            ));
        }

        let std_dev = 1.0 / (fan_in as f64).sqrt();
        let normal = Normal::new(0.0, std_dev)
            .map_err(|e| Error::InvalidParameter(format!("normal distribution: {}", e)))?;
        let mut rng = StdRng::seed_from_u64(seed);

        for row in self.data.iter_mut() {
            for value in row.iter_mut() {
                *value = normal.sample(&mut rng);
            }
        }

        Ok(())
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

    pub fn map_in_place<F>(&mut self, functor: F)
    where
        F: Fn(f64) -> f64,
    {
        for row in self.data.iter_mut() {
            for value in row.iter_mut() {
                *value = functor(*value);
            }
        }
    }

    /// True when every element is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|x| x.is_finite())
    }

    fn zip_with<F>(&self, other: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            return Err(Error::shape(op, self.shape(), other.shape()));
        }

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(row_a, row_b)| row_a.iter().zip(row_b).map(|(&a, &b)| f(a, b)).collect())
            .collect();

        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix ({} x {})", self.rows, self.cols)?;
        for row in &self.data {
            let cells: Vec<String> = row.iter().map(|x| format!("{:.4}", x)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_data_rejects_ragged_rows() {
        let err = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::UninitializedState(_)));
    }

    #[test]
    fn deserialize_rejects_inconsistent_shape() {
        let json = r#"{"rows":2,"cols":2,"data":[[1.0,2.0]]}"#;
        assert!(serde_json::from_str::<Matrix>(json).is_err());
    }

    #[test]
    fn deserialize_names_the_short_row() {
        let json = r#"{"rows":2,"cols":2,"data":[[1.0,2.0],[3.0]]}"#;
        let err = serde_json::from_str::<Matrix>(json).unwrap_err().to_string();
        assert!(err.contains("stored row 1 has 1 elements, expected 2"), "{}", err);
    }

    #[test]
    fn initialize_weights_rejects_zero_fan_in() {
        let mut m = Matrix::zeros(2, 2);
        assert!(m.initialize_weights(0, 1).is_err());
    }
}
