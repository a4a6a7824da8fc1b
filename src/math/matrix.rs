use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{check_len, NetworkError, Result};

/// Dense row-major matrix of weights.
///
/// A network stores one matrix per layer with shape `(layer width, previous
/// layer width)`, so row `i` holds every weight feeding node `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a matrix from explicit rows. Every row must have the same,
    /// non-zero length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(NetworkError::EmptyMatrix);
        }
        for row in &data {
            check_len("matrix row", cols, row.len())?;
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Fills a `rows x cols` matrix with samples from N(0, std_dev).
    ///
    /// Draws are taken row by row, left to right, so a seeded `rng` always
    /// produces the same matrix.
    pub fn normal<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<Matrix> {
        let dist = Normal::new(0.0, std_dev)
            .map_err(|e| NetworkError::InvalidDistribution(format!("std_dev {std_dev}: {e}")))?;

        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for w in row.iter_mut() {
                *w = dist.sample(rng);
            }
        }

        Ok(res)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// Matrix-vector product: `out[i] = sum_j self[i][j] * v[j]`.
    ///
    /// `v.len()` must equal `cols`; callers check this at the public boundary.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        self.data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Transposed product: `out[i] = sum_j self[j][i] * v[j]`, without
    /// materializing the transpose. `v.len()` must equal `rows`.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut out = vec![0.0; self.cols];
        for (row, &scale) in self.data.iter().zip(v) {
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += w * scale;
            }
        }
        out
    }

    /// In-place rank-one update: `self[i][j] += rate * left[i] * right[j]`.
    pub fn add_outer(&mut self, rate: f64, left: &[f64], right: &[f64]) {
        debug_assert_eq!(left.len(), self.rows);
        debug_assert_eq!(right.len(), self.cols);
        for (row, &l) in self.data.iter_mut().zip(left) {
            for (w, &r) in row.iter_mut().zip(right) {
                *w += rate * (l * r);
            }
        }
    }
}
