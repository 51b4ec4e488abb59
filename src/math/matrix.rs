use rand::Rng;
use std::ops::{Add, Mul, Sub};

/// Dense row-major matrix of `f64`. All of the pipeline's entities
/// (observations, targets, parameters, activations, gradients) are values of
/// this one type; shape is the only identity that matters.
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

    /// Entries drawn uniformly from [-1, 1) using the caller's random source.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data,
        }
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
        Matrix::from_data(
            (self.data)
                .clone()
                .into_iter()
                .map(|row| row.into_iter().map(|x| functor(x)).collect())
                .collect(),
        )
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            (self.rows, self.cols),
            (rhs.rows, rhs.cols),
            "hadamard: shape mismatch ({}x{} vs {}x{})",
            self.rows,
            self.cols,
            rhs.rows,
            rhs.cols
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect())
            .collect();
        Matrix::from_data(data)
    }

    /// Adds a 1-row matrix to every row of `self` (bias broadcast).
    pub fn add_row(&self, row: &Matrix) -> Matrix {
        assert_eq!(row.rows, 1, "add_row: expected a 1-row matrix, got {}x{}", row.rows, row.cols);
        assert_eq!(
            self.cols, row.cols,
            "add_row: column mismatch ({}x{} vs {}x{})",
            self.rows, self.cols, row.rows, row.cols
        );

        let mut res = self.clone();
        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] += row.data[0][j];
            }
        }

        res
    }

    /// Sums each column, keeping a 1-row shape (broadcast-compatible with a bias).
    pub fn col_sums(&self) -> Matrix {
        let mut res = Matrix::zeros(1, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[0][j] += self.data[i][j];
            }
        }

        res
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!(
                "matrix add: shape mismatch ({}x{} vs {}x{})",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!(
                "matrix sub: shape mismatch ({}x{} vs {}x{})",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!(
                "matrix mul: shape mismatch ({}x{} vs {}x{})",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 2);
        assert_eq!(m.rows, 3);
        assert_eq!(m.cols, 2);
        assert!(m.data.iter().flatten().all(|&x| x == 0.0));
    }

    #[test]
    fn random_entries_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::random(4, 5, &mut rng);
        assert!(m.data.iter().flatten().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn matmul_known_values() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = Matrix::from_data(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        let c = a * b;
        assert_eq!(c.data, vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    }

    #[test]
    fn transpose_swaps_axes() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t.rows, 3);
        assert_eq!(t.cols, 2);
        assert_eq!(t.data[2], vec![3.0, 6.0]);
    }

    #[test]
    fn hadamard_multiplies_elementwise() {
        let a = Matrix::from_data(vec![vec![1.0, -2.0], vec![3.0, 0.0]]);
        let b = Matrix::from_data(vec![vec![2.0, 2.0], vec![-1.0, 9.0]]);
        assert_eq!(a.hadamard(&b).data, vec![vec![2.0, -4.0], vec![-3.0, 0.0]]);
    }

    #[test]
    fn add_row_broadcasts_across_rows() {
        let m = Matrix::zeros(3, 2);
        let bias = Matrix::from_data(vec![vec![1.0, -1.0]]);
        let r = m.add_row(&bias);
        assert!(r.data.iter().all(|row| row == &vec![1.0, -1.0]));
    }

    #[test]
    fn col_sums_keeps_one_row() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let s = m.col_sums();
        assert_eq!(s.rows, 1);
        assert_eq!(s.data[0], vec![9.0, 12.0]);
    }

    #[test]
    #[should_panic(expected = "matrix mul: shape mismatch")]
    fn matmul_panics_on_inner_dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        let _ = a * b;
    }
}
