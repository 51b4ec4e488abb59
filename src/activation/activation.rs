use crate::math::matrix::Matrix;

/// Element-wise rectified linear unit: max(0, x).
pub fn relu(z: &Matrix) -> Matrix {
    z.map(|x| if x > 0.0 { x } else { 0.0 })
}

/// Row-wise softmax.
///
/// Softmax is vector-valued, not element-wise: each row of the result is the
/// normalized exponential of the corresponding row of `z`. The row maximum is
/// subtracted before exponentiating so large logits cannot overflow; the
/// shift cancels in the normalization and leaves the result unchanged.
pub fn softmax(z: &Matrix) -> Matrix {
    let mut res = Matrix::zeros(z.rows, z.cols);

    for i in 0..z.rows {
        let row_max = z.data[i].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = z.data[i].iter().map(|x| (x - row_max).exp()).collect();
        let total: f64 = exps.iter().sum();

        for j in 0..z.cols {
            res.data[i][j] = exps[j] / total;
        }
    }

    res
}
