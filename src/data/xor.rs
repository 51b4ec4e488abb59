use rand::Rng;

use crate::math::matrix::Matrix;

/// Number of input features (the two boolean operands).
pub const INPUTS: usize = 2;
/// Number of output classes (XOR is 0, XOR is 1).
pub const CLASSES: usize = 2;

/// Generates `n` random labeled XOR examples.
///
/// Each row of the observation matrix holds two independent uniform binary
/// values; the target matrix one-hot encodes their XOR (column 0 = "XOR is 0",
/// column 1 = "XOR is 1").
///
/// # Panics
/// Panics if `n` is zero.
pub fn generate<R: Rng>(n: usize, rng: &mut R) -> (Matrix, Matrix) {
    assert!(n >= 1, "generate: need at least one observation");

    let mut x = Matrix::zeros(n, INPUTS);
    let mut y = Matrix::zeros(n, CLASSES);

    for i in 0..n {
        let a = rng.gen_bool(0.5);
        let b = rng.gen_bool(0.5);

        x.data[i][0] = if a { 1.0 } else { 0.0 };
        x.data[i][1] = if b { 1.0 } else { 0.0 };
        y.data[i][if a != b { 1 } else { 0 }] = 1.0;
    }

    (x, y)
}

/// The four canonical input pairs (0,0), (0,1), (1,0), (1,1) with their
/// one-hot targets, in that order.
pub fn truth_table() -> (Matrix, Matrix) {
    let x = Matrix::from_data(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ]);
    let y = Matrix::from_data(vec![
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
    ]);
    (x, y)
}

/// The truth table cycled until `n` rows: deterministic and class-balanced.
///
/// # Panics
/// Panics if `n` is zero.
pub fn balanced(n: usize) -> (Matrix, Matrix) {
    assert!(n >= 1, "balanced: need at least one observation");

    let (tx, ty) = truth_table();
    let mut x = Matrix::zeros(n, INPUTS);
    let mut y = Matrix::zeros(n, CLASSES);

    for i in 0..n {
        x.data[i] = tx.data[i % tx.rows].clone();
        y.data[i] = ty.data[i % ty.rows].clone();
    }

    (x, y)
}
