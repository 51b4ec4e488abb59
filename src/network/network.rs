use rand::Rng;

use crate::activation::{relu, softmax};
use crate::data::xor::{CLASSES, INPUTS};
use crate::math::matrix::Matrix;

/// The four trainable parameter tensors of the two-layer classifier.
///
/// Shapes: `w1` (2 x H), `b1` (1 x H), `w2` (H x 2), `b2` (1 x 2), where H is
/// the hidden width. The training loop owns the only live `Network` and
/// mutates it in place once per epoch; `forward` itself stores nothing.
pub struct Network {
    pub w1: Matrix,
    pub b1: Matrix,
    pub w2: Matrix,
    pub b2: Matrix,
}

impl Network {
    /// Fresh parameters: weights uniform in [-1, 1) from the caller's random
    /// source, biases zero.
    pub fn new<R: Rng>(hidden: usize, rng: &mut R) -> Network {
        assert!(hidden >= 1, "hidden width must be at least 1");

        Network {
            w1: Matrix::random(INPUTS, hidden, rng),
            b1: Matrix::zeros(1, hidden),
            w2: Matrix::random(hidden, CLASSES, rng),
            b2: Matrix::zeros(1, CLASSES),
        }
    }

    pub fn hidden_width(&self) -> usize {
        self.w1.cols
    }

    /// Forward pass over a batch.
    ///
    /// Returns `(h, y_hat)`: the ReLU-clamped hidden activations (N x H) and
    /// the row-wise softmax output probabilities (N x 2). Pure: identical
    /// inputs and parameters always produce identical outputs.
    pub fn forward(&self, x: &Matrix) -> (Matrix, Matrix) {
        assert_eq!(
            x.cols, self.w1.rows,
            "forward: input has {} columns but w1 expects {}",
            x.cols, self.w1.rows
        );

        let h = relu(&(x.clone() * self.w1.clone()).add_row(&self.b1));
        let y_hat = softmax(&(h.clone() * self.w2.clone()).add_row(&self.b2));

        (h, y_hat)
    }

    /// Probability-only forward pass, for evaluation and prediction.
    pub fn predict(&self, x: &Matrix) -> Matrix {
        self.forward(x).1
    }
}
