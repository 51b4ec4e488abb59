use crate::math::matrix::Matrix;

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Floor applied to the true-class probability before log(), preventing
/// log(0) = -inf when upstream underflow drives it to exactly zero. This caps
/// the per-row loss at -ln(1e-12) ~ 27.6; divergence stays visible in the
/// trajectory, and a perfect prediction still yields exactly zero loss.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// Computes the mean cross-entropy loss over a batch:
    ///   L = -(1/N) * sum_i log(max(sum_j expected[i,j] * predicted[i,j], eps))
    ///
    /// `predicted` — softmax probabilities, shape (N, n_classes)
    /// `expected`  — one-hot target distributions, same shape
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        assert_eq!(
            (predicted.rows, predicted.cols),
            (expected.rows, expected.cols),
            "loss: shape mismatch ({}x{} vs {}x{})",
            predicted.rows,
            predicted.cols,
            expected.rows,
            expected.cols
        );

        let total: f64 = predicted
            .data
            .iter()
            .zip(expected.data.iter())
            .map(|(p_row, e_row)| {
                let p_true: f64 = p_row.iter().zip(e_row.iter()).map(|(p, e)| p * e).sum();
                -p_true.max(EPS).ln()
            })
            .sum();

        total / predicted.rows as f64
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the pre-softmax
    /// logits (i.e. the second layer's pre-activation, NOT w.r.t. Ŷ).
    ///
    /// When Softmax and cross-entropy are composed together the gradient
    /// simplifies to the closed form:
    ///   ∂L/∂z = (predicted - expected) / N
    ///
    /// This is the initial delta for the backward pass. It must be used as
    /// given; chaining separate softmax and cross-entropy derivatives would
    /// double-apply the Jacobian.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        let n = predicted.rows as f64;
        (predicted.clone() - expected.clone()).map(|x| x / n)
    }
}
