use crate::math::matrix::Matrix;

/// Propagates the output gradient `dz` backward through the hidden layer.
///
/// dH = dZ . W2^t, then every entry whose hidden activation was clamped to
/// zero is gated off (the ReLU derivative is 1 where the pre-activation was
/// positive and 0 otherwise; since `h` is already clamped, gating on h <= 0
/// is equivalent to gating on the pre-activation).
pub fn backprop_hidden(h: &Matrix, w2: &Matrix, dz: &Matrix) -> Matrix {
    let dh = dz.clone() * w2.transpose();
    dh.hadamard(&h.map(|x| if x > 0.0 { 1.0 } else { 0.0 }))
}

/// Generic layer backprop: gradients of one linear layer's weights and bias.
///
/// Given the layer's input activations (N x n_in) and the gradient flowing
/// into its output (N x n_out): dW = input^t . d_output, db = column sums of
/// d_output kept as a 1-row matrix. Invoked once per layer per epoch:
/// (X, dH) -> (dw1, db1) and (H, dZ) -> (dw2, db2).
pub fn backprop_layer(input: &Matrix, d_output: &Matrix) -> (Matrix, Matrix) {
    let dw = input.transpose() * d_output.clone();
    let db = d_output.col_sums();

    (dw, db)
}
