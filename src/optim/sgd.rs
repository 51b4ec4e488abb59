use crate::math::matrix::Matrix;

pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// One gradient-descent update: param - learning_rate * grad.
    ///
    /// Each parameter tensor is updated independently from its own gradient;
    /// there is no cross-parameter coupling.
    pub fn step(&self, param: &Matrix, grad: &Matrix) -> Matrix {
        param.clone() - grad.map(|x| x * self.learning_rate)
    }
}
