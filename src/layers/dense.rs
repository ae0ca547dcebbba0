use serde::{Deserialize, Serialize};

use crate::activation::activation::{apply_new, ActivationFunction};
use crate::error::Result;
use crate::math::matrix::Matrix;

/// One fully-connected boundary between two node groups.
///
/// `weights` is `input_size x size`; there are no biases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Matrix,
    pub activator: ActivationFunction,
}

impl Layer {
    /// Xavier-initialized layer with fan-in `input_size`.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction, seed: u64) -> Result<Layer> {
        let weights = Matrix::xavier(input_size, size, input_size, seed)?;
        Ok(Layer { weights, activator: activation })
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn size(&self) -> usize {
        self.weights.cols()
    }

    /// `activation(input · weights)` for an `N x input_size` batch.
    pub fn feed_from(&self, input: &Matrix) -> Result<Matrix> {
        let z = input.multiply(&self.weights)?;
        Ok(apply_new(&z, |x| self.activator.function(x)))
    }

    /// Weight delta for this layer, before learning-rate scaling.
    ///
    /// `error` is the error in activation space (target minus output for the
    /// last layer). Returns `inputsᵀ · (error ⊙ f'(outputs))`.
    pub fn compute_gradients(&self, error: &Matrix, inputs: &Matrix, outputs: &Matrix) -> Result<Matrix> {
        let act_derivative = apply_new(outputs, |y| self.activator.derivative_from_output(y));
        let layer_delta = error.hadamard(&act_derivative)?;
        inputs.transpose().multiply(&layer_delta)
    }

    /// Carries `error` back to the previous layer's outputs: `error · weightsᵀ`.
    pub fn propagate_error(&self, error: &Matrix) -> Result<Matrix> {
        error.multiply(&self.weights.transpose())
    }
}
