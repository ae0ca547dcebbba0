use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// Slope applied to negative inputs by leaky ReLU.
pub const LEAKY_SLOPE: f64 = 0.01;

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub fn sigmoid_derivative(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

pub fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

pub fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

pub fn tanh_derivative(x: f64) -> f64 {
    let t = x.tanh();
    1.0 - t * t
}

pub fn leaky_relu(x: f64) -> f64 {
    if x > 0.0 { x } else { LEAKY_SLOPE * x }
}

pub fn leaky_relu_derivative(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { LEAKY_SLOPE }
}

/// Applies `f` to every element of `matrix`, overwriting it.
pub fn apply_in_place<F>(matrix: &mut Matrix, f: F)
where
    F: Fn(f64) -> f64,
{
    matrix.map_in_place(f);
}

/// Returns a new matrix holding `f` applied element-wise; `matrix` is untouched.
pub fn apply_new<F>(matrix: &Matrix, f: F) -> Matrix
where
    F: Fn(f64) -> f64,
{
    matrix.map(f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    Tanh,
    #[serde(rename = "leaky_relu")]
    LeakyReLU,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::ReLU => relu(x),
            ActivationFunction::Tanh => tanh(x),
            ActivationFunction::LeakyReLU => leaky_relu(x),
        }
    }

    /// Derivative evaluated at the pre-activation input `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid_derivative(x),
            ActivationFunction::ReLU => relu_derivative(x),
            ActivationFunction::Tanh => tanh_derivative(x),
            ActivationFunction::LeakyReLU => leaky_relu_derivative(x),
        }
    }

    /// Derivative expressed through the activation output `y = f(x)`.
    ///
    /// Backprop only keeps the post-activation values, so this is what the
    /// training step uses. For sigmoid it is the familiar `y * (1 - y)`.
    /// ReLU and leaky ReLU preserve the sign of `x` in `y`, so the branch on
    /// `y > 0` picks the same slope as `derivative(x)`.
    pub fn derivative_from_output(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::ReLU => if y > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Tanh => 1.0 - y * y,
            ActivationFunction::LeakyReLU => if y > 0.0 { 1.0 } else { LEAKY_SLOPE },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::LeakyReLU => "leaky_relu",
        }
    }
}

impl std::str::FromStr for ActivationFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "relu" => Ok(ActivationFunction::ReLU),
            "tanh" => Ok(ActivationFunction::Tanh),
            "leaky_relu" | "leaky-relu" | "leakyrelu" => Ok(ActivationFunction::LeakyReLU),
            other => Err(format!("unknown activation '{}'", other)),
        }
    }
}
