use serde::{Deserialize, Serialize};

use crate::{error::Result, layers::dense::Layer, math::matrix::Matrix};

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Scales `weights_delta` by the learning rate and adds it into the layer.
    ///
    /// The delta already points downhill (it is built from `target - output`),
    /// so it is added rather than subtracted.
    pub fn step(&self, layer: &mut Layer, weights_delta: &Matrix) -> Result<()> {
        layer.weights.accumulate(&weights_delta.scale(self.learning_rate))
    }
}
