use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    activation::activation::ActivationFunction,
    error::{Error, Result},
    layers::dense::Layer,
    math::matrix::Matrix,
    network::spec::NetworkSpec,
    optim::sgd::Sgd,
};

/// Feed-forward network with exactly one hidden layer.
///
/// The two weight matrices (input→hidden, hidden→output) are the only mutable
/// state. They are created once from a fixed seed and then updated in place by
/// every call to [`NeuralNetwork::train`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNetwork {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    optimizer: Sgd,
    layers: Vec<Layer>,
}

impl NeuralNetwork {
    /// Sigmoid network seeded with [`NetworkSpec::DEFAULT_SEED`].
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize, learning_rate: f64) -> Result<NeuralNetwork> {
        NeuralNetwork::from_spec(&NetworkSpec::new(input_nodes, hidden_nodes, output_nodes, learning_rate))
    }

    /// Builds the network described by `spec`. Both weight matrices are drawn
    /// from the same seed, each with its own fan-in.
    pub fn from_spec(spec: &NetworkSpec) -> Result<NeuralNetwork> {
        spec.validate()?;

        let layers = vec![
            Layer::new(spec.hidden_nodes, spec.input_nodes, spec.hidden_activation, spec.seed)?,
            Layer::new(spec.output_nodes, spec.hidden_nodes, spec.output_activation, spec.seed)?,
        ];

        debug!(
            input = spec.input_nodes,
            hidden = spec.hidden_nodes,
            output = spec.output_nodes,
            learning_rate = spec.learning_rate,
            seed = spec.seed,
            hidden_activation = spec.hidden_activation.name(),
            output_activation = spec.output_activation.name(),
            "constructed network"
        );

        Ok(NeuralNetwork {
            input_nodes: spec.input_nodes,
            hidden_nodes: spec.hidden_nodes,
            output_nodes: spec.output_nodes,
            optimizer: Sgd::new(spec.learning_rate),
            layers,
        })
    }

    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    /// Replaces the learning rate. Zero is accepted and freezes the weights.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "learning rate must be finite and non-negative, got {}",
                learning_rate
            )));
        }
        self.optimizer.learning_rate = learning_rate;
        Ok(())
    }

    pub fn input_hidden_weights(&self) -> &Matrix {
        &self.layers[0].weights
    }

    pub fn hidden_output_weights(&self) -> &Matrix {
        &self.layers[1].weights
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Runs an `N x input_nodes` batch through the network without touching
    /// the weights and returns the `N x output_nodes` outputs.
    pub fn forward_pass(&self, inputs: &Matrix) -> Result<Matrix> {
        let mut current = inputs.clone();
        for layer in &self.layers {
            current = layer.feed_from(&current)?;
        }
        Ok(current)
    }

    /// Single-sample forward pass; returns a `1 x output_nodes` matrix.
    pub fn query(&self, input: &[f64]) -> Result<Matrix> {
        self.forward_pass(&Matrix::row_vector(input))
    }

    /// Index of the strongest output for `input`.
    pub fn predict(&self, input: &[f64]) -> Result<usize> {
        let output = self.query(input)?;
        Ok(argmax(output.row(0)))
    }

    /// One backpropagation step on a single labelled sample.
    ///
    /// Returns the `1 x output_nodes` output computed before the update.
    /// Every delta is computed before any weight is written, so a shape error
    /// leaves the network unchanged.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<Matrix> {
        if input.len() != self.input_nodes {
            return Err(Error::shape("train input", (1, input.len()), (1, self.input_nodes)));
        }

        let inputs = Matrix::row_vector(input);
        let targets = Matrix::row_vector(target);

        // activations[i] feeds layers[i]; the last entry is the network output.
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(inputs);
        for layer in &self.layers {
            let next = layer.feed_from(&activations[activations.len() - 1])?;
            activations.push(next);
        }

        let final_outputs = &activations[self.layers.len()];
        let mut error = targets.subtract(final_outputs)?;

        let mut deltas = Vec::with_capacity(self.layers.len());
        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            deltas.push(layer.compute_gradients(&error, &activations[i], &activations[i + 1])?);
            if i > 0 {
                // Uses the raw error and the pre-update weights.
                error = layer.propagate_error(&error)?;
            }
        }
        deltas.reverse();

        for (layer, delta) in self.layers.iter_mut().zip(&deltas) {
            self.optimizer.step(layer, delta)?;
        }

        Ok(activations.pop().unwrap_or_default())
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        debug!(path, "saved network");
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<NeuralNetwork> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: NeuralNetwork = serde_json::from_reader(reader)?;
        network.check_layout()?;
        debug!(path, "loaded network");
        Ok(network)
    }

    fn check_layout(&self) -> Result<()> {
        let counts = [
            ("input_nodes", self.input_nodes),
            ("hidden_nodes", self.hidden_nodes),
            ("output_nodes", self.output_nodes),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, n)| *n == 0) {
            return Err(Error::InvalidParameter(format!("stored {} must be at least 1", name)));
        }
        if !self.optimizer.learning_rate.is_finite() || self.optimizer.learning_rate < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "stored learning rate {} is invalid",
                self.optimizer.learning_rate
            )));
        }
        let expected = [
            (self.input_nodes, self.hidden_nodes),
            (self.hidden_nodes, self.output_nodes),
        ];
        if self.layers.len() != expected.len() {
            return Err(Error::UninitializedState(format!(
                "expected {} weight matrices, found {}",
                expected.len(),
                self.layers.len()
            )));
        }
        for (layer, shape) in self.layers.iter().zip(expected) {
            if layer.weights.shape() != shape {
                return Err(Error::shape("load", layer.weights.shape(), shape));
            }
        }
        Ok(())
    }

    pub fn activations(&self) -> (ActivationFunction, ActivationFunction) {
        (self.layers[0].activator, self.layers[1].activator)
    }
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
