use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};

/// Construction parameters for a [`NeuralNetwork`](crate::NeuralNetwork).
///
/// Can be saved to / loaded from JSON independently of any trained weights,
/// so an experiment's architecture is recorded before training starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    pub learning_rate: f64,
    /// Seed shared by both weight matrices.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub hidden_activation: ActivationFunction,
    #[serde(default)]
    pub output_activation: ActivationFunction,
}

fn default_seed() -> u64 {
    NetworkSpec::DEFAULT_SEED
}

impl NetworkSpec {
    pub const DEFAULT_SEED: u64 = 12345;

    /// Sigmoid on both layers, default seed.
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize, learning_rate: f64) -> NetworkSpec {
        NetworkSpec {
            input_nodes,
            hidden_nodes,
            output_nodes,
            learning_rate,
            seed: NetworkSpec::DEFAULT_SEED,
            hidden_activation: ActivationFunction::Sigmoid,
            output_activation: ActivationFunction::Sigmoid,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> NetworkSpec {
        self.seed = seed;
        self
    }

    pub fn with_activations(mut self, hidden: ActivationFunction, output: ActivationFunction) -> NetworkSpec {
        self.hidden_activation = hidden;
        self.output_activation = output;
        self
    }

    /// Node counts and learning rate must all be strictly positive.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("input_nodes", self.input_nodes),
            ("hidden_nodes", self.hidden_nodes),
            ("output_nodes", self.output_nodes),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, n)| *n == 0) {
            return Err(Error::InvalidParameter(format!("{} must be at least 1", name)));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Serializes these parameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_take_defaults() {
        let json = r#"{"input_nodes":4,"hidden_nodes":3,"output_nodes":2,"learning_rate":0.1}"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec, NetworkSpec::new(4, 3, 2, 0.1));
    }

    #[test]
    fn validate_rejects_zero_nodes_and_bad_rate() {
        assert!(NetworkSpec::new(0, 3, 2, 0.1).validate().is_err());
        assert!(NetworkSpec::new(4, 3, 2, 0.0).validate().is_err());
        assert!(NetworkSpec::new(4, 3, 2, f64::NAN).validate().is_err());
        assert!(NetworkSpec::new(4, 3, 2, 0.1).validate().is_ok());
    }
}
