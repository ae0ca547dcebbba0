use serde::{Deserialize, Serialize};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`    : total number of full passes over the training data
/// - `on_target` : target value for the correct class
/// - `off_target`: target value for every other class
/// - `log_every` : emit a progress line every this many samples; `0` disables
///
/// The soft targets (0.99 / 0.1 by default) keep sigmoid outputs out of their
/// saturated tails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub on_target: f64,
    pub off_target: f64,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            ..TrainConfig::default()
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10,
            on_target: 0.99,
            off_target: 0.1,
            log_every: 0,
        }
    }
}
