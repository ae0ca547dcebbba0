use serde::{Deserialize, Serialize};

/// Per-epoch training statistics returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean squared error of the outputs seen while training, before each update.
    pub train_loss: f64,
    /// Fraction in [0, 1] of samples whose pre-update prediction was correct.
    pub train_accuracy: f64,
    /// For each class, the highest confidence the network assigned to that
    /// class right after training on one of its samples.
    pub peak_confidence: Vec<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
