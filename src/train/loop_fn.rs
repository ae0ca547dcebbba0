use std::time::Instant;

use tracing::{debug, info};

use crate::data::csv::Dataset;
use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::{argmax, NeuralNetwork};
use crate::train::epoch_stats::EpochStats;
use crate::train::targets::soft_target;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs, one sample at a time in
/// dataset order, and returns the statistics of every completed epoch.
///
/// Samples are never shuffled or batched: each step reads the weights the
/// previous step wrote, so the run is reproducible for a given seed.
///
/// # Errors
/// Fails on an empty dataset, inputs and labels of different lengths, a label outside `0..output_nodes`, or a sample
/// whose width does not match `input_nodes`. Weights updated by earlier
/// samples are kept.
pub fn train_loop(
    network: &mut NeuralNetwork,
    dataset: &Dataset,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    if dataset.is_empty() {
        return Err(Error::InvalidParameter("dataset must not be empty".into()));
    }
    if dataset.inputs().rows() != dataset.len() {
        return Err(Error::InvalidParameter(format!(
            "dataset has {} input rows but {} labels",
            dataset.inputs().rows(),
            dataset.len()
        )));
    }

    let classes = network.output_nodes();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let mut total_loss = 0.0;
        let mut correct = 0usize;
        let mut peak_confidence = vec![0.0; classes];

        for i in 0..dataset.len() {
            let (input, label) = dataset.sample(i);
            let target = soft_target(label, classes, config.on_target, config.off_target)?;

            let output = network.train(input, &target)?;
            total_loss += MseLoss::loss(output.row(0), &target);
            if argmax(output.row(0)) == label {
                correct += 1;
            }

            let confidence = network.query(input)?.get(0, label);
            if confidence > peak_confidence[label] {
                peak_confidence[label] = confidence;
            }

            if config.log_every > 0 && (i + 1) % config.log_every == 0 {
                debug!(epoch, sample = i + 1, running_loss = total_loss / (i + 1) as f64, "progress");
            }
        }

        let n = dataset.len() as f64;
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: total_loss / n,
            train_accuracy: correct as f64 / n,
            peak_confidence,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        info!(
            epoch,
            total = config.epochs,
            loss = stats.train_loss,
            accuracy = stats.train_accuracy,
            elapsed_ms = stats.elapsed_ms,
            "epoch complete"
        );

        history.push(stats);
    }

    Ok(history)
}

/// Fraction of samples classified correctly (argmax match), computed with a
/// single batched forward pass.
pub fn evaluate(network: &NeuralNetwork, dataset: &Dataset) -> Result<f64> {
    if dataset.is_empty() {
        return Ok(0.0);
    }
    let outputs = network.forward_pass(dataset.inputs())?;
    let correct = outputs
        .iter_rows()
        .zip(dataset.labels())
        .filter(|(row, label)| argmax(row) == **label)
        .count();
    Ok(correct as f64 / dataset.len() as f64)
}
