//! Command-line driver: trains a one-hidden-layer network on an MNIST CSV
//! file and evaluates saved models.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neural_net::{
    load_mnist_csv, train::evaluate, train_loop, ActivationFunction, NetworkSpec, NeuralNetwork,
    TrainConfig,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "neural-net")]
#[command(about = "Feed-forward neural network trained with backpropagation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", value_parser = clap::value_parser!(Level))]
    log_level: Level,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a network on a label-first MNIST CSV file
    Train {
        /// Training data
        #[arg(short, long, default_value = "mnist/mnist_train.csv")]
        data: String,

        /// Network spec JSON; overrides the size/rate/seed flags below
        #[arg(long)]
        spec: Option<String>,

        /// Number of passes over the data
        #[arg(short, long, default_value = "10")]
        epochs: usize,

        /// Hidden layer width
        #[arg(long, default_value = "100")]
        hidden: usize,

        /// Gradient descent step size
        #[arg(long, default_value = "0.3")]
        learning_rate: f64,

        /// Weight initialization seed
        #[arg(long, default_value_t = NetworkSpec::DEFAULT_SEED)]
        seed: u64,

        /// Hidden layer activation (sigmoid, relu, tanh, leaky_relu)
        #[arg(long, default_value = "sigmoid")]
        activation: ActivationFunction,

        /// Log a progress line every N samples (0 disables)
        #[arg(long, default_value = "0")]
        log_every: usize,

        /// Where to write the trained model
        #[arg(long)]
        save: Option<String>,
    },

    /// Report the accuracy of a saved model on a CSV file
    Evaluate {
        /// Saved model JSON
        #[arg(short, long)]
        model: String,

        /// Evaluation data
        #[arg(short, long, default_value = "mnist/mnist_test.csv")]
        data: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Train {
            data,
            spec,
            epochs,
            hidden,
            learning_rate,
            seed,
            activation,
            log_every,
            save,
        } => {
            let dataset = load_mnist_csv(&data).with_context(|| format!("loading {}", data))?;
            info!(samples = dataset.len(), "data loaded");

            let spec = match spec {
                Some(path) => NetworkSpec::load_json(&path).with_context(|| format!("reading spec {}", path))?,
                None => NetworkSpec::new(dataset.inputs().cols(), hidden, 10, learning_rate)
                    .with_seed(seed)
                    .with_activations(activation, ActivationFunction::Sigmoid),
            };
            let mut network = NeuralNetwork::from_spec(&spec)?;
            info!("network initialized");

            let config = TrainConfig {
                epochs,
                log_every,
                ..TrainConfig::default()
            };
            let history = train_loop(&mut network, &dataset, &config)?;

            for stats in &history {
                let peaks: Vec<String> = stats.peak_confidence.iter().map(|c| format!("{:.3}", c)).collect();
                println!(
                    "epoch {:>3}/{} | loss {:.5} | accuracy {:>6.2}% | peak confidence [{}]",
                    stats.epoch,
                    stats.total_epochs,
                    stats.train_loss,
                    stats.train_accuracy * 100.0,
                    peaks.join(", ")
                );
            }

            if let Some(path) = save {
                network.save_json(&path).with_context(|| format!("writing model {}", path))?;
                info!(path = %path, "model saved");
            }
            info!("training completed");
        }
        Commands::Evaluate { model, data } => {
            let network = NeuralNetwork::load_json(&model).with_context(|| format!("reading model {}", model))?;
            let dataset = load_mnist_csv(&data).with_context(|| format!("loading {}", data))?;
            let accuracy = evaluate(&network, &dataset)?;
            println!("accuracy: {:.2}% over {} samples", accuracy * 100.0, dataset.len());
        }
    }

    Ok(())
}
