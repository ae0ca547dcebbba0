pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::NeuralNetwork;
pub use network::spec::NetworkSpec;
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use data::csv::{load_mnist_csv, Dataset};
pub use train::{train_loop, TrainConfig, EpochStats};
