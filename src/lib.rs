pub mod error;
pub mod activation;
pub mod loss;
pub mod layers;
pub mod network;
pub mod optim;
pub mod train;
pub mod data;

// Convenience re-exports
pub use error::{Error, Result};
pub use activation::activation::{ActivationFunction, ActivationKind};
pub use layers::dense::{Layer, Node, Weight};
pub use loss::loss_type::LossType;
pub use network::{ForwardPass, Network, NetworkSpec};
pub use optim::sgd::Sgd;
pub use train::{evaluate, train_loop, TrainConfig, TrainStats, Trainer};
pub use data::{guesses, image_to_input, one_hot, Guess, MnistImage};
