pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::sigmoid::Sigmoid;
pub use network::network::{Activations, Network};
pub use network::config::NetworkConfig;
pub use loss::mse::MseLoss;
pub use train::trainer::{accuracy, argmax, evaluate, train_epoch};
pub use error::{NetworkError, Result};
