pub mod math;
pub mod data;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use network::network::Network;
pub use loss::cross_entropy::CrossEntropyLoss;
pub use optim::sgd::Sgd;
pub use train::{evaluate, train, EpochStats, TrainConfig};
