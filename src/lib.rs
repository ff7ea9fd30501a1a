pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod data;
pub mod loss;
pub mod optim;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::{Mat, MatMut, MatRef, Matrix};
pub use activation::activation::sigmoid;
pub use layers::dense::{Layer, ParamKind};
pub use network::network::{Model, ParamId};
pub use data::table::TrainingTable;
pub use loss::mse::cost;
pub use optim::sgd::Sgd;
pub use train::{estimate_gradient, estimate_gradient_par, train_loop, TrainConfig, TrainReport};
pub use error::ConfigError;
