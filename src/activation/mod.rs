pub mod activation;

pub use activation::sigmoid;
