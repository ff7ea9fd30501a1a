pub mod network;

pub use network::{Model, ParamId, XOR_ARCH};
