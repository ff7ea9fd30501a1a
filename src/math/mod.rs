pub mod matrix;

pub use matrix::{Mat, MatMut, MatRef, Matrix};
