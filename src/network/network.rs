use rand::Rng;

use crate::layers::dense::{Layer, ParamKind};
use crate::math::matrix::{MatRef, Matrix};

/// Layer widths of the XOR network: 2 inputs, 2 hidden, 1 output.
pub const XOR_ARCH: [usize; 3] = [2, 2, 1];

/// Addresses one trainable scalar of a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamId {
    pub layer: usize,
    pub kind: ParamKind,
    pub row: usize,
    pub col: usize,
}

/// Fixed-topology feed-forward network.
///
/// `input` is the `1 x inputs` activation feeding the first layer. Every
/// matrix is owned by the model and allocated once in the constructor; the
/// forward pass only overwrites them.
///
/// The same type doubles as the gradient holder during training: a gradient
/// model keeps partial derivatives in its weights/biases and never uses its
/// activations.
#[derive(Debug, Clone)]
pub struct Model {
    pub input: Matrix,
    pub layers: Vec<Layer>,
}

impl Model {
    /// Allocates a zeroed 2-2-1 network.
    pub fn xor() -> Model {
        let input = Matrix::alloc(1, XOR_ARCH[0]);
        let layers = XOR_ARCH
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0]))
            .collect();
        Model { input, layers }
    }

    /// Allocates the 2-2-1 network and randomizes its parameters.
    pub fn xor_random<R: Rng + ?Sized>(rng: &mut R) -> Model {
        let mut model = Model::xor();
        for layer in &mut model.layers {
            layer.randomize(rng);
        }
        model
    }

    pub fn input_size(&self) -> usize {
        self.input.cols()
    }

    pub fn output_size(&self) -> usize {
        self.output().cols()
    }

    /// Activation of the last layer, as left by the latest forward pass.
    pub fn output(&self) -> &Matrix {
        match self.layers.last() {
            Some(layer) => &layer.activations,
            None => &self.input,
        }
    }

    /// Copies `input` into the input activation and runs every layer in order.
    ///
    /// The result stays in [`Model::output`]; all activation buffers are
    /// overwritten.
    pub fn forward(&mut self, input: &MatRef<'_>) {
        self.input.copy_from(input);
        for k in 0..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(k);
            let prev = match done.last() {
                Some(layer) => layer.activations.as_view(),
                None => self.input.as_view(),
            };
            rest[0].feed_from(&prev);
        }
    }

    /// Runs a forward pass on a plain slice and returns the first output.
    pub fn predict(&mut self, input: &[f32]) -> f32 {
        let input = MatRef::view(input, 1, input.len(), input.len());
        self.forward(&input);
        self.output()[(0, 0)]
    }

    /// Every trainable scalar, layer by layer, weights before biases, row-major.
    pub fn param_ids(&self) -> Vec<ParamId> {
        let mut ids = Vec::new();
        for (layer_idx, layer) in self.layers.iter().enumerate() {
            for kind in ParamKind::ALL {
                let (rows, cols) = layer.param(kind).shape();
                for row in 0..rows {
                    for col in 0..cols {
                        ids.push(ParamId { layer: layer_idx, kind, row, col });
                    }
                }
            }
        }
        ids
    }

    pub fn param(&self, id: ParamId) -> f32 {
        self.layers[id.layer].param(id.kind)[(id.row, id.col)]
    }

    pub fn param_mut(&mut self, id: ParamId) -> &mut f32 {
        &mut self.layers[id.layer].param_mut(id.kind)[(id.row, id.col)]
    }

    /// True when both models have the same layer count and parameter shapes.
    pub fn same_shape(&self, other: &Model) -> bool {
        self.input.shape() == other.input.shape()
            && self.layers.len() == other.layers.len()
            && self.layers.iter().zip(&other.layers).all(|(a, b)| {
                a.weights.shape() == b.weights.shape() && a.biases.shape() == b.biases.shape()
            })
    }

    /// Frees every matrix the model owns. Idempotent; `Drop` covers the
    /// common case.
    pub fn release(&mut self) {
        self.input.release();
        for layer in &mut self.layers {
            layer.release();
        }
    }
}
