use rand::Rng;

use crate::math::matrix::{MatRef, Matrix};

/// Which parameter matrix of a layer a scalar lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Weights,
    Biases,
}

impl ParamKind {
    pub const ALL: [ParamKind; 2] = [ParamKind::Weights, ParamKind::Biases];
}

/// A fully connected sigmoid layer.
///
/// Shapes: `weights` is `input_size x size`, `biases` and `activations` are
/// `1 x size`. `activations` is scratch space rewritten on every forward pass.
#[derive(Debug, Clone)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Matrix,
    pub activations: Matrix,
}

impl Layer {
    /// Allocates a zeroed layer of `size` neurons fed by `input_size` values.
    pub fn new(size: usize, input_size: usize) -> Layer {
        Layer {
            weights: Matrix::alloc(input_size, size),
            biases: Matrix::alloc(1, size),
            activations: Matrix::alloc(1, size),
        }
    }

    pub fn size(&self) -> usize {
        self.activations.cols()
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    /// Xavier weights, biases uniform in `[-0.5, 0.5)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (fan_in, fan_out) = self.weights.shape();
        self.weights.xavier(rng, fan_in, fan_out);
        self.biases.randomize(rng, -0.5, 0.5);
    }

    /// `activations = sigmoid(input * weights + biases)`.
    pub fn feed_from(&mut self, input: &MatRef<'_>) {
        self.activations.fill(0.0);
        self.activations.matmul(input, &self.weights);
        self.activations += &self.biases;
        self.activations.sigmoid_in_place();
    }

    pub fn param(&self, kind: ParamKind) -> &Matrix {
        match kind {
            ParamKind::Weights => &self.weights,
            ParamKind::Biases => &self.biases,
        }
    }

    pub fn param_mut(&mut self, kind: ParamKind) -> &mut Matrix {
        match kind {
            ParamKind::Weights => &mut self.weights,
            ParamKind::Biases => &mut self.biases,
        }
    }

    /// Frees all three matrices; safe to call more than once.
    pub fn release(&mut self) {
        self.weights.release();
        self.biases.release();
        self.activations.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::sigmoid;

    #[test]
    fn feed_from_ignores_previous_activations() {
        let mut layer = Layer::new(1, 2);
        layer.weights[(0, 0)] = 1.0;
        layer.weights[(1, 0)] = -2.0;
        layer.biases[(0, 0)] = 0.5;

        let input = [1.0_f32, 1.0];
        let input = MatRef::view(&input, 1, 2, 2);

        layer.feed_from(&input);
        let first = layer.activations[(0, 0)];
        layer.feed_from(&input);

        assert_eq!(first, sigmoid(-0.5));
        assert_eq!(layer.activations[(0, 0)], first);
    }

    #[test]
    fn release_clears_every_matrix() {
        let mut layer = Layer::new(3, 2);
        layer.release();
        layer.release();
        assert_eq!(layer.weights.shape(), (0, 0));
        assert_eq!(layer.biases.shape(), (0, 0));
        assert_eq!(layer.activations.shape(), (0, 0));
    }
}
