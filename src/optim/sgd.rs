use crate::network::network::Model;

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f32,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Sgd {
        Sgd { learning_rate }
    }

    /// `p -= learning_rate * g` for every weight and bias.
    ///
    /// # Panics
    /// Panics if `grad` was not built with the same shape as `model`.
    pub fn step(&self, model: &mut Model, grad: &Model) {
        assert!(model.same_shape(grad), "gradient model does not match the model's shape");
        for (layer, g) in model.layers.iter_mut().zip(&grad.layers) {
            layer.weights.sub_scaled(&g.weights, self.learning_rate);
            layer.biases.sub_scaled(&g.biases, self.learning_rate);
        }
    }
}
