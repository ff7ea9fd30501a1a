/// Logistic sigmoid, `1 / (1 + e^-x)`.
///
/// No clamping: large negative inputs overflow `exp` to infinity and yield
/// `0.0`, NaN stays NaN.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
