/// Summary returned by `train_loop`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Cost before the first update.
    pub initial_cost: f32,
    /// Cost after the last update.
    pub final_cost: f32,
    /// Number of update rounds actually run.
    pub iterations: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub elapsed_ms: u64,
}
