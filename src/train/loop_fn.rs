use std::time::Instant;

use tracing::{debug, info};

use crate::loss::mse::cost;
use crate::math::matrix::MatRef;
use crate::network::network::Model;
use crate::optim::sgd::Sgd;
use crate::train::finite_diff::{estimate_gradient, estimate_gradient_par};
use crate::train::train_config::TrainConfig;
use crate::train::train_report::TrainReport;

/// Trains `model` for exactly `config.iterations` rounds.
///
/// Each round fills `grad` with a finite-difference estimate and applies it
/// with [`Sgd`]. `grad` must be shaped like `model`; its previous contents
/// are overwritten. No convergence check, no schedule.
///
/// # Panics
/// Panics if `config` fails [`TrainConfig::validate`], or on any shape
/// mismatch between `model`, `grad` and the data views.
pub fn train_loop(
    model: &mut Model,
    grad: &mut Model,
    inputs: &MatRef<'_>,
    outputs: &MatRef<'_>,
    config: &TrainConfig,
) -> TrainReport {
    if let Err(err) = config.validate() {
        panic!("invalid training config: {err}");
    }

    let t_start = Instant::now();
    let optimizer = Sgd::new(config.learning_rate);

    let initial_cost = cost(model, inputs, outputs);
    info!(
        iterations = config.iterations,
        epsilon = config.epsilon,
        learning_rate = config.learning_rate,
        parallel = config.parallel,
        initial_cost,
        "training started"
    );

    for iteration in 1..=config.iterations {
        if config.parallel {
            estimate_gradient_par(model, grad, inputs, outputs, config.epsilon);
        } else {
            estimate_gradient(model, grad, inputs, outputs, config.epsilon);
        }
        optimizer.step(model, grad);

        if config.log_every > 0 && iteration % config.log_every == 0 {
            let current = cost(model, inputs, outputs);
            debug!(iteration, cost = current, "training progress");
        }
    }

    let final_cost = cost(model, inputs, outputs);
    let elapsed_ms = t_start.elapsed().as_millis() as u64;
    info!(final_cost, elapsed_ms, "training finished");

    TrainReport {
        initial_cost,
        final_cost,
        iterations: config.iterations,
        elapsed_ms,
    }
}
