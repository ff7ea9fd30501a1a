use rayon::prelude::*;

use crate::loss::mse::cost;
use crate::math::matrix::MatRef;
use crate::network::network::{Model, ParamId};

/// Forward-difference estimate of `d cost / d p` for every parameter `p`.
///
/// Each parameter is nudged by `epsilon`, the cost re-evaluated, and
/// `(c1 - c0) / epsilon` written into the matching entry of `grad`. The
/// parameter is restored afterwards, so `model` ends with the same weights it
/// started with (its activations are clobbered).
///
/// # Panics
/// Panics if `grad` does not have the same shape as `model`.
pub fn estimate_gradient(
    model: &mut Model,
    grad: &mut Model,
    inputs: &MatRef<'_>,
    outputs: &MatRef<'_>,
    epsilon: f32,
) {
    assert!(model.same_shape(grad), "gradient model does not match the model's shape");

    let base = cost(model, inputs, outputs);
    for id in model.param_ids() {
        *grad.param_mut(id) = partial(model, id, base, inputs, outputs, epsilon);
    }
}

/// Same result as [`estimate_gradient`], with parameters spread over the
/// rayon pool.
///
/// Perturbing shares the model in place, so every worker gets its own
/// replica; `model` itself is only read.
pub fn estimate_gradient_par(
    model: &Model,
    grad: &mut Model,
    inputs: &MatRef<'_>,
    outputs: &MatRef<'_>,
    epsilon: f32,
) {
    assert!(model.same_shape(grad), "gradient model does not match the model's shape");

    let base = cost(&mut model.clone(), inputs, outputs);
    let ids = model.param_ids();
    let partials: Vec<f32> = ids
        .par_iter()
        .map_init(
            || model.clone(),
            |replica, &id| partial(replica, id, base, inputs, outputs, epsilon),
        )
        .collect();

    for (id, value) in ids.into_iter().zip(partials) {
        *grad.param_mut(id) = value;
    }
}

fn partial(
    model: &mut Model,
    id: ParamId,
    base: f32,
    inputs: &MatRef<'_>,
    outputs: &MatRef<'_>,
    epsilon: f32,
) -> f32 {
    let saved = model.param(id);
    *model.param_mut(id) += epsilon;
    let nudged = cost(model, inputs, outputs);
    *model.param_mut(id) = saved;
    (nudged - base) / epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::TrainingTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn parameters_are_restored() {
        let table = TrainingTable::xor();
        let mut model = Model::xor_random(&mut ChaCha8Rng::seed_from_u64(3));
        let before = model.clone();
        let mut grad = Model::xor();

        estimate_gradient(&mut model, &mut grad, &table.inputs(), &table.outputs(), 0.1);

        for id in model.param_ids() {
            assert_eq!(model.param(id), before.param(id));
        }
    }

    #[test]
    fn stepping_against_the_gradient_does_not_raise_cost() {
        let table = TrainingTable::xor();
        let (ti, to) = (table.inputs(), table.outputs());
        let eps = 1e-2;

        for seed in 0..5 {
            let mut model = Model::xor_random(&mut ChaCha8Rng::seed_from_u64(seed));
            let mut grad = Model::xor();
            estimate_gradient(&mut model, &mut grad, &ti, &to, eps);
            let c0 = cost(&mut model, &ti, &to);

            for id in model.param_ids() {
                let g = grad.param(id);
                let saved = model.param(id);
                *model.param_mut(id) -= 1e-3 * g.signum();
                let c1 = cost(&mut model, &ti, &to);
                *model.param_mut(id) = saved;
                assert!(c1 <= c0 + 1e-4, "seed {seed}, {id:?}: {c1} > {c0}");
            }
        }
    }

    #[test]
    fn bias_partial_matches_central_difference() {
        let table = TrainingTable::xor();
        let (ti, to) = (table.inputs(), table.outputs());
        let mut model = Model::xor_random(&mut ChaCha8Rng::seed_from_u64(9));
        let mut grad = Model::xor();
        estimate_gradient(&mut model, &mut grad, &ti, &to, 1e-3);

        let id = *model.param_ids().last().unwrap();
        let h = 1e-2;
        let saved = model.param(id);
        *model.param_mut(id) = saved + h;
        let up = cost(&mut model, &ti, &to);
        *model.param_mut(id) = saved - h;
        let down = cost(&mut model, &ti, &to);
        *model.param_mut(id) = saved;

        let central = (up - down) / (2.0 * h);
        assert!((grad.param(id) - central).abs() < 1e-2);
    }

    #[test]
    fn parallel_estimate_matches_serial() {
        let table = TrainingTable::xor();
        let (ti, to) = (table.inputs(), table.outputs());
        let mut model = Model::xor_random(&mut ChaCha8Rng::seed_from_u64(5));
        let mut serial = Model::xor();
        let mut parallel = Model::xor();

        estimate_gradient(&mut model, &mut serial, &ti, &to, 0.1);
        estimate_gradient_par(&model, &mut parallel, &ti, &to, 0.1);

        for id in model.param_ids() {
            assert_eq!(serial.param(id), parallel.param(id));
        }
    }

    #[test]
    #[should_panic(expected = "shape")]
    fn rejects_mismatched_gradient_model() {
        let table = TrainingTable::xor();
        let mut model = Model::xor();
        let mut grad = Model::xor();
        grad.layers.pop();
        estimate_gradient(&mut model, &mut grad, &table.inputs(), &table.outputs(), 0.1);
    }
}
