use crate::math::matrix::MatRef;
use crate::network::network::Model;

/// Squared error summed over output columns, averaged over samples.
///
/// Runs one forward pass per row of `inputs`, so the model's activation
/// buffers are overwritten; its parameters are not touched.
///
/// # Panics
/// Panics if there are no samples, if the row counts differ, or if the column counts do not match the
/// model's input/output widths.
pub fn cost(model: &mut Model, inputs: &MatRef<'_>, outputs: &MatRef<'_>) -> f32 {
    assert_eq!(inputs.rows(), outputs.rows(), "inputs and outputs must have equal row counts");
    assert_eq!(outputs.cols(), model.output_size(), "outputs do not match the model's output width");
    assert_eq!(inputs.cols(), model.input_size(), "inputs do not match the model's input width");

    let n = inputs.rows();
    assert!(n > 0, "cost needs at least one sample");
    let mut total = 0.0_f32;

    for i in 0..n {
        let x = inputs.row(i);
        let y = outputs.row(i);
        model.forward(&x);

        let predicted = model.output();
        for j in 0..outputs.cols() {
            let d = predicted[(0, j)] - y[(0, j)];
            total += d * d;
        }
    }

    total / n as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::TrainingTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zero_model_predicts_half_everywhere() {
        let mut model = Model::xor();
        let table = TrainingTable::xor();
        let c = cost(&mut model, &table.inputs(), &table.outputs());
        assert!((c - 0.25).abs() < 1e-6);
    }

    #[test]
    fn cost_is_non_negative_and_repeatable() {
        let table = TrainingTable::xor();
        for seed in 0..8 {
            let mut model = Model::xor_random(&mut ChaCha8Rng::seed_from_u64(seed));
            let first = cost(&mut model, &table.inputs(), &table.outputs());
            let second = cost(&mut model, &table.inputs(), &table.outputs());
            assert!(first >= 0.0);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn multi_output_cost_sums_columns() {
        // Two identical output columns: twice the single-column cost.
        let single = TrainingTable::xor();
        let double = TrainingTable::new(
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0],
            2,
            2,
        );
        let mut narrow = Model::xor();
        let mut wide = Model::xor();
        wide.layers[1] = crate::layers::dense::Layer::new(2, 2);

        let c1 = cost(&mut narrow, &single.inputs(), &single.outputs());
        let c2 = cost(&mut wide, &double.inputs(), &double.outputs());
        assert!((c2 - 2.0 * c1).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "equal row counts")]
    fn rejects_row_count_mismatch() {
        let buf = [0.0_f32; 12];
        let inputs = MatRef::view(&buf, 3, 2, 3);
        let outputs = MatRef::view(&buf[2..], 4, 1, 3);
        cost(&mut Model::xor(), &inputs, &outputs);
    }

    #[test]
    #[should_panic(expected = "input width")]
    fn rejects_wrong_input_width() {
        let buf = [0.0_f32; 16];
        let inputs = MatRef::view(&buf, 4, 3, 4);
        let outputs = MatRef::view(&buf[3..], 4, 1, 4);
        cost(&mut Model::xor(), &inputs, &outputs);
    }

    #[test]
    #[should_panic(expected = "at least one sample")]
    fn rejects_empty_table() {
        let table = TrainingTable::new(Vec::new(), 2, 1);
        cost(&mut Model::xor(), &table.inputs(), &table.outputs());
    }

    #[test]
    #[should_panic(expected = "output width")]
    fn rejects_wrong_output_width() {
        let table = TrainingTable::new(vec![0.0; 8], 2, 2);
        let mut model = Model::xor();
        cost(&mut model, &table.inputs(), &table.outputs());
    }
}
