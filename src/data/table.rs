use crate::math::matrix::MatRef;

/// Samples stored row by row in one flat buffer: each row holds the input
/// columns followed by the output columns.
///
/// [`TrainingTable::inputs`] and [`TrainingTable::outputs`] are two strided
/// views over that same buffer, offset by the input width.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    data: Vec<f32>,
    input_cols: usize,
    output_cols: usize,
}

impl TrainingTable {
    /// Wraps `data` as rows of `input_cols + output_cols` values.
    ///
    /// # Panics
    /// Panics if `data` is not a whole number of rows.
    pub fn new(data: Vec<f32>, input_cols: usize, output_cols: usize) -> TrainingTable {
        let width = input_cols + output_cols;
        assert!(width > 0, "a training row needs at least one column");
        assert!(
            data.len() % width == 0,
            "{} values do not split into rows of {width}",
            data.len()
        );
        TrainingTable { data, input_cols, output_cols }
    }

    /// The XOR truth table: `(0,0)->0, (0,1)->1, (1,0)->1, (1,1)->0`.
    #[rustfmt::skip]
    pub fn xor() -> TrainingTable {
        TrainingTable::new(
            vec![
                0.0, 0.0, 0.0,
                0.0, 1.0, 1.0,
                1.0, 0.0, 1.0,
                1.0, 1.0, 0.0,
            ],
            2,
            1,
        )
    }

    pub fn stride(&self) -> usize {
        self.input_cols + self.output_cols
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn inputs(&self) -> MatRef<'_> {
        MatRef::view(&self.data, self.len(), self.input_cols, self.stride())
    }

    pub fn outputs(&self) -> MatRef<'_> {
        let tail = self.data.get(self.input_cols..).unwrap_or(&[]);
        MatRef::view(tail, self.len(), self.output_cols, self.stride())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_views_split_columns() {
        let table = TrainingTable::xor();
        let ti = table.inputs();
        let to = table.outputs();

        assert_eq!(ti.shape(), (4, 2));
        assert_eq!(to.shape(), (4, 1));
        assert_eq!(ti.stride(), 3);
        assert_eq!(to.stride(), 3);

        let expected = [0.0, 1.0, 1.0, 0.0];
        for i in 0..4 {
            let (a, b) = (ti[(i, 0)], ti[(i, 1)]);
            assert_eq!(to[(i, 0)], expected[i]);
            assert_eq!(to[(i, 0)], if a != b { 1.0 } else { 0.0 });
        }
    }

    #[test]
    #[should_panic(expected = "do not split")]
    fn rejects_ragged_buffer() {
        TrainingTable::new(vec![0.0; 5], 2, 1);
    }
}
