use rand::Rng;
use std::fmt;
use std::ops::{AddAssign, Index, IndexMut};

use crate::activation::activation::sigmoid;

/// A dense row-major matrix laid over a flat `f32` buffer.
///
/// Element `(i, j)` lives at `data[i * stride + j]`. The stride may exceed
/// `cols`, which is what lets a matrix describe a window into a wider buffer
/// (a row of another matrix, or some columns of a training table) without
/// copying anything.
///
/// Ownership is carried by the storage type `S`:
/// - [`Matrix`] (`Mat<Vec<f32>>`) owns its buffer and is the only variant
///   that can be allocated or released.
/// - [`MatRef`] / [`MatMut`] borrow someone else's buffer; writes through a
///   `MatMut` are visible in the matrix it was taken from.
#[derive(Debug, Clone)]
pub struct Mat<S> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: S,
}

pub type Matrix = Mat<Vec<f32>>;
pub type MatRef<'a> = Mat<&'a [f32]>;
pub type MatMut<'a> = Mat<&'a mut [f32]>;

/// Smallest buffer length able to back a `rows x cols` matrix with `stride`.
fn required_len(rows: usize, cols: usize, stride: usize) -> usize {
    if rows == 0 {
        0
    } else {
        (rows - 1) * stride + cols
    }
}

fn check_layout(len: usize, rows: usize, cols: usize, stride: usize) {
    assert!(
        stride >= cols,
        "stride {stride} is smaller than the column count {cols}"
    );
    let needed = required_len(rows, cols, stride);
    assert!(
        len >= needed,
        "buffer of {len} floats cannot hold a {rows}x{cols} matrix with stride {stride} (needs {needed})"
    );
}

impl Matrix {
    /// Allocates an owned `rows x cols` matrix with `stride == cols`.
    ///
    /// The buffer is zero-filled. Running out of memory is fatal.
    pub fn alloc(rows: usize, cols: usize) -> Matrix {
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("matrix size {rows}x{cols} overflows usize"));

        let mut data: Vec<f32> = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            panic!("failed to allocate a {rows}x{cols} matrix");
        }
        data.resize(len, 0.0);

        Matrix { rows, cols, stride: cols, data }
    }

    /// Frees the buffer and zeroes the shape. Releasing twice is a no-op.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.rows = 0;
        self.cols = 0;
        self.stride = 0;
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, stride: 0, data: Vec::new() }
    }
}

impl<'a> MatRef<'a> {
    /// Borrows `data` as a `rows x cols` matrix whose rows start `stride` apart.
    pub fn view(data: &'a [f32], rows: usize, cols: usize, stride: usize) -> MatRef<'a> {
        check_layout(data.len(), rows, cols, stride);
        Mat { rows, cols, stride, data }
    }
}

impl<'a> MatMut<'a> {
    pub fn view_mut(data: &'a mut [f32], rows: usize, cols: usize, stride: usize) -> MatMut<'a> {
        check_layout(data.len(), rows, cols, stride);
        Mat { rows, cols, stride, data }
    }
}

impl<S: AsRef<[f32]>> Mat<S> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        i * self.stride + j
    }

    pub fn as_view(&self) -> MatRef<'_> {
        Mat {
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            data: self.data.as_ref(),
        }
    }

    /// Borrows logical row `i` as a `1 x cols` view sharing this buffer.
    pub fn row(&self, i: usize) -> MatRef<'_> {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        Mat {
            rows: 1,
            cols: self.cols,
            stride: self.stride,
            data: &self.data.as_ref()[i * self.stride..],
        }
    }

    /// Writes the debug dump to stdout under `name`. See also [`mat_print!`].
    pub fn print(&self, name: &str) {
        print!("{name} = [\n{self}]\n");
    }
}

impl<S: AsRef<[f32]> + AsMut<[f32]>> Mat<S> {
    pub fn as_view_mut(&mut self) -> MatMut<'_> {
        Mat {
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            data: self.data.as_mut(),
        }
    }

    /// Mutable counterpart of [`Mat::row`]: writes land in this matrix.
    pub fn row_mut(&mut self, i: usize) -> MatMut<'_> {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        let start = i * self.stride;
        Mat {
            rows: 1,
            cols: self.cols,
            stride: self.stride,
            data: &mut self.data.as_mut()[start..],
        }
    }

    fn map_in_place<F>(&mut self, mut functor: F)
    where
        F: FnMut(f32) -> f32,
    {
        for i in 0..self.rows {
            let start = i * self.stride;
            for x in &mut self.data.as_mut()[start..start + self.cols] {
                *x = functor(*x);
            }
        }
    }

    pub fn fill(&mut self, x: f32) {
        self.map_in_place(|_| x);
    }

    /// Sets every element to an independent uniform sample from `[low, high)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, low: f32, high: f32) {
        self.map_in_place(|_| rng.gen::<f32>() * (high - low) + low);
    }

    /// Xavier (Glorot) uniform initialization.
    ///
    /// Samples from `[-L, L)` with `L = sqrt(6 / (fan_in + fan_out))`, which keeps
    /// activation variance roughly constant through Sigmoid/Tanh layers.
    pub fn xavier<R: Rng + ?Sized>(&mut self, rng: &mut R, fan_in: usize, fan_out: usize) {
        assert!(fan_in + fan_out > 0, "xavier init needs a non-zero fan");
        let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
        self.randomize(rng, -limit, limit);
    }

    pub fn copy_from<T: AsRef<[f32]>>(&mut self, src: &Mat<T>) {
        assert_same_shape("copy", self.shape(), src.shape());
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] = src[(i, j)];
            }
        }
    }

    /// Accumulates the product `a * b` into `self`.
    ///
    /// This adds to whatever `self` already holds: zero it first (`fill(0.0)`)
    /// unless accumulation is what you want. The forward pass relies on this
    /// so the bias can be added as a separate step.
    ///
    /// # Panics
    /// Panics unless `a.cols == b.rows`, `self.rows == a.rows` and
    /// `self.cols == b.cols`.
    pub fn matmul<A, B>(&mut self, a: &Mat<A>, b: &Mat<B>)
    where
        A: AsRef<[f32]>,
        B: AsRef<[f32]>,
    {
        if a.cols != b.rows || self.rows != a.rows || self.cols != b.cols {
            panic!(
                "Matrices are of incorrect sizes: {}x{} * {}x{} into {}x{}",
                a.rows, a.cols, b.rows, b.cols, self.rows, self.cols
            );
        }

        let n = a.cols;
        for i in 0..self.rows {
            for j in 0..self.cols {
                for k in 0..n {
                    let product = a[(i, k)] * b[(k, j)];
                    self[(i, j)] += product;
                }
            }
        }
    }

    pub fn sigmoid_in_place(&mut self) {
        self.map_in_place(sigmoid);
    }

    /// `self -= scale * other`, elementwise.
    pub fn sub_scaled<T: AsRef<[f32]>>(&mut self, other: &Mat<T>, scale: f32) {
        assert_same_shape("sub_scaled", self.shape(), other.shape());
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] -= scale * other[(i, j)];
            }
        }
    }
}

fn assert_same_shape(op: &str, lhs: (usize, usize), rhs: (usize, usize)) {
    if lhs != rhs {
        panic!(
            "Matrices are of incorrect sizes for {op}: {}x{} vs {}x{}",
            lhs.0, lhs.1, rhs.0, rhs.1
        );
    }
}

impl<S, T> AddAssign<&Mat<T>> for Mat<S>
where
    S: AsRef<[f32]> + AsMut<[f32]>,
    T: AsRef<[f32]>,
{
    fn add_assign(&mut self, rhs: &Mat<T>) {
        assert_same_shape("add", self.shape(), rhs.shape());
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] += rhs[(i, j)];
            }
        }
    }
}

impl<S: AsRef<[f32]>> Index<(usize, usize)> for Mat<S> {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        let at = self.offset(i, j);
        &self.data.as_ref()[at]
    }
}

impl<S: AsRef<[f32]> + AsMut<[f32]>> IndexMut<(usize, usize)> for Mat<S> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        let at = self.offset(i, j);
        &mut self.data.as_mut()[at]
    }
}

/// Rows of `    {:.6} ` cells, one line per row.
impl<S: AsRef<[f32]>> fmt::Display for Mat<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, "    {:.6} ", self[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Prints a matrix labelled with the expression that produced it.
#[macro_export]
macro_rules! mat_print {
    ($m:expr) => {
        $m.print(stringify!($m))
    };
}
