use crate::errors::{Result, SensitivityError};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix2, Zip};

/// A function from `R^input_dim` to `R^output_dim`, the model under screening
pub trait VectorFunction: Sync {
    /// Dimension of the input space
    fn input_dim(&self) -> usize;

    /// Dimension of the output space
    fn output_dim(&self) -> usize;

    /// Evaluates the function at a single point `x` of dimension `input_dim`
    fn eval(&self, x: &ArrayView1<f64>) -> Array1<f64>;

    /// Evaluates the function on each row of the (n, input_dim) sample `x`
    /// and returns the (n, output_dim) sample of outputs.
    /// Rows are evaluated in parallel, an evaluation which size is not
    /// `output_dim` is reported as a dimension mismatch.
    fn eval_sample(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Array2<f64>>
    where
        Self: Sized,
    {
        if x.ncols() != self.input_dim() {
            return Err(SensitivityError::DimensionMismatch {
                what: "input sample".to_string(),
                expected: self.input_dim(),
                actual: x.ncols(),
            });
        }
        let outputs = Zip::from(x.rows()).par_map_collect(|xi| self.eval(&xi));
        let mut y = Array2::zeros((x.nrows(), self.output_dim()));
        for (mut yi, out) in y.rows_mut().into_iter().zip(outputs.iter()) {
            if out.len() != self.output_dim() {
                return Err(SensitivityError::DimensionMismatch {
                    what: "function output".to_string(),
                    expected: self.output_dim(),
                    actual: out.len(),
                });
            }
            yi.assign(out);
        }
        Ok(y)
    }
}

/// A [VectorFunction] defined by a closure
///
/// ```
/// use morrisbox_sensitivity::{Function, VectorFunction};
/// use ndarray::{array, ArrayView1};
///
/// let f = Function::new(2, 1, |x: &ArrayView1<f64>| array![x[0] * x[1]]);
/// let y = f.eval_sample(&array![[1., 2.], [3., 4.]]).expect("evaluation");
/// assert_eq!(y, array![[2.], [12.]]);
/// ```
pub struct Function<Func> {
    input_dim: usize,
    output_dim: usize,
    func: Func,
}

impl<Func> Function<Func>
where
    Func: Fn(&ArrayView1<f64>) -> Array1<f64> + Sync,
{
    /// Constructor given input and output dimensions and the closure computing outputs
    pub fn new(input_dim: usize, output_dim: usize, func: Func) -> Self {
        Function {
            input_dim,
            output_dim,
            func,
        }
    }
}

impl<Func> VectorFunction for Function<Func>
where
    Func: Fn(&ArrayView1<f64>) -> Array1<f64> + Sync,
{
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn output_dim(&self) -> usize {
        self.output_dim
    }

    fn eval(&self, x: &ArrayView1<f64>) -> Array1<f64> {
        (self.func)(x)
    }
}
