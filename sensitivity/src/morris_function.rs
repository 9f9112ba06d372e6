use crate::errors::{Result, SensitivityError};
use crate::function::VectorFunction;
use ndarray::{array, s, Array1, Array2, Array3, Array4, ArrayView1};
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_rand::rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Input dimension of the reference function
pub const MORRIS_FUNCTION_DIM: usize = 20;

/// Components (0-based) going through the non-linear transform `1.1 x / (x + 0.1)`
const NONLINEAR_COMPONENTS: [usize; 3] = [2, 4, 6];

/// The 20-dimensional test function introduced by Morris (1991)
///
/// With `w_i = 2 (x_i - 0.5)`, except for `i = 3, 5, 7` where
/// `w_i = 2 (1.1 x_i / (x_i + 0.1) - 0.5)`, the function reads:
///
/// `y = b0 + sum(b_i w_i) + sum(b_ij w_i w_j) + sum(b_ijl w_i w_j w_l) + sum(b_ijls w_i w_j w_l w_s)`
///
/// where interaction sums run over strictly increasing indices.
/// Inputs are expected in `[0, 1]^20`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct MorrisFunction {
    b0: f64,
    /// first order coefficients `b_i`
    first: Array1<f64>,
    /// second order coefficients `b_ij`, only `i < j` entries are used
    second: Array2<f64>,
    /// third order coefficients `b_ijl`, only `i < j < l` entries are used
    third: Array3<f64>,
    /// fourth order coefficients `b_ijls`, only `i < j < l < s` entries are used
    fourth: Array4<f64>,
}

impl Default for MorrisFunction {
    /// The reference function: `b_i = 20` for `i <= 10`, `b_ijl = -10` for `i, j, l <= 5`,
    /// `b_ijls = 5` for `i, j, l, s <= 4`, other coefficients being zero.
    fn default() -> Self {
        let d = MORRIS_FUNCTION_DIM;
        let mut first = Array1::zeros(d);
        first.slice_mut(s![..10]).fill(20.);
        let mut third = Array3::zeros((d, d, d));
        third.slice_mut(s![..5, ..5, ..5]).fill(-10.);
        let mut fourth = Array4::zeros((d, d, d, d));
        fourth.slice_mut(s![..4, ..4, ..4, ..4]).fill(5.);
        MorrisFunction {
            b0: 0.,
            first,
            second: Array2::zeros((d, d)),
            third,
            fourth,
        }
    }
}

impl MorrisFunction {
    /// Constructor given all coefficients, the input dimension `d` being the
    /// size of `first` while `second`, `third` and `fourth` are expected
    /// to be `(d, d)`, `(d, d, d)` and `(d, d, d, d)` arrays.
    pub fn new(
        b0: f64,
        first: Array1<f64>,
        second: Array2<f64>,
        third: Array3<f64>,
        fourth: Array4<f64>,
    ) -> Result<Self> {
        let d = first.len();
        if d == 0 {
            return Err(SensitivityError::InvalidValue(
                "first order coefficients should not be empty".to_string(),
            ));
        }
        let checks = [
            ("second order coefficients", second.shape().to_vec(), vec![d; 2]),
            ("third order coefficients", third.shape().to_vec(), vec![d; 3]),
            ("fourth order coefficients", fourth.shape().to_vec(), vec![d; 4]),
        ];
        for (what, shape, expected) in checks {
            if shape != expected {
                return Err(SensitivityError::InvalidValue(format!(
                    "{what} should have shape {expected:?}, got {shape:?}"
                )));
            }
        }
        Ok(MorrisFunction {
            b0,
            first,
            second,
            third,
            fourth,
        })
    }

    /// The function as defined in Morris's paper: the reference coefficients
    /// plus `b_ij = -15` for `i, j <= 6`, the other first and second order
    /// coefficients and `b0` being drawn from a standard normal distribution.
    pub fn randomized(seed: u64) -> Self {
        Self::randomized_with_rng(&mut Xoshiro256Plus::seed_from_u64(seed))
    }

    /// Same as [MorrisFunction::randomized] with a given random generator
    pub fn randomized_with_rng<R: Rng>(rng: &mut R) -> Self {
        let d = MORRIS_FUNCTION_DIM;
        let mut function = Self::default();
        function.b0 = rng.sample(StandardNormal);
        for i in 10..d {
            function.first[i] = rng.sample(StandardNormal);
        }
        for i in 0..d {
            for j in (i + 1)..d {
                function.second[[i, j]] = if j < 6 {
                    -15.
                } else {
                    rng.sample(StandardNormal)
                };
            }
        }
        function
    }

    /// Constant term
    pub fn b0(&self) -> f64 {
        self.b0
    }

    /// First order coefficients
    pub fn first_order(&self) -> &Array1<f64> {
        &self.first
    }

    /// Second order coefficients
    pub fn second_order(&self) -> &Array2<f64> {
        &self.second
    }

    /// Third order coefficients
    pub fn third_order(&self) -> &Array3<f64> {
        &self.third
    }

    /// Fourth order coefficients
    pub fn fourth_order(&self) -> &Array4<f64> {
        &self.fourth
    }

    fn transform(&self, x: &ArrayView1<f64>) -> Array1<f64> {
        let mut w = x.mapv(|v| 2. * (v - 0.5));
        for &i in NONLINEAR_COMPONENTS.iter().filter(|&&i| i < x.len()) {
            w[i] = 2. * (1.1 * x[i] / (x[i] + 0.1) - 0.5);
        }
        w
    }
}

impl VectorFunction for MorrisFunction {
    fn input_dim(&self) -> usize {
        self.first.len()
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn eval(&self, x: &ArrayView1<f64>) -> Array1<f64> {
        let w = self.transform(x);
        let d = w.len();
        let mut y = self.b0 + self.first.dot(&w);
        for i in 0..d {
            for j in (i + 1)..d {
                let wij = w[i] * w[j];
                y += self.second[[i, j]] * wij;
                for l in (j + 1)..d {
                    let wijl = wij * w[l];
                    y += self.third[[i, j, l]] * wijl;
                    for s in (l + 1)..d {
                        y += self.fourth[[i, j, l, s]] * wijl * w[s];
                    }
                }
            }
        }
        array![y]
    }
}
