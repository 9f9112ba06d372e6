use crate::errors::Result;
use crate::utils::{check_xlimits, pdist};
use crate::SamplingMethod;
use linfa::Float;
use ndarray::{Array, Array1, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_rand::{
    rand::seq::SliceRandom, rand::Rng, rand::SeedableRng, rand_distr::Uniform, RandomExt,
};
use ndarray_stats::QuantileExt;
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Number of candidate designs drawn by maximin kinds
const MAXIMIN_ITERATIONS: usize = 5;

/// Kinds of Latin Hypercube Design
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum LhsKind {
    /// sample is choosen randomly within its latin hypercube intervals
    #[default]
    Classic,
    /// sample is the middle of its latin hypercube intervals
    Centered,
    /// best of several classic designs regarding the minimal distance between points
    Maximin,
    /// best of several centered designs regarding the minimal distance between points
    CenteredMaximin,
}

/// The LHS design is built as follows: each dimension space is divided into ns sections
/// where ns is the number of sampling points, and one point in selected in each section.
/// The selection method gives different kind of LHS (see [LhsKind])
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Lhs<F: Float, R: Rng + Clone> {
    /// Sampling space definition as a (nx, 2) matrix
    /// The ith row is the [lower_bound, upper_bound] of xi, the ith component of x
    xlimits: Array2<F>,
    /// The requested kind of LHS
    kind: LhsKind,
    /// Random generator used for reproducibility
    rng: R,
}

/// LHS with default random generator
impl<F: Float> Lhs<F, Xoshiro256Plus> {
    /// Constructor given a design space given a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
    ///
    /// ```
    /// use morrisbox_doe::Lhs;
    /// use ndarray::arr2;
    ///
    /// let doe = Lhs::new(&arr2(&[[0.0, 1.0], [5.0, 10.0]])).expect("valid space");
    /// ```
    pub fn new(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Self> {
        Self::new_with_rng(xlimits, Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float, R: Rng + Clone> SamplingMethod<F> for Lhs<F, R> {
    fn sampling_space(&self) -> &Array2<F> {
        &self.xlimits
    }

    fn normalized_sample(&self, ns: usize) -> Array2<F> {
        let mut rng = self.rng.clone();
        match self.kind {
            LhsKind::Classic => self.classic(ns, &mut rng),
            LhsKind::Centered => self.centered(ns, &mut rng),
            LhsKind::Maximin => self.maximin(ns, false, &mut rng),
            LhsKind::CenteredMaximin => self.maximin(ns, true, &mut rng),
        }
    }
}

impl<F: Float, R: Rng + Clone> Lhs<F, R> {
    /// Constructor with given design space and random generator.
    /// * `xlimits`: (nx, 2) matrix where nx is the dimension of the samples and the ith row
    ///   is the definition interval of the ith component of x.
    /// * `rng`: random generator used to draw and shuffle strata
    pub fn new_with_rng(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>, rng: R) -> Result<Self> {
        check_xlimits(xlimits)?;
        Ok(Lhs {
            xlimits: xlimits.to_owned(),
            kind: LhsKind::default(),
            rng,
        })
    }

    /// Sets the kind of LHS
    pub fn kind(mut self, kind: LhsKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> Lhs<F, R2> {
        Lhs {
            xlimits: self.xlimits,
            kind: self.kind,
            rng,
        }
    }

    /// Lower bounds of the `ns` strata of `[0, 1]`
    fn strata(ns: usize) -> Array1<f64> {
        Array::range(0., ns as f64, 1.) / ns as f64
    }

    /// Shuffles each column of `points` independently
    fn shuffle_columns(mut points: Array2<f64>, rng: &mut R) -> Array2<F> {
        for mut col in points.columns_mut() {
            let mut values = col.to_vec();
            values.shuffle(rng);
            col.assign(&Array1::from_vec(values));
        }
        points.mapv(F::cast)
    }

    fn classic(&self, ns: usize, rng: &mut R) -> Array2<F> {
        let nx = self.xlimits.nrows();
        let width = 1. / ns as f64;
        let jitter = Array::random_using((ns, nx), Uniform::new(0., 1.), rng);
        let lower = Self::strata(ns).insert_axis(Axis(1));
        let points = jitter * width + &lower;
        Self::shuffle_columns(points, rng)
    }

    fn centered(&self, ns: usize, rng: &mut R) -> Array2<F> {
        let nx = self.xlimits.nrows();
        let middles = Self::strata(ns) + 0.5 / ns as f64;
        let points = Array2::from_shape_fn((ns, nx), |(i, _)| middles[i]);
        Self::shuffle_columns(points, rng)
    }

    fn maximin(&self, ns: usize, centered: bool, rng: &mut R) -> Array2<F> {
        let mut best = Array2::zeros((ns, self.xlimits.nrows()));
        let mut best_dist = F::neg_infinity();
        for _ in 0..MAXIMIN_ITERATIONS {
            let lhs = if centered {
                self.centered(ns, rng)
            } else {
                self.classic(ns, rng)
            };
            let d_min = pdist(&lhs).min().map(|d| *d).unwrap_or(F::zero());
            if d_min > best_dist {
                best_dist = d_min;
                best = lhs;
            }
        }
        best
    }
}
