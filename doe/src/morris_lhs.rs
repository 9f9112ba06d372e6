use crate::errors::{DoeError, Result};
use crate::lhs::Lhs;
use crate::trajectory::walk;
use crate::utils::{check_strict_xlimits, unit_hypercube};
use crate::{MorrisExperiment, SamplingMethod};
use linfa::Float;
use log::{debug, info};
use ndarray::{concatenate, Array1, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_rand::rand::{
    seq::{index, SliceRandom},
    Rng, SeedableRng,
};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Draws allowed per missing trajectory when replacing duplicated ones
const MAX_DRAWS_PER_TRAJECTORY: usize = 100;

/// Morris experiment where trajectories start from the points of an LHS design.
///
/// Given a design of `size` points, each move along `x_i` is one LHS stratum
/// wide, that is `(upper_i - lower_i) / size`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct MorrisLhs<F: Float, R: Rng + Clone> {
    /// Sampling space definition as a (nx, 2) matrix
    xlimits: Array2<F>,
    /// Start points candidates as a (size, nx) matrix, expressed in sampling space units
    design: Array2<F>,
    /// Number of trajectories
    n_trajectories: usize,
    /// Random generator used for reproducibility
    rng: R,
}

impl<F: Float> MorrisLhs<F, Xoshiro256Plus> {
    /// Constructor given an LHS design, supposed to lie in `[0, 1]^nx`
    /// unless [MorrisLhs::bounds] is specified, and the number of trajectories.
    pub fn new(design: &ArrayBase<impl Data<Elem = F>, Ix2>, n_trajectories: usize) -> Result<Self> {
        Self::new_with_rng(design, n_trajectories, Xoshiro256Plus::from_entropy())
    }

    /// Constructor drawing a classic LHS design of `size` points in the given
    /// sample space, then used as start points candidates.
    ///
    /// ```
    /// use morrisbox_doe::{MorrisExperiment, MorrisLhs};
    /// use ndarray::array;
    ///
    /// let xlimits = array![[0., 1.], [-5., 5.]];
    /// let experiment = MorrisLhs::sampled(&xlimits, 20, 5).expect("valid experiment");
    /// assert_eq!(experiment.generate().expect("trajectories").dim(), (5 * 3, 2));
    /// ```
    pub fn sampled(
        xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>,
        size: usize,
        n_trajectories: usize,
    ) -> Result<Self> {
        Self::sampled_with_rng(xlimits, size, n_trajectories, Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float, R: Rng + Clone> MorrisLhs<F, R> {
    /// Constructor with given design, number of trajectories and random generator
    pub fn new_with_rng(
        design: &ArrayBase<impl Data<Elem = F>, Ix2>,
        n_trajectories: usize,
        rng: R,
    ) -> Result<Self> {
        if design.nrows() == 0 || design.ncols() == 0 {
            return Err(DoeError::InvalidValue(format!(
                "LHS design should not be empty, got shape {:?}",
                design.shape()
            )));
        }
        if n_trajectories == 0 {
            return Err(DoeError::InvalidValue(
                "number of trajectories should be positive".to_string(),
            ));
        }
        Ok(MorrisLhs {
            xlimits: unit_hypercube(design.ncols()),
            design: design.to_owned(),
            n_trajectories,
            rng,
        })
    }

    /// Same as [MorrisLhs::sampled] with given random generator
    pub fn sampled_with_rng(
        xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>,
        size: usize,
        n_trajectories: usize,
        mut rng: R,
    ) -> Result<Self> {
        if size == 0 {
            return Err(DoeError::InvalidValue(
                "LHS size should be positive".to_string(),
            ));
        }
        let design = Lhs::new_with_rng(xlimits, Xoshiro256Plus::seed_from_u64(rng.gen()))?
            .sample(size);
        Self::new_with_rng(&design, n_trajectories, rng)?.bounds(xlimits)
    }

    /// Sets the sample space as a (nx, 2) matrix \[\[lower bound, upper bound\], ...\],
    /// the design points are then expected to lie in this space.
    pub fn bounds(mut self, xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Self> {
        check_strict_xlimits(xlimits)?;
        if xlimits.nrows() != self.design.ncols() {
            return Err(DoeError::DimensionMismatch {
                expected: self.design.ncols(),
                actual: xlimits.nrows(),
            });
        }
        self.xlimits = xlimits.to_owned();
        Ok(self)
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> MorrisLhs<F, R2> {
        MorrisLhs {
            xlimits: self.xlimits,
            design: self.design,
            n_trajectories: self.n_trajectories,
            rng,
        }
    }

    /// Start points candidates
    pub fn design(&self) -> &Array2<F> {
        &self.design
    }

    /// Design mapped to `[0, 1]^nx`, fails if a point is NaN or lies outside the sample space
    fn normalized_design(&self) -> Result<Array2<F>> {
        let lower = self.xlimits.column(0);
        let range = &self.xlimits.column(1) - &lower;
        let normalized = (&self.design - &lower) / &range;
        let tol = F::cast(1e-10);
        if let Some(i) = normalized
            .axis_iter(Axis(0))
            .position(|row| {
                row.iter()
                    .any(|&v| v.is_nan() || v < -tol || v > F::one() + tol)
            })
        {
            return Err(DoeError::InvalidValue(format!(
                "LHS design point {} lies outside the sampling space: {}",
                i,
                self.design.row(i)
            )));
        }
        Ok(normalized)
    }

    /// Picks start indices in the design, distinct ones when possible
    fn start_indices(&self, size: usize, rng: &mut R) -> Vec<usize> {
        if self.n_trajectories <= size {
            info!("Number of trajectories lower than LHS size: generate fully independent paths");
            index::sample(rng, size, self.n_trajectories).into_vec()
        } else {
            info!("Number of trajectories greater than LHS size: some paths may start from the same point");
            let mut indices: Vec<usize> = (0..size).collect();
            indices.shuffle(rng);
            indices.extend((size..self.n_trajectories).map(|_| rng.gen_range(0..size)));
            indices
        }
    }
}

impl<F: Float, R: Rng + Clone> MorrisExperiment<F> for MorrisLhs<F, R> {
    fn sampling_space(&self) -> &Array2<F> {
        &self.xlimits
    }

    fn n_trajectories(&self) -> usize {
        self.n_trajectories
    }

    fn steps(&self) -> Array1<F> {
        (&self.xlimits.column(1) - &self.xlimits.column(0)) / F::cast(self.design.nrows())
    }

    fn generate(&self) -> Result<Array2<F>> {
        let mut rng = self.rng.clone();
        let normalized = self.normalized_design()?;
        let (size, nx) = normalized.dim();
        let unit_steps = Array1::from_elem(nx, F::one() / F::cast(size));
        let lower = Array1::zeros(nx);
        let upper = Array1::ones(nx);
        let tol = F::cast(1e-10);
        let draw = |index: usize, rng: &mut R| -> Result<Array2<F>> {
            debug!("Trajectory starts from LHS point {index}");
            walk(&normalized.row(index), &unit_steps, &lower, &upper, tol, rng)
        };

        let mut trajectories: Vec<Array2<F>> = Vec::with_capacity(self.n_trajectories);
        let mut n_duplicates = 0;
        for index in self.start_indices(size, &mut rng) {
            let trajectory = draw(index, &mut rng)?;
            if trajectories.contains(&trajectory) {
                n_duplicates += 1;
            } else {
                trajectories.push(trajectory);
            }
        }
        if n_duplicates > 0 {
            info!("Replace {n_duplicates} duplicated trajectories");
            let mut draws = 0;
            while trajectories.len() < self.n_trajectories {
                if draws == MAX_DRAWS_PER_TRAJECTORY * n_duplicates {
                    return Err(DoeError::TrajectoryError(format!(
                        "unable to draw {} distinct trajectories from an LHS design of size {}",
                        self.n_trajectories, size
                    )));
                }
                draws += 1;
                let trajectory = draw(rng.gen_range(0..size), &mut rng)?;
                if !trajectories.contains(&trajectory) {
                    trajectories.push(trajectory);
                }
            }
        }

        let lower = self.xlimits.column(0);
        let range = &self.xlimits.column(1) - &lower;
        let views: Vec<_> = trajectories.iter().map(|t| t.view()).collect();
        let stacked = concatenate(Axis(0), &views)
            .map_err(|err| DoeError::InvalidValue(format!("trajectories stacking: {err}")))?;
        Ok(stacked * &range + lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn check_trajectories(x: &Array2<f64>, nx: usize, steps: &Array1<f64>) {
        for traj in x.axis_chunks_iter(Axis(0), nx + 1) {
            let mut moved = vec![false; nx];
            for k in 0..nx {
                let diff = &traj.row(k + 1) - &traj.row(k);
                let changed: Vec<usize> = (0..nx).filter(|&j| diff[j].abs() > 1e-12).collect();
                assert_eq!(changed.len(), 1);
                let axis = changed[0];
                assert!(!moved[axis]);
                assert_abs_diff_eq!(diff[axis].abs(), steps[axis], epsilon = 1e-9);
                moved[axis] = true;
            }
        }
    }

    #[test]
    fn test_lhs_independent_trajectories() {
        let design = Lhs::new(&unit_hypercube::<f64>(5))
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(42))
            .sample(20);
        let experiment = MorrisLhs::new(&design, 8)
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(0));
        let x = experiment.generate().unwrap();
        assert_eq!(x.dim(), (8 * 6, 5));
        assert_abs_diff_eq!(experiment.steps(), Array1::from_elem(5, 0.05), epsilon = 1e-12);
        check_trajectories(&x, 5, &experiment.steps());

        // start points are distinct design points
        let starts: Vec<_> = x
            .axis_chunks_iter(Axis(0), 6)
            .map(|t| t.row(0).to_owned())
            .collect();
        for (i, s) in starts.iter().enumerate() {
            assert!(design.rows().into_iter().any(|row| row == s.view()));
            assert!(starts[i + 1..].iter().all(|other| other != s));
        }
        assert!(x.iter().all(|v| (0. ..=1.).contains(v)));
    }

    #[test]
    fn test_lhs_more_trajectories_than_points() {
        let xlimits = array![[-1., 1.], [0., 10.]];
        let experiment =
            MorrisLhs::sampled_with_rng(&xlimits, 4, 10, Xoshiro256Plus::seed_from_u64(3)).unwrap();
        let x = experiment.generate().unwrap();
        assert_eq!(x.dim(), (10 * 3, 2));
        assert_abs_diff_eq!(experiment.steps(), array![0.5, 2.5], epsilon = 1e-12);
        check_trajectories(&x, 2, &experiment.steps());
        let trajectories: Vec<_> = x.axis_chunks_iter(Axis(0), 3).collect();
        for (i, t) in trajectories.iter().enumerate() {
            assert!(trajectories[i + 1..].iter().all(|other| other != t));
        }
    }

    #[test]
    fn test_lhs_with_bounds() {
        let xlimits = array![[10., 20.], [0., 2.]];
        let design = array![[11., 0.1], [13., 1.5], [15., 0.9], [19., 0.5], [17., 1.3]];
        let experiment = MorrisLhs::new(&design, 3)
            .unwrap()
            .bounds(&xlimits)
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(1));
        let x = experiment.generate().unwrap();
        assert_eq!(x.dim(), (9, 2));
        check_trajectories(&x, 2, &array![2., 0.4]);
    }

    #[test]
    fn test_lhs_design_outside_space() {
        let design = array![[0.5, 1.5], [0.2, 0.1]];
        let experiment = MorrisLhs::new(&design, 1).unwrap();
        assert!(experiment.generate().is_err());
    }

    #[test]
    fn test_lhs_design_with_nan() {
        let design = array![[0.5, f64::NAN], [0.2, 0.1]];
        let experiment = MorrisLhs::new(&design, 2)
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(0));
        assert!(matches!(
            experiment.generate(),
            Err(DoeError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_lhs_not_enough_distinct_trajectories() {
        // boundary points only allow a single trajectory each
        let design = array![[0.], [1.]];
        let experiment = MorrisLhs::new(&design, 3)
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(0));
        assert!(matches!(
            experiment.generate(),
            Err(DoeError::TrajectoryError(_))
        ));
    }

    #[test]
    fn test_lhs_bad_inputs() {
        assert!(MorrisLhs::new(&Array2::<f64>::zeros((0, 2)), 3).is_err());
        assert!(MorrisLhs::new(&array![[0.5, 0.5]], 0).is_err());
        assert!(MorrisLhs::new(&array![[0.5, 0.5]], 1)
            .unwrap()
            .bounds(&array![[0., 1.]])
            .is_err());
    }
}
