use crate::errors::{DoeError, Result};
use crate::trajectory::walk;
use crate::utils::{check_strict_xlimits, unit_hypercube};
use crate::MorrisExperiment;
use linfa::Float;
use log::{debug, info};
use ndarray::{concatenate, Array1, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_rand::rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Morris experiment where trajectories walk on a p-level grid.
///
/// Each component `x_i` of the sample space is discretized in `p_i` evenly spaced
/// levels, start points are drawn among the grid nodes and each move jumps over
/// `j_i` levels (by default `p_i / 2`) so that every trajectory point is a node.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct MorrisGrid<F: Float, R: Rng + Clone> {
    /// Sampling space definition as a (nx, 2) matrix
    xlimits: Array2<F>,
    /// Number of levels per component
    levels: Vec<usize>,
    /// Number of levels jumped over by a move, per component
    jumps: Vec<usize>,
    /// Number of trajectories
    n_trajectories: usize,
    /// Random generator used for reproducibility
    rng: R,
}

impl<F: Float> MorrisGrid<F, Xoshiro256Plus> {
    /// Constructor given the number of levels of each component and the number of trajectories.
    /// The sample space is `[0, 1]^nx` where `nx = levels.len()`.
    ///
    /// ```
    /// use morrisbox_doe::{MorrisExperiment, MorrisGrid};
    ///
    /// let experiment = MorrisGrid::<f64, _>::new(&[5; 3], 4).expect("valid grid");
    /// let x = experiment.generate().expect("trajectories");
    /// assert_eq!(x.dim(), (4 * 4, 3));
    /// ```
    pub fn new(levels: &[usize], n_trajectories: usize) -> Result<Self> {
        Self::new_with_rng(levels, n_trajectories, Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float, R: Rng + Clone> MorrisGrid<F, R> {
    /// Constructor with given levels, number of trajectories and random generator
    pub fn new_with_rng(levels: &[usize], n_trajectories: usize, rng: R) -> Result<Self> {
        if levels.is_empty() {
            return Err(DoeError::InvalidValue(
                "at least one component is required".to_string(),
            ));
        }
        if let Some(p) = levels.iter().find(|&&p| p < 2) {
            return Err(DoeError::InvalidValue(format!(
                "number of levels should be greater or equal to 2, got {p}"
            )));
        }
        if n_trajectories == 0 {
            return Err(DoeError::InvalidValue(
                "number of trajectories should be positive".to_string(),
            ));
        }
        Ok(MorrisGrid {
            xlimits: unit_hypercube(levels.len()),
            levels: levels.to_vec(),
            jumps: levels.iter().map(|&p| usize::max(1, p / 2)).collect(),
            n_trajectories,
            rng,
        })
    }

    /// Sets the sample space as a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
    pub fn bounds(mut self, xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Self> {
        check_strict_xlimits(xlimits)?;
        if xlimits.nrows() != self.levels.len() {
            return Err(DoeError::DimensionMismatch {
                expected: self.levels.len(),
                actual: xlimits.nrows(),
            });
        }
        self.xlimits = xlimits.to_owned();
        Ok(self)
    }

    /// Sets the number of levels jumped over by a move along each component,
    /// `jumps[i]` should belong to `[1, levels[i] - 1]`. Start levels are then
    /// drawn among the levels from which such a move stays on the grid.
    pub fn jump_steps(mut self, jumps: &[usize]) -> Result<Self> {
        if jumps.len() != self.levels.len() {
            return Err(DoeError::DimensionMismatch {
                expected: self.levels.len(),
                actual: jumps.len(),
            });
        }
        for (i, (&j, &p)) in jumps.iter().zip(self.levels.iter()).enumerate() {
            if j == 0 || j >= p {
                return Err(DoeError::InvalidValue(format!(
                    "jump step of x{i} should be in [1, {}], got {j}",
                    p - 1
                )));
            }
        }
        self.jumps = jumps.to_vec();
        Ok(self)
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> MorrisGrid<F, R2> {
        MorrisGrid {
            xlimits: self.xlimits,
            levels: self.levels,
            jumps: self.jumps,
            n_trajectories: self.n_trajectories,
            rng,
        }
    }

    /// Number of levels per component
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Number of levels jumped over by a move, per component
    pub fn jumps(&self) -> &[usize] {
        &self.jumps
    }

    /// Distance between two consecutive levels, per component
    fn level_widths(&self) -> Array1<F> {
        let range = &self.xlimits.column(1) - &self.xlimits.column(0);
        let divisions = Array1::from_iter(self.levels.iter().map(|&p| F::cast(p - 1)));
        range / divisions
    }

    /// Draws one trajectory expressed in levels indices
    fn level_trajectory(&self, rng: &mut R) -> Result<Array2<F>> {
        let mut start = Array1::zeros(self.levels.len());
        for (i, (&p, &j)) in self.levels.iter().zip(self.jumps.iter()).enumerate() {
            // each axis moves once: level k needs k + j or k - j on the grid
            let admissible: Vec<usize> = (0..p).filter(|&k| k + j < p || k >= j).collect();
            let level = admissible.choose(rng).ok_or_else(|| {
                DoeError::TrajectoryError(format!("no admissible start level for x{i}"))
            })?;
            start[i] = F::cast(*level);
        }
        let steps = Array1::from_iter(self.jumps.iter().map(|&j| F::cast(j)));
        let lower = Array1::zeros(self.levels.len());
        let upper = Array1::from_iter(self.levels.iter().map(|&p| F::cast(p - 1)));
        walk(&start, &steps, &lower, &upper, F::zero(), rng)
    }
}

impl<F: Float, R: Rng + Clone> MorrisExperiment<F> for MorrisGrid<F, R> {
    fn sampling_space(&self) -> &Array2<F> {
        &self.xlimits
    }

    fn n_trajectories(&self) -> usize {
        self.n_trajectories
    }

    fn steps(&self) -> Array1<F> {
        let jumps = Array1::from_iter(self.jumps.iter().map(|&j| F::cast(j)));
        self.level_widths() * jumps
    }

    fn generate(&self) -> Result<Array2<F>> {
        info!(
            "Generate {} trajectories on a {:?}-level grid",
            self.n_trajectories, self.levels
        );
        let mut rng = self.rng.clone();
        let widths = self.level_widths();
        let lower = self.xlimits.column(0);
        let mut trajectories = Vec::with_capacity(self.n_trajectories);
        for k in 0..self.n_trajectories {
            let levels = self.level_trajectory(&mut rng)?;
            debug!("Trajectory {} starts at levels {}", k, levels.row(0));
            trajectories.push(levels * &widths + lower);
        }
        let views: Vec<_> = trajectories.iter().map(|t| t.view()).collect();
        concatenate(Axis(0), &views)
            .map_err(|err| DoeError::InvalidValue(format!("trajectories stacking: {err}")))
    }
}
