use super::value_error;
use log::info;
use morrisbox_doe::{MorrisExperiment, MorrisGrid, MorrisLhs, SamplingMethod};
use ndarray_rand::rand::SeedableRng;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;
use rand_xoshiro::Xoshiro256Plus;

pub(crate) fn rng(seed: Option<u64>) -> Xoshiro256Plus {
    match seed {
        Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
        None => Xoshiro256Plus::from_entropy(),
    }
}

#[pyclass]
#[derive(Debug, Clone, Copy)]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
pub(crate) enum LhsKind {
    CLASSIC = 0,
    CENTERED = 1,
    MAXIMIN = 2,
    CENTERED_MAXIMIN = 3,
}

impl From<LhsKind> for morrisbox_doe::LhsKind {
    fn from(kind: LhsKind) -> Self {
        match kind {
            LhsKind::CLASSIC => morrisbox_doe::LhsKind::Classic,
            LhsKind::CENTERED => morrisbox_doe::LhsKind::Centered,
            LhsKind::MAXIMIN => morrisbox_doe::LhsKind::Maximin,
            LhsKind::CENTERED_MAXIMIN => morrisbox_doe::LhsKind::CenteredMaximin,
        }
    }
}

/// Samples generation using Latin Hypercube Sampling
///
/// # Parameters
///     xlimits: array of shape (n_variables, 2) [[lower, upper], ...]
///     n_samples: number of samples
///     kind: LhsKind.CLASSIC (default), CENTERED, MAXIMIN or CENTERED_MAXIMIN
///     seed: random seed
///
/// # Returns
///    ndarray of shape (n_samples, n_variables)
///
#[pyfunction]
#[pyo3(signature = (xlimits, n_samples, kind=LhsKind::CLASSIC, seed=None))]
pub(crate) fn lhs<'py>(
    py: Python<'py>,
    xlimits: PyReadonlyArray2<f64>,
    n_samples: usize,
    kind: LhsKind,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let doe = morrisbox_doe::Lhs::new_with_rng(&xlimits.as_array(), rng(seed))
        .map_err(value_error)?
        .kind(kind.into())
        .sample(n_samples);
    Ok(doe.into_pyarray_bound(py))
}

/// Morris experiment: trajectories walking on a p-level grid
///
/// # Parameters
///     levels: list of numbers of levels (>= 2) per variable
///     n_trajectories: number of trajectories (> 0)
///     xlimits: array of shape (n_variables, 2), unit hypercube when None
///     jump_steps: list of jumps in levels per variable, 1 <= jump <= levels - 1,
///         levels / 2 when None
///     seed: random seed
///
#[pyclass]
pub(crate) struct MorrisExperimentGrid(MorrisGrid<f64, Xoshiro256Plus>);

#[pymethods]
impl MorrisExperimentGrid {
    #[new]
    #[pyo3(signature = (levels, n_trajectories, xlimits=None, jump_steps=None, seed=None))]
    fn new(
        levels: Vec<usize>,
        n_trajectories: usize,
        xlimits: Option<PyReadonlyArray2<f64>>,
        jump_steps: Option<Vec<usize>>,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let mut grid =
            MorrisGrid::new_with_rng(&levels, n_trajectories, rng(seed)).map_err(value_error)?;
        if let Some(xlimits) = xlimits {
            grid = grid.bounds(&xlimits.as_array()).map_err(value_error)?;
        }
        if let Some(jumps) = jump_steps {
            grid = grid.jump_steps(&jumps).map_err(value_error)?;
        }
        Ok(MorrisExperimentGrid(grid))
    }

    /// Generates the trajectories
    ///
    /// # Returns
    ///     ndarray of shape (n_trajectories * (n_variables + 1), n_variables)
    ///
    fn generate<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let x = self.0.generate().map_err(value_error)?;
        Ok(x.into_pyarray_bound(py))
    }

    /// Sampling space as an array of shape (n_variables, 2)
    #[getter]
    fn xlimits<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.0.sampling_space().to_owned().into_pyarray_bound(py)
    }

    /// Step sizes per variable
    #[getter]
    fn steps<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.0.steps().into_pyarray_bound(py)
    }
}

/// Morris experiment: trajectories starting from the points of a design
///
/// # Parameters
///     design: array of shape (size, n_variables), typically an LHS
///     n_trajectories: number of trajectories (> 0)
///     xlimits: array of shape (n_variables, 2) containing the design,
///         unit hypercube when None
///     seed: random seed
///
#[pyclass]
pub(crate) struct MorrisExperimentLHS(MorrisLhs<f64, Xoshiro256Plus>);

#[pymethods]
impl MorrisExperimentLHS {
    #[new]
    #[pyo3(signature = (design, n_trajectories, xlimits=None, seed=None))]
    fn new(
        design: PyReadonlyArray2<f64>,
        n_trajectories: usize,
        xlimits: Option<PyReadonlyArray2<f64>>,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let mut experiment = MorrisLhs::new_with_rng(&design.as_array(), n_trajectories, rng(seed))
            .map_err(value_error)?;
        if let Some(xlimits) = xlimits {
            experiment = experiment.bounds(&xlimits.as_array()).map_err(value_error)?;
        }
        info!(
            "Morris LHS experiment with {} design points",
            experiment.design().nrows()
        );
        Ok(MorrisExperimentLHS(experiment))
    }

    /// Generates the trajectories
    ///
    /// # Returns
    ///     ndarray of shape (n_trajectories * (n_variables + 1), n_variables)
    ///
    fn generate<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let x = self.0.generate().map_err(value_error)?;
        Ok(x.into_pyarray_bound(py))
    }

    /// Sampling space as an array of shape (n_variables, 2)
    #[getter]
    fn xlimits<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.0.sampling_space().to_owned().into_pyarray_bound(py)
    }

    /// Step sizes per variable
    #[getter]
    fn steps<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.0.steps().into_pyarray_bound(py)
    }
}
