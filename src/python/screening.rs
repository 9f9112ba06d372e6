use super::value_error;
use morrisbox_doe::unit_hypercube;
use morrisbox_sensitivity::VectorFunction;
use ndarray::{Array2, Ix2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// The 20-dimensional test function of Morris (1991) defined on [0, 1]^20
///
/// # Parameters
///     seed: when given, the function as described in the paper with
///         random coefficients drawn from the seeded generator,
///         otherwise the deterministic reference function
///
#[pyclass]
pub(crate) struct MorrisFunction(morrisbox_sensitivity::MorrisFunction);

#[pymethods]
impl MorrisFunction {
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => MorrisFunction(morrisbox_sensitivity::MorrisFunction::randomized(seed)),
            None => MorrisFunction(morrisbox_sensitivity::MorrisFunction::default()),
        }
    }

    /// Input dimension of the function
    #[getter]
    fn input_dimension(&self) -> usize {
        self.0.input_dim()
    }

    /// Evaluates the function
    ///
    /// # Parameters
    ///     x: array of shape (n_samples, 20)
    ///
    /// # Returns
    ///     ndarray of shape (n_samples, 1)
    ///
    fn __call__<'py>(
        &self,
        py: Python<'py>,
        x: PyReadonlyArray2<f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let y = self.0.eval_sample(&x.as_array()).map_err(value_error)?;
        Ok(y.into_pyarray_bound(py))
    }
}

/// Elementary effects analysis of Morris trajectories
///
/// # Parameters
///     x: array of shape (n_trajectories * (n_variables + 1), n_variables)
///     y: array of shape (n_trajectories * (n_variables + 1), n_outputs)
///         or (n_trajectories * (n_variables + 1),) for a single output
///     xlimits: array of shape (n_variables, 2), unit hypercube when None
///
#[pyclass]
pub(crate) struct Morris(morrisbox_sensitivity::Morris);

#[pymethods]
impl Morris {
    #[new]
    #[pyo3(signature = (x, y, xlimits=None))]
    fn new(
        x: PyReadonlyArray2<f64>,
        y: PyReadonlyArrayDyn<f64>,
        xlimits: Option<PyReadonlyArray2<f64>>,
    ) -> PyResult<Self> {
        let x = x.as_array();
        let y = y.as_array().to_owned();
        let y: Array2<f64> = match y.ndim() {
            1 => {
                let n = y.len();
                y.into_shape((n, 1)).map_err(value_error)?
            }
            2 => y.into_dimensionality::<Ix2>().map_err(value_error)?,
            n => {
                return Err(PyValueError::new_err(format!(
                    "outputs should be a 1d or 2d array, got {n} dimensions"
                )))
            }
        };
        let xlimits = match xlimits {
            Some(xlimits) => xlimits.as_array().to_owned(),
            None => unit_hypercube(x.ncols()),
        };
        let morris = morrisbox_sensitivity::Morris::new(&x, &y, &xlimits).map_err(value_error)?;
        Ok(Morris(morris))
    }

    /// Number of trajectories
    #[getter]
    fn n_trajectories(&self) -> usize {
        self.0.n_trajectories()
    }

    /// Elementary effects of the given output
    ///
    /// # Returns
    ///     ndarray of shape (n_trajectories, n_variables)
    ///
    #[pyo3(signature = (output=0))]
    fn elementary_effects<'py>(
        &self,
        py: Python<'py>,
        output: usize,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let effects = self.0.elementary_effects(output).map_err(value_error)?;
        Ok(effects.to_owned().into_pyarray_bound(py))
    }

    /// Mean of the elementary effects of the given output per variable
    #[pyo3(signature = (output=0))]
    fn mean_elementary_effects<'py>(
        &self,
        py: Python<'py>,
        output: usize,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let mu = self.0.mean_elementary_effects(output).map_err(value_error)?;
        Ok(mu.into_pyarray_bound(py))
    }

    /// Mean of the absolute elementary effects (mu*) of the given output per variable
    #[pyo3(signature = (output=0))]
    fn mean_absolute_elementary_effects<'py>(
        &self,
        py: Python<'py>,
        output: usize,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let mu_star = self
            .0
            .mean_absolute_elementary_effects(output)
            .map_err(value_error)?;
        Ok(mu_star.into_pyarray_bound(py))
    }

    /// Standard deviation of the elementary effects (sigma) of the given output per variable
    #[pyo3(signature = (output=0))]
    fn standard_deviation_elementary_effects<'py>(
        &self,
        py: Python<'py>,
        output: usize,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let sigma = self
            .0
            .standard_deviation_elementary_effects(output)
            .map_err(value_error)?;
        Ok(sigma.into_pyarray_bound(py))
    }

    /// Data of the (mean, standard deviation) plot of the elementary effects
    ///
    /// # Parameters
    ///     output: output index
    ///     absolute: whether means are taken on absolute elementary effects
    ///     title: optional graph title
    ///
    /// # Returns
    ///     the graph as a JSON string {title, x_label, y_label, points: [{label, mean, std}, ...]}
    ///
    #[pyo3(signature = (output=0, absolute=true, title=None))]
    fn draw_elementary_effects(
        &self,
        output: usize,
        absolute: bool,
        title: Option<String>,
    ) -> PyResult<String> {
        let mut graph = self
            .0
            .elementary_effects_graph(output, absolute)
            .map_err(value_error)?;
        if let Some(title) = title {
            graph = graph.title(&title);
        }
        graph.to_json().map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "Morris(n_trajectories={}, input_dim={}, output_dim={})",
            self.0.n_trajectories(),
            self.0.input_dim(),
            self.0.output_dim()
        )
    }
}
