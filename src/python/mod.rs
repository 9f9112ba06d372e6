mod sampling;
mod screening;

use sampling::*;
use screening::*;

use env_logger::{Builder, Env};
use morrisbox_sensitivity::MORRISBOX_LOG;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Maps any library error to a Python `ValueError`
pub(crate) fn value_error<E: std::fmt::Display>(err: E) -> PyErr {
    PyValueError::new_err(err.to_string())
}

#[doc(hidden)]
#[pymodule]
fn morrisbox(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    let env = Env::new().filter_or(MORRISBOX_LOG, "info");
    let mut builder = Builder::from_env(env);
    let builder = builder.target(env_logger::Target::Stdout);
    builder.try_init().ok();

    // sampling
    m.add_function(wrap_pyfunction!(lhs, m)?)?;
    m.add_class::<LhsKind>()?;
    m.add_class::<MorrisExperimentGrid>()?;
    m.add_class::<MorrisExperimentLHS>()?;

    // screening
    m.add_class::<MorrisFunction>()?;
    m.add_class::<Morris>()?;

    Ok(())
}
