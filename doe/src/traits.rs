use crate::errors::Result;
use linfa::Float;
use ndarray::{Array1, Array2};

/// Sampling method allowing to generate a DoE in a given sample space
///
/// A sampling method is able to generate a set of `ns` samples in a given sample space.
/// where the sample space is defined by `[lower_bound_xi, upper_bound_xi]^nx`
/// within `R^nx` where `nx` is the dimension of the sample space: x = (x_i) with i in [1, nx].
pub trait SamplingMethod<F: Float> {
    /// Returns the bounds of the sample space
    ///
    /// # Returns
    ///
    /// * A (nx, 2) matrix where the ith row is the interval of the ith components of a sample.
    fn sampling_space(&self) -> &Array2<F>;

    /// Generates a (ns, nx)-shaped array of samples belonging to `[0., 1.]^nx`
    fn normalized_sample(&self, ns: usize) -> Array2<F>;

    /// Generates a (ns, nx)-shaped array of samples belonging to `[lower_bound_xi, upper_bound_xi]^nx`
    /// where bounds are defined as returned values of `sampling_space` function.
    fn sample(&self, ns: usize) -> Array2<F> {
        let xlimits = self.sampling_space();
        let lower = xlimits.column(0);
        let scaler = &xlimits.column(1) - &lower;
        self.normalized_sample(ns) * scaler + lower
    }
}

/// A design of experiments made of Morris trajectories
///
/// A trajectory is a sequence of `nx + 1` points where each point differs
/// from the previous one along a single axis, every axis being moved once.
/// Elementary effects are then computed as finite differences along the path.
pub trait MorrisExperiment<F: Float> {
    /// Returns the bounds of the sample space as a (nx, 2) matrix
    fn sampling_space(&self) -> &Array2<F>;

    /// Number of trajectories `r` generated by the experiment
    fn n_trajectories(&self) -> usize;

    /// Dimension `nx` of the sample space
    fn dim(&self) -> usize {
        self.sampling_space().nrows()
    }

    /// Perturbation applied along each axis, expressed in sample space units
    fn steps(&self) -> Array1<F>;

    /// Generates the `r` trajectories stacked in a (r * (nx + 1), nx) matrix
    fn generate(&self) -> Result<Array2<F>>;
}
