//! Morris elementary effects screening toolbox.
//!
//! This crate gathers the [morrisbox_doe] and [morrisbox_sensitivity] crates:
//! * [doe] generates Morris experiments, sets of one-at-a-time trajectories
//!   starting either from a p-level grid or from a latin hypercube design,
//! * [sensitivity] evaluates elementary effects and their statistics to rank
//!   inputs of a model by influence.
//!
//! With the `python` feature, it also provides the `morrisbox` Python module
//! (built with maturin and the `extension-module` feature):
//!
//! ```python
//! import numpy as np
//! import morrisbox as mb
//!
//! f = mb.MorrisFunction()
//! experiment = mb.MorrisExperimentGrid([5] * 20, 10, seed=42)
//! x = experiment.generate()
//! morris = mb.Morris(x, f(x))
//! print(morris.mean_absolute_elementary_effects())
//! ```
pub use morrisbox_doe as doe;
pub use morrisbox_sensitivity as sensitivity;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
mod tests {
    use super::doe::{MorrisExperiment, MorrisGrid, MorrisLhs};
    use super::sensitivity::{Morris, MorrisFunction};
    use approx::assert_abs_diff_eq;
    use ndarray::s;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_grid_screening_of_morris_function() {
        let f = MorrisFunction::default();
        let experiment =
            MorrisGrid::new_with_rng(&[5; 20], 10, Xoshiro256Plus::seed_from_u64(42)).unwrap();
        let morris = Morris::from_experiment(&experiment, &f).unwrap();
        let mu_star = morris.mean_absolute_elementary_effects(0).unwrap();
        let sigma = morris.standard_deviation_elementary_effects(0).unwrap();
        assert_abs_diff_eq!(mu_star.slice(s![10..]).sum(), 0., epsilon = 1e-9);
        assert_abs_diff_eq!(sigma.slice(s![10..]).sum(), 0., epsilon = 1e-9);
        // linear inputs only, jump of 2 levels on a 5-level grid
        for i in [5, 7, 8, 9] {
            assert_abs_diff_eq!(mu_star[i], 40., epsilon = 1e-9);
            assert_abs_diff_eq!(sigma[i], 0., epsilon = 1e-9);
        }
    }

    #[test]
    fn test_lhs_screening_of_morris_function() {
        let f = MorrisFunction::default();
        let xlimits = morrisbox_doe::unit_hypercube::<f64>(20);
        let experiment = MorrisLhs::sampled_with_rng(
            &xlimits,
            10,
            10,
            Xoshiro256Plus::seed_from_u64(42),
        )
        .unwrap();
        assert_eq!(experiment.generate().unwrap().dim(), (210, 20));
        let morris = Morris::from_experiment(&experiment, &f).unwrap();
        let mu_star = morris.mean_absolute_elementary_effects(0).unwrap();
        assert_abs_diff_eq!(mu_star.slice(s![10..]).sum(), 0., epsilon = 1e-9);
    }
}
