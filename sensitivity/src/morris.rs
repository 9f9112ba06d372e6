use crate::errors::{Result, SensitivityError};
use crate::function::VectorFunction;
use crate::graph::{EffectPoint, ElementaryEffectsGraph};
use log::{debug, info};
use morrisbox_doe::{check_strict_xlimits, MorrisExperiment};
use ndarray::{s, Array1, Array2, Array3, ArrayBase, ArrayView2, Axis, Data, Ix2};
use ndarray_npy::{read_npy, write_npy};
use ndarray_stats::QuantileExt;
use std::path::Path;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "persistent")]
use std::fs;
#[cfg(feature = "persistent")]
use std::io::Write;

/// Relative tolerance under which a component is considered as not moved
const MOVE_TOLERANCE: f64 = 1e-12;

/// Elementary effects analysis of the Morris screening method.
///
/// Given `r` trajectories of `nx + 1` points in `[lower, upper]^nx` and the
/// corresponding outputs, the elementary effect of input `x_i` on a trajectory is
///
/// `(y(x + delta_i e_i) - y(x)) / (delta_i / (upper_i - lower_i))`
///
/// Statistics of the `r` elementary effects per input rank inputs by influence:
/// a large mean of absolute effects flags an influent input, a large standard
/// deviation non-linear effects or interactions with other inputs.
///
/// ```
/// use morrisbox_doe::{MorrisExperiment, MorrisGrid};
/// use morrisbox_sensitivity::{Morris, MorrisFunction};
///
/// let f = MorrisFunction::default();
/// let experiment = MorrisGrid::new(&[5; 20], 10).expect("valid grid");
/// let morris = Morris::from_experiment(&experiment, &f).expect("analysis");
/// let mu_star = morris.mean_absolute_elementary_effects(0).expect("valid output");
/// let sigma = morris.standard_deviation_elementary_effects(0).expect("valid output");
/// assert_eq!((mu_star.len(), sigma.len()), (20, 20));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Morris {
    /// Sampling space as a (nx, 2) matrix
    xlimits: Array2<f64>,
    /// Elementary effects as a (r, nx, ny) array
    effects: Array3<f64>,
}

impl Morris {
    /// Computes elementary effects given `x`, a (r * (nx + 1), nx) sample of `r`
    /// trajectories, `y`, the (r * (nx + 1), ny) outputs, and `xlimits` the
    /// (nx, 2) sampling space.
    pub fn new(
        x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        y: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<Self> {
        check_strict_xlimits(xlimits)?;
        let nx = x.ncols();
        if xlimits.nrows() != nx {
            return Err(SensitivityError::DimensionMismatch {
                what: "sampling space".to_string(),
                expected: nx,
                actual: xlimits.nrows(),
            });
        }
        if y.nrows() != x.nrows() {
            return Err(SensitivityError::DimensionMismatch {
                what: "output sample size".to_string(),
                expected: x.nrows(),
                actual: y.nrows(),
            });
        }
        if y.ncols() == 0 {
            return Err(SensitivityError::InvalidValue(
                "output sample should have at least one component".to_string(),
            ));
        }
        if x.nrows() == 0 || x.nrows() % (nx + 1) != 0 {
            return Err(SensitivityError::InvalidValue(format!(
                "input sample size ({}) should be a positive multiple of nx + 1 ({})",
                x.nrows(),
                nx + 1
            )));
        }

        let n_traj = x.nrows() / (nx + 1);
        info!(
            "Compute elementary effects of {} trajectories ({} inputs, {} outputs)",
            n_traj,
            nx,
            y.ncols()
        );
        let range = &xlimits.column(1) - &xlimits.column(0);
        let mut effects = Array3::zeros((n_traj, nx, y.ncols()));
        for t in 0..n_traj {
            let start = t * (nx + 1);
            let mut moved = vec![false; nx];
            for k in 0..nx {
                let bad = |reason: String| SensitivityError::BadTrajectory {
                    trajectory: t,
                    step: k,
                    reason,
                };
                let dx = (&x.row(start + k + 1) - &x.row(start + k)) / &range;
                let axis = dx
                    .mapv(f64::abs)
                    .argmax()
                    .map_err(|err| bad(format!("undefined move ({err})")))?;
                let n_moved = dx.iter().filter(|v| v.abs() > MOVE_TOLERANCE).count();
                if n_moved != 1 {
                    return Err(bad(format!(
                        "exactly one component should move, {n_moved} moved"
                    )));
                }
                if moved[axis] {
                    return Err(bad(format!("component x{axis} moved twice")));
                }
                moved[axis] = true;
                let dy = &y.row(start + k + 1) - &y.row(start + k);
                effects
                    .slice_mut(s![t, axis, ..])
                    .assign(&(dy / dx[axis]));
            }
        }
        debug!("Elementary effects computed");
        Ok(Morris {
            xlimits: xlimits.to_owned(),
            effects,
        })
    }

    /// Generates the experiment trajectories, evaluates the function on them
    /// and computes elementary effects.
    pub fn from_experiment<E, Func>(experiment: &E, function: &Func) -> Result<Self>
    where
        E: MorrisExperiment<f64>,
        Func: VectorFunction,
    {
        if experiment.dim() != function.input_dim() {
            return Err(SensitivityError::DimensionMismatch {
                what: "function input".to_string(),
                expected: experiment.dim(),
                actual: function.input_dim(),
            });
        }
        let x = experiment.generate()?;
        let y = function.eval_sample(&x)?;
        Self::new(&x, &y, experiment.sampling_space())
    }

    /// Computes elementary effects from input and output samples stored as npy files
    pub fn from_npy_files<P: AsRef<Path>>(
        x_path: P,
        y_path: P,
        xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<Self> {
        info!("Reading samples from {:?}", x_path.as_ref());
        let x: Array2<f64> = read_npy(x_path)?;
        let y: Array2<f64> = read_npy(y_path)?;
        Self::new(&x, &y, xlimits)
    }

    /// Sampling space as a (nx, 2) matrix
    pub fn sampling_space(&self) -> &Array2<f64> {
        &self.xlimits
    }

    /// Number of trajectories
    pub fn n_trajectories(&self) -> usize {
        self.effects.shape()[0]
    }

    /// Number of inputs
    pub fn input_dim(&self) -> usize {
        self.effects.shape()[1]
    }

    /// Number of outputs
    pub fn output_dim(&self) -> usize {
        self.effects.shape()[2]
    }

    /// Elementary effects of the given output as a (r, nx) matrix
    pub fn elementary_effects(&self, output: usize) -> Result<ArrayView2<f64>> {
        if output >= self.output_dim() {
            return Err(SensitivityError::InvalidValue(format!(
                "output index should be lower than {}, got {output}",
                self.output_dim()
            )));
        }
        Ok(self.effects.index_axis(Axis(2), output))
    }

    /// Mean of the elementary effects of the given output, per input
    pub fn mean_elementary_effects(&self, output: usize) -> Result<Array1<f64>> {
        mean(&self.elementary_effects(output)?)
    }

    /// Mean of the absolute elementary effects of the given output, per input
    pub fn mean_absolute_elementary_effects(&self, output: usize) -> Result<Array1<f64>> {
        mean(&self.elementary_effects(output)?.mapv(f64::abs))
    }

    /// Standard deviation of the elementary effects of the given output, per input.
    /// Unbiased estimate, zero when there is a single trajectory.
    pub fn standard_deviation_elementary_effects(&self, output: usize) -> Result<Array1<f64>> {
        let effects = self.elementary_effects(output)?;
        if effects.nrows() < 2 {
            Ok(Array1::zeros(effects.ncols()))
        } else {
            Ok(effects.std_axis(Axis(0), 1.))
        }
    }

    /// Data of the `(mean, standard deviation)` plot of the elementary effects
    /// of the given output, means are taken on absolute values when `absolute` is true.
    pub fn elementary_effects_graph(
        &self,
        output: usize,
        absolute: bool,
    ) -> Result<ElementaryEffectsGraph> {
        let (means, x_label) = if absolute {
            (self.mean_absolute_elementary_effects(output)?, "mu*")
        } else {
            (self.mean_elementary_effects(output)?, "mu")
        };
        let stds = self.standard_deviation_elementary_effects(output)?;
        let points = means
            .iter()
            .zip(stds.iter())
            .enumerate()
            .map(|(i, (&mean, &std))| EffectPoint {
                label: format!("X{i}"),
                mean,
                std,
            })
            .collect();
        Ok(ElementaryEffectsGraph {
            title: format!("Elementary effects of output {output}"),
            x_label: x_label.to_string(),
            y_label: "sigma".to_string(),
            points,
        })
    }

    /// Saves the (r, nx) elementary effects of the given output in a npy file
    pub fn save_elementary_effects<P: AsRef<Path>>(&self, output: usize, path: P) -> Result<()> {
        write_npy(path, &self.elementary_effects(output)?)?;
        Ok(())
    }

    /// Saves the analysis in given file.
    #[cfg(feature = "persistent")]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = fs::File::create(path)?;
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Loads an analysis from given json file.
    #[cfg(feature = "persistent")]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Morris> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn mean(effects: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Array1<f64>> {
    effects
        .mean_axis(Axis(0))
        .ok_or_else(|| SensitivityError::InvalidValue("no elementary effects".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Function, MorrisFunction};
    use approx::assert_abs_diff_eq;
    use morrisbox_doe::{MorrisGrid, MorrisLhs};
    use ndarray::{array, ArrayView1};
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_linear_function() {
        let xlimits = array![[0., 2.], [-1., 1.], [0., 1.]];
        let f = Function::new(3, 2, |x: &ArrayView1<f64>| {
            array![3. * x[0] - x[1], x[0] * x[0]]
        });
        let experiment = MorrisGrid::new(&[5, 5, 5], 6)
            .unwrap()
            .bounds(&xlimits)
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(42));
        let morris = Morris::from_experiment(&experiment, &f).unwrap();
        assert_eq!(morris.n_trajectories(), 6);
        assert_eq!((morris.input_dim(), morris.output_dim()), (3, 2));

        assert_abs_diff_eq!(
            morris.mean_elementary_effects(0).unwrap(),
            array![6., -2., 0.],
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            morris.mean_absolute_elementary_effects(0).unwrap(),
            array![6., 2., 0.],
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            morris.standard_deviation_elementary_effects(0).unwrap(),
            array![0., 0., 0.],
            epsilon = 1e-9
        );
        // quadratic output is not constant along x0
        let mu1 = morris.mean_absolute_elementary_effects(1).unwrap();
        assert!(mu1[0] > 0.);
        assert_abs_diff_eq!(mu1[1], 0., epsilon = 1e-12);
    }

    #[test]
    fn test_morris_function_screening() {
        let f = MorrisFunction::default();
        let experiment = MorrisGrid::new(&[5; 20], 10)
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(0));
        let morris = Morris::from_experiment(&experiment, &f).unwrap();
        let mu_star = morris.mean_absolute_elementary_effects(0).unwrap();
        let sigma = morris.standard_deviation_elementary_effects(0).unwrap();
        // inputs without any coefficient have no effect
        assert_abs_diff_eq!(mu_star.slice(s![10..]), Array1::zeros(10), epsilon = 1e-12);
        // purely linear inputs: w = 2 (x - 0.5) and b_i = 20
        for i in [5, 7, 8, 9] {
            assert_abs_diff_eq!(mu_star[i], 40., epsilon = 1e-9);
            assert_abs_diff_eq!(sigma[i], 0., epsilon = 1e-9);
        }
        // inputs involved in interactions
        for i in 0..5 {
            assert!(sigma[i] > 0.);
        }
    }

    #[test]
    fn test_lhs_screening() {
        let f = MorrisFunction::default();
        let xlimits = morrisbox_doe::unit_hypercube(20);
        let experiment =
            MorrisLhs::sampled_with_rng(&xlimits, 50, 10, Xoshiro256Plus::seed_from_u64(42))
                .unwrap();
        let morris = Morris::from_experiment(&experiment, &f).unwrap();
        let mu_star = morris.mean_absolute_elementary_effects(0).unwrap();
        assert_abs_diff_eq!(mu_star.slice(s![10..]), Array1::zeros(10), epsilon = 1e-12);
        assert_abs_diff_eq!(mu_star[8], 40., epsilon = 1e-6);
    }

    #[test]
    fn test_single_trajectory() {
        let x = array![[0., 0.], [0.5, 0.], [0.5, 0.5]];
        let y = array![[1.], [2.], [0.]];
        let morris = Morris::new(&x, &y, &array![[0., 1.], [0., 1.]]).unwrap();
        assert_abs_diff_eq!(
            morris.elementary_effects(0).unwrap(),
            array![[2., -4.]],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            morris.standard_deviation_elementary_effects(0).unwrap(),
            array![0., 0.],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_standard_deviation() {
        // two trajectories of a 1d function with effects 1 and 3
        let x = array![[0.], [0.5], [1.], [0.5]];
        let y = array![[0.], [0.5], [3.], [1.5]];
        let morris = Morris::new(&x, &y, &array![[0., 1.]]).unwrap();
        assert_abs_diff_eq!(
            morris.mean_elementary_effects(0).unwrap(),
            array![2.],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            morris.standard_deviation_elementary_effects(0).unwrap(),
            array![2f64.sqrt()],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_bad_trajectories() {
        let xlimits = array![[0., 1.], [0., 1.]];
        let y = array![[0.], [1.], [2.]];
        // two components moved at once
        let x = array![[0., 0.], [0.5, 0.5], [0.5, 1.]];
        assert!(matches!(
            Morris::new(&x, &y, &xlimits),
            Err(SensitivityError::BadTrajectory { step: 0, .. })
        ));
        // same component moved twice
        let x = array![[0., 0.], [0.5, 0.], [1., 0.]];
        assert!(matches!(
            Morris::new(&x, &y, &xlimits),
            Err(SensitivityError::BadTrajectory { step: 1, .. })
        ));
        // no move
        let x = array![[0., 0.], [0., 0.], [0., 0.5]];
        assert!(Morris::new(&x, &y, &xlimits).is_err());
    }

    #[test]
    fn test_bad_sizes() {
        let xlimits = array![[0., 1.], [0., 1.]];
        let x = array![[0., 0.], [0.5, 0.], [0.5, 0.5]];
        assert!(Morris::new(&x, &array![[0.], [1.]], &xlimits).is_err());
        assert!(Morris::new(&x.slice(s![..2, ..]), &array![[0.], [1.]], &xlimits).is_err());
        assert!(Morris::new(&x, &array![[0.], [1.], [2.]], &array![[0., 1.]]).is_err());
        let morris = Morris::new(&x, &array![[0.], [1.], [2.]], &xlimits).unwrap();
        assert!(morris.elementary_effects(1).is_err());
        assert!(morris.elementary_effects_graph(1, true).is_err());
    }

    #[test]
    fn test_function_dimension_mismatch() {
        let f = MorrisFunction::default();
        let experiment = MorrisGrid::<f64, _>::new(&[4; 3], 2).unwrap();
        assert!(matches!(
            Morris::from_experiment(&experiment, &f),
            Err(SensitivityError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_graph() {
        let x = array![[0., 0.], [0.5, 0.], [0.5, 0.5]];
        let y = array![[1.], [2.], [0.]];
        let morris = Morris::new(&x, &y, &array![[0., 1.], [0., 1.]]).unwrap();
        let graph = morris.elementary_effects_graph(0, true).unwrap();
        assert_eq!(graph.x_label, "mu*");
        assert_eq!(graph.points.len(), 2);
        assert_eq!(graph.ranking()[0].label, "X1");
        let graph = morris
            .elementary_effects_graph(0, false)
            .unwrap()
            .labels(&["a", "b"]);
        assert_eq!(graph.x_label, "mu");
        assert_eq!(graph.ranking()[0].label, "a");
        assert_abs_diff_eq!(graph.points[1].mean, -4., epsilon = 1e-12);
        assert!(graph.to_string().contains("sigma"));
    }

    #[test]
    fn test_npy_files() {
        let test_dir = "target/tests";
        std::fs::create_dir_all(test_dir).ok();
        let x = array![[0., 0.], [0.5, 0.], [0.5, 0.5]];
        let y = array![[1.], [2.], [0.]];
        let x_path = format!("{test_dir}/morris_x.npy");
        let y_path = format!("{test_dir}/morris_y.npy");
        write_npy(&x_path, &x).unwrap();
        write_npy(&y_path, &y).unwrap();
        let xlimits = array![[0., 1.], [0., 1.]];
        let morris = Morris::from_npy_files(&x_path, &y_path, &xlimits).unwrap();
        assert_eq!(morris, Morris::new(&x, &y, &xlimits).unwrap());

        let ee_path = format!("{test_dir}/morris_ee.npy");
        morris.save_elementary_effects(0, &ee_path).unwrap();
        let ee: Array2<f64> = read_npy(&ee_path).unwrap();
        assert_abs_diff_eq!(ee, array![[2., -4.]], epsilon = 1e-12);
    }

    #[cfg(feature = "persistent")]
    #[test]
    fn test_save_load_morris() {
        let test_dir = "target/tests";
        std::fs::create_dir_all(test_dir).ok();
        let f = MorrisFunction::default();
        let experiment = MorrisGrid::new(&[4; 20], 5)
            .unwrap()
            .with_rng(Xoshiro256Plus::seed_from_u64(1));
        let morris = Morris::from_experiment(&experiment, &f).unwrap();
        let filename = format!("{test_dir}/saved_morris.json");
        morris.save(&filename).expect("Morris saving");
        let loaded = Morris::load(&filename).expect("Morris loading");
        assert_abs_diff_eq!(
            loaded.mean_absolute_elementary_effects(0).unwrap(),
            morris.mean_absolute_elementary_effects(0).unwrap(),
            epsilon = 1e-12
        );
        assert!(graph_json_roundtrip(&morris));
    }

    #[cfg(feature = "persistent")]
    fn graph_json_roundtrip(morris: &Morris) -> bool {
        let graph = morris.elementary_effects_graph(0, true).unwrap();
        let json = graph.to_json().unwrap();
        let parsed: ElementaryEffectsGraph = serde_json::from_str(&json).unwrap();
        parsed.points.len() == 20 && parsed.x_label == "mu*"
    }
}
