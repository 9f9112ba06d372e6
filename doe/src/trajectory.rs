use crate::errors::{DoeError, Result};
use linfa::Float;
use log::trace;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1};
use ndarray_rand::rand::{seq::SliceRandom, Rng};

/// Builds a (nx + 1, nx) trajectory starting from `start`.
///
/// Axes are visited in random order, each one being moved by `+/- steps[axis]`
/// in a random direction. When the move leaves `[lower[axis], upper[axis]]` the
/// opposite direction is used instead. Bounds are checked with an absolute
/// tolerance `tol` to absorb rounding errors.
pub(crate) fn walk<F: Float, R: Rng>(
    start: &ArrayBase<impl Data<Elem = F>, Ix1>,
    steps: &Array1<F>,
    lower: &Array1<F>,
    upper: &Array1<F>,
    tol: F,
    rng: &mut R,
) -> Result<Array2<F>> {
    let nx = start.len();
    let mut axes: Vec<usize> = (0..nx).collect();
    axes.shuffle(rng);

    let mut path = Array2::zeros((nx + 1, nx));
    path.row_mut(0).assign(start);
    let mut current = start.to_owned();
    for (i, &axis) in axes.iter().enumerate() {
        let direction = if rng.gen_bool(0.5) {
            F::one()
        } else {
            -F::one()
        };
        let admissible = |v: F| lower[axis] - tol <= v && v <= upper[axis] + tol;
        let forward = current[axis] + direction * steps[axis];
        let backward = current[axis] - direction * steps[axis];
        current[axis] = if admissible(forward) {
            forward
        } else if admissible(backward) {
            backward
        } else {
            return Err(DoeError::TrajectoryError(format!(
                "no admissible move along x{axis} from {} with step {}",
                current[axis], steps[axis]
            )));
        };
        trace!("step {} moves x{} to {}", i + 1, axis, current[axis]);
        path.row_mut(i + 1).assign(&current);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_walk_moves_each_axis_once() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let start: Array1<f64> = array![0.5, 0.0, 1.0];
        let steps = array![0.5, 0.25, 0.25];
        let lower = Array1::zeros(3);
        let upper = Array1::ones(3);
        let path = walk(&start, &steps, &lower, &upper, 1e-12, &mut rng).unwrap();
        assert_eq!(path.dim(), (4, 3));
        let mut moved = vec![0; 3];
        for k in 0..3 {
            let diff = &path.row(k + 1) - &path.row(k);
            let changed: Vec<usize> = (0..3).filter(|&j| diff[j].abs() > 0.).collect();
            assert_eq!(changed.len(), 1);
            let axis = changed[0];
            assert_abs_diff_eq!(diff[axis].abs(), steps[axis], epsilon = 1e-12);
            moved[axis] += 1;
        }
        assert_eq!(moved, vec![1, 1, 1]);
        assert!(path.iter().all(|v| (0. ..=1.).contains(v)));
    }

    #[test]
    fn test_walk_without_admissible_move() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let start: Array1<f64> = array![0.5];
        let res = walk(&start, &array![0.75], &array![0.], &array![1.], 0., &mut rng);
        assert!(matches!(res, Err(DoeError::TrajectoryError(_))));
    }
}
