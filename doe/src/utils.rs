use crate::errors::{DoeError, Result};
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_stats::DeviationExt;
use rayon::prelude::*;

/// Checks that xlimits is a (nx, 2) matrix of `[lower, upper]` rows with `lower <= upper`
pub fn check_xlimits<F: Float>(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<()> {
    if xlimits.ncols() != 2 {
        return Err(DoeError::BadSamplingSpace(format!(
            "xlimits must have 2 columns (lower, upper), got {}",
            xlimits.ncols()
        )));
    }
    if xlimits.nrows() == 0 {
        return Err(DoeError::BadSamplingSpace(
            "xlimits must have at least one row".to_string(),
        ));
    }
    for (i, row) in xlimits.axis_iter(Axis(0)).enumerate() {
        if row[0].is_nan() || row[1].is_nan() || row[0] > row[1] {
            return Err(DoeError::BadSamplingSpace(format!(
                "lower bound greater than upper bound for x{i}: [{}, {}]",
                row[0], row[1]
            )));
        }
    }
    Ok(())
}

/// Checks xlimits as [check_xlimits] does and also rejects empty intervals (`lower == upper`)
pub fn check_strict_xlimits<F: Float>(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<()> {
    check_xlimits(xlimits)?;
    match xlimits.axis_iter(Axis(0)).position(|row| row[0] == row[1]) {
        Some(i) => Err(DoeError::BadSamplingSpace(format!(
            "interval of x{i} is reduced to a single value"
        ))),
        None => Ok(()),
    }
}

/// The `[0, 1]^nx` hypercube as a (nx, 2) matrix
pub fn unit_hypercube<F: Float>(nx: usize) -> Array2<F> {
    let mut xlimits = Array2::zeros((nx, 2));
    xlimits.column_mut(1).fill(F::one());
    xlimits
}

/// Pairwise euclidean distances between the rows of `x`, condensed as (i < j) pairs
pub fn pdist<F: Float>(x: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>) -> Array1<F> {
    let nrows = x.nrows();
    let pairs: Vec<_> = (0..nrows)
        .flat_map(|i| ((i + 1)..nrows).map(move |j| (i, j)))
        .collect();
    let distances: Vec<F> = pairs
        .par_iter()
        .map(|&(i, j)| {
            // an error only comes from rows without any component
            x.row(i)
                .l2_dist(&x.row(j))
                .map(|d| F::cast(d))
                .unwrap_or_else(|_| F::zero())
        })
        .collect();
    Array1::from_vec(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_pdist() {
        let x = array![[0., 0.], [3., 4.], [0., 1.]];
        assert_abs_diff_eq!(pdist(&x), array![5., 1., 18f64.sqrt()], epsilon = 1e-12);
    }

    #[test]
    fn test_check_xlimits() {
        assert!(check_xlimits(&array![[0., 1.], [-5., 5.]]).is_ok());
        assert!(check_xlimits(&array![[0., 1., 2.]]).is_err());
        assert!(check_xlimits(&array![[1., 0.]]).is_err());
        assert!(check_xlimits(&Array2::<f64>::zeros((0, 2))).is_err());
        assert!(check_xlimits(&array![[1., 1.]]).is_ok());
        assert!(check_strict_xlimits(&array![[0., 1.], [1., 1.]]).is_err());
    }
}
