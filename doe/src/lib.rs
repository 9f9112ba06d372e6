/*!
This library implements the designs of experiments used by the Morris method of
elementary effects screening.

A Morris experiment is made of `r` trajectories within a design space `xlimits`,
a 2D ndarray `(nx, 2)` specifying lower bound and upper bound of each `nx` components
of the samples `x`. A trajectory is made of `nx + 1` points, going from one point to
the next one moves a single component, each component being moved once.

Start points of the trajectories are either taken:
* on a regular p-level grid, see [MorrisGrid],
* from a [Latin Hypercube](https://en.wikipedia.org/wiki/Latin_hypercube_sampling) design,
  see [MorrisLhs], which can be built with the [Lhs] sampling method.

Example:
```
use morrisbox_doe::{Lhs, LhsKind, MorrisExperiment, MorrisGrid, MorrisLhs, SamplingMethod};
use ndarray::arr2;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Design space is defined as [5., 10.] x [0., 1.], samples are 2-dimensional.
let xlimits = arr2(&[[5., 10.], [0., 1.]]);

// 10 trajectories on a 4-level grid
let grid = MorrisGrid::new(&[4, 4], 10)
    .and_then(|doe| doe.bounds(&xlimits))
    .expect("valid grid experiment");
let x = grid.generate().expect("grid trajectories");
assert_eq!(x.dim(), (10 * 3, 2));

// 5 trajectories starting from points of a 20-point centered LHS
let design = Lhs::new(&xlimits)
    .expect("valid space")
    .kind(LhsKind::Centered)
    .with_rng(Xoshiro256Plus::seed_from_u64(42))
    .sample(20);
let lhs = MorrisLhs::new(&design, 5)
    .and_then(|doe| doe.bounds(&xlimits))
    .expect("valid lhs experiment");
let x = lhs.generate().expect("lhs trajectories");
assert_eq!(x.dim(), (5 * 3, 2));
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod errors;
mod lhs;
mod morris_grid;
mod morris_lhs;
mod traits;
mod trajectory;
mod utils;

pub use errors::*;
pub use lhs::*;
pub use morris_grid::*;
pub use morris_lhs::*;
pub use traits::*;
pub use utils::{check_strict_xlimits, check_xlimits, unit_hypercube};
