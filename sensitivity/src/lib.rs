//! This library implements the Morris method of elementary effects screening,
//! a one-at-a-time sensitivity analysis intended to detect, at a low cost,
//! the inputs of a model which have negligible effects on its outputs.
//!
//! The screening goes through the following steps:
//! * build a [Morris experiment](morrisbox_doe::MorrisExperiment) made of `r` trajectories
//!   of `nx + 1` points, starting either from a p-level grid or from an LHS design,
//! * evaluate the model, a [VectorFunction], on the generated sample,
//! * compute the elementary effects along trajectories with [Morris] and get for each
//!   input the mean of absolute effects (`mu*`) and the standard deviation of
//!   effects (`sigma`).
//!
//! The test function introduced by Morris in its paper is available as [MorrisFunction].
//!
//! # Example
//!
//! ```
//! use morrisbox_doe::{MorrisExperiment, MorrisGrid};
//! use morrisbox_sensitivity::{Morris, MorrisFunction, VectorFunction};
//!
//! // use the reference 20-d function from the Morris paper
//! let f = MorrisFunction::default();
//!
//! // 10 trajectories on a 5-level grid within [0, 1]^20
//! let experiment = MorrisGrid::new(&[5; 20], 10).expect("valid grid");
//! let x = experiment.generate().expect("trajectories");
//! let y = f.eval_sample(&x).expect("evaluation");
//!
//! // Evaluate elementary effects
//! let morris = Morris::new(&x, &y, experiment.sampling_space()).expect("analysis");
//! let mean = morris.mean_absolute_elementary_effects(0).expect("mu*");
//! let sigma = morris.standard_deviation_elementary_effects(0).expect("sigma");
//! println!("{}", morris.elementary_effects_graph(0, true).expect("graph"));
//! ```
//!
//! # Reference
//!
//! Morris, M. D. (1991). Factorial sampling plans for preliminary computational
//! experiments. Technometrics, 33(2), 161-174.
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod errors;
mod function;
mod graph;
mod morris;
mod morris_function;

pub use errors::*;
pub use function::*;
pub use graph::*;
pub use morris::*;
pub use morris_function::*;

/// Environment variable used to set the log level of examples and bindings
pub const MORRISBOX_LOG: &str = "MORRISBOX_LOG";
