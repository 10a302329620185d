#![deny(missing_docs)]
#![doc = "Finite-difference stencils: weights c_k with sum_k c_k f(x + a_k h) approximating l! h^l f^(l)(x)."]

/// Stencils ready to be applied to functions or samples.
pub mod apply;
/// Solver options.
pub mod opts;
/// Taylor moment system and its solution.
pub mod solver;

pub use apply::Stencil;
pub use opts::StencilOpts;
pub use solver::{
    first_derivative, solve_stencil, solve_stencil_with, taylor_system, StencilReport,
};
