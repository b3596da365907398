//! Composite quadrature rules for definite integrals over intervals, rectangles and boxes.
//!
//! Bounds are not required to be ordered: `b < a` gives a negative step size and a result
//! with the opposite sign, i.e. integration with reversed orientation.
mod monte_carlo;
mod multiple;
mod vectorized;

pub use monte_carlo::{MonteCarlo, monte_carlo_double};
pub use multiple::{midpoint_double, midpoint_double2, midpoint_triple};
pub use vectorized::{midpoint_vec, trapezoidal_vec};

use crate::error::{Error, check_subdivisions};
use serde::{Deserialize, Serialize};

/// Selects one of the one dimensional composite rules, e.g. from a configuration file.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureRule {
    #[default]
    Trapezoidal,
    Midpoint,
    TrapezoidalVec,
    MidpointVec,
}

impl QuadratureRule {
    /// Approximates the integral of `f` over `[a, b]` using `n` subintervals.
    pub fn integrate<F>(self, f: F, a: f64, b: f64, n: usize) -> Result<f64, Error>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            QuadratureRule::Trapezoidal => trapezoidal(f, a, b, n),
            QuadratureRule::Midpoint => midpoint(f, a, b, n),
            QuadratureRule::TrapezoidalVec => trapezoidal_vec(f, a, b, n),
            QuadratureRule::MidpointVec => midpoint_vec(f, a, b, n),
        }
    }
}

/// Composite trapezoidal rule.
///
/// `h * [f(x_0) / 2 + f(x_1) + ... + f(x_{n-1}) + f(x_n) / 2]` with `x_i = a + i * h`
/// and `h = (b - a) / n`. Exact for linear integrands.
pub fn trapezoidal<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, Error>
where
    F: Fn(f64) -> f64,
{
    check_subdivisions("n", n)?;
    Ok(trapezoidal_sum(&f, a, b, n))
}

/// Composite midpoint rule.
///
/// `h * [f(x_0) + ... + f(x_{n-1})]` with `x_i = a + h / 2 + i * h` and `h = (b - a) / n`.
/// Exact for linear integrands.
pub fn midpoint<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, Error>
where
    F: Fn(f64) -> f64,
{
    check_subdivisions("n", n)?;
    Ok(midpoint_sum(&f, a, b, n))
}

// Caller guarantees n >= 1.
fn trapezoidal_sum<F>(f: &F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = (b - a) / n as f64;
    let mut result = 0.5 * f(a) + 0.5 * f(b);
    for i in 1..n {
        result += f(a + i as f64 * h);
    }
    result * h
}

// Caller guarantees n >= 1. Shared with the nested rectangle and box rules.
pub(crate) fn midpoint_sum<F>(f: &F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = (b - a) / n as f64;
    let mut result = 0.0;
    for i in 0..n {
        result += f((a + h / 2.0) + i as f64 * h);
    }
    result * h
}
