//! Variants of the composite rules which build every node up front and reduce them with a
//! single sum instead of accumulating inside the loop.
use crate::error::{Error, check_subdivisions};
use crate::grid::linspace;

/// Composite trapezoidal rule over a precomputed node sequence.
pub fn trapezoidal_vec<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, Error>
where
    F: Fn(f64) -> f64,
{
    check_subdivisions("n", n)?;
    let h = (b - a) / n as f64;
    let sum: f64 = linspace(a, b, n + 1).into_iter().map(&f).sum();
    Ok(h * (sum - 0.5 * f(a) - 0.5 * f(b)))
}

/// Composite midpoint rule over a precomputed node sequence.
pub fn midpoint_vec<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, Error>
where
    F: Fn(f64) -> f64,
{
    check_subdivisions("n", n)?;
    let h = (b - a) / n as f64;
    let sum: f64 = linspace(a + h / 2.0, b - h / 2.0, n)
        .into_iter()
        .map(&f)
        .sum();
    Ok(h * sum)
}
