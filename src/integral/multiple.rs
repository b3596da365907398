//! Midpoint rules over rectangles and boxes.
//!
//! `midpoint_double` sums over the tensor grid of midpoint nodes directly, while
//! `midpoint_double2` and `midpoint_triple` nest the one dimensional rule: the inner integral
//! becomes a function of the outer coordinates which is then integrated in turn.
use super::midpoint_sum;
use crate::error::{Error, check_subdivisions};
use itertools::iproduct;

/// Integral of `f(x, y)` over `[a, b] x [c, d]` by direct double summation.
#[allow(clippy::too_many_arguments)]
pub fn midpoint_double<F>(
    f: F,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    nx: usize,
    ny: usize,
) -> Result<f64, Error>
where
    F: Fn(f64, f64) -> f64,
{
    check_subdivisions("nx", nx)?;
    check_subdivisions("ny", ny)?;
    let hx = (b - a) / nx as f64;
    let hy = (d - c) / ny as f64;
    let mut result = 0.0;
    for (i, j) in iproduct!(0..nx, 0..ny) {
        let xi = a + hx / 2.0 + i as f64 * hx;
        let yj = c + hy / 2.0 + j as f64 * hy;
        result += hx * hy * f(xi, yj);
    }
    Ok(result)
}

/// Integral of `f(x, y)` over `[a, b] x [c, d]` as the midpoint rule in `x` applied to
/// `g(x) = midpoint(f(x, .), c, d, ny)`.
#[allow(clippy::too_many_arguments)]
pub fn midpoint_double2<F>(
    f: F,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    nx: usize,
    ny: usize,
) -> Result<f64, Error>
where
    F: Fn(f64, f64) -> f64,
{
    check_subdivisions("nx", nx)?;
    check_subdivisions("ny", ny)?;
    let g = |x: f64| midpoint_sum(&|y: f64| f(x, y), c, d, ny);
    Ok(midpoint_sum(&g, a, b, nx))
}

/// Integral of `f(x, y, z)` over `[a, b] x [c, d] x [e, g]`.
///
/// The innermost reduction is over `z`, then `y`, then `x`.
#[allow(clippy::too_many_arguments)]
pub fn midpoint_triple<F>(
    f: F,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    g: f64,
    nx: usize,
    ny: usize,
    nz: usize,
) -> Result<f64, Error>
where
    F: Fn(f64, f64, f64) -> f64,
{
    check_subdivisions("nx", nx)?;
    check_subdivisions("ny", ny)?;
    check_subdivisions("nz", nz)?;
    let p = |x: f64, y: f64| midpoint_sum(&|z: f64| f(x, y, z), e, g, nz);
    let q = |x: f64| midpoint_sum(&|y: f64| p(x, y), c, d, ny);
    Ok(midpoint_sum(&q, a, b, nx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn linear_double_integral_is_exact() {
        let f = |x: f64, y: f64| 2.0 * x + y;
        // int_0^2 int_2^3 (2x + y) dy dx
        let expected = 9.0;
        for (nx, ny) in [(3, 5), (4, 4), (5, 3)] {
            let direct = midpoint_double(f, 0.0, 2.0, 2.0, 3.0, nx, ny).unwrap();
            let nested = midpoint_double2(f, 0.0, 2.0, 2.0, 3.0, nx, ny).unwrap();
            assert!(abs!(direct - expected) < 1e-13, "({nx}, {ny}): {direct}");
            assert!(abs!(nested - expected) < 1e-13, "({nx}, {ny}): {nested}");
        }
    }

    #[test]
    fn linear_triple_integral_is_exact() {
        let f = |x: f64, y: f64, z: f64| 2.0 * x + y - 4.0 * z;
        // volume 6 times the value at the centre (1, 2.5, 0.5)
        let expected = 15.0;
        for (nx, ny, nz) in [(3, 5, 2), (4, 4, 4), (5, 3, 6)] {
            let computed = midpoint_triple(f, 0.0, 2.0, 2.0, 3.0, -1.0, 2.0, nx, ny, nz).unwrap();
            assert!(abs!(computed - expected) < 1e-13, "({nx}, {ny}, {nz}): {computed}");
        }
    }

    #[test]
    fn direct_and_nested_double_agree_for_smooth_integrand() {
        let f = |x: f64, y: f64| x.sin() * y.cos();
        for (nx, ny) in [(10, 7), (7, 10), (16, 16)] {
            let direct = midpoint_double(f, 0.0, 1.0, 0.0, 1.0, nx, ny).unwrap();
            let nested = midpoint_double2(f, 0.0, 1.0, 0.0, 1.0, nx, ny).unwrap();
            assert!(abs!(direct - nested) < 1e-14, "({nx}, {ny})");
        }
    }

    #[test]
    fn triple_reduces_to_double_for_constant_z() {
        let direct = midpoint_double(|x, y| x * y, 0.0, 1.0, 0.0, 2.0, 6, 9).unwrap();
        let boxed = midpoint_triple(|x, y, _z| x * y, 0.0, 1.0, 0.0, 2.0, 0.0, 1.0, 6, 9, 3).unwrap();
        assert!(abs!(direct - boxed) < 1e-14);
    }

    #[test]
    fn zero_subdivisions_is_rejected() {
        let f = |x: f64, y: f64| x + y;
        assert!(midpoint_double(f, 0.0, 1.0, 0.0, 1.0, 0, 3).is_err());
        assert!(midpoint_double2(f, 0.0, 1.0, 0.0, 1.0, 3, 0).is_err());
        let g = |x: f64, y: f64, z: f64| x + y + z;
        assert!(matches!(
            midpoint_triple(g, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 2, 2, 0),
            Err(Error::InvalidParameter { param }) if param == "nz: 0"
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            .. ProptestConfig::default()
        })]
        #[test]
        fn prop_linear_integrands_agree_with_closed_form(
            (p, q, r) in (-5.0f64..5.0, -5.0f64..5.0, -5.0f64..5.0),
            (a, b) in (-3.0f64..3.0, -3.0f64..3.0),
            (c, d) in (-3.0f64..3.0, -3.0f64..3.0),
            (e, g) in (-3.0f64..3.0, -3.0f64..3.0),
            (nx, ny, nz) in (1usize..12, 1usize..12, 1usize..12),
        ) {
            let f2 = |x: f64, y: f64| p * x + q * y + r;
            let expected2 = (b - a) * (d - c) * (p * (a + b) / 2.0 + q * (c + d) / 2.0 + r);
            let tol2 = 1e-11 * (1.0 + expected2.abs());
            let direct = midpoint_double(f2, a, b, c, d, nx, ny).unwrap();
            let nested = midpoint_double2(f2, a, b, c, d, nx, ny).unwrap();
            prop_assert!(abs!(direct - expected2) <= tol2);
            prop_assert!(abs!(nested - expected2) <= tol2);
            prop_assert!(abs!(direct - nested) <= tol2);

            let f3 = |x: f64, y: f64, z: f64| p * x + q * y - r * z;
            let expected3 = (b - a) * (d - c) * (g - e)
                * (p * (a + b) / 2.0 + q * (c + d) / 2.0 - r * (e + g) / 2.0);
            let tol3 = 1e-11 * (1.0 + expected3.abs());
            let computed = midpoint_triple(f3, a, b, c, d, e, g, nx, ny, nz).unwrap();
            prop_assert!(abs!(computed - expected3) <= tol3);
        }
    }
}
