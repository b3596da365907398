//! Monte Carlo integration over a planar region given implicitly by a level-set function.
use crate::error::{Error, check_subdivisions};
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64;

/// Owns the random number generator used for sampling, so repeated integrations draw from one
/// explicitly seeded stream.
#[derive(Debug, Clone)]
pub struct MonteCarlo {
    rng: Pcg64,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self::new()
    }
}

impl MonteCarlo {
    /// Creates an integrator seeded from operating system entropy.
    pub fn new() -> Self {
        MonteCarlo {
            rng: Pcg64::from_entropy(),
        }
    }

    /// Creates an integrator whose results are reproducible for a given `seed`.
    pub fn with_seed(seed: u64) -> Self {
        MonteCarlo {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Sets the seed for the random number generator.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Pcg64::seed_from_u64(seed);
    }

    /// See [`monte_carlo_double`].
    #[allow(clippy::too_many_arguments)]
    pub fn integrate_double<F, G>(
        &mut self,
        f: F,
        g: G,
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        n: usize,
    ) -> Result<f64, Error>
    where
        F: Fn(f64, f64) -> f64,
        G: Fn(f64, f64) -> f64,
    {
        monte_carlo_double(&mut self.rng, f, g, x0, x1, y0, y1, n)
    }
}

/// Estimates the integral of `f` over the region `g(x, y) >= 0` inside `[x0, x1] x [y0, y1]`.
///
/// Draws `n` uniform samples along each axis (all `x` first, then all `y`) and classifies
/// every one of the `n * n` pairs with `g`. The estimate is the mean of `f` over the pairs
/// inside the region times the region's estimated area,
/// `inside / n^2 * (x1 - x0) * (y1 - y0)`.
///
/// Fails with [`Error::EmptyRegion`] if no pair lies inside the region.
#[allow(clippy::too_many_arguments)]
pub fn monte_carlo_double<R, F, G>(
    rng: &mut R,
    f: F,
    g: G,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    n: usize,
) -> Result<f64, Error>
where
    R: Rng,
    F: Fn(f64, f64) -> f64,
    G: Fn(f64, f64) -> f64,
{
    check_subdivisions("n", n)?;
    let x = uniform(rng, x0, x1, n);
    let y = uniform(rng, y0, y1, n);

    let mut f_mean = 0.0;
    let mut num_inside: usize = 0;
    for &xi in &x {
        for &yj in &y {
            if g(xi, yj) >= 0.0 {
                num_inside += 1;
                f_mean += f(xi, yj);
            }
        }
    }

    let samples = n * n;
    if num_inside == 0 {
        return Err(Error::EmptyRegion { samples });
    }
    f_mean /= num_inside as f64;
    let area = num_inside as f64 / samples as f64 * (x1 - x0) * (y1 - y0);
    Ok(area * f_mean)
}

// Samples from [low, high) as low + (high - low) * U.
fn uniform<R>(rng: &mut R, low: f64, high: f64, n: usize) -> Vec<f64>
where
    R: RngCore,
{
    (0..n).map(|_| low + (high - low) * unit(rng)).collect()
}

// U uniform on [0, 1) with 53 random bits, `(a * 2^26 + b) / 2^53` from the top 27 bits of one
// 32-bit draw and the top 26 of the next. This is the `genrand_res53` construction of MT19937,
// so a Mersenne Twister seeded with `s` reproduces the stream of NumPy's `random.seed(s)`.
fn unit<R>(rng: &mut R) -> f64
where
    R: RngCore,
{
    let a = rng.next_u32() >> 5;
    let b = rng.next_u32() >> 6;
    (f64::from(a) * 67_108_864.0 + f64::from(b)) / 9_007_199_254_740_992.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_mt::Mt;
    use std::f64::consts::PI;

    // Embedded rectangle [0, 2] x [3, 4.5] inside the bounding box [0, 3] x [2, 5].
    fn rectangle(x: f64, y: f64) -> f64 {
        if (0.0..=2.0).contains(&x) && (3.0..=4.5).contains(&y) {
            1.0
        } else {
            -1.0
        }
    }

    fn disc(x: f64, y: f64) -> f64 {
        4.0 - (x * x + y * y)
    }

    fn r(x: f64, y: f64) -> f64 {
        (x * x + y * y).sqrt()
    }

    #[test]
    fn rectangle_area() {
        let mut mc = MonteCarlo::with_seed(8);
        let area = mc
            .integrate_double(|_, _| 1.0, rectangle, 0.0, 3.0, 2.0, 5.0, 1000)
            .unwrap();
        assert!(abs!(area - 3.0) < 0.5, "area = {area}");
        assert_eq!(area.to_bits(), 2.911_923_f64.to_bits());
    }

    #[test]
    fn integral_of_r_over_disc() {
        // int r dA over the disc of radius 2 is 2 pi R^3 / 3
        let exact = 2.0 * PI * 8.0 / 3.0;
        let mut mc = MonteCarlo::with_seed(6);
        let computed = mc
            .integrate_double(r, disc, -2.0, 2.0, -2.0, 2.0, 1000)
            .unwrap();
        assert!(abs!(computed - exact) < 0.75, "computed = {computed}");
        assert_eq!(computed.to_bits(), 16.824_105_454_511_262_f64.to_bits());
    }

    #[test]
    fn mersenne_twister_matches_numpy_seeding() {
        // MT19937 seeded like `numpy.random.seed(s)` reproduces the values NumPy gives.
        let area = monte_carlo_double(
            &mut Mt::new(8),
            |_, _| 1.0,
            rectangle,
            0.0,
            3.0,
            2.0,
            5.0,
            1000,
        )
        .unwrap();
        assert!(abs!(area - 3.121_092) < 1e-14, "area = {area}");

        let computed =
            monte_carlo_double(&mut Mt::new(6), r, disc, -2.0, 2.0, -2.0, 2.0, 1000).unwrap();
        assert_eq!(computed.to_bits(), 16.797_083_711_737_64_f64.to_bits());
    }

    #[test]
    fn same_seed_reproduces_result() {
        let run = |seed| {
            MonteCarlo::with_seed(seed)
                .integrate_double(|x, y| x.hypot(y), disc, -2.0, 2.0, -2.0, 2.0, 200)
                .unwrap()
        };
        assert_eq!(run(6).to_bits(), run(6).to_bits());
        assert_ne!(run(6).to_bits(), run(7).to_bits());

        let mut mc = MonteCarlo::with_seed(1);
        let first = mc.integrate_double(|_, _| 1.0, disc, -2.0, 2.0, -2.0, 2.0, 100).unwrap();
        mc.set_seed(1);
        let again = mc.integrate_double(|_, _| 1.0, disc, -2.0, 2.0, -2.0, 2.0, 100).unwrap();
        assert_eq!(first.to_bits(), again.to_bits());
    }

    #[test]
    fn accepts_any_rng() {
        let mut rng = Pcg64::seed_from_u64(42);
        let mut mc = MonteCarlo::with_seed(42);
        let direct = monte_carlo_double(&mut rng, |_, _| 1.0, disc, -2.0, 2.0, -2.0, 2.0, 50).unwrap();
        let owned = mc.integrate_double(|_, _| 1.0, disc, -2.0, 2.0, -2.0, 2.0, 50).unwrap();
        assert_eq!(direct.to_bits(), owned.to_bits());
    }

    #[test]
    fn whole_box_inside_gives_exact_area() {
        let mut mc = MonteCarlo::with_seed(3);
        let area = mc
            .integrate_double(|_, _| 1.0, |_, _| 0.0, -1.0, 2.0, 0.0, 4.0, 30)
            .unwrap();
        assert!(abs!(area - 12.0) < 1e-12);
    }

    #[test]
    fn reversed_bounds_flip_the_sign() {
        let forward = MonteCarlo::with_seed(5)
            .integrate_double(r, disc, -2.0, 2.0, -2.0, 2.0, 300)
            .unwrap();
        // Same draws mirrored in x; the disc and `r` are symmetric, so only the orientation changes.
        let backward = MonteCarlo::with_seed(5)
            .integrate_double(r, disc, 2.0, -2.0, -2.0, 2.0, 300)
            .unwrap();
        assert!(forward > 0.0);
        assert_eq!(backward.to_bits(), (-forward).to_bits());

        let area = MonteCarlo::with_seed(3)
            .integrate_double(|_, _| 1.0, |_, _| 0.0, 2.0, -1.0, 0.0, 4.0, 30)
            .unwrap();
        assert!(abs!(area + 12.0) < 1e-12);
    }

    #[test]
    fn empty_region_is_a_division_by_zero() {
        let mut mc = MonteCarlo::with_seed(0);
        let result = mc.integrate_double(|_, _| 1.0, |_, _| -1.0, 0.0, 1.0, 0.0, 1.0, 10);
        assert!(matches!(result, Err(Error::EmptyRegion { samples: 100 })));
    }

    #[test]
    fn zero_samples_is_rejected() {
        let mut mc = MonteCarlo::with_seed(0);
        let result = mc.integrate_double(|_, _| 1.0, disc, 0.0, 1.0, 0.0, 1.0, 0);
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}
