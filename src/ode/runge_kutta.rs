//! Fixed-step explicit Runge-Kutta methods on the same time grid as forward Euler.
use crate::error::Error;
use crate::ode::{Stats, Stepper, System, TimeGrid, Trajectory, march};
use itertools::izip;
use serde::{Deserialize, Serialize};

/// Heun's method (explicit trapezoid), second order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Heun {
    dt: f64,
    t_final: f64,
    stats: Stats,
}

impl Default for Heun {
    fn default() -> Self {
        Self {
            dt: 0.01,
            t_final: 1.0,
            stats: Stats::default(),
        }
    }
}

impl Heun {
    pub fn new(dt: f64, t_final: f64) -> Self {
        Self {
            dt,
            t_final,
            ..Self::default()
        }
    }
}

impl Stepper for Heun {
    fn integrate<S: System>(
        &mut self,
        system: &mut S,
        u_initial: &[f64],
    ) -> Result<Trajectory, Error> {
        let grid = TimeGrid::new(self.dt, self.t_final)?;
        let dt = grid.dt();
        let system_size = u_initial.len();
        let mut buf = vec![0.0; system_size];
        let mut k1 = vec![0.0; system_size];
        let mut k2 = vec![0.0; system_size];
        let mut stats = Stats::default();

        let trajectory = march(&grid, u_initial, |t, u, u_next| {
            // Predictor
            system.derive(t, u, &mut k1)?;
            for (b, u, k1) in izip!(buf.iter_mut(), u, &k1) {
                *b = *u + dt * *k1;
            }
            // Corrector
            system.derive(t + dt, &buf, &mut k2)?;
            stats.function_calls += 2;

            for (next, u, k1, k2) in izip!(u_next.iter_mut(), u, &k1, &k2) {
                *next = *u + 0.5 * dt * (*k1 + *k2);
            }
            stats.steps += 1;
            Ok(())
        });
        self.stats = stats;
        trajectory
    }

    fn stats(&self) -> Stats {
        self.stats
    }
}

/// The classical fourth order Runge-Kutta method.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct RungeKutta4 {
    dt: f64,
    t_final: f64,
    stats: Stats,
}

impl Default for RungeKutta4 {
    fn default() -> Self {
        Self {
            dt: 0.01,
            t_final: 1.0,
            stats: Stats::default(),
        }
    }
}

impl RungeKutta4 {
    pub fn new(dt: f64, t_final: f64) -> Self {
        Self {
            dt,
            t_final,
            ..Self::default()
        }
    }
}

impl Stepper for RungeKutta4 {
    fn integrate<S: System>(
        &mut self,
        system: &mut S,
        u_initial: &[f64],
    ) -> Result<Trajectory, Error> {
        let grid = TimeGrid::new(self.dt, self.t_final)?;
        let dt = grid.dt();
        let system_size = u_initial.len();
        // Intermediate values.
        let mut buf = vec![0.0; system_size];
        let mut k1 = vec![0.0; system_size];
        let mut k2 = vec![0.0; system_size];
        let mut k3 = vec![0.0; system_size];
        let mut k4 = vec![0.0; system_size];
        let mut stats = Stats::default();

        let trajectory = march(&grid, u_initial, |t, u, u_next| {
            system.derive(t, u, &mut k1)?;

            for (b, u, k1) in izip!(buf.iter_mut(), u, &k1) {
                *b = *u + 0.5 * dt * *k1;
            }
            system.derive(t + 0.5 * dt, &buf, &mut k2)?;

            for (b, u, k2) in izip!(buf.iter_mut(), u, &k2) {
                *b = *u + 0.5 * dt * *k2;
            }
            system.derive(t + 0.5 * dt, &buf, &mut k3)?;

            for (b, u, k3) in izip!(buf.iter_mut(), u, &k3) {
                *b = *u + dt * *k3;
            }
            system.derive(t + dt, &buf, &mut k4)?;

            stats.function_calls += 4;

            for (next, u, k1, k2, k3, k4) in izip!(u_next.iter_mut(), u, &k1, &k2, &k3, &k4) {
                *next = *u + dt / 6.0 * (*k1 + 2.0 * *k2 + 2.0 * *k3 + *k4);
            }
            stats.steps += 1;
            Ok(())
        });
        self.stats = stats;
        trajectory
    }

    fn stats(&self) -> Stats {
        self.stats
    }
}
