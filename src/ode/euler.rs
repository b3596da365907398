//! Explicit (forward) Euler method, `u[n+1] = u[n] + dt * f(t[n], u[n])`.
//!
//! Local truncation error is O(dt^2), the global error O(dt).
use crate::error::Error;
use crate::ode::{Stats, Stepper, System, TimeGrid, Trajectory, march};
use itertools::izip;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ForwardEuler {
    /// Fixed time step.
    dt: f64,
    /// Integration runs from t = 0 to approximately `t_final` (rounded to whole steps).
    t_final: f64,
    stats: Stats,
}

impl Default for ForwardEuler {
    fn default() -> Self {
        Self {
            dt: 0.01,
            t_final: 1.0,
            stats: Stats::default(),
        }
    }
}

impl Stepper for ForwardEuler {
    fn integrate<S: System>(
        &mut self,
        system: &mut S,
        u_initial: &[f64],
    ) -> Result<Trajectory, Error> {
        let grid = TimeGrid::new(self.dt, self.t_final)?;
        let dt = grid.dt();
        let mut du = vec![0.0; u_initial.len()];
        let mut stats = Stats::default();

        let trajectory = march(&grid, u_initial, |t, u, u_next| {
            system.derive(t, u, &mut du)?;
            stats.function_calls += 1;
            for (next, u, du) in izip!(u_next.iter_mut(), u, &du) {
                *next = *u + dt * *du;
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

impl ForwardEuler {
    pub fn new(dt: f64, t_final: f64) -> Self {
        Self {
            dt,
            t_final,
            ..Self::default()
        }
    }
}
