//! Euler-Cromer (semi-implicit Euler) for the mechanical system
//! `m * u'' + f(u') + s(u) = F(t)`.
//!
//! The velocity is advanced with the previous position, then the position with the new
//! velocity:
//!
//! `v[n+1] = v[n] + dt / m * (F(t[n]) - f(v[n]) - s(u[n]))`
//! `u[n+1] = u[n] + dt * v[n+1]`
use crate::error::Error;
use crate::ode::{Stats, TimeGrid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct EulerCromer {
    dt: f64,
    t_final: f64,
    mass: f64,
    stats: Stats,
}

impl Default for EulerCromer {
    fn default() -> Self {
        Self {
            dt: 0.01,
            t_final: 1.0,
            mass: 1.0,
            stats: Stats::default(),
        }
    }
}

/// Position and velocity histories on the time grid `t`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Oscillation {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub t: Vec<f64>,
}

impl EulerCromer {
    pub fn new(dt: f64, t_final: f64, mass: f64) -> Self {
        Self {
            dt,
            t_final,
            mass,
            ..Self::default()
        }
    }

    /// Integrates from `u(0) = u0`, `v(0) = v0` with `friction = f(v)`, `spring = s(u)` and
    /// the external `force = F(t)`.
    pub fn integrate<F, S, G>(
        &mut self,
        friction: F,
        spring: S,
        force: G,
        u0: f64,
        v0: f64,
    ) -> Result<Oscillation, Error>
    where
        F: Fn(f64) -> f64,
        S: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        if !self.mass.is_finite() || self.mass == 0.0 {
            return Err(Error::InvalidParameter {
                param: format!("mass: {}", self.mass),
            });
        }
        let grid = TimeGrid::new(self.dt, self.t_final)?;
        let dt = grid.dt();
        let t = grid.times();
        let mut u = vec![0.0; t.len()];
        let mut v = vec![0.0; t.len()];
        u[0] = u0;
        v[0] = v0;

        for n in 0..grid.n_steps() {
            v[n + 1] = v[n] + dt * (1.0 / self.mass) * (force(t[n]) - friction(v[n]) - spring(u[n]));
            u[n + 1] = u[n] + dt * v[n + 1];
        }
        self.stats = Stats {
            function_calls: 3 * grid.n_steps(),
            steps: grid.n_steps(),
        };

        Ok(Oscillation { u, v, t })
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }
}

/// Euler-Cromer with the mechanical system given directly, returning `(u, v, t)`.
#[allow(clippy::too_many_arguments)]
pub fn ode_euler_cromer<F, S, G>(
    f: F,
    s: S,
    force: G,
    m: f64,
    t_final: f64,
    u0: f64,
    v0: f64,
    dt: f64,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), Error>
where
    F: Fn(f64) -> f64,
    S: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    let oscillation = EulerCromer::new(dt, t_final, m).integrate(f, s, force, u0, v0)?;
    Ok((oscillation.u, oscillation.v, oscillation.t))
}
