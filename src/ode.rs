mod euler;
mod euler_cromer;
mod runge_kutta;
pub use euler::ForwardEuler;
pub use euler_cromer::{EulerCromer, Oscillation, ode_euler_cromer};
pub use runge_kutta::{Heun, RungeKutta4};

use crate::error::{BoxError, Error};
use crate::grid::linspace;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

#[derive(Serialize, Deserialize, Debug)]
pub enum StepperType {
    ForwardEuler(ForwardEuler),
    Heun(Heun),
    RungeKutta4(RungeKutta4),
}

pub trait Stepper: Serialize + for<'a> Deserialize<'a> {
    // Advance `u_initial` from t = 0 over the configured time grid, recording every step.
    fn integrate<S: System>(
        &mut self,
        system: &mut S,
        u_initial: &[f64],
    ) -> Result<Trajectory, Error>;
    // Statistics of the most recent integration.
    fn stats(&self) -> Stats;
}

// Allow calling the stepper methods common to each variant on the `StepperType` enum directly.
impl Stepper for StepperType {
    fn integrate<S: System>(
        &mut self,
        system: &mut S,
        u_initial: &[f64],
    ) -> Result<Trajectory, Error> {
        match self {
            StepperType::ForwardEuler(stepper) => stepper.integrate(system, u_initial),
            StepperType::Heun(stepper) => stepper.integrate(system, u_initial),
            StepperType::RungeKutta4(stepper) => stepper.integrate(system, u_initial),
        }
    }

    fn stats(&self) -> Stats {
        match self {
            StepperType::ForwardEuler(stepper) => stepper.stats(),
            StepperType::Heun(stepper) => stepper.stats(),
            StepperType::RungeKutta4(stepper) => stepper.stats(),
        }
    }
}

/// A first order system `u' = f(t, u)`. The stepper calls `derive` with the current time and
/// state, and the implementation writes `f(t, u)` into `du`.
pub trait System {
    fn derive(&mut self, t: f64, u: &[f64], du: &mut [f64]) -> Result<(), BoxError>;
}

/// Adapts an infallible closure `|t, u, du| ...` into a [`System`].
pub struct FnSystem<F>(pub F);

impl<F> System for FnSystem<F>
where
    F: FnMut(f64, &[f64], &mut [f64]),
{
    fn derive(&mut self, t: f64, u: &[f64], du: &mut [f64]) -> Result<(), BoxError> {
        (self.0)(t, u, du);
        Ok(())
    }
}

impl<F> Debug for FnSystem<F> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        f.debug_struct("FnSystem").finish_non_exhaustive()
    }
}

/// Uniform time grid `0 = t_0 < t_1 < ... < t_n = n * dt`, with `n = round(t_final / dt)`
/// (ties to even).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    dt: f64,
    n_steps: usize,
}

impl TimeGrid {
    pub fn new(dt: f64, t_final: f64) -> Result<Self, Error> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidParameter {
                param: format!("dt: {dt}"),
            });
        }
        if !t_final.is_finite() || t_final < 0.0 {
            return Err(Error::InvalidParameter {
                param: format!("t_final: {t_final}"),
            });
        }
        // The `n_steps + 1` grid points must fit in a `Vec<f64>`.
        let max_steps = (isize::MAX as usize / size_of::<f64>()) as f64;
        let n_steps = (t_final / dt).round_ties_even();
        if !(1.0..max_steps).contains(&n_steps) {
            return Err(Error::InvalidParameter {
                param: format!("number of steps: round({t_final} / {dt}) = {n_steps}"),
            });
        }
        Ok(Self {
            dt,
            n_steps: n_steps as usize,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// The last grid point, `n_steps * dt`.
    pub fn t_end(&self) -> f64 {
        self.n_steps as f64 * self.dt
    }

    /// All `n_steps + 1` grid points.
    pub fn times(&self) -> Vec<f64> {
        linspace(0.0, self.t_end(), self.n_steps + 1)
    }
}

/// The computed solution: `u[i]` is the state at time `t[i]`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub u: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// The history of state component `i`, or `None` if the state has fewer components.
    pub fn component(&self, i: usize) -> Option<Vec<f64>> {
        self.u.iter().map(|u| u.get(i).copied()).collect()
    }

    pub fn final_state(&self) -> Option<&[f64]> {
        self.u.last().map(Vec::as_slice)
    }

    /// `(t, u)` pairs in step order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64])> {
        self.t.iter().copied().zip(self.u.iter().map(Vec::as_slice))
    }
}

/// Contains some statistics of the integration.
#[derive(Debug, Default, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
pub struct Stats {
    pub function_calls: usize,
    pub steps: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "function evaluations: {}, ", self.function_calls)?;
        write!(f, "steps: {}", self.steps)?;

        Ok(())
    }
}

/// Forward Euler for a scalar equation `u' = f(u, t)`, `u(0) = u0`.
///
/// Returns the states and the times, both of length `round(t_final / dt) + 1`.
pub fn ode_fe<F>(f: F, u0: f64, dt: f64, t_final: f64) -> Result<(Vec<f64>, Vec<f64>), Error>
where
    F: Fn(f64, f64) -> f64,
{
    let mut system = FnSystem(|t: f64, u: &[f64], du: &mut [f64]| du[0] = f(u[0], t));
    let trajectory = ForwardEuler::new(dt, t_final).integrate(&mut system, &[u0])?;
    let u = trajectory.u.into_iter().map(|u| u[0]).collect();
    Ok((u, trajectory.t))
}

/// Forward Euler for a system `u' = f(u, t)` with a vector valued right-hand side.
pub fn ode_fe_vec<F>(f: F, u0: &[f64], dt: f64, t_final: f64) -> Result<Trajectory, Error>
where
    F: Fn(&[f64], f64) -> Vec<f64>,
{
    let mut system = VecSystem(f);
    ForwardEuler::new(dt, t_final).integrate(&mut system, u0)
}

struct VecSystem<F>(F);

impl<F> System for VecSystem<F>
where
    F: Fn(&[f64], f64) -> Vec<f64>,
{
    fn derive(&mut self, t: f64, u: &[f64], du: &mut [f64]) -> Result<(), BoxError> {
        let value = (self.0)(u, t);
        if value.len() != du.len() {
            return Err(format!(
                "right-hand side returned {} components for a state of {}",
                value.len(),
                du.len()
            )
            .into());
        }
        du.copy_from_slice(&value);
        Ok(())
    }
}

// Shared stepping loop: `advance(t_n, u_n, u_{n+1})` fills in the next state.
fn march<F>(grid: &TimeGrid, u_initial: &[f64], mut advance: F) -> Result<Trajectory, Error>
where
    F: FnMut(f64, &[f64], &mut [f64]) -> Result<(), Error>,
{
    if u_initial.is_empty() {
        return Err(Error::InvalidParameter {
            param: "u_initial: []".to_string(),
        });
    }
    let t = grid.times();
    let mut u: Vec<Vec<f64>> = Vec::with_capacity(t.len());
    u.push(u_initial.to_vec());
    for (n, &t_n) in t.iter().take(grid.n_steps()).enumerate() {
        let mut next = vec![0.0; u_initial.len()];
        advance(t_n, &u[n], &mut next)?;
        u.push(next);
    }
    Ok(Trajectory { t, u })
}
