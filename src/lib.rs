//! Classical numerical integration: composite quadrature rules (trapezoidal, midpoint, nested
//! two and three dimensional midpoint rules, Monte Carlo over implicit regions) and fixed-step
//! ODE integrators (forward Euler, Heun, classical Runge-Kutta, Euler-Cromer).

// Macros for simple math operations: {min, max, etc}
#[macro_use]
extern crate math_macros;
pub use math_macros::*;
pub mod error;
pub mod grid;
pub mod integral;
pub mod ode;
pub use error::{BoxError, Error};
pub use grid::linspace;
pub use integral::{
    MonteCarlo, QuadratureRule, midpoint, midpoint_double, midpoint_double2, midpoint_triple,
    midpoint_vec, monte_carlo_double, trapezoidal, trapezoidal_vec,
};
pub use ode::{
    EulerCromer, FnSystem, ForwardEuler, Heun, Oscillation, RungeKutta4, Stats, Stepper,
    StepperType, System, TimeGrid, Trajectory, ode_euler_cromer, ode_fe, ode_fe_vec,
};
