//! Dynamical System Traits: Standardized API for ODE Integration
//!
//! Any model that can be written as an autonomous or time-dependent
//! first-order system `dy/dt = f(y, t)` implements [`DynamicalSystem`]
//! and can be driven by [`crate::integrator::integrate`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DynamicalSystem Trait                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + state_dimension()    - Number of state variables         │
//! │  + variable_names()     - Labels, one per state variable    │
//! │  + initial_conditions() - y(0) as a vector                  │
//! │  + derivatives(y, t)    - Right-hand side f(y, t)           │
//! │  + state_from(y)        - Typed snapshot of a state vector  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use ndarray::{Array1, ArrayView1};

/// Trait for systems of first-order ODEs
pub trait DynamicalSystem {
    /// Typed state snapshot for this system
    type State;

    /// Dimension of state space
    fn state_dimension(&self) -> usize;

    /// Names of the state variables, in vector order
    fn variable_names(&self) -> &'static [&'static str];

    /// Initial state vector y(0)
    fn initial_conditions(&self) -> Array1<f64>;

    /// Right-hand side f(y, t)
    fn derivatives(&self, y: ArrayView1<f64>, t: f64) -> Array1<f64>;

    /// Convert a state vector into the typed snapshot
    fn state_from(&self, y: ArrayView1<f64>) -> Self::State;

    /// Typed snapshot of the initial conditions
    fn state(&self) -> Self::State {
        let y0 = self.initial_conditions();
        self.state_from(y0.view())
    }
}
