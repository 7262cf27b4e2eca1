//! Gut-Brain Axis: Linear Microbiota → Serotonin → Brain Cascade
//!
//! Three coupled first-order equations:
//!
//!   dM/dt = g·M - d·M
//!   dS/dt = p·M - d_s·S
//!   dB/dt = i·S - d_b·B
//!
//! where:
//! - M: gut microbiota population (arbitrary units)
//! - S: serotonin concentration (arbitrary units)
//! - B: lumped brain activity (arbitrary units)
//! - g, d: microbiota growth and decay rates
//! - p, d_s: serotonin production and decay rates
//! - i, d_b: brain-activity increase and decay rates
//!
//! ## Dynamics
//!
//! The system is autonomous and lower-triangular. Microbiota evolves on
//! its own at the net rate r = g - d:
//!
//!   M(t) = M₀ e^{r t}
//!
//! and drives serotonin, which in turn drives brain activity.
//!
//! - r < 0: microbiota washes out, the cascade relaxes to zero
//! - r = 0: microbiota constant, S and B approach fixed points
//! - r > 0: exponential growth propagates down the cascade
//!
//! The default parameters (g = 0.1, d = 0.05) sit in the growth regime:
//! by t = 100 microbiota reaches 100·e⁵ ≈ 14841. Nothing bounds this
//! growth; it is a property of the model.

use ndarray::{arr1, Array1, ArrayView1};
use serde::Serialize;

use super::traits::DynamicalSystem;
use crate::error::{Result, SimulationError};

/// State variable labels, in vector order
pub const VARIABLE_NAMES: [&str; 3] = ["microbiota", "serotonin", "brain_activity"];

/// Instantaneous state of the gut-brain axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationState {
    /// Gut microbiota population
    pub microbiota: f64,
    /// Serotonin concentration
    pub serotonin: f64,
    /// Brain activity
    pub brain_activity: f64,
}

impl SimulationState {
    pub fn new(microbiota: f64, serotonin: f64, brain_activity: f64) -> Self {
        Self {
            microbiota,
            serotonin,
            brain_activity,
        }
    }

    /// State as a vector `[M, S, B]`
    pub fn to_array(&self) -> Array1<f64> {
        arr1(&[self.microbiota, self.serotonin, self.brain_activity])
    }

    /// State from a vector `[M, S, B]`
    pub fn from_view(y: ArrayView1<f64>) -> Self {
        Self::new(y[0], y[1], y[2])
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(100.0, 50.0, 10.0)
    }
}

/// Rate constants of the cascade. Fixed once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateParameters {
    microbiota_growth: f64,
    microbiota_decay: f64,
    serotonin_production: f64,
    serotonin_decay: f64,
    brain_increase: f64,
    brain_decay: f64,
}

impl RateParameters {
    /// Create rate parameters, rejecting negative or non-finite values
    pub fn new(
        microbiota_growth: f64,
        microbiota_decay: f64,
        serotonin_production: f64,
        serotonin_decay: f64,
        brain_increase: f64,
        brain_decay: f64,
    ) -> Result<Self> {
        let params = Self {
            microbiota_growth,
            microbiota_decay,
            serotonin_production,
            serotonin_decay,
            brain_increase,
            brain_decay,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        let named = [
            ("microbiota_growth", self.microbiota_growth),
            ("microbiota_decay", self.microbiota_decay),
            ("serotonin_production", self.serotonin_production),
            ("serotonin_decay", self.serotonin_decay),
            ("brain_increase", self.brain_increase),
            ("brain_decay", self.brain_decay),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::invalid(
                    name,
                    format!("rate must be finite and non-negative, got {}", value),
                ));
            }
        }
        Ok(())
    }

    pub fn microbiota_growth(&self) -> f64 {
        self.microbiota_growth
    }

    pub fn microbiota_decay(&self) -> f64 {
        self.microbiota_decay
    }

    pub fn serotonin_production(&self) -> f64 {
        self.serotonin_production
    }

    pub fn serotonin_decay(&self) -> f64 {
        self.serotonin_decay
    }

    pub fn brain_increase(&self) -> f64 {
        self.brain_increase
    }

    pub fn brain_decay(&self) -> f64 {
        self.brain_decay
    }

    /// Net microbiota rate r = g - d
    pub fn net_microbiota_rate(&self) -> f64 {
        self.microbiota_growth - self.microbiota_decay
    }
}

impl Default for RateParameters {
    fn default() -> Self {
        Self {
            microbiota_growth: 0.1,
            microbiota_decay: 0.05,
            serotonin_production: 0.2,
            serotonin_decay: 0.1,
            brain_increase: 0.15,
            brain_decay: 0.1,
        }
    }
}

/// Right-hand side of the cascade, evaluated at `state`
pub fn derivatives(state: &SimulationState, rates: &RateParameters) -> SimulationState {
    let m = state.microbiota;
    let s = state.serotonin;
    let b = state.brain_activity;

    SimulationState {
        microbiota: rates.microbiota_growth * m - rates.microbiota_decay * m,
        serotonin: rates.serotonin_production * m - rates.serotonin_decay * s,
        brain_activity: rates.brain_increase * s - rates.brain_decay * b,
    }
}

/// Gut-brain axis model: initial conditions plus rate constants
#[derive(Debug, Clone, Default)]
pub struct GutBrainAxis {
    /// Initial conditions (the only mutable part, via perturbation)
    initial: SimulationState,
    /// Rate constants
    rates: RateParameters,
}

impl GutBrainAxis {
    /// Create model with explicit initial conditions and rates
    pub fn new(initial: SimulationState, rates: RateParameters) -> Self {
        Self { initial, rates }
    }

    /// Default initial conditions with custom rates
    pub fn with_rates(rates: RateParameters) -> Self {
        Self::new(SimulationState::default(), rates)
    }

    pub fn initial(&self) -> &SimulationState {
        &self.initial
    }

    /// Mutable access to the initial conditions, for perturbation
    pub fn initial_mut(&mut self) -> &mut SimulationState {
        &mut self.initial
    }

    pub fn rates(&self) -> &RateParameters {
        &self.rates
    }

    /// Closed-form microbiota: M(t) = M₀ e^{r t}
    pub fn analytical_microbiota(&self, t: f64) -> f64 {
        self.initial.microbiota * (self.rates.net_microbiota_rate() * t).exp()
    }

    /// Closed-form serotonin driven by exponential microbiota
    ///
    /// S(t) = S₀ e^{-k t} + p M₀ (e^{r t} - e^{-k t}) / (r + k)
    ///
    /// with the resonant case r = -k reducing to (S₀ + p M₀ t) e^{-k t}.
    pub fn analytical_serotonin(&self, t: f64) -> f64 {
        let r = self.rates.net_microbiota_rate();
        let k = self.rates.serotonin_decay;
        let p = self.rates.serotonin_production;
        let m0 = self.initial.microbiota;
        let s0 = self.initial.serotonin;
        let decay = (-k * t).exp();

        if (r + k).abs() < 1e-12 {
            (s0 + p * m0 * t) * decay
        } else {
            s0 * decay + p * m0 * ((r * t).exp() - decay) / (r + k)
        }
    }
}

impl DynamicalSystem for GutBrainAxis {
    type State = SimulationState;

    fn state_dimension(&self) -> usize {
        3
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &VARIABLE_NAMES
    }

    fn initial_conditions(&self) -> Array1<f64> {
        self.initial.to_array()
    }

    fn derivatives(&self, y: ArrayView1<f64>, _t: f64) -> Array1<f64> {
        let state = SimulationState::from_view(y);
        derivatives(&state, &self.rates).to_array()
    }

    fn state_from(&self, y: ArrayView1<f64>) -> SimulationState {
        SimulationState::from_view(y)
    }
}
