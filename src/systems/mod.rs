//! Physical Systems Module: ODE Models
//!
//! - **Gut-brain axis**: linear cascade microbiota → serotonin → brain
//!   activity
//!
//! Models implement [`DynamicalSystem`] so the integrator can drive them
//! without knowing their equations.

mod traits;
mod gut_brain;

pub use traits::DynamicalSystem;
pub use gut_brain::{
    derivatives,
    GutBrainAxis,
    RateParameters,
    SimulationState,
    VARIABLE_NAMES,
};
