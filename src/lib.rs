//! # Gut-Brain Dynamics
//!
//! Deterministic simulation of the gut-brain axis as a three-variable
//! linear ODE cascade, with one-shot interventions on the initial state.
//!
//! ## Model
//!
//!   dM/dt = g·M - d·M
//!   dS/dt = p·M - d_s·S
//!   dB/dt = i·S - d_b·B
//!
//! Microbiota M drives serotonin S, which drives brain activity B. The
//! system is autonomous and linear; with the default rates (g = 0.1,
//! d = 0.05) microbiota grows without bound as M₀ e^{0.05 t}.
//!
//! ## Pipeline
//!
//! 1. Build a [`GutBrainAxis`] from default initial conditions and
//!    [`RateParameters`]
//! 2. Optionally apply a [`Perturbation`] (antibiotic, probiotic, stress)
//! 3. [`integrate`] over `[0, T]` with fixed-step RK4 onto `N` samples
//! 4. Hand the [`TimeSeries`] to a [`VisualizationSink`]
//!
//! ## Example
//!
//! ```
//! use gut_brain_dynamics::{run_scenario, IntegratorConfig, Perturbation, RateParameters};
//!
//! let run = run_scenario(
//!     Perturbation::Antibiotic,
//!     RateParameters::default(),
//!     &IntegratorConfig::new(10.0, 101),
//! )
//! .unwrap();
//! assert_eq!(run.series.first_state()[0], 50.0);
//! ```

pub mod error;
pub mod systems;
pub mod series;
pub mod integrator;
pub mod perturbation;
pub mod scenario;
pub mod output;

pub use error::{Result, SimulationError};

// Re-exports from systems
pub use systems::{
    derivatives,
    DynamicalSystem,
    GutBrainAxis,
    RateParameters,
    SimulationState,
    VARIABLE_NAMES,
};

// Re-exports from integration
pub use series::{TimeSeries, VariableSummary};
pub use integrator::{integrate, rk4_step, IntegratorConfig};

// Re-exports from scenarios
pub use perturbation::Perturbation;
pub use scenario::{
    compare_to_baseline,
    run_all,
    run_scenario,
    BaselineComparison,
    ScenarioRun,
};

// Re-exports from output
pub use output::{
    render_runs,
    sink_for,
    ChartSink,
    ChartSpec,
    CsvSink,
    JsonSink,
    OutputFormat,
    TableSink,
    VisualizationSink,
};
