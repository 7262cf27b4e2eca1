//! Perturbations: one-shot interventions on the initial conditions.
//!
//! | kind       | field          | factor |
//! |------------|----------------|--------|
//! | antibiotic | microbiota     | × 0.5  |
//! | probiotic  | microbiota     | × 1.5  |
//! | stress     | brain_activity | × 1.5  |
//! | none       | –              | × 1.0  |
//!
//! A perturbation is applied once, before integration starts. Names are
//! parsed strictly: anything outside the table is an `InvalidParameter`.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use crate::error::SimulationError;
use crate::systems::{GutBrainAxis, SimulationState};

/// Intervention applied to the initial state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Perturbation {
    /// Halves the microbiota population
    Antibiotic,
    /// Raises the microbiota population by half
    Probiotic,
    /// Raises brain activity by half
    Stress,
    /// Leaves the state untouched
    #[default]
    None,
}

/// State field targeted by a perturbation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Microbiota,
    BrainActivity,
}

impl Perturbation {
    /// The interventions, in the order the scenario sweep runs them
    pub const INTERVENTIONS: [Perturbation; 3] = [
        Perturbation::Antibiotic,
        Perturbation::Probiotic,
        Perturbation::Stress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Antibiotic => "antibiotic",
            Self::Probiotic => "probiotic",
            Self::Stress => "stress",
            Self::None => "none",
        }
    }

    /// Field the perturbation acts on, `None` for the no-op
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::Antibiotic | Self::Probiotic => Some(Target::Microbiota),
            Self::Stress => Some(Target::BrainActivity),
            Self::None => None,
        }
    }

    /// Multiplicative factor on the target field
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Antibiotic => 0.5,
            Self::Probiotic | Self::Stress => 1.5,
            Self::None => 1.0,
        }
    }

    /// Scale the targeted field of `state` in place
    pub fn apply(&self, state: &mut SimulationState) {
        let factor = self.multiplier();
        match self.target() {
            Some(Target::Microbiota) => state.microbiota *= factor,
            Some(Target::BrainActivity) => state.brain_activity *= factor,
            None => {}
        }
        debug!(perturbation = self.name(), factor, "applied to initial state");
    }

    /// Apply to the initial conditions of a model
    pub fn apply_to(&self, system: &mut GutBrainAxis) {
        self.apply(system.initial_mut());
    }
}

impl fmt::Display for Perturbation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Perturbation {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "antibiotic" => Ok(Self::Antibiotic),
            "probiotic" => Ok(Self::Probiotic),
            "stress" => Ok(Self::Stress),
            "none" => Ok(Self::None),
            other => Err(SimulationError::invalid(
                "perturbation",
                format!(
                    "unknown kind '{}' (expected antibiotic, probiotic, stress or none)",
                    other
                ),
            )),
        }
    }
}
