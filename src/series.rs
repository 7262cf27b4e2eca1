//! Time series produced by integration.
//!
//! A [`TimeSeries`] holds `N` sample times and an `N × d` state matrix,
//! one row per sample and one column per state variable. It is built
//! once by the integrator and is read-only afterwards.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::Serialize;

/// Sampled trajectory of a dynamical system
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// Sample times t₀ < t₁ < … < t_{N-1}
    time: Array1<f64>,
    /// State matrix, row i is the state at time[i]
    states: Array2<f64>,
    /// Variable names, one per column
    labels: Vec<&'static str>,
}

/// Range statistics for one state variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSummary {
    pub name: &'static str,
    pub initial: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
    pub min: f64,
    pub max: f64,
}

impl TimeSeries {
    pub(crate) fn new(time: Array1<f64>, states: Array2<f64>, labels: Vec<&'static str>) -> Self {
        debug_assert_eq!(time.len(), states.nrows());
        debug_assert_eq!(labels.len(), states.ncols());
        Self {
            time,
            states,
            labels,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Number of state variables
    pub fn dimension(&self) -> usize {
        self.states.ncols()
    }

    pub fn time(&self) -> ArrayView1<'_, f64> {
        self.time.view()
    }

    pub fn states(&self) -> ArrayView2<'_, f64> {
        self.states.view()
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    /// Trajectory of variable `idx` over all samples
    pub fn column(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.states.column(idx)
    }

    /// Trajectory of the variable called `name`
    pub fn column_by_name(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.labels
            .iter()
            .position(|&label| label == name)
            .map(|idx| self.column(idx))
    }

    /// Sample `i` as `(t, state)`
    pub fn sample(&self, i: usize) -> Option<(f64, ArrayView1<'_, f64>)> {
        if i >= self.len() {
            return None;
        }
        Some((self.time[i], self.states.row(i)))
    }

    /// Iterate samples in time order
    pub fn samples(&self) -> impl Iterator<Item = (f64, ArrayView1<'_, f64>)> + '_ {
        self.time
            .iter()
            .copied()
            .zip(self.states.axis_iter(Axis(0)))
    }

    pub fn first_state(&self) -> ArrayView1<'_, f64> {
        self.states.row(0)
    }

    pub fn final_state(&self) -> ArrayView1<'_, f64> {
        self.states.row(self.len() - 1)
    }

    pub fn final_time(&self) -> f64 {
        self.time[self.len() - 1]
    }

    /// Initial, final, min and max of every variable
    pub fn summary(&self) -> Vec<VariableSummary> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, &name)| {
                let col = self.column(idx);
                VariableSummary {
                    name,
                    initial: col[0],
                    final_value: col[col.len() - 1],
                    min: col.iter().cloned().fold(f64::INFINITY, f64::min),
                    max: col.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                }
            })
            .collect()
    }

    /// Smallest and largest value across all variables
    pub fn value_range(&self) -> (f64, f64) {
        let lo = self.states.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = self.states.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (lo, hi)
    }
}
