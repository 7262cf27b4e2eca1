//! Fixed-step RK4 integration onto a uniform sample grid.
//!
//! The span `[0, T]` is divided into `N - 1` equal sample intervals.
//! Each interval is crossed with `ceil(Δt / max_step)` classical RK4
//! substeps, so the output grid and the solver step are independent.
//!
//! For the smooth linear cascade this gives relative errors far below
//! 1e-6 against the closed form for T ≤ 100 at the default settings.

use ndarray::{Array1, Array2, ArrayView1};
use tracing::{debug, warn};

use crate::error::{Result, SimulationError};
use crate::series::TimeSeries;
use crate::systems::DynamicalSystem;

/// Largest accepted sample count
pub const MAX_SAMPLES: usize = 10_000_000;

/// Largest accepted number of RK4 substeps per sample interval
pub const MAX_SUBSTEPS: f64 = 1e7;

/// Largest accepted number of RK4 steps over the whole span
pub const MAX_TOTAL_STEPS: f64 = 1e9;

/// Integration span, sampling and solver step
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorConfig {
    /// Total simulated time T
    pub time_span: f64,
    /// Number of output samples N (including t = 0 and t = T)
    pub samples: usize,
    /// Upper bound on the RK4 substep
    pub max_step: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            time_span: 100.0,
            samples: 1000,
            max_step: 0.01,
        }
    }
}

impl IntegratorConfig {
    pub fn new(time_span: f64, samples: usize) -> Self {
        Self {
            time_span,
            samples,
            ..Self::default()
        }
    }

    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    /// Reject non-positive spans, sample counts outside `[2, MAX_SAMPLES]`,
    /// bad steps, and step counts beyond `MAX_SUBSTEPS` / `MAX_TOTAL_STEPS`
    pub fn validate(&self) -> Result<()> {
        if !self.time_span.is_finite() || self.time_span <= 0.0 {
            return Err(SimulationError::invalid(
                "time_span",
                format!("must be finite and positive, got {}", self.time_span),
            ));
        }
        if self.samples < 2 {
            return Err(SimulationError::invalid(
                "samples",
                format!("need at least 2 samples, got {}", self.samples),
            ));
        }
        if self.samples > MAX_SAMPLES {
            return Err(SimulationError::invalid(
                "samples",
                format!("at most {} samples, got {}", MAX_SAMPLES, self.samples),
            ));
        }
        if !self.max_step.is_finite() || self.max_step <= 0.0 {
            return Err(SimulationError::invalid(
                "max_step",
                format!("must be finite and positive, got {}", self.max_step),
            ));
        }

        let per_interval = (self.sample_interval() / self.max_step).ceil();
        if per_interval > MAX_SUBSTEPS {
            return Err(SimulationError::invalid(
                "max_step",
                format!(
                    "{} is too small: {:e} substeps per sample (limit {:e})",
                    self.max_step, per_interval, MAX_SUBSTEPS
                ),
            ));
        }
        let total = per_interval.max(1.0) * (self.samples - 1) as f64;
        if total > MAX_TOTAL_STEPS {
            return Err(SimulationError::invalid(
                "max_step",
                format!(
                    "{} is too small: {:e} RK4 steps in total (limit {:e})",
                    self.max_step, total, MAX_TOTAL_STEPS
                ),
            ));
        }
        Ok(())
    }

    /// Spacing between output samples
    pub fn sample_interval(&self) -> f64 {
        self.time_span / (self.samples - 1) as f64
    }

    /// RK4 substeps per sample interval
    pub fn substeps(&self) -> usize {
        ((self.sample_interval() / self.max_step).ceil() as usize).max(1)
    }

    /// Uniform sample grid with exact endpoints
    pub fn time_grid(&self) -> Array1<f64> {
        let n = self.samples;
        let mut grid = Array1::linspace(0.0, self.time_span, n);
        grid[0] = 0.0;
        grid[n - 1] = self.time_span;
        grid
    }
}

/// Single classical RK4 step of `dy/dt = f(y, t)` from `t` to `t + dt`
pub fn rk4_step<F>(f: &F, y: ArrayView1<f64>, t: f64, dt: f64) -> Array1<f64>
where
    F: Fn(ArrayView1<f64>, f64) -> Array1<f64>,
{
    let half_dt = 0.5 * dt;

    let k1 = f(y, t);
    let y2 = &y + &(&k1 * half_dt);
    let k2 = f(y2.view(), t + half_dt);
    let y3 = &y + &(&k2 * half_dt);
    let k3 = f(y3.view(), t + half_dt);
    let y4 = &y + &(&k3 * dt);
    let k4 = f(y4.view(), t + dt);

    let slope = k1 + &k2 * 2.0 + &k3 * 2.0 + k4;
    &y + &(slope * (dt / 6.0))
}

/// First non-finite component, if any
fn first_non_finite(y: ArrayView1<f64>) -> Option<usize> {
    y.iter().position(|v| !v.is_finite())
}

/// Integrate `system` from its initial conditions over `[0, T]`
///
/// Fails with `InvalidParameter` on a bad configuration and with
/// `NumericalInstability` as soon as any state component stops being
/// finite. No partial series is returned on failure.
pub fn integrate<S: DynamicalSystem>(system: &S, config: &IntegratorConfig) -> Result<TimeSeries> {
    config.validate()?;

    let names = system.variable_names();
    let dim = system.state_dimension();
    let y0 = system.initial_conditions();

    if y0.len() != dim {
        return Err(SimulationError::invalid(
            "initial_conditions",
            format!("expected {} components, got {}", dim, y0.len()),
        ));
    }
    if let Some(idx) = first_non_finite(y0.view()) {
        return Err(SimulationError::invalid(
            "initial_conditions",
            format!("{} is {}", names[idx], y0[idx]),
        ));
    }

    let n = config.samples;
    if n.checked_mul(dim).is_none() {
        return Err(SimulationError::invalid(
            "samples",
            format!("{} samples × {} variables overflows the state matrix", n, dim),
        ));
    }

    let time = config.time_grid();
    let substeps = config.substeps();

    debug!(
        time_span = config.time_span,
        samples = n,
        substeps,
        "integrating {}-dimensional system",
        dim
    );

    let rhs = |y: ArrayView1<f64>, t: f64| system.derivatives(y, t);

    let mut states = Array2::zeros((n, dim));
    states.row_mut(0).assign(&y0);

    let mut y = y0;
    for i in 1..n {
        let t_start = time[i - 1];
        let h = (time[i] - t_start) / substeps as f64;

        for k in 0..substeps {
            let t = t_start + k as f64 * h;
            y = rk4_step(&rhs, y.view(), t, h);

            if let Some(idx) = first_non_finite(y.view()) {
                let t_fail = t + h;
                warn!(
                    time = t_fail,
                    variable = names[idx],
                    "state left the representable range"
                );
                return Err(SimulationError::NumericalInstability {
                    time: t_fail,
                    variable: names[idx],
                    value: y[idx],
                });
            }
        }

        states.row_mut(i).assign(&y);
    }

    Ok(TimeSeries::new(time, states, names.to_vec()))
}
