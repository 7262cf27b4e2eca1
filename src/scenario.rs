//! Scenario runs: fresh model → optional perturbation → integration.
//!
//! Each run owns its own [`GutBrainAxis`]; nothing is shared between
//! runs, so the sweep order has no effect on the results.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::integrator::{integrate, IntegratorConfig};
use crate::perturbation::Perturbation;
use crate::series::{TimeSeries, VariableSummary};
use crate::systems::{GutBrainAxis, RateParameters, SimulationState};

/// Result of one scenario
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub perturbation: Perturbation,
    /// Initial conditions after the perturbation
    pub initial: SimulationState,
    pub series: TimeSeries,
}

/// Final value of each variable relative to the baseline run
///
/// A ratio is `None` when the baseline value is zero or the quotient is
/// not finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineComparison {
    pub perturbation: Perturbation,
    pub microbiota_ratio: Option<f64>,
    pub serotonin_ratio: Option<f64>,
    pub brain_activity_ratio: Option<f64>,
}

fn ratio(value: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        return None;
    }
    let r = value / baseline;
    r.is_finite().then_some(r)
}

impl ScenarioRun {
    /// Chart title for this run
    pub fn title(&self) -> String {
        match self.perturbation {
            Perturbation::None => "Gut-Brain Axis Simulation".to_string(),
            p => format!("Gut-Brain Axis Simulation ({})", p),
        }
    }

    pub fn final_state(&self) -> SimulationState {
        SimulationState::from_view(self.series.final_state())
    }

    pub fn summary(&self) -> Vec<VariableSummary> {
        self.series.summary()
    }

    /// Ratio of this run's final values to `baseline`'s
    pub fn compare_to(&self, baseline: &ScenarioRun) -> BaselineComparison {
        let ours = self.final_state();
        let base = baseline.final_state();
        BaselineComparison {
            perturbation: self.perturbation,
            microbiota_ratio: ratio(ours.microbiota, base.microbiota),
            serotonin_ratio: ratio(ours.serotonin, base.serotonin),
            brain_activity_ratio: ratio(ours.brain_activity, base.brain_activity),
        }
    }
}

/// Run one scenario from the default initial conditions
pub fn run_scenario(
    perturbation: Perturbation,
    rates: RateParameters,
    config: &IntegratorConfig,
) -> Result<ScenarioRun> {
    let mut system = GutBrainAxis::with_rates(rates);
    perturbation.apply_to(&mut system);

    info!(
        perturbation = perturbation.name(),
        time_span = config.time_span,
        samples = config.samples,
        "running scenario"
    );

    let series = integrate(&system, config)?;
    Ok(ScenarioRun {
        perturbation,
        initial: *system.initial(),
        series,
    })
}

/// Baseline followed by every intervention, run sequentially
pub fn run_all(rates: RateParameters, config: &IntegratorConfig) -> Result<Vec<ScenarioRun>> {
    std::iter::once(Perturbation::None)
        .chain(Perturbation::INTERVENTIONS)
        .map(|p| run_scenario(p, rates, config))
        .collect()
}

/// Compare every run against the first `Perturbation::None` run
pub fn compare_to_baseline(runs: &[ScenarioRun]) -> Vec<BaselineComparison> {
    let Some(baseline) = runs.iter().find(|r| r.perturbation == Perturbation::None) else {
        return Vec::new();
    };
    runs.iter()
        .filter(|r| r.perturbation != Perturbation::None)
        .map(|r| r.compare_to(baseline))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> IntegratorConfig {
        IntegratorConfig::new(10.0, 101)
    }

    #[test]
    fn test_perturbed_first_sample() {
        let defaults = SimulationState::default();

        let run = run_scenario(Perturbation::Antibiotic, RateParameters::default(), &short()).unwrap();
        assert_eq!(run.series.first_state()[0], 0.5 * defaults.microbiota);

        let run = run_scenario(Perturbation::Probiotic, RateParameters::default(), &short()).unwrap();
        assert_eq!(run.series.first_state()[0], 1.5 * defaults.microbiota);

        let run = run_scenario(Perturbation::Stress, RateParameters::default(), &short()).unwrap();
        let first = run.series.first_state();
        assert_eq!(first[0], defaults.microbiota);
        assert_eq!(first[1], defaults.serotonin);
        assert_eq!(first[2], 1.5 * defaults.brain_activity);
    }

    #[test]
    fn test_run_all_order_and_independence() {
        let runs = run_all(RateParameters::default(), &short()).unwrap();
        let kinds: Vec<Perturbation> = runs.iter().map(|r| r.perturbation).collect();
        assert_eq!(
            kinds,
            vec![
                Perturbation::None,
                Perturbation::Antibiotic,
                Perturbation::Probiotic,
                Perturbation::Stress,
            ]
        );
        // Stress runs last but still starts from unperturbed microbiota
        assert_eq!(runs[3].initial.microbiota, 100.0);
    }

    #[test]
    fn test_compare_to_baseline_scales_microbiota() {
        let runs = run_all(RateParameters::default(), &short()).unwrap();
        let cmp = compare_to_baseline(&runs);
        assert_eq!(cmp.len(), 3);
        // Linear system: halving M₀ halves M(t)
        assert!((cmp[0].microbiota_ratio.unwrap() - 0.5).abs() < 1e-9);
        assert!((cmp[1].microbiota_ratio.unwrap() - 1.5).abs() < 1e-9);
        assert!((cmp[2].microbiota_ratio.unwrap() - 1.0).abs() < 1e-12);
        assert!(cmp[2].brain_activity_ratio.unwrap() > 1.0);
    }

    #[test]
    fn test_zero_baseline_gives_no_ratio() {
        // All rates zero: the state is frozen at its initial values
        let rates = RateParameters::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let mut runs = run_all(rates, &short()).unwrap();
        runs[0].initial = SimulationState::new(0.0, 0.0, 0.0);
        let frozen = GutBrainAxis::new(runs[0].initial, rates);
        runs[0].series = integrate(&frozen, &short()).unwrap();

        let cmp = compare_to_baseline(&runs);
        for c in &cmp {
            assert_eq!(c.microbiota_ratio, None, "{}", c.perturbation);
            assert_eq!(c.serotonin_ratio, None);
            assert_eq!(c.brain_activity_ratio, None);
        }
    }

    #[test]
    fn test_ratio_helper() {
        assert_eq!(ratio(3.0, 2.0), Some(1.5));
        assert_eq!(ratio(1.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(f64::MAX, 1e-300), None);
    }

    #[test]
    fn test_compare_without_baseline_is_empty() {
        let run = run_scenario(Perturbation::Stress, RateParameters::default(), &short()).unwrap();
        assert!(compare_to_baseline(&[run]).is_empty());
    }

    #[test]
    fn test_summary_reports_growth() {
        let run = run_scenario(Perturbation::None, RateParameters::default(), &short()).unwrap();
        let summary = run.summary();
        assert_eq!(summary[0].name, "microbiota");
        assert_eq!(summary[0].initial, 100.0);
        assert_eq!(summary[0].min, 100.0);
        assert_eq!(summary[0].max, summary[0].final_value);
    }

    #[test]
    fn test_titles() {
        let run = run_scenario(Perturbation::None, RateParameters::default(), &short()).unwrap();
        assert_eq!(run.title(), "Gut-Brain Axis Simulation");
        let run = run_scenario(Perturbation::Stress, RateParameters::default(), &short()).unwrap();
        assert_eq!(run.title(), "Gut-Brain Axis Simulation (stress)");
    }

    #[test]
    fn test_invalid_config_propagates() {
        let bad = IntegratorConfig::new(-5.0, 100);
        assert!(run_scenario(Perturbation::None, RateParameters::default(), &bad).is_err());
        assert!(run_all(RateParameters::default(), &bad).is_err());
    }
}
