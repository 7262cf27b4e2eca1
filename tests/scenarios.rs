use gut_brain_dynamics::{
    integrate, run_all, run_scenario, GutBrainAxis, IntegratorConfig, Perturbation,
    RateParameters, SimulationError, SimulationState,
};

#[test]
fn default_scenario_end_to_end() {
    let run = run_scenario(
        Perturbation::None,
        RateParameters::default(),
        &IntegratorConfig::default(),
    )
    .unwrap();

    assert_eq!(run.series.len(), 1000);
    assert_eq!(run.series.final_time(), 100.0);

    let m = run.final_state().microbiota;
    assert!((m - 14841.3).abs() < 1.0, "microbiota at t = 100: {}", m);
    // serotonin and brain activity follow the growing microbiota
    assert!(run.final_state().serotonin > 10_000.0);
    assert!(run.final_state().brain_activity > 10_000.0);
}

#[test]
fn perturbations_only_touch_their_field() {
    let defaults = SimulationState::default();
    let config = IntegratorConfig::new(1.0, 2);

    for (p, expected) in [
        (Perturbation::Antibiotic, SimulationState::new(50.0, 50.0, 10.0)),
        (Perturbation::Probiotic, SimulationState::new(150.0, 50.0, 10.0)),
        (Perturbation::Stress, SimulationState::new(100.0, 50.0, 15.0)),
        (Perturbation::None, defaults),
    ] {
        let run = run_scenario(p, RateParameters::default(), &config).unwrap();
        let first = SimulationState::from_view(run.series.first_state());
        assert_eq!(first, expected, "{}", p);
        assert_eq!(run.initial, expected);
    }
}

#[test]
fn sweep_matches_individual_runs() {
    let config = IntegratorConfig::new(30.0, 300);
    let sweep = run_all(RateParameters::default(), &config).unwrap();
    for run in &sweep {
        let single = run_scenario(run.perturbation, RateParameters::default(), &config).unwrap();
        assert_eq!(run.series, single.series);
    }
}

#[test]
fn washout_regime_decays() {
    let rates = RateParameters::new(0.02, 0.1, 0.2, 0.1, 0.15, 0.1).unwrap();
    let system = GutBrainAxis::with_rates(rates);
    let series = integrate(&system, &IntegratorConfig::default()).unwrap();
    let m = series.column(0);
    assert!(m[m.len() - 1] < 1.0);
    let expected = system.analytical_microbiota(100.0);
    assert!((m[m.len() - 1] - expected).abs() / expected < 1e-6);
}

#[test]
fn bad_config_is_invalid_parameter() {
    let err = run_scenario(
        Perturbation::None,
        RateParameters::default(),
        &IntegratorConfig::new(10.0, 100).with_max_step(0.0),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SimulationError::InvalidParameter { name: "max_step", .. }
    ));
}
