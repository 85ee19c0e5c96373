use approx::assert_abs_diff_eq;

use crate::error::SignalError;
use crate::random_state::Draw;
use crate::scenario::{AxisValue, ComponentConfig, SamplingConfig, ScenarioConfig};

const SCENARIO: &str = r#"{
    "seed": 42,
    "sampling": { "kind": "uniform", "start": 0.0, "end": 30.0, "count": 61 },
    "components": [
        {
            "type": "planet",
            "period": 10,
            "semi_amplitude": 3.0,
            "eccentricity": 0.0,
            "orbit": { "argument_of_periastron": 0.0, "time_of_periastron": 0.0 }
        },
        { "type": "offset", "value": -5.0 },
        { "type": "white_noise", "sd": 0.5 },
        { "type": "granulation", "sigma": 0.8, "tau_hours": 3.0 }
    ]
}"#;

fn with_components(components: &str) -> String {
    format!(
        r#"{{"seed": 1, "sampling": {{"kind": "times", "times": [0.0, 1.0, 2.5, 4.0]}}, "components": {components}}}"#
    )
}

#[test]
fn scenario_parses_with_defaults() {
    let config = ScenarioConfig::from_json(SCENARIO).unwrap();

    assert_eq!(config.seed, Some(42));
    assert_eq!(
        config.sampling,
        SamplingConfig::Uniform {
            start: 0.0,
            end: 30.0,
            count: 61
        }
    );
    assert_eq!(config.components.len(), 4);
    assert_eq!(config.frequency_grid.samples_per_peak, 5.0);
    assert_eq!(config.solver.max_iterations, 100);

    match &config.components[0] {
        ComponentConfig::Planet { period, .. } => {
            assert_eq!(period, &Some(AxisValue::Fixed(10.0)))
        }
        other => panic!("expected a planet, got {other:?}"),
    }
    match &config.components[3] {
        ComponentConfig::Granulation { model, exponent, .. } => {
            assert_eq!(model, "kallinger");
            assert_eq!(*exponent, None);
        }
        other => panic!("expected granulation, got {other:?}"),
    }
}

#[test]
fn built_scenario_is_reproducible() {
    let config = ScenarioConfig::from_json(SCENARIO).unwrap();

    let mut first = config.build().unwrap();
    let mut second = config.build().unwrap();
    let a = first.sample(Draw::Replay).unwrap();
    let b = second.sample(Draw::Replay).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.times.len(), 61);
    assert_eq!(first.seed, 42);
    assert_eq!(first.signal.as_composite().map(|c| c.components().len()), Some(4));

    let advanced = first.sample(Draw::Advance).unwrap();
    assert_ne!(advanced.samples, a.samples);
}

#[test]
fn deterministic_terms_add_exactly() {
    let json = with_components(
        r#"[{"type": "offset", "value": 2.0}, {"type": "slope", "slope": 0.5}]"#,
    );
    let mut scenario = ScenarioConfig::from_json(&json).unwrap().build().unwrap();
    let values = scenario
        .sample(Draw::Replay)
        .unwrap()
        .samples
        .values()
        .unwrap();

    for (v, expected) in values.iter().zip([2.0, 2.5, 3.25, 4.0]) {
        assert_abs_diff_eq!(*v, expected, epsilon = 1e-12);
    }
}

#[test]
fn planet_sweeps_survive_the_round_trip() {
    let json = with_components(
        r#"[{"type": "planet", "period": [2.0, 3.0, 5.0], "semi_amplitude": 1.0, "eccentricity": 0.1}]"#,
    );
    let mut scenario = ScenarioConfig::from_json(&json).unwrap().build().unwrap();
    let series = scenario.sample(Draw::Replay).unwrap();
    assert_eq!(series.samples.n_realizations(), 3);
    assert_eq!(scenario.signal.shortest_period(), Some(2.0));
}

#[test]
fn invalid_components_fail_at_build_time() {
    let cases = [
        r#"[{"type": "white_noise", "sd": 1.0, "variance": 1.0}]"#,
        r#"[{"type": "white_noise", "sd": 0.0}]"#,
        r#"[{"type": "granulation", "model": "custom"}]"#,
        r#"[{"type": "granulation", "model": "lorentz"}]"#,
        r#"[{"type": "oscillation", "profile": "voigt"}]"#,
        r#"[{"type": "planet", "period": -1.0}]"#,
        r#"[{"type": "planet", "orbit": {"mean_anomaly": 0.1, "true_anomaly": 0.2}}]"#,
        r#"[]"#,
    ];
    for components in cases {
        let config = ScenarioConfig::from_json(&with_components(components)).unwrap();
        let err = config.build().err();
        assert!(
            err.as_ref().is_some_and(SignalError::is_configuration),
            "{components}: {err:?}"
        );
    }
}

#[test]
fn active_regions_need_a_simulator() {
    let json = with_components(r#"[{"type": "active_region"}]"#);
    let result = ScenarioConfig::from_json(&json).unwrap().build();
    assert!(matches!(result, Err(SignalError::UnavailableCollaborator(_))));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        ScenarioConfig::from_json("{\"seed\": 1"),
        Err(SignalError::Json(_))
    ));
    assert!(matches!(
        ScenarioConfig::from_json(&with_components(r#"[{"type": "comet"}]"#)),
        Err(SignalError::Json(_))
    ));
}

#[test]
fn missing_seed_is_drawn_and_reported() {
    let json = r#"{
        "sampling": { "kind": "times", "times": [0.0, 1.0] },
        "components": [{ "type": "white_noise" }]
    }"#;
    let config = ScenarioConfig::from_json(json).unwrap();
    let a = config.build().unwrap();
    let b = config.build().unwrap();
    assert_ne!(a.seed, b.seed);

    let json = config.to_json().unwrap();
    assert_eq!(ScenarioConfig::from_json(&json).unwrap(), config);
}
