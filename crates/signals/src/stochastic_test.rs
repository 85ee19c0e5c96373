use approx::assert_relative_eq;
use spectral::{
    integrated_power, FrequencyGrid, FrequencyGridConfig, GranulationShape, OscillationProfile,
    PowerSpectrum, SpectralError,
};
use units::{Frequency, Time, Velocity};

use crate::component::SignalComponent;
use crate::error::SignalError;
use crate::granulation::Granulation;
use crate::oscillation::Oscillation;
use crate::random_state::Draw;

fn mean_square(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64
}

fn granulation(seed: u64) -> Granulation {
    Granulation::new(
        Velocity::from_meters_per_sec(1.2),
        Time::from_hours(4.0),
        GranulationShape::Kallinger,
    )
    .unwrap()
    .with_seed(seed)
}

#[test]
fn defaults_and_labels() {
    let granulation = Granulation::default();
    assert_eq!(granulation.condensed(), "KGran(75.0, 2.0)");
    assert_eq!(
        granulation.to_string(),
        "Granulation(sigma=75.00 m/s, tau=2.00 h, model=kallinger)"
    );

    let oscillation = Oscillation::default();
    assert_eq!(oscillation.psd().profile, OscillationProfile::Lorentzian);
    assert_relative_eq!(oscillation.psd().numax.to_microhertz(), 3000.0, max_relative = 1e-12);
    assert_relative_eq!(oscillation.psd().width.to_microhertz(), 0.5, max_relative = 1e-12);
}

#[test]
fn granulation_variance_matches_the_psd_on_the_grid() {
    // 15-minute cadence over three nights
    let times: Vec<f64> = (0..288).map(|i| i as f64 / 96.0).collect();
    let mut component = granulation(3);

    let values = component.sample(&times).unwrap().values().unwrap();
    assert_eq!(values.len(), times.len());

    let grid = FrequencyGrid::for_times(&times, &FrequencyGridConfig::default()).unwrap();
    let expected = integrated_power(&grid, &component.psd().evaluate(&grid));
    assert_relative_eq!(mean_square(&values), expected, max_relative = 1e-9);
}

#[test]
fn stochastic_components_replay_unless_advanced() {
    let times: Vec<f64> = (0..64).map(|i| i as f64 * 0.05).collect();
    let mut component = granulation(8);

    let a = component.sample_at(&times, Draw::Replay).unwrap();
    let b = component.sample_at(&times, Draw::Replay).unwrap();
    assert_eq!(a, b);

    let c = component.sample_at(&times, Draw::Advance).unwrap();
    let d = component.sample_at(&times, Draw::Advance).unwrap();
    assert_ne!(c, d);

    assert_ne!(
        granulation(8).sample(&times).unwrap(),
        granulation(9).sample(&times).unwrap()
    );
}

#[test]
fn invalid_shapes_fail_at_construction() {
    let result = Granulation::new(
        Velocity::from_meters_per_sec(1.0),
        Time::from_hours(1.0),
        GranulationShape::Custom { exponent: 0.5 },
    );
    assert!(result.unwrap_err().is_configuration());

    let result = Granulation::new(
        Velocity::from_meters_per_sec(-1.0),
        Time::from_hours(1.0),
        GranulationShape::Harvey,
    );
    assert!(result.unwrap_err().is_configuration());
}

#[test]
fn single_epoch_cannot_be_synthesized() {
    let err = granulation(1).sample(&[3.0]).unwrap_err();
    assert!(matches!(
        err,
        SignalError::Spectral(SpectralError::DegenerateSeries(_))
    ));
}

#[test]
fn oscillations_come_out_in_meters_per_second() {
    let mut oscillation = Oscillation::new(
        0.5,
        Frequency::from_microhertz(150.0),
        Frequency::from_microhertz(3000.0),
        OscillationProfile::Gaussian,
    )
    .unwrap()
    .with_seed(21);
    // One-minute cadence over four hours
    let times: Vec<f64> = (0..240).map(|i| i as f64 / 1440.0).collect();

    let values = oscillation.sample(&times).unwrap().values().unwrap();

    let grid = FrequencyGrid::for_times(&times, &FrequencyGridConfig::default()).unwrap();
    let expected = 1e6 * integrated_power(&grid, &oscillation.psd().evaluate(&grid));
    assert_relative_eq!(mean_square(&values), expected, max_relative = 1e-9);
}

#[test]
fn oscillation_parameters_are_validated() {
    let result = Oscillation::new(
        1.0,
        Frequency::from_microhertz(-0.5),
        Frequency::from_microhertz(3000.0),
        OscillationProfile::Lorentzian,
    );
    assert!(result.unwrap_err().is_configuration());
}

#[test]
fn unresolved_gaussian_envelope_samples_as_zeros() {
    let mut oscillation = Oscillation::new(
        1.0,
        Frequency::from_microhertz(0.5),
        Frequency::from_microhertz(3000.0),
        OscillationProfile::Gaussian,
    )
    .unwrap()
    .with_seed(1);
    // nightly cadence never reaches the millihertz envelope
    let times: Vec<f64> = (0..50).map(|i| i as f64).collect();

    let values = oscillation.sample(&times).unwrap().values().unwrap();
    assert_eq!(values, vec![0.0; 50]);
}
