use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use units::{Frequency, Time, Velocity};

use crate::error::SpectralError;
use crate::grid::{FrequencyGrid, FrequencyGridConfig};
use crate::psd::{
    GranulationPsd, GranulationShape, OscillationProfile, OscillationPsd, PowerSpectrum,
};
use crate::synthesis::{
    integrated_power, normalise_timeseries, realize, synthesize, timeseries_from_power_spectrum,
};

fn test_grid(len: usize) -> FrequencyGrid {
    FrequencyGrid::new(
        Frequency::from_microhertz(1.0),
        Frequency::from_microhertz(1.0),
        len,
    )
    .unwrap()
}

fn mean_square(y: &[f64]) -> f64 {
    y.iter().map(|v| v * v).sum::<f64>() / y.len() as f64
}

#[test]
fn normalized_series_carries_the_integrated_power() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    for (bins, samples) in [(16, 32), (64, 50), (200, 7)] {
        let grid = test_grid(bins);
        let power: Vec<f64> = (0..bins).map(|i| 1.0 / (1.0 + i as f64)).collect();

        let y = synthesize(&grid, &power, samples, &mut rng).unwrap();
        assert_eq!(y.len(), samples);
        assert_relative_eq!(
            mean_square(&y),
            integrated_power(&grid, &power),
            max_relative = 1e-10
        );
    }
}

#[test]
fn raw_realization_is_twice_the_grid_length() {
    let grid = test_grid(25);
    let power = vec![2.0; 25];
    let mut rng = ChaChaRng::seed_from_u64(1);

    let y = timeseries_from_power_spectrum(&grid, &power, &mut rng).unwrap();
    assert_eq!(y.len(), 50);
    assert!(y.iter().all(|v| v.is_finite()));
}

#[test]
fn same_seed_same_realization() {
    let grid = test_grid(32);
    let power = vec![1.0; 32];

    let a = synthesize(&grid, &power, 40, &mut ChaChaRng::seed_from_u64(9)).unwrap();
    let b = synthesize(&grid, &power, 40, &mut ChaChaRng::seed_from_u64(9)).unwrap();
    let c = synthesize(&grid, &power, 40, &mut ChaChaRng::seed_from_u64(10)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn normalisation_reports_the_pre_scaling_ratio() {
    let grid = test_grid(4);
    let power = vec![1.0; 4];
    let target = integrated_power(&grid, &power);

    let mut y = vec![3.0 * target.sqrt(); 8];
    let ratio = normalise_timeseries(&grid, &power, &mut y).unwrap();

    assert_relative_eq!(ratio, 9.0, max_relative = 1e-12);
    assert_relative_eq!(mean_square(&y), target, max_relative = 1e-12);
}

#[test]
fn too_many_samples_for_the_grid() {
    let grid = test_grid(10);
    let power = vec![1.0; 10];
    let mut rng = ChaChaRng::seed_from_u64(3);

    assert!(synthesize(&grid, &power, 20, &mut rng).is_ok());
    assert_eq!(
        synthesize(&grid, &power, 21, &mut rng),
        Err(SpectralError::InsufficientBins {
            bins: 10,
            requested: 21
        })
    );
}

#[test]
fn power_must_match_the_grid_and_be_usable() {
    let grid = test_grid(10);
    let mut rng = ChaChaRng::seed_from_u64(3);

    assert_eq!(
        synthesize(&grid, &[1.0; 9], 5, &mut rng),
        Err(SpectralError::PowerLengthMismatch {
            expected: 10,
            actual: 9
        })
    );

    let mut negative = vec![1.0; 10];
    negative[4] = -1.0;
    assert!(matches!(
        synthesize(&grid, &negative, 5, &mut rng),
        Err(SpectralError::InvalidPower(_))
    ));

    let mut not_finite = vec![1.0; 10];
    not_finite[0] = f64::NAN;
    assert!(matches!(
        synthesize(&grid, &not_finite, 5, &mut rng),
        Err(SpectralError::InvalidPower(_))
    ));
}

#[test]
fn granulation_realization_is_in_velocity_units() {
    let psd = GranulationPsd::new(
        Velocity::from_meters_per_sec(1.5),
        Time::from_hours(2.0),
        GranulationShape::Kallinger,
    )
    .unwrap();
    let times: Vec<f64> = (0..300).map(|i| i as f64 / 96.0).collect();
    let config = FrequencyGridConfig::default();
    let mut rng = ChaChaRng::seed_from_u64(11);

    let y = realize(&psd, &times, &config, &mut rng).unwrap();
    assert_eq!(y.len(), times.len());

    let grid = FrequencyGrid::for_times(&times, &config).unwrap();
    let expected = integrated_power(&grid, &psd.evaluate(&grid));
    assert_relative_eq!(mean_square(&y), expected, max_relative = 1e-9);
}

#[test]
fn oscillation_realization_applies_the_microhertz_correction() {
    let psd = OscillationPsd::new(
        1.0,
        Frequency::from_microhertz(200.0),
        Frequency::from_microhertz(3000.0),
        OscillationProfile::Lorentzian,
    )
    .unwrap();
    // Two-minute cadence over a few hours, Nyquist well above numax
    let times: Vec<f64> = (0..200).map(|i| i as f64 * 2.0 / 1440.0).collect();
    let config = FrequencyGridConfig::default();
    let mut rng = ChaChaRng::seed_from_u64(5);

    let y = realize(&psd, &times, &config, &mut rng).unwrap();

    let grid = FrequencyGrid::for_times(&times, &config).unwrap();
    let expected = 1e6 * integrated_power(&grid, &psd.evaluate(&grid));
    assert_relative_eq!(mean_square(&y), expected, max_relative = 1e-9);
}

#[test]
fn realize_rejects_a_single_epoch() {
    let psd = GranulationPsd::new(
        Velocity::from_meters_per_sec(1.0),
        Time::from_hours(1.0),
        GranulationShape::Harvey,
    )
    .unwrap();
    let mut rng = ChaChaRng::seed_from_u64(0);
    assert!(matches!(
        realize(&psd, &[5.0], &FrequencyGridConfig::default(), &mut rng),
        Err(SpectralError::DegenerateSeries(_))
    ));
}

#[test]
fn powerless_spectrum_realizes_as_zeros() {
    let grid = test_grid(10);
    let mut rng = ChaChaRng::seed_from_u64(3);

    let y = synthesize(&grid, &[0.0; 10], 5, &mut rng).unwrap();
    assert_eq!(y, vec![0.0; 5]);

    let mut series = vec![0.3, -1.2, 0.4];
    let ratio = normalise_timeseries(&grid, &[0.0; 10], &mut series).unwrap();
    assert_eq!(ratio, 0.0);
    assert_eq!(series, vec![0.0; 3]);
}
