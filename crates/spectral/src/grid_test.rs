use approx::assert_relative_eq;
use units::Frequency;

use crate::error::SpectralError;
use crate::grid::{min_spacing, span, FrequencyGrid, FrequencyGridConfig};

#[test]
fn grid_from_times_spans_span_to_nyquist() {
    // 30 nights, one observation per night
    let times: Vec<f64> = (0..30).map(|i| 57_000.0 + i as f64).collect();
    let grid = FrequencyGrid::for_times(&times, &FrequencyGridConfig::default()).unwrap();

    let span_days = 29.0;
    assert_relative_eq!(grid.min_frequency().to_per_day(), 1.0 / span_days, max_relative = 1e-12);
    assert_relative_eq!(
        grid.bin_width(),
        Frequency::from_per_day(1.0 / (5.0 * span_days)).to_hertz(),
        max_relative = 1e-12
    );

    // Last bin sits on the Nyquist frequency of the nightly cadence
    assert_relative_eq!(grid.max_frequency().to_per_day(), 0.5, max_relative = 1e-2);
    assert!(2 * grid.len() >= times.len());
}

#[test]
fn grid_is_extended_to_cover_all_samples() {
    // Two tight clusters: min spacing is large relative to the count
    let times = [0.0, 1.0, 2.0];
    let grid = FrequencyGrid::for_times(&times, &FrequencyGridConfig::default()).unwrap();
    assert!(2 * grid.len() >= times.len());

    let frequencies = grid.frequencies();
    assert!(frequencies.windows(2).all(|w| w[1] > w[0]));
    assert!(frequencies[0] > 0.0);
}

#[test]
fn unsorted_times_give_the_same_grid() {
    let sorted = [0.0, 0.5, 1.25, 3.0, 4.0];
    let shuffled = [3.0, 0.0, 4.0, 1.25, 0.5];
    let config = FrequencyGridConfig::default();

    assert_eq!(
        FrequencyGrid::for_times(&sorted, &config).unwrap(),
        FrequencyGrid::for_times(&shuffled, &config).unwrap()
    );
}

#[test]
fn degenerate_series_are_rejected() {
    let config = FrequencyGridConfig::default();
    assert!(matches!(
        FrequencyGrid::for_times(&[1.0], &config),
        Err(SpectralError::DegenerateSeries(_))
    ));
    assert!(matches!(
        FrequencyGrid::for_times(&[2.0, 2.0, 2.0], &config),
        Err(SpectralError::DegenerateSeries(_))
    ));
    assert!(matches!(
        FrequencyGrid::for_times(&[], &config),
        Err(SpectralError::DegenerateSeries(_))
    ));
}

#[test]
fn invalid_samples_per_peak_is_a_configuration_error() {
    let config = FrequencyGridConfig {
        samples_per_peak: 0.0,
    };
    assert!(matches!(
        FrequencyGrid::for_times(&[0.0, 1.0, 2.0], &config),
        Err(SpectralError::Configuration(_))
    ));
}

#[test]
fn explicit_grid_validation() {
    let hz = Frequency::from_hertz;
    assert!(FrequencyGrid::new(hz(1e-6), hz(1e-6), 10).is_ok());
    assert!(matches!(
        FrequencyGrid::new(hz(0.0), hz(1e-6), 10),
        Err(SpectralError::InvalidGrid(_))
    ));
    assert!(matches!(
        FrequencyGrid::new(hz(1e-6), hz(-1e-6), 10),
        Err(SpectralError::InvalidGrid(_))
    ));
    assert!(matches!(
        FrequencyGrid::new(hz(1e-6), hz(1e-6), 0),
        Err(SpectralError::InvalidGrid(_))
    ));
}

#[test]
fn frequency_arrays_must_be_uniform() {
    let uniform = [1.0, 2.0, 3.0, 4.0];
    let grid = FrequencyGrid::from_frequencies(&uniform).unwrap();
    assert_eq!(grid.len(), 4);
    assert_relative_eq!(grid.bin_width(), 1.0);

    assert!(matches!(
        FrequencyGrid::from_frequencies(&[1.0, 2.0, 4.0]),
        Err(SpectralError::InvalidGrid(_))
    ));
    assert!(matches!(
        FrequencyGrid::from_frequencies(&[3.0, 2.0, 1.0]),
        Err(SpectralError::InvalidGrid(_))
    ));
    assert!(FrequencyGrid::from_frequencies(&[1.0]).is_err());
}

#[test]
fn span_and_spacing_helpers() {
    let times = [5.0, 1.0, 3.5, 3.0];
    assert_relative_eq!(span(&times).unwrap(), 4.0);
    assert_relative_eq!(min_spacing(&times).unwrap(), 0.5);
}
