use approx::assert_abs_diff_eq;
use units::{Time, Velocity};

use crate::component::SignalComponent;
use crate::composite::CompositeSignal;
use crate::error::SignalError;
use crate::noise::WhiteNoise;
use crate::planet::Planet;
use crate::random_state::Draw;
use crate::sampling::SamplingContext;
use crate::trend::{Offset, Slope};

fn planet(p: f64, k: f64) -> Planet {
    Planet::builder()
        .period(Time::from_days(p))
        .semi_amplitude(Velocity::from_meters_per_sec(k))
        .eccentricity(0.1)
        .argument_of_periastron(0.3)
        .time_of_periastron(Time::zero())
        .build()
        .unwrap()
}

fn noise(seed: u64) -> WhiteNoise {
    WhiteNoise::from_sd(Velocity::from_meters_per_sec(0.7))
        .unwrap()
        .with_seed(seed)
}

fn offset(value: f64) -> Offset {
    Offset::new(Velocity::from_meters_per_sec(value))
}

#[test]
fn sum_is_elementwise() {
    let times: Vec<f64> = (0..30).map(|i| 0.37 * i as f64).collect();

    let mut sum = planet(3.0, 2.0) + noise(5);
    let total = sum.sample(&times).unwrap().values().unwrap();

    let a = planet(3.0, 2.0).sample(&times).unwrap().values().unwrap();
    let b = noise(5).sample(&times).unwrap().values().unwrap();

    for i in 0..times.len() {
        assert_abs_diff_eq!(total[i], a[i] + b[i], epsilon = 1e-12);
    }
}

#[test]
fn components_walk_right_then_left_spine() {
    let sum = offset(1.0) + Slope::new(2.0) + planet(5.0, 1.0);
    let labels: Vec<String> = sum.components().iter().map(|c| c.to_string()).collect();

    assert_eq!(
        labels,
        vec![
            planet(5.0, 1.0).to_string(),
            Slope::new(2.0).to_string(),
            offset(1.0).to_string(),
        ]
    );
}

#[test]
fn display_stacks_terms() {
    let sum = offset(1.0) + Slope::new(0.5);
    assert_eq!(sum.to_string(), "Offset(1.00 m/s) \n+ Slope(0.50 m/s/day)");
    assert_eq!(
        sum.condensed(),
        "Offset(1.00 m/s) + Slope(0.50 m/s/day)"
    );
}

#[test]
fn sampling_without_times_or_context_fails() {
    let mut sum = offset(1.0) + offset(2.0);
    let err = sum.sample_attached(Draw::Replay).unwrap_err();
    assert!(matches!(err, SignalError::MissingInput(_)));
    assert!(sum.sample_or_attached(None, Draw::Replay).is_err());
    assert!(sum.sample_or_attached(Some(&[0.0][..]), Draw::Replay).is_ok());
}

#[test]
fn context_of_a_child_is_authoritative() {
    let mut a = offset(1.0);
    a.set_sampling(SamplingContext::new(vec![1.0, 2.0, 4.0]).unwrap());

    let mut sum = a + Slope::new(1.0);
    let series = sum.sample_attached(Draw::Replay).unwrap();

    assert_eq!(&*series.times, &[1.0, 2.0, 4.0]);
    assert_eq!(series.samples.values().unwrap(), vec![1.0, 2.0, 4.0]);

    // A context set on the sum overrides the child's
    sum.set_sampling(SamplingContext::new(vec![0.0, 10.0]).unwrap());
    let series = sum.sample_attached(Draw::Replay).unwrap();
    assert_eq!(series.samples.values().unwrap(), vec![1.0, 11.0]);
}

#[test]
fn grid_planet_broadcasts_against_single_rows() {
    let sweep = Planet::builder()
        .periods(vec![Time::from_days(2.0), Time::from_days(6.0)])
        .semi_amplitude(Velocity::from_meters_per_sec(1.0))
        .eccentricity(0.0)
        .argument_of_periastron(0.0)
        .time_of_periastron(Time::zero())
        .build()
        .unwrap();
    let times = [0.0, 1.0, 1.5];

    let mut sum = sweep.clone() + offset(10.0);
    let total = sum.sample(&times).unwrap();
    let rv = sweep.rv(&times).unwrap();

    assert_eq!(total.n_realizations(), 2);
    for row in 0..2 {
        let expected: Vec<f64> = rv.row(row).unwrap().iter().map(|v| v + 10.0).collect();
        assert_eq!(total.row(row).unwrap(), expected);
    }
}

#[test]
fn mismatched_grids_do_not_add() {
    let sweep = |n: usize| {
        Planet::builder()
            .periods((1..=n).map(|i| Time::from_days(i as f64 + 1.0)).collect())
            .semi_amplitude(Velocity::from_meters_per_sec(1.0))
            .eccentricity(0.0)
            .build()
            .unwrap()
    };
    let mut sum = sweep(2) + sweep(3);
    assert!(sum.sample(&[0.0, 1.0]).unwrap_err().is_configuration());
}

#[test]
fn shortest_period_spans_the_tree() {
    let sum = planet(12.0, 1.0) + noise(1) + planet(4.5, 1.0) + offset(0.0);
    assert_eq!(sum.shortest_period(), Some(4.5));
    assert_eq!((offset(0.0) + Slope::new(1.0)).shortest_period(), None);
}

#[test]
fn nested_sums_are_sampled_whole() {
    let times = [0.0, 1.0, 2.0];
    let inner = offset(1.0) + offset(2.0);
    let mut sum = CompositeSignal::new(Slope::new(1.0), inner);

    assert_eq!(sum.components().len(), 2);
    assert_eq!(
        sum.sample(&times).unwrap().values().unwrap(),
        vec![3.0, 4.0, 5.0]
    );
}
