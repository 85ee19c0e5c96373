use approx::assert_relative_eq;
use rand::distr::Uniform;
use rand_distr::Exp;
use units::Velocity;

use crate::component::SignalComponent;
use crate::noise::{DistributedNoise, WhiteNoise};
use crate::random_state::{Draw, RandomState};

fn times(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[test]
fn non_positive_scales_are_configuration_errors() {
    let ms = Velocity::from_meters_per_sec;
    assert!(WhiteNoise::from_sd(ms(0.0)).unwrap_err().is_configuration());
    assert!(WhiteNoise::from_sd(ms(-2.0)).unwrap_err().is_configuration());
    assert!(WhiteNoise::from_sd(ms(f64::NAN)).unwrap_err().is_configuration());
    assert!(WhiteNoise::from_variance(-1.0).unwrap_err().is_configuration());
    assert!(WhiteNoise::from_variance(0.0).unwrap_err().is_configuration());
}

#[test]
fn sd_and_variance_agree() {
    let noise = WhiteNoise::from_variance(4.0).unwrap();
    assert_relative_eq!(noise.sd().to_meters_per_sec(), 2.0);

    let default = WhiteNoise::default();
    assert_eq!(default.sd().to_meters_per_sec(), 1.0);
    assert_eq!(default.to_string(), "WhiteNoise(sigma=1.00)");
}

#[test]
fn replay_is_bit_identical_and_advance_moves_on() {
    let mut noise = WhiteNoise::default().with_seed(99);
    let t = times(20);

    let first = noise.sample_at(&t, Draw::Replay).unwrap();
    let again = noise.sample_at(&t, Draw::Replay).unwrap();
    assert_eq!(first, again);

    let next = noise.sample_at(&t, Draw::Advance).unwrap();
    let after = noise.sample_at(&t, Draw::Advance).unwrap();
    assert_ne!(first, next);
    assert_ne!(next, after);

    // Replay rewinds to the construction-time state whatever happened since
    assert_eq!(noise.sample_at(&t, Draw::Replay).unwrap(), first);
}

#[test]
fn separate_components_have_separate_generators() {
    let t = times(10);
    let mut a = WhiteNoise::default().with_seed(1);
    let mut b = WhiteNoise::default().with_seed(1);

    // Drawing from one never perturbs the other
    a.sample_at(&t, Draw::Advance).unwrap();
    a.sample_at(&t, Draw::Advance).unwrap();
    let from_b = b.sample_at(&t, Draw::Advance).unwrap();
    let from_fresh = WhiteNoise::default()
        .with_seed(1)
        .sample_at(&t, Draw::Advance)
        .unwrap();
    assert_eq!(from_b, from_fresh);
}

#[test]
fn white_noise_has_the_configured_spread() {
    let mut noise = WhiteNoise::from_sd(Velocity::from_meters_per_sec(2.0))
        .unwrap()
        .with_seed(7);
    let values = noise.sample(&times(20_000)).unwrap().values().unwrap();

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    assert!(mean.abs() < 0.05, "mean {mean}");
    assert_relative_eq!(variance, 4.0, max_relative = 0.05);
}

#[test]
fn distributed_noise_draws_from_its_distribution() {
    let uniform = Uniform::new(-3.0, -1.0).unwrap();
    let mut noise = DistributedNoise::new(uniform).with_seed(4);
    let t = times(500);

    let values = noise.sample(&t).unwrap().values().unwrap();
    assert!(values.iter().all(|v| (-3.0..-1.0).contains(v)));
    assert_eq!(noise.sample(&t).unwrap().values().unwrap(), values);
    assert!(noise.to_string().starts_with("DistributedNoise("));
}

#[test]
fn distribution_can_be_given_at_sample_time() {
    let mut noise = DistributedNoise::new(Uniform::new(0.0, 1.0).unwrap()).with_seed(4);
    let exp = Exp::new(0.5).unwrap();
    let t = times(200);

    let a = noise.sample_from(&t, &exp, Draw::Replay);
    let b = noise.sample_from(&t, &exp, Draw::Replay);
    assert_eq!(a, b);
    assert!(a.values().unwrap().iter().all(|v| *v >= 0.0));
    assert!(a.values().unwrap().iter().any(|v| *v > 1.0));
}

#[test]
fn random_state_keeps_its_seed() {
    let state = RandomState::from_seed(123);
    assert_eq!(state.seed(), 123);
    assert_ne!(
        RandomState::from_entropy().seed(),
        RandomState::from_entropy().seed()
    );
}
