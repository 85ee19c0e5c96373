//! Build a synthetic RV data set and write it as a tab-separated table.
//!
//! ```text
//! RUST_LOG=signals=debug cargo run -p signals --example synthetic_star -- out.rdb
//! ```

use signals::{
    write_rv_file, Draw, Granulation, Planet, SamplingContext, SignalComponent, SignalResult,
    VelocityUnit, WhiteNoise,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use units::{Time, Velocity};

fn main() -> SignalResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "synthetic.rdb".into());

    let planet = Planet::builder()
        .period(Time::from_days(11.7))
        .semi_amplitude(Velocity::from_meters_per_sec(3.2))
        .eccentricity(0.15)
        .argument_of_periastron(2.0)
        .mean_longitude(0.7)
        .build()?;
    let granulation = Granulation::default().with_seed(11);
    let noise = WhiteNoise::from_sd(Velocity::from_meters_per_sec(0.8))?.with_seed(12);

    let mut signal = planet + granulation + noise;
    signal.set_sampling(SamplingContext::uniform(2_455_000.0, 2_455_120.0, 90)?);

    for component in signal.components() {
        info!(component = %component, "component");
    }

    let series = signal.sample_attached(Draw::Replay)?;
    let values = series.samples.values()?;
    let errors = vec![0.8; values.len()];
    write_rv_file(&output, &series.times, &values, &errors, VelocityUnit::KilometersPerSecond)?;

    info!(path = %output, nobs = values.len(), "wrote synthetic data set");
    Ok(())
}
