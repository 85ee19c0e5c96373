//! Stochastic realizations of a power spectral density.
//!
//! Each frequency bin gets independent Gaussian real and imaginary parts with
//! variance `power·bw/2` each; an inverse real FFT of length `2·bins` turns
//! that one-sided spectrum into a time series. The result is then rescaled so
//! its mean square equals the integrated PSD `Σ power·bw` exactly, which makes
//! the amplitude independent of the transform length.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rustfft::{num_complex::Complex64, FftPlanner};
use tracing::debug;

use crate::error::{SpectralError, SpectralResult};
use crate::grid::{FrequencyGrid, FrequencyGridConfig};
use crate::psd::PowerSpectrum;

/// Raw (unnormalized) realization of length `2·grid.len()`.
///
/// # Arguments
/// * `grid` - Uniform frequency grid (Hz)
/// * `power` - PSD value at every grid frequency
/// * `rng` - Source of the Gaussian draws
pub fn timeseries_from_power_spectrum<R: Rng + ?Sized>(
    grid: &FrequencyGrid,
    power: &[f64],
    rng: &mut R,
) -> SpectralResult<Vec<f64>> {
    check_power(grid, power)?;

    let bins = grid.len();
    let bw = grid.bin_width();
    let scale: Vec<f64> = power.iter().map(|p| (p * bw / 2.0).sqrt()).collect();

    let real: Vec<f64> = scale
        .iter()
        .map(|s| s * standard_normal(rng))
        .collect();
    let imag: Vec<f64> = scale
        .iter()
        .map(|s| s * standard_normal(rng))
        .collect();

    Ok(inverse_real_fft(&real, &imag, 2 * bins)
        .into_iter()
        .map(|y| y * bins as f64)
        .collect())
}

/// Inverse FFT of a one-sided spectrum to `n` real samples, normalized by 1/n.
///
/// Bin 0 is treated as the zero-frequency term (its imaginary part dropped)
/// and bins beyond the supplied ones, including Nyquist, are zero.
fn inverse_real_fft(real: &[f64], imag: &[f64], n: usize) -> Vec<f64> {
    let mut buffer = vec![Complex64::new(0.0, 0.0); n];
    let half = n / 2;

    for (j, (&re, &im)) in real.iter().zip(imag).enumerate().take(half) {
        if j == 0 {
            buffer[0] = Complex64::new(re, 0.0);
        } else {
            buffer[j] = Complex64::new(re, im);
            buffer[n - j] = Complex64::new(re, -im);
        }
    }

    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);

    let norm = 1.0 / n as f64;
    buffer.iter().map(|c| c.re * norm).collect()
}

/// Rescale `y` in place so that mean(y²) = Σ power·bw.
///
/// Returns the ratio mean(y²) / Σ power·bw measured before rescaling. A PSD
/// with no power on the grid zeroes the series and reports a ratio of 0.
pub fn normalise_timeseries(
    grid: &FrequencyGrid,
    power: &[f64],
    y: &mut [f64],
) -> SpectralResult<f64> {
    check_power(grid, power)?;
    if y.is_empty() {
        return Err(SpectralError::DegenerateSeries("empty series".into()));
    }

    let rhs = integrated_power(grid, power);
    if rhs == 0.0 {
        y.fill(0.0);
        debug!("no power on the grid, realization is flat");
        return Ok(0.0);
    }

    let lhs = y.iter().map(|v| v * v).sum::<f64>() / y.len() as f64;
    let ratio = lhs / rhs;

    if ratio > 0.0 {
        let amplitude = ratio.sqrt();
        y.iter_mut().for_each(|v| *v /= amplitude);
    }
    debug!(lhs, rhs, ratio, "normalised realization");
    Ok(ratio)
}

/// Σ power·bw: the variance implied by the PSD on this grid
pub fn integrated_power(grid: &FrequencyGrid, power: &[f64]) -> f64 {
    power.iter().sum::<f64>() * grid.bin_width()
}

/// A normalized realization of `samples` points.
pub fn synthesize<R: Rng + ?Sized>(
    grid: &FrequencyGrid,
    power: &[f64],
    samples: usize,
    rng: &mut R,
) -> SpectralResult<Vec<f64>> {
    if samples == 0 {
        return Err(SpectralError::DegenerateSeries(
            "requested an empty realization".into(),
        ));
    }
    if samples > 2 * grid.len() {
        return Err(SpectralError::InsufficientBins {
            bins: grid.len(),
            requested: samples,
        });
    }

    check_power(grid, power)?;
    if integrated_power(grid, power) == 0.0 {
        // e.g. a narrow envelope the cadence cannot resolve
        return Ok(vec![0.0; samples]);
    }

    let mut y = timeseries_from_power_spectrum(grid, power, rng)?;
    y.truncate(samples);
    normalise_timeseries(grid, power, &mut y)?;
    Ok(y)
}

/// Realization of `psd` at the given times (days), in m/s.
///
/// Builds a frequency grid from the times, synthesizes, then applies the
/// PSD's unit correction so the series is in velocity units whatever the
/// power axis of the model.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
/// use spectral::{realize, FrequencyGridConfig, GranulationPsd, GranulationShape};
/// use units::{Time, Velocity};
///
/// let psd = GranulationPsd::new(
///     Velocity::from_meters_per_sec(1.0),
///     Time::from_hours(2.0),
///     GranulationShape::Kallinger,
/// )
/// .unwrap();
/// let times: Vec<f64> = (0..100).map(|i| i as f64 * 0.01).collect();
///
/// let mut rng = ChaChaRng::seed_from_u64(7);
/// let y = realize(&psd, &times, &FrequencyGridConfig::default(), &mut rng).unwrap();
/// assert_eq!(y.len(), times.len());
/// ```
pub fn realize<P, R>(
    psd: &P,
    times: &[f64],
    config: &FrequencyGridConfig,
    rng: &mut R,
) -> SpectralResult<Vec<f64>>
where
    P: PowerSpectrum + ?Sized,
    R: Rng + ?Sized,
{
    let grid = FrequencyGrid::for_times(times, config)?;
    let power = psd.evaluate(&grid);
    let correction = psd.power_unit().amplitude_correction();

    let y = synthesize(&grid, &power, times.len(), rng)?;
    Ok(y.into_iter().map(|v| v * correction).collect())
}

fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

fn check_power(grid: &FrequencyGrid, power: &[f64]) -> SpectralResult<()> {
    if power.len() != grid.len() {
        return Err(SpectralError::PowerLengthMismatch {
            expected: grid.len(),
            actual: power.len(),
        });
    }
    if power.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(SpectralError::InvalidPower(
            "power must be finite and non-negative".into(),
        ));
    }
    Ok(())
}
