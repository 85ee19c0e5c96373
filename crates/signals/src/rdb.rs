//! Tab-separated RV tables (time, velocity, velocity error).
//!
//! The reader is lenient: `#` comments, separator rows such as `---` and
//! malformed rows are skipped. The writer emits the two-line `jdb/vrad/svrad`
//! header.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

use crate::error::{SignalError, SignalResult};

/// Substring marking header separator rows
const SEPARATOR_MARKER: &str = "--";

/// Parsed RV columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RvData {
    pub times: Vec<f64>,
    pub velocities: Vec<f64>,
    pub errors: Vec<f64>,
}

impl RvData {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Velocity unit of an exported table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityUnit {
    #[default]
    MetersPerSecond,
    KilometersPerSecond,
}

impl VelocityUnit {
    /// Multiplier from m/s
    pub fn factor(&self) -> f64 {
        match self {
            VelocityUnit::MetersPerSecond => 1.0,
            VelocityUnit::KilometersPerSecond => 1e-3,
        }
    }
}

pub fn read_rv_file(path: impl AsRef<Path>) -> SignalResult<RvData> {
    let file = File::open(path.as_ref())?;
    parse_rv(BufReader::new(file))
}

/// Parse the first three numeric columns of every data row.
pub fn parse_rv<R: BufRead>(reader: R) -> SignalResult<RvData> {
    let mut data = RvData::default();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(tokens) = data_tokens(&line) else {
            trace!(line = number + 1, "skipped non-data row");
            continue;
        };
        match parse_row(&tokens) {
            Some((t, v, e)) => {
                data.times.push(t);
                data.velocities.push(v);
                data.errors.push(e);
            }
            None => debug!(line = number + 1, "skipped malformed RV row"),
        }
    }
    Ok(data)
}

/// True when the data rows carry columns beyond time, RV and error.
///
/// The last data row decides.
pub fn has_extras(path: impl AsRef<Path>) -> SignalResult<bool> {
    let file = File::open(path.as_ref())?;
    has_extra_columns(BufReader::new(file))
}

pub fn has_extra_columns<R: BufRead>(reader: R) -> SignalResult<bool> {
    let mut columns = None;
    for line in reader.lines() {
        let line = line?;
        if let Some(tokens) = data_tokens(&line) {
            columns = Some(tokens.len());
        }
    }
    Ok(columns.is_some_and(|n| n > 3))
}

/// Tokens of a row that is neither a comment, blank nor a separator
fn data_tokens(line: &str) -> Option<Vec<&str>> {
    if line.starts_with('#') {
        return None;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.first() {
        Some(first) if !first.contains(SEPARATOR_MARKER) => Some(tokens),
        _ => None,
    }
}

fn parse_row(tokens: &[&str]) -> Option<(f64, f64, f64)> {
    match tokens {
        [t, v, e, ..] => Some((t.parse().ok()?, v.parse().ok()?, e.parse().ok()?)),
        _ => None,
    }
}

pub fn write_rv_file(
    path: impl AsRef<Path>,
    times: &[f64],
    velocities: &[f64],
    errors: &[f64],
    unit: VelocityUnit,
) -> SignalResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_rv(&mut writer, times, velocities, errors, unit)?;
    writer.flush()?;
    Ok(())
}

/// Write velocities (m/s) and their errors, converted to `unit`.
///
/// # Examples
///
/// ```
/// use signals::{write_rv, VelocityUnit};
///
/// let mut out = Vec::new();
/// write_rv(&mut out, &[1.0], &[2500.0], &[1.5], VelocityUnit::KilometersPerSecond).unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text, "jdb\tvrad\tsvrad\n---\t----\t-----\n1.000000\t2.50000\t0.00150\n");
/// ```
pub fn write_rv<W: Write>(
    writer: &mut W,
    times: &[f64],
    velocities: &[f64],
    errors: &[f64],
    unit: VelocityUnit,
) -> SignalResult<()> {
    if velocities.len() != times.len() || errors.len() != times.len() {
        return Err(SignalError::config(format!(
            "column lengths differ: {} times, {} velocities, {} errors",
            times.len(),
            velocities.len(),
            errors.len()
        )));
    }

    let factor = unit.factor();
    writeln!(writer, "jdb\tvrad\tsvrad")?;
    writeln!(writer, "---\t----\t-----")?;
    for ((t, v), e) in times.iter().zip(velocities).zip(errors) {
        writeln!(writer, "{:.6}\t{:.5}\t{:.5}", t, v * factor, e * factor)?;
    }
    Ok(())
}
