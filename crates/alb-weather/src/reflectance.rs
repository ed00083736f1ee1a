//! Spectral reflectance curve loading.

use std::fs;
use std::path::Path;

use crate::error::{WeatherError, WeatherResult};

/// Ordered reflectance values, one per wavelength band, aligned to the
/// spectral model's band axis starting at the 310 nm band.
#[derive(Clone, Debug)]
pub struct ReflectanceCurve {
    values: Vec<f64>,
}

impl ReflectanceCurve {
    /// Load from a semicolon-delimited table: one header row skipped, the
    /// second column read as the reflectance value.
    pub fn load(path: &Path) -> WeatherResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> WeatherResult<Self> {
        let mut values = Vec::new();
        for (line_no, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let raw = line
                .split(';')
                .nth(1)
                .ok_or_else(|| WeatherError::DataFormat {
                    what: format!("reflectance row {}: missing second column", line_no + 1),
                })?;
            let value: f64 = raw.trim().parse().map_err(|_| WeatherError::DataFormat {
                what: format!(
                    "reflectance row {}: non-numeric value '{}'",
                    line_no + 1,
                    raw.trim()
                ),
            })?;
            values.push(value);
        }
        if values.is_empty() {
            return Err(WeatherError::DataFormat {
                what: "reflectance table has no data rows".to_string(),
            });
        }
        Ok(Self { values })
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
