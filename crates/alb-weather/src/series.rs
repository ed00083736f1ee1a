//! Weather time-series parsing.
//!
//! The weather file carries two site-metadata lines that are not part of
//! the tabular data, then a comma-separated header row and one row per
//! hour. Columns are located by header name so column order is free.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{WeatherError, WeatherResult};

/// Number of non-tabular metadata lines at the top of a weather file.
pub(crate) const METADATA_LINES: usize = 2;

/// Header name of the writable albedo column.
pub(crate) const ALBEDO_COLUMN: &str = "Alb";

/// One hourly weather observation.
#[derive(Clone, Copy, Debug)]
pub struct WeatherRow {
    pub apparent_zenith_deg: f64,
    pub zenith_deg: f64,
    pub azimuth_deg: f64,
    pub dni: f64,
    pub dhi: f64,
    pub ghi: f64,
    /// Barometric pressure as reported (mbar).
    pub pressure_mbar: f64,
    pub albedo: f64,
}

/// Ordered hourly weather rows loaded from a weather file.
#[derive(Clone, Debug)]
pub struct WeatherSeries {
    rows: Vec<WeatherRow>,
}

impl WeatherSeries {
    pub fn load(path: &Path) -> WeatherResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> WeatherResult<Self> {
        let mut lines = content.lines();
        for i in 0..METADATA_LINES {
            lines.next().ok_or_else(|| WeatherError::DataFormat {
                what: format!("missing metadata line {}", i + 1),
            })?;
        }
        let header = lines.next().ok_or_else(|| WeatherError::DataFormat {
            what: "missing column header line".to_string(),
        })?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();

        let find = |name: &str| -> WeatherResult<usize> {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| WeatherError::DataFormat {
                    what: format!("missing column '{name}'"),
                })
        };

        let idx_apparent_zenith = find("apparent_zenith")?;
        let idx_zenith = find("zenith")?;
        let idx_azimuth = find("azimuth")?;
        let idx_dni = find("dni")?;
        let idx_dhi = find("dhi")?;
        let idx_ghi = find("ghi")?;
        let idx_pressure = find("pressure")?;
        let idx_albedo = find(ALBEDO_COLUMN)?;

        let mut rows = Vec::new();
        for (line_no, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            let field = |idx: usize| -> WeatherResult<f64> {
                let raw = fields.get(idx).ok_or_else(|| WeatherError::DataFormat {
                    what: format!("row {}: missing field {}", line_no + 1, idx),
                })?;
                raw.trim().parse().map_err(|_| WeatherError::DataFormat {
                    what: format!("row {}: non-numeric value '{}'", line_no + 1, raw.trim()),
                })
            };

            rows.push(WeatherRow {
                apparent_zenith_deg: field(idx_apparent_zenith)?,
                zenith_deg: field(idx_zenith)?,
                azimuth_deg: field(idx_azimuth)?,
                dni: field(idx_dni)?,
                dhi: field(idx_dhi)?,
                ghi: field(idx_ghi)?,
                pressure_mbar: field(idx_pressure)?,
                albedo: field(idx_albedo)?,
            });
        }

        debug!(rows = rows.len(), "parsed weather series");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[WeatherRow] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&WeatherRow> {
        self.rows.get(idx)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
site,52.42,13.52
source,synthetic,hourly
timestamp,ghi,dni,dhi,zenith,apparent_zenith,azimuth,pressure,Alb
2019-11-01 00:00,0,0,0,120.1,120.4,12.0,1013.2,0.2
2019-11-01 01:00,350,420,180,48.0,48.2,165.0,1012.8,0.2
";

    #[test]
    fn parses_columns_by_name() {
        let series = WeatherSeries::parse(SAMPLE).unwrap();
        assert_eq!(series.len(), 2);
        let row = series.row(1).unwrap();
        assert_eq!(row.ghi, 350.0);
        assert_eq!(row.dni, 420.0);
        assert_eq!(row.dhi, 180.0);
        assert_eq!(row.zenith_deg, 48.0);
        assert_eq!(row.apparent_zenith_deg, 48.2);
        assert_eq!(row.pressure_mbar, 1012.8);
        assert_eq!(row.albedo, 0.2);
    }

    #[test]
    fn missing_column_is_a_format_error() {
        let content = SAMPLE.replace(",Alb", ",Albedo");
        let err = WeatherSeries::parse(&content).unwrap_err();
        assert!(matches!(err, WeatherError::DataFormat { .. }));
    }

    #[test]
    fn non_numeric_field_is_a_format_error() {
        let content = SAMPLE.replace("1012.8", "n/a");
        let err = WeatherSeries::parse(&content).unwrap_err();
        assert!(matches!(err, WeatherError::DataFormat { .. }));
    }

    #[test]
    fn truncated_file_is_a_format_error() {
        let err = WeatherSeries::parse("only one line\n").unwrap_err();
        assert!(matches!(err, WeatherError::DataFormat { .. }));
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let content = format!("{SAMPLE}\n\n");
        let series = WeatherSeries::parse(&content).unwrap();
        assert_eq!(series.len(), 2);
    }
}
