//! Splicing the computed albedo column back into the weather file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{WeatherError, WeatherResult};
use crate::series::{ALBEDO_COLUMN, METADATA_LINES};

/// Sentinel written for weather rows past the end of the computed records.
pub const MISSING_ALBEDO: f64 = f64::NAN;

/// Replace the albedo column of a weather file with the computed values.
///
/// The first two metadata lines and every other column are preserved
/// verbatim. When fewer records than weather rows are supplied the tail is
/// padded with the missing sentinel; more records than rows is a
/// configuration inconsistency and fails without touching the file. The
/// rewrite goes through a sibling temp file and a rename, so a failure
/// never leaves a half-written weather file behind.
pub fn merge_albedo_column(weather_path: &Path, albedo: &[f64]) -> WeatherResult<()> {
    let content = fs::read_to_string(weather_path)?;
    let merged = merge_content(&content, albedo)?;

    let tmp_path = weather_path.with_extension("tmp");
    fs::write(&tmp_path, merged)?;
    fs::rename(&tmp_path, weather_path)?;

    info!(
        path = %weather_path.display(),
        records = albedo.len(),
        "merged albedo column into weather file"
    );
    Ok(())
}

fn merge_content(content: &str, albedo: &[f64]) -> WeatherResult<String> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < METADATA_LINES + 1 {
        return Err(WeatherError::DataFormat {
            what: "weather file too short for metadata and header lines".to_string(),
        });
    }

    let header = lines[METADATA_LINES];
    let albedo_idx = header
        .split(',')
        .map(str::trim)
        .position(|c| c == ALBEDO_COLUMN)
        .ok_or_else(|| WeatherError::DataFormat {
            what: format!("missing column '{ALBEDO_COLUMN}'"),
        })?;

    let data_lines: Vec<&str> = lines[METADATA_LINES + 1..]
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty())
        .collect();

    if albedo.len() > data_lines.len() {
        return Err(WeatherError::Alignment {
            records: albedo.len(),
            rows: data_lines.len(),
        });
    }

    let mut out = String::new();
    for line in &lines[..=METADATA_LINES] {
        out.push_str(line);
        out.push('\n');
    }

    for (i, line) in data_lines.iter().enumerate() {
        let value = albedo.get(i).copied().unwrap_or(MISSING_ALBEDO);
        let mut fields: Vec<String> = line.split(',').map(str::to_string).collect();
        if albedo_idx >= fields.len() {
            return Err(WeatherError::DataFormat {
                what: format!("row {}: fewer fields than header columns", i + 1),
            });
        }
        fields[albedo_idx] = format!("{value}");
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
site,52.42,13.52
source,synthetic,hourly
timestamp,ghi,Alb,pressure
2019-11-01 00:00,0,0.2,1013.2
2019-11-01 01:00,350,0.2,1012.8
2019-11-01 02:00,360,0.2,1012.5
";

    #[test]
    fn replaces_only_the_albedo_column() {
        let merged = merge_content(SAMPLE, &[0.31, 0.32, 0.33]).unwrap();
        let lines: Vec<&str> = merged.lines().collect();
        assert_eq!(lines[0], "site,52.42,13.52");
        assert_eq!(lines[1], "source,synthetic,hourly");
        assert_eq!(lines[2], "timestamp,ghi,Alb,pressure");
        assert_eq!(lines[3], "2019-11-01 00:00,0,0.31,1013.2");
        assert_eq!(lines[4], "2019-11-01 01:00,350,0.32,1012.8");
        assert_eq!(lines[5], "2019-11-01 02:00,360,0.33,1012.5");
    }

    #[test]
    fn short_records_pad_with_nan_sentinel() {
        let merged = merge_content(SAMPLE, &[0.31]).unwrap();
        let lines: Vec<&str> = merged.lines().collect();
        assert_eq!(lines[3], "2019-11-01 00:00,0,0.31,1013.2");
        let tail: Vec<&str> = lines[4..]
            .iter()
            .map(|l| l.split(',').nth(2).unwrap())
            .collect();
        assert_eq!(tail.len(), 2);
        assert!(tail.iter().all(|v| v.parse::<f64>().unwrap().is_nan()));
    }

    #[test]
    fn excess_records_are_an_alignment_error() {
        let err = merge_content(SAMPLE, &[0.1, 0.2, 0.3, 0.4]).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Alignment {
                records: 4,
                rows: 3
            }
        ));
    }

    #[test]
    fn merge_is_idempotent_on_column_content() {
        let records = [0.31, 0.32];
        let once = merge_content(SAMPLE, &records).unwrap();
        let twice = merge_content(&once, &records).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_albedo_column_is_a_format_error() {
        let content = SAMPLE.replace(",Alb,", ",Albedo,");
        assert!(matches!(
            merge_content(&content, &[0.1]).unwrap_err(),
            WeatherError::DataFormat { .. }
        ));
    }
}
