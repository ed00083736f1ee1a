//! Simulation configuration validation.

use crate::schema::{HourStamp, SimulationConfig};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn check(
    ok: bool,
    field: &'static str,
    value: impl ToString,
    reason: &'static str,
) -> Result<(), ValidationError> {
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field,
            value: value.to_string(),
            reason,
        })
    }
}

fn check_stamp(stamp: &HourStamp, field: &'static str) -> Result<(), ValidationError> {
    check(
        (1..=12).contains(&stamp.month),
        field,
        stamp.month,
        "month must be 1-12",
    )?;
    check(
        (1..=31).contains(&stamp.day),
        field,
        stamp.day,
        "day must be 1-31",
    )?;
    check(stamp.hour <= 23, field, stamp.hour, "hour must be 0-23")?;
    Ok(())
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let array = &config.array;
    check(
        array.row_count >= 1,
        "array.row_count",
        array.row_count,
        "must be at least 1",
    )?;
    check(
        array.hub_height_m > 0.0,
        "array.hub_height_m",
        array.hub_height_m,
        "must be positive",
    )?;
    check(
        array.row_width_m > 0.0,
        "array.row_width_m",
        array.row_width_m,
        "must be positive",
    )?;
    check(
        (0.0..=90.0).contains(&array.tilt_deg),
        "array.tilt_deg",
        array.tilt_deg,
        "must be in [0, 90]",
    )?;
    check(
        array.gcr > 0.0 && array.gcr <= 1.0,
        "array.gcr",
        array.gcr,
        "must be in (0, 1]",
    )?;
    check(
        array.ground_x_min_m < array.ground_x_max_m,
        "array.ground_x_min_m",
        array.ground_x_min_m,
        "ground span must be non-empty",
    )?;

    check(
        config.sensor.height_m > 0.0,
        "sensor.height_m",
        config.sensor.height_m,
        "must be positive",
    )?;
    check(
        config.sensor.dome_width_m > 0.0,
        "sensor.dome_width_m",
        config.sensor.dome_width_m,
        "must be positive",
    )?;

    let atmosphere = &config.atmosphere;
    check(
        (0.0..=1.0).contains(&atmosphere.ground_albedo),
        "atmosphere.ground_albedo",
        atmosphere.ground_albedo,
        "must be in [0, 1]",
    )?;
    check(
        atmosphere.precipitable_water_cm >= 0.0,
        "atmosphere.precipitable_water_cm",
        atmosphere.precipitable_water_cm,
        "must be non-negative",
    )?;
    check(
        atmosphere.ozone_atm_cm >= 0.0,
        "atmosphere.ozone_atm_cm",
        atmosphere.ozone_atm_cm,
        "must be non-negative",
    )?;
    check(
        atmosphere.aerosol_od_500nm >= 0.0,
        "atmosphere.aerosol_od_500nm",
        atmosphere.aerosol_od_500nm,
        "must be non-negative",
    )?;

    check_stamp(&config.window.start, "window.start")?;
    check_stamp(&config.window.end, "window.end")?;

    Ok(())
}
