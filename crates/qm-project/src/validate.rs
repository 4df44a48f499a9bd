//! Race file validation logic.
//!
//! Checks what can be judged from the file alone. Physical consistency of each
//! car (positive ratios, efficiencies in range, shift above launch rpm) is
//! enforced again when the car is resolved.

use crate::schema::{CarDef, PowertrainDef, RaceFile, RaceSettings, VehicleDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_race(race: &RaceFile) -> Result<(), ValidationError> {
    if race.version == 0 || race.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: race.version,
        });
    }

    validate_settings(&race.settings)?;

    if race.cars.is_empty() {
        return Err(invalid("cars", "[]", "at least one car is required"));
    }

    let mut ids = HashSet::new();
    for car in &race.cars {
        if car.id.trim().is_empty() {
            return Err(invalid("car.id", "\"\"", "must not be empty"));
        }
        if !ids.insert(car.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: car.id.clone(),
                context: "cars".to_string(),
            });
        }
        validate_car(car)?;
    }

    Ok(())
}

/// Check that every requested id names a car in the file.
pub fn validate_selection(race: &RaceFile, ids: &[String]) -> Result<(), ValidationError> {
    for id in ids {
        if race.car(id).is_none() {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: "car selection".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_settings(settings: &RaceSettings) -> Result<(), ValidationError> {
    positive("settings.dt_s", settings.dt_s)?;
    positive("settings.distance_m", settings.distance_m)?;
    positive("settings.max_time_s", settings.max_time_s)?;
    Ok(())
}

fn validate_car(car: &CarDef) -> Result<(), ValidationError> {
    let ctx = |field: &str| format!("cars[{}].{}", car.id, field);

    validate_vehicle(&car.vehicle, &ctx)?;

    let curve = car.powertrain.torque_curve();
    if curve.is_empty() {
        return Err(invalid(
            &ctx("torque_curve_rpm_nm"),
            "[]",
            "at least one point is required",
        ));
    }
    for w in curve.windows(2) {
        if w[1][0] <= w[0][0] {
            return Err(invalid(
                &ctx("torque_curve_rpm_nm"),
                &format!("{} after {}", w[1][0], w[0][0]),
                "rpm must be strictly increasing",
            ));
        }
    }

    match &car.powertrain {
        PowertrainDef::Ice {
            engine, gearbox, ..
        } => {
            if gearbox.gear_ratios.is_empty() {
                return Err(invalid(
                    &ctx("gearbox.gear_ratios"),
                    "[]",
                    "at least one gear is required",
                ));
            }
            if engine.max_rpm <= engine.min_rpm {
                return Err(invalid(
                    &ctx("engine.max_rpm"),
                    &engine.max_rpm.to_string(),
                    "must exceed min_rpm",
                ));
            }
            non_negative(&ctx("gearbox.shift_time_s"), gearbox.shift_time_s)?;
        }
        PowertrainDef::Bev {
            motor,
            reduction_ratio,
            ..
        } => {
            positive(&ctx("reduction_ratio"), *reduction_ratio)?;
            positive(&ctx("motor.max_rpm"), motor.max_rpm)?;
        }
    }

    Ok(())
}

fn validate_vehicle(
    vehicle: &VehicleDef,
    ctx: &dyn Fn(&str) -> String,
) -> Result<(), ValidationError> {
    positive(&ctx("vehicle.mass_kg"), vehicle.mass_kg)?;
    non_negative(&ctx("vehicle.cda_m2"), vehicle.cda_m2)?;
    positive(&ctx("vehicle.wheel_radius_m"), vehicle.wheel_radius_m)?;
    non_negative(&ctx("vehicle.rolling_resistance"), vehicle.rolling_resistance)?;
    positive(&ctx("vehicle.tire.width_mm"), vehicle.tire.width_mm)?;
    positive(&ctx("vehicle.tire.base_mu"), vehicle.tire.base_mu)?;
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be non-negative"))
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
