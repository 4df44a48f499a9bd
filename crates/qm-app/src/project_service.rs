//! Race file loading, saving, validation, and introspection.

use std::path::Path;

use qm_project::schema::{
    AxlesDef, CarDef, CompoundDef, GearboxTypeDef, PowertrainDef, RaceFile,
};
use qm_project::{GripPolicy, resolve_car};

use crate::error::{AppError, AppResult};

/// Summary of a car for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CarSummary {
    pub id: String,
    pub name: String,
    /// "ICE" or "BEV"
    pub powertrain: &'static str,
    /// "RWD" or "AWD"
    pub axles: &'static str,
    pub mass_kg: f64,
    /// e.g. "255mm summer"
    pub tire: String,
    /// e.g. "manual 6spd"; `None` for single-speed drives
    pub gearbox: Option<String>,
    pub peak_torque_nm: f64,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a race file. `.json` files are read as JSON, everything else as YAML.
pub fn load_project(path: &Path) -> AppResult<RaceFile> {
    if !path.exists() {
        return Err(AppError::RaceFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    let race = if is_json(path) {
        qm_project::load_json(path)?
    } else {
        qm_project::load_yaml(path)?
    };
    Ok(race)
}

/// Save a race file, format chosen by extension as in [`load_project`].
pub fn save_project(path: &Path, race: &RaceFile) -> AppResult<()> {
    if is_json(path) {
        qm_project::save_json(path, race)?;
    } else {
        qm_project::save_yaml(path, race)?;
    }
    Ok(())
}

/// File-level validation plus resolution of every car.
pub fn validate_project(race: &RaceFile) -> AppResult<()> {
    qm_project::validate_race(race)?;
    let policy = GripPolicy::default();
    for def in &race.cars {
        resolve_car(def, &policy).map_err(|e| AppError::Validation(e.to_string()))?;
    }
    Ok(())
}

/// List all cars in the race with summaries.
pub fn list_cars(race: &RaceFile) -> Vec<CarSummary> {
    race.cars.iter().map(summarize_car).collect()
}

/// Get a specific car by ID.
pub fn get_car<'a>(race: &'a RaceFile, car_id: &str) -> AppResult<&'a CarDef> {
    race.car(car_id)
        .ok_or_else(|| AppError::CarNotFound(car_id.to_string()))
}

/// Listing summary for one car definition.
pub fn summarize_car(def: &CarDef) -> CarSummary {
    let (powertrain, gearbox) = match &def.powertrain {
        PowertrainDef::Ice { gearbox, .. } => (
            "ICE",
            Some(format!(
                "{} {}spd",
                gearbox_label(gearbox.kind),
                gearbox.gear_ratios.len()
            )),
        ),
        PowertrainDef::Bev { .. } => ("BEV", None),
    };

    let tire = &def.vehicle.tire;
    CarSummary {
        id: def.id.clone(),
        name: def.display_name().to_string(),
        powertrain,
        axles: axles_label(def.powertrain.driving_axles()),
        mass_kg: def.vehicle.mass_kg,
        tire: format!("{:.0}mm {}", tire.width_mm, compound_label(tire.compound)),
        gearbox,
        peak_torque_nm: def
            .powertrain
            .torque_curve()
            .iter()
            .map(|p| p[1])
            .fold(0.0, f64::max),
    }
}

fn gearbox_label(kind: GearboxTypeDef) -> &'static str {
    match kind {
        GearboxTypeDef::Manual => "manual",
        GearboxTypeDef::Auto => "auto",
    }
}

fn axles_label(axles: AxlesDef) -> &'static str {
    match axles {
        AxlesDef::Rwd => "RWD",
        AxlesDef::Awd => "AWD",
    }
}

fn compound_label(compound: CompoundDef) -> &'static str {
    match compound {
        CompoundDef::AllSeason => "all_season",
        CompoundDef::Summer => "summer",
        CompoundDef::Track => "track",
        CompoundDef::DragRadial => "drag_radial",
    }
}
