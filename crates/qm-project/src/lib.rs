//! qm-project: race file format, validation and car resolution.

pub mod resolve;
pub mod schema;
pub mod validate;

pub use resolve::{GripPolicy, resolve_car, resolve_cars};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_race, validate_selection};

use qm_drivetrain::DrivetrainError;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Car '{id}': {source}")]
    Car {
        id: String,
        #[source]
        source: DrivetrainError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<RaceFile> {
    let content = std::fs::read_to_string(path)?;
    let race: RaceFile = serde_yaml::from_str(&content)?;
    validate_race(&race)?;
    Ok(race)
}

pub fn save_yaml(path: &std::path::Path, race: &RaceFile) -> ProjectResult<()> {
    validate_race(race)?;
    let content = serde_yaml::to_string(race)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<RaceFile> {
    let content = std::fs::read_to_string(path)?;
    let race: RaceFile = serde_json::from_str(&content)?;
    validate_race(&race)?;
    Ok(race)
}

pub fn save_json(path: &std::path::Path, race: &RaceFile) -> ProjectResult<()> {
    validate_race(race)?;
    let content = serde_json::to_string_pretty(race)?;
    std::fs::write(path, content)?;
    Ok(())
}
