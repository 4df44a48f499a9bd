//! Shared application service layer for qm.
//!
//! Frontends go through this crate for race file handling, race execution,
//! and result queries.

pub mod error;
pub mod project_service;
pub mod query;
pub mod race_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use project_service::{
    CarSummary, get_car, list_cars, load_project, save_project, summarize_car, validate_project,
};
pub use query::{SERIES_VARIABLES, extract_series, power_curve, race_summary_lines};
pub use race_service::{
    LaneResult, RaceRequest, RaceResponse, RaceTiming, SettingsOverride, run_loaded_race,
    run_race, sim_options,
};
