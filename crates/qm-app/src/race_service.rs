//! Race execution service.

use std::path::Path;
use std::time::Instant;

use qm_project::schema::RaceFile;
use qm_project::{GripPolicy, resolve_car, validate_selection};
use qm_sim::{Outcome, SimOptions};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::project_service::{self, CarSummary};

/// Command-line style overrides of the file's run settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverride {
    pub dt_s: Option<f64>,
    pub distance_m: Option<f64>,
    pub max_time_s: Option<f64>,
}

/// Request to run a race from a file.
pub struct RaceRequest<'a> {
    pub project_path: &'a Path,
    /// Cars to race, by id; empty races the whole field
    pub car_ids: Vec<String>,
    pub overrides: SettingsOverride,
}

/// Wall-clock timing of a race.
#[derive(Debug, Clone, Default)]
pub struct RaceTiming {
    pub load_time_s: f64,
    pub resolve_time_s: f64,
    pub simulate_time_s: f64,
    pub total_time_s: f64,
}

/// One car's result.
#[derive(Debug, Clone)]
pub struct LaneResult {
    pub summary: CarSummary,
    /// Outcome, or the reason the car did not finish
    pub outcome: Result<Outcome, String>,
}

/// Response from a race execution.
#[derive(Debug, Clone)]
pub struct RaceResponse {
    pub race_name: String,
    pub options: SimOptions,
    pub lanes: Vec<LaneResult>,
    /// Id of the car with the lowest elapsed time
    pub winner: Option<String>,
    pub timing: RaceTiming,
}

impl RaceResponse {
    pub fn winner_lane(&self) -> Option<&LaneResult> {
        let id = self.winner.as_deref()?;
        self.lanes.iter().find(|l| l.summary.id == id)
    }
}

/// Load the race file and run the requested cars.
pub fn run_race(request: &RaceRequest) -> AppResult<RaceResponse> {
    let started = Instant::now();
    let race = project_service::load_project(request.project_path)?;
    let load_time_s = started.elapsed().as_secs_f64();

    let mut response = run_loaded_race(&race, &request.car_ids, &request.overrides)?;
    response.timing.load_time_s = load_time_s;
    response.timing.total_time_s = started.elapsed().as_secs_f64();
    Ok(response)
}

/// Run cars from an already loaded race file.
pub fn run_loaded_race(
    race: &RaceFile,
    car_ids: &[String],
    overrides: &SettingsOverride,
) -> AppResult<RaceResponse> {
    let started = Instant::now();
    validate_selection(race, car_ids)?;
    let options = sim_options(race, overrides);
    options.validate()?;

    let defs: Vec<_> = race
        .cars
        .iter()
        .filter(|c| car_ids.is_empty() || car_ids.iter().any(|id| *id == c.id))
        .collect();

    info!(
        race = %race.name,
        cars = defs.len(),
        dt_s = options.dt,
        distance_m = options.distance_target,
        "starting race"
    );

    let resolve_start = Instant::now();
    let policy = GripPolicy::default();
    let mut cars = Vec::with_capacity(defs.len());
    let mut pending = Vec::with_capacity(defs.len());
    for def in &defs {
        let summary = project_service::summarize_car(def);
        match resolve_car(def, &policy) {
            Ok(car) => {
                cars.push(car);
                pending.push((summary, None));
            }
            Err(e) => {
                warn!(car = %def.id, error = %e, "car could not be resolved");
                pending.push((summary, Some(e.to_string())));
            }
        }
    }
    let resolve_time_s = resolve_start.elapsed().as_secs_f64();

    let sim_start = Instant::now();
    let mut finished = qm_sim::race(&cars, &options).entries.into_iter();
    let simulate_time_s = sim_start.elapsed().as_secs_f64();

    let lanes: Vec<LaneResult> = pending
        .into_iter()
        .map(|(summary, resolve_error)| {
            // Race entries line up with the cars that resolved
            let outcome = match resolve_error {
                Some(msg) => Err(msg),
                None => match finished.next() {
                    Some(entry) => entry.result.map_err(|e| {
                        warn!(car = %summary.id, error = %e, "car did not finish");
                        e.to_string()
                    }),
                    None => Err("no result".to_string()),
                },
            };
            LaneResult { summary, outcome }
        })
        .collect();

    let winner = lanes
        .iter()
        .filter_map(|l| l.outcome.as_ref().ok().map(|o| (l, o.elapsed_time_s)))
        .fold(None::<(&LaneResult, f64)>, |best, (lane, et)| match best {
            Some((_, best_et)) if best_et <= et => best,
            _ => Some((lane, et)),
        })
        .map(|(lane, _)| lane.summary.id.clone());

    if let Some(id) = &winner {
        info!(race = %race.name, winner = %id, "race finished");
    } else {
        warn!(race = %race.name, "race finished without a finisher");
    }

    Ok(RaceResponse {
        race_name: race.name.clone(),
        options,
        lanes,
        winner,
        timing: RaceTiming {
            load_time_s: 0.0,
            resolve_time_s,
            simulate_time_s,
            total_time_s: started.elapsed().as_secs_f64(),
        },
    })
}

/// File settings with overrides applied.
pub fn sim_options(race: &RaceFile, overrides: &SettingsOverride) -> SimOptions {
    SimOptions {
        dt: overrides.dt_s.unwrap_or(race.settings.dt_s),
        distance_target: overrides.distance_m.unwrap_or(race.settings.distance_m),
        max_time_s: overrides.max_time_s.unwrap_or(race.settings.max_time_s),
        record_every: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qm_project::schema::RaceSettings;

    #[test]
    fn overrides_take_precedence() {
        let race = RaceFile {
            version: 1,
            name: "t".to_string(),
            settings: RaceSettings {
                dt_s: 0.01,
                distance_m: 402.336,
                max_time_s: 60.0,
            },
            cars: vec![],
        };
        let opts = sim_options(
            &race,
            &SettingsOverride {
                dt_s: Some(0.005),
                distance_m: None,
                max_time_s: Some(30.0),
            },
        );
        assert_eq!(opts.dt, 0.005);
        assert_eq!(opts.distance_target, 402.336);
        assert_eq!(opts.max_time_s, 30.0);
    }
}
