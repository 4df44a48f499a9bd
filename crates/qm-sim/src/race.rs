//! Run a field of cars side by side.

use crate::error::SimResult;
use crate::sim::{Outcome, SimOptions, simulate};
use qm_drivetrain::Car;
use rayon::prelude::*;

/// One lane of a race.
#[derive(Debug, Clone)]
pub struct RaceEntry {
    pub name: String,
    pub result: SimResult<Outcome>,
}

/// All lanes, in the order the cars were given.
#[derive(Debug, Clone, Default)]
pub struct RaceResult {
    pub entries: Vec<RaceEntry>,
}

impl RaceResult {
    /// Lowest elapsed time among finishers. Ties go to the earlier lane.
    pub fn winner(&self) -> Option<&Outcome> {
        self.finishers().fold(None, |best: Option<&Outcome>, o| match best {
            Some(b) if b.elapsed_time_s <= o.elapsed_time_s => Some(b),
            _ => Some(o),
        })
    }

    pub fn finishers(&self) -> impl Iterator<Item = &Outcome> {
        self.entries.iter().filter_map(|e| e.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RaceEntry> {
        self.entries.iter().filter(|e| e.result.is_err())
    }
}

/// Simulate every car with the same options. Runs share nothing but `opts`.
pub fn race(cars: &[Car], opts: &SimOptions) -> RaceResult {
    let entries = cars
        .par_iter()
        .map(|car| RaceEntry {
            name: car.name.clone(),
            result: simulate(car, opts),
        })
        .collect();
    RaceResult { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::trace::Trace;

    fn finished(name: &str, et: f64) -> RaceEntry {
        RaceEntry {
            name: name.to_string(),
            result: Ok(Outcome {
                car_name: name.to_string(),
                elapsed_time_s: et,
                trap_speed_mps: 50.0,
                shift_count: 0,
                steps: 0,
                trace: Trace::default(),
            }),
        }
    }

    #[test]
    fn winner_is_lowest_time() {
        let result = RaceResult {
            entries: vec![
                finished("a", 12.1),
                RaceEntry {
                    name: "b".to_string(),
                    result: Err(SimError::NonTerminatingRun {
                        time_s: 60.0,
                        distance_m: 10.0,
                        target_m: 402.336,
                    }),
                },
                finished("c", 11.4),
                finished("d", 11.4),
            ],
        };
        assert_eq!(result.winner().map(|o| o.car_name.as_str()), Some("c"));
        assert_eq!(result.finishers().count(), 3);
        assert_eq!(result.failures().count(), 1);
    }

    #[test]
    fn empty_field_has_no_winner() {
        let result = race(&[], &SimOptions::default());
        assert!(result.entries.is_empty());
        assert!(result.winner().is_none());
    }
}
