//! Run driver: step a car from standstill until it covers the target distance.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, RunState};
use crate::trace::{Trace, TraceSample};
use qm_core::numeric::ensure_positive;
use qm_core::units::constants::QUARTER_MILE_M;
use qm_core::units::{mps, to_kph};
use qm_drivetrain::Car;
use tracing::{debug, warn};

/// Options for a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Distance to cover (meters)
    pub distance_target: f64,
    /// Simulated-time ceiling (seconds)
    pub max_time_s: f64,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.01,
            distance_target: QUARTER_MILE_M,
            max_time_s: 60.0,
            record_every: 1,
        }
    }
}

impl SimOptions {
    /// Quarter mile with the given step.
    pub fn quarter_mile(dt: f64) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.dt, "dt")?;
        ensure_positive(self.distance_target, "distance target")?;
        ensure_positive(self.max_time_s, "max time")?;
        if self.record_every == 0 {
            return Err(SimError::InvalidConfiguration {
                what: "record_every must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Step budget implied by the time ceiling.
    pub fn max_steps(&self) -> usize {
        (self.max_time_s / self.dt).ceil() as usize
    }
}

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub car_name: String,
    /// Elapsed time at the target distance (s)
    pub elapsed_time_s: f64,
    /// Speed at the target distance (m/s)
    pub trap_speed_mps: f64,
    pub shift_count: usize,
    pub steps: usize,
    pub trace: Trace,
}

impl Outcome {
    pub fn trap_speed_kph(&self) -> f64 {
        to_kph(mps(self.trap_speed_mps))
    }
}

/// Simulate `car` from standstill over `opts.distance_target`.
///
/// Fails before stepping on invalid options or an invalid car, and with
/// [`SimError::NonTerminatingRun`] if the time ceiling is reached first.
pub fn simulate(car: &Car, opts: &SimOptions) -> SimResult<Outcome> {
    opts.validate()?;
    car.validate()?;

    let euler = ForwardEuler::new(opts.dt);
    let mut state = RunState::launch(car);
    let mut trace = Trace {
        samples: vec![state.launch_sample()],
    };

    let max_steps = opts.max_steps();
    let mut step = 0;
    while step < max_steps {
        let (t0, x0, v0) = (state.time_s, state.distance_m, state.speed_mps);
        let sample = euler.step(car, &mut state);
        step += 1;

        if state.distance_m >= opts.distance_target {
            let frac = (opts.distance_target - x0) / (state.distance_m - x0);
            let elapsed_time_s = t0 + frac * (state.time_s - t0);
            let trap_speed_mps = v0 + frac * (state.speed_mps - v0);
            trace.samples.push(sample);

            debug!(
                car = %car.name,
                steps = step,
                elapsed_time_s,
                trap_speed_mps,
                shifts = state.shift_count(),
                "run finished"
            );
            return Ok(Outcome {
                car_name: car.name.clone(),
                elapsed_time_s,
                trap_speed_mps,
                shift_count: state.shift_count(),
                steps: step,
                trace,
            });
        }

        record(&mut trace, sample, step, opts.record_every);
    }

    warn!(
        car = %car.name,
        time_s = state.time_s,
        distance_m = state.distance_m,
        target_m = opts.distance_target,
        "time ceiling reached before target distance"
    );
    Err(SimError::NonTerminatingRun {
        time_s: state.time_s,
        distance_m: state.distance_m,
        target_m: opts.distance_target,
    })
}

/// Standing quarter mile with default options and the given step.
pub fn simulate_quarter_mile(car: &Car, dt: f64) -> SimResult<Outcome> {
    simulate(car, &SimOptions::quarter_mile(dt))
}

fn record(trace: &mut Trace, sample: TraceSample, step: usize, record_every: usize) {
    if step % record_every == 0 {
        trace.samples.push(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 0.01);
        assert_eq!(opts.distance_target, 402.336);
        assert_eq!(opts.max_time_s, 60.0);
        assert_eq!(opts.record_every, 1);
        assert_eq!(opts.max_steps(), 6000);
    }

    #[test]
    fn sim_options_invalid() {
        let bad = [
            SimOptions {
                dt: 0.0,
                ..SimOptions::default()
            },
            SimOptions {
                dt: f64::NAN,
                ..SimOptions::default()
            },
            SimOptions {
                distance_target: 0.0,
                ..SimOptions::default()
            },
            SimOptions {
                max_time_s: -1.0,
                ..SimOptions::default()
            },
            SimOptions {
                record_every: 0,
                ..SimOptions::default()
            },
        ];
        for opts in bad {
            assert!(
                matches!(opts.validate(), Err(SimError::InvalidConfiguration { .. })),
                "{opts:?} accepted"
            );
        }
    }

    #[test]
    fn trap_speed_in_kph() {
        let outcome = Outcome {
            car_name: "x".to_string(),
            elapsed_time_s: 10.0,
            trap_speed_mps: 50.0,
            shift_count: 0,
            steps: 1000,
            trace: Trace::default(),
        };
        assert!((outcome.trap_speed_kph() - 180.0).abs() < 1e-12);
    }
}
