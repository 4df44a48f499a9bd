//! Fixed-step semi-implicit Euler stepping of the run state.

use crate::gearbox::{GearboxState, ShiftEvent};
use crate::trace::TraceSample;
use qm_drivetrain::{Car, Powertrain, force};
use tracing::debug;

/// Mutable state of one run. Created per simulation call, never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub time_s: f64,
    pub distance_m: f64,
    pub speed_mps: f64,
    /// Present for stepped gearboxes only
    pub gearbox: Option<GearboxState>,
}

impl RunState {
    /// Standing start: everything zero, first gear.
    pub fn launch(car: &Car) -> Self {
        let gearbox = match car.powertrain {
            Powertrain::Ice(_) => Some(GearboxState::new()),
            Powertrain::Bev(_) => None,
        };
        Self {
            time_s: 0.0,
            distance_m: 0.0,
            speed_mps: 0.0,
            gearbox,
        }
    }

    /// Current 0-based gear; single-speed drives report 0.
    pub fn gear(&self) -> usize {
        self.gearbox.as_ref().map_or(0, |gb| gb.gear)
    }

    pub fn in_shift(&self) -> bool {
        self.gearbox.as_ref().is_some_and(|gb| gb.in_shift)
    }

    pub fn shift_count(&self) -> usize {
        self.gearbox.as_ref().map_or(0, |gb| gb.shift_count)
    }

    /// Snapshot of the launch state.
    pub fn launch_sample(&self) -> TraceSample {
        TraceSample {
            time_s: self.time_s,
            distance_m: self.distance_m,
            speed_mps: self.speed_mps,
            accel_mps2: 0.0,
            drive_force_n: 0.0,
            wheel_torque_nm: 0.0,
            source_rpm: 0.0,
            gear: self.gearbox.as_ref().map(|gb| gb.gear),
            in_shift: false,
            traction_limited: false,
        }
    }
}

/// Forward Euler on speed, distance advanced with the updated speed.
///
/// One force evaluation per step:
///
/// ```text
/// a      = F_net(v, gear) / m
/// v'     = max(0, v + a·dt)
/// x'     = x + v'·dt
/// ```
#[derive(Clone, Debug)]
pub struct ForwardEuler {
    pub dt: f64,
}

impl ForwardEuler {
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }

    /// Advance `state` by one step and return the sample describing it.
    ///
    /// The sample carries the gear and forces that acted during the step, with the
    /// kinematics at its end.
    pub fn step(&self, car: &Car, state: &mut RunState) -> TraceSample {
        let dt = self.dt;
        let gear = state.gear();
        let shifting = state.in_shift();

        let mut forces = force::evaluate(car, state.speed_mps, gear);
        if shifting {
            forces = forces.with_drive_cut();
        }
        let accel = forces.acceleration(car.vehicle.mass.value);

        state.speed_mps = (state.speed_mps + accel * dt).max(0.0);
        state.distance_m += state.speed_mps * dt;
        state.time_s += dt;

        if let (Some(gb), Powertrain::Ice(ice)) = (state.gearbox.as_mut(), &car.powertrain) {
            gb.advance_timer(dt);
            let rpm = force::source_rpm(car, state.speed_mps, gb.gear);
            if let Some(event) = gb.update(ice, rpm) {
                log_shift(&car.name, state.time_s, state.speed_mps, event);
            }
        }

        TraceSample {
            time_s: state.time_s,
            distance_m: state.distance_m,
            speed_mps: state.speed_mps,
            accel_mps2: accel,
            drive_force_n: forces.drive_n,
            wheel_torque_nm: forces.wheel_torque_nm,
            source_rpm: forces.source_rpm,
            gear: state.gearbox.as_ref().map(|_| gear),
            in_shift: shifting,
            traction_limited: forces.traction_limited(),
        }
    }
}

fn log_shift(car: &str, time_s: f64, speed_mps: f64, event: ShiftEvent) {
    match event {
        ShiftEvent::Started { from, to } => {
            debug!(car, time_s, speed_mps, from = from + 1, to = to + 1, "manual shift started")
        }
        ShiftEvent::Completed { gear } => {
            debug!(car, time_s, speed_mps, gear = gear + 1, "manual shift completed")
        }
        ShiftEvent::Instant { from, to } => {
            debug!(car, time_s, speed_mps, from = from + 1, to = to + 1, "automatic shift")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qm_core::units::{kg, m, m2, mm};
    use qm_drivetrain::{
        BevPowertrain, DrivetrainLayout, EfficiencyChain, TireCompound, TireProfile, TorqueCurve,
        Vehicle,
    };

    fn ev(torque_nm: f64) -> Car {
        Car::new(
            "ev",
            Vehicle {
                mass: kg(2000.0),
                drag_area: m2(0.24),
                wheel_radius: m(0.33),
                rolling_resistance: 0.01,
                tire: TireProfile {
                    width: mm(245.0),
                    compound: TireCompound::Summer,
                    base_mu: 1.0,
                    width_multiplier: 1.0,
                    compound_multiplier: 1.0,
                },
                drivetrain: DrivetrainLayout::awd(),
            },
            Powertrain::Bev(BevPowertrain {
                torque_curve: TorqueCurve::flat(torque_nm).unwrap(),
                reduction_ratio: 9.0,
                max_rpm: None,
                efficiency: EfficiencyChain::new(1.0, 1.0),
            }),
        )
        .unwrap()
    }

    #[test]
    fn launch_state_is_zeroed() {
        let car = ev(400.0);
        let state = RunState::launch(&car);
        assert_eq!(state.time_s, 0.0);
        assert_eq!(state.distance_m, 0.0);
        assert_eq!(state.speed_mps, 0.0);
        assert!(state.gearbox.is_none());
        assert_eq!(state.launch_sample().gear, None);
    }

    #[test]
    fn first_step_matches_hand_calculation() {
        let car = ev(400.0);
        let mut state = RunState::launch(&car);
        let euler = ForwardEuler::new(0.01);

        let sample = euler.step(&car, &mut state);

        let drive = 400.0 * 9.0 / 0.33;
        let rolling = 0.01 * 2000.0 * 9.81;
        let accel = (drive - rolling) / 2000.0;
        assert!((sample.accel_mps2 - accel).abs() < 1e-9);
        assert!((state.speed_mps - accel * 0.01).abs() < 1e-12);
        assert!((state.distance_m - accel * 0.01 * 0.01).abs() < 1e-12);
        assert!((state.time_s - 0.01).abs() < 1e-15);
    }

    #[test]
    fn speed_never_goes_negative() {
        // Too weak to overcome rolling resistance
        let car = ev(1.0);
        let mut state = RunState::launch(&car);
        let euler = ForwardEuler::new(0.01);
        for _ in 0..10 {
            let sample = euler.step(&car, &mut state);
            assert_eq!(sample.speed_mps, 0.0);
            assert_eq!(sample.distance_m, 0.0);
            assert!(sample.accel_mps2 < 0.0);
        }
    }
}
