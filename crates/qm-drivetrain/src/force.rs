//! Longitudinal force balance at the driven wheels.
//!
//! ```text
//! F_net = min(T_wheel / r, μ · m · g · k_drive) - ½ ρ CdA v² - C_rr · m · g
//! ```
//!
//! where `T_wheel` is source torque × ratio chain × efficiency chain. Every
//! function here is pure; drive cuts during a gear change are applied by the caller
//! through [`ForceBreakdown::with_drive_cut`].

use crate::vehicle::Car;
use qm_core::units::constants::{G_MPS2, RHO_AIR_KG_M3, RPM_PER_RAD_S};

/// Every intermediate of one force evaluation, for tracing and plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBreakdown {
    pub wheel_rpm: f64,
    /// Engine or motor speed
    pub source_rpm: f64,
    pub source_torque_nm: f64,
    /// Torque at the wheels before traction limiting
    pub wheel_torque_nm: f64,
    pub raw_drive_n: f64,
    pub traction_limit_n: f64,
    /// Drive force after the traction cap
    pub drive_n: f64,
    pub drag_n: f64,
    pub rolling_n: f64,
    pub net_n: f64,
}

impl ForceBreakdown {
    /// True when the tires, not the powertrain, set the drive force.
    pub fn traction_limited(&self) -> bool {
        self.raw_drive_n > self.traction_limit_n
    }

    /// Same resistances with no torque reaching the wheels (clutch open).
    pub fn with_drive_cut(self) -> Self {
        Self {
            source_torque_nm: 0.0,
            wheel_torque_nm: 0.0,
            raw_drive_n: 0.0,
            drive_n: 0.0,
            net_n: -self.drag_n - self.rolling_n,
            ..self
        }
    }

    pub fn acceleration(&self, mass_kg: f64) -> f64 {
        self.net_n / mass_kg
    }
}

/// Wheel speed in rpm for a road speed.
pub fn wheel_rpm(speed_mps: f64, wheel_radius_m: f64) -> f64 {
    speed_mps / wheel_radius_m * RPM_PER_RAD_S
}

/// Maximum tractive force the tires can transmit.
pub fn traction_limit(car: &Car) -> f64 {
    let v = &car.vehicle;
    v.tire.traction_coefficient() * v.mass.value * G_MPS2 * v.drivetrain.drive_factor
}

pub fn aero_drag(car: &Car, speed_mps: f64) -> f64 {
    0.5 * RHO_AIR_KG_M3 * car.vehicle.drag_area.value * speed_mps * speed_mps
}

/// Constant rolling resistance.
pub fn rolling_resistance(car: &Car) -> f64 {
    car.vehicle.rolling_resistance * car.vehicle.mass.value * G_MPS2
}

/// Source rpm for `speed_mps` in `gear`, as used for shift decisions.
pub fn source_rpm(car: &Car, speed_mps: f64, gear: usize) -> f64 {
    let wheel = wheel_rpm(speed_mps, car.vehicle.wheel_radius.value);
    car.powertrain.source_rpm(wheel, speed_mps, gear)
}

/// Evaluate the full force balance at `speed_mps`.
///
/// `gear` is the 0-based gear index; single-speed drives ignore it. The car must
/// have passed [`Car::validate`].
pub fn evaluate(car: &Car, speed_mps: f64, gear: usize) -> ForceBreakdown {
    let radius = car.vehicle.wheel_radius.value;
    let pt = &car.powertrain;

    let wheel_rpm = wheel_rpm(speed_mps, radius);
    let source_rpm = pt.source_rpm(wheel_rpm, speed_mps, gear);
    let source_torque_nm = pt.torque_curve().torque_at(source_rpm);

    let wheel_torque_nm = source_torque_nm * pt.ratio_chain(gear) * pt.efficiency().total();
    let raw_drive_n = wheel_torque_nm / radius;

    let traction_limit_n = traction_limit(car);
    let drive_n = raw_drive_n.min(traction_limit_n);

    let drag_n = aero_drag(car, speed_mps);
    let rolling_n = rolling_resistance(car);

    ForceBreakdown {
        wheel_rpm,
        source_rpm,
        source_torque_nm,
        wheel_torque_nm,
        raw_drive_n,
        traction_limit_n,
        drive_n,
        drag_n,
        rolling_n,
        net_n: drive_n - drag_n - rolling_n,
    }
}
