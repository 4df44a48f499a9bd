//! Powertrain variants: multi-speed combustion and single-speed electric.

use crate::curve::TorqueCurve;
use crate::error::{DrivetrainError, DrivetrainResult};
use qm_core::numeric::{ensure_finite, ensure_non_negative, ensure_positive, ensure_unit_fraction};
use std::fmt;

/// Below this road speed the clutch is assumed to be slipping at launch rpm.
pub const LAUNCH_SPEED_MPS: f64 = 1.5;

/// How upshifts are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GearboxKind {
    /// Drive is cut for the configured shift duration.
    Manual,
    /// Gear changes between two steps with no torque interruption.
    Automatic,
}

impl fmt::Display for GearboxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GearboxKind::Manual => f.write_str("manual"),
            GearboxKind::Automatic => f.write_str("auto"),
        }
    }
}

/// Multiplicative losses between the torque source and the wheels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyChain {
    /// Engine efficiency, or combined motor × inverter efficiency
    pub source: f64,
    pub driveline: f64,
}

impl EfficiencyChain {
    pub fn new(source: f64, driveline: f64) -> Self {
        Self { source, driveline }
    }

    pub fn total(&self) -> f64 {
        self.source * self.driveline
    }

    pub fn validate(&self) -> DrivetrainResult<()> {
        ensure_unit_fraction(self.source, "source efficiency")?;
        ensure_unit_fraction(self.driveline, "driveline efficiency")?;
        Ok(())
    }
}

/// Internal-combustion engine behind a stepped gearbox.
#[derive(Debug, Clone, PartialEq)]
pub struct IcePowertrain {
    pub torque_curve: TorqueCurve,
    pub idle_rpm: f64,
    pub redline_rpm: f64,
    /// Ratios from first gear upward
    pub gear_ratios: Vec<f64>,
    pub final_drive: f64,
    pub launch_rpm: f64,
    pub shift_rpm: f64,
    pub shift_time_s: f64,
    pub gearbox: GearboxKind,
    pub efficiency: EfficiencyChain,
}

impl IcePowertrain {
    pub fn gear_count(&self) -> usize {
        self.gear_ratios.len()
    }

    /// Gear ratio × final drive. Out-of-range gears use the top gear.
    pub fn overall_ratio(&self, gear: usize) -> f64 {
        let idx = gear.min(self.gear_ratios.len().saturating_sub(1));
        self.gear_ratios[idx] * self.final_drive
    }

    pub fn has_next_gear(&self, gear: usize) -> bool {
        gear + 1 < self.gear_ratios.len()
    }

    /// Engine speed for a wheel speed, floored at launch/idle and capped at redline.
    pub fn engine_rpm(&self, wheel_rpm: f64, speed_mps: f64, gear: usize) -> f64 {
        let rpm = wheel_rpm * self.overall_ratio(gear);
        let floor = if speed_mps < LAUNCH_SPEED_MPS {
            self.launch_rpm
        } else {
            self.idle_rpm
        };
        rpm.max(floor).min(self.redline_rpm)
    }

    pub fn validate(&self) -> DrivetrainResult<()> {
        if self.gear_ratios.is_empty() {
            return Err(DrivetrainError::InvalidConfiguration {
                what: "ICE gearbox needs at least one gear ratio".to_string(),
            });
        }
        for (i, ratio) in self.gear_ratios.iter().enumerate() {
            if !(ratio.is_finite() && *ratio > 0.0) {
                return Err(DrivetrainError::InvalidConfiguration {
                    what: format!("gear {} ratio must be positive, got {}", i + 1, ratio),
                });
            }
        }
        ensure_positive(self.final_drive, "final drive ratio")?;
        ensure_non_negative(self.idle_rpm, "idle rpm")?;
        ensure_positive(self.redline_rpm, "redline rpm")?;
        ensure_finite(self.launch_rpm, "launch rpm")?;
        ensure_finite(self.shift_rpm, "shift rpm")?;
        ensure_non_negative(self.shift_time_s, "shift time")?;
        self.efficiency.validate()?;

        if self.redline_rpm <= self.idle_rpm {
            return Err(DrivetrainError::InvalidConfiguration {
                what: format!(
                    "redline rpm ({}) must exceed idle rpm ({})",
                    self.redline_rpm, self.idle_rpm
                ),
            });
        }
        // Otherwise the floors alone would trigger an upshift every step
        let floor = self.launch_rpm.max(self.idle_rpm);
        if self.shift_rpm <= floor {
            return Err(DrivetrainError::InvalidConfiguration {
                what: format!(
                    "shift rpm ({}) must exceed launch and idle rpm ({})",
                    self.shift_rpm, floor
                ),
            });
        }
        Ok(())
    }
}

/// Electric motor through a fixed reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct BevPowertrain {
    pub torque_curve: TorqueCurve,
    pub reduction_ratio: f64,
    /// Motor speed ceiling; `None` leaves the curve's own clamping in charge
    pub max_rpm: Option<f64>,
    pub efficiency: EfficiencyChain,
}

impl BevPowertrain {
    pub fn motor_rpm(&self, wheel_rpm: f64) -> f64 {
        let rpm = wheel_rpm * self.reduction_ratio;
        match self.max_rpm {
            Some(max) => rpm.min(max),
            None => rpm,
        }
    }

    pub fn validate(&self) -> DrivetrainResult<()> {
        ensure_positive(self.reduction_ratio, "reduction ratio")?;
        if let Some(max) = self.max_rpm {
            ensure_positive(max, "max motor rpm")?;
        }
        self.efficiency.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Powertrain {
    Ice(IcePowertrain),
    Bev(BevPowertrain),
}

impl Powertrain {
    pub fn torque_curve(&self) -> &TorqueCurve {
        match self {
            Powertrain::Ice(ice) => &ice.torque_curve,
            Powertrain::Bev(bev) => &bev.torque_curve,
        }
    }

    pub fn efficiency(&self) -> EfficiencyChain {
        match self {
            Powertrain::Ice(ice) => ice.efficiency,
            Powertrain::Bev(bev) => bev.efficiency,
        }
    }

    /// Ratio between source and wheel speed. `gear` is ignored by single-speed drives.
    pub fn ratio_chain(&self, gear: usize) -> f64 {
        match self {
            Powertrain::Ice(ice) => ice.overall_ratio(gear),
            Powertrain::Bev(bev) => bev.reduction_ratio,
        }
    }

    /// Engine or motor speed for the given wheel speed.
    pub fn source_rpm(&self, wheel_rpm: f64, speed_mps: f64, gear: usize) -> f64 {
        match self {
            Powertrain::Ice(ice) => ice.engine_rpm(wheel_rpm, speed_mps, gear),
            Powertrain::Bev(bev) => bev.motor_rpm(wheel_rpm),
        }
    }

    /// Highest rpm worth plotting for this source.
    pub fn max_rpm(&self) -> f64 {
        match self {
            Powertrain::Ice(ice) => ice.redline_rpm,
            Powertrain::Bev(bev) => bev
                .max_rpm
                .unwrap_or_else(|| bev.torque_curve.rpm_range().1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Powertrain::Ice(_) => "ICE",
            Powertrain::Bev(_) => "BEV",
        }
    }

    pub fn validate(&self) -> DrivetrainResult<()> {
        match self {
            Powertrain::Ice(ice) => ice.validate(),
            Powertrain::Bev(bev) => bev.validate(),
        }
    }
}
