//! Vehicle body and the resolved car handed to the simulator.

use crate::error::{DrivetrainError, DrivetrainResult};
use crate::powertrain::Powertrain;
use crate::tire::{DrivetrainLayout, TireProfile};
use qm_core::numeric::{ensure_non_negative, ensure_positive};
use qm_core::units::{Area, Length, Mass};

/// Chassis, aero and tire parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub mass: Mass,
    /// Drag coefficient × frontal area
    pub drag_area: Area,
    pub wheel_radius: Length,
    /// Rolling-resistance coefficient (dimensionless)
    pub rolling_resistance: f64,
    pub tire: TireProfile,
    pub drivetrain: DrivetrainLayout,
}

impl Vehicle {
    pub fn validate(&self) -> DrivetrainResult<()> {
        ensure_positive(self.mass.value, "vehicle mass")?;
        ensure_non_negative(self.drag_area.value, "drag area (CdA)")?;
        ensure_positive(self.wheel_radius.value, "wheel radius")?;
        ensure_non_negative(self.rolling_resistance, "rolling resistance coefficient")?;
        self.tire.validate()?;
        self.drivetrain.validate()?;
        Ok(())
    }
}

/// A fully resolved car. Nothing in the simulator mutates one.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub name: String,
    pub vehicle: Vehicle,
    pub powertrain: Powertrain,
}

impl Car {
    /// Build and validate in one go.
    pub fn new(
        name: impl Into<String>,
        vehicle: Vehicle,
        powertrain: Powertrain,
    ) -> DrivetrainResult<Self> {
        let car = Self {
            name: name.into(),
            vehicle,
            powertrain,
        };
        car.validate()?;
        Ok(car)
    }

    /// Check every structural invariant the force model relies on.
    pub fn validate(&self) -> DrivetrainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DrivetrainError::InvalidConfiguration {
                what: "car name must not be empty".to_string(),
            });
        }
        self.vehicle.validate()?;
        self.powertrain.validate()?;
        Ok(())
    }

    pub fn is_ice(&self) -> bool {
        matches!(self.powertrain, Powertrain::Ice(_))
    }
}
