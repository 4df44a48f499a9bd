//! Turn race file definitions into simulator-ready cars.

use crate::schema::{AxlesDef, CarDef, CompoundDef, GearboxTypeDef, PowertrainDef, RaceFile};
use crate::{ProjectError, ProjectResult};
use qm_core::units::{kg, m, m2, mm};
use qm_drivetrain::{
    BevPowertrain, Car, DrivenAxles, DrivetrainLayout, EfficiencyChain, GearboxKind,
    IcePowertrain, Powertrain, TireCompound, TireProfile, TorqueCurve, Vehicle,
};

/// Empirical grip adjustments applied during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct GripPolicy {
    /// Width at which the width multiplier is 1.0 (mm)
    pub reference_width_mm: f64,
    pub width_exponent: f64,
    pub width_min: f64,
    pub width_max: f64,
    pub all_season: f64,
    pub summer: f64,
    pub track: f64,
    pub drag_radial: f64,
    pub rwd_drive_factor: f64,
    pub awd_drive_factor: f64,
}

impl Default for GripPolicy {
    fn default() -> Self {
        Self {
            reference_width_mm: 245.0,
            width_exponent: 0.30,
            width_min: 0.90,
            width_max: 1.18,
            all_season: 0.95,
            summer: 1.00,
            track: 1.08,
            drag_radial: 1.15,
            rwd_drive_factor: DrivenAxles::Rwd.default_drive_factor(),
            awd_drive_factor: DrivenAxles::Awd.default_drive_factor(),
        }
    }
}

impl GripPolicy {
    /// `(width / reference)^exponent`, clamped.
    pub fn width_multiplier(&self, width_mm: f64) -> f64 {
        (width_mm / self.reference_width_mm)
            .powf(self.width_exponent)
            .clamp(self.width_min, self.width_max)
    }

    pub fn compound_multiplier(&self, compound: TireCompound) -> f64 {
        match compound {
            TireCompound::AllSeason => self.all_season,
            TireCompound::Summer => self.summer,
            TireCompound::Track => self.track,
            TireCompound::DragRadial => self.drag_radial,
        }
    }

    pub fn drive_factor(&self, axles: DrivenAxles) -> f64 {
        match axles {
            DrivenAxles::Rwd => self.rwd_drive_factor,
            DrivenAxles::Awd => self.awd_drive_factor,
        }
    }
}

impl From<CompoundDef> for TireCompound {
    fn from(def: CompoundDef) -> Self {
        match def {
            CompoundDef::AllSeason => TireCompound::AllSeason,
            CompoundDef::Summer => TireCompound::Summer,
            CompoundDef::Track => TireCompound::Track,
            CompoundDef::DragRadial => TireCompound::DragRadial,
        }
    }
}

impl From<AxlesDef> for DrivenAxles {
    fn from(def: AxlesDef) -> Self {
        match def {
            AxlesDef::Rwd => DrivenAxles::Rwd,
            AxlesDef::Awd => DrivenAxles::Awd,
        }
    }
}

impl From<GearboxTypeDef> for GearboxKind {
    fn from(def: GearboxTypeDef) -> Self {
        match def {
            GearboxTypeDef::Manual => GearboxKind::Manual,
            GearboxTypeDef::Auto => GearboxKind::Automatic,
        }
    }
}

/// Build a validated [`Car`] from its definition.
pub fn resolve_car(def: &CarDef, policy: &GripPolicy) -> ProjectResult<Car> {
    let wrap = |source| ProjectError::Car {
        id: def.id.clone(),
        source,
    };

    let vd = &def.vehicle;
    let compound = TireCompound::from(vd.tire.compound);
    let axles = DrivenAxles::from(def.powertrain.driving_axles());

    let vehicle = Vehicle {
        mass: kg(vd.mass_kg),
        drag_area: m2(vd.cda_m2),
        wheel_radius: m(vd.wheel_radius_m),
        rolling_resistance: vd.rolling_resistance,
        tire: TireProfile {
            width: mm(vd.tire.width_mm),
            compound,
            base_mu: vd.tire.base_mu,
            width_multiplier: policy.width_multiplier(vd.tire.width_mm),
            compound_multiplier: policy.compound_multiplier(compound),
        },
        drivetrain: DrivetrainLayout {
            axles,
            drive_factor: policy.drive_factor(axles),
        },
    };

    let curve = TorqueCurve::from_pairs(def.powertrain.torque_curve()).map_err(wrap)?;

    let powertrain = match &def.powertrain {
        PowertrainDef::Ice {
            engine,
            gearbox,
            efficiency,
            ..
        } => Powertrain::Ice(IcePowertrain {
            torque_curve: curve,
            idle_rpm: engine.min_rpm,
            redline_rpm: engine.max_rpm,
            gear_ratios: gearbox.gear_ratios.clone(),
            final_drive: gearbox.final_drive,
            launch_rpm: gearbox.launch_rpm.unwrap_or(engine.min_rpm),
            shift_rpm: gearbox.shift_rpm.unwrap_or(engine.max_rpm),
            shift_time_s: gearbox.shift_time_s,
            gearbox: gearbox.kind.into(),
            efficiency: EfficiencyChain::new(efficiency.engine, efficiency.driveline),
        }),
        PowertrainDef::Bev {
            motor,
            reduction_ratio,
            efficiency,
            ..
        } => Powertrain::Bev(BevPowertrain {
            torque_curve: curve,
            reduction_ratio: *reduction_ratio,
            max_rpm: Some(motor.max_rpm),
            efficiency: EfficiencyChain::new(
                efficiency.motor * efficiency.inverter,
                efficiency.driveline,
            ),
        }),
    };

    Car::new(def.display_name(), vehicle, powertrain).map_err(wrap)
}

/// Resolve every car in file order with the default [`GripPolicy`].
pub fn resolve_cars(race: &RaceFile) -> ProjectResult<Vec<Car>> {
    let policy = GripPolicy::default();
    race.cars
        .iter()
        .map(|def| resolve_car(def, &policy))
        .collect()
}
