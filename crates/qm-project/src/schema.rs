//! Race file schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaceFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub settings: RaceSettings,
    #[serde(default)]
    pub cars: Vec<CarDef>,
}

impl RaceFile {
    pub fn car(&self, id: &str) -> Option<&CarDef> {
        self.cars.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaceSettings {
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    #[serde(default = "default_distance_m")]
    pub distance_m: f64,
    #[serde(default = "default_max_time_s")]
    pub max_time_s: f64,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            dt_s: default_dt_s(),
            distance_m: default_distance_m(),
            max_time_s: default_max_time_s(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarDef {
    pub id: String,
    /// Display name; the id is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vehicle: VehicleDef,
    pub powertrain: PowertrainDef,
}

impl CarDef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleDef {
    pub mass_kg: f64,
    pub cda_m2: f64,
    #[serde(default = "default_wheel_radius_m")]
    pub wheel_radius_m: f64,
    #[serde(default = "default_rolling_resistance")]
    pub rolling_resistance: f64,
    pub tire: TireDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TireDef {
    pub width_mm: f64,
    #[serde(default)]
    pub compound: CompoundDef,
    #[serde(default = "default_base_mu")]
    pub base_mu: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompoundDef {
    AllSeason,
    #[default]
    Summer,
    Track,
    DragRadial,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AxlesDef {
    #[serde(rename = "RWD", alias = "rwd")]
    Rwd,
    #[serde(rename = "AWD", alias = "awd")]
    Awd,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PowertrainDef {
    #[serde(rename = "ICE")]
    Ice {
        driving_axles: AxlesDef,
        engine: EngineDef,
        #[serde(default)]
        gearbox: GearboxDef,
        #[serde(default)]
        efficiency: IceEfficiencyDef,
    },
    #[serde(rename = "BEV")]
    Bev {
        driving_axles: AxlesDef,
        motor: MotorDef,
        #[serde(default = "default_reduction_ratio")]
        reduction_ratio: f64,
        #[serde(default)]
        efficiency: BevEfficiencyDef,
    },
}

impl PowertrainDef {
    pub fn driving_axles(&self) -> AxlesDef {
        match self {
            PowertrainDef::Ice { driving_axles, .. } | PowertrainDef::Bev { driving_axles, .. } => {
                *driving_axles
            }
        }
    }

    pub fn torque_curve(&self) -> &[[f64; 2]] {
        match self {
            PowertrainDef::Ice { engine, .. } => &engine.torque_curve_rpm_nm,
            PowertrainDef::Bev { motor, .. } => &motor.torque_curve_rpm_nm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDef {
    /// `[rpm, torque_nm]` pairs, ascending rpm
    pub torque_curve_rpm_nm: Vec<[f64; 2]>,
    #[serde(default = "default_engine_min_rpm")]
    pub min_rpm: f64,
    #[serde(default = "default_engine_max_rpm")]
    pub max_rpm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GearboxDef {
    #[serde(rename = "type", default)]
    pub kind: GearboxTypeDef,
    #[serde(default = "default_gear_ratios")]
    pub gear_ratios: Vec<f64>,
    #[serde(default = "default_final_drive")]
    pub final_drive: f64,
    /// Defaults to the engine's `min_rpm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_rpm: Option<f64>,
    /// Defaults to the engine's `max_rpm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_rpm: Option<f64>,
    #[serde(default = "default_shift_time_s")]
    pub shift_time_s: f64,
}

impl Default for GearboxDef {
    fn default() -> Self {
        Self {
            kind: GearboxTypeDef::default(),
            gear_ratios: default_gear_ratios(),
            final_drive: default_final_drive(),
            launch_rpm: None,
            shift_rpm: None,
            shift_time_s: default_shift_time_s(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GearboxTypeDef {
    #[serde(rename = "manual")]
    Manual,
    #[default]
    #[serde(rename = "auto", alias = "automatic")]
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IceEfficiencyDef {
    #[serde(default = "default_engine_efficiency")]
    pub engine: f64,
    #[serde(default = "default_ice_driveline_efficiency")]
    pub driveline: f64,
}

impl Default for IceEfficiencyDef {
    fn default() -> Self {
        Self {
            engine: default_engine_efficiency(),
            driveline: default_ice_driveline_efficiency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorDef {
    /// `[rpm, torque_nm]` pairs, ascending rpm
    pub torque_curve_rpm_nm: Vec<[f64; 2]>,
    #[serde(default = "default_motor_max_rpm")]
    pub max_rpm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BevEfficiencyDef {
    #[serde(default = "default_motor_efficiency")]
    pub motor: f64,
    #[serde(default = "default_inverter_efficiency")]
    pub inverter: f64,
    #[serde(default = "default_bev_driveline_efficiency")]
    pub driveline: f64,
}

impl Default for BevEfficiencyDef {
    fn default() -> Self {
        Self {
            motor: default_motor_efficiency(),
            inverter: default_inverter_efficiency(),
            driveline: default_bev_driveline_efficiency(),
        }
    }
}

fn default_dt_s() -> f64 {
    0.01
}

fn default_distance_m() -> f64 {
    qm_core::units::constants::QUARTER_MILE_M
}

fn default_max_time_s() -> f64 {
    60.0
}

fn default_wheel_radius_m() -> f64 {
    0.34
}

fn default_rolling_resistance() -> f64 {
    0.015
}

fn default_base_mu() -> f64 {
    1.05
}

fn default_engine_min_rpm() -> f64 {
    900.0
}

fn default_engine_max_rpm() -> f64 {
    7000.0
}

fn default_gear_ratios() -> Vec<f64> {
    vec![3.0, 2.0, 1.4, 1.0]
}

fn default_final_drive() -> f64 {
    3.5
}

fn default_shift_time_s() -> f64 {
    0.30
}

fn default_engine_efficiency() -> f64 {
    0.36
}

fn default_ice_driveline_efficiency() -> f64 {
    0.90
}

fn default_reduction_ratio() -> f64 {
    9.0
}

fn default_motor_max_rpm() -> f64 {
    18000.0
}

fn default_motor_efficiency() -> f64 {
    0.92
}

fn default_inverter_efficiency() -> f64 {
    0.96
}

fn default_bev_driveline_efficiency() -> f64 {
    1.0
}
