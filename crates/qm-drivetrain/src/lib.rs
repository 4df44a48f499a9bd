//! qm-drivetrain: car model and force balance for straight-line acceleration.
//!
//! Provides:
//! - Piecewise-linear torque curves with endpoint clamping
//! - Tire grip and driven-axle traction budget
//! - ICE (stepped gearbox) and BEV (single reduction) powertrains
//! - The traction-limited force balance evaluated by the simulator each step
//!
//! Everything here is immutable data plus pure functions; the stateful parts
//! (gear, shift timer, kinematics) live in `qm-sim`.
//!
//! # Example
//!
//! ```
//! use qm_drivetrain::{
//!     BevPowertrain, Car, DrivetrainLayout, EfficiencyChain, Powertrain, TireCompound,
//!     TireProfile, TorqueCurve, Vehicle, force,
//! };
//! use qm_core::units::{kg, m, m2, mm};
//!
//! let car = Car::new(
//!     "ev",
//!     Vehicle {
//!         mass: kg(2000.0),
//!         drag_area: m2(0.24),
//!         wheel_radius: m(0.33),
//!         rolling_resistance: 0.01,
//!         tire: TireProfile {
//!             width: mm(245.0),
//!             compound: TireCompound::Summer,
//!             base_mu: 1.0,
//!             width_multiplier: 1.0,
//!             compound_multiplier: 1.0,
//!         },
//!         drivetrain: DrivetrainLayout::awd(),
//!     },
//!     Powertrain::Bev(BevPowertrain {
//!         torque_curve: TorqueCurve::flat(400.0).unwrap(),
//!         reduction_ratio: 9.0,
//!         max_rpm: None,
//!         efficiency: EfficiencyChain::new(1.0, 1.0),
//!     }),
//! )
//! .unwrap();
//!
//! let f = force::evaluate(&car, 10.0, 0);
//! assert!(f.net_n > 0.0);
//! ```

pub mod curve;
pub mod error;
pub mod force;
pub mod powertrain;
pub mod tire;
pub mod vehicle;

// Re-exports
pub use curve::TorqueCurve;
pub use error::{DrivetrainError, DrivetrainResult};
pub use force::ForceBreakdown;
pub use powertrain::{
    BevPowertrain, EfficiencyChain, GearboxKind, IcePowertrain, LAUNCH_SPEED_MPS, Powertrain,
};
pub use tire::{DrivenAxles, DrivetrainLayout, TireCompound, TireProfile};
pub use vehicle::{Car, Vehicle};
