// qm-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Area as UomArea, Force as UomForce, Length as UomLength,
    Mass as UomMass, MassDensity as UomMassDensity, Time as UomTime, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Area = UomArea;
pub type Density = UomMassDensity;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn newtons(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

/// Speed in km/h, for display.
#[inline]
pub fn to_kph(v: Velocity) -> f64 {
    use uom::si::velocity::kilometer_per_hour;
    v.get::<kilometer_per_hour>()
}

pub mod constants {
    use super::*;

    /// Gravitational acceleration used by the traction and rolling models.
    pub const G_MPS2: f64 = 9.81;

    /// Sea-level air density.
    pub const RHO_AIR_KG_M3: f64 = 1.225;

    /// Quarter mile in metres.
    pub const QUARTER_MILE_M: f64 = 402.336;

    /// rad/s -> rev/min
    pub const RPM_PER_RAD_S: f64 = 60.0 / (2.0 * core::f64::consts::PI);

    /// HP ≈ torque(Nm) × rpm / 7745
    pub const HP_TORQUE_RPM_DIVISOR: f64 = 7745.0;

    #[inline]
    pub fn g() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G_MPS2)
    }

    #[inline]
    pub fn rho_air() -> Density {
        use uom::si::mass_density::kilogram_per_cubic_meter;
        Density::new::<kilogram_per_cubic_meter>(RHO_AIR_KG_M3)
    }

    #[inline]
    pub fn quarter_mile() -> Length {
        m(QUARTER_MILE_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _m = kg(1500.0);
        let _l = m(0.33);
        let _a = m2(0.6);
        let _v = mps(30.0);
        let _dt = s(0.01);
        let _f = newtons(4000.0);
        let _g = constants::g();
        let _rho = constants::rho_air();
    }

    #[test]
    fn millimetres_convert_to_si() {
        assert!((mm(245.0).value - 0.245).abs() < 1e-12);
    }

    #[test]
    fn kph_conversion() {
        assert!((to_kph(mps(10.0)) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn rpm_constant_matches_one_revolution() {
        let one_rev_per_s = 2.0 * core::f64::consts::PI;
        assert!((one_rev_per_s * constants::RPM_PER_RAD_S - 60.0).abs() < 1e-9);
    }

    #[test]
    fn quarter_mile_length() {
        assert_eq!(constants::quarter_mile().value, constants::QUARTER_MILE_M);
    }
}
