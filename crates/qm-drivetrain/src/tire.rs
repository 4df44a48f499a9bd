//! Tire grip and driven-axle traction budget.

use crate::error::DrivetrainResult;
use qm_core::numeric::{ensure_positive, ensure_unit_fraction};
use qm_core::units::Length;
use std::fmt;
use std::str::FromStr;

/// Tire compound family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TireCompound {
    AllSeason,
    #[default]
    Summer,
    Track,
    DragRadial,
}

impl TireCompound {
    pub const ALL: [TireCompound; 4] = [
        TireCompound::AllSeason,
        TireCompound::Summer,
        TireCompound::Track,
        TireCompound::DragRadial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TireCompound::AllSeason => "all_season",
            TireCompound::Summer => "summer",
            TireCompound::Track => "track",
            TireCompound::DragRadial => "drag_radial",
        }
    }
}

impl fmt::Display for TireCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TireCompound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TireCompound::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tire compound '{s}'"))
    }
}

/// Tire with its grip already resolved into multipliers.
///
/// The multipliers come from whoever resolved the car; this crate only multiplies
/// them out.
#[derive(Debug, Clone, PartialEq)]
pub struct TireProfile {
    pub width: Length,
    pub compound: TireCompound,
    /// Base friction coefficient before width/compound adjustments
    pub base_mu: f64,
    pub width_multiplier: f64,
    pub compound_multiplier: f64,
}

impl TireProfile {
    /// Effective traction coefficient.
    pub fn traction_coefficient(&self) -> f64 {
        self.base_mu * self.width_multiplier * self.compound_multiplier
    }

    pub fn validate(&self) -> DrivetrainResult<()> {
        ensure_positive(self.width.value, "tire width")?;
        ensure_positive(self.base_mu, "tire base traction coefficient")?;
        ensure_positive(self.width_multiplier, "tire width multiplier")?;
        ensure_positive(self.compound_multiplier, "tire compound multiplier")?;
        Ok(())
    }
}

/// Which axles put power down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrivenAxles {
    Rwd,
    Awd,
}

impl DrivenAxles {
    /// Fraction of vehicle weight usable for traction when no override is supplied.
    pub fn default_drive_factor(self) -> f64 {
        match self {
            DrivenAxles::Rwd => 0.93,
            DrivenAxles::Awd => 1.00,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrivenAxles::Rwd => "RWD",
            DrivenAxles::Awd => "AWD",
        }
    }
}

impl fmt::Display for DrivenAxles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Driven axles plus the resolved weight fraction available for traction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivetrainLayout {
    pub axles: DrivenAxles,
    pub drive_factor: f64,
}

impl DrivetrainLayout {
    pub fn new(axles: DrivenAxles) -> Self {
        Self {
            axles,
            drive_factor: axles.default_drive_factor(),
        }
    }

    pub fn rwd() -> Self {
        Self::new(DrivenAxles::Rwd)
    }

    pub fn awd() -> Self {
        Self::new(DrivenAxles::Awd)
    }

    pub fn validate(&self) -> DrivetrainResult<()> {
        ensure_unit_fraction(self.drive_factor, "drive factor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qm_core::units::mm;

    fn tire(base_mu: f64) -> TireProfile {
        TireProfile {
            width: mm(255.0),
            compound: TireCompound::Track,
            base_mu,
            width_multiplier: 1.02,
            compound_multiplier: 1.08,
        }
    }

    #[test]
    fn traction_coefficient_is_product() {
        let t = tire(1.0);
        assert!((t.traction_coefficient() - 1.02 * 1.08).abs() < 1e-12);
    }

    #[test]
    fn zero_mu_rejected() {
        assert!(tire(0.0).validate().is_err());
        assert!(tire(1.05).validate().is_ok());
    }

    #[test]
    fn awd_beats_rwd() {
        assert!(DrivenAxles::Awd.default_drive_factor() > DrivenAxles::Rwd.default_drive_factor());
    }

    #[test]
    fn drive_factor_must_be_fraction() {
        let layout = DrivetrainLayout {
            axles: DrivenAxles::Rwd,
            drive_factor: 1.2,
        };
        assert!(layout.validate().is_err());
        assert!(DrivetrainLayout::rwd().validate().is_ok());
    }

    #[test]
    fn compound_parses_case_insensitively() {
        assert_eq!("DRAG_RADIAL".parse::<TireCompound>(), Ok(TireCompound::DragRadial));
        assert!("slick".parse::<TireCompound>().is_err());
        for c in TireCompound::ALL {
            assert_eq!(c.to_string().parse::<TireCompound>(), Ok(c));
        }
    }
}
