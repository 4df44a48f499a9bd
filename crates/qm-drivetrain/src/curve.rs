//! Piecewise-linear torque curve.

use crate::error::{DrivetrainError, DrivetrainResult};
use qm_core::units::constants::HP_TORQUE_RPM_DIVISOR;

/// Torque (N·m) sampled against rotational speed (rpm).
///
/// Samples are strictly increasing in rpm and never empty. Lookups outside the
/// sampled range clamp to the endpoint torque; there is no extrapolation.
///
/// Fields are private so every curve in circulation has passed [`TorqueCurve::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct TorqueCurve {
    rpm: Vec<f64>,
    torque_nm: Vec<f64>,
}

impl TorqueCurve {
    /// Build a curve from `(rpm, torque_nm)` samples.
    ///
    /// # Errors
    /// `InvalidCurve` if the samples are empty, contain non-finite values, or are
    /// not strictly increasing in rpm.
    pub fn new(points: Vec<(f64, f64)>) -> DrivetrainResult<Self> {
        if points.is_empty() {
            return Err(DrivetrainError::InvalidCurve {
                reason: "curve has no samples".to_string(),
            });
        }

        if let Some((rpm, torque)) = points
            .iter()
            .find(|(rpm, torque)| !rpm.is_finite() || !torque.is_finite())
        {
            return Err(DrivetrainError::InvalidCurve {
                reason: format!("non-finite sample ({rpm}, {torque})"),
            });
        }

        if let Some(w) = points.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(DrivetrainError::InvalidCurve {
                reason: format!(
                    "rpm must be strictly increasing, found {} followed by {}",
                    w[0].0, w[1].0
                ),
            });
        }

        let (rpm, torque_nm) = points.into_iter().unzip();
        Ok(Self { rpm, torque_nm })
    }

    /// Convenience for the `[[rpm, nm], ...]` layout used by race files.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> DrivetrainResult<Self> {
        Self::new(pairs.iter().map(|p| (p[0], p[1])).collect())
    }

    /// A single-sample curve: the same torque at every speed.
    pub fn flat(torque_nm: f64) -> DrivetrainResult<Self> {
        Self::new(vec![(0.0, torque_nm)])
    }

    /// Torque at `rpm`, linearly interpolated between the bracketing samples.
    pub fn torque_at(&self, rpm: f64) -> f64 {
        let last = self.rpm.len() - 1;
        if rpm <= self.rpm[0] {
            return self.torque_nm[0];
        }
        if rpm >= self.rpm[last] {
            return self.torque_nm[last];
        }

        // First sample strictly above the query; the clamps above keep it in 1..=last
        let hi = self.rpm.partition_point(|&x| x <= rpm);
        let lo = hi - 1;

        let (s0, s1) = (self.rpm[lo], self.rpm[hi]);
        let (t0, t1) = (self.torque_nm[lo], self.torque_nm[hi]);
        let frac = (rpm - s0) / (s1 - s0);

        // Rounding can land a hair outside the bracket
        (t0 + (t1 - t0) * frac).clamp(t0.min(t1), t0.max(t1))
    }

    /// Approximate power in HP at `rpm`.
    pub fn power_hp_at(&self, rpm: f64) -> f64 {
        self.torque_at(rpm) * rpm / HP_TORQUE_RPM_DIVISOR
    }

    /// Iterate over `(rpm, torque_nm)` samples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.rpm.iter().copied().zip(self.torque_nm.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.rpm.len()
    }

    /// Always false; kept for the `len`/`is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.rpm.is_empty()
    }

    /// Lowest and highest sampled rpm.
    pub fn rpm_range(&self) -> (f64, f64) {
        (self.rpm[0], self.rpm[self.rpm.len() - 1])
    }

    pub fn peak_torque_nm(&self) -> f64 {
        self.torque_nm
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strictly increasing rpm grid with arbitrary (possibly non-monotone) torque.
    fn curve_strategy() -> impl Strategy<Value = TorqueCurve> {
        prop::collection::vec((1.0_f64..500.0, -200.0_f64..900.0), 1..12).prop_map(|steps| {
            let mut rpm = 0.0;
            let points = steps
                .into_iter()
                .map(|(gap, torque)| {
                    rpm += gap;
                    (rpm, torque)
                })
                .collect();
            TorqueCurve::new(points).unwrap()
        })
    }

    proptest! {
        #[test]
        fn samples_are_reproduced_exactly(curve in curve_strategy()) {
            for (rpm, torque) in curve.points() {
                prop_assert_eq!(curve.torque_at(rpm), torque);
            }
        }

        #[test]
        fn outside_range_clamps_to_endpoints(curve in curve_strategy(), offset in 0.0_f64..10_000.0) {
            let (lo, hi) = curve.rpm_range();
            let first = curve.points().next().unwrap().1;
            let last = curve.points().last().unwrap().1;
            prop_assert_eq!(curve.torque_at(lo - offset), first);
            prop_assert_eq!(curve.torque_at(hi + offset), last);
        }

        #[test]
        fn interpolation_stays_within_bracket(curve in curve_strategy(), frac in 0.0_f64..1.0) {
            let points: Vec<(f64, f64)> = curve.points().collect();
            for w in points.windows(2) {
                let (s0, t0) = w[0];
                let (s1, t1) = w[1];
                let q = s0 + (s1 - s0) * frac;
                let torque = curve.torque_at(q);
                prop_assert!(torque >= t0.min(t1) && torque <= t0.max(t1));
            }
        }
    }
}
