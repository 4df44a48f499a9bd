//! Per-step samples recorded during a run.

/// One recorded step.
///
/// Kinematics are at the end of the step; gear, forces and flags are the ones that
/// acted during it.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSample {
    pub time_s: f64,
    pub distance_m: f64,
    pub speed_mps: f64,
    pub accel_mps2: f64,
    /// Drive force after the traction cap
    pub drive_force_n: f64,
    pub wheel_torque_nm: f64,
    /// Engine or motor rpm
    pub source_rpm: f64,
    /// 0-based gear; `None` for single-speed drives
    pub gear: Option<usize>,
    pub in_shift: bool,
    pub traction_limited: bool,
}

/// Ordered samples of one run, starting with the launch state at t = 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub samples: Vec<TraceSample>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&TraceSample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceSample> {
        self.samples.iter()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time_s).collect()
    }

    /// Highest speed reached (m/s).
    pub fn peak_speed_mps(&self) -> f64 {
        self.samples.iter().map(|s| s.speed_mps).fold(0.0, f64::max)
    }

    /// Total time with the clutch open.
    pub fn time_in_shift_s(&self) -> f64 {
        self.intervals()
            .filter(|(_, s)| s.in_shift)
            .map(|(dt, _)| dt)
            .sum()
    }

    /// Total time with the tires at their grip limit.
    pub fn time_traction_limited_s(&self) -> f64 {
        self.intervals()
            .filter(|(_, s)| s.traction_limited)
            .map(|(dt, _)| dt)
            .sum()
    }

    /// Time covered by each sample after the first, paired with it.
    fn intervals(&self) -> impl Iterator<Item = (f64, &TraceSample)> {
        self.samples
            .windows(2)
            .map(|w| (w[1].time_s - w[0].time_s, &w[1]))
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceSample;
    type IntoIter = std::slice::Iter<'a, TraceSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64, v: f64, in_shift: bool, traction_limited: bool) -> TraceSample {
        TraceSample {
            time_s: t,
            distance_m: 0.0,
            speed_mps: v,
            accel_mps2: 0.0,
            drive_force_n: 0.0,
            wheel_torque_nm: 0.0,
            source_rpm: 0.0,
            gear: Some(0),
            in_shift,
            traction_limited,
        }
    }

    #[test]
    fn interval_sums() {
        let trace = Trace {
            samples: vec![
                sample(0.0, 0.0, false, false),
                sample(0.5, 2.0, false, true),
                sample(1.0, 4.0, true, false),
                sample(1.5, 3.5, true, false),
            ],
        };
        assert_eq!(trace.len(), 4);
        assert!((trace.time_in_shift_s() - 1.0).abs() < 1e-12);
        assert!((trace.time_traction_limited_s() - 0.5).abs() < 1e-12);
        assert_eq!(trace.peak_speed_mps(), 4.0);
    }

    #[test]
    fn empty_trace() {
        let trace = Trace::default();
        assert!(trace.is_empty());
        assert!(trace.last().is_none());
        assert_eq!(trace.time_in_shift_s(), 0.0);
    }
}
