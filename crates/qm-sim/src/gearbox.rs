//! Upshift state machine for stepped gearboxes.
//!
//! ```text
//! driving(g) --rpm >= shift_rpm, manual--> shifting(g -> g+1, timer)
//! shifting   --timer >= shift_time-------> driving(g+1)
//! driving(g) --rpm >= shift_rpm, auto----> driving(g+1)
//! ```
//!
//! No upshift is attempted from the top gear. At most one transition happens per
//! call to [`GearboxState::update`].

use qm_core::numeric::{Tolerances, nearly_equal};
use qm_drivetrain::{GearboxKind, IcePowertrain};

/// Transition reported by [`GearboxState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftEvent {
    /// Manual shift began; drive is cut until it completes.
    Started { from: usize, to: usize },
    /// Manual shift finished; drive resumes in `gear`.
    Completed { gear: usize },
    /// Automatic shift, no torque interruption.
    Instant { from: usize, to: usize },
}

/// Gearbox sub-state of a run. Gears are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct GearboxState {
    pub gear: usize,
    pub in_shift: bool,
    /// Time spent in the current shift (s)
    pub shift_timer_s: f64,
    /// Gear engaged when the current shift completes
    pub pending_gear: usize,
    pub shift_count: usize,
}

impl Default for GearboxState {
    fn default() -> Self {
        Self::new()
    }
}

impl GearboxState {
    /// First gear, clutch engaged.
    pub fn new() -> Self {
        Self {
            gear: 0,
            in_shift: false,
            shift_timer_s: 0.0,
            pending_gear: 0,
            shift_count: 0,
        }
    }

    /// Whether torque reaches the wheels.
    pub fn drive_engaged(&self) -> bool {
        !self.in_shift
    }

    /// Accumulate shift time. No-op while driving.
    pub fn advance_timer(&mut self, dt: f64) {
        if self.in_shift {
            self.shift_timer_s += dt;
        }
    }

    /// Apply at most one transition given the engine speed in the current gear.
    pub fn update(&mut self, ice: &IcePowertrain, engine_rpm: f64) -> Option<ShiftEvent> {
        if self.in_shift {
            let done = self.shift_timer_s >= ice.shift_time_s
                || nearly_equal(self.shift_timer_s, ice.shift_time_s, Tolerances::default());
            if !done {
                return None;
            }
            self.gear = self.pending_gear;
            self.in_shift = false;
            self.shift_timer_s = 0.0;
            return Some(ShiftEvent::Completed { gear: self.gear });
        }

        if !ice.has_next_gear(self.gear) || engine_rpm < ice.shift_rpm {
            return None;
        }

        let from = self.gear;
        let to = from + 1;
        self.shift_count += 1;

        match ice.gearbox {
            GearboxKind::Manual => {
                self.in_shift = true;
                self.shift_timer_s = 0.0;
                self.pending_gear = to;
                Some(ShiftEvent::Started { from, to })
            }
            GearboxKind::Automatic => {
                self.gear = to;
                self.pending_gear = to;
                Some(ShiftEvent::Instant { from, to })
            }
        }
    }
}
