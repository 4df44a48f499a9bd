//! Standing-start acceleration runs for resolved cars.
//!
//! Provides:
//! - Upshift state machine with manual (torque cut) and automatic shifts
//! - Fixed-step forward Euler integrator
//! - `simulate` with sub-step interpolation of elapsed time and trap speed
//! - Parallel races over a field of cars

pub mod error;
pub mod gearbox;
pub mod integrator;
pub mod race;
pub mod sim;
pub mod trace;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use gearbox::{GearboxState, ShiftEvent};
pub use integrator::{ForwardEuler, RunState};
pub use race::{RaceEntry, RaceResult, race};
pub use sim::{Outcome, SimOptions, simulate, simulate_quarter_mile};
pub use trace::{Trace, TraceSample};
