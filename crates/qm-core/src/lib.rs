//! qm-core: shared foundation for the quarter-mile simulator.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{QmError, QmResult};
pub use numeric::*;
pub use units::*;
