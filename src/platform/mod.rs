//! Platform abstraction layer
//!
//! Host-facing glue that is not part of the simulation:
//! - Frame time to fixed ticks
//! - Input events folded into per-tick snapshots

pub mod clock;
pub mod input;

pub use clock::FixedStep;
pub use input::{InputState, Key};
