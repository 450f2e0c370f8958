//! CPU scheduling engines over a simulated integer clock.
//!
//! Each engine takes the input descriptors by reference, builds its own
//! records, and runs to completion in bounded steps.

mod core;
mod fcfs;
mod round_robin;
mod sjf;
mod srt;
mod trace;

pub use self::core::{
    run_all, simulate, validate_batch, validate_quantum, Algorithm, SimulationError,
};
pub use fcfs::fcfs;
pub use round_robin::round_robin;
pub use sjf::sjf;
pub use srt::srt;
pub use trace::{GanttSegment, Trace, TraceAction, TraceEvent};
