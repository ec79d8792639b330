//! Platform abstraction layer
//!
//! Host-side concerns the simulation depends on but must not own:
//! - Time (monotonic milliseconds, sampled once per tick)

pub mod time;
