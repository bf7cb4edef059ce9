//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (monotonic millisecond clock, frame pacing)
//! - Input events (latched into per-tick commands)

pub mod clock;
pub mod input;

pub use clock::{Clock, FrameLimiter, SystemClock};
pub use input::{Button, InputLatch};
