//! Frame timing.
//!
//! One [`FrameClock`] lives per window; `tick()` is called once per presented
//! frame and yields the elapsed time since the previous tick.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
