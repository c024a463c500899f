//! Translation from windowing-system events.

pub mod winit;
