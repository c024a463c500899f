//! Platform and GPU runtime for sdflab.
//!
//! Owns the window, the wgpu device, input translation, frame timing and the
//! small set of instanced renderers used to draw the tuning overlay on top of
//! an application's own passes.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;
pub mod window;
