//! Window and event loop.
//!
//! [`Runtime`] owns the winit event loop and the single application window,
//! builds the GPU context for it and drives the [`App`](crate::core::App)
//! callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
