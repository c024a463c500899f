//! Contract between the runtime loop and the application.
//!
//! The runtime owns every platform object; applications only see the
//! borrowed handles in [`WindowCtx`] and [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
