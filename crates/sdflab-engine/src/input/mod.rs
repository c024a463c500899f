//! Window input reduced to what the overlay and the host react to.
//!
//! winit events are translated by [`platform::winit`], folded into the
//! window's [`InputState`] and logged as this frame's transitions in an
//! [`InputFrame`].

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::{InputFrame, KeyPress};
pub use state::InputState;
pub use types::{InputEvent, Key, MouseButton};
