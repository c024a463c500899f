//! Colors used by draw commands.

mod color;

pub use color::Color;
