//! Geometry shared by the overlay renderers and the widget layer.
//!
//! All CPU-side geometry is in logical pixels, origin top-left, +Y down.
//! Renderers convert to NDC in their vertex shaders.

mod corner_radii;
mod rect;
mod vec2;
mod viewport;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
