//! Overlay geometry recorded by widgets and consumed by the renderers in
//! [`crate::render::shapes`].

mod list;
pub mod shapes;

pub use list::DrawList;
pub use shapes::Border;
