//! Overlay renderers.
//!
//! Each renderer owns its GPU objects, pulls its own command kind out of a
//! [`DrawList`](crate::scene::DrawList) and draws into the frame with
//! `LoadOp::Load`, so they compose on top of whatever was drawn before.
//!
//! Geometry arrives in logical pixels (top-left origin, +Y down); the vertex
//! shaders convert to NDC through a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
