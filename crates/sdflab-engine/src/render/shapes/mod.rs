//! Instanced overlay renderers, one per draw-list bucket.

mod atlas;
mod batch;

pub mod circle;
pub mod rounded_rect;
pub mod text;
