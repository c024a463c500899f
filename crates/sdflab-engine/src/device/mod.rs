//! The wgpu device and the window surface it presents to.

mod gpu;
mod init;
mod surface;

pub use gpu::{FrameStart, Gpu, GpuFrame};
pub use init::GpuInit;
