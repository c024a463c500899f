/// GPU creation parameters.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when one is offered.
    ///
    /// When `false`, a linear (`*Unorm`) format is preferred so shader output
    /// reaches the screen unconverted.
    pub prefer_srgb: bool,

    /// Swap behavior. FIFO is vsync and always supported.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; replaced by a supported one if unavailable.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; honored where the backend supports it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
