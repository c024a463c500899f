use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use super::GpuInit;

/// What became of a failed swapchain acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Recovery {
    /// The surface was configured again; try next frame.
    Reconfigured,
    /// Transient failure; try next frame.
    Retry,
    OutOfMemory,
}

/// A window surface and the configuration it was last given.
pub(crate) struct WindowSurface<'w> {
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> WindowSurface<'w> {
    pub(crate) fn new(
        surface: wgpu::Surface<'w>,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        size: PhysicalSize<u32>,
        init: &GpuInit,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(adapter);
        let format = pick_format(&caps.formats, init.prefer_srgb).context("surface offers no formats")?;
        let alpha_mode = pick_alpha_mode(&caps.alpha_modes, init.alpha_mode);
        log::debug!("surface {format:?}, {alpha_mode:?}, {:?}", init.present_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: Vec::new(),
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        let this = Self { surface, config };
        this.configure(device);
        Ok(this)
    }

    pub(crate) fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Follows the window size. Zero-area sizes (minimized) are remembered but
    /// not configured.
    pub(crate) fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        self.config.width = size.width;
        self.config.height = size.height;
        self.configure(device);
    }

    pub(crate) fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub(crate) fn recover(&self, device: &wgpu::Device, err: wgpu::SurfaceError) -> Recovery {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                self.configure(device);
                Recovery::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => Recovery::OutOfMemory,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Recovery::Retry,
        }
    }

    fn configure(&self, device: &wgpu::Device) {
        if self.config.width > 0 && self.config.height > 0 {
            self.surface.configure(device, &self.config);
        }
    }
}

/// First format whose sRGB-ness matches the preference, else the first offered.
fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    let preferred = formats.iter().find(|f| f.is_srgb() == prefer_srgb);
    preferred.or(formats.first()).copied()
}

fn pick_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    wanted: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    match wanted {
        Some(mode) if supported.contains(&mode) => mode,
        _ => supported.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
    }
}

#[cfg(test)]
mod tests {
    use wgpu::{CompositeAlphaMode as Alpha, TextureFormat as Format};

    use super::*;

    #[test]
    fn linear_format_when_srgb_is_off() {
        let offered = [Format::Bgra8UnormSrgb, Format::Rgba8UnormSrgb, Format::Bgra8Unorm];
        assert_eq!(pick_format(&offered, false), Some(Format::Bgra8Unorm));
        assert_eq!(pick_format(&offered, true), Some(Format::Bgra8UnormSrgb));
    }

    #[test]
    fn any_format_beats_none() {
        assert_eq!(pick_format(&[Format::Rgba8UnormSrgb], false), Some(Format::Rgba8UnormSrgb));
        assert_eq!(pick_format(&[], false), None);
    }

    #[test]
    fn alpha_mode_falls_back_to_supported() {
        let supported = [Alpha::Opaque, Alpha::PreMultiplied];
        assert_eq!(pick_alpha_mode(&supported, Some(Alpha::PreMultiplied)), Alpha::PreMultiplied);
        assert_eq!(pick_alpha_mode(&supported, Some(Alpha::PostMultiplied)), Alpha::Opaque);
        assert_eq!(pick_alpha_mode(&supported, None), Alpha::Opaque);
        assert_eq!(pick_alpha_mode(&[], None), Alpha::Auto);
    }
}
