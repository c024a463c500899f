use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::WindowId;

use sdflab_engine::coords::Vec2;
use sdflab_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use sdflab_engine::device::Gpu;
use sdflab_engine::input::Key;
use sdflab_ui::overlay::Overlay;
use sdflab_ui::scene::{UiInput, UiResponse};
use sdflab_ui::tweak::TweakBar;

use crate::config::DemoConfig;
use crate::renderer::SdfRenderer;
use crate::scene::SdfScene;

/// Host for the distance-field scene and its tweak panel.
pub struct SdfApp {
    config: DemoConfig,
    scene: SdfScene,
    bar: TweakBar,
    overlay: Overlay,
    // Created once the GPU exists.
    renderer: Option<SdfRenderer>,
}

impl SdfApp {
    pub fn new(config: DemoConfig) -> Result<Self> {
        let scene = SdfScene::new(&config.scene)?;
        let bar = TweakBar::new(config.panel_name.clone())
            .width(config.panel_width)
            .tint(config.panel_tint);
        Ok(Self { config, scene, bar, overlay: Overlay::new(), renderer: None })
    }

    /// Applies the panel's queued edits in order.
    fn apply_changes(&mut self) {
        for change in self.bar.take_changes() {
            if let Err(e) = self.scene.apply(&change) {
                log::warn!("ignored {} = {}: {e}", change.name, change.value);
            }
        }
    }
}

impl App for SdfApp {
    fn on_gpu_ready(&mut self, window: &WindowCtx<'_>, gpu: &Gpu<'_>) -> Result<()> {
        match self.config.load_font() {
            Some((path, bytes)) => match self.overlay.load_font(&bytes) {
                Ok(id) => {
                    log::info!("overlay font {}", path.display());
                    self.bar.set_font(Some(id));
                }
                Err(e) => log::warn!("failed to load font {}: {e}", path.display()),
            },
            None => log::warn!("no overlay font found; set {} to a .ttf file", crate::config::FONT_ENV),
        }
        self.overlay.set_scale(window.scale_factor());

        self.renderer = Some(SdfRenderer::new(gpu.device(), gpu.surface_format())?);
        log::info!("{} on {}", self.config.title, gpu.adapter_info().name);
        Ok(())
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::ScaleFactorChanged { scale_factor, .. } = event {
            self.overlay.set_scale(*scale_factor as f32);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let (w, h) = ctx.window.logical_size();
        let input = UiInput::from_engine(ctx.input, ctx.input_frame);

        // ── Overlay first ─────────────────────────────────────────────────
        self.bar.clear();
        self.scene.bind(&mut self.bar);
        let response = self.overlay.frame(self.bar.build(), Vec2::new(w, h), &input);
        self.apply_changes();

        if escape_requested(&input, &response) {
            log::info!("escape pressed, closing");
            return Ok(AppControl::Exit);
        }

        // ── Update ────────────────────────────────────────────────────────
        if let Err(e) = self.scene.update(ctx.time.dt) {
            log::warn!("animation step rejected: {e}");
        }

        // ── Render ────────────────────────────────────────────────────────
        if let Some(r) = self.renderer.as_mut() {
            r.ensure_format(ctx.gpu.device(), ctx.gpu.surface_format())?;
        }
        let scene = &self.scene;
        let overlay = &mut self.overlay;
        let renderer = self.renderer.as_mut();

        Ok(ctx.render(self.config.clear_color, |rctx, target| {
            if let Some(r) = renderer {
                r.render(rctx, target, scene);
            }
            overlay.render(rctx, target);
        }))
    }
}

/// Escape quits unless it auto-repeated or the overlay took it.
fn escape_requested(input: &UiInput, response: &UiResponse) -> bool {
    !response.consumed_key(Key::Escape)
        && input.keys_pressed.iter().any(|k| k.key == Key::Escape && !k.repeat)
}
