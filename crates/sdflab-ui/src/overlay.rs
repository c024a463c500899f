use sdflab_engine::coords::{Rect, Vec2};
use sdflab_engine::render::shapes::circle::CircleRenderer;
use sdflab_engine::render::shapes::rounded_rect::RoundedRectRenderer;
use sdflab_engine::render::shapes::text::TextRenderer;
use sdflab_engine::render::{RenderCtx, RenderTarget};
use sdflab_engine::text::{FontId, FontLoadError};

use crate::scene::{UiInput, UiResponse, UiScene};
use crate::widget::Element;

/// A widget tree drawn over the application's frame.
///
/// Owns the [`UiScene`] and the three shape renderers. Call
/// [`frame`](Self::frame) once per frame before rendering, then
/// [`render`](Self::render) as the last pass.
pub struct Overlay {
    ui: UiScene,
    rects: RoundedRectRenderer,
    circles: CircleRenderer,
    text: TextRenderer,
    scale: f32,
    margin: f32,
    panel: Option<Rect>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            ui: UiScene::new(),
            rects: RoundedRectRenderer::new(),
            circles: CircleRenderer::new(),
            text: TextRenderer::new(),
            scale: 1.0,
            margin: 8.0,
            panel: None,
        }
    }

    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        self.ui.font_system.load_font(bytes)
    }

    /// Physical pixels per logical pixel; follow the window's scale factor.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 && scale != self.scale {
            log::debug!("overlay scale {} -> {scale}", self.scale);
            self.scale = scale;
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Where the root was placed last frame.
    pub fn panel_rect(&self) -> Option<Rect> {
        self.panel
    }

    /// Lays out `root` at the top-left corner of a `viewport`-sized window,
    /// routes `input` through it and records its draw commands.
    pub fn frame(&mut self, root: Element, viewport: Vec2, input: &UiInput) -> UiResponse {
        let m = self.margin;
        let area = Rect::new(m, m, (viewport.x - 2.0 * m).max(0.0), (viewport.y - 2.0 * m).max(0.0));
        let (rect, response) = self.ui.frame(root, area, input, self.scale);
        self.panel = Some(rect);
        response
    }

    /// Draws the commands recorded by the last [`frame`](Self::frame).
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let UiScene { font_system, draw_list, .. } = &self.ui;
        self.rects.render(ctx, target, draw_list);
        self.circles.render(ctx, target, draw_list);
        self.text.render(ctx, target, draw_list, font_system);
    }
}
