//! Glyph atlas: a single-channel texture filled shelf by shelf as new
//! glyphs show up.

use std::collections::HashMap;

use fontdue::Font;
use fontdue::layout::GlyphRasterConfig;

/// Gap kept around every glyph so linear sampling never bleeds.
const GUTTER: u32 = 1;

/// Packs rectangles left to right in shelves, opening a new shelf under
/// the tallest slot of the current one.
#[derive(Debug)]
struct ShelfPacker {
    side: u32,
    next_x: u32,
    shelf_y: u32,
    shelf_height: u32,
    exhausted: bool,
}

impl ShelfPacker {
    fn new(side: u32) -> Self {
        Self { side, next_x: GUTTER, shelf_y: GUTTER, shelf_height: 0, exhausted: false }
    }

    /// Top-left of a free `w × h` slot. Once a slot fails to fit vertically
    /// the packer stays exhausted.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.exhausted || w + 2 * GUTTER > self.side {
            return None;
        }
        if self.next_x + w + GUTTER > self.side {
            self.shelf_y += self.shelf_height + GUTTER;
            self.next_x = GUTTER;
            self.shelf_height = 0;
        }
        if self.shelf_y + h + GUTTER > self.side {
            self.exhausted = true;
            return None;
        }
        let slot = (self.next_x, self.shelf_y);
        self.next_x += w + GUTTER;
        self.shelf_height = self.shelf_height.max(h);
        Some(slot)
    }
}

/// Normalized texture coordinates of a cached glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

pub(super) struct GlyphAtlas {
    side: u32,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    slots: HashMap<GlyphRasterConfig, UvRect>,
}

impl GlyphAtlas {
    pub(super) fn new(device: &wgpu::Device, side: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sdflab glyph atlas"),
            size: wgpu::Extent3d { width: side, height: side, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { side, texture, view, packer: ShelfPacker::new(side), slots: HashMap::new() }
    }

    pub(super) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Where `key` lives in the atlas, rasterizing and uploading it first
    /// when needed. `None` when the atlas has no room left.
    pub(super) fn glyph(&mut self, queue: &wgpu::Queue, font: &Font, key: GlyphRasterConfig) -> Option<UvRect> {
        if let Some(uv) = self.slots.get(&key) {
            return Some(*uv);
        }

        let (metrics, coverage) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }
        let Some((x, y)) = self.packer.allocate(w, h) else {
            log::warn!("glyph atlas full ({0}×{0}), glyph dropped", self.side);
            return None;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &coverage,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let side = self.side as f32;
        let uv = UvRect {
            min: [x as f32 / side, y as f32 / side],
            max: [(x + w) as f32 / side, (y + h) as f32 / side],
        };
        self.slots.insert(key, uv);
        Some(uv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_fill_a_shelf_left_to_right() {
        let mut p = ShelfPacker::new(64);
        assert_eq!(p.allocate(10, 8), Some((1, 1)));
        assert_eq!(p.allocate(10, 12), Some((12, 1)));
    }

    #[test]
    fn new_shelf_starts_below_the_tallest_slot() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.allocate(20, 5), Some((1, 1)));
        assert_eq!(p.allocate(5, 9), Some((22, 1)));
        assert_eq!(p.allocate(10, 4), Some((1, 11)));
    }

    #[test]
    fn exhaustion_is_sticky() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.allocate(14, 14), Some((1, 1)));
        assert_eq!(p.allocate(4, 4), None);
        assert_eq!(p.allocate(1, 1), None);
    }

    #[test]
    fn too_wide_is_refused_without_exhausting() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.allocate(15, 2), None);
        assert_eq!(p.allocate(4, 4), Some((1, 1)));
    }
}
