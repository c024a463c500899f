use std::path::PathBuf;

use sdflab_engine::paint::Color;
use sdflab_field::Shape;

/// Environment variable naming a font file for the overlay.
pub const FONT_ENV: &str = "SDFLAB_FONT";

const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Starting parameters of the distance-field scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub shape: Shape,
    pub bilinear: bool,
    pub banded: bool,
    /// Texture side is `2^tex_pow`.
    pub tex_pow: i32,
    pub tex_pow_range: (i32, i32),
    pub radius: f32,
    pub radius_range: (f32, f32),
    pub radius_step: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: Shape::Circle,
            bilinear: true,
            banded: true,
            tex_pow: 5,
            tex_pow_range: (2, 6),
            radius: 4.0,
            radius_range: (0.1, 100.0),
            radius_step: 0.1,
        }
    }
}

/// Window, overlay and scene settings for the demo.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub clear_color: Color,
    pub panel_name: String,
    pub panel_width: f32,
    pub panel_tint: Color,
    /// Font files tried in order; the first readable one is used.
    pub font_paths: Vec<PathBuf>,
    pub scene: SceneConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "SDF Test".to_string(),
            width: 800.0,
            height: 800.0,
            clear_color: Color::BLACK,
            panel_name: "TweakBar".to_string(),
            panel_width: 150.0,
            panel_tint: Color::from_rgba_u8(96, 216, 224, 255),
            font_paths: FONT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            scene: SceneConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(FONT_ENV) {
            config.font_paths.insert(0, PathBuf::from(path));
        }
        config
    }

    /// Bytes of the first readable font, with its path.
    pub fn load_font(&self) -> Option<(PathBuf, Vec<u8>)> {
        self.font_paths
            .iter()
            .find_map(|p| std::fs::read(p).ok().map(|bytes| (p.clone(), bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo() {
        let c = DemoConfig::default();
        assert_eq!(c.title, "SDF Test");
        assert_eq!((c.width, c.height), (800.0, 800.0));
        assert_eq!(c.panel_name, "TweakBar");
        assert_eq!(c.panel_width, 150.0);

        let s = c.scene;
        assert_eq!(s.shape, Shape::Circle);
        assert!(s.bilinear && s.banded);
        assert_eq!(s.tex_pow, 5);
        assert_eq!(s.radius, 4.0);
    }

    #[test]
    fn missing_fonts_load_nothing() {
        let c = DemoConfig { font_paths: vec![PathBuf::from("/nonexistent/sdflab.ttf")], ..DemoConfig::default() };
        assert!(c.load_font().is_none());
    }
}
